use uuid::Uuid;

use jobboard_core::AppError;

/// Parses an id taken from the path or query string.
pub fn parse_uid(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::invalid_id())
}
