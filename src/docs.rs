use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use jobboard_auth::TokenSubject;
use jobboard_core::ErrorBody;
use jobboard_models::applications::{Application, ApplicationCreate, ApplicationUpdate};
use jobboard_models::auth::{
    LoginRequest, LoginResponse, LoginUser, MessageResponse, PasswordResetConfirm,
    PasswordResetRequest, RefreshResponse,
};
use jobboard_models::jobs::{Job, JobCreate, JobUpdate};
use jobboard_models::users::{SignupRequest, UpdateUserDto, UserResponse, UserRole};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::signup,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::refresh_token,
        crate::modules::auth::controller::logout,
        crate::modules::auth::controller::me,
        crate::modules::auth::controller::verify_email,
        crate::modules::auth::controller::password_reset_request,
        crate::modules::auth::controller::confirm_password_reset,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::jobs::controller::get_jobs,
        crate::modules::jobs::controller::get_job,
        crate::modules::jobs::controller::create_job,
        crate::modules::jobs::controller::get_employer_jobs,
        crate::modules::jobs::controller::update_job,
        crate::modules::jobs::controller::delete_job,
        crate::modules::applications::controller::get_applications,
        crate::modules::applications::controller::get_user_applications,
        crate::modules::applications::controller::get_job_applications,
        crate::modules::applications::controller::apply,
        crate::modules::applications::controller::get_application,
        crate::modules::applications::controller::update_application,
        crate::modules::applications::controller::delete_application,
    ),
    components(
        schemas(
            SignupRequest,
            UpdateUserDto,
            UserResponse,
            UserRole,
            LoginRequest,
            LoginResponse,
            LoginUser,
            RefreshResponse,
            MessageResponse,
            PasswordResetRequest,
            PasswordResetConfirm,
            TokenSubject,
            Job,
            JobCreate,
            JobUpdate,
            Application,
            ApplicationCreate,
            ApplicationUpdate,
            ErrorBody,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Signup, login, token refresh and account recovery"),
        (name = "Users", description = "Account management"),
        (name = "Jobs", description = "Job listings"),
        (name = "Applications", description = "Job applications")
    ),
    info(
        title = "Jobboard API",
        version = "0.1.0",
        description = "Job board REST API built with Rust, Axum and PostgreSQL, secured with revocable JWTs.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_versioned_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/v1/auth/login"));
        assert!(doc.paths.paths.contains_key("/api/v1/jobs/{job_uid}"));
        assert!(doc.paths.paths.contains_key("/api/v1/applications/{application_uid}"));
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
