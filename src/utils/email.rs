use std::sync::Arc;

use anyhow::anyhow;
use lettre::message::{MultiPart, SinglePart, header};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{info, instrument};

use jobboard_config::EmailConfig;
use jobboard_core::AppError;

#[derive(Clone)]
pub struct EmailService {
    config: Arc<EmailConfig>,
}

impl std::fmt::Debug for EmailService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailService")
            .field("enabled", &self.config.enabled)
            .field("smtp_host", &self.config.smtp_host)
            .finish_non_exhaustive()
    }
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn verification_link(&self, token: &str) -> String {
        format!("{}/api/v1/auth/verify_email/{}", self.config.app_url, token)
    }

    pub fn password_reset_link(&self, token: &str) -> String {
        format!(
            "{}/api/v1/auth/confirm-password-reset/{}",
            self.config.app_url, token
        )
    }

    #[instrument(skip(self, token))]
    pub async fn send_verification_email(
        &self,
        to_email: &str,
        to_name: &str,
        token: &str,
    ) -> Result<(), AppError> {
        let link = self.verification_link(token);
        let text_body = format!(
            "Hi {to_name},\n\n\
             Welcome to Jobboard! Please verify your email address by opening the link below:\n\
             {link}\n\n\
             If you didn't create an account, you can ignore this email.\n\n\
             Best regards,\n\
             Jobboard Team"
        );
        let html_body = layout(
            "Verify your email",
            &format!(
                r#"<p>Hi <strong>{to_name}</strong>,</p>
<p>Welcome to Jobboard! Please verify your email address to activate your account.</p>
<p><a href="{link}" style="display:inline-block;padding:12px 32px;background:#2563EB;color:#ffffff;text-decoration:none;border-radius:6px;">Verify email</a></p>
<p style="word-break:break-all;color:#2563EB;">{link}</p>"#
            ),
        );

        self.send_email(to_email, "Verify your email", &text_body, &html_body)
            .await
    }

    #[instrument(skip(self, token))]
    pub async fn send_password_reset_email(
        &self,
        to_email: &str,
        to_name: &str,
        token: &str,
    ) -> Result<(), AppError> {
        let link = self.password_reset_link(token);
        let text_body = format!(
            "Hi {to_name},\n\n\
             You requested to reset your password.\n\n\
             Use the link below to choose a new one:\n\
             {link}\n\n\
             If you didn't request this, please ignore this email.\n\n\
             Best regards,\n\
             Jobboard Team"
        );
        let html_body = layout(
            "Password Reset Request",
            &format!(
                r#"<p>Hi <strong>{to_name}</strong>,</p>
<p>We received a request to reset your password. Use the link below to choose a new one:</p>
<p><a href="{link}" style="display:inline-block;padding:12px 32px;background:#2563EB;color:#ffffff;text-decoration:none;border-radius:6px;">Reset password</a></p>
<p style="word-break:break-all;color:#2563EB;">{link}</p>
<p>If you didn't request this password reset, please ignore this email.</p>"#
            ),
        );

        self.send_email(to_email, "Password Reset Request", &text_body, &html_body)
            .await
    }

    #[instrument(skip(self))]
    pub async fn send_password_reset_confirmation(
        &self,
        to_email: &str,
        to_name: &str,
    ) -> Result<(), AppError> {
        let text_body = format!(
            "Hi {to_name},\n\n\
             Your password has been successfully reset.\n\n\
             If you didn't make this change, please contact support immediately.\n\n\
             Best regards,\n\
             Jobboard Team"
        );
        let html_body = layout(
            "Password Reset Successful",
            &format!(
                r#"<p>Hi <strong>{to_name}</strong>,</p>
<p>Your password has been successfully reset.</p>
<p>If you didn't make this change, please contact support immediately.</p>"#
            ),
        );

        self.send_email(
            to_email,
            "Password Reset Successful",
            &text_body,
            &html_body,
        )
        .await
    }

    #[instrument(skip(self, html_body, text_body))]
    async fn send_email(
        &self,
        to_email: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), AppError> {
        if !self.config.enabled {
            info!(to = %to_email, subject = %subject, "Email delivery disabled, skipping");
            return Ok(());
        }

        let from = format!("{} <{}>", self.config.from_name, self.config.from_email);

        let email = Message::builder()
            .from(
                from.parse()
                    .map_err(|e| AppError::internal(anyhow!("Invalid from email: {}", e)))?,
            )
            .to(to_email
                .parse()
                .map_err(|e| AppError::internal(anyhow!("Invalid to email: {}", e)))?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )
            .map_err(|e| AppError::internal(anyhow!("Failed to build email: {}", e)))?;

        let mailer = if self.config.smtp_username.is_empty() {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
                .port(self.config.smtp_port)
                .build()
        } else {
            let creds = Credentials::new(
                self.config.smtp_username.clone(),
                self.config.smtp_password.clone(),
            );

            SmtpTransport::relay(&self.config.smtp_host)
                .map_err(|e| AppError::internal(anyhow!("Failed to create SMTP relay: {}", e)))?
                .port(self.config.smtp_port)
                .credentials(creds)
                .build()
        };

        tokio::task::spawn_blocking(move || mailer.send(&email))
            .await
            .map_err(|e| AppError::internal(anyhow!("Task join error: {}", e)))?
            .map_err(|e| AppError::internal(anyhow!("Failed to send email: {}", e)))?;

        info!(to = %to_email, subject = %subject, "Email sent");

        Ok(())
    }
}

fn layout(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
</head>
<body style="margin:0;padding:0;font-family:Arial,sans-serif;background-color:#f4f4f4;">
    <table width="100%" cellpadding="0" cellspacing="0" style="padding:20px;">
        <tr>
            <td align="center">
                <table width="600" cellpadding="0" cellspacing="0" style="background:#ffffff;border-radius:8px;">
                    <tr>
                        <td style="background:#2563EB;padding:24px;text-align:center;">
                            <h1 style="margin:0;color:#ffffff;font-size:26px;">Jobboard</h1>
                        </td>
                    </tr>
                    <tr>
                        <td style="padding:32px 28px;color:#444444;font-size:15px;line-height:1.5;">
                            <h2 style="margin:0 0 16px 0;color:#222222;">{title}</h2>
                            {content}
                        </td>
                    </tr>
                    <tr>
                        <td style="background:#f8f9fa;padding:16px;text-align:center;color:#999999;font-size:12px;">
                            This is an automated email from Jobboard. Please do not reply.
                        </td>
                    </tr>
                </table>
            </td>
        </tr>
    </table>
</body>
</html>"#
    )
}
