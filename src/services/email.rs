//! Outbound email rendering and delivery.
//!
//! Messages are rendered from Tera templates and handed to one of two
//! transports: a real SMTP relay, or a log sink used in development and tests
//! when no SMTP section is configured.

use std::sync::Arc;

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tera::{Context, Tera};
use thiserror::Error;

use crate::models::config::ServerConfig;

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("Template error: {0}")]
    Render(#[from] tera::Error),

    #[error("Invalid mailbox: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

enum MailTransport {
    Smtp(SmtpTransport),
    Log,
}

/// Renders and delivers application emails. Cheap to clone; handlers hand a
/// clone to a background task so requests never wait on SMTP.
#[derive(Clone)]
pub struct Mailer {
    transport: Arc<MailTransport>,
    templates: Arc<Tera>,
    sender: String,
    base_url: String,
}

impl Mailer {
    pub fn from_config(config: &ServerConfig) -> Result<Self, MailerError> {
        let templates = Tera::new(&config.templates_glob)?;

        let transport = match &config.smtp {
            Some(smtp) => {
                let mut builder = SmtpTransport::starttls_relay(&smtp.host)?
                    .credentials(Credentials::new(
                        smtp.username.clone(),
                        smtp.password.clone(),
                    ));
                if let Some(port) = smtp.port {
                    builder = builder.port(port);
                }
                MailTransport::Smtp(builder.build())
            }
            None => MailTransport::Log,
        };

        Ok(Self {
            transport: Arc::new(transport),
            templates: Arc::new(templates),
            sender: config.mail_sender.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Sends the account confirmation email containing a tokenized link.
    pub fn send_confirmation(
        &self,
        to: &str,
        full_name: &str,
        token: &str,
    ) -> Result<(), MailerError> {
        let link = format!("{}/api/auth/confirmed_email/{token}", self.base_url);

        let mut context = Context::new();
        context.insert("full_name", full_name);
        context.insert("link", &link);

        let html = self.templates.render("confirm_email.html", &context)?;
        self.deliver(to, "Confirm your email", html)
    }

    /// Sends the password reset email containing a tokenized link.
    pub fn send_password_reset(
        &self,
        to: &str,
        full_name: &str,
        token: &str,
    ) -> Result<(), MailerError> {
        let link = format!("{}/api/auth/reset_password/{token}", self.base_url);

        let mut context = Context::new();
        context.insert("full_name", full_name);
        context.insert("link", &link);
        context.insert("token", token);

        let html = self.templates.render("reset_password.html", &context)?;
        self.deliver(to, "Reset your password", html)
    }

    fn deliver(&self, to: &str, subject: &str, html: String) -> Result<(), MailerError> {
        match self.transport.as_ref() {
            MailTransport::Smtp(transport) => {
                let message = Message::builder()
                    .from(self.sender.parse()?)
                    .to(to.parse()?)
                    .subject(subject)
                    .header(ContentType::TEXT_HTML)
                    .body(html)?;

                transport.send(&message)?;
                log::info!("Email ({subject}) sent to {to}");
                Ok(())
            }
            MailTransport::Log => {
                log::info!("Email ({subject}) to {to}:\n{html}");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_mailer() -> Mailer {
        let config = ServerConfig {
            address: "127.0.0.1".to_string(),
            port: 8000,
            database_url: "unused.db".to_string(),
            secret: "secret".to_string(),
            base_url: "http://localhost:8000/".to_string(),
            media_dir: "media".to_string(),
            templates_glob: "templates/mail/**/*".to_string(),
            mail_sender: "Contacts App <no-reply@example.com>".to_string(),
            smtp: None,
        };
        Mailer::from_config(&config).unwrap()
    }

    #[test]
    fn confirmation_email_renders_and_logs() {
        let mailer = log_mailer();
        mailer
            .send_confirmation("jane@example.com", "Jane Doe", "token123")
            .unwrap();
    }

    #[test]
    fn reset_email_renders_and_logs() {
        let mailer = log_mailer();
        mailer
            .send_password_reset("jane@example.com", "Jane Doe", "token123")
            .unwrap();
    }
}
