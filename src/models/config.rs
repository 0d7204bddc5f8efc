//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// HS256 signing secret for every issued token.
    pub secret: String,
    /// Public base URL used to build links embedded in emails.
    pub base_url: String,
    pub media_dir: String,
    /// Tera glob matching the mail templates.
    pub templates_glob: String,
    /// Sender mailbox, e.g. `Contacts App <no-reply@example.com>`.
    pub mail_sender: String,
    /// SMTP transport settings. When absent, messages are written to the log.
    pub smtp: Option<SmtpConfig>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: Option<u16>,
    pub username: String,
    pub password: String,
}
