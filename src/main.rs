use config::{Config, Environment, File};

use contacts_api::models::config::ServerConfig;

fn load_config() -> Result<ServerConfig, config::ConfigError> {
    let config_path =
        std::env::var("CONTACTS_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());

    Config::builder()
        .set_default("address", "127.0.0.1")?
        .set_default("port", 8000)?
        .set_default("database_url", "contacts.db")?
        .set_default("base_url", "http://127.0.0.1:8000")?
        .set_default("media_dir", "media")?
        .set_default("templates_glob", "templates/mail/**/*")?
        .set_default("mail_sender", "Contacts App <no-reply@localhost>")?
        .add_source(File::with_name(&config_path).required(false))
        .add_source(Environment::default().separator("__"))
        .build()?
        .try_deserialize()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let server_config = load_config().map_err(std::io::Error::other)?;

    contacts_api::run(server_config).await
}
