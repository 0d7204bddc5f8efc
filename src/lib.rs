#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
mod error_conversions;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod schema;

#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod middleware;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

/// How long a resolved account row is served from the in-process cache.
#[cfg(feature = "server")]
pub const USER_CACHE_TTL_SECS: u64 = 300;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: models::config::ServerConfig) -> std::io::Result<()> {
    use std::time::Duration;

    use actix_cors::Cors;
    use actix_files::Files;
    use actix_web::{App, HttpServer, middleware as actix_middleware, web};

    use crate::db::{establish_connection_pool, run_migrations};
    use crate::repository::DieselRepository;
    use crate::services::cache::UserCache;
    use crate::services::email::Mailer;
    use crate::services::upload::AvatarStore;

    // A fresh database file becomes usable without external tooling.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;
    {
        let mut conn = pool
            .get()
            .map_err(|e| std::io::Error::other(format!("Failed to get connection: {e}")))?;
        run_migrations(&mut conn)
            .map_err(|e| std::io::Error::other(format!("Failed to run migrations: {e}")))?;
    }

    let repo = DieselRepository::new(pool);

    let mailer = Mailer::from_config(&server_config)
        .map_err(|e| std::io::Error::other(format!("Failed to initialize mailer: {e}")))?;

    let user_cache = UserCache::new(Duration::from_secs(USER_CACHE_TTL_SECS));

    let avatar_store = AvatarStore::new(&server_config.media_dir)
        .map_err(|e| std::io::Error::other(format!("Failed to prepare media directory: {e}")))?;

    let media_dir = server_config.media_dir.clone();
    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(actix_middleware::Compress::default())
            .wrap(actix_middleware::NormalizePath::trim())
            .wrap(actix_middleware::from_fn(middleware::response_time))
            .wrap(actix_middleware::Logger::default())
            .service(Files::new("/media", &media_dir))
            .configure(routes::configure)
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(mailer.clone()))
            .app_data(web::Data::new(user_cache.clone()))
            .app_data(web::Data::new(avatar_store.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
