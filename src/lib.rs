#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod inertia;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "server")]
pub mod pages;
#[cfg(feature = "server")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "server")]
pub mod services;

#[cfg(feature = "server")]
pub use server::{configure, run};

#[cfg(feature = "server")]
mod server {
    use std::time::Duration;

    use actix_cors::Cors;
    use actix_files::Files;
    use actix_identity::IdentityMiddleware;
    use actix_session::{SessionMiddleware, storage::CookieSessionStore};
    use actix_web::cookie::Key;
    use actix_web::{App, HttpServer, middleware, web};
    use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
    use tera::Tera;

    use crate::db::{ConnectionOptions, establish_connection_pool_with};
    use crate::inertia::Inertia;
    use crate::models::config::ServerConfig;
    use crate::pages::{PageRegistry, PageResolver};
    use crate::repository::DieselRepository;
    use crate::routes::main::{logout, show_home};
    use crate::routes::settings::show_settings;
    use crate::routes::users::{create_user, show_create_user, show_users};
    use crate::services::policy::UserPolicy;

    /// Registers every application route.
    pub fn configure(cfg: &mut web::ServiceConfig) {
        cfg.service(show_home)
            .service(show_users)
            .service(show_create_user)
            .service(create_user)
            .service(show_settings)
            .service(logout);
    }

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        // Establish Diesel connection pool for the SQLite database.
        let pool = establish_connection_pool_with(
            &server_config.database_url,
            ConnectionOptions {
                busy_timeout: Some(Duration::from_secs(server_config.database_busy_timeout)),
                ..ConnectionOptions::default()
            },
        )
        .map_err(|e| {
            std::io::Error::other(format!("Failed to establish database connection: {e}"))
        })?;

        let repo = web::Data::new(DieselRepository::new(pool));

        let tera = Tera::new(&server_config.templates_dir)
            .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

        let registry = PageRegistry::discover(&tera);
        if registry.is_empty() {
            log::warn!("No page templates found in {}", server_config.templates_dir);
        } else {
            log::info!("Registered {} pages", registry.len());
        }

        let inertia = web::Data::new(Inertia::new(
            PageResolver::new(registry),
            tera,
            server_config.asset_version.clone(),
        ));
        let policy = web::Data::new(UserPolicy::new(&server_config.admin_emails));

        // Keys and stores for identity, sessions, and flash messages.
        let secret_key = Key::try_from(server_config.secret.as_bytes())
            .map_err(|e| std::io::Error::other(format!("Invalid secret key: {e}")))?;

        let message_store = CookieMessageStore::builder(secret_key.clone()).build();
        let message_framework = FlashMessagesFramework::builder(message_store).build();

        let bind_address = (server_config.address.clone(), server_config.port);
        let assets_dir = server_config.assets_dir.clone();
        let server_config = web::Data::new(server_config);

        log::info!("Listening on {}:{}", bind_address.0, bind_address.1);

        HttpServer::new(move || {
            App::new()
                .wrap(Cors::permissive())
                .wrap(message_framework.clone())
                .wrap(IdentityMiddleware::default())
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                        .cookie_secure(false) // set to true in prod
                        .cookie_domain(Some(format!(".{}", server_config.domain)))
                        .build(),
                )
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .service(Files::new("/assets", &assets_dir))
                .configure(configure)
                .app_data(repo.clone())
                .app_data(inertia.clone())
                .app_data(policy.clone())
                .app_data(server_config.clone())
        })
        .bind(bind_address)?
        .run()
        .await
    }
}
