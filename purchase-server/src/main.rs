mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use crate::application::product_service::ProductService;
use crate::data::product_repository::SqliteProductRepository;
use actix_web::middleware::{DefaultHeaders, Logger, from_fn};
use actix_web::{App, HttpServer, web};
use anyhow::Context;
use application::auth_service::AuthService;
use data::user_repository::SqliteUserRepository;
use infrastructure::config::AppConfig;
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::logging::init_logging;
use presentation::middleware::request_context;
use presentation::utils::cors;
use presentation::views;
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let pool = create_pool(&config.database_url, config.db_max_connections)
        .await
        .context("failed to open database")?;
    run_migrations(&pool)
        .await
        .context("failed to run migrations")?;

    let user_repo = Arc::new(SqliteUserRepository::new(pool.clone()));
    let product_repo = Arc::new(SqliteProductRepository::new(pool.clone()));

    let auth_service = web::Data::new(AuthService::new(user_repo));
    let product_service = web::Data::new(ProductService::new(product_repo));
    let templates = web::Data::new(views::templates().context("failed to load page templates")?);

    let config_data = config.clone();
    info!(host = %config.host, port = config.port, "HTTP server starting");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(from_fn(request_context))
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("Referrer-Policy", "no-referrer"))
                    .add(("Permissions-Policy", "geolocation=()"))
                    .add(("Cross-Origin-Opener-Policy", "same-origin")),
            )
            .wrap(cors(&config_data))
            .app_data(product_service.clone())
            .app_data(auth_service.clone())
            .app_data(templates.clone())
            .configure(presentation::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    info!("HTTP server stopped");
    Ok(())
}
