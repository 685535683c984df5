// src/main.rs
// Posts service: cache-aside HTTP API over Postgres and Redis

mod cache;
mod config;
mod database;
mod error;
mod handlers {
    pub mod health;
    pub mod posts;
}
mod logging;
mod models;
mod service;
#[cfg(test)]
mod test_support;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;

use cache::RedisCache;
use config::ServiceConfig;
use database::PgPostStore;
use logging::init_logging;
use service::PostService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    init_logging("posts-service");

    let config = ServiceConfig::from_env();
    tracing::info!(port = config.port, "Starting posts service");

    // Startup failures are fatal: the service does not run without both
    // backends reachable.
    let store = PgPostStore::connect(&config.database_url())
        .await
        .expect("Failed to connect to database");
    store
        .init_schema()
        .await
        .expect("Failed to create posts table");
    tracing::info!("Database connection established");

    let cache = RedisCache::connect(&config.redis_url())
        .await
        .expect("Failed to connect to Redis");
    tracing::info!("Redis connection established");

    let service = web::Data::new(PostService::new(store, cache));

    let port = config.port;
    tracing::info!("Posts service listening on port {}", port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .app_data(service.clone())
            .route(
                "/health",
                web::get().to(handlers::health::health_check::<PgPostStore, RedisCache>),
            )
            .route(
                "/posts",
                web::get().to(handlers::posts::list_posts::<PgPostStore, RedisCache>),
            )
            .route(
                "/posts",
                web::post().to(handlers::posts::create_post::<PgPostStore, RedisCache>),
            )
            .route(
                "/posts/{id}",
                web::get().to(handlers::posts::get_post::<PgPostStore, RedisCache>),
            )
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
