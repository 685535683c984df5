// src/handlers/health.rs
// Health check endpoint: pings both backends independently

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::cache::PostCache;
use crate::database::PostStore;
use crate::error::ServiceError;
use crate::service::PostService;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub db: String,
    pub cache: String,
}

fn describe(result: &Result<(), ServiceError>) -> String {
    match result {
        Ok(()) => "ok".to_string(),
        Err(e) => e.to_string(),
    }
}

/// Both backends are pinged regardless of the other's outcome, so one
/// failure never masks the other's state.
pub async fn health_check<S: PostStore, C: PostCache>(
    service: web::Data<PostService<S, C>>,
) -> HttpResponse {
    let db = service.ping_store().await;
    let cache = service.ping_cache().await;
    let healthy = db.is_ok() && cache.is_ok();

    let body = HealthResponse {
        status: if healthy { "ok" } else { "error" }.to_string(),
        db: describe(&db),
        cache: describe(&cache),
    };

    if healthy {
        HttpResponse::Ok().json(body)
    } else {
        tracing::error!(db = %body.db, cache = %body.cache, "Health check failed");
        HttpResponse::InternalServerError().json(body)
    }
}
