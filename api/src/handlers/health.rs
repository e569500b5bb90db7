use actix_web::HttpResponse;

use mt_shared::types::HealthResponse;

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "mt-api";

/// Health check endpoint handler
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy(SERVICE_NAME, env!("CARGO_PKG_VERSION")))
}
