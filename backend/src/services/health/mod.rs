//! Liveness check under `/health`, plus the `GET /` service summary that
//! `services::configure` mounts at the root.

use actix_web::web::{get, scope};
use actix_web::{HttpResponse, Scope};
use common::responses::HealthStatus;
use serde_json::json;

const API_PATH: &str = "/health";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", get().to(process))
}

/// Touches no collaborator.
async fn process() -> HttpResponse {
    HttpResponse::Ok().json(HealthStatus {
        status: "ok".to_string(),
        message: "service is running".to_string(),
    })
}

/// Short description of the service and its endpoints.
pub async fn index() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "health": API_PATH,
        "endpoints": ["POST /generate-pdf", "POST /generate-report"],
    }))
}
