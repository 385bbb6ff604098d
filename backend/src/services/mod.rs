//! HTTP surface of the service.
//!
//! - `reports`: `POST /generate-pdf` (and its alias `POST /generate-report`).
//! - `health`: `GET /health` and the `GET /` service summary.

pub mod health;
pub mod reports;

use crate::error::ReportError;
use actix_web::web::{self, get};

/// Registers every route on the application.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health::configure_routes())
        .route("/", get().to(health::index));
    reports::configure_routes(cfg);
}

/// JSON extractor settings: body size limit, and malformed bodies answered as
/// `400 { "error": ... }` like every other validation failure.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            log::warn!("rejected request body: {}", err);
            ReportError::Validation(format!("invalid request body: {}", err)).into()
        })
}
