mod config;
mod error;
mod report;
mod services;
mod state;
mod supabase;

use crate::config::AppConfig;
use crate::state::AppState;
use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::{info, warn};
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let state = AppState::from_config(&config).map_err(io::Error::other)?;

    match state.renderer.check_fonts() {
        Ok(()) => info!("fonts loaded from {}", config.fonts.dir.display()),
        Err(e) => warn!("{}; report rendering will fail until fonts are installed", e),
    }

    let json_limit = config.json_limit;
    info!(
        "Server running at http://{}:{} (theme {:?}, locale {:?})",
        config.host, config.port, config.render.theme, config.render.locale
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .app_data(services::json_config(json_limit))
            .app_data(web::Data::new(state.clone()))
            .configure(services::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::{header, StatusCode};
    use actix_web::test;

    #[actix_web::test]
    async fn preflight_is_answered_for_any_origin() {
        let app = test::init_service(
            App::new()
                .wrap(Cors::permissive())
                .configure(services::configure),
        )
        .await;
        let req = test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/generate-pdf")
            .insert_header((header::ORIGIN, "https://app.example.com"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://app.example.com"
        );
    }
}
