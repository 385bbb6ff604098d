use crate::config::AppConfig;
use crate::report::render::ReportRenderer;
use crate::supabase::{DataSourceConnector, ObjectStoreConnector, SupabaseConnector};
use std::sync::Arc;

/// Shared, read-only application state.
///
/// Built once in `main.rs` and cloned into every Actix worker as `web::Data`.
/// Nothing in it changes while requests are served; everything a request needs
/// beyond this (credentials, rows, PDF bytes) lives and dies with the request.
#[derive(Clone)]
pub struct AppState {
    pub renderer: ReportRenderer,
    /// Opens a row source with the caller's credentials.
    pub data_sources: Arc<dyn DataSourceConnector>,
    /// Opens an object store with the caller's credentials.
    pub object_stores: Arc<dyn ObjectStoreConnector>,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("report_service/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let supabase = Arc::new(SupabaseConnector::new(http));

        Ok(AppState {
            renderer: ReportRenderer::new(config.render, config.fonts.clone()),
            data_sources: supabase.clone(),
            object_stores: supabase,
        })
    }
}
