//! # Report Service Module
//!
//! Exposes the report endpoint under two paths:
//!
//! *   **`POST /generate-pdf`**
//! *   **`POST /generate-report`** (same handler, kept for older clients)
//!
//! Both take a JSON `ReportPayload`: `table_name`, `fields`, `supabase_url`,
//! `anon_key` and the optional `report_title`, `bucket_name` and `folder`.
//! Without `bucket_name` the PDF comes back as an attachment; with it the PDF is
//! stored in that bucket and a JSON summary with its public link is returned.
//! See `generate` for the request lifecycle.
//!
//! The two paths share no leading segment, so they are registered directly on
//! the service config rather than under a `scope`.

mod generate;

use actix_web::web::{self, post};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/generate-pdf", post().to(generate::process))
        .route("/generate-report", post().to(generate::process));
}
