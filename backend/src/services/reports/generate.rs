//! # Report Generation Service
//!
//! Backend logic of `POST /generate-pdf`.
//!
//! ## Workflow
//!
//! 1.  **Validation**: the `ReportPayload` is checked for `table_name`, a
//!     non-empty `fields` list and both credentials. Failures answer `400`
//!     before anything leaves the process.
//!
//! 2.  **Fetch**: a data source is opened with the caller's credentials and the
//!     requested fields are selected from the table. Bad credentials and backend
//!     errors answer `400` with the backend's message.
//!
//! 3.  **Render**: the rows are laid out and drawn into a PDF on the blocking
//!     thread pool. A failure here is a server problem (usually missing fonts)
//!     and answers `500`.
//!
//! 4.  **Respond**: without a `bucket_name` the PDF is returned as an attachment
//!     named `<table>_<YYYYMMDD_HHMMSS>.pdf`. With one, it is uploaded to
//!     `<folder>/<filename>` in that bucket and the public link is returned as
//!     JSON; storage failures answer `500`.
//!
//! Every request gets a UUID that prefixes its log lines.

use crate::error::ReportError;
use crate::report::filename::storage_path;
use crate::report::{render_report, RenderedReport};
use crate::state::AppState;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::model::report::ReportRequest;
use common::model::row::Row;
use common::requests::ReportPayload;
use common::responses::UploadedReport;
use log::{debug, info, warn};
use std::fmt;
use uuid::Uuid;

const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Last stage a request completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Received,
    Validated,
    Fetched,
    Rendered,
    Responded,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Received => "received",
            Stage::Validated => "validated",
            Stage::Fetched => "fetched",
            Stage::Rendered => "rendered",
            Stage::Responded => "responded",
        };
        f.write_str(name)
    }
}

/// Actix handler for `POST /generate-pdf` and `POST /generate-report`.
pub async fn process(
    state: web::Data<AppState>,
    payload: web::Json<ReportPayload>,
) -> Result<HttpResponse, ReportError> {
    let request_id = Uuid::new_v4();
    let mut stage = Stage::Received;

    let result = generate(&state, payload.into_inner(), request_id, &mut stage).await;
    match &result {
        Ok(_) => debug!("[{}] {}", request_id, stage),
        Err(e) => warn!("[{}] failed after stage {}: {}", request_id, stage, e),
    }
    result
}

async fn generate(
    state: &AppState,
    payload: ReportPayload,
    request_id: Uuid,
    stage: &mut Stage,
) -> Result<HttpResponse, ReportError> {
    let request = payload.validate()?;
    *stage = Stage::Validated;
    info!(
        "[{}] report for table {} with {} field(s)",
        request_id,
        request.table_name,
        request.fields.len()
    );

    let rows = fetch_rows(state, &request).await?;
    *stage = Stage::Fetched;
    info!("[{}] fetched {} row(s)", request_id, rows.len());

    let report = render(state, &request, rows).await?;
    *stage = Stage::Rendered;
    info!(
        "[{}] rendered {} ({} bytes)",
        request_id,
        report.filename,
        report.bytes.len()
    );

    let response = deliver(state, &request, report).await?;
    *stage = Stage::Responded;
    Ok(response)
}

async fn fetch_rows(state: &AppState, request: &ReportRequest) -> Result<Vec<Row>, ReportError> {
    let source = state.data_sources.connect_data_source(&request.credentials)?;
    source.select(&request.table_name, &request.fields).await
}

/// Renders on the blocking pool; genpdf is synchronous and CPU bound.
async fn render(
    state: &AppState,
    request: &ReportRequest,
    rows: Vec<Row>,
) -> Result<RenderedReport, ReportError> {
    let renderer = state.renderer.clone();
    let request = request.clone();
    let generated_at = Utc::now();

    tokio::task::spawn_blocking(move || render_report(&renderer, &request, &rows, generated_at))
        .await
        .map_err(|e| ReportError::InternalRender(format!("render task failed: {}", e)))?
        .map_err(|e| ReportError::InternalRender(e.to_string()))
}

/// Sends the PDF back, or stores it when the request names a bucket.
async fn deliver(
    state: &AppState,
    request: &ReportRequest,
    report: RenderedReport,
) -> Result<HttpResponse, ReportError> {
    let Some(target) = &request.storage else {
        return Ok(HttpResponse::Ok()
            .content_type(PDF_CONTENT_TYPE)
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(report.filename.clone())],
            })
            .insert_header(("X-Records-Count", report.records_count.to_string()))
            .body(report.bytes));
    };

    let store = state.object_stores.connect_object_store(&request.credentials)?;
    let path = storage_path(target.folder.as_deref(), &report.filename);
    let pdf_link = store
        .upload(&target.bucket, &path, report.bytes, PDF_CONTENT_TYPE)
        .await?;

    Ok(HttpResponse::Ok().json(UploadedReport {
        success: true,
        pdf_link,
        filename: report.filename,
        path,
        records_count: report.records_count,
        generated_at: report.generated_at.to_rfc3339(),
    }))
}
