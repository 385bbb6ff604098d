//! # Report rendering
//!
//! Turns fetched rows into a PDF document.
//!
//! ## Pipeline
//!
//! 1.  **Formatting**: every cell goes through [`format::ValueFormatter`] (null
//!     placeholder, localized booleans, bounded text) and then through
//!     [`sanitize::sanitize`] (printable ASCII only).
//! 2.  **Layout**: [`layout::ReportLayout`] collects title, timestamp subtitle,
//!     header, body lines and footer as plain strings, choosing landscape paper
//!     for wide tables. No genpdf types are involved yet.
//! 3.  **Rendering**: [`render::ReportRenderer`] loads the font family and draws
//!     the layout with genpdf, using the zebra-striped rows from [`table`].

pub mod filename;
pub mod format;
pub mod layout;
pub mod locale;
pub mod render;
pub mod sanitize;
pub mod table;
pub mod theme;

use crate::report::format::DEFAULT_MAX_CHARS;
use crate::report::layout::ReportLayout;
use crate::report::locale::Locale;
use crate::report::render::{RenderError, ReportRenderer};
use crate::report::theme::ReportTheme;
use chrono::{DateTime, Utc};
use common::model::report::ReportRequest;
use common::model::row::Row;

/// Tunables of the renderer, read once from the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    /// Longest cell text, in characters, before it is cut with `...`.
    pub max_cell_chars: usize,
    /// Tables with more columns than this are printed on landscape paper.
    pub landscape_after: usize,
    pub theme: ReportTheme,
    pub locale: Locale,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            max_cell_chars: DEFAULT_MAX_CHARS,
            landscape_after: 5,
            theme: ReportTheme::default(),
            locale: Locale::default(),
        }
    }
}

/// A finished report and what the caller is told about it.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub bytes: Vec<u8>,
    pub records_count: usize,
    pub generated_at: DateTime<Utc>,
    pub filename: String,
}

/// Lays out and renders `rows` for `request`. CPU bound; run it off the async
/// workers.
pub fn render_report(
    renderer: &ReportRenderer,
    request: &ReportRequest,
    rows: &[Row],
    generated_at: DateTime<Utc>,
) -> Result<RenderedReport, RenderError> {
    let layout = ReportLayout::build(
        &request.table_name,
        request.title.as_deref(),
        &request.fields,
        rows,
        renderer.settings(),
        generated_at,
    );
    let bytes = renderer.render(&layout)?;

    Ok(RenderedReport {
        bytes,
        records_count: rows.len(),
        generated_at,
        filename: filename::report_filename(&request.table_name, generated_at),
    })
}
