use crate::report::layout::{Orientation, ReportBody, ReportLayout};
use crate::report::table::ReportTable;
use crate::report::RenderSettings;
use genpdf::elements::{Break, Paragraph};
use genpdf::fonts::{FontData, FontFamily};
use genpdf::style::Style;
use genpdf::{Alignment, Document, Element, Margins, PaperSize, SimplePageDecorator, Size};
use std::path::PathBuf;
use thiserror::Error;

/// Families tried in order when none is configured.
const FALLBACK_FAMILIES: [&str; 3] = ["Arial", "LiberationSans", "DejaVuSans"];

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("could not load font family \"{family}\" from {dir}: {source}")]
    Fonts {
        family: String,
        dir: String,
        #[source]
        source: genpdf::error::Error,
    },

    #[error("could not render PDF: {0}")]
    Pdf(#[from] genpdf::error::Error),
}

/// Where the TrueType files live (`<Family>-Regular.ttf`, `-Bold`, `-Italic`,
/// `-BoldItalic`).
#[derive(Debug, Clone)]
pub struct FontSource {
    pub dir: PathBuf,
    pub family: Option<String>,
}

impl FontSource {
    /// The DejaVu Sans files shipped in `backend/fonts`.
    #[cfg(test)]
    pub(crate) fn bundled() -> Self {
        Self {
            dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fonts"),
            family: Some("DejaVuSans".to_string()),
        }
    }

    pub(crate) fn load(&self) -> Result<FontFamily<FontData>, RenderError> {
        let candidates: Vec<&str> = match &self.family {
            Some(family) => vec![family.as_str()],
            None => FALLBACK_FAMILIES.to_vec(),
        };

        let mut attempt = genpdf::fonts::from_files(&self.dir, candidates[0], None);
        for family in candidates.iter().skip(1) {
            match &attempt {
                Ok(_) => break,
                Err(e) => log::debug!("font family not usable, trying {}: {}", family, e),
            }
            attempt = genpdf::fonts::from_files(&self.dir, family, None);
        }

        attempt.map_err(|source| RenderError::Fonts {
            family: candidates.join(", "),
            dir: self.dir.display().to_string(),
            source,
        })
    }
}

/// Draws a [`ReportLayout`] into PDF bytes.
#[derive(Debug, Clone)]
pub struct ReportRenderer {
    settings: RenderSettings,
    fonts: FontSource,
}

impl ReportRenderer {
    pub fn new(settings: RenderSettings, fonts: FontSource) -> Self {
        Self { settings, fonts }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Loads the font family once, so a broken font setup shows up at startup
    /// instead of on the first request.
    pub fn check_fonts(&self) -> Result<(), RenderError> {
        self.fonts.load().map(|_| ())
    }

    pub fn render(&self, layout: &ReportLayout) -> Result<Vec<u8>, RenderError> {
        let palette = self.settings.theme.palette();
        let mut doc = self.configure_document(layout)?;

        doc.push(
            Paragraph::new(layout.title.as_str())
                .aligned(Alignment::Center)
                .styled(
                    Style::new()
                        .bold()
                        .with_font_size(palette.title_size)
                        .with_color(palette.title_color),
                ),
        );
        doc.push(Break::new(1));
        doc.push(
            Paragraph::new(layout.subtitle.as_str())
                .aligned(Alignment::Center)
                .styled(
                    Style::new()
                        .with_font_size(10)
                        .with_color(palette.muted_color),
                ),
        );
        doc.push(Break::new(1.5));

        match &layout.body {
            ReportBody::NoData(message) => {
                doc.push(
                    Paragraph::new(message.as_str())
                        .aligned(Alignment::Center)
                        .styled(
                            Style::new()
                                .with_font_size(12)
                                .with_color(palette.muted_color),
                        ),
                );
            }
            ReportBody::Table(table) => {
                doc.push(ReportTable::new(
                    table.header.clone(),
                    table.rows.clone(),
                    &palette,
                ));
            }
        }

        if let Some(footer) = &layout.footer {
            doc.push(Break::new(2));
            doc.push(
                Paragraph::new(footer.as_str())
                    .aligned(Alignment::Center)
                    .styled(
                        Style::new()
                            .with_font_size(10)
                            .with_color(palette.muted_color),
                    ),
            );
        }

        let mut buffer: Vec<u8> = Vec::new();
        doc.render(&mut buffer)?;
        Ok(buffer)
    }

    /// Fonts, paper size, margins and the page-number header.
    fn configure_document(&self, layout: &ReportLayout) -> Result<Document, RenderError> {
        let mut doc = Document::new(self.fonts.load()?);
        doc.set_title(layout.title.as_str());
        doc.set_font_size(self.settings.theme.palette().body_size);
        doc.set_line_spacing(1.15);

        let paper = match layout.orientation {
            Orientation::Portrait => Size::from(PaperSize::A4),
            Orientation::Landscape => Size::new(297, 210),
        };
        doc.set_paper_size(paper);

        let locale = self.settings.locale;
        let muted = self.settings.theme.palette().muted_color;
        let mut decorator = SimplePageDecorator::new();
        decorator.set_margins(Margins::trbl(15, 20, 15, 20));
        decorator.set_header(move |page| {
            Paragraph::new(locale.page(page))
                .aligned(Alignment::Right)
                .styled(Style::new().with_font_size(8).with_color(muted))
        });
        doc.set_page_decorator(decorator);
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::theme::ReportTheme;
    use chrono::Utc;
    use common::model::row::Row;
    use serde_json::json;

    fn bundled_renderer(settings: RenderSettings) -> ReportRenderer {
        ReportRenderer::new(settings, FontSource::bundled())
    }

    fn render_rows(
        renderer: &ReportRenderer,
        fields: &[&str],
        rows: serde_json::Value,
    ) -> (ReportLayout, Vec<u8>) {
        let fields: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
        let rows: Vec<Row> = serde_json::from_value(rows).unwrap();
        let layout = ReportLayout::build(
            "users",
            None,
            &fields,
            &rows,
            renderer.settings(),
            Utc::now(),
        );
        let pdf = renderer.render(&layout).unwrap();
        (layout, pdf)
    }

    #[test]
    fn renders_a_small_table() {
        let renderer = bundled_renderer(RenderSettings::default());
        let (_, pdf) = render_rows(
            &renderer,
            &["id", "name"],
            json!([
                { "id": 1, "name": "Ann" },
                { "id": 2, "name": null }
            ]),
        );
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn renders_the_no_data_page() {
        let renderer = bundled_renderer(RenderSettings::default());
        let (layout, pdf) = render_rows(&renderer, &["id"], json!([]));
        assert!(layout.footer.is_none());
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn long_tables_span_several_pages() {
        let renderer = bundled_renderer(RenderSettings::default());
        let rows: Vec<serde_json::Value> = (0..500)
            .map(|i| json!({ "id": i, "name": format!("customer number {}", i), "active": i % 2 == 0 }))
            .collect();
        let (_, pdf) = render_rows(&renderer, &["id", "name", "active"], json!(rows));

        let pages = regex::bytes::Regex::new(r"(?-u)/Type\s*/Page\b")
            .unwrap()
            .find_iter(&pdf)
            .count();
        assert!(pdf.starts_with(b"%PDF"));
        assert!(pages > 1, "expected several pages, got {}", pages);
    }

    #[test]
    fn wide_tables_render_on_landscape_paper() {
        let renderer = bundled_renderer(RenderSettings {
            theme: ReportTheme::Minimal,
            ..RenderSettings::default()
        });
        let fields = ["a", "b", "c", "d", "e", "f", "g"];
        let (layout, pdf) = render_rows(
            &renderer,
            &fields,
            json!([{ "a": 1, "b": "two", "c": 3.5, "d": true, "e": null, "f": "x".repeat(300), "g": [1, 2] }]),
        );
        assert_eq!(layout.orientation, Orientation::Landscape);
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn many_narrow_columns_still_fit() {
        let renderer = bundled_renderer(RenderSettings::default());
        let names: Vec<String> = (0..60).map(|i| format!("column_{}", i)).collect();
        let fields: Vec<&str> = names.iter().map(String::as_str).collect();
        let row: serde_json::Map<String, serde_json::Value> = names
            .iter()
            .map(|n| (n.clone(), json!("some longer text value")))
            .collect();
        let (_, pdf) = render_rows(&renderer, &fields, json!([row]));
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn bundled_fonts_load() {
        assert!(bundled_renderer(RenderSettings::default()).check_fonts().is_ok());
    }

    #[test]
    fn missing_fonts_are_a_render_error() {
        let renderer = ReportRenderer::new(
            RenderSettings::default(),
            FontSource {
                dir: PathBuf::from("/nonexistent/fonts"),
                family: Some("Nope".to_string()),
            },
        );
        let layout = ReportLayout::build(
            "users",
            None,
            &["id".to_string()],
            &[],
            renderer.settings(),
            Utc::now(),
        );
        let err = renderer.render(&layout).unwrap_err();
        assert!(matches!(err, RenderError::Fonts { .. }));
        assert!(err.to_string().contains("/nonexistent/fonts"));
    }

    #[test]
    fn tries_every_fallback_family() {
        let fonts = FontSource {
            dir: PathBuf::from("/nonexistent/fonts"),
            family: None,
        };
        let err = fonts.load().err().unwrap();
        assert!(err.to_string().contains("Arial, LiberationSans"));
    }
}
