use crate::report::format::ValueFormatter;
use crate::report::sanitize::sanitize;
use crate::report::RenderSettings;
use chrono::{DateTime, Utc};
use common::model::row::Row;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// The table block: sanitized headers plus one formatted line per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBlock {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportBody {
    /// The query returned nothing; only this message is printed.
    NoData(String),
    Table(TableBlock),
}

/// Everything the renderer prints, as plain strings.
///
/// Building the layout is where every formatting decision happens; the genpdf
/// side only draws it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLayout {
    pub orientation: Orientation,
    pub title: String,
    pub subtitle: String,
    pub body: ReportBody,
    /// Record count line, present only below a table.
    pub footer: Option<String>,
}

impl ReportLayout {
    pub fn build(
        table_name: &str,
        title: Option<&str>,
        fields: &[String],
        rows: &[Row],
        settings: &RenderSettings,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let locale = settings.locale;
        let orientation = if fields.len() > settings.landscape_after {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        };

        let title = match title {
            Some(t) => t.to_string(),
            None => locale.default_title(&sanitize(table_name)),
        };

        let (body, footer) = if rows.is_empty() {
            (ReportBody::NoData(locale.no_data().to_string()), None)
        } else {
            let formatter = ValueFormatter::new(settings.max_cell_chars, locale);
            let table = TableBlock {
                header: fields
                    .iter()
                    .map(|f| sanitize(f).to_ascii_uppercase())
                    .collect(),
                rows: rows
                    .iter()
                    .map(|row| {
                        fields
                            .iter()
                            .map(|f| sanitize(&formatter.format(row.get(f))))
                            .collect()
                    })
                    .collect(),
            };
            (
                ReportBody::Table(table),
                Some(locale.total_records(rows.len())),
            )
        };

        ReportLayout {
            orientation,
            title,
            subtitle: locale.generated_at(generated_at),
            body,
            footer,
        }
    }

    #[cfg(test)]
    pub fn table(&self) -> Option<&TableBlock> {
        match &self.body {
            ReportBody::Table(table) => Some(table),
            ReportBody::NoData(_) => None,
        }
    }
}
