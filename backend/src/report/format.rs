use crate::report::locale::Locale;
use common::model::row::CellValue;

pub const DEFAULT_MAX_CHARS: usize = 100;
pub const PLACEHOLDER: &str = "-";
const ELLIPSIS: &str = "...";

/// Turns raw cell values into the strings printed in the table.
///
/// Total over every `CellValue`; the output never exceeds `max_chars` characters.
#[derive(Debug, Clone, Copy)]
pub struct ValueFormatter {
    pub max_chars: usize,
    pub locale: Locale,
}

impl ValueFormatter {
    pub fn new(max_chars: usize, locale: Locale) -> Self {
        Self { max_chars, locale }
    }

    pub fn format(&self, value: &CellValue) -> String {
        match value {
            CellValue::Null => PLACEHOLDER.to_string(),
            CellValue::Bool(true) => self.locale.yes().to_string(),
            CellValue::Bool(false) => self.locale.no().to_string(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Text(s) => self.truncate(s),
            CellValue::Other(v) => self.truncate(&v.to_string()),
        }
    }

    fn truncate(&self, text: &str) -> String {
        if text.chars().count() <= self.max_chars {
            return text.to_string();
        }
        let keep = self.max_chars.saturating_sub(ELLIPSIS.len());
        let mut out: String = text.chars().take(keep).collect();
        out.push_str(&ELLIPSIS[..self.max_chars.min(ELLIPSIS.len())]);
        out
    }
}
