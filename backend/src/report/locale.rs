use chrono::{DateTime, Utc};
use std::str::FromStr;

/// Language of the fixed texts printed in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    PtBr,
    En,
}

impl Locale {
    /// Token for `true` cells. Kept ASCII so it survives sanitizing.
    pub fn yes(self) -> &'static str {
        match self {
            Locale::PtBr => "Sim",
            Locale::En => "Yes",
        }
    }

    /// Token for `false` cells. Kept ASCII so it survives sanitizing.
    pub fn no(self) -> &'static str {
        match self {
            Locale::PtBr => "Nao",
            Locale::En => "No",
        }
    }

    pub fn default_title(self, table_name: &str) -> String {
        match self {
            Locale::PtBr => format!("Relatório: {}", table_name),
            Locale::En => format!("Report: {}", table_name),
        }
    }

    pub fn generated_at(self, at: DateTime<Utc>) -> String {
        match self {
            Locale::PtBr => format!("Gerado em: {}", at.format("%d/%m/%Y às %H:%M")),
            Locale::En => format!("Generated on {}", at.format("%Y-%m-%d at %H:%M UTC")),
        }
    }

    pub fn no_data(self) -> &'static str {
        match self {
            Locale::PtBr => "Nenhum dado encontrado.",
            Locale::En => "No data found.",
        }
    }

    pub fn total_records(self, count: usize) -> String {
        match self {
            Locale::PtBr => format!("Total de registros: {}", count),
            Locale::En => format!("Total records: {}", count),
        }
    }

    pub fn page(self, number: usize) -> String {
        match self {
            Locale::PtBr => format!("Página {}", number),
            Locale::En => format!("Page {}", number),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pt" | "pt-br" | "pt_br" => Ok(Locale::PtBr),
            "en" | "en-us" | "en_us" => Ok(Locale::En),
            other => Err(format!("unknown locale \"{}\" (expected pt-BR or en)", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_locale_names() {
        assert_eq!("pt-BR".parse::<Locale>(), Ok(Locale::PtBr));
        assert_eq!(" EN ".parse::<Locale>(), Ok(Locale::En));
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn formats_generation_timestamp() {
        let at = Utc.with_ymd_and_hms(2026, 3, 9, 14, 5, 0).unwrap();
        assert_eq!(Locale::PtBr.generated_at(at), "Gerado em: 09/03/2026 às 14:05");
        assert_eq!(Locale::En.generated_at(at), "Generated on 2026-03-09 at 14:05 UTC");
    }

    #[test]
    fn boolean_tokens_are_ascii() {
        for locale in [Locale::PtBr, Locale::En] {
            assert!(locale.yes().is_ascii());
            assert!(locale.no().is_ascii());
        }
    }
}
