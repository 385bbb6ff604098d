use genpdf::style::Color;
use std::str::FromStr;

/// Visual style of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportTheme {
    /// Dark slate header with white text and a full cell grid.
    #[default]
    Classic,
    /// Light grey header, dark text and thin rules under each row only.
    Minimal,
}

/// Colours and sizes resolved from a [`ReportTheme`].
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub title_size: u8,
    pub title_color: Color,
    pub muted_color: Color,
    pub header_size: u8,
    pub header_fill: Color,
    pub header_text: Color,
    pub body_size: u8,
    pub body_text: Color,
    /// Backgrounds of even and odd body rows.
    pub stripes: [Color; 2],
    pub rule_color: Color,
    /// Draw vertical cell borders and the top border of every row.
    pub full_grid: bool,
}

impl ReportTheme {
    pub fn palette(self) -> Palette {
        match self {
            ReportTheme::Classic => Palette {
                title_size: 24,
                title_color: hex(0x1a1a1a),
                muted_color: hex(0x666666),
                header_size: 10,
                header_fill: hex(0x2c3e50),
                header_text: hex(0xf5f5f5),
                body_size: 9,
                body_text: hex(0x000000),
                stripes: [hex(0xffffff), hex(0xf8f9fa)],
                rule_color: hex(0xdee2e6),
                full_grid: true,
            },
            ReportTheme::Minimal => Palette {
                title_size: 28,
                title_color: hex(0x1d1d1f),
                muted_color: hex(0x86868b),
                header_size: 11,
                header_fill: hex(0xf5f5f7),
                header_text: hex(0x1d1d1f),
                body_size: 10,
                body_text: hex(0x1d1d1f),
                stripes: [hex(0xffffff), hex(0xfafafa)],
                rule_color: hex(0xe5e5e7),
                full_grid: false,
            },
        }
    }
}

impl FromStr for ReportTheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(ReportTheme::Classic),
            "minimal" => Ok(ReportTheme::Minimal),
            other => Err(format!(
                "unknown theme \"{}\" (expected classic or minimal)",
                other
            )),
        }
    }
}

fn hex(rgb: u32) -> Color {
    Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_hex_into_channels() {
        assert!(matches!(hex(0x2c3e50), Color::Rgb(0x2c, 0x3e, 0x50)));
    }

    #[test]
    fn parses_theme_names() {
        assert_eq!("Classic".parse::<ReportTheme>(), Ok(ReportTheme::Classic));
        assert_eq!("minimal".parse::<ReportTheme>(), Ok(ReportTheme::Minimal));
        assert!("fancy".parse::<ReportTheme>().is_err());
    }

    #[test]
    fn only_classic_draws_the_full_grid() {
        assert!(ReportTheme::Classic.palette().full_grid);
        assert!(!ReportTheme::Minimal.palette().full_grid);
    }
}
