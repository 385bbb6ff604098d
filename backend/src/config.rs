//! Process configuration, read once from the environment at startup.
//!
//! | Variable                  | Default       |
//! |---------------------------|---------------|
//! | `REPORTS_HOST`            | `0.0.0.0`     |
//! | `REPORTS_PORT` / `PORT`   | `5000`        |
//! | `REPORTS_JSON_LIMIT`      | 10 MiB        |
//! | `REPORTS_FONT_DIR`        | `./fonts`     |
//! | `REPORTS_FONT_FAMILY`     | Arial, LiberationSans, DejaVuSans |
//! | `REPORTS_MAX_CELL_CHARS`  | `100`         |
//! | `REPORTS_LANDSCAPE_AFTER` | `5`           |
//! | `REPORTS_THEME`           | `classic`     |
//! | `REPORTS_LOCALE`          | `pt-BR`       |

use crate::report::render::FontSource;
use crate::report::RenderSettings;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid value for {var}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub json_limit: usize,
    pub fonts: FontSource,
    pub render: RenderSettings,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = RenderSettings::default();

        let port = match get("REPORTS_PORT") {
            Some(v) => parse("REPORTS_PORT", &v)?,
            None => match get("PORT") {
                Some(v) => parse("PORT", &v)?,
                None => 5000,
            },
        };

        let render = RenderSettings {
            max_cell_chars: parse_or(&get, "REPORTS_MAX_CELL_CHARS", defaults.max_cell_chars)?,
            landscape_after: parse_or(&get, "REPORTS_LANDSCAPE_AFTER", defaults.landscape_after)?,
            theme: parse_or(&get, "REPORTS_THEME", defaults.theme)?,
            locale: parse_or(&get, "REPORTS_LOCALE", defaults.locale)?,
        };
        if render.max_cell_chars < 4 {
            return Err(ConfigError {
                var: "REPORTS_MAX_CELL_CHARS",
                reason: "must be at least 4".to_string(),
            });
        }

        Ok(AppConfig {
            host: get("REPORTS_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            json_limit: parse_or(&get, "REPORTS_JSON_LIMIT", 10 * 1024 * 1024)?,
            fonts: FontSource {
                dir: PathBuf::from(get("REPORTS_FONT_DIR").unwrap_or_else(|| "./fonts".to_string())),
                family: get("REPORTS_FONT_FAMILY"),
            },
            render,
        })
    }
}

fn parse<T>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError {
        var,
        reason: e.to_string(),
    })
}

fn parse_or<T, G>(get: &G, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    G: Fn(&str) -> Option<String>,
{
    match get(var) {
        Some(raw) => parse(var, &raw),
        None => Ok(default),
    }
}
