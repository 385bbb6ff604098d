use chrono::{DateTime, Utc};

/// `<table_name>_<YYYYMMDD_HHMMSS>.pdf`, with anything but ASCII letters,
/// digits, `-` and `_` in the table name replaced by `_`.
pub fn report_filename(table_name: &str, generated_at: DateTime<Utc>) -> String {
    let stem: String = table_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}_{}.pdf", stem, generated_at.format("%Y%m%d_%H%M%S"))
}

/// Object path inside the bucket: `folder/filename`, or just the filename.
pub fn storage_path(folder: Option<&str>, filename: &str) -> String {
    match folder.map(|f| f.trim_matches('/')).filter(|f| !f.is_empty()) {
        Some(folder) => format!("{}/{}", folder, filename),
        None => filename.to_string(),
    }
}
