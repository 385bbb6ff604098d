use std::fmt;

/// Connection details for the hosted backend, supplied by the caller on every
/// request. The same pair addresses both the REST and the storage APIs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub url: String,
    pub key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("url", &self.url)
            .field("key", &"<redacted>")
            .finish()
    }
}

/// Where an uploaded report should land in object storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageTarget {
    pub bucket: String,
    /// Folder inside the bucket, without leading or trailing slashes.
    pub folder: Option<String>,
}

/// A validated report request.
///
/// Built from a [`crate::requests::ReportPayload`]; `fields` is guaranteed to be
/// non-empty, with distinct, non-blank entries in caller order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    pub table_name: String,
    pub fields: Vec<String>,
    pub credentials: Credentials,
    pub title: Option<String>,
    pub storage: Option<StorageTarget>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_the_key() {
        let creds = Credentials {
            url: "https://demo.supabase.co".to_string(),
            key: "super-secret".to_string(),
        };
        let rendered = format!("{:?}", creds);
        assert!(rendered.contains("demo.supabase.co"));
        assert!(!rendered.contains("super-secret"));
    }
}
