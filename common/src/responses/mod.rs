use serde::{Deserialize, Serialize};

/// Body of every error response: `{ "error": "<message>" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Returned by the upload variant of the report endpoint once the PDF has been
/// stored in the caller's bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedReport {
    pub success: bool,
    /// Public URL of the stored PDF.
    pub pdf_link: String,
    pub filename: String,
    /// Object path inside the bucket, `folder/filename` when a folder was given.
    pub path: String,
    pub records_count: usize,
    /// RFC 3339 timestamp of the render.
    pub generated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}
