//! # Hosted backend collaborators
//!
//! The report pipeline talks to two external services, both addressed with the
//! `supabase_url` / `anon_key` pair sent by the caller:
//!
//! - a row source ([`DataSource`]), the PostgREST API under `/rest/v1`;
//! - an object store ([`ObjectStore`]), the Storage API under `/storage/v1`.
//!
//! Handlers only see the traits. [`SupabaseConnector`] is the production
//! implementation; tests plug in their own connectors.

pub mod rest;
pub mod storage;

use crate::error::ReportError;
use async_trait::async_trait;
use common::model::report::Credentials;
use common::model::row::Row;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Deserialize;
use url::Url;

/// Reads rows from a table.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// `SELECT <fields> FROM <table>`; errors are `UpstreamQuery`.
    async fn select(&self, table: &str, fields: &[String]) -> Result<Vec<Row>, ReportError>;
}

/// Stores report files and hands back a public link.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Writes `bytes` at `path` in `bucket`, replacing any existing object, and
    /// returns its public URL. Errors are `UpstreamStorage`.
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, ReportError>;
}

/// Builds a [`DataSource`] from caller credentials. Errors are `UpstreamConnect`.
pub trait DataSourceConnector: Send + Sync {
    fn connect_data_source(
        &self,
        credentials: &Credentials,
    ) -> Result<Box<dyn DataSource>, ReportError>;
}

/// Builds an [`ObjectStore`] from caller credentials. Errors are `UpstreamStorage`.
pub trait ObjectStoreConnector: Send + Sync {
    fn connect_object_store(
        &self,
        credentials: &Credentials,
    ) -> Result<Box<dyn ObjectStore>, ReportError>;
}

/// Production connector: one pooled `reqwest::Client` shared by every request,
/// with the caller's credentials attached per call.
#[derive(Clone, Default)]
pub struct SupabaseConnector {
    http: reqwest::Client,
}

impl SupabaseConnector {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl DataSourceConnector for SupabaseConnector {
    fn connect_data_source(
        &self,
        credentials: &Credentials,
    ) -> Result<Box<dyn DataSource>, ReportError> {
        let project = Project::from_credentials(credentials).map_err(ReportError::UpstreamConnect)?;
        Ok(Box::new(rest::RestClient::new(self.http.clone(), project)))
    }
}

impl ObjectStoreConnector for SupabaseConnector {
    fn connect_object_store(
        &self,
        credentials: &Credentials,
    ) -> Result<Box<dyn ObjectStore>, ReportError> {
        let project = Project::from_credentials(credentials).map_err(ReportError::UpstreamStorage)?;
        Ok(Box::new(storage::StorageClient::new(self.http.clone(), project)))
    }
}

/// A validated project base URL plus the auth headers derived from the key.
#[derive(Clone)]
pub struct Project {
    base: Url,
    headers: HeaderMap,
}

impl Project {
    pub fn from_credentials(credentials: &Credentials) -> Result<Self, String> {
        let base = Url::parse(credentials.url.trim())
            .map_err(|e| format!("invalid url \"{}\": {}", credentials.url, e))?;
        if !matches!(base.scheme(), "http" | "https") || base.cannot_be_a_base() {
            return Err(format!(
                "invalid url \"{}\": expected an http(s) project url",
                credentials.url
            ));
        }

        let key = credentials.key.trim();
        let apikey = HeaderValue::from_str(key)
            .map_err(|_| "access key contains characters not allowed in a header".to_string())?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", key))
            .map_err(|_| "access key contains characters not allowed in a header".to_string())?;

        let mut headers = HeaderMap::new();
        headers.insert("apikey", apikey);
        headers.insert(AUTHORIZATION, bearer);
        Ok(Self { base, headers })
    }

    /// Base URL with `segments` appended as percent-encoded path segments.
    pub fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn headers(&self) -> HeaderMap {
        self.headers.clone()
    }
}

/// Error bodies of PostgREST (`message`) and Storage (`message` / `error`).
#[derive(Deserialize)]
struct UpstreamErrorBody {
    message: Option<String>,
    error: Option<String>,
    msg: Option<String>,
}

/// Best human-readable message from a failed upstream response.
pub(crate) fn upstream_message(status: reqwest::StatusCode, body: &str) -> String {
    let parsed = serde_json::from_str::<UpstreamErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error).or(b.msg));
    match parsed {
        Some(message) => format!("{} (HTTP {})", message, status.as_u16()),
        None if body.trim().is_empty() => format!("HTTP {}", status),
        None => format!("HTTP {}: {}", status.as_u16(), body.trim()),
    }
}
