use crate::error::ReportError;
use crate::supabase::{upstream_message, DataSource, Project};
use async_trait::async_trait;
use common::model::row::Row;

/// PostgREST client for one caller's project.
pub struct RestClient {
    http: reqwest::Client,
    project: Project,
}

impl RestClient {
    pub fn new(http: reqwest::Client, project: Project) -> Self {
        Self { http, project }
    }
}

#[async_trait]
impl DataSource for RestClient {
    /// `GET /rest/v1/<table>?select=<f1,f2,...>`; the whole table, unpaginated.
    async fn select(&self, table: &str, fields: &[String]) -> Result<Vec<Row>, ReportError> {
        let mut url = self.project.endpoint(["rest", "v1", table]);
        url.query_pairs_mut().append_pair("select", &fields.join(","));
        log::debug!("selecting {} from {}", fields.join(","), url.path());

        let response = self
            .http
            .get(url)
            .headers(self.project.headers())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ReportError::UpstreamQuery(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReportError::UpstreamQuery(upstream_message(status, &body)));
        }

        response
            .json::<Vec<Row>>()
            .await
            .map_err(|e| ReportError::UpstreamQuery(format!("unexpected response body: {}", e)))
    }
}
