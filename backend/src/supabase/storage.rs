use crate::error::ReportError;
use crate::supabase::{upstream_message, ObjectStore, Project};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use url::Url;

/// Storage API client for one caller's project.
pub struct StorageClient {
    http: reqwest::Client,
    project: Project,
}

impl StorageClient {
    pub fn new(http: reqwest::Client, project: Project) -> Self {
        Self { http, project }
    }

    fn object_url(&self, bucket: &str, path: &str) -> Url {
        let segments = ["storage", "v1", "object", bucket]
            .into_iter()
            .chain(path.split('/').filter(|s| !s.is_empty()));
        self.project.endpoint(segments)
    }

    /// Public link of an object in a public bucket.
    pub fn public_url(&self, bucket: &str, path: &str) -> Url {
        let segments = ["storage", "v1", "object", "public", bucket]
            .into_iter()
            .chain(path.split('/').filter(|s| !s.is_empty()));
        self.project.endpoint(segments)
    }
}

#[async_trait]
impl ObjectStore for StorageClient {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, ReportError> {
        let url = self.object_url(bucket, path);
        log::debug!("uploading {} bytes to {}", bytes.len(), url.path());

        let response = self
            .http
            .post(url)
            .headers(self.project.headers())
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "true")
            .body(bytes)
            .send()
            .await
            .map_err(|e| ReportError::UpstreamStorage(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReportError::UpstreamStorage(upstream_message(status, &body)));
        }

        Ok(self.public_url(bucket, path).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::report::Credentials;
    use serde_json::json;
    use wiremock::matchers::{body_bytes, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(base: &str) -> StorageClient {
        let project = Project::from_credentials(&Credentials {
            url: base.to_string(),
            key: "service".to_string(),
        })
        .unwrap();
        StorageClient::new(reqwest::Client::new(), project)
    }

    #[test]
    fn builds_public_links() {
        let storage = client("https://demo.supabase.co");
        assert_eq!(
            storage.public_url("reports", "2026/users_1.pdf").as_str(),
            "https://demo.supabase.co/storage/v1/object/public/reports/2026/users_1.pdf"
        );
    }

    #[actix_web::test]
    async fn uploads_with_upsert_and_returns_the_public_link() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/storage/v1/object/reports/monthly/users.pdf"))
            .and(header("x-upsert", "true"))
            .and(header("content-type", "application/pdf"))
            .and(header("authorization", "Bearer service"))
            .and(body_bytes(b"%PDF-1.3".to_vec()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Key": "reports/monthly/users.pdf"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let link = client(&server.uri())
            .upload(
                "reports",
                "monthly/users.pdf",
                b"%PDF-1.3".to_vec(),
                "application/pdf",
            )
            .await
            .unwrap();

        assert_eq!(
            link,
            format!(
                "{}/storage/v1/object/public/reports/monthly/users.pdf",
                server.uri()
            )
        );
    }

    #[actix_web::test]
    async fn storage_failures_are_storage_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "statusCode": "404",
                "error": "Bucket not found",
                "message": "Bucket not found"
            })))
            .mount(&server)
            .await;

        let err = client(&server.uri())
            .upload("nope", "a.pdf", vec![1, 2, 3], "application/pdf")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ReportError::UpstreamStorage("Bucket not found (HTTP 400)".to_string())
        );
    }
}
