//! Error taxonomy of the report pipeline.
//!
//! Every stage of a report request fails with one [`ReportError`] variant. The
//! variant decides the HTTP status; the message is handed to the caller as-is in
//! a `{ "error": "..." }` body.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::requests::PayloadError;
use common::responses::ErrorBody;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// Missing or malformed request fields. Raised before any upstream call.
    #[error("{0}")]
    Validation(String),

    /// The data-source client could not be built from the supplied credentials.
    #[error("could not connect to the data source: {0}")]
    UpstreamConnect(String),

    /// The data source rejected or failed the select.
    #[error("could not fetch data: {0}")]
    UpstreamQuery(String),

    /// The object store rejected or failed the upload.
    #[error("could not upload report: {0}")]
    UpstreamStorage(String),

    /// The renderer failed. Points at a configuration problem (fonts), not at
    /// the row data.
    #[error("internal error: {0}")]
    InternalRender(String),
}

impl ResponseError for ReportError {
    fn status_code(&self) -> StatusCode {
        match self {
            ReportError::Validation(_)
            | ReportError::UpstreamConnect(_)
            | ReportError::UpstreamQuery(_) => StatusCode::BAD_REQUEST,
            ReportError::UpstreamStorage(_) | ReportError::InternalRender(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}

impl From<PayloadError> for ReportError {
    fn from(e: PayloadError) -> Self {
        ReportError::Validation(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn maps_variants_to_status_codes() {
        let cases = [
            (ReportError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (ReportError::UpstreamConnect("x".into()), StatusCode::BAD_REQUEST),
            (ReportError::UpstreamQuery("x".into()), StatusCode::BAD_REQUEST),
            (
                ReportError::UpstreamStorage("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ReportError::InternalRender("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.status_code(), status, "{err:?}");
        }
    }

    #[actix_web::test]
    async fn error_body_passes_the_message_through() {
        let err = ReportError::UpstreamQuery("relation \"public.nope\" does not exist".into());
        let response = err.error_response();
        let body = to_bytes(response.into_body()).await.unwrap();
        let body: ErrorBody = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            body.error,
            "could not fetch data: relation \"public.nope\" does not exist"
        );
    }

    #[test]
    fn payload_errors_become_validation_errors() {
        let err: ReportError = PayloadError::Missing("fields").into();
        assert_eq!(
            err,
            ReportError::Validation("missing required field: fields".into())
        );
    }
}
