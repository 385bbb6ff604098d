use crate::model::report::{Credentials, ReportRequest, StorageTarget};
use serde::Deserialize;
use thiserror::Error;

/// Why a [`ReportPayload`] could not be turned into a [`ReportRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("missing required field: {0}")]
    Missing(&'static str),

    #[error("invalid field \"{field}\": {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Request body of `POST /generate-pdf`.
///
/// Every key is optional at the JSON level so that a missing key is reported by
/// name through [`ReportPayload::validate`] instead of a generic parse error.
#[derive(Debug, Default, Deserialize)]
pub struct ReportPayload {
    pub table_name: Option<String>,
    pub fields: Option<Vec<String>>,
    pub supabase_url: Option<String>,
    pub anon_key: Option<String>,
    pub report_title: Option<String>,
    pub bucket_name: Option<String>,
    pub folder: Option<String>,
}

impl ReportPayload {
    /// Checks presence of the required keys and normalizes the rest.
    ///
    /// - `table_name`, `supabase_url` and `anon_key` must be non-blank.
    /// - `fields` must contain at least one non-blank name; repeated names are
    ///   dropped, keeping the first occurrence.
    /// - A blank `report_title`, `bucket_name` or `folder` counts as absent.
    pub fn validate(self) -> Result<ReportRequest, PayloadError> {
        let table_name = required(self.table_name, "table_name")?;
        let fields = self.fields.ok_or(PayloadError::Missing("fields"))?;
        let url = required(self.supabase_url, "supabase_url")?;
        let key = required(self.anon_key, "anon_key")?;

        if fields.is_empty() {
            return Err(PayloadError::Invalid {
                field: "fields",
                reason: "must be a non-empty list".to_string(),
            });
        }

        let mut distinct: Vec<String> = Vec::with_capacity(fields.len());
        for field in fields {
            let field = field.trim();
            if field.is_empty() {
                return Err(PayloadError::Invalid {
                    field: "fields",
                    reason: "field names must not be blank".to_string(),
                });
            }
            if !distinct.iter().any(|f| f == field) {
                distinct.push(field.to_string());
            }
        }

        let storage = optional(self.bucket_name).map(|bucket| StorageTarget {
            bucket,
            folder: optional(self.folder)
                .map(|f| f.trim_matches('/').to_string())
                .filter(|f| !f.is_empty()),
        });

        Ok(ReportRequest {
            table_name,
            fields: distinct,
            credentials: Credentials { url, key },
            title: optional(self.report_title),
            storage,
        })
    }
}

fn required(value: Option<String>, name: &'static str) -> Result<String, PayloadError> {
    optional(value).ok_or(PayloadError::Missing(name))
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(body: serde_json::Value) -> ReportPayload {
        serde_json::from_value(body).unwrap()
    }

    fn complete() -> serde_json::Value {
        json!({
            "table_name": "users",
            "fields": ["id", "name"],
            "supabase_url": "https://x",
            "anon_key": "k"
        })
    }

    #[test]
    fn accepts_a_complete_payload() {
        let request = payload(complete()).validate().unwrap();
        assert_eq!(request.table_name, "users");
        assert_eq!(request.fields, vec!["id", "name"]);
        assert_eq!(request.credentials.url, "https://x");
        assert_eq!(request.credentials.key, "k");
        assert!(request.title.is_none());
        assert!(request.storage.is_none());
    }

    #[test]
    fn names_each_missing_key() {
        for key in ["table_name", "fields", "supabase_url", "anon_key"] {
            let mut body = complete();
            body.as_object_mut().unwrap().remove(key);
            let err = payload(body).validate().unwrap_err();
            assert_eq!(err, PayloadError::Missing(key));
            assert!(err.to_string().contains(key));
        }
    }

    #[test]
    fn rejects_an_empty_field_list() {
        let mut body = complete();
        body["fields"] = json!([]);
        let err = payload(body).validate().unwrap_err();
        assert!(matches!(err, PayloadError::Invalid { field: "fields", .. }));
    }

    #[test]
    fn rejects_blank_field_names() {
        let mut body = complete();
        body["fields"] = json!(["id", "  "]);
        assert!(payload(body).validate().is_err());
    }

    #[test]
    fn collapses_duplicate_fields_in_order() {
        let mut body = complete();
        body["fields"] = json!(["name", "id", "name"]);
        let request = payload(body).validate().unwrap();
        assert_eq!(request.fields, vec!["name", "id"]);
    }

    #[test]
    fn blank_credentials_count_as_missing() {
        let mut body = complete();
        body["anon_key"] = json!("   ");
        assert_eq!(
            payload(body).validate().unwrap_err(),
            PayloadError::Missing("anon_key")
        );
    }

    #[test]
    fn builds_storage_target_with_trimmed_folder() {
        let mut body = complete();
        body["bucket_name"] = json!("reports");
        body["folder"] = json!("/monthly/2026/");
        body["report_title"] = json!("Users");
        let request = payload(body).validate().unwrap();
        assert_eq!(
            request.storage,
            Some(StorageTarget {
                bucket: "reports".to_string(),
                folder: Some("monthly/2026".to_string()),
            })
        );
        assert_eq!(request.title.as_deref(), Some("Users"));
    }

    #[test]
    fn folder_without_bucket_is_ignored() {
        let mut body = complete();
        body["folder"] = json!("monthly");
        assert!(payload(body).validate().unwrap().storage.is_none());
    }
}
