//! Roast API client — the single point of entry for all calls to the
//! remote roast service.
//!
//! No other module issues HTTP requests directly. Controllers talk to the
//! service through the [`RoastApi`] trait so tests can substitute a fake.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{RoastResult, RoastStats};
use crate::submit::CandidateFile;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

const UPLOAD_FALLBACK: &str = "Upload failed";
const FETCH_FALLBACK: &str = "Error fetching roast";
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure: the request never got a usable response.
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status. `message` is the server's `detail` when present,
    /// else the per-endpoint fallback.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Success status but the body violated the contract.
    #[error("No roast_id returned")]
    MissingRoastId,
}

/// Upload acknowledgement. Only `roast_id` is load-bearing; the rest is
/// informational and tolerated absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadAck {
    pub roast_id: String,
    pub message: Option<String>,
    pub processing_status: Option<String>,
    pub estimated_time: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct UploadBody {
    roast_id: Option<String>,
    message: Option<String>,
    processing_status: Option<String>,
    estimated_time: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// The external collaborator as the state machines see it.
#[async_trait]
pub trait RoastApi: Send + Sync {
    /// One multipart POST of the candidate file. No retries.
    async fn upload_resume(&self, file: &CandidateFile) -> Result<UploadAck, ApiError>;

    /// One GET of the roast keyed by its identifier. No retries, no polling.
    async fn fetch_roast(&self, roast_id: &str) -> Result<RoastResult, ApiError>;

    async fn fetch_stats(&self, roast_id: &str) -> Result<RoastStats, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl RoastApi for ApiClient {
    async fn upload_resume(&self, file: &CandidateFile) -> Result<UploadAck, ApiError> {
        let part = Part::stream(reqwest::Body::from(file.payload.clone()))
            .file_name(file.name.clone())
            .mime_str(&file.media_type)?;
        let form = Form::new().part("file", part);

        debug!(name = %file.name, size = file.size, "uploading resume");
        let response = self
            .client
            .post(self.url("upload-cv"))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("upload returned {status}: {body}");
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: parse_detail(&body, UPLOAD_FALLBACK),
            });
        }

        let body: UploadBody = response.json().await?;
        let roast_id = body
            .roast_id
            .filter(|id| !id.is_empty())
            .ok_or(ApiError::MissingRoastId)?;

        debug!(roast_id = %roast_id, status = ?body.processing_status, "upload acknowledged");
        Ok(UploadAck {
            roast_id,
            message: body.message,
            processing_status: body.processing_status,
            estimated_time: body.estimated_time,
        })
    }

    async fn fetch_roast(&self, roast_id: &str) -> Result<RoastResult, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("roast/{roast_id}")))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("roast fetch returned {status}: {body}");
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: parse_detail(&body, FETCH_FALLBACK),
            });
        }

        Ok(response.json().await?)
    }

    async fn fetch_stats(&self, roast_id: &str) -> Result<RoastStats, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("roast/{roast_id}/stats")))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: parse_detail(&body, FETCH_FALLBACK),
            });
        }

        Ok(response.json().await?)
    }
}

/// Pulls the human-readable `detail` out of an error body, falling back to
/// the endpoint's fixed message when the body is empty, unparseable, or
/// blank.
fn parse_detail(body: &str, fallback: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|e| e.detail)
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_detail_present() {
        assert_eq!(
            parse_detail(r#"{"detail": "file too large"}"#, UPLOAD_FALLBACK),
            "file too large"
        );
    }

    #[test]
    fn test_parse_detail_missing_field() {
        assert_eq!(
            parse_detail(r#"{"error": "nope"}"#, UPLOAD_FALLBACK),
            "Upload failed"
        );
    }

    #[test]
    fn test_parse_detail_unparseable_body() {
        assert_eq!(
            parse_detail("<html>502 Bad Gateway</html>", FETCH_FALLBACK),
            "Error fetching roast"
        );
    }

    #[test]
    fn test_parse_detail_blank_detail() {
        assert_eq!(parse_detail(r#"{"detail": "  "}"#, FETCH_FALLBACK), "Error fetching roast");
    }

    #[test]
    fn test_url_joining_trims_trailing_slash() {
        let client = ApiClient::new("http://localhost:8000/api/v1/");
        assert_eq!(
            client.url("upload-cv"),
            "http://localhost:8000/api/v1/upload-cv"
        );
        assert_eq!(
            client.url("roast/abc123"),
            "http://localhost:8000/api/v1/roast/abc123"
        );
    }

    #[test]
    fn test_missing_roast_id_message() {
        assert_eq!(ApiError::MissingRoastId.to_string(), "No roast_id returned");
    }
}
