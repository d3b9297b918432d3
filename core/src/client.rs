//! Stateless HTTP request builder and response parser for the analysis API.
//!
//! # Design
//! `AnalysisClient` holds only a `base_url` and carries no mutable state
//! between calls. The single operation is split into `build_analyze`, which
//! produces an `HttpRequest`, and `parse_analyze`, which consumes an
//! `HttpResponse`. The caller executes the HTTP round-trip in between.

use serde::Deserialize;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{AnalysisResult, AnalyzeRequest, AnalyzeResponse, SubmissionInput};

pub const ANALYZE_PATH: &str = "/analyze-food";

/// Synchronous, stateless client for `POST /analyze-food`.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    base_url: String,
}

impl AnalysisClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_analyze(&self, input: &SubmissionInput) -> Result<HttpRequest, ApiError> {
        if !input.is_submittable() {
            return Err(ApiError::EmptySubmission);
        }
        let payload = AnalyzeRequest::from(input);
        let body = serde_json::to_string(&payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}{ANALYZE_PATH}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn parse_analyze(&self, response: HttpResponse) -> Result<AnalysisResult, ApiError> {
        check_status(&response)?;
        let body: AnalyzeResponse =
            serde_json::from_str(&response.body).map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        Ok(body.into_result())
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<serde_json::Value>,
}

/// Map non-2xx responses to `ApiError::Server`, lifting the `error` string
/// out of the body when there is one.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let message = serde_json::from_str::<ErrorBody>(&response.body)
        .ok()
        .and_then(|body| match body.error {
            Some(serde_json::Value::String(message)) => Some(message),
            _ => None,
        })
        .filter(|message| !message.trim().is_empty());
    Err(ApiError::Server {
        status: response.status,
        message,
    })
}
