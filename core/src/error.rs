//! Error types for the analysis client.
//!
//! # Design
//! `ApiError` keeps enough detail to tell failure kinds apart (server said no,
//! transport broke, body was garbage). The form only ever shows a single
//! message, so `RequestError` collapses an `ApiError` into that message with a
//! fixed priority: the server's `error` field, then the transport-level
//! message, then `FALLBACK_ERROR_MESSAGE`.

use thiserror::Error;

use crate::http::TransportFailure;

/// Shown when no better message is available.
pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred";

/// Errors produced while building a request or interpreting its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Non-2xx response. `message` is the body's `error` string when the body
    /// was a JSON object carrying one.
    #[error("{}", server_message(.status, .message))]
    Server { status: u16, message: Option<String> },

    /// No response was received.
    #[error("{0}")]
    Transport(String),

    /// A 2xx response whose body could not be read as an analysis result.
    #[error("Invalid response from analysis service: {0}")]
    InvalidResponse(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// Neither a barcode nor ingredients were provided.
    #[error("Please enter a barcode or an ingredients list")]
    EmptySubmission,
}

fn server_message(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(message) if !message.trim().is_empty() => message.clone(),
        _ => format!("Request failed with status code {status}"),
    }
}

impl From<TransportFailure> for ApiError {
    fn from(failure: TransportFailure) -> Self {
        ApiError::Transport(failure.message)
    }
}

/// The single user-visible error of a failed submission.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RequestError {
    pub message: String,
}

impl From<ApiError> for RequestError {
    fn from(err: ApiError) -> Self {
        let message = err.to_string();
        let message = if message.trim().is_empty() {
            FALLBACK_ERROR_MESSAGE.to_string()
        } else {
            message
        };
        RequestError { message }
    }
}

impl std::fmt::Display for RequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
