//! Synchronous client core for the food safety analysis service.
//!
//! # Overview
//! Builds the `POST /analyze-food` request and parses its response without
//! touching the network (host-does-IO pattern). On top of that sit the form
//! controller, which owns input and request lifecycle state, and a pure
//! renderer from that state to what the user sees.
//!
//! # Design
//! - `AnalysisClient` is stateless; it holds only `base_url`, taken from an
//!   explicit `ClientConfig`.
//! - `AnalysisResult` is a sum type (clarification or decision) so rendering
//!   is an exhaustive match.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod http;
pub mod render;
pub mod types;

pub use client::AnalysisClient;
pub use config::ClientConfig;
pub use error::{ApiError, RequestError, FALLBACK_ERROR_MESSAGE};
pub use form::{FormController, FormState, Submission, SubmissionId};
pub use http::{HttpMethod, HttpRequest, HttpResponse, TransportFailure};
pub use render::{render, Panel, StatusBadge};
pub use types::{AnalysisResult, AnalyzeRequest, AnalyzeResponse, SafetyStatus, StatusPresentation, SubmissionInput};
