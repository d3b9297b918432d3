//! Submission form controller.
//!
//! # Design
//! `FormController` owns the two raw text fields and the request lifecycle
//! state. It never performs I/O: `submit` hands back the `HttpRequest` to run,
//! and the host reports the outcome through `settle`. Each accepted submit is
//! tagged with a fresh `SubmissionId`; only the outstanding id can settle the
//! form, so a late response to an abandoned submit cannot overwrite a newer
//! one.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use crate::client::AnalysisClient;
use crate::error::{ApiError, RequestError};
use crate::http::{HttpRequest, HttpResponse, TransportFailure};
use crate::types::{AnalysisResult, SubmissionInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SubmissionId(Uuid);

impl SubmissionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// An accepted submit: the request to execute and the id to settle it with.
#[derive(Debug, Clone)]
pub struct Submission {
    pub id: SubmissionId,
    pub input: SubmissionInput,
    pub request: HttpRequest,
}

/// Lifecycle state. At most one of error or result exists at any time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Loading { submission: SubmissionId },
    Failed(RequestError),
    Completed(AnalysisResult),
}

#[derive(Debug, Clone)]
pub struct FormController {
    barcode: String,
    ingredients: String,
    state: FormState,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new()
    }
}

impl FormController {
    pub fn new() -> Self {
        Self {
            barcode: String::new(),
            ingredients: String::new(),
            state: FormState::Idle,
        }
    }

    pub fn set_barcode(&mut self, value: impl Into<String>) {
        self.barcode = value.into();
    }

    pub fn set_ingredients(&mut self, value: impl Into<String>) {
        self.ingredients = value.into();
    }

    pub fn barcode(&self) -> &str {
        &self.barcode
    }

    pub fn ingredients(&self) -> &str {
        &self.ingredients
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, FormState::Loading { .. })
    }

    /// The ingredients field is mandatory unless a barcode was typed.
    pub fn ingredients_required(&self) -> bool {
        self.barcode.trim().is_empty()
    }

    pub fn input(&self) -> SubmissionInput {
        SubmissionInput::new(&self.barcode, &self.ingredients)
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_loading() && self.input().is_submittable()
    }

    /// Start a submission. Returns `Ok(None)` without touching state when
    /// `can_submit` is false. On success the form is loading and any previous
    /// result or error is gone.
    pub fn submit(&mut self, client: &AnalysisClient) -> Result<Option<Submission>, ApiError> {
        if !self.can_submit() {
            tracing::debug!(loading = self.is_loading(), "submit ignored");
            return Ok(None);
        }
        let input = self.input();
        let request = client.build_analyze(&input)?;
        let id = SubmissionId::new();
        self.state = FormState::Loading { submission: id };
        tracing::debug!(
            submission = %id,
            has_barcode = input.barcode.is_some(),
            has_ingredients = input.ingredients.is_some(),
            "submission started"
        );
        Ok(Some(Submission { id, input, request }))
    }

    /// Record the outcome of submission `id`. Loading always ends when `id`
    /// is outstanding; any other id is ignored and `false` is returned.
    pub fn settle(
        &mut self,
        client: &AnalysisClient,
        id: SubmissionId,
        outcome: Result<HttpResponse, TransportFailure>,
    ) -> bool {
        match self.state {
            FormState::Loading { submission } if submission == id => {}
            _ => {
                tracing::debug!(submission = %id, "stale outcome discarded");
                return false;
            }
        }
        let parsed = outcome
            .map_err(ApiError::from)
            .and_then(|response| client.parse_analyze(response));
        self.state = match parsed {
            Ok(result) => {
                tracing::debug!(submission = %id, "submission completed");
                FormState::Completed(result)
            }
            Err(err) => {
                tracing::warn!(submission = %id, error = %err, "submission failed");
                FormState::Failed(RequestError::from(err))
            }
        };
        true
    }
}
