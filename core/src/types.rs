//! Domain and wire types for the food safety analysis API.
//!
//! # Design
//! The wire types (`AnalyzeRequest`, `AnalyzeResponse`) mirror the JSON the
//! service speaks and are deliberately lenient: every response field is
//! optional so a sparse body still parses. `AnalyzeResponse::into_result`
//! then folds the flat body into the `AnalysisResult` sum type, which is what
//! the form controller and renderer work with.

use serde::{Deserialize, Deserializer, Serialize};

/// User input after normalization: trimmed, with empty values mapped to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionInput {
    pub barcode: Option<String>,
    pub ingredients: Option<String>,
}

impl SubmissionInput {
    /// Normalize raw field text.
    pub fn new(barcode: &str, ingredients: &str) -> Self {
        Self {
            barcode: non_empty(barcode),
            ingredients: non_empty(ingredients),
        }
    }

    /// At least one field carries content.
    pub fn is_submittable(&self) -> bool {
        self.barcode.is_some() || self.ingredients.is_some()
    }
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Request payload for `POST /analyze-food`. Absent fields are omitted from
/// the JSON entirely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalyzeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<String>,
}

impl From<&SubmissionInput> for AnalyzeRequest {
    fn from(input: &SubmissionInput) -> Self {
        Self {
            barcode: input.barcode.clone(),
            ingredients: input.ingredients.clone(),
        }
    }
}

/// Response body of a successful `POST /analyze-food`, as sent on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalyzeResponse {
    #[serde(default)]
    pub requires_clarification: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clarification_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_status",
        skip_serializing_if = "Option::is_none"
    )]
    pub safety_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub harmful_ingredients: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Accept any JSON value for `safety_status`. Strings pass through, `null`
/// is absent, anything else keeps its JSON text and later maps to
/// `SafetyStatus::Other`.
fn lenient_status<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(raw)) => Some(raw),
        Some(other) => Some(other.to_string()),
    })
}

impl AnalyzeResponse {
    /// Pick the clarification or decision shape based on
    /// `requires_clarification`. Fields belonging to the other shape are
    /// ignored.
    pub fn into_result(self) -> AnalysisResult {
        if self.requires_clarification {
            return AnalysisResult::Clarification {
                message: self.clarification_message.unwrap_or_default(),
            };
        }
        AnalysisResult::Decision {
            product_name: self.product_name.filter(|name| !name.is_empty()),
            safety_status: SafetyStatus::from(self.safety_status.unwrap_or_default()),
            harmful_ingredients: self.harmful_ingredients.unwrap_or_default(),
            explanation: self.explanation.unwrap_or_default(),
        }
    }
}

/// Outcome of an analysis: either the service decided, or it needs more input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisResult {
    Clarification {
        message: String,
    },
    Decision {
        product_name: Option<String>,
        safety_status: SafetyStatus,
        harmful_ingredients: Vec<String>,
        explanation: String,
    },
}

/// Safety classification. Any value outside the three known names is kept
/// verbatim in `Other` rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SafetyStatus {
    Safe,
    Caution,
    Unsafe,
    Other(String),
}

impl SafetyStatus {
    pub fn as_str(&self) -> &str {
        match self {
            SafetyStatus::Safe => "SAFE",
            SafetyStatus::Caution => "CAUTION",
            SafetyStatus::Unsafe => "UNSAFE",
            SafetyStatus::Other(raw) => raw,
        }
    }

    /// Badge label and colors for this status. Unknown statuses get the gray
    /// palette and no label.
    pub fn presentation(&self) -> StatusPresentation {
        match self {
            SafetyStatus::Safe => StatusPresentation {
                label: Some("✓ SAFE"),
                foreground: "#10b981",
                background: "#d1fae5",
            },
            SafetyStatus::Caution => StatusPresentation {
                label: Some("⚠ CONSUME WITH CAUTION"),
                foreground: "#f59e0b",
                background: "#fef3c7",
            },
            SafetyStatus::Unsafe => StatusPresentation {
                label: Some("✗ UNSAFE"),
                foreground: "#ef4444",
                background: "#fee2e2",
            },
            SafetyStatus::Other(_) => StatusPresentation {
                label: None,
                foreground: "#6b7280",
                background: "#f3f4f6",
            },
        }
    }
}

impl From<String> for SafetyStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "SAFE" => SafetyStatus::Safe,
            "CAUTION" => SafetyStatus::Caution,
            "UNSAFE" => SafetyStatus::Unsafe,
            _ => SafetyStatus::Other(raw),
        }
    }
}

impl From<&str> for SafetyStatus {
    fn from(raw: &str) -> Self {
        SafetyStatus::from(raw.to_string())
    }
}

impl From<SafetyStatus> for String {
    fn from(status: SafetyStatus) -> Self {
        match status {
            SafetyStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// How a status badge is drawn. Colors are `#rrggbb` hex strings; the border
/// uses `foreground`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusPresentation {
    pub label: Option<&'static str>,
    pub foreground: &'static str,
    pub background: &'static str,
}
