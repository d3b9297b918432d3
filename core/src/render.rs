//! Pure rendering of the form state.
//!
//! `render` maps a `FormState` to the panel to show, if any. The text layout
//! lives in `Panel::write_with`; `Display` uses it with the plain `[label]`
//! badge, and hosts that can paint colors supply their own badge drawing.

use std::fmt;

use serde::Serialize;

use crate::form::FormState;
use crate::types::{AnalysisResult, SafetyStatus, StatusPresentation};

pub const ERROR_HEADING: &str = "Error";
pub const CLARIFICATION_HEADING: &str = "⚠️ Clarification Needed";
pub const HARMFUL_HEADING: &str = "Harmful Ingredients Detected:";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub status: SafetyStatus,
    #[serde(flatten)]
    pub presentation: StatusPresentation,
}

impl StatusBadge {
    pub fn new(status: &SafetyStatus) -> Self {
        Self {
            status: status.clone(),
            presentation: status.presentation(),
        }
    }

    /// Label text, empty for unrecognized statuses.
    pub fn label(&self) -> &'static str {
        self.presentation.label.unwrap_or("")
    }
}

impl fmt::Display for StatusBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "panel", rename_all = "snake_case")]
pub enum Panel {
    Error {
        message: String,
    },
    Clarification {
        message: String,
    },
    Decision {
        product_name: Option<String>,
        badge: StatusBadge,
        explanation: String,
        /// Empty means the section is not shown.
        harmful_ingredients: Vec<String>,
    },
}

/// Idle and loading states render nothing beyond the form itself.
pub fn render(state: &FormState) -> Option<Panel> {
    match state {
        FormState::Idle | FormState::Loading { .. } => None,
        FormState::Failed(err) => Some(Panel::Error {
            message: err.message.clone(),
        }),
        FormState::Completed(result) => Some(render_result(result)),
    }
}

pub fn render_result(result: &AnalysisResult) -> Panel {
    match result {
        AnalysisResult::Clarification { message } => Panel::Clarification {
            message: message.clone(),
        },
        AnalysisResult::Decision {
            product_name,
            safety_status,
            harmful_ingredients,
            explanation,
        } => Panel::Decision {
            product_name: product_name.clone(),
            badge: StatusBadge::new(safety_status),
            explanation: explanation.clone(),
            harmful_ingredients: harmful_ingredients.clone(),
        },
    }
}

impl Panel {
    /// Write the plain-text layout, drawing the status badge with `badge`.
    /// `Display` uses the badge's own `[label]` form; hosts that can paint
    /// colors pass their own.
    pub fn write_with(
        &self,
        out: &mut dyn fmt::Write,
        badge: impl Fn(&StatusBadge) -> String,
    ) -> fmt::Result {
        match self {
            Panel::Error { message } => {
                writeln!(out, "{ERROR_HEADING}")?;
                writeln!(out, "{message}")
            }
            Panel::Clarification { message } => {
                writeln!(out, "{CLARIFICATION_HEADING}")?;
                writeln!(out, "{message}")
            }
            Panel::Decision {
                product_name,
                badge: status,
                explanation,
                harmful_ingredients,
            } => {
                if let Some(name) = product_name {
                    writeln!(out, "{name}")?;
                }
                writeln!(out, "{}", badge(status))?;
                writeln!(out, "{explanation}")?;
                if !harmful_ingredients.is_empty() {
                    writeln!(out, "{HARMFUL_HEADING}")?;
                    for ingredient in harmful_ingredients {
                        writeln!(out, "- {ingredient}")?;
                    }
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_with(f, |badge| badge.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RequestError;

    fn decision(status: &str, explanation: &str, harmful: &[&str]) -> FormState {
        FormState::Completed(AnalysisResult::Decision {
            product_name: None,
            safety_status: SafetyStatus::from(status),
            harmful_ingredients: harmful.iter().map(|s| s.to_string()).collect(),
            explanation: explanation.to_string(),
        })
    }

    #[test]
    fn idle_renders_nothing() {
        assert!(render(&FormState::Idle).is_none());
    }

    #[test]
    fn error_panel_shows_message() {
        let state = FormState::Failed(RequestError {
            message: "Invalid barcode".to_string(),
        });
        assert_eq!(render(&state).unwrap().to_string(), "Error\nInvalid barcode\n");
    }

    #[test]
    fn clarification_has_no_badge() {
        let state = FormState::Completed(AnalysisResult::Clarification {
            message: "Need more info".to_string(),
        });
        let panel = render(&state).unwrap();
        assert_eq!(
            panel,
            Panel::Clarification {
                message: "Need more info".to_string()
            }
        );
        let text = panel.to_string();
        assert!(text.contains("Need more info"));
        assert!(!text.contains('['));
    }

    #[test]
    fn safe_decision_without_harmful_section() {
        let panel = render(&decision("SAFE", "Looks fine", &[])).unwrap();
        match &panel {
            Panel::Decision { badge, .. } => {
                assert_eq!(badge.label(), "✓ SAFE");
                assert_eq!(badge.presentation.foreground, "#10b981");
                assert_eq!(badge.presentation.background, "#d1fae5");
            }
            other => panic!("expected decision, got {other:?}"),
        }
        assert_eq!(panel.to_string(), "[✓ SAFE]\nLooks fine\n");
    }

    #[test]
    fn unsafe_decision_lists_ingredients_in_order() {
        let panel = render(&decision("UNSAFE", "Contains allergen", &["Peanuts", "Soy"])).unwrap();
        assert_eq!(
            panel.to_string(),
            "[✗ UNSAFE]\nContains allergen\nHarmful Ingredients Detected:\n- Peanuts\n- Soy\n"
        );
    }

    #[test]
    fn unknown_status_renders_gray_without_label() {
        let panel = render(&decision("WEIRD", "Hmm", &[])).unwrap();
        match &panel {
            Panel::Decision { badge, .. } => {
                assert_eq!(badge.label(), "");
                assert_eq!(badge.presentation.foreground, "#6b7280");
                assert_eq!(badge.presentation.background, "#f3f4f6");
            }
            other => panic!("expected decision, got {other:?}"),
        }
        assert_eq!(panel.to_string(), "[]\nHmm\n");
    }

    #[test]
    fn product_name_shown_first_when_present() {
        let state = FormState::Completed(AnalysisResult::Decision {
            product_name: Some("Nutella".to_string()),
            safety_status: SafetyStatus::Caution,
            harmful_ingredients: vec!["Palm Oil".to_string()],
            explanation: "High sugar".to_string(),
        });
        let text = render(&state).unwrap().to_string();
        assert!(text.starts_with("Nutella\n[⚠ CONSUME WITH CAUTION]\n"));
    }

    #[test]
    fn custom_badge_keeps_layout() {
        let panel = render(&decision("UNSAFE", "Contains allergen", &["Peanuts"])).unwrap();
        let mut out = String::new();
        panel
            .write_with(&mut out, |badge| format!("<{}>", badge.presentation.foreground))
            .unwrap();
        assert_eq!(
            out,
            "<#ef4444>\nContains allergen\nHarmful Ingredients Detected:\n- Peanuts\n"
        );
    }

    #[test]
    fn rendering_is_idempotent() {
        let state = decision("CAUTION", "Moderate", &["Sugar"]);
        assert_eq!(render(&state), render(&state));
        assert_eq!(
            render(&state).unwrap().to_string(),
            render(&state).unwrap().to_string()
        );
    }
}
