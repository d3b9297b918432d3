//! Deterministic ingredient classification used by the mock service.
//!
//! Ingredients are split on commas and matched case-insensitively, as whole
//! tokens, against a fixed table. The worst severity found decides the status.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Moderate,
    High,
}

const HARMFUL: &[(&str, Severity)] = &[
    ("peanuts", Severity::High),
    ("soy", Severity::High),
    ("partially hydrogenated oil", Severity::High),
    ("sodium nitrite", Severity::High),
    ("potassium bromate", Severity::High),
    ("palm oil", Severity::Moderate),
    ("high fructose corn syrup", Severity::Moderate),
    ("monosodium glutamate", Severity::Moderate),
    ("aspartame", Severity::Moderate),
    ("red 40", Severity::Moderate),
];

/// Fewer recognizable tokens than this, with nothing harmful among them,
/// asks the caller for more detail.
const MIN_TOKENS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    NeedsClarification(String),
    Decided {
        status: &'static str,
        harmful: Vec<String>,
        explanation: String,
    },
}

pub fn tokens(ingredients: &str) -> Vec<&str> {
    ingredients
        .split(',')
        .map(str::trim)
        .filter(|token| token.chars().any(char::is_alphabetic))
        .collect()
}

fn severity_of(token: &str) -> Option<Severity> {
    let lowered = token.to_lowercase();
    HARMFUL
        .iter()
        .find(|(name, _)| *name == lowered)
        .map(|(_, severity)| *severity)
}

pub fn classify(ingredients: &str) -> Verdict {
    let tokens = tokens(ingredients);
    let hits: Vec<(&str, Severity)> = tokens
        .iter()
        .filter_map(|token| severity_of(token).map(|severity| (*token, severity)))
        .collect();

    if hits.is_empty() && tokens.len() < MIN_TOKENS {
        return Verdict::NeedsClarification(
            "Please provide the full ingredients list, separated by commas.".to_string(),
        );
    }

    let worst = hits.iter().map(|(_, severity)| *severity).max();
    let harmful = hits.into_iter().map(|(token, _)| token.to_string()).collect();
    let (status, explanation) = match worst {
        None => ("SAFE", "No harmful ingredients detected."),
        Some(Severity::Moderate) => (
            "CAUTION",
            "Contains ingredients that are best consumed in moderation.",
        ),
        Some(Severity::High) => ("UNSAFE", "Contains ingredients considered harmful or allergenic."),
    };
    Verdict::Decided {
        status,
        harmful,
        explanation: explanation.to_string(),
    }
}
