use std::fmt;

use food_core::{Panel, StatusBadge};

/// `#rrggbb` to an RGB triple. Anything malformed yields `None` and the badge
/// is printed uncolored.
fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Badge painted with 24-bit ANSI foreground and background colors.
pub fn paint_badge(badge: &StatusBadge) -> String {
    let colors = hex_rgb(badge.presentation.foreground).zip(hex_rgb(badge.presentation.background));
    match colors {
        Some(((fr, fg, fb), (br, bg, bb))) => format!(
            "\x1b[1;38;2;{fr};{fg};{fb};48;2;{br};{bg};{bb}m {} \x1b[0m",
            badge.label()
        ),
        None => badge.to_string(),
    }
}

/// Plain-text panel, with the badge colored when `color` is set.
pub fn render_text(panel: &Panel, color: bool) -> Result<String, fmt::Error> {
    let mut out = String::new();
    if color {
        panel.write_with(&mut out, paint_badge)?;
    } else {
        panel.write_with(&mut out, |badge| badge.to_string())?;
    }
    Ok(out)
}

pub fn render_json(panel: &Panel) -> serde_json::Result<String> {
    serde_json::to_string_pretty(panel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use food_core::SafetyStatus;

    #[test]
    fn hex_parsing() {
        assert_eq!(hex_rgb("#10b981"), Some((0x10, 0xb9, 0x81)));
        assert_eq!(hex_rgb("10b981"), None);
        assert_eq!(hex_rgb("#zzzzzz"), None);
    }

    #[test]
    fn painted_badge_uses_status_colors() {
        let painted = paint_badge(&StatusBadge::new(&SafetyStatus::Unsafe));
        assert!(painted.contains("38;2;239;68;68"));
        assert!(painted.contains("48;2;254;226;226"));
        assert!(painted.contains("✗ UNSAFE"));
    }

    #[test]
    fn uncolored_text_matches_core_layout() {
        let panel = Panel::Clarification {
            message: "Need more info".to_string(),
        };
        assert_eq!(render_text(&panel, true).unwrap(), panel.to_string());
        assert_eq!(render_text(&panel, false).unwrap(), panel.to_string());
    }

    #[test]
    fn colored_decision_only_changes_the_badge_line() {
        let panel = Panel::Decision {
            product_name: Some("Nutella".to_string()),
            badge: StatusBadge::new(&SafetyStatus::Caution),
            explanation: "High sugar".to_string(),
            harmful_ingredients: vec!["Palm Oil".to_string()],
        };
        let plain = render_text(&panel, false).unwrap();
        let colored = render_text(&panel, true).unwrap();
        assert_eq!(plain, panel.to_string());

        let plain_lines: Vec<&str> = plain.lines().collect();
        let colored_lines: Vec<&str> = colored.lines().collect();
        assert_eq!(plain_lines.len(), colored_lines.len());
        for (i, (p, c)) in plain_lines.iter().zip(&colored_lines).enumerate() {
            if i == 1 {
                assert!(c.contains("\x1b[") && c.contains("⚠ CONSUME WITH CAUTION"), "{c}");
            } else {
                assert_eq!(p, c);
            }
        }
    }

    #[test]
    fn json_carries_badge_colors() {
        let panel = Panel::Decision {
            product_name: None,
            badge: StatusBadge::new(&SafetyStatus::from("WEIRD")),
            explanation: "Hmm".to_string(),
            harmful_ingredients: Vec::new(),
        };
        let value: serde_json::Value = serde_json::from_str(&render_json(&panel).unwrap()).unwrap();
        assert_eq!(value["panel"], "decision");
        assert_eq!(value["badge"]["status"], "WEIRD");
        assert_eq!(value["badge"]["label"], serde_json::Value::Null);
        assert_eq!(value["badge"]["foreground"], "#6b7280");
    }
}
