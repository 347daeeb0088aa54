//! The highlight rule table.

use regex::Regex;

use crate::style::HighlightStyle;

/// One (pattern, style) rule. Position in the table is priority: on
/// overlap, the later rule wins.
pub struct HighlightRule {
    pattern: Regex,
    style: HighlightStyle,
}

impl HighlightRule {
    /// Compile a rule from a pattern.
    ///
    /// The table is fixed, trusted configuration; a pattern that fails to
    /// compile is a defect in this file, so construction panics rather than
    /// returning a `Result` nobody could recover from.
    fn new(pattern: &str, style: HighlightStyle) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("fixed rule pattern must compile"),
            style,
        }
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn style(&self) -> HighlightStyle {
        self.style
    }
}

/// The PatternScript rule table, in priority order (later wins on overlap).
pub fn default_rules() -> Vec<HighlightRule> {
    vec![
        HighlightRule::new(
            r"\b(loop|check|else|choose|default|in)\b",
            HighlightStyle::Keyword,
        ),
        HighlightRule::new(r"\b(plot|ask)\b", HighlightStyle::Function),
        HighlightRule::new(r#"".*?""#, HighlightStyle::String),
        HighlightRule::new(r"\b\d+\b", HighlightStyle::Number),
        HighlightRule::new(r"note>.*", HighlightStyle::Comment),
        HighlightRule::new(r"->|~", HighlightStyle::Operator),
    ]
}
