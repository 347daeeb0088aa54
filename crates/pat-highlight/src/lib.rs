//! Syntax highlighting for PatternScript source text.
//!
//! Highlighting is rule-table driven: an ordered list of (pattern, style)
//! rules is scanned against the whole buffer, and overlaps resolve by an
//! explicit policy - **the last rule in table order whose pattern matches a
//! character determines that character's style**. Table order is priority;
//! the table is fixed configuration and never changes at run time.
//!
//! The scan is a pure function of the buffer text. It runs in full on every
//! buffer change; there is no incremental rescanning.

mod rules;
mod scan;
mod style;

pub use rules::{HighlightRule, default_rules};
pub use scan::{LineSegment, StyleSpan, line_segments, resolve_styles, scan};
pub use style::HighlightStyle;
