//! Full-buffer scanning and overlap resolution.

use std::ops::Range;

use smallvec::SmallVec;

use crate::rules::HighlightRule;
use crate::style::HighlightStyle;

/// A styled byte range produced by one rule match. Spans from different
/// rules may overlap; resolution happens in [`resolve_styles`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleSpan {
    pub start: usize,
    pub end: usize,
    pub style: HighlightStyle,
}

/// Scan the whole buffer against the rule table.
///
/// For each rule in table order, every non-overlapping match across the
/// entire text becomes a span. The output is rule-major: all spans of rule
/// N precede all spans of rule N+1, which is what gives later rules their
/// priority during resolution.
pub fn scan(text: &str, rules: &[HighlightRule]) -> Vec<StyleSpan> {
    let mut spans = Vec::new();
    for rule in rules {
        for m in rule.pattern().find_iter(text) {
            spans.push(StyleSpan {
                start: m.start(),
                end: m.end(),
                style: rule.style(),
            });
        }
    }
    spans
}

/// Resolve overlapping spans to one style per byte.
///
/// Spans are applied in the order produced by [`scan`], each overwriting
/// whatever earlier spans put on the same bytes - so the last rule in table
/// order wins on overlap. This is the load-bearing policy, not a rendering
/// accident; see the crate docs.
pub fn resolve_styles(text_len: usize, spans: &[StyleSpan]) -> Vec<Option<HighlightStyle>> {
    let mut styles = vec![None; text_len];
    for span in spans {
        let end = span.end.min(text_len);
        for slot in &mut styles[span.start.min(end)..end] {
            *slot = Some(span.style);
        }
    }
    styles
}

/// A run of consecutive bytes sharing one resolved style. Offsets are
/// absolute into the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSegment {
    pub start: usize,
    pub end: usize,
    pub style: Option<HighlightStyle>,
}

/// Group one line's resolved byte styles into renderable segments.
///
/// `range` is the line's byte range in the scanned text. Segment boundaries
/// fall where the resolved style changes; since rule matches start and end
/// on character boundaries, so do segments.
pub fn line_segments(
    range: Range<usize>,
    styles: &[Option<HighlightStyle>],
) -> SmallVec<[LineSegment; 8]> {
    let mut segments = SmallVec::new();
    let end = range.end.min(styles.len());
    let mut pos = range.start.min(end);
    while pos < end {
        let style = styles[pos];
        let mut seg_end = pos + 1;
        while seg_end < end && styles[seg_end] == style {
            seg_end += 1;
        }
        segments.push(LineSegment {
            start: pos,
            end: seg_end,
            style,
        });
        pos = seg_end;
    }
    segments
}
