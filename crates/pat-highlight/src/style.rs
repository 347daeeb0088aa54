/// Highlight classification of a matched span.
///
/// The set is closed: every rule in the table maps to one of these, and the
/// renderer maps each to a color.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HighlightStyle {
    Keyword,
    Function,
    String,
    Number,
    Comment,
    Operator,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_is_copy_and_comparable() {
        let style = HighlightStyle::Keyword;
        let copy = style;
        assert_eq!(style, copy);
        assert_ne!(HighlightStyle::Comment, HighlightStyle::Operator);
    }
}
