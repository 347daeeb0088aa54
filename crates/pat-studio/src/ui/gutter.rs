//! Line number gutter.
//!
//! The gutter is derived from the buffer text alone, independently of the
//! highlighter: both re-run on every change, and neither consumes the
//! other's result. Vertical alignment with the editor follows the shared
//! scroll offset; nothing finer-grained is modeled.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Displayed line count: `max(1, number of newline characters)`.
///
/// Buffer text carries a terminal newline, so this equals the number of
/// lines in the buffer.
pub fn line_count(text: &str) -> usize {
    text.matches('\n').count().max(1)
}

/// Render the gutter column: integers from `scroll + 1` while they fit the
/// area, never past `line_count`. Prior content is fully replaced.
pub fn render_gutter(frame: &mut Frame, area: Rect, line_count: usize, scroll: usize) {
    let style = Style::default().fg(Color::DarkGray);
    let numbers: Vec<Line> = (scroll + 1..=line_count)
        .take(area.height as usize)
        .map(|n| Line::from(Span::styled(format!("{:>3} ", n), style)))
        .collect();
    frame.render_widget(Paragraph::new(numbers), area);
}
