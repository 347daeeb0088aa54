//! Console transcript pane.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use pat_session::{ConsoleEntry, EntryStyle};

/// Color for each transcript entry style (VS Code Dark+ palette).
fn entry_color(style: EntryStyle) -> Color {
    match style {
        EntryStyle::Info => Color::Rgb(86, 156, 214),
        EntryStyle::Tac => Color::Rgb(220, 220, 170),
        EntryStyle::Success => Color::Rgb(106, 153, 85),
        EntryStyle::Error => Color::Rgb(244, 71, 71),
        EntryStyle::Plain => Color::Rgb(204, 204, 204),
    }
}

/// Render the transcript, pinned to the bottom like a terminal.
///
/// Multi-line entries (captured script output) split into one display line
/// per embedded line break.
pub fn render_console(frame: &mut Frame, transcript: &[ConsoleEntry], area: Rect) {
    let block = Block::default().title(" Console ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    for entry in transcript {
        let style = Style::default().fg(entry_color(entry.style));
        for text in entry.text.lines() {
            lines.push(Line::from(Span::styled(text.to_string(), style)));
        }
    }

    // Keep the newest lines visible.
    let visible = inner.height as usize;
    let skip = lines.len().saturating_sub(visible);
    let paragraph = Paragraph::new(lines.split_off(skip));
    frame.render_widget(paragraph, inner);
}
