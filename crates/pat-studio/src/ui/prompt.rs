//! Modal line prompts: the script input request and the file-open dialog.
//!
//! A prompt runs its own event loop on the caller's stack, so the whole
//! pipeline - and the UI - blocks until the user answers. There is no
//! timeout and no way to cancel from outside; Esc dismisses.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::EditorView;

/// Resolve one script input request through a modal prompt labeled with the
/// variable name.
///
/// This is the studio half of the interpreter's input seam: the run wraps
/// this in a closure and injects it as the input provider. Dismissal
/// resolves to the empty string, as does a terminal failure - the
/// interpreter never sees either as an error.
pub fn input_request(
    terminal: &mut DefaultTerminal,
    view: &EditorView<'_>,
    name: &str,
) -> String {
    let label = format!("Script is asking for: '{}'", name);
    match prompt_line(terminal, view, " Input Request ", &label) {
        Ok(Some(text)) => text,
        Ok(None) | Err(_) => String::new(),
    }
}

/// Run a modal single-line prompt until Enter (`Some(text)`) or Esc
/// (`None`). The studio UI is redrawn behind the overlay on every key.
pub fn prompt_line(
    terminal: &mut DefaultTerminal,
    view: &EditorView<'_>,
    title: &str,
    label: &str,
) -> io::Result<Option<String>> {
    let mut value = String::new();
    loop {
        terminal.draw(|frame| {
            super::render_frame(frame, view, &[], None, false);
            render_overlay(frame, title, label, &value);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match (key.modifiers, key.code) {
                (KeyModifiers::NONE, KeyCode::Enter) => return Ok(Some(value)),
                (KeyModifiers::NONE, KeyCode::Esc) => return Ok(None),
                (KeyModifiers::NONE, KeyCode::Backspace) => {
                    value.pop();
                }
                (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
                    value.push(c);
                }
                _ => {}
            }
        }
    }
}

/// Draw the centered prompt overlay: label line plus input line.
fn render_overlay(frame: &mut Frame, title: &str, label: &str, value: &str) {
    let area = frame.area();
    let width = (label.len() as u16 + 6).max(40).min(area.width);
    let height = 4.min(area.height);
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;
    let overlay = Rect::new(x, y, width, height);

    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(86, 156, 214)));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let lines = vec![
        Line::from(Span::raw(label.to_string())),
        Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::DarkGray)),
            Span::raw(value.to_string()),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), inner);

    // Cursor at the end of the typed value.
    if inner.height > 1 {
        let cursor_x = inner.x + 2 + value.chars().count() as u16;
        frame.set_cursor_position((cursor_x.min(inner.x + inner.width), inner.y + 1));
    }
}
