//! UI rendering for the studio (editor left, console right).

pub mod console;
pub mod gutter;
mod layout;
pub mod prompt;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use pat_highlight::{HighlightStyle, line_segments};
use pat_session::ConsoleEntry;

use crate::app::App;
use crate::editor::EditorBuffer;
use layout::StudioLayout;

/// Width of the gutter column, including its trailing space.
const GUTTER_WIDTH: u16 = 4;

/// The editor pane's inputs, split out from [`App`] so a modal prompt can
/// redraw the UI while the session is mutably borrowed by a run.
pub struct EditorView<'a> {
    pub editor: &'a EditorBuffer,
    pub styles: &'a [Option<HighlightStyle>],
    pub line_count: usize,
    pub show_cursor: bool,
}

impl<'a> EditorView<'a> {
    pub fn of(app: &'a App, show_cursor: bool) -> Self {
        Self {
            editor: &app.editor,
            styles: &app.styles,
            line_count: app.line_count,
            show_cursor,
        }
    }
}

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    render_frame(
        frame,
        &EditorView::of(app, true),
        app.session.transcript(),
        app.status.as_deref(),
        app.dirty,
    );
}

/// Render the full frame from parts.
pub fn render_frame(
    frame: &mut Frame,
    view: &EditorView<'_>,
    transcript: &[ConsoleEntry],
    status: Option<&str>,
    dirty: bool,
) {
    let layout = StudioLayout::compute(frame.area());
    render_header(frame, layout.header_area, status, dirty);
    render_editor(frame, view, layout.editor_area);
    console::render_console(frame, transcript, layout.console_area);
    render_menu(frame, layout.menu_area);
}

/// Render the header line: title plus an optional status message.
fn render_header(frame: &mut Frame, area: Rect, status: Option<&str>, dirty: bool) {
    let dirty_indicator = if dirty { " *" } else { "" };
    let title = format!(" PatternScript Studio{}", dirty_indicator);

    let mut spans = vec![Span::styled(
        title.clone(),
        Style::default()
            .fg(Color::Rgb(86, 156, 214))
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(status) = status {
        let pad = area
            .width
            .saturating_sub(title.len() as u16 + status.len() as u16 + 1) as usize;
        spans.push(Span::raw(" ".repeat(pad)));
        spans.push(Span::styled(
            status.to_string(),
            Style::default().fg(Color::Yellow),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the editor pane: bordered block, gutter column, highlighted text.
fn render_editor(frame: &mut Frame, view: &EditorView<'_>, area: Rect) {
    let border_color = if view.show_cursor {
        Color::Green
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .title(" Editor ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width <= GUTTER_WIDTH || inner.height == 0 {
        return;
    }

    let (cursor_row, _) = view.editor.cursor_pos();
    let visible = inner.height as usize;
    let scroll = if view.show_cursor && cursor_row >= visible {
        cursor_row - visible + 1
    } else {
        0
    };

    let gutter_area = Rect {
        width: GUTTER_WIDTH,
        ..inner
    };
    gutter::render_gutter(frame, gutter_area, view.line_count, scroll);

    let text_area = Rect {
        x: inner.x + GUTTER_WIDTH,
        width: inner.width - GUTTER_WIDTH,
        ..inner
    };
    render_editor_text(frame, view, text_area, scroll);

    if view.show_cursor {
        let cursor_x = text_area.x + view.editor.cursor_display_col() as u16;
        let cursor_y = text_area.y + (cursor_row - scroll) as u16;
        if cursor_y < text_area.y + text_area.height
            && cursor_x < text_area.x + text_area.width
        {
            frame.set_cursor_position((cursor_x, cursor_y));
        }
    }
}

/// Render buffer lines with their resolved highlight segments.
fn render_editor_text(frame: &mut Frame, view: &EditorView<'_>, area: Rect, scroll: usize) {
    let lines = view.editor.lines();

    // Byte offset of each line start within the buffer's canonical text.
    let mut offset = 0usize;
    let mut display: Vec<Line> = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        let start = offset;
        offset += line.len() + 1;
        if i < scroll || display.len() >= area.height as usize {
            continue;
        }
        let mut spans: Vec<Span> = Vec::new();
        for seg in line_segments(start..start + line.len(), view.styles) {
            let text = &line[seg.start - start..seg.end - start];
            spans.push(match seg.style {
                Some(style) => Span::styled(
                    text.to_string(),
                    Style::default().fg(style_color(style)),
                ),
                None => Span::raw(text.to_string()),
            });
        }
        display.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(display), area);
}

/// Color for each highlight style (VS Code Dark+ palette).
fn style_color(style: HighlightStyle) -> Color {
    match style {
        HighlightStyle::Keyword => Color::Rgb(86, 156, 214),
        HighlightStyle::Function => Color::Rgb(220, 220, 170),
        HighlightStyle::String => Color::Rgb(206, 145, 120),
        HighlightStyle::Number => Color::Rgb(181, 206, 168),
        HighlightStyle::Comment => Color::Rgb(106, 153, 85),
        HighlightStyle::Operator => Color::Rgb(212, 212, 212),
    }
}

/// Render the key hint bar.
fn render_menu(frame: &mut Frame, area: Rect) {
    let items = ["F5 RUN", "^O OPEN", "^L CLEAR", "^Q QUIT"];
    let mut spans: Vec<Span> = Vec::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            *item,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));
    }
    let paragraph =
        Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Rgb(37, 37, 38)));
    frame.render_widget(paragraph, area);
}
