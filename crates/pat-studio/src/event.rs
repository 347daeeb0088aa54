//! Event loop and input handling.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;

use crate::app::App;
use crate::ui::{self, EditorView, prompt};

/// Run the main event loop.
pub fn run_event_loop(app: &mut App) -> io::Result<()> {
    let mut terminal = ratatui::init();
    let result = run_loop(&mut terminal, app);
    ratatui::restore();
    result
}

fn run_loop(terminal: &mut DefaultTerminal, app: &mut App) -> io::Result<()> {
    while app.running {
        // Draw UI
        terminal.draw(|frame| {
            ui::render(frame, app);
        })?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
        {
            // Only handle key press events (not release on Windows)
            if key.kind != KeyEventKind::Press {
                continue;
            }
            handle_key(app, terminal, key.modifiers, key.code)?;
        }
    }
    Ok(())
}

fn handle_key(
    app: &mut App,
    terminal: &mut DefaultTerminal,
    modifiers: KeyModifiers,
    code: KeyCode,
) -> io::Result<()> {
    match (modifiers, code) {
        (KeyModifiers::CONTROL, KeyCode::Char('q')) => {
            app.running = false;
        }

        // Run the current buffer
        (KeyModifiers::NONE, KeyCode::F(5)) => {
            run_pipeline(app, terminal)?;
        }

        // Load a file over the buffer
        (KeyModifiers::CONTROL, KeyCode::Char('o')) => {
            open_file(app, terminal)?;
        }

        // Clear the console transcript
        (KeyModifiers::CONTROL, KeyCode::Char('l')) => {
            app.session.clear_transcript();
        }

        // Cursor movement
        (KeyModifiers::NONE, KeyCode::Up) => app.editor.move_up(),
        (KeyModifiers::NONE, KeyCode::Down) => app.editor.move_down(),
        (KeyModifiers::NONE, KeyCode::Left) => app.editor.move_left(),
        (KeyModifiers::NONE, KeyCode::Right) => app.editor.move_right(),
        (KeyModifiers::NONE, KeyCode::Home) => app.editor.move_to_line_start(),
        (KeyModifiers::NONE, KeyCode::End) => app.editor.move_to_line_end(),

        // Editing
        (KeyModifiers::NONE, KeyCode::Enter) => {
            app.editor.insert_newline();
            app.edited();
        }
        (KeyModifiers::NONE, KeyCode::Backspace) => {
            app.editor.backspace();
            app.edited();
        }
        (KeyModifiers::NONE, KeyCode::Delete) => {
            app.editor.delete();
            app.edited();
        }
        (KeyModifiers::NONE, KeyCode::Tab) => {
            app.editor.insert_str("    ");
            app.edited();
        }
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            app.editor.insert_char(c);
            app.edited();
        }

        _ => {}
    }
    Ok(())
}

/// Run the pipeline over the current buffer.
///
/// This call blocks until the run and every prompt it raises complete; the
/// event loop is not serviced meanwhile, which is what serializes runs. Keys
/// typed during the run are drained afterwards so buffered input cannot
/// trigger a second run or edit the buffer unseen.
fn run_pipeline(app: &mut App, terminal: &mut DefaultTerminal) -> io::Result<()> {
    let code = app.editor.text();
    let App {
        session,
        editor,
        styles,
        line_count,
        ..
    } = app;
    let view = EditorView {
        editor: &*editor,
        styles: styles.as_slice(),
        line_count: *line_count,
        show_cursor: false,
    };
    let mut input = |name: &str| prompt::input_request(terminal, &view, name);
    session.run(&code, &mut input);

    while event::poll(Duration::ZERO)? {
        let _ = event::read()?;
    }
    Ok(())
}

/// Prompt for a path and load the file into the buffer.
fn open_file(app: &mut App, terminal: &mut DefaultTerminal) -> io::Result<()> {
    let path = {
        let view = EditorView::of(app, false);
        prompt::prompt_line(terminal, &view, " Open File ", "Path to load:")?
    };
    if let Some(path) = path {
        let path = path.trim();
        if !path.is_empty() {
            app.load_file(path);
        }
    }
    Ok(())
}
