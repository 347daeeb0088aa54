//! Application state for the studio.

use std::fs;
use std::path::Path;

use pat_highlight::{HighlightRule, HighlightStyle, default_rules, resolve_styles, scan};
use pat_session::Session;

use crate::editor::EditorBuffer;
use crate::ui::gutter;

const DEFAULT_SCRIPT: &str = r#"note> PatternScript demo
ask name:
plot "Hello " ~ name:

loop i in 1..6 {
    check i > 3 {
        plot "Number " ~ i:
    }
}
"#;

/// Application state.
pub struct App {
    /// The source buffer being edited.
    pub editor: EditorBuffer,
    /// The pipeline runner and its console transcript.
    pub session: Session,
    /// Highlight rule table, fixed for the session.
    rules: Vec<HighlightRule>,
    /// Resolved style per byte of `editor.text()`, rebuilt on every edit.
    pub styles: Vec<Option<HighlightStyle>>,
    /// Gutter line count, rebuilt on every edit.
    pub line_count: usize,
    /// Transient status message (file errors, load confirmations).
    pub status: Option<String>,
    /// Whether the buffer changed since the last load.
    pub dirty: bool,
    /// Whether the app is still running.
    pub running: bool,
}

impl App {
    /// Create the app with the demo script loaded.
    pub fn new() -> Self {
        let mut app = Self {
            editor: EditorBuffer::with_content(DEFAULT_SCRIPT),
            session: Session::new(),
            rules: default_rules(),
            styles: Vec::new(),
            line_count: 1,
            status: None,
            dirty: false,
            running: true,
        };
        app.buffer_changed();
        app
    }

    /// Re-derive everything that follows the buffer: highlight styles and
    /// the gutter line count. The two derivations are independent - neither
    /// consumes the other's result - and both run on every change.
    pub fn buffer_changed(&mut self) {
        let text = self.editor.text();
        let spans = scan(&text, &self.rules);
        self.styles = resolve_styles(text.len(), &spans);
        self.line_count = gutter::line_count(&text);
    }

    /// Mark an edit: recompute derived state and set the dirty flag.
    pub fn edited(&mut self) {
        self.dirty = true;
        self.status = None;
        self.buffer_changed();
    }

    /// Load a file into the buffer, replacing its content entirely.
    pub fn load_file(&mut self, path: &str) {
        match fs::read_to_string(Path::new(path)) {
            Ok(content) => {
                self.editor.replace(&content);
                self.dirty = false;
                self.status = Some(format!("loaded {}", path));
                self.buffer_changed();
            }
            Err(e) => {
                self.status = Some(format!("cannot open {}: {}", path, e));
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_app_has_highlighted_demo_script() {
        let app = App::new();
        assert!(!app.editor.is_empty());
        assert_eq!(app.styles.len(), app.editor.text().len());
        assert!(app.styles.iter().any(|s| s.is_some()));
    }

    #[test]
    fn line_count_follows_edits() {
        let mut app = App::new();
        app.editor.replace("one line");
        app.edited();
        assert_eq!(app.line_count, 1);
        app.editor.insert_newline();
        app.edited();
        assert_eq!(app.line_count, 2);
    }

    #[test]
    fn highlighting_same_buffer_twice_is_identical() {
        let mut app = App::new();
        let first = app.styles.clone();
        app.buffer_changed();
        assert_eq!(app.styles, first);
    }

    #[test]
    fn failed_load_sets_status_and_keeps_buffer() {
        let mut app = App::new();
        let before = app.editor.text();
        app.load_file("/no/such/file.pat");
        assert!(app.status.as_deref().unwrap().starts_with("cannot open"));
        assert_eq!(app.editor.text(), before);
    }
}
