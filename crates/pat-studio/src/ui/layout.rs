//! Screen layout for the studio.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Computed layout areas.
pub struct StudioLayout {
    /// Title/status line at top.
    pub header_area: Rect,
    /// Editor pane with gutter (left).
    pub editor_area: Rect,
    /// Console transcript pane (right).
    pub console_area: Rect,
    /// Key hint bar at bottom.
    pub menu_area: Rect,
}

impl StudioLayout {
    /// Compute layout areas from the frame size.
    ///
    /// ```text
    /// ┌─────────────────────────────────────────────┐
    /// │ PatternScript Studio                        │  <- Header (1 line)
    /// ├────────────────────────┬────────────────────┤
    /// │   1 note> demo         │ [Compiling...]     │
    /// │   2 ask name:          │ [Intermediate Code]│  <- Editor | Console
    /// │   3 plot "Hi " ~ name: │   ask name         │
    /// │                        │ ...                │
    /// ├────────────────────────┴────────────────────┤
    /// │ F5 RUN │ ^O OPEN │ ^L CLEAR │ ^Q QUIT       │  <- Menu
    /// └─────────────────────────────────────────────┘
    /// ```
    pub fn compute(frame_size: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(6),    // Main content area
                Constraint::Length(1), // Menu
            ])
            .split(frame_size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(55), // Editor
                Constraint::Percentage(45), // Console
            ])
            .split(rows[1]);

        Self {
            header_area: rows[0],
            editor_area: columns[0],
            console_area: columns[1],
            menu_area: rows[2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_fills_the_frame() {
        let layout = StudioLayout::compute(Rect::new(0, 0, 100, 40));
        assert_eq!(layout.header_area.height, 1);
        assert_eq!(layout.menu_area.height, 1);
        assert_eq!(layout.editor_area.height, 38);
        assert_eq!(
            layout.editor_area.width + layout.console_area.width,
            100
        );
    }
}
