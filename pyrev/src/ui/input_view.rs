//! Code Input view renderer for pyrev.
//!
//! Renders the submitted source with syntax highlighting using a List widget
//! with manual virtual scrolling: only lines[code_scroll..code_scroll+height]
//! are passed to the List per frame, so rendering stays O(viewport) for
//! large files. In Insert mode the raw buffer is shown instead, pinned to
//! the end so the typing position is always visible.

use ratatui::{
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

use crate::app::{AppState, Mode};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

/// Renders the Code Input body panel.
///
/// Three content states:
/// - Insert mode: the live buffer with a cursor marker on the last line.
/// - Empty buffer: keybinding guidance placeholder.
/// - Submitted code: virtual-scrolled highlighted lines, line count in the
///   panel title.
pub fn render_input(frame: &mut Frame, area: ratatui::layout::Rect, state: &AppState, theme: &Theme) {
    let inner = inner_rect(area);
    let viewport_height = inner.height as usize;

    if state.mode == Mode::Insert {
        let block = panel_block("Code Input — typing (Esc submits)", theme);
        frame.render_widget(block, area);
        render_live_buffer(frame, inner, state, viewport_height);
        return;
    }

    if state.code_lines.is_empty() {
        let block = panel_block("Code Input", theme);
        frame.render_widget(block, area);
        let guidance = Style::default().fg(theme.guidance);
        let items = vec![
            ListItem::new(Line::styled("Upload or paste your Python code.", guidance)),
            ListItem::new(Line::raw("")),
            ListItem::new(Line::styled("  i    type or paste code", guidance)),
            ListItem::new(Line::styled("  o    open a .py file", guidance)),
            ListItem::new(Line::styled("  a    analyze the submitted code", guidance)),
        ];
        frame.render_widget(List::new(items), inner);
        return;
    }

    let title = format!("Code Input ({} lines)", state.code_lines.len());
    let block = panel_block(&title, theme);
    frame.render_widget(block, area);

    let total = state.code_lines.len();
    let visible_start = state.code_scroll.min(total.saturating_sub(1));
    let visible_end = (visible_start + viewport_height).min(total);

    let items: Vec<ListItem> = state.code_lines[visible_start..visible_end]
        .iter()
        .map(|l| ListItem::new(l.clone()))
        .collect();

    frame.render_widget(List::new(items), inner);
}

/// Renders the in-progress buffer during Insert mode.
///
/// No highlighting while typing — plain text with a block cursor appended to
/// the final line. The window follows the end of the buffer so the cursor
/// never scrolls out of view.
fn render_live_buffer(
    frame: &mut Frame,
    inner: ratatui::layout::Rect,
    state: &AppState,
    viewport_height: usize,
) {
    let mut lines: Vec<Line<'static>> = state
        .code_buffer
        .split('\n')
        .map(|l| Line::raw(l.to_owned()))
        .collect();
    if let Some(last) = lines.last_mut() {
        last.spans.push(Span::raw("█"));
    }

    let start = lines.len().saturating_sub(viewport_height);
    let items: Vec<ListItem> = lines
        .into_iter()
        .skip(start)
        .map(ListItem::new)
        .collect();
    frame.render_widget(List::new(items), inner);
}
