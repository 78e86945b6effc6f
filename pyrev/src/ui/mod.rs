//! UI rendering module for pyrev.
//!
//! This is the module root for `ui/`. It re-exports `render()` as the single
//! entry point called by the event loop's `terminal.draw()` closure.
//!
//! All layout arithmetic lives in `layout.rs`. The two views render in
//! `input_view.rs` and `results_view.rs`; keybinding dispatch is in
//! `keybindings.rs`.

mod layout;
pub mod help;
pub mod input_view;
pub mod keybindings;
pub mod results_view;

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{AppState, Mode, View};
use crate::theme::Theme;
use layout::{compute_layout, inner_rect, render_status_bar, tab_bar_rects};

/// Renders one complete frame: tab bar, active view, and status bar.
///
/// Called exactly once per `AppEvent::Render` inside `terminal.draw()`. This
/// is the only location where `terminal.draw()` is called in the application.
///
/// After computing the layout, the body viewport height and the tab hit
/// areas are written back into `state` so that scroll operations and mouse
/// clicks triggered by the *next* event can use them. The one-frame lag is
/// imperceptible in practice.
pub fn render(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let [tab_bar, body, status_bar] = compute_layout(frame);

    // Cache geometry BEFORE rendering so it is available for the next
    // keypress/click cycle. inner_rect() strips the 1-cell body border.
    state.body_viewport_height = inner_rect(body).height;
    state.tab_rects = tab_bar_rects(tab_bar);

    render_tab_bar(frame, tab_bar, state, theme);

    match state.view {
        View::CodeInput => input_view::render_input(frame, body, state, theme),
        View::AnalysisResults => results_view::render_results(frame, body, state, theme),
    }

    // Status bar: always visible, 1 row, shows mode / phase / notices.
    render_status_bar(frame, status_bar, state, theme);

    // Help overlay: rendered after the view so it sits on top.
    // Clear is called inside render_help_overlay() to erase the background.
    if state.mode == Mode::HelpOverlay {
        help::render_help_overlay(frame, theme, state.help_scroll);
    }
}

/// Renders the 1-row tab bar with both view titles.
///
/// The active tab is bold in `theme.tab_active`; the inactive tab uses
/// `theme.tab_inactive`. Hit areas for mouse switching come from
/// `tab_bar_rects` and are cached in `AppState` by [`render`].
fn render_tab_bar(frame: &mut Frame, area: ratatui::layout::Rect, state: &AppState, theme: &Theme) {
    let tab_span = |view: View| {
        let selected = state.view == view;
        let style = if selected {
            Style::default().fg(theme.tab_active).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.tab_inactive)
        };
        Span::styled(format!(" {} ", view.title()), style)
    };

    let line = Line::from(vec![
        tab_span(View::CodeInput),
        Span::raw(" "),
        tab_span(View::AnalysisResults),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
