//! Layout engine for pyrev.
//!
//! This module is pure layout arithmetic — no mutable application state
//! lives here. It is called inside `terminal.draw()` on every render so
//! every frame gets a fresh layout that automatically reflects the current
//! terminal size.
//!
//! The vertical arrangement is fixed: a 1-row tab bar, the body panel
//! filling the remaining height, and a 1-row status bar.

use ratatui::{
    layout::{Constraint, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
    Frame,
};

use crate::app::{AppState, Mode, Phase, SPINNER_FRAMES};
use crate::theme::Theme;

/// Returns `[tab_bar, body, status_bar]` `Rect`s for the current frame.
///
/// Called inside `terminal.draw()` on every render. The returned rects are
/// valid only for the current draw closure — never store them across frames
/// (the tab hit areas cached in `AppState` are refreshed every frame).
pub fn compute_layout(frame: &Frame) -> [Rect; 3] {
    frame.area().layout(&Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ]))
}

/// Splits the tab bar row into the two tab hit areas.
///
/// Widths cover the rendered `" Code Input "` and `" Analysis Results "`
/// labels plus the single separator column between them.
pub fn tab_bar_rects(tab_bar: Rect) -> [Rect; 2] {
    let [first, _gap, second, _rest] = tab_bar.layout(&Layout::horizontal([
        Constraint::Length(12),
        Constraint::Length(1),
        Constraint::Length(18),
        Constraint::Fill(1),
    ]));
    [first, second]
}

/// Returns the inner `Rect` of a panel after removing the 1-cell border.
///
/// Used to cache the body viewport height in `AppState` before the view is
/// rendered, so half-page and full-page scroll distances are available at
/// keypress time.
pub fn inner_rect(area: Rect) -> Rect {
    area.inner(Margin { vertical: 1, horizontal: 1 })
}

/// Builds the bordered `Block` for the body panel.
pub fn panel_block<'a>(title: &'a str, theme: &'a Theme) -> Block<'a> {
    Block::bordered()
        .title(title)
        .border_type(BorderType::Plain)
        .border_style(Style::default().fg(theme.border_active))
}

/// Renders the 1-row status bar at the bottom of the terminal.
///
/// Always shows a mode indicator. While a request is in flight a spinner and
/// "Analyzing" label follow it. A persistent warning appears when no API
/// credential was found at startup. In OpenFile mode the bar becomes the
/// path prompt; otherwise the latest notice (if any) fills the remainder.
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let (mode_text, mode_fg) = match state.mode {
        Mode::Insert => (" INSERT ", theme.status_mode_insert),
        Mode::OpenFile => (" OPEN ", theme.status_mode_insert),
        Mode::Normal | Mode::HelpOverlay => (" NORMAL ", theme.status_mode_normal),
    };

    let mut spans = vec![Span::styled(
        mode_text,
        Style::default().fg(mode_fg).add_modifier(Modifier::BOLD),
    )];

    if state.phase == Phase::Analyzing {
        spans.push(Span::styled(
            format!(" {} Analyzing... ", SPINNER_FRAMES[state.spinner_frame]),
            Style::default().fg(theme.spinner),
        ));
    }

    if !state.key_configured {
        spans.push(Span::styled(
            " OPENAI_API_KEY not set — analysis will return a notice ",
            Style::default().fg(theme.warning),
        ));
    }

    if state.mode == Mode::OpenFile {
        spans.push(Span::raw(format!(" Open file: {}_", state.path_buffer)));
    } else if let Some(notice) = &state.notice {
        spans.push(Span::raw(format!(" {notice}")));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg)),
        area,
    );
}
