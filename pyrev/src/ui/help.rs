//! Help overlay renderer for pyrev.
//!
//! Provides `render_help_overlay()` which draws a centred modal box over the
//! active view using ratatui's `Clear` widget to erase the background first.
//! The overlay is rendered inside the same `terminal.draw()` closure as the
//! rest of the frame — calling `frame.render_widget(Clear, area)` before the
//! bordered `Paragraph` achieves the modal effect without a second draw call.

use ratatui::{
    layout::Constraint,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme::Theme;

/// Renders the help overlay as a centred modal on top of the active view.
///
/// Erases the overlay area with `Clear`, then draws a bordered `Block` and a
/// `Paragraph` containing all keybinding descriptions. The paragraph scrolls
/// vertically by `help_scroll` rows, enabling navigation of the help text on
/// short terminals.
///
/// If the terminal is narrower than 60 columns the overlay is skipped to
/// avoid a zero-height `Rect` panic.
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, help_scroll: u16) {
    // Guard: skip on very narrow terminals to prevent zero-height Rect.
    if frame.area().width < 60 {
        return;
    }

    let overlay_area = frame
        .area()
        .centered(Constraint::Percentage(80), Constraint::Percentage(80));

    // Erase the background behind the modal before drawing content.
    frame.render_widget(Clear, overlay_area);

    let block = Block::bordered()
        .title(" Help  — j/k scroll, ? or Esc to dismiss ")
        .border_style(ratatui::style::Style::default().fg(theme.border_active));

    frame.render_widget(
        Paragraph::new(build_help_text())
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((help_scroll, 0)),
        overlay_area,
    );
}

/// Builds the help text as a multi-line `Text` value.
///
/// Returns all keybinding descriptions grouped by section. No color styling
/// is applied to the body text.
fn build_help_text() -> Text<'static> {
    Text::from(vec![
        Line::from("Views"),
        Line::from("  Tab           Switch between Code Input and Analysis Results"),
        Line::from("  1 / 2         Jump to Code Input / Analysis Results"),
        Line::from(""),
        Line::from("Code Input"),
        Line::from("  i             Type or paste code (Esc submits)"),
        Line::from("  o             Open a file by path (Enter loads, Esc cancels)"),
        Line::from("  a             Analyze the submitted code"),
        Line::from(""),
        Line::from("Navigation"),
        Line::from("  j / k         Scroll down / up one line"),
        Line::from("  g / G         Jump to top / bottom"),
        Line::from("  Ctrl-d / u    Scroll half page down / up"),
        Line::from("  Ctrl-f / b    Scroll full page down / up"),
        Line::from(""),
        Line::from("General"),
        Line::from("  j / k         Scroll this help overlay"),
        Line::from("  ?             Open / close this help overlay"),
        Line::from("  q / Esc       Quit"),
    ])
}
