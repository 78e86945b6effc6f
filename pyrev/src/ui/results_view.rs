//! Analysis Results view renderer for pyrev.
//!
//! Renders the stored review report as a wrapped `Paragraph` scrolled by the
//! manual `u16` offset. When no report can be shown yet, phase-dependent
//! guidance from `AppState::results_guidance` appears instead: submit-first
//! before any submission this session, run-analysis after a submission with
//! no completed analysis.

use ratatui::{
    style::Style,
    text::Text,
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::app::AppState;
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

/// Renders the Analysis Results body panel.
///
/// The report text is rendered verbatim — the view does not distinguish a
/// model reply from the not-configured message or a failure string.
pub fn render_results(
    frame: &mut Frame,
    area: ratatui::layout::Rect,
    state: &AppState,
    theme: &Theme,
) {
    let block = panel_block("Analysis Results", theme);
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    if let Some(guidance) = state.results_guidance() {
        let paragraph = Paragraph::new(Text::raw(guidance))
            .style(Style::default().fg(theme.guidance))
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, inner);
        return;
    }

    // results_guidance() returned None, so a report is present.
    let report = state.session.feedback().unwrap_or_default();
    let paragraph = Paragraph::new(Text::raw(report.to_owned()))
        .style(Style::default().fg(theme.report_text))
        .wrap(Wrap { trim: false })
        .scroll((state.report_scroll, 0));
    frame.render_widget(paragraph, inner);
}
