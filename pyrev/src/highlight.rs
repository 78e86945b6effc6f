//! Syntax highlighting for the submitted source.
//!
//! Converts the code buffer into owned `ratatui::text::Line` values once per
//! submission, so the render path never touches syntect. The syntax and
//! theme sets are process-wide LazyLock statics; [`warm_up`] initialises
//! them at startup to avoid first-submission latency.

use std::sync::LazyLock;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;

static PS: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static TS: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Eagerly initialises the LazyLock statics.
///
/// Called once during startup, before the first frame, so that submitting
/// code never stalls on loading syntax definitions.
pub fn warm_up() {
    let _ = &*PS;
    let _ = &*TS;
}

/// Highlights `code` into owned ratatui lines using the syntax for `ext`.
///
/// Unknown extensions fall back to plain text; a missing highlight theme
/// falls back to unstyled lines. Always returns one `Line` per source line.
pub fn highlight_source(code: &str, ext: &str) -> Vec<Line<'static>> {
    let syntax = PS
        .find_syntax_by_extension(ext)
        .unwrap_or_else(|| PS.find_syntax_plain_text());
    let theme = TS.themes.get("base16-ocean.dark").or_else(|| TS.themes.values().next());

    let Some(theme) = theme else {
        return code.lines().map(|l| Line::raw(l.to_owned())).collect();
    };

    let mut h = HighlightLines::new(syntax, theme);
    code.lines().map(|line| Line::from(build_syntect_spans(line, &mut h, &PS))).collect()
}

/// Builds syntect-highlighted spans for a single line of code.
///
/// Returns owned `Vec<Span<'static>>`. Falls back to a plain unstyled span on
/// highlighter error.
fn build_syntect_spans(code: &str, h: &mut HighlightLines, ps: &SyntaxSet) -> Vec<Span<'static>> {
    let ranges = h.highlight_line(code, ps).unwrap_or_default();
    let spans: Vec<Span<'static>> =
        ranges.into_iter().map(|(style, text)| syntect_to_span(style, text)).collect();
    if spans.is_empty() {
        vec![Span::raw(code.to_owned())]
    } else {
        spans
    }
}

/// Converts a syntect (Style, &str) pair to an owned ratatui Span.
///
/// Rebuilds color and modifier fields from syntect types into ratatui types
/// by hand — the two crates share no style vocabulary.
fn syntect_to_span(style: syntect::highlighting::Style, content: &str) -> Span<'static> {
    use syntect::highlighting::Color as SC;
    let to_color = |c: SC| -> Option<Color> {
        if c.a > 0 { Some(Color::Rgb(c.r, c.g, c.b)) } else { None }
    };
    let mut ratatui_style = Style::default();
    if let Some(fg) = to_color(style.foreground) {
        ratatui_style = ratatui_style.fg(fg);
    }
    if style.font_style.contains(syntect::highlighting::FontStyle::BOLD) {
        ratatui_style = ratatui_style.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(syntect::highlighting::FontStyle::ITALIC) {
        ratatui_style = ratatui_style.add_modifier(Modifier::ITALIC);
    }
    if style.font_style.contains(syntect::highlighting::FontStyle::UNDERLINE) {
        ratatui_style = ratatui_style.add_modifier(Modifier::UNDERLINED);
    }
    Span::styled(content.to_owned(), ratatui_style)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_output_line_per_source_line() {
        let lines = highlight_source("def f():\n    return 1\n", "py");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn content_survives_highlighting() {
        let lines = highlight_source("return 42", "py");
        let flat: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(flat, "return 42");
    }

    #[test]
    fn unknown_extension_falls_back_to_plain_text() {
        let lines = highlight_source("anything at all", "nosuchext");
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn empty_input_yields_no_lines() {
        assert!(highlight_source("", "py").is_empty());
    }
}
