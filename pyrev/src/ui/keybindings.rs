//! Keybinding dispatcher for pyrev.
//!
//! Translates raw crossterm `KeyEvent`s into `AppState` mutations and
//! returns a `KeyAction` telling the event loop whether to continue or quit.
//! The dispatcher branches first on `state.mode` so that HelpOverlay,
//! Insert, OpenFile, and Normal all have isolated handler functions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use crate::app::{AppState, Mode, Phase, View};

/// Control-flow signal returned from the key dispatcher.
///
/// The event loop checks this after every keypress: `Quit` tears down the
/// terminal and exits; `Continue` keeps the loop running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Continue the event loop normally.
    Continue,
    /// Exit cleanly.
    Quit,
}

/// Dispatches a key event to the handler matching the current mode.
///
/// Mutates `state` in place and returns a `KeyAction` signalling whether to
/// continue or quit. The event loop should call this once per received key.
pub fn handle_key(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match state.mode {
        Mode::HelpOverlay => handle_help(key, state),
        Mode::Insert => handle_insert(key, state),
        Mode::OpenFile => handle_open_file(key, state),
        Mode::Normal => handle_normal(key, state),
    }
}

// ---------------------------------------------------------------------------
// Normal mode
// ---------------------------------------------------------------------------

/// Handles a key event while in Normal mode.
///
/// Delegates scroll keys to `handle_scroll_key` and handles view switching,
/// input entry, the Analyze trigger, and mode transitions inline.
fn handle_normal(key: KeyEvent, state: &mut AppState) -> KeyAction {
    // Try scroll keys first (j/k/g/G/Ctrl-d/u/f/b).
    if let Some(action) = handle_scroll_key(key, state) {
        return action;
    }

    match key.code {
        // View switching
        KeyCode::Tab => {
            state.toggle_view();
            KeyAction::Continue
        }
        KeyCode::Char('1') => {
            state.switch_view(View::CodeInput);
            KeyAction::Continue
        }
        KeyCode::Char('2') => {
            state.switch_view(View::AnalysisResults);
            KeyAction::Continue
        }

        // Input entry — editing is held off while a request is in flight so
        // the in-flight snapshot and the buffer cannot drift mid-analysis.
        KeyCode::Char('i') => {
            if state.phase == Phase::Analyzing {
                state.notice = Some("Analysis in progress — wait for the result.".to_owned());
            } else {
                state.mode = Mode::Insert;
                state.view = View::CodeInput;
            }
            KeyAction::Continue
        }
        KeyCode::Char('o') => {
            if state.phase == Phase::Analyzing {
                state.notice = Some("Analysis in progress — wait for the result.".to_owned());
            } else {
                state.mode = Mode::OpenFile;
                state.view = View::CodeInput;
                state.path_buffer.clear();
            }
            KeyAction::Continue
        }

        // Analyze trigger — all guards live in start_analysis().
        KeyCode::Char('a') => {
            state.start_analysis();
            KeyAction::Continue
        }

        // Help overlay
        KeyCode::Char('?') => {
            state.help_scroll = 0;
            state.mode = Mode::HelpOverlay;
            KeyAction::Continue
        }

        // Quit
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,

        _ => KeyAction::Continue,
    }
}

/// Handles scroll-related keys in Normal mode: j / k / g / G and Ctrl combos.
///
/// Returns `Some(KeyAction)` when the key was consumed, `None` when the key
/// should fall through to the rest of the Normal handler.
fn handle_scroll_key(key: KeyEvent, state: &mut AppState) -> Option<KeyAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('j') => {
            state.scroll_down(1);
            Some(KeyAction::Continue)
        }
        KeyCode::Char('k') => {
            state.scroll_up(1);
            Some(KeyAction::Continue)
        }
        KeyCode::Char('g') => {
            state.scroll_top();
            Some(KeyAction::Continue)
        }
        KeyCode::Char('G') => {
            state.scroll_bottom();
            Some(KeyAction::Continue)
        }
        KeyCode::Char('d') if ctrl => {
            state.half_page_down();
            Some(KeyAction::Continue)
        }
        KeyCode::Char('u') if ctrl => {
            state.half_page_up();
            Some(KeyAction::Continue)
        }
        KeyCode::Char('f') if ctrl => {
            state.full_page_down();
            Some(KeyAction::Continue)
        }
        KeyCode::Char('b') if ctrl => {
            state.full_page_up();
            Some(KeyAction::Continue)
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Insert mode
// ---------------------------------------------------------------------------

/// Handles a key event while in Insert mode (code buffer editing).
///
/// Append-only editing: typed characters (including pasted ones, which
/// arrive as individual key events) go to the end of the buffer. `Esc`
/// submits the buffer and returns to Normal mode.
fn handle_insert(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Esc => {
            state.mode = Mode::Normal;
            state.submit_code();
        }
        KeyCode::Enter => state.code_buffer.push('\n'),
        KeyCode::Backspace => {
            state.code_buffer.pop();
        }
        // Four spaces — it's Python.
        KeyCode::Tab => state.code_buffer.push_str("    "),
        KeyCode::Char(c) => state.code_buffer.push(c),
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// OpenFile mode
// ---------------------------------------------------------------------------

/// Handles a key event while the file-path prompt is active.
///
/// `Enter` loads the typed path (read failures become a status notice);
/// `Esc` cancels. Either way the mode returns to Normal.
fn handle_open_file(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Esc => state.mode = Mode::Normal,
        KeyCode::Enter => {
            state.mode = Mode::Normal;
            if !state.path_buffer.is_empty() {
                let path = state.path_buffer.clone();
                state.load_file(&path);
            }
        }
        KeyCode::Backspace => {
            state.path_buffer.pop();
        }
        KeyCode::Char(c) => state.path_buffer.push(c),
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// HelpOverlay mode
// ---------------------------------------------------------------------------

/// Handles a key event while the help overlay is visible.
///
/// Any of `?`, `Esc`, or `q` dismisses the overlay and returns to Normal
/// mode. j/k/g/G scroll the overlay; all other keys are silently ignored.
fn handle_help(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('j') => {
            state.help_scroll = state.help_scroll.saturating_add(1);
            KeyAction::Continue
        }
        KeyCode::Char('k') => {
            state.help_scroll = state.help_scroll.saturating_sub(1);
            KeyAction::Continue
        }
        KeyCode::Char('g') => {
            state.help_scroll = 0;
            KeyAction::Continue
        }
        KeyCode::Char('G') => {
            state.help_scroll = u16::MAX;
            KeyAction::Continue
        }
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => {
            state.mode = Mode::Normal;
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}

// ---------------------------------------------------------------------------
// Mouse events
// ---------------------------------------------------------------------------

/// Handles a mouse event: tab click-to-switch and scroll-wheel.
///
/// Left click on a tab label switches views. Scroll wheel up/down scrolls
/// the active view by 3 lines (matching typical terminal scroll speed), or
/// the help overlay when it is open.
pub fn handle_mouse(mouse: MouseEvent, state: &mut AppState) -> KeyAction {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            handle_mouse_click(mouse.column, mouse.row, state)
        }
        MouseEventKind::ScrollUp => handle_mouse_scroll_up(state),
        MouseEventKind::ScrollDown => handle_mouse_scroll_down(state),
        _ => KeyAction::Continue,
    }
}

/// Switches views when a tab label is clicked.
///
/// Checks the tab hit areas cached in `state.tab_rects` by the renderer.
fn handle_mouse_click(col: u16, row: u16, state: &mut AppState) -> KeyAction {
    let pos = Position { x: col, y: row };
    let [input_tab, results_tab] = state.tab_rects;

    if input_tab.contains(pos) {
        state.switch_view(View::CodeInput);
    } else if results_tab.contains(pos) {
        state.switch_view(View::AnalysisResults);
    }

    KeyAction::Continue
}

/// Scrolls up by 3 lines. Scrolls the help overlay when it is open.
fn handle_mouse_scroll_up(state: &mut AppState) -> KeyAction {
    if state.mode == Mode::HelpOverlay {
        state.help_scroll = state.help_scroll.saturating_sub(3);
    } else {
        state.scroll_up(3);
    }
    KeyAction::Continue
}

/// Scrolls down by 3 lines. Scrolls the help overlay when it is open.
fn handle_mouse_scroll_down(state: &mut AppState) -> KeyAction {
    if state.mode == Mode::HelpOverlay {
        state.help_scroll = state.help_scroll.saturating_add(3);
    } else {
        state.scroll_down(3);
    }
    KeyAction::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::types::ReviewRequest;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn state_with_worker() -> (AppState, crossbeam_channel::Receiver<ReviewRequest>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut state = AppState::default();
        state.review_tx = Some(tx);
        (state, rx)
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            let code = if c == '\n' { KeyCode::Enter } else { KeyCode::Char(c) };
            handle_key(key(code), state);
        }
    }

    #[test]
    fn tab_and_number_keys_switch_views() {
        let mut state = AppState::default();
        handle_key(key(KeyCode::Tab), &mut state);
        assert_eq!(state.view, View::AnalysisResults);
        handle_key(key(KeyCode::Char('1')), &mut state);
        assert_eq!(state.view, View::CodeInput);
        handle_key(key(KeyCode::Char('2')), &mut state);
        assert_eq!(state.view, View::AnalysisResults);
    }

    #[test]
    fn insert_mode_edits_and_esc_submits() {
        let (mut state, _rx) = state_with_worker();
        handle_key(key(KeyCode::Char('i')), &mut state);
        assert_eq!(state.mode, Mode::Insert);

        type_text(&mut state, "def f():\n    pass");
        handle_key(key(KeyCode::Esc), &mut state);

        assert_eq!(state.mode, Mode::Normal);
        assert_eq!(state.code_buffer, "def f():\n    pass");
        assert_eq!(state.phase, Phase::InputReady);
    }

    #[test]
    fn insert_backspace_and_tab() {
        let (mut state, _rx) = state_with_worker();
        handle_key(key(KeyCode::Char('i')), &mut state);
        type_text(&mut state, "xy");
        handle_key(key(KeyCode::Backspace), &mut state);
        handle_key(key(KeyCode::Tab), &mut state);
        assert_eq!(state.code_buffer, "x    ");
    }

    #[test]
    fn analyze_key_is_a_no_op_before_any_submission() {
        let (mut state, rx) = state_with_worker();
        handle_key(key(KeyCode::Char('a')), &mut state);
        assert_eq!(state.phase, Phase::AwaitingInput);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn analyze_key_sends_request_after_submission() {
        let (mut state, rx) = state_with_worker();
        handle_key(key(KeyCode::Char('i')), &mut state);
        type_text(&mut state, "x = 1");
        handle_key(key(KeyCode::Esc), &mut state);

        handle_key(key(KeyCode::Char('a')), &mut state);
        assert_eq!(state.phase, Phase::Analyzing);
        assert!(rx.try_recv().is_ok());

        // A second press while in flight is guarded.
        handle_key(key(KeyCode::Char('a')), &mut state);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn editing_is_guarded_while_analyzing() {
        let (mut state, _rx) = state_with_worker();
        handle_key(key(KeyCode::Char('i')), &mut state);
        type_text(&mut state, "x = 1");
        handle_key(key(KeyCode::Esc), &mut state);
        handle_key(key(KeyCode::Char('a')), &mut state);

        handle_key(key(KeyCode::Char('i')), &mut state);
        assert_eq!(state.mode, Mode::Normal, "insert is refused while analyzing");
        handle_key(key(KeyCode::Char('o')), &mut state);
        assert_eq!(state.mode, Mode::Normal, "open-file is refused while analyzing");
    }

    #[test]
    fn open_file_prompt_loads_a_real_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("sample.py");
        std::fs::write(&path, "print('ok')\n").unwrap();

        let (mut state, _rx) = state_with_worker();
        handle_key(key(KeyCode::Char('o')), &mut state);
        assert_eq!(state.mode, Mode::OpenFile);
        type_text(&mut state, &path.to_string_lossy());
        handle_key(key(KeyCode::Enter), &mut state);

        assert_eq!(state.mode, Mode::Normal);
        assert_eq!(state.code_buffer, "print('ok')\n");
        assert_eq!(state.phase, Phase::InputReady);
    }

    #[test]
    fn open_file_esc_cancels_without_loading() {
        let (mut state, _rx) = state_with_worker();
        handle_key(key(KeyCode::Char('o')), &mut state);
        type_text(&mut state, "/tmp/whatever.py");
        handle_key(key(KeyCode::Esc), &mut state);
        assert_eq!(state.mode, Mode::Normal);
        assert!(state.code_buffer.is_empty());
        assert_eq!(state.phase, Phase::AwaitingInput);
    }

    #[test]
    fn help_overlay_opens_and_dismisses() {
        let mut state = AppState::default();
        handle_key(key(KeyCode::Char('?')), &mut state);
        assert_eq!(state.mode, Mode::HelpOverlay);
        handle_key(key(KeyCode::Char('j')), &mut state);
        assert_eq!(state.help_scroll, 1);
        handle_key(key(KeyCode::Esc), &mut state);
        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn q_quits_from_normal_mode() {
        let mut state = AppState::default();
        assert_eq!(handle_key(key(KeyCode::Char('q')), &mut state), KeyAction::Quit);
    }

    #[test]
    fn scroll_keys_move_the_results_view() {
        let mut state = AppState::default();
        state.switch_view(View::AnalysisResults);
        handle_key(key(KeyCode::Char('j')), &mut state);
        handle_key(key(KeyCode::Char('j')), &mut state);
        assert_eq!(state.report_scroll, 2);
        handle_key(key(KeyCode::Char('k')), &mut state);
        assert_eq!(state.report_scroll, 1);
        handle_key(key(KeyCode::Char('g')), &mut state);
        assert_eq!(state.report_scroll, 0);
    }
}
