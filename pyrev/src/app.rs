//! Central application state for pyrev.
//!
//! This module owns all mutable UI state: the active view, the input mode,
//! the analysis phase machine, the session store, the editable code buffer,
//! and per-view scroll offsets. No ratatui rendering logic lives here —
//! `app.rs` is pure state that is read by the render module and mutated by
//! the keybinding dispatcher and the event loop.

use ratatui::layout::Rect;
use ratatui::text::Line;

use pyrev_core::session::SessionStore;

use crate::review::types::{ReviewRequest, ReviewResultPayload};

/// The two named views of the application.
///
/// Switched by Tab, the `1` / `2` keys, or a mouse click on the tab bar.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Text area for loading or pasting Python source.
    #[default]
    CodeInput,
    /// Read-only view of the latest review report.
    AnalysisResults,
}

impl View {
    /// Title shown in the tab bar and on the body panel border.
    pub fn title(self) -> &'static str {
        match self {
            View::CodeInput => "Code Input",
            View::AnalysisResults => "Analysis Results",
        }
    }
}

/// Input mode controlling which keybinding set is active.
///
/// The default mode is `Normal`. Transitions are driven by the keybinding
/// dispatcher.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Navigation mode (default).
    #[default]
    Normal,
    /// Text entry into the code buffer (type or paste).
    Insert,
    /// File-path entry in the status line (`o` keybinding).
    OpenFile,
    /// Full-screen help overlay is shown above the active view.
    HelpOverlay,
}

/// Analysis phase machine.
///
/// Drives the Analyze guard and the guidance text in the results view. The
/// machine is re-enterable indefinitely within a session; there is no
/// terminal phase.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No source has been submitted yet this session.
    #[default]
    AwaitingInput,
    /// Source is present but no report has been produced for it.
    InputReady,
    /// A review request is in flight; the Analyze trigger is disabled.
    Analyzing,
    /// The latest report is stored and viewable.
    ReportReady,
}

/// Spinner frames for the status bar while a request is in flight.
pub const SPINNER_FRAMES: [char; 4] = ['|', '/', '-', '\\'];

/// All mutable UI state passed through every render cycle.
///
/// Bundled into one struct so the render function receives a single reference
/// and the keybinding dispatcher a single mutable reference.
pub struct AppState {
    /// Currently displayed view.
    pub view: View,
    /// Current input mode governing which keybindings are active.
    pub mode: Mode,
    /// Analysis phase — guards the Analyze trigger.
    pub phase: Phase,

    /// Session-scoped store for the last submitted code and last report.
    pub session: SessionStore,

    /// Editable text-area content. Mutated in Insert mode; submitted on Esc.
    pub code_buffer: String,
    /// Extension used for syntax highlighting; `py` unless a file with a
    /// different extension was loaded.
    pub source_ext: String,
    /// Pre-highlighted lines of the submitted source (input view content).
    pub code_lines: Vec<Line<'static>>,
    /// Path being typed in OpenFile mode.
    pub path_buffer: String,

    /// Vertical scroll offset for the code view.
    /// usize supports large files; clamped by the renderer to visible range.
    pub code_scroll: usize,
    /// Vertical scroll offset for the results `Paragraph` widget.
    pub report_scroll: u16,
    /// Vertical scroll offset for the help overlay.
    pub help_scroll: u16,

    /// Inner height of the body panel after borders, cached after each render.
    /// Used by half-page and full-page scroll calculations.
    pub body_viewport_height: u16,

    /// Tab bar hit areas, cached each render for mouse click-to-switch.
    pub tab_rects: [Rect; 2],

    /// One-line message shown on the right of the status bar (completion
    /// notices, guard messages, file-load errors). Replaced, never stacked.
    pub notice: Option<String>,
    /// False when no API credential was found at startup; the status bar
    /// shows a persistent warning and analysis returns the fixed message.
    pub key_configured: bool,
    /// Index into [`SPINNER_FRAMES`], advanced on Tick while `Analyzing`.
    pub spinner_frame: usize,

    /// Send half of the review worker channel. `None` only in tests that do
    /// not spawn a worker.
    pub review_tx: Option<crossbeam_channel::Sender<ReviewRequest>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            view: View::default(),
            mode: Mode::default(),
            phase: Phase::default(),
            session: SessionStore::new(),
            code_buffer: String::new(),
            source_ext: "py".to_owned(),
            code_lines: Vec::new(),
            path_buffer: String::new(),
            code_scroll: 0,
            report_scroll: 0,
            help_scroll: 0,
            body_viewport_height: 0,
            tab_rects: [Rect::default(); 2],
            notice: None,
            key_configured: false,
            spinner_frame: 0,
            review_tx: None,
        }
    }
}

impl AppState {
    /// Submits the current code buffer (Esc from Insert mode, or file load).
    ///
    /// A non-empty buffer re-highlights the source and moves the phase to
    /// `InputReady` — without clearing a stale report from the session store.
    /// An empty buffer is a no-op transition, so a fresh session stays in
    /// `AwaitingInput`.
    pub fn submit_code(&mut self) {
        self.code_lines = crate::highlight::highlight_source(&self.code_buffer, &self.source_ext);
        self.code_scroll = 0;
        if self.code_buffer.is_empty() {
            self.notice = Some("Nothing to submit — the code buffer is empty.".to_owned());
            return;
        }
        self.phase = Phase::InputReady;
        self.notice = Some("Code submitted. Press a to analyze.".to_owned());
    }

    /// Loads a file into the code buffer and submits it.
    ///
    /// Any extension is accepted and treated as text; only UTF-8 decoding is
    /// enforced. Read failures become a status notice with no state change.
    pub fn load_file(&mut self, path: &str) {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                self.source_ext = std::path::Path::new(path)
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("py")
                    .to_owned();
                self.code_buffer = contents;
                self.submit_code();
                self.notice = Some(format!("Loaded {path}. Press a to analyze."));
            }
            Err(err) => {
                self.notice = Some(format!("Could not read {path}: {err}"));
            }
        }
    }

    /// Attempts to start an analysis (the `a` keybinding).
    ///
    /// The trigger fires only in `InputReady` or `ReportReady` with a
    /// non-empty buffer: the current source is written to the session store,
    /// one request is sent to the review worker, and the phase moves to
    /// `Analyzing` until the result event arrives. All other phases are a
    /// guarded no-op — in particular a second press while `Analyzing`.
    ///
    /// Returns `true` when a request was sent.
    pub fn start_analysis(&mut self) -> bool {
        match self.phase {
            Phase::Analyzing => {
                self.notice = Some("Analysis already in progress.".to_owned());
                return false;
            }
            Phase::AwaitingInput => {
                self.notice = Some("Please load or paste your code first.".to_owned());
                return false;
            }
            Phase::InputReady | Phase::ReportReady => {}
        }
        if self.code_buffer.is_empty() {
            self.notice = Some("Please load or paste your code first.".to_owned());
            return false;
        }
        let Some(tx) = self.review_tx.as_ref() else {
            return false;
        };
        self.session.set_code(self.code_buffer.clone());
        let sent = tx
            .send(ReviewRequest::Analyze { code: self.code_buffer.clone() })
            .is_ok();
        if sent {
            self.phase = Phase::Analyzing;
            self.spinner_frame = 0;
            self.notice = Some("Analyzing your code with AI...".to_owned());
        }
        sent
    }

    /// Applies the received ReviewResultPayload to the state.
    ///
    /// Called from the `AppEvent::ReviewResult` arm in main.rs. Stores the
    /// report text — success and failure strings alike — and moves the phase
    /// to `ReportReady`.
    pub fn apply_review_result(&mut self, payload: ReviewResultPayload) {
        self.session.set_feedback(payload.report);
        self.phase = Phase::ReportReady;
        self.report_scroll = 0;
        self.notice = Some("Analysis complete! Open Analysis Results (press 2).".to_owned());
    }

    /// Guidance text for the results view, or `None` when a report exists.
    ///
    /// Before any submission this session the view asks for input first; a
    /// submission without a completed analysis asks to run one. Once a report
    /// is stored it is rendered even when it is stale for the current buffer.
    pub fn results_guidance(&self) -> Option<&'static str> {
        if self.phase == Phase::AwaitingInput {
            return Some("Please load or paste your code in the Code Input view to proceed.");
        }
        if self.session.feedback().is_none() {
            return Some("Run analysis from the Code Input view to see results here.");
        }
        None
    }

    /// Advances the status-bar spinner. Called on every logic Tick.
    pub fn on_tick(&mut self) {
        if self.phase == Phase::Analyzing {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
        }
    }

    /// Switches to `view`, leaving mode and phase untouched.
    pub fn switch_view(&mut self, view: View) {
        self.view = view;
    }

    /// Cycles to the other view (Tab keybinding).
    pub fn toggle_view(&mut self) {
        self.view = match self.view {
            View::CodeInput => View::AnalysisResults,
            View::AnalysisResults => View::CodeInput,
        };
    }

    /// Scrolls the active view down by `lines` rows.
    ///
    /// The code view uses a usize offset clamped by the renderer; the results
    /// view scrolls its `Paragraph` by a saturating u16 offset.
    pub fn scroll_down(&mut self, lines: u16) {
        match self.view {
            View::CodeInput => {
                self.code_scroll = self.code_scroll.saturating_add(lines as usize);
            }
            View::AnalysisResults => {
                self.report_scroll = self.report_scroll.saturating_add(lines);
            }
        }
    }

    /// Scrolls the active view up by `lines` rows.
    pub fn scroll_up(&mut self, lines: u16) {
        match self.view {
            View::CodeInput => {
                self.code_scroll = self.code_scroll.saturating_sub(lines as usize);
            }
            View::AnalysisResults => {
                self.report_scroll = self.report_scroll.saturating_sub(lines);
            }
        }
    }

    /// Scrolls the active view to the very top.
    pub fn scroll_top(&mut self) {
        match self.view {
            View::CodeInput => self.code_scroll = 0,
            View::AnalysisResults => self.report_scroll = 0,
        }
    }

    /// Scrolls the active view to the very bottom.
    ///
    /// The code view jumps to the last line index (clamped by the renderer);
    /// the results view sets `u16::MAX` and lets ratatui clamp.
    pub fn scroll_bottom(&mut self) {
        match self.view {
            View::CodeInput => {
                self.code_scroll = self.code_lines.len().saturating_sub(1);
            }
            View::AnalysisResults => self.report_scroll = u16::MAX,
        }
    }

    /// Scrolls the active view down by half its visible height.
    ///
    /// Uses the viewport height cached from the previous render. If the
    /// cached height is zero (first frame), scrolls by 1 to avoid a no-op.
    pub fn half_page_down(&mut self) {
        self.scroll_down((self.body_viewport_height / 2).max(1));
    }

    /// Scrolls the active view up by half its visible height.
    pub fn half_page_up(&mut self) {
        self.scroll_up((self.body_viewport_height / 2).max(1));
    }

    /// Scrolls the active view down by its full visible height (one page).
    pub fn full_page_down(&mut self) {
        self.scroll_down(self.body_viewport_height.max(1));
    }

    /// Scrolls the active view up by its full visible height (one page).
    pub fn full_page_up(&mut self) {
        self.scroll_up(self.body_viewport_height.max(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::types::ReviewRequest;

    fn state_with_worker() -> (AppState, crossbeam_channel::Receiver<ReviewRequest>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut state = AppState::default();
        state.review_tx = Some(tx);
        (state, rx)
    }

    #[test]
    fn fresh_session_awaits_input_and_guides_results_view() {
        let state = AppState::default();
        assert_eq!(state.phase, Phase::AwaitingInput);
        assert_eq!(
            state.results_guidance(),
            Some("Please load or paste your code in the Code Input view to proceed.")
        );
    }

    #[test]
    fn empty_submission_is_a_no_op() {
        let (mut state, rx) = state_with_worker();
        state.submit_code();
        assert_eq!(state.phase, Phase::AwaitingInput);
        assert!(!state.start_analysis());
        assert_eq!(state.phase, Phase::AwaitingInput);
        assert!(rx.try_recv().is_err(), "no request may be sent");
    }

    #[test]
    fn non_empty_submission_reaches_input_ready() {
        let (mut state, _rx) = state_with_worker();
        state.code_buffer = "def f(): pass".to_owned();
        state.submit_code();
        assert_eq!(state.phase, Phase::InputReady);
        // Submission alone does not touch the session store.
        assert_eq!(state.session.code(), None);
    }

    #[test]
    fn analyze_stores_code_and_sends_one_request() {
        let (mut state, rx) = state_with_worker();
        state.code_buffer = "def f(): pass".to_owned();
        state.submit_code();

        assert!(state.start_analysis());
        assert_eq!(state.phase, Phase::Analyzing);
        assert_eq!(state.session.code(), Some("def f(): pass"));
        match rx.try_recv().unwrap() {
            ReviewRequest::Analyze { code } => assert_eq!(code, "def f(): pass"),
        }
    }

    #[test]
    fn analyze_is_disabled_while_in_flight() {
        let (mut state, rx) = state_with_worker();
        state.code_buffer = "x = 1".to_owned();
        state.submit_code();
        assert!(state.start_analysis());
        assert!(!state.start_analysis(), "second trigger must be a no-op");
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err(), "exactly one request in flight");
    }

    #[test]
    fn result_moves_to_report_ready_and_stores_text_verbatim() {
        let (mut state, _rx) = state_with_worker();
        state.code_buffer = "def f(): pass".to_owned();
        state.submit_code();
        state.start_analysis();

        state.apply_review_result(ReviewResultPayload {
            code: "def f(): pass".to_owned(),
            report: "Looks fine. Rating: 80".to_owned(),
        });
        assert_eq!(state.phase, Phase::ReportReady);
        assert_eq!(state.session.feedback(), Some("Looks fine. Rating: 80"));
        assert_eq!(state.results_guidance(), None);
    }

    #[test]
    fn resubmission_keeps_stale_report_until_next_analysis() {
        let (mut state, _rx) = state_with_worker();
        state.code_buffer = "v1".to_owned();
        state.submit_code();
        state.start_analysis();
        state.apply_review_result(ReviewResultPayload {
            code: "v1".to_owned(),
            report: "report for v1".to_owned(),
        });

        state.code_buffer = "v2".to_owned();
        state.submit_code();
        assert_eq!(state.phase, Phase::InputReady);
        assert_eq!(state.session.feedback(), Some("report for v1"));
        assert_eq!(state.results_guidance(), None, "stale report stays visible");
    }

    #[test]
    fn failure_text_is_applied_like_a_report() {
        let (mut state, _rx) = state_with_worker();
        state.code_buffer = "import os".to_owned();
        state.submit_code();
        state.start_analysis();
        state.apply_review_result(ReviewResultPayload {
            code: "import os".to_owned(),
            report: "Error during AI analysis: connection refused".to_owned(),
        });
        assert_eq!(state.phase, Phase::ReportReady);
        assert_eq!(
            state.session.feedback(),
            Some("Error during AI analysis: connection refused")
        );
    }

    #[test]
    fn spinner_advances_only_while_analyzing() {
        let (mut state, _rx) = state_with_worker();
        state.on_tick();
        assert_eq!(state.spinner_frame, 0);
        state.code_buffer = "x = 1".to_owned();
        state.submit_code();
        state.start_analysis();
        state.on_tick();
        assert_eq!(state.spinner_frame, 1);
    }

    #[test]
    fn load_file_submits_contents_and_tracks_extension() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("snippet.py");
        std::fs::write(&path, "def g():\n    return 1\n").unwrap();

        let (mut state, _rx) = state_with_worker();
        state.load_file(&path.to_string_lossy());
        assert_eq!(state.phase, Phase::InputReady);
        assert_eq!(state.code_buffer, "def g():\n    return 1\n");
        assert_eq!(state.source_ext, "py");
    }

    #[test]
    fn load_file_failure_leaves_state_untouched() {
        let (mut state, _rx) = state_with_worker();
        state.load_file("/definitely/not/a/real/path.py");
        assert_eq!(state.phase, Phase::AwaitingInput);
        assert!(state.code_buffer.is_empty());
        assert!(state.notice.as_deref().unwrap().starts_with("Could not read"));
    }

    #[test]
    fn view_switching_and_toggle() {
        let mut state = AppState::default();
        state.toggle_view();
        assert_eq!(state.view, View::AnalysisResults);
        state.switch_view(View::CodeInput);
        assert_eq!(state.view, View::CodeInput);
    }
}
