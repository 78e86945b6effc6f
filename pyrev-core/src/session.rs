//! Per-process session storage.
//!
//! Exactly two slots: the last submitted source (`code`) and the last
//! produced review (`feedback`). Both are unconditional overwrites on set.
//! Nothing is persisted — the store lives and dies with the process.

/// Holds the most recent input/output pair for one session.
///
/// An absent slot (`None`) is distinct from an empty string: `None` means the
/// slot has never been written this session, while `Some("")` is a stored
/// empty value. The results view relies on this to tell "nothing submitted
/// yet" apart from "the model returned nothing".
#[derive(Debug, Default)]
pub struct SessionStore {
    code: Option<String>,
    feedback: Option<String>,
}

impl SessionStore {
    /// Creates an empty store with both slots absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// The last submitted source text, if any has been submitted.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Overwrites the stored source text.
    ///
    /// Does not touch the feedback slot — a stale report stays visible until
    /// a new analysis completes.
    pub fn set_code(&mut self, code: String) {
        self.code = Some(code);
    }

    /// The last stored review report, if any analysis has completed.
    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    /// Overwrites the stored review report.
    pub fn set_feedback(&mut self, feedback: String) {
        self.feedback = Some(feedback);
    }
}
