//! Owned data types for the review worker thread.
//!
//! Both types are fully owned (no borrowed lifetimes) and `Send` so they can
//! cross from the main UI thread to the worker and back.

/// Commands sent from the main thread to the review worker thread.
///
/// Sent over a `crossbeam_channel::Sender<ReviewRequest>` owned by the main
/// thread. The worker builds the prompt and performs the outbound call.
#[derive(Debug)]
pub enum ReviewRequest {
    /// Analyze one snapshot of the submitted source.
    Analyze {
        /// The source text exactly as submitted.
        code: String,
    },
}

/// Result payload sent from the review worker back to the main thread.
///
/// Carried inside `AppEvent::ReviewResult(Box<ReviewResultPayload>)`. Using
/// `Box` keeps the enum variant small on the channel, since reports can be
/// long.
#[derive(Debug)]
pub struct ReviewResultPayload {
    /// The source text this report was produced for. May already be stale
    /// relative to the code buffer when the result arrives; that is expected.
    pub code: String,
    /// The review text — a model reply, the not-configured message, or a
    /// failure string. The UI renders all three identically.
    pub report: String,
}
