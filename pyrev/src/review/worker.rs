//! Background thread that owns the Reviewer for its lifetime.
//!
//! The blocking HTTP client must not run on the tokio runtime threads, so it
//! is constructed and driven inside a plain `std::thread`. All communication
//! is via channels: `ReviewRequest` in, `AppEvent::ReviewResult` out.

use crossbeam_channel::Receiver;
use tokio::sync::mpsc::UnboundedSender;

use pyrev_core::prompt::build_review_prompt;
use pyrev_core::review::Reviewer;

use crate::event::AppEvent;
use crate::review::types::{ReviewRequest, ReviewResultPayload};

/// Entry point for the background thread that owns the Reviewer.
///
/// Loops over incoming `ReviewRequest` messages until the channel is closed
/// (sender dropped). Each request makes exactly one call through the
/// Reviewer — prompt built first, reply returned verbatim — and the result
/// is sent back via `event_tx` as `AppEvent::ReviewResult`. The Reviewer
/// contract guarantees a displayable string for every outcome, so the worker
/// has no error path of its own.
pub fn review_worker_loop(
    reviewer: impl Reviewer,
    rx: Receiver<ReviewRequest>,
    event_tx: UnboundedSender<AppEvent>,
) {
    for request in rx {
        let payload = handle_request(&reviewer, request);
        let _ = event_tx.send(AppEvent::ReviewResult(Box::new(payload)));
    }
}

/// Runs one request through the prompt builder and the Reviewer.
fn handle_request(reviewer: &dyn Reviewer, request: ReviewRequest) -> ReviewResultPayload {
    match request {
        ReviewRequest::Analyze { code } => {
            let prompt = build_review_prompt(&code);
            let report = reviewer.analyze(&prompt);
            ReviewResultPayload { code, report }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Stub reviewer returning a canned reply regardless of prompt.
    struct StubReviewer(&'static str);

    impl Reviewer for StubReviewer {
        fn analyze(&self, _prompt: &str) -> String {
            self.0.to_owned()
        }
    }

    /// Reviewer that echoes the prompt back, for asserting what it was given.
    struct EchoReviewer;

    impl Reviewer for EchoReviewer {
        fn analyze(&self, prompt: &str) -> String {
            prompt.to_owned()
        }
    }

    #[test]
    fn worker_round_trips_one_request() {
        let (req_tx, req_rx) = crossbeam_channel::unbounded();
        let (event_tx, mut event_rx) = tokio::sync::mpsc::unbounded_channel();

        let handle = std::thread::spawn(move || {
            review_worker_loop(StubReviewer("Looks fine. Rating: 80"), req_rx, event_tx);
        });

        req_tx
            .send(ReviewRequest::Analyze { code: "def f(): pass".to_owned() })
            .unwrap();
        drop(req_tx);

        match event_rx.blocking_recv().unwrap() {
            AppEvent::ReviewResult(payload) => {
                assert_eq!(payload.code, "def f(): pass");
                assert_eq!(payload.report, "Looks fine. Rating: 80");
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(event_rx.blocking_recv().is_none(), "worker exits on channel close");
        handle.join().unwrap();
    }

    #[test]
    fn worker_feeds_reviewer_the_built_prompt() {
        let (req_tx, req_rx) = crossbeam_channel::unbounded();
        let (event_tx, mut event_rx) = tokio::sync::mpsc::unbounded_channel();

        let handle = std::thread::spawn(move || {
            review_worker_loop(EchoReviewer, req_rx, event_tx);
        });

        req_tx
            .send(ReviewRequest::Analyze { code: "x = [1, 2]".to_owned() })
            .unwrap();
        drop(req_tx);

        match event_rx.blocking_recv().unwrap() {
            AppEvent::ReviewResult(payload) => {
                assert_eq!(payload.report, build_review_prompt("x = [1, 2]"));
            }
            other => panic!("unexpected event: {other:?}"),
        }
        handle.join().unwrap();
    }
}
