//! Core logic for pyrev — everything that does not touch the terminal.
//!
//! Three small pieces live here so the TUI crate stays presentation-only:
//!
//! - [`prompt`] — wraps submitted source code in the fixed review-instruction
//!   template sent to the model.
//! - [`review`] — the [`review::Reviewer`] trait and the OpenAI-backed
//!   [`review::ReviewClient`]. Failures never escape as errors; they are
//!   resolved to display strings at this boundary.
//! - [`session`] — the per-process [`session::SessionStore`] holding the last
//!   submitted code and the last produced feedback.

pub mod prompt;
pub mod review;
pub mod session;
