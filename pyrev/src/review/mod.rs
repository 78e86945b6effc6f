//! Background review pipeline.
//!
//! The outbound chat-completions call is the one slow operation in pyrev, so
//! it runs on a dedicated worker thread that owns the HTTP client for its
//! lifetime. All communication is via channels: `ReviewRequest` in,
//! `AppEvent::ReviewResult` out.

pub mod types;
pub mod worker;
