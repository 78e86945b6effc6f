//! Outbound call to the chat-completions service.
//!
//! [`ReviewClient`] issues exactly one blocking HTTPS request per invocation
//! and resolves every failure to a user-facing string before returning —
//! callers never see an error type. The [`Reviewer`] trait is the seam the
//! TUI's worker thread talks through, so tests can substitute a stub.

use std::env;

use thiserror::Error;

/// Returned by [`Reviewer::analyze`] when no API key is configured.
///
/// Missing configuration is non-fatal: the client degrades to this fixed
/// message and never attempts network I/O.
pub const NOT_CONFIGURED_MESSAGE: &str =
    "OpenAI API key not found. Set the OPENAI_API_KEY environment variable \
     to enable AI code analysis.";

/// Prefix for every failure string produced by [`Reviewer::analyze`].
pub const FAILURE_PREFIX: &str = "Error during AI analysis: ";

/// Model requested when the config file does not override it.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// API base URL used when the config file does not override it.
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Environment variable holding the API credential.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Anything that can turn a built prompt into review text.
///
/// Implementations must return display-ready text for every input — success
/// replies, the not-configured message, and failure strings all come back
/// through the same channel. The UI deliberately does not distinguish them.
pub trait Reviewer: Send {
    /// Produces review text for `prompt`. Never fails.
    fn analyze(&self, prompt: &str) -> String;
}

/// Failure modes of one chat-completions request.
///
/// Internal to the client: every variant is rendered into a
/// [`FAILURE_PREFIX`]-prefixed string before it reaches a caller.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// Connection, TLS, or request-serialisation failure from the HTTP layer.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status (auth, quota, 5xx).
    #[error("API returned HTTP {status}: {body}")]
    Api {
        /// HTTP status code of the reply.
        status: reqwest::StatusCode,
        /// Raw response body, passed through for the user to read.
        body: String,
    },

    /// The reply parsed as JSON but had no `choices[0].message.content`.
    #[error("response contained no message content")]
    MalformedResponse,
}

/// One-shot client for the chat-completions endpoint.
///
/// Holds the credential read once at startup. No retries, no caching of
/// identical prompts, and no timeout beyond reqwest's default.
pub struct ReviewClient {
    api_key: Option<String>,
    model: String,
    api_base: String,
    http: reqwest::blocking::Client,
}

impl ReviewClient {
    /// Creates a client with an explicit credential, model, and API base.
    ///
    /// `api_key: None` produces a degraded client that answers every request
    /// with [`NOT_CONFIGURED_MESSAGE`] and performs no I/O.
    pub fn new(api_key: Option<String>, model: String, api_base: String) -> Self {
        Self {
            api_key,
            model,
            api_base,
            http: reqwest::blocking::Client::new(),
        }
    }

    /// Creates a client from the `OPENAI_API_KEY` environment variable.
    ///
    /// An unset or empty variable yields the degraded not-configured client;
    /// startup never fails on a missing credential.
    pub fn from_env(model: String, api_base: String) -> Self {
        let api_key = env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty());
        Self::new(api_key, model, api_base)
    }

    /// True when a credential is present and real requests will be attempted.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Issues the single chat-completions POST and extracts the reply text.
    ///
    /// The request carries the model identifier and one user-role message.
    /// The reply's first choice content is returned verbatim — no length or
    /// content validation.
    fn request_review(&self, api_key: &str, prompt: &str) -> Result<String, ReviewError> {
        let url = format!("{}/chat/completions", self.api_base.trim_end_matches('/'));
        let payload = serde_json::json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let response = self
            .http
            .post(url)
            .bearer_auth(api_key)
            .json(&payload)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ReviewError::Api { status, body });
        }

        let body: serde_json::Value = response.json()?;
        body["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_owned)
            .ok_or(ReviewError::MalformedResponse)
    }
}

impl Reviewer for ReviewClient {
    /// Runs one review request and resolves the outcome to display text.
    ///
    /// No credential short-circuits to the fixed message with zero network
    /// calls. Any failure is caught here and rendered with [`FAILURE_PREFIX`]
    /// plus the underlying cause — nothing propagates as an error.
    fn analyze(&self, prompt: &str) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            return NOT_CONFIGURED_MESSAGE.to_owned();
        };
        match self.request_review(api_key, prompt) {
            Ok(text) => text,
            Err(err) => format_failure(&err),
        }
    }
}

/// Renders a [`ReviewError`] as the user-facing failure string.
fn format_failure(err: &ReviewError) -> String {
    format!("{FAILURE_PREFIX}{err}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unconfigured_client() -> ReviewClient {
        ReviewClient::new(None, DEFAULT_MODEL.to_owned(), DEFAULT_API_BASE.to_owned())
    }

    #[test]
    fn missing_key_returns_fixed_message() {
        let client = unconfigured_client();
        assert_eq!(client.analyze("review this"), NOT_CONFIGURED_MESSAGE);
    }

    #[test]
    fn missing_key_covers_empty_input_too() {
        let client = unconfigured_client();
        assert_eq!(client.analyze(""), NOT_CONFIGURED_MESSAGE);
    }

    #[test]
    fn missing_key_client_reports_unconfigured() {
        assert!(!unconfigured_client().is_configured());
        let configured = ReviewClient::new(
            Some("sk-test".to_owned()),
            DEFAULT_MODEL.to_owned(),
            DEFAULT_API_BASE.to_owned(),
        );
        assert!(configured.is_configured());
    }

    #[test]
    fn failure_string_carries_prefix_and_cause() {
        let err = ReviewError::Api {
            status: reqwest::StatusCode::UNAUTHORIZED,
            body: "invalid api key".to_owned(),
        };
        let text = format_failure(&err);
        assert!(text.starts_with(FAILURE_PREFIX));
        assert!(text.contains("401"));
        assert!(text.contains("invalid api key"));
    }

    #[test]
    fn malformed_response_failure_is_readable() {
        let text = format_failure(&ReviewError::MalformedResponse);
        assert_eq!(
            text,
            "Error during AI analysis: response contained no message content"
        );
    }
}
