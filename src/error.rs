//! Error types for webfanyi operations.

use std::fmt;
use thiserror::Error;

/// Result type alias for webfanyi operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Which page element a locate step was looking for.
///
/// Provider markup changes without notice, so element-not-found failures
/// carry the role that failed to make log triage possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRole {
    /// The source-text input field.
    Input,
    /// The translated-output container.
    Output,
    /// The clear/reset control clicked after extraction.
    Clear,
}

impl fmt::Display for ElementRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementRole::Input => write!(f, "input"),
            ElementRole::Output => write!(f, "output"),
            ElementRole::Clear => write!(f, "clear"),
        }
    }
}

/// Errors that can occur during browser-driven translation.
#[derive(Error, Debug)]
pub enum Error {
    /// Browser binary missing or the automation driver failed to start.
    ///
    /// Fatal to the session: indicates a broken local environment, not a
    /// transient page problem. Surfaced once, requires a fresh
    /// initialization attempt.
    #[error("browser driver failed to initialize: {0}")]
    DriverInit(String),

    /// The page never reached readyState "complete" within the timeout.
    #[error("page load timed out after {0}ms")]
    PageLoadTimeout(u64),

    /// A page element could not be located within the timeout.
    #[error("{role} element not found: {selector}")]
    ElementNotFound {
        /// Role of the element in the translation flow.
        role: ElementRole,
        /// CSS selector that failed.
        selector: String,
    },

    /// Output element located but its text was empty or whitespace.
    ///
    /// Treated as a failure rather than a valid empty translation; it
    /// usually means the settle delay was too short for the provider to
    /// render the result.
    #[error("translation output was empty")]
    EmptyResult,

    /// Catch-all for unexpected automation-layer failures.
    #[error("automation failure: {0}")]
    Automation(String),

    /// A translate call was submitted with no live session.
    #[error("session is closed")]
    SessionClosed,

    /// The request was rejected before reaching the worker (e.g. blank text).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Low-level wait timeout. Converted by the engine into the
    /// step-specific error before crossing the public boundary.
    #[error("timeout after {0}ms")]
    Timeout(u64),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns true if this error invalidates the session itself rather
    /// than just the current call.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::DriverInit(_) | Error::SessionClosed)
    }

    /// Returns true for per-call failures a caller may resubmit.
    ///
    /// No automatic retry happens inside the engine; provider instability
    /// makes blind retry unreliable, so the decision belongs to the caller.
    pub fn is_per_call(&self) -> bool {
        matches!(
            self,
            Error::PageLoadTimeout(_)
                | Error::ElementNotFound { .. }
                | Error::EmptyResult
                | Error::Automation(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driver_init_is_fatal() {
        assert!(Error::DriverInit("missing binary".into()).is_fatal());
        assert!(Error::SessionClosed.is_fatal());
        assert!(!Error::EmptyResult.is_fatal());
    }

    #[test]
    fn per_call_errors_are_resubmittable() {
        assert!(Error::PageLoadTimeout(5000).is_per_call());
        assert!(Error::ElementNotFound {
            role: ElementRole::Input,
            selector: "#editor".into()
        }
        .is_per_call());
        assert!(!Error::DriverInit("broken".into()).is_per_call());
    }

    #[test]
    fn element_role_in_message() {
        let err = Error::ElementNotFound {
            role: ElementRole::Output,
            selector: "#trans-selection".into(),
        };
        assert_eq!(
            err.to_string(),
            "output element not found: #trans-selection"
        );
    }
}
