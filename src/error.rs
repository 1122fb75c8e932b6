//! Error types for folio_ui.

use std::fmt;

/// Result type alias for folio_ui operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for folio_ui operations.
///
/// Only the submission path produces errors. Validation problems are
/// reported through [`Verdict`](crate::validate::Verdict) and missing
/// navigation targets are ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The request never produced a response (offline, CORS, aborted).
    Network(String),
    /// The endpoint answered but did not acknowledge the submission.
    Rejected { status: u16 },
    /// The form carries no endpoint to post to.
    MissingEndpoint,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(reason) => write!(f, "network error: {reason}"),
            Self::Rejected { status } => {
                write!(f, "form submission failed with status {status}")
            }
            Self::MissingEndpoint => write!(f, "form has no action endpoint"),
        }
    }
}

impl std::error::Error for Error {}
