//! Error types for the list view engine.

use thiserror::Error;

/// Errors raised for caller contract violations.
///
/// Every other input (empty collections, filters that match nothing, sort
/// keys naming absent fields) yields a well-formed view instead of an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ListViewError {
    /// An argument the caller controls directly is out of its domain.
    #[error("invalid argument '{what}': {reason}")]
    InvalidArgument {
        what: &'static str,
        reason: String,
    },
}

impl ListViewError {
    pub(crate) fn invalid(what: &'static str, reason: impl Into<String>) -> Self {
        ListViewError::InvalidArgument {
            what,
            reason: reason.into(),
        }
    }
}

/// Result type for list view operations.
pub type Result<T> = std::result::Result<T, ListViewError>;
