//! Initialization errors
//!
//! Only element resolution can fail fatally; everything else degrades
//! to a logged warning and a no-op.

/// Fatal navigation-controller initialization error
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    /// A required element group resolved to nothing
    #[error("required element not found: {selector}")]
    MissingElement { selector: String },
}

impl NavError {
    pub(crate) fn missing(selector: &str) -> Self {
        NavError::MissingElement { selector: selector.to_string() }
    }
}
