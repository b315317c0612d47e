//! Template construction errors.

use thiserror::Error;

/// Error when a template cannot be assembled from its parts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// Literal segments must outnumber argument slots by exactly one.
    #[error("malformed template: {literals} literal segments for {args} argument slots (expected {expected} segments)", expected = .args + 1)]
    ArityMismatch { literals: usize, args: usize },
}
