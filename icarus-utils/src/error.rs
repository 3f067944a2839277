//! Typed failures raised at pagination entry.

use thiserror::Error;

/// Reasons a pagination call is rejected before any unit is produced.
///
/// Once inputs pass validation the paginators cannot fail, so these are the
/// only errors callers ever see.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginateError {
    /// The decorative template cannot produce a well-formed unit.
    #[error("invalid unit template: {reason}")]
    InvalidTemplate { reason: String },

    /// A budget ceiling is missing its value or cannot hold any text.
    #[error("invalid budget `{name}`: {reason}")]
    InvalidBudget { name: &'static str, reason: String },
}

impl PaginateError {
    pub(crate) fn template(reason: impl Into<String>) -> Self {
        Self::InvalidTemplate {
            reason: reason.into(),
        }
    }

    pub(crate) fn budget(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidBudget {
            name,
            reason: reason.into(),
        }
    }
}
