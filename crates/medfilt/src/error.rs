//! Filter Error Types

use running_median::ParseEdgePolicyError;
use thiserror::Error;

/// Errors reported by the filter entry points, always before any output
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// Window, edge policy, axis or input rejected
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument { arg: &'static str, reason: String },
}

impl FilterError {
    pub(crate) fn invalid(arg: &'static str, reason: impl Into<String>) -> Self {
        FilterError::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }
}

impl From<ParseEdgePolicyError> for FilterError {
    fn from(err: ParseEdgePolicyError) -> Self {
        FilterError::invalid("edge_policy", err.to_string())
    }
}
