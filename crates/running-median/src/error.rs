//! Running Median Error Types

use thiserror::Error;

/// Edge policy name was not recognised
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown edge policy '{0}', expected 'zeropad' or 'truncate'")]
pub struct ParseEdgePolicyError(pub String);
