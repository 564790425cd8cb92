use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid rule key {input:?}: {reason}")]
    InvalidRuleKey { input: String, reason: String },

    #[error("unknown issue status: {0}")]
    UnknownStatus(String),
}
