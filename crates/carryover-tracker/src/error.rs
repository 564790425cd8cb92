//! Error types for the tracker crate.

use std::fmt;

/// Which side of a comparison an item came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// The new analysis.
    Raw,
    /// The previous analysis, or the anticipated transitions.
    Base,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Raw => f.write_str("raw"),
            Side::Base => f.write_str("base"),
        }
    }
}

/// Errors that can occur while tracking.
///
/// Input violations are caller bugs and are reported before any matching is
/// attempted. Degenerate inputs (empty sides, missing line hashes) are not
/// errors.
#[derive(Debug, thiserror::Error)]
pub enum TrackingError {
    /// A trackable carries a rule key with an empty component.
    #[error("{side} item #{index} has an empty rule key")]
    EmptyRuleKey { side: Side, index: usize },

    /// A trackable names a different file than the input it was given in.
    #[error("{side} item #{index} belongs to {actual:?} but was supplied for {expected:?}")]
    FileMismatch {
        side: Side,
        index: usize,
        expected: String,
        actual: String,
    },

    /// The tracker configuration is not usable.
    #[error("invalid tracker configuration: {0}")]
    InvalidConfig(String),

    /// The configuration file could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The configuration file could not be read.
    #[error("config I/O error: {0}")]
    ConfigIo(#[from] std::io::Error),
}

/// Convenience alias for tracking results.
pub type TrackingResult<T> = Result<T, TrackingError>;
