//! Foundation types for carryover.
//!
//! carryover pairs the findings ("issues") of a new analysis with those of a
//! previous analysis of the same file, so that history can be carried forward
//! even when lines moved or messages changed. This crate holds the types every
//! other carryover crate depends on.
//!
//! # Key Types
//!
//! - [`RuleKey`] -- `repository:rule` identifier; items never match across rules
//! - [`IssueStatus`] -- Workflow state of an issue (informational to matching)
//! - [`Trackable`] -- The contract an item must satisfy to be matched
//! - [`Issue`] -- Concrete trackable issue record

pub mod error;
pub mod issue;
pub mod rule;
pub mod status;
pub mod trackable;

pub use error::TypeError;
pub use issue::Issue;
pub use rule::RuleKey;
pub use status::IssueStatus;
pub use trackable::Trackable;
