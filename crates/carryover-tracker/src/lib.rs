//! Issue tracking engine for carryover.
//!
//! Given the issues raised on one file by a new analysis (raws) and by the
//! previous analysis (bases), decides which raw is the continuation of which
//! base, so that status, assignee and comments can be carried forward even
//! though lines, messages or surrounding code changed.
//!
//! Matching runs in passes over shrinking pools:
//!
//! 1. Five search-key tiers of decreasing confidence ([`SearchKeyKind`]),
//!    each binding only unambiguous keys.
//! 2. Block recognition over the leftovers ([`BlockRecognizer`]), guarded
//!    against quadratic blow-up.
//!
//! The engine is synchronous and keeps no state between calls; the inputs
//! are only read.
//!
//! # Key Types
//!
//! - [`Tracker`] -- raws against previous issues
//! - [`AnticipatedTransitionTracker`] -- raws against [`AnticipatedTransition`]s
//! - [`Input`] -- one side of a file comparison
//! - [`Tracking`] / [`MatchKind`] -- the immutable pairing result
//! - [`TrackerConfig`] -- tunables, loadable from TOML

pub mod anticipated;
pub mod block;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod search_key;
pub mod tracker;
pub mod tracking;

pub use anticipated::{AnticipatedTransition, AnticipatedTransitionTracker};
pub use block::{length_of_maximal_block, BlockRecognizer};
pub use config::TrackerConfig;
pub use engine::TrackingEngine;
pub use error::{Side, TrackingError, TrackingResult};
pub use input::Input;
pub use search_key::{SearchKey, SearchKeyKind};
pub use tracker::Tracker;
pub use tracking::{MatchKind, Tracking};
