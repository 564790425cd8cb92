//! Matching new issues against anticipated transitions.
//!
//! An anticipated transition is a resolution declared ahead of time for an
//! issue that does not exist yet (for instance "accept the S1481 issue on
//! this line"). When the next analysis raises the issue, the transition is
//! matched to it exactly like a previous issue would be.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use carryover_types::{IssueStatus, RuleKey, Trackable};

use crate::config::TrackerConfig;
use crate::engine::TrackingEngine;
use crate::error::TrackingResult;
use crate::input::Input;
use crate::search_key::SearchKeyKind;
use crate::tracking::Tracking;

/// An expected resolution of a future issue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnticipatedTransition {
    pub project_key: String,
    pub file_path: String,
    pub rule_key: RuleKey,
    pub line: Option<u32>,
    pub message: Option<String>,
    pub line_hash: Option<String>,
    /// The transition to apply once matched (e.g. `accept`).
    pub transition: String,
    pub comment: Option<String>,
    pub user_uuid: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl AnticipatedTransition {
    pub fn new(
        project_key: impl Into<String>,
        file_path: impl Into<String>,
        rule_key: RuleKey,
        transition: impl Into<String>,
    ) -> Self {
        Self {
            project_key: project_key.into(),
            file_path: file_path.into(),
            rule_key,
            line: None,
            message: None,
            line_hash: None,
            transition: transition.into(),
            comment: None,
            user_uuid: None,
            created_at: None,
        }
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_line_hash(mut self, hash: impl Into<String>) -> Self {
        self.line_hash = Some(hash.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

impl Trackable for AnticipatedTransition {
    fn rule_key(&self) -> &RuleKey {
        &self.rule_key
    }

    fn line(&self) -> Option<u32> {
        self.line
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn line_hash(&self) -> Option<&str> {
        self.line_hash.as_deref()
    }

    /// Transitions only ever target open issues.
    fn status(&self) -> IssueStatus {
        IssueStatus::Open
    }

    fn update_date(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn file_path(&self) -> Option<&str> {
        Some(&self.file_path)
    }
}

/// Pairs new issues (raws) with anticipated transitions (bases).
///
/// Transitions are normally supplied without file content, so only the key
/// tiers apply; block recognition runs only if both inputs carry sequences.
#[derive(Clone, Debug)]
pub struct AnticipatedTransitionTracker {
    engine: TrackingEngine,
}

impl Default for AnticipatedTransitionTracker {
    fn default() -> Self {
        Self {
            engine: TrackingEngine::new(TrackerConfig::default(), SearchKeyKind::TIERS),
        }
    }
}

impl AnticipatedTransitionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TrackerConfig) -> TrackingResult<Self> {
        config.validate()?;
        Ok(Self {
            engine: TrackingEngine::new(config, SearchKeyKind::TIERS),
        })
    }

    pub fn track<'a, R, T>(
        &self,
        raw: &'a Input<R>,
        transitions: &'a Input<T>,
    ) -> TrackingResult<Tracking<'a, R, T>>
    where
        R: Trackable,
        T: Trackable,
    {
        self.engine.track(raw, transitions, |_| true)
    }
}
