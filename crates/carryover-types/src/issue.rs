use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::rule::RuleKey;
use crate::status::IssueStatus;
use crate::trackable::Trackable;

/// A finding raised by an analysis on a file.
///
/// The matching-relevant fields are `rule_key`, `line`, `message` and
/// `line_hash`. The rest is history the caller copies from a matched base
/// issue onto its new counterpart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Unique issue key (UUID v7).
    pub key: Uuid,
    pub file_path: Option<String>,
    pub rule_key: RuleKey,
    pub line: Option<u32>,
    pub message: Option<String>,
    pub line_hash: Option<String>,
    pub status: IssueStatus,
    pub assignee: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
    pub update_date: Option<DateTime<Utc>>,
}

impl Issue {
    /// Create an open issue with a fresh key and no location.
    pub fn new(rule_key: RuleKey) -> Self {
        Self {
            key: Uuid::now_v7(),
            file_path: None,
            rule_key,
            line: None,
            message: None,
            line_hash: None,
            status: IssueStatus::Open,
            assignee: None,
            creation_date: None,
            update_date: None,
        }
    }

    pub fn with_file_path(mut self, path: impl Into<String>) -> Self {
        self.file_path = Some(path.into());
        self
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

    pub fn with_status(mut self, status: IssueStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    pub fn with_creation_date(mut self, date: DateTime<Utc>) -> Self {
        self.creation_date = Some(date);
        self
    }

    pub fn with_update_date(mut self, date: DateTime<Utc>) -> Self {
        self.update_date = Some(date);
        self
    }
}

impl Trackable for Issue {
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

    fn status(&self) -> IssueStatus {
        self.status
    }

    fn update_date(&self) -> Option<DateTime<Utc>> {
        self.update_date
    }

    fn file_path(&self) -> Option<&str> {
        self.file_path.as_deref()
    }
}
