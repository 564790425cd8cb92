use chrono::{DateTime, Utc};

use crate::rule::RuleKey;
use crate::status::IssueStatus;

/// An item eligible for cross-analysis matching.
///
/// Implementors expose the fields the tracker compares. `line` is 1-based
/// and absent for file-level or project-level items. `line_hash` must be
/// computed the same way as the line hashes of the file the item belongs to
/// (see `carryover_hash::LineHasher::line_hash`).
pub trait Trackable {
    /// Rule that raised the item. Must have non-empty components.
    fn rule_key(&self) -> &RuleKey;

    /// 1-based line, or `None` for items not attached to a line.
    fn line(&self) -> Option<u32>;

    fn message(&self) -> Option<&str>;

    /// Content fingerprint of the item's line.
    fn line_hash(&self) -> Option<&str>;

    fn status(&self) -> IssueStatus;

    fn update_date(&self) -> Option<DateTime<Utc>>;

    /// Path of the file the item belongs to, when it carries one.
    ///
    /// When both the item and its input name a file, they must agree.
    fn file_path(&self) -> Option<&str> {
        None
    }
}

impl<T: Trackable + ?Sized> Trackable for &T {
    fn rule_key(&self) -> &RuleKey {
        (**self).rule_key()
    }

    fn line(&self) -> Option<u32> {
        (**self).line()
    }

    fn message(&self) -> Option<&str> {
        (**self).message()
    }

    fn line_hash(&self) -> Option<&str> {
        (**self).line_hash()
    }

    fn status(&self) -> IssueStatus {
        (**self).status()
    }

    fn update_date(&self) -> Option<DateTime<Utc>> {
        (**self).update_date()
    }

    fn file_path(&self) -> Option<&str> {
        (**self).file_path()
    }
}
