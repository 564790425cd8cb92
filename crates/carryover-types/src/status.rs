use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Workflow state of an issue.
///
/// The tracker only looks at the status to leave closed issues out of the
/// candidate pool; everything else is carried through for the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueStatus {
    Open,
    Confirmed,
    Reopened,
    Resolved,
    Closed,
    ToReview,
    Reviewed,
}

impl IssueStatus {
    /// All statuses, in workflow order.
    pub const ALL: [IssueStatus; 7] = [
        IssueStatus::Open,
        IssueStatus::Confirmed,
        IssueStatus::Reopened,
        IssueStatus::Resolved,
        IssueStatus::Closed,
        IssueStatus::ToReview,
        IssueStatus::Reviewed,
    ];

    /// Returns `true` for a closed issue.
    ///
    /// Closed issues are never revived by matching; reopening is a caller
    /// decision made after tracking.
    pub fn is_closed(&self) -> bool {
        matches!(self, IssueStatus::Closed)
    }

    /// Wire name (`OPEN`, `TO_REVIEW`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStatus::Open => "OPEN",
            IssueStatus::Confirmed => "CONFIRMED",
            IssueStatus::Reopened => "REOPENED",
            IssueStatus::Resolved => "RESOLVED",
            IssueStatus::Closed => "CLOSED",
            IssueStatus::ToReview => "TO_REVIEW",
            IssueStatus::Reviewed => "REVIEWED",
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueStatus {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IssueStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| TypeError::UnknownStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_closed_is_closed() {
        for status in IssueStatus::ALL {
            assert_eq!(status.is_closed(), status == IssueStatus::Closed);
        }
    }

    #[test]
    fn wire_names_parse_back() {
        for status in IssueStatus::ALL {
            assert_eq!(status.as_str().parse::<IssueStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert_eq!(
            "WONTFIX".parse::<IssueStatus>(),
            Err(TypeError::UnknownStatus("WONTFIX".into()))
        );
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&IssueStatus::ToReview).unwrap();
        assert_eq!(json, "\"TO_REVIEW\"");
        let parsed: IssueStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, IssueStatus::ToReview);
    }
}
