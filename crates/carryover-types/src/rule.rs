use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Identifier of the rule that raised an issue.
///
/// A rule key is a `repository:rule` pair such as `java:S1481`. Two items
/// with different rule keys are never paired by the tracker, whatever else
/// they have in common.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RuleKey {
    repository: String,
    rule: String,
}

impl RuleKey {
    /// Create a rule key from its two components.
    ///
    /// No validation is done here; use [`RuleKey::parse`] for untrusted input.
    /// The tracker rejects keys with an empty component before matching.
    pub fn new(repository: impl Into<String>, rule: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            rule: rule.into(),
        }
    }

    /// Parse a `repository:rule` string.
    ///
    /// # Examples
    ///
    /// ```
    /// use carryover_types::RuleKey;
    ///
    /// let key = RuleKey::parse("java:S1481").unwrap();
    /// assert_eq!(key.repository(), "java");
    /// assert_eq!(key.rule(), "S1481");
    /// assert!(RuleKey::parse("no-separator").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        let (repository, rule) = s.split_once(':').ok_or_else(|| TypeError::InvalidRuleKey {
            input: s.to_string(),
            reason: "missing ':' separator".into(),
        })?;
        if repository.is_empty() {
            return Err(TypeError::InvalidRuleKey {
                input: s.to_string(),
                reason: "repository must not be empty".into(),
            });
        }
        if rule.is_empty() {
            return Err(TypeError::InvalidRuleKey {
                input: s.to_string(),
                reason: "rule must not be empty".into(),
            });
        }
        Ok(Self::new(repository, rule))
    }

    /// The rule repository (e.g. `java`).
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// The rule identifier within its repository (e.g. `S1481`).
    pub fn rule(&self) -> &str {
        &self.rule
    }

    /// Returns `true` if either component is empty.
    pub fn is_empty(&self) -> bool {
        self.repository.is_empty() || self.rule.is_empty()
    }
}

impl fmt::Debug for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RuleKey({self})")
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.repository, self.rule)
    }
}

impl FromStr for RuleKey {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
