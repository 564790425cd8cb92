//! Search-key tiers: exact-match projections of a trackable.
//!
//! Each [`SearchKeyKind`] selects which fields of a trackable take part in
//! equality. The tiers are applied in [`SearchKeyKind::TIERS`] order, from the
//! most to the least confident. The rule key always takes part, so items of
//! different rules never share a key.

use serde::{Deserialize, Serialize};

use carryover_types::{RuleKey, Trackable};

/// One tier of exact matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchKeyKind {
    /// Rule, line, line hash and message: an exact match.
    RuleLineHashMessage,
    /// Rule, line and line hash: the message changed.
    RuleLineHash,
    /// Rule, line hash and message: the line moved.
    RuleHashMessage,
    /// Rule, line and message: the line content changed.
    RuleLineMessage,
    /// Rule and line hash only.
    RuleHash,
}

impl SearchKeyKind {
    /// All tiers, most confident first.
    pub const TIERS: [SearchKeyKind; 5] = [
        SearchKeyKind::RuleLineHashMessage,
        SearchKeyKind::RuleLineHash,
        SearchKeyKind::RuleHashMessage,
        SearchKeyKind::RuleLineMessage,
        SearchKeyKind::RuleHash,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SearchKeyKind::RuleLineHashMessage => "rule+line+hash+message",
            SearchKeyKind::RuleLineHash => "rule+line+hash",
            SearchKeyKind::RuleHashMessage => "rule+hash+message",
            SearchKeyKind::RuleLineMessage => "rule+line+message",
            SearchKeyKind::RuleHash => "rule+hash",
        }
    }

    pub fn uses_line(&self) -> bool {
        matches!(
            self,
            SearchKeyKind::RuleLineHashMessage
                | SearchKeyKind::RuleLineHash
                | SearchKeyKind::RuleLineMessage
        )
    }

    pub fn uses_line_hash(&self) -> bool {
        !matches!(self, SearchKeyKind::RuleLineMessage)
    }

    pub fn uses_message(&self) -> bool {
        matches!(
            self,
            SearchKeyKind::RuleLineHashMessage
                | SearchKeyKind::RuleHashMessage
                | SearchKeyKind::RuleLineMessage
        )
    }

    /// Project `item` onto this tier's key.
    pub fn key<'t, T: Trackable + ?Sized>(self, item: &'t T) -> SearchKey<'t> {
        SearchKey {
            kind: self,
            rule: item.rule_key(),
            line: if self.uses_line() { item.line() } else { None },
            line_hash: if self.uses_line_hash() {
                item.line_hash()
            } else {
                None
            },
            message: if self.uses_message() {
                item.message()
            } else {
                None
            },
        }
    }
}

/// A tier key borrowed from a trackable.
///
/// Two keys are equal when they come from the same tier and every field the
/// tier uses is equal. An absent field equals another absent field and
/// nothing else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SearchKey<'t> {
    kind: SearchKeyKind,
    rule: &'t RuleKey,
    line: Option<u32>,
    line_hash: Option<&'t str>,
    message: Option<&'t str>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use carryover_types::Issue;

    fn issue(rule: &str) -> Issue {
        Issue::new(RuleKey::parse(rule).unwrap())
    }

    #[test]
    fn exact_tier_compares_every_field() {
        let a = issue("java:S1").with_line(3).with_line_hash("h").with_message("m");
        let b = issue("java:S1").with_line(3).with_line_hash("h").with_message("m");
        let moved = b.clone().with_line(4);

        let kind = SearchKeyKind::RuleLineHashMessage;
        assert_eq!(kind.key(&a), kind.key(&b));
        assert_ne!(kind.key(&a), kind.key(&moved));
    }

    #[test]
    fn ignored_fields_do_not_matter() {
        let a = issue("java:S1").with_line(3).with_line_hash("h").with_message("old");
        let b = issue("java:S1").with_line(9).with_line_hash("h").with_message("new");
        assert_eq!(SearchKeyKind::RuleHash.key(&a), SearchKeyKind::RuleHash.key(&b));
        assert_ne!(
            SearchKeyKind::RuleLineHash.key(&a),
            SearchKeyKind::RuleLineHash.key(&b)
        );
    }

    #[test]
    fn absent_fields_equal_only_absent_fields() {
        let none = issue("java:S1").with_message("m");
        let other_none = issue("java:S1").with_message("m");
        let hashed = issue("java:S1").with_message("m").with_line_hash("h");

        let kind = SearchKeyKind::RuleHashMessage;
        assert_eq!(kind.key(&none), kind.key(&other_none));
        assert_ne!(kind.key(&none), kind.key(&hashed));
    }

    #[test]
    fn rule_always_takes_part() {
        let a = issue("java:S1").with_line(1).with_line_hash("h").with_message("m");
        let b = issue("java:S2").with_line(1).with_line_hash("h").with_message("m");
        for kind in SearchKeyKind::TIERS {
            assert_ne!(kind.key(&a), kind.key(&b), "{}", kind.name());
        }
    }

    #[test]
    fn keys_of_different_tiers_never_collide() {
        let a = issue("java:S1").with_line_hash("h");
        assert_ne!(
            SearchKeyKind::RuleHash.key(&a),
            SearchKeyKind::RuleLineHash.key(&a)
        );
    }

    #[test]
    fn tiers_are_ordered_by_confidence() {
        assert_eq!(SearchKeyKind::TIERS[0], SearchKeyKind::RuleLineHashMessage);
        assert_eq!(SearchKeyKind::TIERS[4], SearchKeyKind::RuleHash);
        assert!(SearchKeyKind::TIERS.iter().all(|k| k.uses_line() || k.uses_line_hash()));
    }
}
