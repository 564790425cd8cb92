use carryover_hash::{BlockHashSequence, LineHashSequence};
use carryover_types::Trackable;

use crate::error::{Side, TrackingError, TrackingResult};

/// One side of a single file's comparison.
///
/// An input carries the trackable items and, when the file content is known,
/// its line and block hash sequences. Inputs are built once per analysis and
/// never mutated by the tracker.
#[derive(Clone, Debug)]
pub struct Input<T> {
    file_path: Option<String>,
    line_hashes: Option<LineHashSequence>,
    block_hashes: Option<BlockHashSequence>,
    items: Vec<T>,
}

impl<T> Input<T> {
    /// An input without positional data. Only key tiers apply to it.
    pub fn new(items: Vec<T>) -> Self {
        Self {
            file_path: None,
            line_hashes: None,
            block_hashes: None,
            items,
        }
    }

    /// An input over the given source lines.
    pub fn from_lines<I, S>(items: Vec<T>, lines: I, block_radius: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_line_hashes(items, LineHashSequence::from_lines(lines), block_radius)
    }

    /// An input over a pre-computed line hash sequence.
    pub fn from_line_hashes(items: Vec<T>, lines: LineHashSequence, block_radius: usize) -> Self {
        let blocks = BlockHashSequence::new(&lines, block_radius);
        Self {
            file_path: None,
            line_hashes: Some(lines),
            block_hashes: Some(blocks),
            items,
        }
    }

    /// Bind this input to a file. Items naming another file are rejected
    /// when tracking.
    pub fn with_file_path(mut self, path: impl Into<String>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    pub fn file_path(&self) -> Option<&str> {
        self.file_path.as_deref()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn line_hashes(&self) -> Option<&LineHashSequence> {
        self.line_hashes.as_ref()
    }

    pub fn block_hashes(&self) -> Option<&BlockHashSequence> {
        self.block_hashes.as_ref()
    }
}

impl<T: Trackable> Input<T> {
    /// Check the caller contract for every item of this input.
    pub(crate) fn validate(&self, side: Side) -> TrackingResult<()> {
        for (index, item) in self.items.iter().enumerate() {
            if item.rule_key().is_empty() {
                return Err(TrackingError::EmptyRuleKey { side, index });
            }
            if let (Some(expected), Some(actual)) = (self.file_path(), item.file_path()) {
                if expected != actual {
                    return Err(TrackingError::FileMismatch {
                        side,
                        index,
                        expected: expected.to_string(),
                        actual: actual.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carryover_types::{Issue, RuleKey};

    fn issue() -> Issue {
        Issue::new(RuleKey::new("java", "S1"))
    }

    #[test]
    fn plain_input_has_no_sequences() {
        let input = Input::new(vec![issue()]);
        assert_eq!(input.len(), 1);
        assert!(input.line_hashes().is_none());
        assert!(input.block_hashes().is_none());
    }

    #[test]
    fn from_lines_builds_both_sequences() {
        let input = Input::from_lines(vec![issue()], ["a", "b", "c"], 1);
        assert_eq!(input.line_hashes().unwrap().len(), 3);
        let blocks = input.block_hashes().unwrap();
        assert_eq!(blocks.radius(), 1);
        assert!(blocks.has_block_hash(2));
    }

    #[test]
    fn empty_rule_key_is_rejected() {
        let input = Input::new(vec![issue(), Issue::new(RuleKey::new("java", ""))]);
        let err = input.validate(Side::Raw).unwrap_err();
        assert!(matches!(
            err,
            TrackingError::EmptyRuleKey {
                side: Side::Raw,
                index: 1
            }
        ));
    }

    #[test]
    fn items_from_another_file_are_rejected() {
        let input = Input::new(vec![issue().with_file_path("src/B.java")])
            .with_file_path("src/A.java");
        let err = input.validate(Side::Base).unwrap_err();
        assert!(matches!(err, TrackingError::FileMismatch { index: 0, .. }));
        assert!(err.to_string().contains("src/B.java"));
    }

    #[test]
    fn unbound_items_are_accepted_in_any_file() {
        let input = Input::new(vec![issue(), issue().with_file_path("src/A.java")])
            .with_file_path("src/A.java");
        assert!(input.validate(Side::Raw).is_ok());
    }

    #[test]
    fn empty_input_is_valid() {
        let input: Input<Issue> = Input::new(Vec::new());
        assert!(input.is_empty());
        assert!(input.validate(Side::Base).is_ok());
    }
}
