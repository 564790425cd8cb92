use crate::hasher::LineHasher;

/// Ordered per-line content fingerprints of one file.
///
/// Lines are 1-based from the caller's perspective. The length is fixed at
/// construction and the sequence is never mutated afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineHashSequence {
    hashes: Vec<String>,
}

impl LineHashSequence {
    /// Fingerprint raw source lines with [`LineHasher::line_hash`].
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            hashes: lines
                .into_iter()
                .map(|line| LineHasher::line_hash(line.as_ref()))
                .collect(),
        }
    }

    /// Wrap pre-computed line hashes, in line order.
    pub fn from_hashes<I, S>(hashes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            hashes: hashes.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    /// Returns `true` if the file has no lines.
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    /// Returns `true` if `line` is within `1..=len()`.
    pub fn has_line(&self, line: u32) -> bool {
        line >= 1 && (line as usize) <= self.hashes.len()
    }

    /// The fingerprint of `line`, or `None` when it is out of range.
    pub fn hash_for_line(&self, line: u32) -> Option<&str> {
        if !self.has_line(line) {
            return None;
        }
        self.hashes.get(line as usize - 1).map(String::as_str)
    }

    /// All fingerprints in line order.
    pub fn hashes(&self) -> &[String] {
        &self.hashes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_are_one_based() {
        let seq = LineHashSequence::from_hashes(["a", "b", "c"]);
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.hash_for_line(1), Some("a"));
        assert_eq!(seq.hash_for_line(3), Some("c"));
    }

    #[test]
    fn out_of_range_lines_have_no_hash() {
        let seq = LineHashSequence::from_hashes(["a", "b"]);
        assert_eq!(seq.hash_for_line(0), None);
        assert_eq!(seq.hash_for_line(3), None);
        assert!(!seq.has_line(0));
        assert!(seq.has_line(2));
    }

    #[test]
    fn from_lines_normalizes_whitespace() {
        let seq = LineHashSequence::from_lines(["foo();", "   foo ( ) ;", ""]);
        assert_eq!(seq.hash_for_line(1), seq.hash_for_line(2));
        assert_eq!(seq.hash_for_line(3), Some(""));
    }

    #[test]
    fn empty_sequence() {
        let seq = LineHashSequence::from_lines(Vec::<String>::new());
        assert!(seq.is_empty());
        assert_eq!(seq.hash_for_line(1), None);
    }
}
