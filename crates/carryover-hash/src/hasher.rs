use crate::block::BlockHash;

/// Domain-separated BLAKE3 hasher for source lines and blocks.
///
/// Each hasher carries a domain tag that is prepended to every hash
/// computation, so a line fingerprint and a block fingerprint over the same
/// bytes never collide.
pub struct LineHasher {
    domain: &'static str,
}

impl LineHasher {
    /// Hasher for single source lines.
    pub const LINE: Self = Self {
        domain: "carryover-line-v1",
    };
    /// Hasher for windows of line hashes.
    pub const BLOCK: Self = Self {
        domain: "carryover-block-v1",
    };

    fn hasher(&self) -> blake3::Hasher {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher
    }

    /// Fingerprint of one source line.
    ///
    /// Every whitespace character is removed first, so re-indenting or
    /// reformatting a line keeps its hash. A line that is blank after
    /// stripping hashes to the empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// use carryover_hash::LineHasher;
    ///
    /// assert_eq!(LineHasher::line_hash("  int a = 1;"), LineHasher::line_hash("int a=1;"));
    /// assert_eq!(LineHasher::line_hash(" \t "), "");
    /// ```
    pub fn line_hash(line: &str) -> String {
        let stripped: String = line.chars().filter(|c| !c.is_whitespace()).collect();
        if stripped.is_empty() {
            return String::new();
        }
        let mut hasher = Self::LINE.hasher();
        hasher.update(stripped.as_bytes());
        hex::encode(hasher.finalize().as_bytes())
    }

    /// Fingerprint of a window of consecutive line hashes.
    pub fn block_hash<'a, I>(hashes: I) -> BlockHash
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut hasher = Self::BLOCK.hasher();
        for hash in hashes {
            hasher.update(hash.as_bytes());
            hasher.update(b"\n");
        }
        BlockHash::from_bytes(*hasher.finalize().as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_hash_is_deterministic() {
        assert_eq!(
            LineHasher::line_hash("return x;"),
            LineHasher::line_hash("return x;")
        );
    }

    #[test]
    fn line_hash_ignores_whitespace() {
        let base = LineHasher::line_hash("if (a == b) {");
        assert_eq!(LineHasher::line_hash("if(a==b){"), base);
        assert_eq!(LineHasher::line_hash("\tif (a == b) {\r"), base);
        assert_ne!(LineHasher::line_hash("if (a != b) {"), base);
    }

    #[test]
    fn blank_lines_hash_to_empty() {
        assert_eq!(LineHasher::line_hash(""), "");
        assert_eq!(LineHasher::line_hash("   \t"), "");
    }

    #[test]
    fn line_hash_is_hex_encoded() {
        let hash = LineHasher::line_hash("x");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn block_hash_depends_on_order() {
        let ab = LineHasher::block_hash(["a", "b"]);
        let ba = LineHasher::block_hash(["b", "a"]);
        assert_ne!(ab, ba);
    }

    #[test]
    fn block_hash_separates_line_boundaries() {
        let split = LineHasher::block_hash(["ab", "c"]);
        let joined = LineHasher::block_hash(["a", "bc"]);
        assert_ne!(split, joined);
    }

    #[test]
    fn same_bytes_hash_differently_per_domain() {
        let mut line = LineHasher::LINE.hasher();
        let mut block = LineHasher::BLOCK.hasher();
        line.update(b"x");
        block.update(b"x");
        assert_ne!(line.finalize(), block.finalize());
    }
}
