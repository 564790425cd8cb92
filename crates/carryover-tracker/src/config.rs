use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::block::BlockRecognizer;
use crate::error::{TrackingError, TrackingResult};

/// Configuration for the tracking engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Radius of the line window fingerprinted by block hashes.
    pub block_radius: usize,
    /// Block recognition is skipped when `unmatched raws * unmatched bases`
    /// exceeds this value.
    pub pair_limit: u64,
    /// Minimum length of a common block for a positional match, inclusive:
    /// a block exactly this long still matches.
    pub min_block_length: usize,
    /// Whether leftovers of the key tiers go through block recognition.
    pub block_recognition: bool,
    /// Whether a key shared by several unmatched raws is ambiguous, the same
    /// way a key shared by several bases is.
    pub unique_raw_keys: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            block_radius: 5,
            pair_limit: BlockRecognizer::DEFAULT_PAIR_LIMIT,
            min_block_length: 1,
            block_recognition: true,
            unique_raw_keys: true,
        }
    }
}

impl TrackerConfig {
    /// A configuration that only matches on search keys.
    ///
    /// Useful when neither side has reliable line positions.
    pub fn key_tiers_only() -> Self {
        Self {
            block_recognition: false,
            ..Default::default()
        }
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> TrackingResult<()> {
        if self.pair_limit == 0 {
            return Err(TrackingError::InvalidConfig(
                "pair_limit must be greater than zero".into(),
            ));
        }
        if self.min_block_length == 0 {
            return Err(TrackingError::InvalidConfig(
                "min_block_length must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a TOML configuration. Missing keys take their
    /// default value.
    pub fn from_toml_str(s: &str) -> TrackingResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> TrackingResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_is_valid() {
        let config = TrackerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pair_limit, 250_000);
        assert!(config.block_recognition);
        assert!(config.unique_raw_keys);
    }

    #[test]
    fn key_tiers_only_disables_blocks() {
        let config = TrackerConfig::key_tiers_only();
        assert!(!config.block_recognition);
        assert_eq!(config.pair_limit, TrackerConfig::default().pair_limit);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = TrackerConfig::from_toml_str("block_radius = 2\n").unwrap();
        assert_eq!(config.block_radius, 2);
        assert_eq!(config.min_block_length, 1);
        assert!(config.unique_raw_keys);
    }

    #[test]
    fn zero_min_block_length_is_rejected() {
        let err = TrackerConfig::from_toml_str("min_block_length = 0").unwrap_err();
        assert!(matches!(err, TrackingError::InvalidConfig(_)));
    }

    #[test]
    fn zero_pair_limit_is_rejected() {
        let config = TrackerConfig {
            pair_limit: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = TrackerConfig::from_toml_str("block_radius = \"wide\"").unwrap_err();
        assert!(matches!(err, TrackingError::ConfigParse(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "pair_limit = 1000\nblock_recognition = false").unwrap();

        let config = TrackerConfig::load(file.path()).unwrap();
        assert_eq!(config.pair_limit, 1000);
        assert!(!config.block_recognition);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TrackerConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, TrackingError::ConfigIo(_)));
    }
}
