use carryover_hash::LineHashSequence;
use carryover_types::Trackable;

use crate::config::TrackerConfig;
use crate::engine::TrackingEngine;
use crate::error::TrackingResult;
use crate::input::Input;
use crate::search_key::SearchKeyKind;
use crate::tracking::Tracking;

/// Pairs the issues of a new analysis (raws) with those of the previous
/// analysis of the same file (bases).
#[derive(Clone, Debug)]
pub struct Tracker {
    engine: TrackingEngine,
}

impl Default for Tracker {
    fn default() -> Self {
        Self {
            engine: TrackingEngine::new(TrackerConfig::default(), SearchKeyKind::TIERS),
        }
    }
}

impl Tracker {
    /// A tracker with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// A tracker with a custom configuration, validated first.
    pub fn with_config(config: TrackerConfig) -> TrackingResult<Self> {
        config.validate()?;
        Ok(Self {
            engine: TrackingEngine::new(config, SearchKeyKind::TIERS),
        })
    }

    pub fn config(&self) -> &TrackerConfig {
        self.engine.config()
    }

    /// Build an input from file content, with block hashes over the
    /// configured radius.
    pub fn input_from_lines<T, I, S>(&self, items: Vec<T>, lines: I) -> Input<T>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Input::from_lines(items, lines, self.config().block_radius)
    }

    /// Build an input from precomputed line hashes, with block hashes over
    /// the configured radius.
    pub fn input_from_line_hashes<T>(&self, items: Vec<T>, lines: LineHashSequence) -> Input<T> {
        Input::from_line_hashes(items, lines, self.config().block_radius)
    }

    /// Track raws against every base, whatever its status.
    pub fn track<'a, R, B>(
        &self,
        raw: &'a Input<R>,
        base: &'a Input<B>,
    ) -> TrackingResult<Tracking<'a, R, B>>
    where
        R: Trackable,
        B: Trackable,
    {
        self.engine.track(raw, base, |_| true)
    }

    /// Track raws against the bases that are not closed.
    ///
    /// Closed bases are left out of the pool entirely: they are neither
    /// matched nor reported as unmatched.
    pub fn track_non_closed<'a, R, B>(
        &self,
        raw: &'a Input<R>,
        base: &'a Input<B>,
    ) -> TrackingResult<Tracking<'a, R, B>>
    where
        R: Trackable,
        B: Trackable,
    {
        self.engine.track(raw, base, |item| !item.status().is_closed())
    }
}
