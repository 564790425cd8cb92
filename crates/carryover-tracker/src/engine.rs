//! The generic matching loop shared by every tracker.
//!
//! [`TrackingEngine`] pairs raw items with base items in passes: each
//! search-key tier in order, then block recognition over whatever is left.
//! All intermediate state lives in a private [`MatchState`] rebuilt on every
//! call, so the inputs are never touched.
//!
//! # Ambiguity
//!
//! A tier key shared by several unmatched bases is ambiguous: none of those
//! bases is bound at that tier, even when exactly one raw carries the key.
//! With [`TrackerConfig::unique_raw_keys`] the same holds for a key shared by
//! several unmatched raws.
//!
//! Items that are exact duplicates of each other stay ambiguous at every
//! tier. After the tiers, a group of identical raws is paired with a group
//! of identical bases of the same size, in input order.

use std::collections::HashMap;

use tracing::debug;

use carryover_types::Trackable;

use crate::block::BlockRecognizer;
use crate::config::TrackerConfig;
use crate::error::{Side, TrackingResult};
use crate::input::Input;
use crate::search_key::{SearchKey, SearchKeyKind};
use crate::tracking::{MatchKind, Tracking};

/// Remove-as-you-match pools over the indices of both inputs.
#[derive(Debug)]
pub(crate) struct MatchState {
    raw_matches: Vec<Option<(usize, MatchKind)>>,
    base_matches: Vec<Option<usize>>,
    base_candidates: Vec<bool>,
}

impl MatchState {
    pub(crate) fn new(raw_count: usize, base_candidates: Vec<bool>) -> Self {
        Self {
            raw_matches: vec![None; raw_count],
            base_matches: vec![None; base_candidates.len()],
            base_candidates,
        }
    }

    pub(crate) fn is_raw_unmatched(&self, raw: usize) -> bool {
        self.raw_matches[raw].is_none()
    }

    pub(crate) fn is_base_unmatched(&self, base: usize) -> bool {
        self.base_candidates[base] && self.base_matches[base].is_none()
    }

    /// Unmatched raw indices, in input order.
    pub(crate) fn unmatched_raws(&self) -> Vec<usize> {
        (0..self.raw_matches.len())
            .filter(|&raw| self.is_raw_unmatched(raw))
            .collect()
    }

    /// Unmatched candidate base indices, in input order.
    pub(crate) fn unmatched_bases(&self) -> Vec<usize> {
        (0..self.base_matches.len())
            .filter(|&base| self.is_base_unmatched(base))
            .collect()
    }

    /// Returns `true` when one side has nothing left to pair.
    pub(crate) fn is_exhausted(&self) -> bool {
        !(0..self.raw_matches.len()).any(|raw| self.is_raw_unmatched(raw))
            || !(0..self.base_matches.len()).any(|base| self.is_base_unmatched(base))
    }

    #[cfg(test)]
    pub(crate) fn base_of(&self, raw: usize) -> Option<usize> {
        self.raw_matches[raw].map(|(base, _)| base)
    }

    pub(crate) fn bind(&mut self, raw: usize, base: usize, kind: MatchKind) {
        debug_assert!(self.is_raw_unmatched(raw) && self.is_base_unmatched(base));
        self.raw_matches[raw] = Some((base, kind));
        self.base_matches[base] = Some(raw);
    }

    fn finish<'a, R, B>(self, raws: &'a [R], bases: &'a [B]) -> Tracking<'a, R, B> {
        Tracking::new(
            raws,
            bases,
            self.raw_matches,
            self.base_matches,
            self.base_candidates,
        )
    }
}

/// Multi-pass matcher driven by an ordered list of search-key tiers.
#[derive(Clone, Debug)]
pub struct TrackingEngine {
    config: TrackerConfig,
    tiers: Vec<SearchKeyKind>,
}

impl TrackingEngine {
    /// Create an engine applying `tiers` in the given order.
    pub fn new(config: TrackerConfig, tiers: impl Into<Vec<SearchKeyKind>>) -> Self {
        Self {
            config,
            tiers: tiers.into(),
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn tiers(&self) -> &[SearchKeyKind] {
        &self.tiers
    }

    /// Pair the items of `raw` with the items of `base` accepted by
    /// `is_candidate`.
    ///
    /// Fails before any matching if either input breaks the caller contract
    /// (empty rule key, item bound to another file).
    pub fn track<'a, R, B, F>(
        &self,
        raw: &'a Input<R>,
        base: &'a Input<B>,
        is_candidate: F,
    ) -> TrackingResult<Tracking<'a, R, B>>
    where
        R: Trackable,
        B: Trackable,
        F: Fn(&B) -> bool,
    {
        raw.validate(Side::Raw)?;
        base.validate(Side::Base)?;

        let candidates = base.items().iter().map(is_candidate).collect();
        let mut state = MatchState::new(raw.len(), candidates);

        for &kind in &self.tiers {
            if state.is_exhausted() {
                break;
            }
            let bound = self.match_tier(kind, raw.items(), base.items(), &mut state);
            debug!(tier = kind.name(), bound, "search key tier applied");
        }

        if !state.is_exhausted() {
            let bound = match_exact_duplicates(raw.items(), base.items(), &mut state);
            debug!(bound, "exact duplicates paired");
        }

        if self.config.block_recognition && !state.is_exhausted() {
            self.recognize_blocks(raw, base, &mut state);
        }

        let tracking = state.finish(raw.items(), base.items());
        debug!(
            file = raw.file_path().or(base.file_path()).unwrap_or("<none>"),
            matched = tracking.matched_count(),
            unmatched_raws = tracking.unmatched_raw_count(),
            unmatched_bases = tracking.unmatched_base_count(),
            "tracking complete"
        );
        Ok(tracking)
    }

    /// Bind every raw whose key identifies exactly one base, returning the
    /// number of pairs bound.
    fn match_tier<R, B>(
        &self,
        kind: SearchKeyKind,
        raws: &[R],
        bases: &[B],
        state: &mut MatchState,
    ) -> usize
    where
        R: Trackable,
        B: Trackable,
    {
        let mut bases_by_key: HashMap<SearchKey<'_>, Vec<usize>> = HashMap::new();
        for base in state.unmatched_bases() {
            bases_by_key
                .entry(kind.key(&bases[base]))
                .or_default()
                .push(base);
        }

        let unmatched_raws = state.unmatched_raws();
        let mut raw_counts: HashMap<SearchKey<'_>, usize> = HashMap::new();
        if self.config.unique_raw_keys {
            for &raw in &unmatched_raws {
                *raw_counts.entry(kind.key(&raws[raw])).or_default() += 1;
            }
        }

        let mut bound = 0;
        for raw in unmatched_raws {
            let key = kind.key(&raws[raw]);
            if raw_counts.get(&key).is_some_and(|&count| count > 1) {
                continue;
            }
            let Some(group) = bases_by_key.get_mut(&key) else {
                continue;
            };
            if group.len() != 1 {
                continue;
            }
            // Emptying the group keeps later raws from claiming the same base.
            if let Some(base) = group.pop() {
                state.bind(raw, base, MatchKind::Tier(kind));
                bound += 1;
            }
        }
        bound
    }

    fn recognize_blocks<R, B>(&self, raw: &Input<R>, base: &Input<B>, state: &mut MatchState)
    where
        R: Trackable,
        B: Trackable,
    {
        let recognizer = BlockRecognizer::from_config(&self.config);
        let (raw_left, base_left) = (state.unmatched_raws().len(), state.unmatched_bases().len());
        if recognizer.is_over_limit(raw_left, base_left) {
            debug!(
                unmatched_raws = raw_left,
                unmatched_bases = base_left,
                limit = recognizer.pair_limit(),
                "too many unmatched items, skipping block recognition"
            );
            return;
        }
        let bound = recognizer.recognize(raw, base, state);
        debug!(bound, "block recognition applied");
    }
}

/// Pair groups of identical items (same rule, line, line hash and message)
/// when both sides hold the same number of them, zipping in input order.
fn match_exact_duplicates<R, B>(raws: &[R], bases: &[B], state: &mut MatchState) -> usize
where
    R: Trackable,
    B: Trackable,
{
    let kind = SearchKeyKind::RuleLineHashMessage;

    let mut bases_by_key: HashMap<SearchKey<'_>, Vec<usize>> = HashMap::new();
    for base in state.unmatched_bases() {
        bases_by_key
            .entry(kind.key(&bases[base]))
            .or_default()
            .push(base);
    }

    // Groups in order of their first raw, so binding order is stable.
    let mut group_of: HashMap<SearchKey<'_>, usize> = HashMap::new();
    let mut raw_groups: Vec<(SearchKey<'_>, Vec<usize>)> = Vec::new();
    for raw in state.unmatched_raws() {
        let key = kind.key(&raws[raw]);
        let group = *group_of.entry(key).or_insert_with(|| {
            raw_groups.push((key, Vec::new()));
            raw_groups.len() - 1
        });
        raw_groups[group].1.push(raw);
    }

    let mut bound = 0;
    for (key, group) in raw_groups {
        let Some(candidates) = bases_by_key.get(&key) else {
            continue;
        };
        if candidates.len() != group.len() {
            continue;
        }
        for (&raw, &base) in group.iter().zip(candidates) {
            state.bind(raw, base, MatchKind::ExactDuplicate);
            bound += 1;
        }
    }
    bound
}
