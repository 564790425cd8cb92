use std::fmt;

use crate::search_key::SearchKeyKind;

/// How a raw item was bound to its base.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatchKind {
    /// Bound by exact search-key equality at the given tier.
    Tier(SearchKeyKind),
    /// Bound as one of several identical items, paired in input order.
    ExactDuplicate,
    /// Bound by block recognition.
    Block,
}

/// The result of one tracking invocation.
///
/// Matching is injective: a base is bound to at most one raw and the other
/// way round. Every raw is either matched or unmatched. Every candidate base
/// is either matched or unmatched; bases left out of the pool (closed issues
/// when tracking non-closed) are neither.
pub struct Tracking<'a, R, B> {
    raws: &'a [R],
    bases: &'a [B],
    raw_matches: Vec<Option<(usize, MatchKind)>>,
    base_matches: Vec<Option<usize>>,
    base_candidates: Vec<bool>,
}

impl<'a, R, B> Tracking<'a, R, B> {
    pub(crate) fn new(
        raws: &'a [R],
        bases: &'a [B],
        raw_matches: Vec<Option<(usize, MatchKind)>>,
        base_matches: Vec<Option<usize>>,
        base_candidates: Vec<bool>,
    ) -> Self {
        Self {
            raws,
            bases,
            raw_matches,
            base_matches,
            base_candidates,
        }
    }

    /// The base matched to the raw at `raw_index`.
    pub fn base_for(&self, raw_index: usize) -> Option<&'a B> {
        let (base, _) = self.raw_matches.get(raw_index).copied().flatten()?;
        self.bases.get(base)
    }

    /// Index of the base matched to the raw at `raw_index`.
    pub fn base_index_for(&self, raw_index: usize) -> Option<usize> {
        self.raw_matches
            .get(raw_index)
            .copied()
            .flatten()
            .map(|(base, _)| base)
    }

    /// The raw matched to the base at `base_index`.
    pub fn raw_for(&self, base_index: usize) -> Option<&'a R> {
        let raw = self.base_matches.get(base_index).copied().flatten()?;
        self.raws.get(raw)
    }

    /// Which pass bound the raw at `raw_index`.
    pub fn matched_by(&self, raw_index: usize) -> Option<MatchKind> {
        self.raw_matches
            .get(raw_index)
            .copied()
            .flatten()
            .map(|(_, kind)| kind)
    }

    /// `(raw index, base index)` of every match, in raw order.
    pub fn matched_indices(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.raw_matches
            .iter()
            .enumerate()
            .filter_map(|(raw, m)| m.map(|(base, _)| (raw, base)))
    }

    /// Every matched pair, in raw order.
    pub fn matched_pairs(&self) -> impl Iterator<Item = (&'a R, &'a B)> + '_ {
        let (raws, bases) = (self.raws, self.bases);
        self.matched_indices()
            .map(move |(raw, base)| (&raws[raw], &bases[base]))
    }

    pub fn unmatched_raw_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.raw_matches
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_none())
            .map(|(raw, _)| raw)
    }

    /// Raws with no base, in input order. These are new issues.
    pub fn unmatched_raws(&self) -> impl Iterator<Item = &'a R> + '_ {
        let raws = self.raws;
        self.unmatched_raw_indices().map(move |raw| &raws[raw])
    }

    pub fn unmatched_base_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.base_matches
            .iter()
            .zip(&self.base_candidates)
            .enumerate()
            .filter(|(_, (m, candidate))| **candidate && m.is_none())
            .map(|(base, _)| base)
    }

    /// Candidate bases with no raw, in input order. These are gone.
    pub fn unmatched_bases(&self) -> impl Iterator<Item = &'a B> + '_ {
        let bases = self.bases;
        self.unmatched_base_indices().map(move |base| &bases[base])
    }

    pub fn matched_count(&self) -> usize {
        self.raw_matches.iter().filter(|m| m.is_some()).count()
    }

    pub fn unmatched_raw_count(&self) -> usize {
        self.raws.len() - self.matched_count()
    }

    pub fn unmatched_base_count(&self) -> usize {
        self.unmatched_base_indices().count()
    }

    /// Returns `true` when nothing is left unmatched on either side.
    pub fn is_complete(&self) -> bool {
        self.unmatched_raw_count() == 0 && self.unmatched_base_count() == 0
    }
}

impl<R, B> fmt::Debug for Tracking<'_, R, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracking")
            .field("raws", &self.raws.len())
            .field("bases", &self.bases.len())
            .field("matched", &self.matched_count())
            .field("unmatched_raws", &self.unmatched_raw_count())
            .field("unmatched_bases", &self.unmatched_base_count())
            .finish()
    }
}
