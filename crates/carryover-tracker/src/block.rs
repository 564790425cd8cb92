//! Block recognition: positional matching for items the key tiers left over.
//!
//! Two passes run over the unmatched pools:
//!
//! 1. Unique moves. A block hash found on exactly one unmatched base line and
//!    exactly one unmatched raw line means that block moved from one line to
//!    the other; items on those two lines are paired.
//! 2. Maximal blocks. Every remaining same-rule pair is weighted by the
//!    length of the common block around its two lines, and pairs are bound
//!    heaviest first. A pair's weight only depends on its lines, so one
//!    sorted scan picks the same pairs as repeatedly taking the best
//!    remaining one.
//!
//! Both passes are skipped when the pools are too large for the pairwise
//! product (see [`BlockRecognizer::is_over_limit`]).

use std::collections::{BTreeMap, HashMap};

use carryover_hash::{BlockHash, LineHashSequence};
use carryover_types::Trackable;

use crate::config::TrackerConfig;
use crate::engine::MatchState;
use crate::input::Input;
use crate::tracking::MatchKind;

/// Length of the longest run of equal lines containing line `a_line` of `a`
/// aligned with line `b_line` of `b`.
///
/// The run grows backward and forward from the anchors until the hashes
/// differ or either sequence ends. Returns 0 if the anchors themselves differ
/// or are out of range.
pub fn length_of_maximal_block(
    a: &LineHashSequence,
    a_line: u32,
    b: &LineHashSequence,
    b_line: u32,
) -> usize {
    let same = |line_a: Option<u32>, line_b: Option<u32>| {
        match (
            line_a.and_then(|line| a.hash_for_line(line)),
            line_b.and_then(|line| b.hash_for_line(line)),
        ) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    };
    if !same(Some(a_line), Some(b_line)) {
        return 0;
    }
    let forward = (1u32..)
        .take_while(|&k| same(a_line.checked_add(k), b_line.checked_add(k)))
        .count();
    let backward = (1u32..)
        .take_while(|&k| same(a_line.checked_sub(k), b_line.checked_sub(k)))
        .count();
    1 + forward + backward
}

/// Positional matcher with a guard on its quadratic cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockRecognizer {
    pair_limit: u64,
    min_block_length: usize,
}

impl Default for BlockRecognizer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PAIR_LIMIT, 1)
    }
}

impl BlockRecognizer {
    /// Largest `raws * bases` product block recognition accepts by default.
    pub const DEFAULT_PAIR_LIMIT: u64 = 250_000;

    /// Create a recognizer. A `min_block_length` of 0 is raised to 1 so that
    /// lines with different content are never paired.
    pub fn new(pair_limit: u64, min_block_length: usize) -> Self {
        Self {
            pair_limit,
            min_block_length: min_block_length.max(1),
        }
    }

    pub fn from_config(config: &TrackerConfig) -> Self {
        Self::new(config.pair_limit, config.min_block_length)
    }

    pub fn pair_limit(&self) -> u64 {
        self.pair_limit
    }

    pub fn min_block_length(&self) -> usize {
        self.min_block_length
    }

    /// Returns `true` when pairing `n` items with `m` items would cost more
    /// than the limit allows, including when `n * m` overflows.
    ///
    /// # Examples
    ///
    /// ```
    /// use carryover_tracker::BlockRecognizer;
    ///
    /// let recognizer = BlockRecognizer::default();
    /// assert!(!recognizer.is_over_limit(20, 40));
    /// assert!(recognizer.is_over_limit(3, 100_000));
    /// assert!(recognizer.is_over_limit(50_000, 60_000));
    /// ```
    pub fn is_over_limit(&self, n: usize, m: usize) -> bool {
        let product = u64::try_from(n)
            .ok()
            .zip(u64::try_from(m).ok())
            .and_then(|(n, m)| n.checked_mul(m));
        match product {
            Some(product) => product > self.pair_limit,
            None => true,
        }
    }

    /// Run both passes over the unmatched pools, returning the number of
    /// pairs bound.
    pub(crate) fn recognize<R, B>(
        &self,
        raw: &Input<R>,
        base: &Input<B>,
        state: &mut MatchState,
    ) -> usize
    where
        R: Trackable,
        B: Trackable,
    {
        self.match_unique_moves(raw, base, state) + self.match_maximal_blocks(raw, base, state)
    }

    fn match_unique_moves<R, B>(
        &self,
        raw: &Input<R>,
        base: &Input<B>,
        state: &mut MatchState,
    ) -> usize
    where
        R: Trackable,
        B: Trackable,
    {
        let (Some(raw_blocks), Some(base_blocks)) = (raw.block_hashes(), base.block_hashes()) else {
            return 0;
        };
        let raws_by_line = group_by_line(raw.items(), state.unmatched_raws(), |line| {
            raw_blocks.has_block_hash(line)
        });
        let bases_by_line = group_by_line(base.items(), state.unmatched_bases(), |line| {
            base_blocks.has_block_hash(line)
        });

        let mut occurrences: HashMap<BlockHash, Occurrence> = HashMap::new();
        for &line in bases_by_line.keys() {
            if let Some(hash) = base_blocks.block_hash_for_line(line) {
                occurrences.entry(hash).or_default().add_base(line);
            }
        }
        for &line in raws_by_line.keys() {
            if let Some(occurrence) = raw_blocks
                .block_hash_for_line(line)
                .and_then(|hash| occurrences.get_mut(&hash))
            {
                occurrence.add_raw(line);
            }
        }

        let mut bound = 0;
        for (&base_line, base_indices) in &bases_by_line {
            let raw_line = base_blocks
                .block_hash_for_line(base_line)
                .and_then(|hash| occurrences.get(&hash))
                .and_then(Occurrence::unique_move);
            if let Some(raw_indices) = raw_line.and_then(|line| raws_by_line.get(&line)) {
                bound += bind_lines(raw.items(), raw_indices, base.items(), base_indices, state);
            }
        }
        bound
    }

    fn match_maximal_blocks<R, B>(
        &self,
        raw: &Input<R>,
        base: &Input<B>,
        state: &mut MatchState,
    ) -> usize
    where
        R: Trackable,
        B: Trackable,
    {
        let (Some(raw_lines), Some(base_lines)) = (raw.line_hashes(), base.line_hashes()) else {
            return 0;
        };
        let raw_located = located(raw.items(), state.unmatched_raws(), raw_lines);
        let base_located = located(base.items(), state.unmatched_bases(), base_lines);

        let mut weights: HashMap<(u32, u32), usize> = HashMap::new();
        let mut pairs = Vec::new();
        for &(raw_index, raw_line) in &raw_located {
            let rule = raw.items()[raw_index].rule_key();
            for &(base_index, base_line) in &base_located {
                if base.items()[base_index].rule_key() != rule {
                    continue;
                }
                let weight = *weights.entry((raw_line, base_line)).or_insert_with(|| {
                    length_of_maximal_block(raw_lines, raw_line, base_lines, base_line)
                });
                if weight >= self.min_block_length {
                    pairs.push(BlockPair {
                        raw: raw_index,
                        base: base_index,
                        weight,
                    });
                }
            }
        }

        // Heaviest first; ties go to the earliest raw, then the earliest base.
        pairs.sort_by(|a, b| {
            b.weight
                .cmp(&a.weight)
                .then(a.raw.cmp(&b.raw))
                .then(a.base.cmp(&b.base))
        });

        let mut bound = 0;
        for pair in pairs {
            if state.is_raw_unmatched(pair.raw) && state.is_base_unmatched(pair.base) {
                state.bind(pair.raw, pair.base, MatchKind::Block);
                bound += 1;
            }
        }
        bound
    }
}

/// Where a block hash was seen among the unmatched lines of each side.
#[derive(Debug, Default)]
struct Occurrence {
    base_line: u32,
    base_count: usize,
    raw_line: u32,
    raw_count: usize,
}

impl Occurrence {
    fn add_base(&mut self, line: u32) {
        self.base_line = line;
        self.base_count += 1;
    }

    fn add_raw(&mut self, line: u32) {
        self.raw_line = line;
        self.raw_count += 1;
    }

    /// The raw line this block moved to, if the move is unambiguous.
    fn unique_move(&self) -> Option<u32> {
        (self.base_count == 1 && self.raw_count == 1).then_some(self.raw_line)
    }
}

#[derive(Debug)]
struct BlockPair {
    raw: usize,
    base: usize,
    weight: usize,
}

fn group_by_line<T: Trackable>(
    items: &[T],
    indices: Vec<usize>,
    has_line: impl Fn(u32) -> bool,
) -> BTreeMap<u32, Vec<usize>> {
    let mut by_line: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for index in indices {
        if let Some(line) = items[index].line().filter(|&line| has_line(line)) {
            by_line.entry(line).or_default().push(index);
        }
    }
    by_line
}

fn located<T: Trackable>(
    items: &[T],
    indices: Vec<usize>,
    lines: &LineHashSequence,
) -> Vec<(usize, u32)> {
    indices
        .into_iter()
        .filter_map(|index| {
            let line = items[index].line()?;
            lines.has_line(line).then_some((index, line))
        })
        .collect()
}

/// Pair the items of one raw line with the items of one base line.
///
/// Each raw takes the first unmatched same-rule base with an equal message,
/// or else the first unmatched same-rule base.
fn bind_lines<R, B>(
    raws: &[R],
    raw_indices: &[usize],
    bases: &[B],
    base_indices: &[usize],
    state: &mut MatchState,
) -> usize
where
    R: Trackable,
    B: Trackable,
{
    let mut bound = 0;
    for &raw in raw_indices {
        if !state.is_raw_unmatched(raw) {
            continue;
        }
        let item = &raws[raw];
        let same_rule: Vec<usize> = base_indices
            .iter()
            .copied()
            .filter(|&base| {
                state.is_base_unmatched(base) && bases[base].rule_key() == item.rule_key()
            })
            .collect();
        let chosen = same_rule
            .iter()
            .copied()
            .find(|&base| bases[base].message() == item.message())
            .or_else(|| same_rule.first().copied());
        if let Some(base) = chosen {
            state.bind(raw, base, MatchKind::Block);
            bound += 1;
        }
    }
    bound
}
