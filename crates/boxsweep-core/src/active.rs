// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Active interval set: the boxes currently straddling the sweep position,
//! keyed by Z-rank.
//!
//! Layout:
//! - `words`: one bit per rank, 64 ranks per word.
//! - `summary`: one bit per word, set iff that word is non-zero.
//! - `down` / `up`: an index arena threading the active ranks into a circular
//!   list in descending rank order. Index `capacity` is the sentinel, so
//!   `down[sentinel]` is the highest active rank and `up[sentinel]` the lowest.
//! - `payload`: the slot recorded for each active rank.
//!
//! Locating a neighbor costs one masked word probe, then a summary probe, then
//! a backward scan over summary words (one per 4096 ranks). Enumerating a rank
//! range costs one such search plus one step per active rank reported.

use core::iter::FusedIterator;

const WORD_BITS: usize = 64;

/// Membership structure over Z-ranks with ordered range enumeration.
#[derive(Debug, Clone, Default)]
pub struct ActiveSet {
    words: Vec<u64>,
    summary: Vec<u64>,
    down: Vec<usize>,
    up: Vec<usize>,
    payload: Vec<usize>,
    len: usize,
    capacity: usize,
}

impl ActiveSet {
    /// Creates an empty set addressing ranks `0..capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut set = Self::default();
        set.reset(capacity);
        set
    }

    /// Empties the set and resizes it to address ranks `0..capacity`.
    pub fn reset(&mut self, capacity: usize) {
        let word_count = capacity.div_ceil(WORD_BITS);
        let summary_count = word_count.div_ceil(WORD_BITS);
        self.words.clear();
        self.words.resize(word_count, 0);
        self.summary.clear();
        self.summary.resize(summary_count, 0);
        // Stale links are harmless: they are rewritten on insert.
        self.down.resize(capacity + 1, capacity);
        self.up.resize(capacity + 1, capacity);
        self.down[capacity] = capacity;
        self.up[capacity] = capacity;
        self.payload.resize(capacity, 0);
        self.len = 0;
        self.capacity = capacity;
    }

    /// Number of addressable ranks.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of active ranks.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no rank is active.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if `rank` is active.
    #[inline]
    pub fn contains(&self, rank: usize) -> bool {
        rank < self.capacity && self.words[rank / WORD_BITS] & bit(rank) != 0
    }

    /// Slot recorded for an active `rank`.
    pub fn payload(&self, rank: usize) -> Option<usize> {
        self.contains(rank).then(|| self.payload[rank])
    }

    /// Marks `rank` active and records `slot` for it.
    ///
    /// Inserting an already active or out-of-range rank is a contract
    /// violation, checked in debug builds only.
    pub fn insert(&mut self, rank: usize, slot: usize) {
        debug_assert!(rank < self.capacity, "rank {rank} out of range");
        debug_assert!(!self.contains(rank), "rank {rank} inserted twice");

        let sentinel = self.capacity;
        let lower = match rank.checked_sub(1) {
            Some(below) => self.highest_at_or_below(below).unwrap_or(sentinel),
            None => sentinel,
        };
        let upper = self.up[lower];
        self.down[upper] = rank;
        self.up[rank] = upper;
        self.down[rank] = lower;
        self.up[lower] = rank;

        let word = rank / WORD_BITS;
        self.words[word] |= bit(rank);
        self.summary[word / WORD_BITS] |= bit(word);
        self.payload[rank] = slot;
        self.len += 1;
    }

    /// Clears `rank` and unlinks it.
    ///
    /// Removing an inactive rank is a contract violation, checked in debug builds only.
    pub fn remove(&mut self, rank: usize) {
        debug_assert!(self.contains(rank), "rank {rank} removed while inactive");

        let (upper, lower) = (self.up[rank], self.down[rank]);
        self.down[upper] = lower;
        self.up[lower] = upper;

        let word = rank / WORD_BITS;
        self.words[word] &= !bit(rank);
        if self.words[word] == 0 {
            self.summary[word / WORD_BITS] &= !bit(word);
        }
        self.len -= 1;
    }

    /// Enumerates the slots of every active rank in `[lo, hi]`, highest rank first.
    ///
    /// The returned iterator borrows the set, so no insert or remove can
    /// interleave with an enumeration.
    pub fn query(&self, lo: usize, hi: usize) -> Query<'_> {
        let sentinel = self.capacity;
        let cursor = if lo > hi || self.len == 0 {
            sentinel
        } else {
            self.highest_at_or_below(hi.min(sentinel.saturating_sub(1)))
                .unwrap_or(sentinel)
        };
        Query {
            set: self,
            cursor,
            lo,
        }
    }

    /// Iterates over `(rank, slot)` for every active rank, highest rank first.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let sentinel = self.capacity;
        let mut cursor = self.down.get(sentinel).copied().unwrap_or(sentinel);
        core::iter::from_fn(move || {
            if cursor == sentinel {
                return None;
            }
            let rank = cursor;
            cursor = self.down[rank];
            Some((rank, self.payload[rank]))
        })
    }

    /// Highest active rank that is `<= rank`.
    pub fn highest_at_or_below(&self, rank: usize) -> Option<usize> {
        if self.capacity == 0 {
            return None;
        }
        let rank = rank.min(self.capacity - 1);
        let word = rank / WORD_BITS;
        let masked = self.words[word] & mask_through(rank % WORD_BITS);
        if masked != 0 {
            return Some(word * WORD_BITS + top_bit(masked));
        }
        let earlier = word.checked_sub(1)?;
        let found = highest_set(&self.summary, earlier)?;
        Some(found * WORD_BITS + top_bit(self.words[found]))
    }

    /// Verifies that the bit levels, the links and `len` agree.
    ///
    /// Walks the whole structure; meant for tests and instrumented sweeps.
    pub fn is_coherent(&self) -> bool {
        for (w, &word) in self.words.iter().enumerate() {
            let summarized = self.summary[w / WORD_BITS] & bit(w) != 0;
            if summarized != (word != 0) {
                return false;
            }
        }
        let mut walked = 0;
        let mut last = None;
        let sentinel = self.capacity;
        let mut cursor = self.down[sentinel];
        while cursor != sentinel {
            if !self.contains(cursor) || last.is_some_and(|prev| prev <= cursor) {
                return false;
            }
            if self.down[self.up[cursor]] != cursor {
                return false;
            }
            walked += 1;
            if walked > self.len {
                return false;
            }
            last = Some(cursor);
            cursor = self.down[cursor];
        }
        let set_bits: usize = self.words.iter().map(|w| w.count_ones() as usize).sum();
        walked == self.len && set_bits == self.len
    }
}

/// Lazy enumeration returned by [`ActiveSet::query`].
#[derive(Debug, Clone)]
pub struct Query<'a> {
    set: &'a ActiveSet,
    cursor: usize,
    lo: usize,
}

impl Iterator for Query<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        let sentinel = self.set.capacity;
        if self.cursor == sentinel || self.cursor < self.lo {
            self.cursor = sentinel;
            return None;
        }
        let rank = self.cursor;
        self.cursor = self.set.down[rank];
        Some(self.set.payload[rank])
    }
}

impl FusedIterator for Query<'_> {}

#[inline]
const fn bit(index: usize) -> u64 {
    1u64 << (index % WORD_BITS)
}

/// Mask with bits `0..=bit` set.
#[inline]
const fn mask_through(bit: usize) -> u64 {
    if bit >= WORD_BITS - 1 {
        u64::MAX
    } else {
        (1u64 << (bit + 1)) - 1
    }
}

#[inline]
const fn top_bit(word: u64) -> usize {
    WORD_BITS - 1 - word.leading_zeros() as usize
}

/// Highest set bit index `<= index` across a word array.
fn highest_set(words: &[u64], index: usize) -> Option<usize> {
    let w = index / WORD_BITS;
    let masked = words[w] & mask_through(index % WORD_BITS);
    if masked != 0 {
        return Some(w * WORD_BITS + top_bit(masked));
    }
    words[..w]
        .iter()
        .rposition(|&word| word != 0)
        .map(|found| found * WORD_BITS + top_bit(words[found]))
}
