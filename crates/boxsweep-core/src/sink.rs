// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Growable output buffer of overlapping identifier pairs.

/// Appendable pair buffer filled by a broad-phase run.
///
/// Pair order and the order within a pair are unspecified; use
/// [`PairSink::into_canonical`] when a deterministic listing is needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairSink<Id> {
    pairs: Vec<(Id, Id)>,
}

impl<Id> Default for PairSink<Id> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id> PairSink<Id> {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Creates an empty sink with room for `n` pairs.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            pairs: Vec::with_capacity(n),
        }
    }

    /// Appends one pair.
    #[inline]
    pub fn push(&mut self, a: Id, b: Id) {
        self.pairs.push((a, b));
    }

    /// Number of pairs collected.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if no pair has been collected.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Drops every pair, keeping the allocation.
    pub fn clear(&mut self) {
        self.pairs.clear();
    }

    /// Borrowed view of the pairs.
    pub fn as_slice(&self) -> &[(Id, Id)] {
        &self.pairs
    }

    /// Iterates over the pairs.
    pub fn iter(&self) -> core::slice::Iter<'_, (Id, Id)> {
        self.pairs.iter()
    }

    /// Consumes the sink, returning the pairs in emission order.
    pub fn into_vec(self) -> Vec<(Id, Id)> {
        self.pairs
    }
}

impl<Id: Ord> PairSink<Id> {
    /// Consumes the sink, returning `(min, max)` pairs sorted ascending.
    pub fn into_canonical(self) -> Vec<(Id, Id)> {
        let mut pairs = self.pairs;
        canonicalize(&mut pairs);
        pairs
    }
}

impl<'a, Id> IntoIterator for &'a PairSink<Id> {
    type Item = &'a (Id, Id);
    type IntoIter = core::slice::Iter<'a, (Id, Id)>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Orders each pair as `(min, max)` and sorts the list lexicographically.
pub fn canonicalize<Id: Ord>(pairs: &mut [(Id, Id)]) {
    for pair in pairs.iter_mut() {
        if pair.1 < pair.0 {
            core::mem::swap(&mut pair.0, &mut pair.1);
        }
    }
    pairs.sort_unstable();
}
