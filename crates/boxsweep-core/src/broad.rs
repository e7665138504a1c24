// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Proxy-based broad-phase interface over the batch kernels.
//!
//! Determinism contract (applies to all implementations here):
//! - Pair identity is canonicalized as `(min_id, max_id)`.
//! - The emitted pair list is strictly sorted lexicographically by that tuple.
//! - Overlap is inclusive on faces (touching AABBs are considered overlapping).
//!
//! Both implementations recompute from scratch on every `pairs()` call; no
//! pair state persists between calls.

use std::collections::BTreeMap;

use boxsweep_geom::Aabb;

use crate::oracle::brute_force_into;
use crate::sink::PairSink;
use crate::store::BoxSet;
use crate::sweep::DualAxisSweep;

/// Broad-phase interface for inserting proxies and querying overlapping pairs.
///
/// Implementations must return pairs deterministically: the pair `(a, b)` is
/// canonicalized such that `a < b`, and the full list is sorted ascending by
/// `(a, b)`.
pub trait BroadPhase {
    /// Inserts or updates the proxy with the given `id` and `aabb`.
    fn upsert(&mut self, id: usize, aabb: Aabb);
    /// Removes a proxy if present.
    fn remove(&mut self, id: usize);
    /// Returns a canonical, deterministically-ordered list of overlapping pairs.
    fn pairs(&mut self) -> Vec<(usize, usize)>;
}

fn snapshot(items: &BTreeMap<usize, Aabb>) -> BoxSet<usize> {
    items.iter().map(|(id, aabb)| (*aabb, *id)).collect()
}

/// `O(n^2)` all-pairs baseline behind the [`BroadPhase`] interface.
#[derive(Debug, Default)]
pub struct BruteForceBroadPhase {
    items: BTreeMap<usize, Aabb>,
}

impl BruteForceBroadPhase {
    /// Creates an empty broad phase.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl BroadPhase for BruteForceBroadPhase {
    fn upsert(&mut self, id: usize, aabb: Aabb) {
        self.items.insert(id, aabb);
    }

    fn remove(&mut self, id: usize) {
        self.items.remove(&id);
    }

    fn pairs(&mut self) -> Vec<(usize, usize)> {
        let mut sink = PairSink::new();
        brute_force_into(&snapshot(&self.items), &mut sink);
        sink.into_canonical()
    }
}

/// Dual-axis sweep behind the [`BroadPhase`] interface.
///
/// Keeps the sweep scratch between calls, so per-frame use does not
/// reallocate once the proxy count stabilizes.
#[derive(Debug, Default)]
pub struct SweepBroadPhase {
    items: BTreeMap<usize, Aabb>,
    sweep: DualAxisSweep,
    boxes: BoxSet<usize>,
}

impl SweepBroadPhase {
    /// Creates an empty broad phase.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of proxies.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no proxies.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl BroadPhase for SweepBroadPhase {
    fn upsert(&mut self, id: usize, aabb: Aabb) {
        self.items.insert(id, aabb);
    }

    fn remove(&mut self, id: usize) {
        self.items.remove(&id);
    }

    fn pairs(&mut self) -> Vec<(usize, usize)> {
        self.boxes.clear();
        for (id, aabb) in &self.items {
            self.boxes.push(*aabb, *id);
        }
        let mut sink = PairSink::with_capacity(self.items.len());
        let _ = self.sweep.run(&self.boxes, &mut sink);
        sink.into_canonical()
    }
}
