// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Sweep driver: walks the X events once, pruning candidates by Z-rank.
//!
//! On `Enter` the active set is queried over the entering box's Z-rank range,
//! each candidate gets the exact Y/Z test, and only then is the box inserted.
//! On `Leave` the box is removed. X overlap needs no test: a candidate is
//! active, so it entered no later and has not yet left.

use serde::Serialize;
use tracing::debug;

use crate::active::ActiveSet;
use crate::index::{AxisIndex, EventKind, XEvent};
use crate::sink::PairSink;
use crate::store::BoxSet;

/// Counters describing one sweep run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepStats {
    /// Boxes supplied.
    pub boxes: usize,
    /// Boxes that took part (NaN-bounded boxes are skipped).
    pub slots: usize,
    /// Enter/leave events processed.
    pub events: usize,
    /// Candidates returned by active-set queries.
    pub candidates: usize,
    /// Pairs emitted.
    pub pairs: usize,
}

/// Read-only view of the sweep state handed to a [`SweepObserver`].
#[derive(Debug, Clone, Copy)]
pub struct SweepView<'a> {
    index: &'a AxisIndex,
    active: &'a ActiveSet,
}

impl<'a> SweepView<'a> {
    /// The axis index of the current run.
    pub fn index(&self) -> &'a AxisIndex {
        self.index
    }

    /// The active set as it stands before the pending event.
    pub fn active(&self) -> &'a ActiveSet {
        self.active
    }

    /// Original box indices of every active box.
    pub fn active_boxes(&self) -> impl Iterator<Item = usize> + 'a {
        let index = self.index;
        self.active.iter().map(move |(_, slot)| index.box_of(slot))
    }
}

/// Hook invoked immediately before each event is applied.
pub trait SweepObserver {
    /// Called with the event's position `step` in the event stream.
    fn before_event(&mut self, step: usize, event: &XEvent, view: &SweepView<'_>);
}

/// Observer that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SweepObserver for NoopObserver {
    #[inline]
    fn before_event(&mut self, _step: usize, _event: &XEvent, _view: &SweepView<'_>) {}
}

/// Dual-axis sweep with reusable scratch.
///
/// One value per worker: a run needs `&mut self`, so concurrent sweeps use
/// separate instances and share nothing.
#[derive(Debug, Clone, Default)]
pub struct DualAxisSweep {
    index: AxisIndex,
    active: ActiveSet,
}

impl DualAxisSweep {
    /// Creates a sweep with empty scratch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends every overlapping pair of `boxes` to `sink`.
    pub fn run<Id: Copy>(&mut self, boxes: &BoxSet<Id>, sink: &mut PairSink<Id>) -> SweepStats {
        self.run_observed(boxes, sink, &mut NoopObserver)
    }

    /// Like [`DualAxisSweep::run`], calling `observer` before every event.
    pub fn run_observed<Id, O>(
        &mut self,
        boxes: &BoxSet<Id>,
        sink: &mut PairSink<Id>,
        observer: &mut O,
    ) -> SweepStats
    where
        Id: Copy,
        O: SweepObserver + ?Sized,
    {
        boxes.debug_validate();
        let span = tracing::debug_span!("sweep", boxes = boxes.len());
        let _enter = span.enter();

        self.index.rebuild(boxes.aabbs());
        self.active.reset(self.index.slot_count());

        let ids = boxes.ids();
        let index = &self.index;
        let before = sink.len();
        let mut candidates = 0usize;

        for (step, event) in index.events().iter().enumerate() {
            observer.before_event(
                step,
                event,
                &SweepView {
                    index,
                    active: &self.active,
                },
            );
            let slot = event.slot;
            let rank = index.z_rank(slot);
            match event.kind {
                EventKind::Enter => {
                    let (begin, end) = index.z_range(slot);
                    let entering = index.slot_box(slot);
                    let id = ids[index.box_of(slot)];
                    for other in self.active.query(begin, end - 1) {
                        candidates += 1;
                        if entering.overlaps_yz(index.slot_box(other)) {
                            sink.push(ids[index.box_of(other)], id);
                        }
                    }
                    self.active.insert(rank, slot);
                }
                EventKind::Leave => self.active.remove(rank),
            }
        }
        debug_assert!(
            self.active.is_empty(),
            "active set must drain by the last event"
        );

        let stats = SweepStats {
            boxes: boxes.len(),
            slots: index.slot_count(),
            events: index.events().len(),
            candidates,
            pairs: sink.len() - before,
        };
        debug!(
            slots = stats.slots,
            events = stats.events,
            candidates = stats.candidates,
            pairs = stats.pairs,
            "sweep finished"
        );
        stats
    }
}

/// Appends every overlapping pair of `boxes` to `sink` using fresh scratch.
pub fn sweep_into<Id: Copy>(boxes: &BoxSet<Id>, sink: &mut PairSink<Id>) -> SweepStats {
    DualAxisSweep::new().run(boxes, sink)
}

/// Returns every overlapping pair of `boxes`, order unspecified.
pub fn sweep_pairs<Id: Copy>(boxes: &BoxSet<Id>) -> Vec<(Id, Id)> {
    let mut sink = PairSink::new();
    let _ = sweep_into(boxes, &mut sink);
    sink.into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxsweep_geom::{Aabb, Vec3};

    fn bx(min: [f32; 3], max: [f32; 3]) -> Aabb {
        Aabb::new(Vec3::from(min), Vec3::from(max))
    }

    #[test]
    fn three_box_scenario() {
        let set: BoxSet<char> = [
            (bx([0.0, 0.0, 0.0], [10.0, 5.0, 5.0]), 'A'),
            (bx([3.0, 1.0, 1.0], [8.0, 4.0, 4.0]), 'B'),
            (bx([20.0, 0.0, 0.0], [25.0, 5.0, 5.0]), 'C'),
        ]
        .into_iter()
        .collect();
        let mut sink = PairSink::new();
        let stats = sweep_into(&set, &mut sink);
        assert_eq!(sink.into_canonical(), vec![('A', 'B')]);
        assert_eq!(stats.events, 6);
        assert_eq!(stats.pairs, 1);
    }

    #[test]
    fn empty_and_singleton_yield_nothing() {
        let empty: BoxSet<u32> = BoxSet::new();
        assert!(sweep_pairs(&empty).is_empty());
        let mut one = BoxSet::new();
        one.push(bx([0.0; 3], [1.0; 3]), 7u32);
        assert!(sweep_pairs(&one).is_empty());
    }

    #[test]
    fn x_overlap_without_z_overlap_is_pruned() {
        let set: BoxSet<u8> = [
            (bx([0.0, 0.0, 0.0], [4.0, 1.0, 1.0]), 0),
            (bx([1.0, 0.0, 3.0], [2.0, 1.0, 4.0]), 1),
        ]
        .into_iter()
        .collect();
        let mut sink = PairSink::new();
        let stats = sweep_into(&set, &mut sink);
        assert!(sink.is_empty());
        assert_eq!(stats.candidates, 0, "z-rank range should exclude the other box");
    }

    #[test]
    fn scratch_reuse_gives_same_answer() {
        let a: BoxSet<u8> = (0..6u8)
            .map(|i| {
                let x = f32::from(i);
                (bx([x, 0.0, 0.0], [x + 2.5, 1.0, 1.0]), i)
            })
            .collect();
        let b: BoxSet<u8> = [(bx([0.0; 3], [1.0; 3]), 0), (bx([0.5; 3], [2.0; 3]), 1)]
            .into_iter()
            .collect();

        let mut sweep = DualAxisSweep::new();
        let mut first = PairSink::new();
        let _ = sweep.run(&a, &mut first);
        let mut second = PairSink::new();
        let _ = sweep.run(&b, &mut second);
        let mut third = PairSink::new();
        let _ = sweep.run(&a, &mut third);

        assert_eq!(second.into_canonical(), vec![(0, 1)]);
        assert_eq!(first.into_canonical(), third.clone().into_canonical());
        assert_eq!(third.len(), 9);
    }

    #[test]
    fn nan_box_pairs_with_nothing() {
        let set: BoxSet<u8> = [
            (bx([0.0; 3], [2.0; 3]), 0),
            (
                Aabb::new_unchecked(Vec3::new(0.0, f32::NAN, 0.0), Vec3::splat(1.0)),
                1,
            ),
            (bx([1.0; 3], [3.0; 3]), 2),
        ]
        .into_iter()
        .collect();
        let mut sink = PairSink::new();
        let stats = sweep_into(&set, &mut sink);
        assert_eq!(sink.into_canonical(), vec![(0, 2)]);
        assert_eq!(stats.slots, 2);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "min > max passed to the broad phase")]
    fn inverted_box_is_fatal_in_debug() {
        let inverted = Aabb::new_unchecked(Vec3::new(0.0, 4.0, 0.0), Vec3::splat(1.0));
        let set: BoxSet<u8> = [(bx([0.0; 3], [1.0; 3]), 0), (inverted, 1)]
            .into_iter()
            .collect();
        let _ = sweep_pairs(&set);
    }
}
