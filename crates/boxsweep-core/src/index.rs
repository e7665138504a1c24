// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Axis index builder: X-sorted slots, the merged enter/leave event stream and
//! per-slot Z-rank ranges.
//!
//! Vocabulary:
//! - A *slot* is a box's position in X-min order. Everything downstream of the
//!   builder addresses boxes by slot.
//! - A *rank* is a box's position in Z-min order (dense, `0..slots`).
//! - The Z-rank range `[z_begin, z_end)` of a slot covers every rank whose box
//!   can overlap it along Z. It is a superset; the exact test decides.
//!
//! Ties are broken so that closed intervals behave: at equal coordinates an
//! enter (min) event is ordered before a leave (max) event.
//!
//! Boxes with a NaN bound receive no slot. They can never satisfy the overlap
//! predicate, and their events would not have a meaningful position.

use core::cmp::Ordering;

use boxsweep_geom::{Aabb, Axis};

/// Whether an event opens or closes a box's X-interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// The sweep reached the box's X-min.
    Enter,
    /// The sweep passed the box's X-max.
    Leave,
}

/// One endpoint of a box's X-interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XEvent {
    /// Coordinate of the endpoint.
    pub value: f32,
    /// X-sorted slot of the box.
    pub slot: usize,
    /// Endpoint kind.
    pub kind: EventKind,
}

/// Sorted views of one box set, rebuilt once per sweep.
#[derive(Debug, Clone, Default)]
pub struct AxisIndex {
    x_order: Vec<usize>,
    slot_boxes: Vec<Aabb>,
    events: Vec<XEvent>,
    z_rank: Vec<usize>,
    z_begin: Vec<usize>,
    z_end: Vec<usize>,
    // Scratch, kept to reuse allocations across rebuilds.
    leave_order: Vec<usize>,
    z_order: Vec<usize>,
    z_max_order: Vec<usize>,
    alive: Vec<bool>,
}

impl AxisIndex {
    /// Builds the index for `aabbs`.
    pub fn build(aabbs: &[Aabb]) -> Self {
        let mut index = Self::default();
        index.rebuild(aabbs);
        index
    }

    /// Rebuilds the index in place, reusing existing allocations.
    pub fn rebuild(&mut self, aabbs: &[Aabb]) {
        self.build_x_order(aabbs);
        self.build_events();
        self.build_z_ranges();
    }

    /// Number of slots (boxes without NaN bounds).
    pub fn slot_count(&self) -> usize {
        self.x_order.len()
    }

    /// Slot -> original box index.
    pub fn x_order(&self) -> &[usize] {
        &self.x_order
    }

    /// Original box index of `slot`.
    #[inline]
    pub fn box_of(&self, slot: usize) -> usize {
        self.x_order[slot]
    }

    /// Bounds of `slot`, copied in X order for locality.
    #[inline]
    pub fn slot_box(&self, slot: usize) -> &Aabb {
        &self.slot_boxes[slot]
    }

    /// The `2 * slot_count()` enter/leave events in ascending X order.
    pub fn events(&self) -> &[XEvent] {
        &self.events
    }

    /// Z-rank of `slot`.
    #[inline]
    pub fn z_rank(&self, slot: usize) -> usize {
        self.z_rank[slot]
    }

    /// Half-open Z-rank range `[z_begin, z_end)` of `slot`.
    #[inline]
    pub fn z_range(&self, slot: usize) -> (usize, usize) {
        (self.z_begin[slot], self.z_end[slot])
    }

    fn build_x_order(&mut self, aabbs: &[Aabb]) {
        self.x_order.clear();
        self.x_order
            .extend((0..aabbs.len()).filter(|&i| !aabbs[i].has_nan()));
        self.x_order
            .sort_unstable_by(|&a, &b| by_then_index(aabbs, Aabb::min_on, Axis::X, a, b));

        self.slot_boxes.clear();
        self.slot_boxes
            .extend(self.x_order.iter().map(|&i| aabbs[i]));
    }

    fn build_events(&mut self) {
        let boxes = &self.slot_boxes;
        let n = boxes.len();

        self.leave_order.clear();
        self.leave_order.extend(0..n);
        self.leave_order
            .sort_unstable_by(|&a, &b| by_then_index(boxes, Aabb::max_on, Axis::X, a, b));

        self.events.clear();
        self.events.reserve(2 * n);
        let (mut enter, mut leave) = (0, 0);
        while leave < n {
            let closing = self.leave_order[leave];
            let close_at = boxes[closing].max_on(Axis::X);
            if enter < n && boxes[enter].min_on(Axis::X) <= close_at {
                self.events.push(XEvent {
                    value: boxes[enter].min_on(Axis::X),
                    slot: enter,
                    kind: EventKind::Enter,
                });
                enter += 1;
            } else {
                self.events.push(XEvent {
                    value: close_at,
                    slot: closing,
                    kind: EventKind::Leave,
                });
                leave += 1;
            }
        }
        debug_assert_eq!(enter, n, "every box enters before the last leave");
    }

    fn build_z_ranges(&mut self) {
        let boxes = &self.slot_boxes;
        let n = boxes.len();

        // rank -> slot
        self.z_order.clear();
        self.z_order.extend(0..n);
        self.z_order
            .sort_unstable_by(|&a, &b| by_then_index(boxes, Aabb::min_on, Axis::Z, a, b));

        self.z_rank.clear();
        self.z_rank.resize(n, 0);
        for (rank, &slot) in self.z_order.iter().enumerate() {
            self.z_rank[slot] = rank;
        }

        // ranks ordered by Z-max
        let z_order = &self.z_order;
        self.z_max_order.clear();
        self.z_max_order.extend(0..n);
        self.z_max_order.sort_unstable_by(|&a, &b| {
            boxes[z_order[a]]
                .max_on(Axis::Z)
                .total_cmp(&boxes[z_order[b]].max_on(Axis::Z))
                .then(a.cmp(&b))
        });

        self.z_begin.clear();
        self.z_begin.resize(n, 0);
        self.z_end.clear();
        self.z_end.resize(n, 0);
        self.alive.clear();
        self.alive.resize(n, false);

        // Merge Z-min events (by rank) with Z-max events, mins first at ties.
        let (mut opened, mut closed, mut lowest_alive) = (0, 0, 0);
        while closed < n {
            let closing = self.z_max_order[closed];
            let close_at = boxes[z_order[closing]].max_on(Axis::Z);
            if opened < n && boxes[z_order[opened]].min_on(Axis::Z) <= close_at {
                self.alive[opened] = true;
                while !self.alive[lowest_alive] {
                    lowest_alive += 1;
                }
                self.z_begin[z_order[opened]] = lowest_alive;
                opened += 1;
            } else {
                self.alive[closing] = false;
                self.z_end[z_order[closing]] = opened;
                closed += 1;
            }
        }
    }
}

fn by_then_index(
    boxes: &[Aabb],
    bound: fn(&Aabb, Axis) -> f32,
    axis: Axis,
    a: usize,
    b: usize,
) -> Ordering {
    bound(&boxes[a], axis)
        .total_cmp(&bound(&boxes[b], axis))
        .then(a.cmp(&b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxsweep_geom::Vec3;

    fn bx(min: [f32; 3], max: [f32; 3]) -> Aabb {
        Aabb::new(Vec3::from(min), Vec3::from(max))
    }

    #[test]
    fn empty_input_builds_empty_index() {
        let index = AxisIndex::build(&[]);
        assert_eq!(index.slot_count(), 0);
        assert!(index.events().is_empty());
    }

    #[test]
    fn slots_follow_x_min() {
        let boxes = [
            bx([5.0, 0.0, 0.0], [6.0, 1.0, 1.0]),
            bx([-1.0, 0.0, 0.0], [0.0, 1.0, 1.0]),
            bx([2.0, 0.0, 0.0], [3.0, 1.0, 1.0]),
        ];
        let index = AxisIndex::build(&boxes);
        assert_eq!(index.x_order(), &[1, 2, 0]);
        assert_eq!(index.slot_box(0), &boxes[1]);
    }

    #[test]
    fn enter_precedes_leave_at_equal_coordinate() {
        let boxes = [
            bx([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]),
            bx([1.0, 0.0, 0.0], [2.0, 1.0, 1.0]),
        ];
        let index = AxisIndex::build(&boxes);
        let kinds: Vec<(usize, EventKind)> =
            index.events().iter().map(|e| (e.slot, e.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                (0, EventKind::Enter),
                (1, EventKind::Enter),
                (0, EventKind::Leave),
                (1, EventKind::Leave),
            ]
        );
    }

    #[test]
    fn events_are_ascending_and_paired() {
        let boxes: Vec<Aabb> = (0..20)
            .map(|i| {
                let x = ((i * 7) % 11) as f32;
                bx([x, 0.0, 0.0], [x + (i % 3) as f32, 1.0, 1.0])
            })
            .collect();
        let index = AxisIndex::build(&boxes);
        let events = index.events();
        assert_eq!(events.len(), 40);
        assert!(events.windows(2).all(|w| w[0].value <= w[1].value));
        let mut entered = vec![false; 20];
        for e in events {
            match e.kind {
                EventKind::Enter => entered[e.slot] = true,
                EventKind::Leave => assert!(entered[e.slot], "leave before enter"),
            }
        }
    }

    #[test]
    fn z_ranges_cover_every_z_overlap() {
        let boxes = [
            bx([0.0, 0.0, 0.0], [1.0, 1.0, 10.0]),
            bx([0.0, 0.0, 2.0], [1.0, 1.0, 3.0]),
            bx([0.0, 0.0, 4.0], [1.0, 1.0, 5.0]),
            bx([0.0, 0.0, 5.0], [1.0, 1.0, 6.0]),
            bx([0.0, 0.0, 20.0], [1.0, 1.0, 21.0]),
        ];
        let index = AxisIndex::build(&boxes);
        let n = index.slot_count();
        for a in 0..n {
            let (begin, end) = index.z_range(a);
            assert!(begin <= index.z_rank(a) && index.z_rank(a) < end);
            for b in 0..n {
                if index.slot_box(a).overlaps_on(Axis::Z, index.slot_box(b)) {
                    let r = index.z_rank(b);
                    assert!(
                        (begin..end).contains(&r),
                        "slot {b} (rank {r}) overlaps slot {a} but lies outside [{begin}, {end})"
                    );
                }
            }
        }
        // The far box sees nothing below it: everything else has closed.
        let far = index.x_order().iter().position(|&i| i == 4).unwrap_or(usize::MAX);
        assert_eq!(index.z_range(far), (4, 5));
    }

    #[test]
    fn nan_boxes_get_no_slot() {
        let boxes = [
            bx([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]),
            Aabb::new_unchecked(Vec3::new(f32::NAN, 0.0, 0.0), Vec3::splat(1.0)),
            bx([0.5, 0.0, 0.0], [1.0, 1.0, 1.0]),
        ];
        let index = AxisIndex::build(&boxes);
        assert_eq!(index.slot_count(), 2);
        assert_eq!(index.x_order(), &[0, 2]);
        assert_eq!(index.events().len(), 4);
    }

    #[test]
    fn rebuild_reuses_and_replaces() {
        let mut index = AxisIndex::build(&[bx([0.0; 3], [1.0; 3]); 4]);
        index.rebuild(&[bx([0.0; 3], [1.0; 3])]);
        assert_eq!(index.slot_count(), 1);
        assert_eq!(index.events().len(), 2);
        assert_eq!(index.z_range(0), (0, 1));
    }
}
