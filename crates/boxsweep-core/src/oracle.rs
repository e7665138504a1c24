// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Exhaustive all-pairs reference used to check the sweep.

use crate::sink::PairSink;
use crate::store::BoxSet;

/// Tests every `i < j` pair with the full three-axis overlap predicate.
///
/// `O(n^2)`; shares no bookkeeping with the sweep so it can serve as an
/// independent answer.
pub fn brute_force_into<Id: Copy>(boxes: &BoxSet<Id>, sink: &mut PairSink<Id>) {
    let aabbs = boxes.aabbs();
    let ids = boxes.ids();
    for (i, a) in aabbs.iter().enumerate() {
        for (j, b) in aabbs.iter().enumerate().skip(i + 1) {
            if a.overlaps(b) {
                sink.push(ids[i], ids[j]);
            }
        }
    }
}

/// Convenience wrapper around [`brute_force_into`].
pub fn brute_force_pairs<Id: Copy>(boxes: &BoxSet<Id>) -> Vec<(Id, Id)> {
    let mut sink = PairSink::new();
    brute_force_into(boxes, &mut sink);
    sink.into_vec()
}
