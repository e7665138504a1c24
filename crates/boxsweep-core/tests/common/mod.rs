// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(dead_code)]

use boxsweep_core::{Aabb, BoxSet, Vec3};
use proptest::prelude::*;

pub fn bx(min: [f32; 3], max: [f32; 3]) -> Aabb {
    Aabb::new(Vec3::from(min), Vec3::from(max))
}

/// Boxes on a coarse integer lattice: many shared coordinates, touching faces
/// and zero-width boxes.
pub fn lattice_box() -> impl Strategy<Value = Aabb> {
    (
        prop::array::uniform3(-12i16..12),
        prop::array::uniform3(0i16..6),
    )
        .prop_map(|(lo, size)| {
            let min = lo.map(f32::from);
            let max = [
                f32::from(lo[0] + size[0]),
                f32::from(lo[1] + size[1]),
                f32::from(lo[2] + size[2]),
            ];
            bx(min, max)
        })
}

/// Boxes with arbitrary finite float coordinates.
pub fn float_box() -> impl Strategy<Value = Aabb> {
    (
        prop::array::uniform3(-500.0f32..500.0),
        prop::array::uniform3(0.0f32..60.0),
    )
        .prop_map(|(c, h)| Aabb::from_center_half_extents(Vec3::from(c), h[0], h[1], h[2]))
}

pub fn mixed_box() -> impl Strategy<Value = Aabb> {
    prop_oneof![lattice_box(), float_box()]
}

pub fn box_set(max_len: usize) -> impl Strategy<Value = BoxSet<u32>> {
    prop::collection::vec(mixed_box(), 0..max_len)
        .prop_map(|aabbs| aabbs.into_iter().zip(0u32..).collect())
}
