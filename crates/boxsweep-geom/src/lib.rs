// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Geometry primitives for Boxsweep.

This crate provides:
- A small `f32` vector type (`Vec3`) and a deterministic PRNG (`Prng`).
- Axis-aligned bounding boxes (`Aabb`) with closed-interval overlap tests.
- Axis tags (`Axis`) so per-axis code can be written once.

Design notes:
- Float32 throughout; comparisons follow plain IEEE semantics, so a NaN bound
  never satisfies an overlap test.
- Overlap is inclusive on faces (touching boxes overlap).
- Rustdoc is treated as part of the contract; public items are documented.
"]

/// Vector math and deterministic random numbers.
pub mod math;
/// Foundational geometric types.
pub mod types;

pub use math::{Prng, Vec3};
pub use types::aabb::{Aabb, AabbError};
pub use types::axis::Axis;
