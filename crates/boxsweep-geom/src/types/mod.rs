// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Core geometry types used by the broad phase (AABB, axis tags).
//!
//! Overlap semantics are inclusive on faces so pairs do not flicker when two
//! boxes merely touch.

#[doc = "Axis-aligned bounding boxes (world space)."]
pub mod aabb;
#[doc = "Coordinate axis tags."]
pub mod axis;
