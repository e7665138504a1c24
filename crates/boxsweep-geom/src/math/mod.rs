// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Vector helpers and seeded random numbers for reproducible scenes.
//!
//! All operations round to `f32`.

mod prng;
mod vec3;

pub use prng::Prng;
pub use vec3::Vec3;
