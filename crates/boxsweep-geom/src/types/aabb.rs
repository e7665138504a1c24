// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::cmp::Ordering;

use crate::math::Vec3;
use crate::types::axis::Axis;
use thiserror::Error;

/// Rejection reasons for [`Aabb::try_new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AabbError {
    /// `min` exceeds `max` on the named axis.
    #[error("invalid AABB: min > max on {axis} axis")]
    Inverted {
        /// Offending axis.
        axis: Axis,
    },
}

/// Axis-aligned bounding box in world coordinates.
///
/// Invariants:
/// - `min` components are less than or equal to `max` components, except that
///   NaN components are let through (no ordering holds, so the box simply never
///   overlaps anything).
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    min: Vec3,
    max: Vec3,
}

impl Aabb {
    /// Constructs an AABB from its minimum and maximum corners.
    ///
    /// # Panics
    /// Panics if any component of `min` is greater than its counterpart in `max`.
    #[must_use]
    #[allow(clippy::panic)]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        match Self::try_new(min, max) {
            Ok(aabb) => aabb,
            Err(err) => panic!("{err}"),
        }
    }

    /// Constructs an AABB, returning an error instead of panicking on inverted bounds.
    pub fn try_new(min: Vec3, max: Vec3) -> Result<Self, AabbError> {
        for axis in Axis::ALL {
            if min.component(axis) > max.component(axis) {
                return Err(AabbError::Inverted { axis });
            }
        }
        Ok(Self { min, max })
    }

    /// Constructs an AABB without validating bounds.
    ///
    /// Intended for tests that need to feed malformed boxes to checked entry points.
    #[must_use]
    pub const fn new_unchecked(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Returns the minimum corner.
    #[must_use]
    pub fn min(&self) -> Vec3 {
        self.min
    }

    /// Returns the maximum corner.
    #[must_use]
    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Minimum bound along `axis`.
    #[inline]
    #[must_use]
    pub fn min_on(&self, axis: Axis) -> f32 {
        self.min.component(axis)
    }

    /// Maximum bound along `axis`.
    #[inline]
    #[must_use]
    pub fn max_on(&self, axis: Axis) -> f32 {
        self.max.component(axis)
    }

    /// Builds an AABB centered at `center` with half-extents `hx, hy, hz`.
    #[must_use]
    pub fn from_center_half_extents(center: Vec3, hx: f32, hy: f32, hz: f32) -> Self {
        let he = Vec3::new(hx, hy, hz);
        Self::new(center.sub(&he), center.add(&he))
    }

    /// Returns `true` if no axis has `min > max`.
    ///
    /// NaN bounds count as well formed; see [`Aabb::has_nan`].
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        Axis::ALL.iter().all(|&axis| {
            self.min_on(axis).partial_cmp(&self.max_on(axis)) != Some(Ordering::Greater)
        })
    }

    /// Returns `true` if any bound is NaN.
    #[must_use]
    pub fn has_nan(&self) -> bool {
        Axis::ALL
            .iter()
            .any(|&axis| self.min_on(axis).is_nan() || self.max_on(axis).is_nan())
    }

    /// Closed-interval overlap along a single axis.
    ///
    /// Same truth table as `!(a.max < b.min || a.min > b.max)` for ordered
    /// values, but phrased so that any NaN operand yields `false`.
    #[inline]
    #[must_use]
    pub fn overlaps_on(&self, axis: Axis, other: &Self) -> bool {
        self.min_on(axis) <= other.max_on(axis) && self.max_on(axis) >= other.min_on(axis)
    }

    /// Returns `true` if this AABB overlaps another (inclusive on faces).
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.overlaps_on(Axis::X, other)
            && self.overlaps_on(Axis::Y, other)
            && self.overlaps_on(Axis::Z, other)
    }

    /// Overlap on Y and Z only, for callers that already know X overlaps.
    #[inline]
    #[must_use]
    pub fn overlaps_yz(&self, other: &Self) -> bool {
        self.overlaps_on(Axis::Y, other) && self.overlaps_on(Axis::Z, other)
    }

    /// Returns the union of two AABBs.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(&other.min),
            max: self.max.max(&other.max),
        }
    }
}
