// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use crate::types::axis::Axis;

/// 3D vector used for box corners and extents.
///
/// * Components are plain `f32`; NaN is allowed and makes a box inert.
/// * The type is `Copy` and `repr(C)` so slices of corners stay densely packed.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "[f32; 3]", into = "[f32; 3]"))]
pub struct Vec3 {
    data: [f32; 3],
}

impl Vec3 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Creates a vector from components.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { data: [x, y, z] }
    }

    /// Creates a vector with every component set to `v`.
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    /// Returns the components as an array.
    pub fn to_array(self) -> [f32; 3] {
        self.data
    }

    /// Returns the component along `axis`.
    #[inline]
    pub fn component(&self, axis: Axis) -> f32 {
        self.data[axis.index()]
    }

    /// Adds two vectors.
    pub fn add(&self, other: &Self) -> Self {
        Self::new(
            self.data[0] + other.data[0],
            self.data[1] + other.data[1],
            self.data[2] + other.data[2],
        )
    }

    /// Subtracts another vector.
    pub fn sub(&self, other: &Self) -> Self {
        Self::new(
            self.data[0] - other.data[0],
            self.data[1] - other.data[1],
            self.data[2] - other.data[2],
        )
    }

    /// Component-wise minimum.
    pub fn min(&self, other: &Self) -> Self {
        Self::new(
            self.data[0].min(other.data[0]),
            self.data[1].min(other.data[1]),
            self.data[2].min(other.data[2]),
        )
    }

    /// Component-wise maximum.
    pub fn max(&self, other: &Self) -> Self {
        Self::new(
            self.data[0].max(other.data[0]),
            self.data[1].max(other.data[1]),
            self.data[2].max(other.data[2]),
        )
    }
}

/// Converts a 3-element `[f32; 3]` array into a `Vec3` interpreted as `(x, y, z)`.
///
/// # Examples
/// ```
/// use boxsweep_geom::Vec3;
/// let v = Vec3::from([1.0, 2.0, 3.0]);
/// assert_eq!(v.to_array(), [1.0, 2.0, 3.0]);
/// ```
impl From<[f32; 3]> for Vec3 {
    fn from(value: [f32; 3]) -> Self {
        Self { data: value }
    }
}

impl From<Vec3> for [f32; 3] {
    fn from(value: Vec3) -> Self {
        value.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_matches_axis() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.component(Axis::X), 1.0);
        assert_eq!(v.component(Axis::Y), 2.0);
        assert_eq!(v.component(Axis::Z), 3.0);
    }

    #[test]
    fn add_sub_round_trip_corners() {
        let center = Vec3::new(1.0, -2.0, 3.0);
        let half = Vec3::new(0.5, 1.0, 2.0);
        assert_eq!(center.sub(&half).to_array(), [0.5, -3.0, 1.0]);
        assert_eq!(center.add(&half).to_array(), [1.5, -1.0, 5.0]);
    }

    #[test]
    fn min_max_are_componentwise() {
        let a = Vec3::new(1.0, 5.0, -2.0);
        let b = Vec3::new(3.0, 0.0, -1.0);
        assert_eq!(a.min(&b).to_array(), [1.0, 0.0, -2.0]);
        assert_eq!(a.max(&b).to_array(), [3.0, 5.0, -1.0]);
    }
}
