// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Caller-supplied box data: bounds plus an opaque identifier per box.

use boxsweep_geom::{Aabb, Axis};
use thiserror::Error;

/// Contract violations detected by [`BoxSet::from_parts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoxSetError {
    /// Bounds and identifier arrays differ in length.
    #[error("length mismatch: {boxes} boxes but {ids} ids")]
    LengthMismatch {
        /// Number of boxes supplied.
        boxes: usize,
        /// Number of identifiers supplied.
        ids: usize,
    },
    /// A box has `min > max` on some axis.
    #[error("box {index} has min > max on {axis} axis")]
    InvertedBounds {
        /// Position of the offending box.
        index: usize,
        /// Offending axis.
        axis: Axis,
    },
    /// A box repeats an identifier already used by an earlier box.
    #[error("box {index} repeats the id of box {first}")]
    DuplicateId {
        /// Position of the repeating box.
        index: usize,
        /// Position of the box that first used the id.
        first: usize,
    },
}

/// Immutable struct-of-arrays box store consumed by one broad-phase call.
///
/// `aabbs[i]` and `ids[i]` describe the same box. Identifiers are opaque to the
/// kernel; they are only copied into the output pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSet<Id> {
    aabbs: Vec<Aabb>,
    ids: Vec<Id>,
}

impl<Id> BoxSet<Id> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self {
            aabbs: Vec::new(),
            ids: Vec::new(),
        }
    }

    /// Creates an empty set with room for `n` boxes.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            aabbs: Vec::with_capacity(n),
            ids: Vec::with_capacity(n),
        }
    }

    /// Builds a set from parallel arrays, rejecting malformed input.
    ///
    /// # Errors
    /// [`BoxSetError::LengthMismatch`] when the arrays differ in length and
    /// [`BoxSetError::InvertedBounds`] for the first box with `min > max`.
    /// NaN bounds are accepted; such boxes never overlap anything.
    pub fn from_parts(aabbs: Vec<Aabb>, ids: Vec<Id>) -> Result<Self, BoxSetError> {
        if aabbs.len() != ids.len() {
            return Err(BoxSetError::LengthMismatch {
                boxes: aabbs.len(),
                ids: ids.len(),
            });
        }
        for (index, aabb) in aabbs.iter().enumerate() {
            if let Some(axis) = inverted_axis(aabb) {
                return Err(BoxSetError::InvertedBounds { index, axis });
            }
        }
        Ok(Self { aabbs, ids })
    }

    /// Appends a box.
    pub fn push(&mut self, aabb: Aabb, id: Id) {
        self.aabbs.push(aabb);
        self.ids.push(id);
    }

    /// Number of boxes.
    pub fn len(&self) -> usize {
        self.aabbs.len()
    }

    /// Returns `true` if the set holds no boxes.
    pub fn is_empty(&self) -> bool {
        self.aabbs.is_empty()
    }

    /// Box bounds, in insertion order.
    pub fn aabbs(&self) -> &[Aabb] {
        &self.aabbs
    }

    /// Box identifiers, parallel to [`BoxSet::aabbs`].
    pub fn ids(&self) -> &[Id] {
        &self.ids
    }

    /// Returns the bounds and identifier of box `i`.
    pub fn get(&self, i: usize) -> Option<(&Aabb, &Id)> {
        Some((self.aabbs.get(i)?, self.ids.get(i)?))
    }

    /// Smallest box enclosing every box without NaN bounds, if any.
    pub fn bounds(&self) -> Option<Aabb> {
        self.aabbs
            .iter()
            .filter(|aabb| !aabb.has_nan())
            .copied()
            .reduce(|acc, aabb| acc.union(&aabb))
    }

    /// Removes every box, keeping the allocations.
    pub fn clear(&mut self) {
        self.aabbs.clear();
        self.ids.clear();
    }

    /// Debug-build check of the input contract.
    pub(crate) fn debug_validate(&self) {
        debug_assert_eq!(
            self.aabbs.len(),
            self.ids.len(),
            "box/id length mismatch"
        );
        debug_assert!(
            self.aabbs.iter().all(Aabb::is_well_formed),
            "box with min > max passed to the broad phase"
        );
    }
}

impl<Id> Default for BoxSet<Id> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id> FromIterator<(Aabb, Id)> for BoxSet<Id> {
    fn from_iter<I: IntoIterator<Item = (Aabb, Id)>>(iter: I) -> Self {
        let (aabbs, ids) = iter.into_iter().unzip();
        Self { aabbs, ids }
    }
}

fn inverted_axis(aabb: &Aabb) -> Option<Axis> {
    Axis::ALL
        .into_iter()
        .find(|&axis| aabb.min_on(axis) > aabb.max_on(axis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxsweep_geom::Vec3;

    fn unit() -> Aabb {
        Aabb::new(Vec3::ZERO, Vec3::splat(1.0))
    }

    #[test]
    fn from_parts_rejects_length_mismatch() {
        let err = BoxSet::from_parts(vec![unit(), unit()], vec![1u32]);
        assert_eq!(
            err,
            Err(BoxSetError::LengthMismatch { boxes: 2, ids: 1 })
        );
    }

    #[test]
    fn from_parts_rejects_inverted_box() {
        let bad = Aabb::new_unchecked(Vec3::new(0.0, 0.0, 3.0), Vec3::splat(1.0));
        let err = BoxSet::from_parts(vec![unit(), bad], vec![0u32, 1]);
        assert_eq!(
            err,
            Err(BoxSetError::InvertedBounds {
                index: 1,
                axis: Axis::Z
            })
        );
    }

    #[test]
    fn from_parts_accepts_nan_bounds() {
        let nan = Aabb::new_unchecked(Vec3::new(f32::NAN, 0.0, 0.0), Vec3::splat(1.0));
        let set = BoxSet::from_parts(vec![nan], vec!["a"]);
        assert!(set.is_ok());
    }

    #[test]
    fn bounds_skip_nan_boxes() {
        let far = Aabb::new(Vec3::new(-4.0, 2.0, 0.5), Vec3::new(-3.0, 9.0, 0.75));
        let nan = Aabb::new_unchecked(Vec3::new(f32::NAN, 0.0, 0.0), Vec3::splat(100.0));
        let set: BoxSet<u8> = [(unit(), 0), (nan, 1), (far, 2)].into_iter().collect();
        assert_eq!(
            set.bounds(),
            Some(Aabb::new(Vec3::new(-4.0, 0.0, 0.0), Vec3::new(1.0, 9.0, 1.0)))
        );
        assert_eq!(BoxSet::<u8>::new().bounds(), None);
    }

    #[test]
    fn collect_and_get() {
        let set: BoxSet<char> = [(unit(), 'a'), (unit(), 'b')].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(1).map(|(_, id)| *id), Some('b'));
        assert!(set.get(2).is_none());
    }
}
