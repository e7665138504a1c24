// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Deterministic box scenes for tools, benches and tests, plus their JSON
//! config format.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use boxsweep_geom::{Aabb, Prng, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::{BoxSet, BoxSetError};

/// Upper bound on generated box counts.
pub const MAX_SCENARIO_COUNT: usize = 1 << 24;

/// Error type for scenario and box-file loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File not present.
    #[error("not found: {0}")]
    NotFound(String),
    /// I/O error while reading.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Values parsed but violate a constraint.
    #[error("invalid config: {0}")]
    Invalid(String),
    /// Box file contents rejected by the box store.
    #[error("invalid boxes: {0}")]
    Boxes(#[from] BoxSetError),
}

/// Parameters of a generated scene.
///
/// Centers are uniform in `[-extent, extent)^3`; half-extents are uniform in
/// `[min_half, max_half)` per axis. With `grid` set, centers snap to multiples
/// of `grid` and half-extents to multiples of `grid / 2`, which produces many
/// exactly touching faces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioSpec {
    /// Number of boxes.
    pub count: usize,
    /// PRNG seed.
    pub seed: u64,
    /// Half-width of the cube that holds the box centers.
    pub extent: f32,
    /// Smallest half-extent.
    pub min_half: f32,
    /// Largest half-extent.
    pub max_half: f32,
    /// Optional snapping grid.
    pub grid: Option<f32>,
}

impl Default for ScenarioSpec {
    fn default() -> Self {
        Self {
            count: 1_000,
            seed: 0x5eed,
            extent: 100.0,
            min_half: 0.5,
            max_half: 4.0,
            grid: None,
        }
    }
}

impl ScenarioSpec {
    /// Checks value constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count > MAX_SCENARIO_COUNT {
            return Err(ConfigError::Invalid(format!(
                "count {} exceeds {MAX_SCENARIO_COUNT}",
                self.count
            )));
        }
        if !(self.extent.is_finite() && self.extent > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "extent must be finite and positive, got {}",
                self.extent
            )));
        }
        if !(self.min_half.is_finite() && self.min_half >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "min_half must be finite and non-negative, got {}",
                self.min_half
            )));
        }
        if !(self.max_half.is_finite() && self.max_half >= self.min_half) {
            return Err(ConfigError::Invalid(format!(
                "max_half must be finite and >= min_half, got {}",
                self.max_half
            )));
        }
        if let Some(grid) = self.grid {
            if !(grid.is_finite() && grid > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "grid must be finite and positive, got {grid}"
                )));
            }
        }
        Ok(())
    }

    /// Parses and validates a JSON scenario.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, ConfigError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        let spec: Self = serde_json::from_slice(bytes)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Reads a JSON scenario from `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_json_slice(&read(path)?)
    }

    /// Serializes the scenario as pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Generates the boxes described by `spec`, with ids `0..count`.
///
/// Callers should [`ScenarioSpec::validate`] first; an unvalidated spec with
/// inverted half-extent bounds yields degenerate (zero-width) boxes rather
/// than panicking.
pub fn generate(spec: &ScenarioSpec) -> BoxSet<u32> {
    let mut prng = Prng::from_seed_u64(spec.seed);
    let mut boxes = BoxSet::with_capacity(spec.count);
    for id in (0u32..).take(spec.count) {
        let mut center = [0.0f32; 3];
        for c in &mut center {
            *c = prng.next_range(-spec.extent, spec.extent);
        }
        let mut half = [0.0f32; 3];
        for h in &mut half {
            *h = prng.next_range(spec.min_half, spec.max_half);
        }
        if let Some(grid) = spec.grid {
            let step = grid * 0.5;
            for c in &mut center {
                *c = (*c / grid).round() * grid;
            }
            for h in &mut half {
                *h = ((*h / step).round() * step).max(step);
            }
        }
        let center = Vec3::from(center);
        let half = Vec3::from(half);
        let aabb = Aabb::try_new(center.sub(&half), center.add(&half))
            .unwrap_or_else(|_| Aabb::new(center, center));
        boxes.push(aabb, id);
    }
    boxes
}

/// One box in a JSON box file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoxRecord {
    /// Minimum corner.
    pub min: [f32; 3],
    /// Maximum corner.
    pub max: [f32; 3],
    /// Identifier; defaults to the record's position.
    #[serde(default)]
    pub id: Option<u32>,
}

/// A JSON box file: `{ "boxes": [ { "min": [..], "max": [..], "id": 7 }, .. ] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoxFile {
    /// Box records.
    pub boxes: Vec<BoxRecord>,
}

impl BoxFile {
    /// Converts the records into a validated [`BoxSet`].
    ///
    /// A record without an `id` takes its position. Every resulting id must be
    /// unique, otherwise one box could pair with itself.
    pub fn into_box_set(self) -> Result<BoxSet<u32>, ConfigError> {
        let mut aabbs = Vec::with_capacity(self.boxes.len());
        let mut ids = Vec::with_capacity(self.boxes.len());
        let mut seen = BTreeMap::new();
        for (index, (record, position)) in self.boxes.into_iter().zip(0u32..).enumerate() {
            let id = record.id.unwrap_or(position);
            if let Some(&first) = seen.get(&id) {
                return Err(BoxSetError::DuplicateId { index, first }.into());
            }
            seen.insert(id, index);
            aabbs.push(Aabb::new_unchecked(
                Vec3::from(record.min),
                Vec3::from(record.max),
            ));
            ids.push(id);
        }
        Ok(BoxSet::from_parts(aabbs, ids)?)
    }

    /// Builds a box file from a box set.
    pub fn from_box_set(boxes: &BoxSet<u32>) -> Self {
        let boxes = boxes
            .aabbs()
            .iter()
            .zip(boxes.ids())
            .map(|(aabb, id)| BoxRecord {
                min: aabb.min().to_array(),
                max: aabb.max().to_array(),
                id: Some(*id),
            })
            .collect();
        Self { boxes }
    }

    /// Reads and validates a JSON box file from `path`.
    pub fn load(path: &Path) -> Result<BoxSet<u32>, ConfigError> {
        let file: Self = serde_json::from_slice(&read(path)?)?;
        file.into_box_set()
    }
}

fn read(path: &Path) -> Result<Vec<u8>, ConfigError> {
    match fs::read(path) {
        Ok(bytes) => Ok(bytes),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            Err(ConfigError::NotFound(path.display().to_string()))
        }
        Err(err) => Err(ConfigError::Io(err)),
    }
}
