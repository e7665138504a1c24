// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! boxsweep-core: dual-axis sweep-and-prune over 3D axis-aligned boxes.
//!
//! Given `n` boxes with opaque identifiers, report every unordered pair whose
//! boxes intersect (closed intervals: touching faces count). The optimized path
//! sorts along X and keeps the boxes that straddle the sweep position in an
//! [`ActiveSet`] keyed by Z-rank, so each entering box only inspects active
//! boxes whose Z-min rank can reach it.
//!
//! Data flows one way:
//! [`BoxSet`] -> [`AxisIndex`] -> [`DualAxisSweep`] (over [`ActiveSet`]) -> [`PairSink`].
//!
//! A single run is sequential and owns its scratch; run independent box sets
//! on independent [`DualAxisSweep`] values to parallelize.
#![forbid(unsafe_code)]

/// Active interval set (two-level bitset + rank-linked list).
pub mod active;
/// Proxy-based broad-phase trait and implementations.
pub mod broad;
/// Axis index builder (X events, Z-rank ranges).
pub mod index;
/// Exhaustive reference implementation.
pub mod oracle;
/// Deterministic scenes and their JSON formats.
pub mod scenario;
/// Output pair buffer.
pub mod sink;
/// Box store.
pub mod store;
/// Sweep driver.
pub mod sweep;

pub use active::{ActiveSet, Query};
pub use broad::{BroadPhase, BruteForceBroadPhase, SweepBroadPhase};
pub use index::{AxisIndex, EventKind, XEvent};
pub use oracle::{brute_force_into, brute_force_pairs};
pub use scenario::{generate, BoxFile, BoxRecord, ConfigError, ScenarioSpec};
pub use sink::{canonicalize, PairSink};
pub use store::{BoxSet, BoxSetError};
pub use sweep::{
    sweep_into, sweep_pairs, DualAxisSweep, NoopObserver, SweepObserver, SweepStats, SweepView,
};

pub use boxsweep_geom::{Aabb, Axis, Vec3};
