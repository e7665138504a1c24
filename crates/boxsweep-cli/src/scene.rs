// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Resolving a scene (box file or generated scenario) from CLI arguments.

use anyhow::{Context, Result};
use boxsweep_core::{generate, BoxFile, BoxSet, ScenarioSpec};
use tracing::{debug, info};

use crate::cli::SceneArgs;

/// Boxes plus a human-readable description of where they came from.
pub(crate) struct Scene {
    pub(crate) source: String,
    pub(crate) boxes: BoxSet<u32>,
}

/// Config file (if any) with flag overrides applied, validated.
pub(crate) fn effective_spec(args: &SceneArgs) -> Result<ScenarioSpec> {
    let mut spec = match &args.config {
        Some(path) => ScenarioSpec::load(path)
            .with_context(|| format!("load scenario config {}", path.display()))?,
        None => ScenarioSpec::default(),
    };
    if let Some(count) = args.count {
        spec.count = count;
    }
    if let Some(seed) = args.seed {
        spec.seed = seed;
    }
    if let Some(extent) = args.extent {
        spec.extent = extent;
    }
    if args.grid.is_some() {
        spec.grid = args.grid;
    }
    spec.validate().context("scenario overrides")?;
    Ok(spec)
}

pub(crate) fn load(args: &SceneArgs) -> Result<Scene> {
    if let Some(path) = &args.boxes {
        let boxes =
            BoxFile::load(path).with_context(|| format!("load box file {}", path.display()))?;
        info!(boxes = boxes.len(), path = %path.display(), "loaded box file");
        return Ok(Scene {
            source: path.display().to_string(),
            boxes,
        });
    }
    let spec = effective_spec(args)?;
    debug!(?spec, "generating scenario");
    let boxes = generate(&spec);
    info!(boxes = boxes.len(), seed = spec.seed, "generated scenario");
    Ok(Scene {
        source: format!("generated(count={}, seed={})", spec.count, spec.seed),
        boxes,
    })
}
