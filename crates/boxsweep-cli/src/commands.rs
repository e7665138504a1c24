// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Subcommand implementations.

use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use boxsweep_core::{brute_force_into, Aabb, DualAxisSweep, PairSink, SweepStats};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::{BenchArgs, RunArgs, SceneArgs};
use crate::scene::{self, Scene};

#[derive(Serialize)]
struct RunReport {
    source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    bounds: Option<Aabb>,
    stats: SweepStats,
    elapsed_us: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    pairs: Option<Vec<(u32, u32)>>,
}

#[derive(Serialize)]
struct VerifyReport {
    source: String,
    sweep_pairs: usize,
    oracle_pairs: usize,
    missing: Vec<(u32, u32)>,
    extra: Vec<(u32, u32)>,
}

#[derive(Serialize)]
struct Timing {
    method: &'static str,
    iterations: u32,
    best_us: u128,
    mean_us: u128,
    pairs: usize,
}

#[derive(Serialize)]
struct BenchReport {
    source: String,
    boxes: usize,
    timings: Vec<Timing>,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header.to_vec());
    table
}

fn sweep_scene(scene: &Scene) -> (PairSink<u32>, SweepStats, Duration) {
    let mut sink = PairSink::with_capacity(scene.boxes.len());
    let start = Instant::now();
    let stats = DualAxisSweep::new().run(&scene.boxes, &mut sink);
    (sink, stats, start.elapsed())
}

pub(crate) fn run(args: &RunArgs) -> Result<()> {
    let scene = scene::load(&args.scene)?;
    let (sink, stats, elapsed) = sweep_scene(&scene);
    info!(pairs = stats.pairs, elapsed_us = elapsed.as_micros(), "sweep done");

    let pairs = args.pairs.then(|| sink.into_canonical());
    let bounds = scene.boxes.bounds();
    if args.scene.json {
        return print_json(&RunReport {
            source: scene.source,
            bounds,
            stats,
            elapsed_us: elapsed.as_micros(),
            pairs,
        });
    }

    let mut summary = table(&["source", "boxes", "events", "candidates", "pairs", "elapsed"]);
    summary.add_row(vec![
        Cell::new(&scene.source),
        Cell::new(stats.boxes),
        Cell::new(stats.events),
        Cell::new(stats.candidates),
        Cell::new(stats.pairs),
        Cell::new(format!("{elapsed:?}")),
    ]);
    println!("{summary}");
    if let Some(b) = bounds {
        println!("bounds: {:?} .. {:?}", b.min().to_array(), b.max().to_array());
    }
    if let Some(pairs) = pairs {
        for (a, b) in pairs {
            println!("{a} {b}");
        }
    }
    Ok(())
}

/// Elements of sorted `a` absent from sorted `b`.
fn difference(a: &[(u32, u32)], b: &[(u32, u32)]) -> Vec<(u32, u32)> {
    a.iter()
        .filter(|pair| b.binary_search(pair).is_err())
        .copied()
        .collect()
}

pub(crate) fn verify(args: &SceneArgs) -> Result<()> {
    let scene = scene::load(args)?;
    let (sink, _, _) = sweep_scene(&scene);
    let swept = sink.into_canonical();

    let mut oracle_sink = PairSink::new();
    brute_force_into(&scene.boxes, &mut oracle_sink);
    let oracle = oracle_sink.into_canonical();

    let mut duplicates = swept.clone();
    duplicates.dedup();
    if duplicates.len() != swept.len() {
        warn!(
            duplicates = swept.len() - duplicates.len(),
            "sweep emitted duplicate pairs"
        );
    }

    let report = VerifyReport {
        missing: difference(&oracle, &swept),
        extra: difference(&swept, &oracle),
        sweep_pairs: swept.len(),
        oracle_pairs: oracle.len(),
        source: scene.source,
    };
    let agree = report.missing.is_empty()
        && report.extra.is_empty()
        && report.sweep_pairs == report.oracle_pairs;

    if args.json {
        print_json(&report)?;
    } else {
        let mut summary = table(&["source", "sweep pairs", "oracle pairs", "missing", "extra"]);
        summary.add_row(vec![
            Cell::new(&report.source),
            Cell::new(report.sweep_pairs),
            Cell::new(report.oracle_pairs),
            Cell::new(report.missing.len()),
            Cell::new(report.extra.len()),
        ]);
        println!("{summary}");
    }

    if !agree {
        bail!(
            "sweep disagrees with all-pairs oracle: {} missing, {} extra (first missing: {:?}, first extra: {:?})",
            report.missing.len(),
            report.extra.len(),
            report.missing.first(),
            report.extra.first()
        );
    }
    info!(pairs = report.sweep_pairs, "sweep matches oracle");
    Ok(())
}

fn time_method(
    method: &'static str,
    iterations: u32,
    mut body: impl FnMut() -> usize,
) -> Timing {
    let mut best = Duration::MAX;
    let mut total = Duration::ZERO;
    let mut pairs = 0;
    for _ in 0..iterations {
        let start = Instant::now();
        pairs = std::hint::black_box(body());
        let elapsed = start.elapsed();
        best = best.min(elapsed);
        total += elapsed;
    }
    Timing {
        method,
        iterations,
        best_us: best.as_micros(),
        mean_us: (total / iterations).as_micros(),
        pairs,
    }
}

pub(crate) fn bench(args: &BenchArgs) -> Result<()> {
    if args.iterations == 0 {
        bail!("--iterations must be at least 1");
    }
    let scene = scene::load(&args.scene)?;
    let boxes = &scene.boxes;

    let mut timings = Vec::with_capacity(2);
    let mut sweep = DualAxisSweep::new();
    let mut sink = PairSink::with_capacity(boxes.len());
    timings.push(time_method("dual-axis sweep", args.iterations, || {
        sink.clear();
        sweep.run(boxes, &mut sink).pairs
    }));
    if !args.skip_oracle {
        let mut oracle_sink = PairSink::with_capacity(boxes.len());
        timings.push(time_method("all-pairs", args.iterations, || {
            oracle_sink.clear();
            brute_force_into(boxes, &mut oracle_sink);
            oracle_sink.len()
        }));
    }

    let report = BenchReport {
        source: scene.source.clone(),
        boxes: boxes.len(),
        timings,
    };
    if args.scene.json {
        return print_json(&report);
    }
    let mut out = table(&["method", "iterations", "best", "mean", "pairs"]);
    for t in &report.timings {
        out.add_row(vec![
            Cell::new(t.method),
            Cell::new(t.iterations),
            Cell::new(format!("{} us", t.best_us)),
            Cell::new(format!("{} us", t.mean_us)),
            Cell::new(t.pairs),
        ]);
    }
    println!("{} ({} boxes)", report.source, report.boxes);
    println!("{out}");
    Ok(())
}

pub(crate) fn config(args: &SceneArgs) -> Result<()> {
    let spec = scene::effective_spec(args)?;
    println!("{}", spec.to_json()?);
    Ok(())
}
