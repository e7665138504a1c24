// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "boxsweep",
    version,
    about = "Run, verify and time the dual-axis broad-phase sweep",
    disable_help_subcommand = true
)]
pub(crate) struct Cli {
    /// Raise log verbosity (-v: debug, -vv: trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub(crate) verbose: u8,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Sweep one scene and print a summary.
    Run(RunArgs),
    /// Sweep a scene and compare against the exhaustive all-pairs test.
    Verify(SceneArgs),
    /// Time the sweep (and optionally the all-pairs test) over repeated runs.
    Bench(BenchArgs),
    /// Print the effective scenario config as JSON.
    Config(SceneArgs),
}

/// Where the boxes come from; flags override config file fields.
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct SceneArgs {
    /// JSON scenario config (see `boxsweep config`).
    #[arg(long, conflicts_with = "boxes")]
    pub(crate) config: Option<PathBuf>,

    /// JSON box file: `{ "boxes": [ { "min": [..], "max": [..], "id": 7 } ] }`.
    #[arg(long)]
    pub(crate) boxes: Option<PathBuf>,

    /// Number of generated boxes.
    #[arg(long)]
    pub(crate) count: Option<usize>,

    /// PRNG seed for generated boxes.
    #[arg(long)]
    pub(crate) seed: Option<u64>,

    /// Half-width of the cube holding the box centers.
    #[arg(long)]
    pub(crate) extent: Option<f32>,

    /// Snap generated boxes to this grid.
    #[arg(long)]
    pub(crate) grid: Option<f32>,

    /// Emit JSON instead of a table.
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct RunArgs {
    #[command(flatten)]
    pub(crate) scene: SceneArgs,

    /// Also list the overlapping pairs (canonical order).
    #[arg(long)]
    pub(crate) pairs: bool,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct BenchArgs {
    #[command(flatten)]
    pub(crate) scene: SceneArgs,

    /// Timed repetitions per method.
    #[arg(long, default_value_t = 10)]
    pub(crate) iterations: u32,

    /// Skip the all-pairs baseline.
    #[arg(long)]
    pub(crate) skip_oracle: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn config_and_boxes_conflict() {
        let parsed = Cli::try_parse_from([
            "boxsweep", "run", "--config", "a.json", "--boxes", "b.json",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn overrides_parse() {
        let parsed = Cli::try_parse_from([
            "boxsweep", "-v", "bench", "--count", "50", "--seed", "3", "--iterations", "2",
        ]);
        let Ok(cli) = parsed else {
            panic!("bench args should parse");
        };
        assert_eq!(cli.verbose, 1);
        let Command::Bench(args) = cli.command else {
            panic!("expected bench");
        };
        assert_eq!(args.scene.count, Some(50));
        assert_eq!(args.scene.seed, Some(3));
        assert_eq!(args.iterations, 2);
    }
}
