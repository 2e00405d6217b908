// scene-probe - Sample the fleet choreography outside the browser
//
// Modes:
//   1. Sample resolve_scene_state over an even grid (or explicit progress values)
//   2. Optionally run the director N frames per sample to show camera smoothing
//   3. --check: report the worst pose jump across act boundaries
//
// Usage: cargo run --bin scene-probe -- [--config scene.json] [--samples N] [--progress P]... [--frames N] [--check]

mod output;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use fleet_engine::{Choreography, Director, SceneConfig, resolve_scene_state};

use output::{NullGraph, ProbeLine};

/// Continuity tolerance for --check, in scene units / radians.
const GAP_TOLERANCE: f64 = 1e-6;
const GAP_EPSILON: f64 = 1e-10;

#[derive(Parser, Debug)]
#[command(name = "scene-probe", about = "Sample the scroll-driven fleet scene as JSON lines")]
struct Cli {
    /// JSON file overriding the default scene config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Evenly spaced samples over [0, 1]
    #[arg(short, long, default_value_t = 21)]
    samples: usize,

    /// Explicit progress values; replaces the even grid
    #[arg(short, long)]
    progress: Vec<f64>,

    /// Director frames to run at each sample before reporting the camera
    #[arg(short, long, default_value_t = 0)]
    frames: usize,

    /// Check act-boundary continuity and fail on a visible snap
    #[arg(long)]
    check: bool,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<SceneConfig> {
    let Some(path) = path else {
        return Ok(SceneConfig::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    SceneConfig::from_json(&json).with_context(|| format!("failed to parse {}", path.display()))
}

fn progress_grid(samples: usize) -> Vec<f64> {
    match samples {
        0 => vec![],
        1 => vec![0.0],
        n => (0..n).map(|i| i as f64 / (n - 1) as f64).collect(),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref())?;
    let choreography = Choreography::new(config).context("invalid scene config")?;

    if cli.check {
        let (gap, boundary) = choreography.max_boundary_gap(GAP_EPSILON);
        println!("worst boundary gap: {:.3e} at progress {}", gap, boundary);
        if gap > GAP_TOLERANCE {
            bail!("pose snaps by {gap:.3e} at act boundary {boundary}");
        }
        return Ok(());
    }

    let points = if cli.progress.is_empty() { progress_grid(cli.samples) } else { cli.progress.clone() };

    let mut director = Director::new(choreography.clone());
    for p in points {
        let state = resolve_scene_state(&choreography, p);
        let camera = if cli.frames > 0 {
            director.reset_camera();
            for _ in 0..cli.frames {
                director.frame(p, &mut NullGraph);
            }
            director.camera()
        } else {
            None
        };

        let line = ProbeLine { state: &state, camera };
        println!("{}", serde_json::to_string(&line)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_includes_both_ends() {
        assert_eq!(progress_grid(5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(progress_grid(1), vec![0.0]);
        assert!(progress_grid(0).is_empty());
    }

    #[test]
    fn cli_parses_repeated_progress() {
        let cli = Cli::parse_from(["scene-probe", "-p", "0.1", "-p", "0.9", "--frames", "30"]);
        assert_eq!(cli.progress, vec![0.1, 0.9]);
        assert_eq!(cli.frames, 30);
        assert!(!cli.check);
    }
}
