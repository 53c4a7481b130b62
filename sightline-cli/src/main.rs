//! CLI for the sightline visibility solvers.
//!
//! Provides:
//! - `achieve`: which targets each observer can hit, given obstacles
//! - `cover`: two camera positions along guard walls that jointly see every target

use std::{
    f64::consts::FRAC_PI_2,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::debug;

use sightline_core::{achievability, coverage, parse_log_level, HitOrder, Horizon};

mod input;
mod render;

use render::RenderConfig;

#[derive(Parser)]
#[command(name = "sightline")]
#[command(about = "Line-of-sight achievability and camera coverage", long_about = None)]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SIGHTLINE_BUILD_SHA"), ")"))]
struct Cli {
    /// Log level (off, error, warn, info, debug, trace); `RUST_LOG` refines it
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the targets each observer can hit
    Achieve {
        /// Entities file (JSON: turrets, enemies, obstacles, optional config)
        file: PathBuf,

        /// Spacing between fired rays along the visible border
        #[arg(short, long)]
        accuracy: Option<f64>,

        /// Fixed horizon line
        #[arg(long, conflicts_with = "horizon_target_min")]
        horizon_y: Option<f64>,

        /// Put the horizon at the lowest target vertex
        #[arg(long)]
        horizon_target_min: bool,

        /// Credit each ray to the closest target it crosses
        #[arg(long)]
        nearest: bool,

        /// Write an SVG rendering here
        #[arg(long)]
        svg: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Place two cameras that together see every target
    Cover {
        /// Coverage file (JSON: guards, obstacles, targets, optional config)
        file: PathBuf,

        /// Sampling step along guard walls
        #[arg(short, long)]
        step: Option<f64>,

        /// Camera aperture in degrees
        #[arg(long)]
        aperture_deg: Option<f64>,

        /// Write an SVG rendering here
        #[arg(long)]
        svg: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

fn write_svg(path: &Path, svg: String) -> Result<()> {
    fs::write(path, svg).with_context(|| format!("writing {}", path.display()))?;
    debug!("wrote {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(parse_log_level(cli.log_level.as_deref())?)
        .parse_default_env()
        .init();

    match cli.command {
        Commands::Achieve {
            file,
            accuracy,
            horizon_y,
            horizon_target_min,
            nearest,
            svg,
            json,
        } => {
            let (scene, mut config) = input::load_scene(&file)?;
            if let Some(accuracy) = accuracy {
                config.accuracy = accuracy;
            }
            if let Some(y) = horizon_y {
                config.horizon = Horizon::Fixed(y);
            }
            if horizon_target_min {
                config.horizon = Horizon::TargetMin;
            }
            if nearest {
                config.hit_order = HitOrder::Nearest;
            }

            let result = achievability::solve(&scene, &config)
                .with_context(|| format!("solving {}", file.display()))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                for (observer, targets) in &result.goals {
                    let targets: Vec<String> = targets.iter().map(|t| t.to_string()).collect();
                    println!("{}: [{}]", observer, targets.join(", "));
                }
            }
            if let Some(path) = svg {
                let style = RenderConfig::default();
                write_svg(&path, render::render_scene(&scene, Some(&result), &style)?)?;
            }
        }
        Commands::Cover {
            file,
            step,
            aperture_deg,
            svg,
            json,
        } => {
            let (problem, mut config) = input::load_coverage(&file)?;
            if let Some(step) = step {
                config.step = step;
            }
            if let Some(deg) = aperture_deg {
                // Exact at 90°, the widest aperture allowed
                config.aperture = deg / 90. * FRAC_PI_2;
            }

            let placement = coverage::solve(&problem, &config)
                .with_context(|| format!("solving {}", file.display()))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&placement)?);
            } else {
                match &placement {
                    Some(p) => {
                        println!("Camera 1: {} sees {:?}", p.first.point, p.first_subset);
                        println!("Camera 2: {} sees {:?}", p.second.point, p.second_subset);
                    }
                    None => println!("No solution"),
                }
            }
            if let Some(path) = svg {
                let style = RenderConfig::default();
                let rendered = render::render_coverage(&problem, placement.as_ref(), &style)?;
                write_svg(&path, rendered)?;
            }
        }
    }
    Ok(())
}
