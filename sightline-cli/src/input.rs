//! Scenario files.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

use sightline_core::{
    AchievabilityConfig, CoverageConfig, CoverageProblem, Point, Scene, SceneInput, Segment,
};

/// Entity lists plus an optional solver config.
#[derive(Debug, Deserialize)]
pub struct AchievabilityFile {
    #[serde(flatten)]
    pub entities: SceneInput,
    #[serde(default)]
    pub config: AchievabilityConfig,
}

/// Guard walls and the clicked target points; targets are numbered by position.
#[derive(Debug, Deserialize)]
pub struct CoverageFile {
    pub guards: Vec<Segment>,
    #[serde(default)]
    pub obstacles: Vec<Segment>,
    pub targets: Vec<Point>,
    #[serde(default)]
    pub config: CoverageConfig,
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

pub fn load_scene(path: &Path) -> Result<(Scene, AchievabilityConfig)> {
    let file: AchievabilityFile = serde_json::from_str(&read(path)?)
        .with_context(|| format!("parsing entities from {}", path.display()))?;
    let scene = Scene::from_input(&file.entities)
        .with_context(|| format!("building scene from {}", path.display()))?;
    Ok((scene, file.config))
}

pub fn load_coverage(path: &Path) -> Result<(CoverageProblem, CoverageConfig)> {
    let file: CoverageFile = serde_json::from_str(&read(path)?)
        .with_context(|| format!("parsing coverage problem from {}", path.display()))?;
    let problem = CoverageProblem::new(file.guards, file.obstacles, file.targets);
    Ok((problem, file.config))
}
