//! Two-camera placement along guard walls.
//!
//! Every guard segment is sampled at a fixed arc-length step. At each sample we collect the
//! target points with a clear line of sight, then group them into admissible subsets: sets
//! of targets one camera mounted there could see at once, given its aperture and the wall
//! it hangs on. A brute-force search then looks for two samples (possibly the same one)
//! whose subsets together cover every target.

use std::{
    collections::{BTreeSet, HashSet},
    f64::consts::FRAC_PI_2,
};

use itertools::Itertools;
use log::{debug, info, trace, warn};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{error::SolveError, point::Point, sector::Sector, segment::Segment};

/// Target ids visible together from one camera.
pub type VisibleSubset = BTreeSet<usize>;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetPoint {
    pub id: usize,
    pub point: Point,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageProblem {
    /// Walls that block sight and can host cameras.
    pub guards: Vec<Segment>,
    /// Walls that only block sight.
    #[serde(default)]
    pub obstacles: Vec<Segment>,
    pub targets: Vec<TargetPoint>,
}

impl CoverageProblem {
    /// Number the targets by their position in `points`.
    pub fn new(guards: Vec<Segment>, obstacles: Vec<Segment>, points: Vec<Point>) -> Self {
        let targets = points
            .into_iter()
            .enumerate()
            .map(|(id, point)| TargetPoint { id, point })
            .collect();
        CoverageProblem { guards, obstacles, targets }
    }

    fn walls(&self) -> impl Iterator<Item = &Segment> {
        self.guards.iter().chain(self.obstacles.iter())
    }

    /// Targets whose sight line from `sample` crosses no wall.
    ///
    /// The sample's own mount never blocks, since interpolated samples on a slanted wall sit
    /// a rounding error to either side of it. Sight across the mount is limited by
    /// [`CoverageProblem::admissible_subsets`] instead.
    pub fn visible_targets(&self, sample: &Sample) -> Vec<&TargetPoint> {
        self.targets
            .iter()
            .filter(|t| {
                let sight = Segment::new(sample.point, t.point);
                !self
                    .walls()
                    .filter(|wall| **wall != sample.mount)
                    .any(|wall| wall.intersects(&sight))
            })
            .collect()
    }

    /// Admissible subsets for a camera mounted at `sample`, in discovery order, without
    /// duplicates.
    ///
    /// Each pair of visible targets at most `aperture` apart spans a sector. If neither end
    /// of the mounting wall lies strictly inside it, the sector's visible targets form one
    /// subset. Otherwise the wall hides one side from the other, so the sector is split at
    /// the wall's end into two sub-sectors, each anchored on one of the pair. Every visible
    /// target also forms a singleton subset.
    pub fn admissible_subsets(&self, sample: &Sample, aperture: f64) -> Vec<VisibleSubset> {
        let p = sample.point;
        let visible = self.visible_targets(sample);
        let within = |sector: &Sector| -> VisibleSubset {
            visible
                .iter()
                .filter(|t| sector.contains(&t.point))
                .map(|t| t.id)
                .collect()
        };

        let mut subsets: Vec<VisibleSubset> = Vec::new();
        for (a, b) in visible.iter().tuple_combinations() {
            let sector = Sector::new(p, a.point, b.point);
            if sector.angle() > aperture {
                continue;
            }
            let wall_ends: Vec<Point> = [sample.mount.p1, sample.mount.p2]
                .into_iter()
                .filter(|end| sector.contains_strictly(end))
                .collect();
            if wall_ends.is_empty() {
                let mut subset = within(&sector);
                subset.extend([a.id, b.id]);
                subsets.push(subset);
            } else {
                for end in wall_ends {
                    for t in [a, b] {
                        let mut subset = within(&Sector::new(p, end, t.point));
                        subset.insert(t.id);
                        subsets.push(subset);
                    }
                }
            }
        }
        subsets.extend(visible.iter().map(|t| VisibleSubset::from([t.id])));
        subsets.into_iter().unique().collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverageConfig {
    /// Arc-length spacing of samples along each guard segment.
    pub step: f64,
    /// Widest angle a single camera sees, in radians.
    pub aperture: f64,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            step: 1.,
            aperture: FRAC_PI_2,
        }
    }
}

/// A candidate camera position and the guard segment it's mounted on.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub point: Point,
    pub mount: Segment,
}

/// Evenly-spaced points along `guard`, both ends included, at most `step` apart.
pub fn sample_guard(guard: &Segment, step: f64) -> Vec<Sample> {
    let n = (guard.length() / step).ceil() as usize;
    if n == 0 {
        warn!("zero-length guard segment {}", guard);
        return vec![Sample { point: guard.p1, mount: *guard }];
    }
    (0..=n)
        .map(|k| {
            let point = if k == n { guard.p2 } else { guard.at(k as f64 / n as f64) };
            Sample { point, mount: *guard }
        })
        .collect()
}

/// Two camera positions whose subsets jointly cover every target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub first: Sample,
    pub second: Sample,
    pub first_subset: VisibleSubset,
    pub second_subset: VisibleSubset,
}

impl Placement {
    pub fn points(&self) -> (Point, Point) {
        (self.first.point, self.second.point)
    }
}

/// First pair `(s1, s2)` from `first × second` whose union has `target_count` ids.
///
/// Subsets only ever hold ids of the problem's targets, so reaching the count means
/// covering the whole set.
pub fn covers<'a>(
    first: &'a [VisibleSubset],
    second: &'a [VisibleSubset],
    target_count: usize,
) -> Option<(&'a VisibleSubset, &'a VisibleSubset)> {
    first
        .iter()
        .cartesian_product(second.iter())
        .filter(|(s1, s2)| s1.len() + s2.len() >= target_count)
        .find(|(s1, s2)| s1.union(s2).count() == target_count)
}

/// A sample with its admissible subsets.
struct Station {
    sample: Sample,
    subsets: Vec<VisibleSubset>,
    widest: usize,
}

impl Station {
    fn new(problem: &CoverageProblem, sample: Sample, aperture: f64) -> Station {
        let subsets = problem.admissible_subsets(&sample, aperture);
        let widest = subsets.iter().map(BTreeSet::len).max().unwrap_or(0);
        trace!("sample {}: {} subsets, widest {}", sample.point, subsets.len(), widest);
        Station { sample, subsets, widest }
    }

    fn pair_with(&self, stations: &[Station], target_count: usize) -> Option<Placement> {
        stations
            .iter()
            .filter(|other| self.widest + other.widest >= target_count)
            .find_map(|other| {
                covers(&self.subsets, &other.subsets, target_count).map(|(s1, s2)| Placement {
                    first: self.sample,
                    second: other.sample,
                    first_subset: s1.clone(),
                    second_subset: s2.clone(),
                })
            })
    }
}

fn validate(problem: &CoverageProblem, config: &CoverageConfig) -> Result<(), SolveError> {
    let CoverageConfig { step, aperture } = *config;
    if !(step.is_finite() && step > 0.) {
        return Err(SolveError::InvalidStep(step));
    }
    if !(aperture > 0. && aperture <= FRAC_PI_2) {
        return Err(SolveError::InvalidAperture(aperture));
    }
    let mut ids = HashSet::new();
    for t in &problem.targets {
        if !ids.insert(t.id) {
            return Err(SolveError::DuplicateTarget(t.id));
        }
    }
    Ok(())
}

/// Find two camera positions that jointly see every target, or `None` if no pair of
/// samples does. The first pair found (in sample order) wins; there's no optimality.
pub fn solve(
    problem: &CoverageProblem,
    config: &CoverageConfig,
) -> Result<Option<Placement>, SolveError> {
    validate(problem, config)?;
    let samples: Vec<Sample> = problem
        .guards
        .iter()
        .flat_map(|g| sample_guard(g, config.step))
        .collect();
    let target_count = problem.targets.len();
    info!(
        "coverage: {} guards, {} obstacles, {} targets → {} samples",
        problem.guards.len(),
        problem.obstacles.len(),
        target_count,
        samples.len(),
    );

    #[cfg(feature = "parallel")]
    let stations: Vec<Station> = samples
        .into_par_iter()
        .map(|sample| Station::new(problem, sample, config.aperture))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let stations: Vec<Station> = samples
        .into_iter()
        .map(|sample| Station::new(problem, sample, config.aperture))
        .collect();
    debug!(
        "coverage: {} admissible subsets across all samples",
        stations.iter().map(|s| s.subsets.len()).sum::<usize>()
    );

    #[cfg(feature = "parallel")]
    let placement = stations.par_iter().find_map_first(|s| s.pair_with(&stations, target_count));
    #[cfg(not(feature = "parallel"))]
    let placement = stations.iter().find_map(|s| s.pair_with(&stations, target_count));

    match &placement {
        Some(p) => info!("coverage: cameras at {} and {}", p.first.point, p.second.point),
        None => info!("coverage: no solution"),
    }
    Ok(placement)
}

#[cfg(test)]
mod tests;
