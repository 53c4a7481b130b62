//! Which targets can each observer hit?
//!
//! Each observer fires rays from its anchor toward evenly-spaced points on its visible
//! border. A ray "achieves" the first target footprint it crosses unless an obstacle it
//! also crosses is closer to the observer.

use std::collections::BTreeMap;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::{
    entity::{Entity, EntityId, Scene},
    error::{SolveError, VisibilityError},
    point::Point,
    polygon::Polygon,
    segment::Segment,
    wedge::{visibility_wedge, visible_border, Horizon},
};

/// How to pick among several footprints crossed by the same ray.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitOrder {
    /// The first one in scene order, regardless of distance.
    #[default]
    ListOrder,
    /// The one whose anchor is closest to the observer.
    Nearest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AchievabilityConfig {
    /// Step between consecutive ray endpoints along the visible border.
    pub accuracy: f64,
    pub horizon: Horizon,
    pub hit_order: HitOrder,
}

impl Default for AchievabilityConfig {
    fn default() -> Self {
        Self {
            accuracy: 1.,
            horizon: Horizon::default(),
            hit_order: HitOrder::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Achievability {
    /// Observer id → achieved target ids, in the order they were first achieved.
    pub goals: BTreeMap<EntityId, Vec<EntityId>>,
    /// Every ray that achieved a target.
    pub rays: Vec<Segment>,
}

impl Achievability {
    pub fn goals_of(&self, observer: EntityId) -> &[EntityId] {
        self.goals.get(&observer).map(Vec::as_slice).unwrap_or_default()
    }
}

/// An entity with its footprint polygon computed once up front.
struct Shaped<'a> {
    entity: &'a Entity,
    polygon: Polygon,
}

impl<'a> Shaped<'a> {
    fn all(entities: &'a [Entity]) -> Vec<Shaped<'a>> {
        entities.iter().map(|entity| Shaped { entity, polygon: entity.polygon() }).collect()
    }
}

fn first_hit<'s, 'a>(
    candidates: &'s [&'s Shaped<'a>],
    ray: &Segment,
    order: HitOrder,
) -> Option<&'s Shaped<'a>> {
    let mut hits = candidates.iter().copied().filter(|c| c.polygon.is_crossed_by(ray));
    match order {
        HitOrder::ListOrder => hits.next(),
        HitOrder::Nearest => hits.min_by(|a, b| {
            ray.p1.distance(&a.entity.anchor).total_cmp(&ray.p1.distance(&b.entity.anchor))
        }),
    }
}

/// Ray endpoints `left + k·accuracy` for every `k` that stays within the border.
fn border_samples(border: &Segment, accuracy: f64) -> impl Iterator<Item = Point> + '_ {
    let steps = ((border.p2.x - border.p1.x) / accuracy).floor() as usize;
    (0..=steps).map(move |k| Point::new(border.p1.x + (k as f64) * accuracy, border.p1.y))
}

pub fn solve(scene: &Scene, config: &AchievabilityConfig) -> Result<Achievability, SolveError> {
    let AchievabilityConfig { accuracy, horizon, hit_order } = *config;
    if !(accuracy.is_finite() && accuracy > 0.) {
        return Err(SolveError::InvalidAccuracy(accuracy));
    }
    let horizon = horizon.resolve(&scene.targets);
    let targets = Shaped::all(&scene.targets);
    let obstacles = Shaped::all(&scene.obstacles);
    let obstacles: Vec<&Shaped> = obstacles.iter().collect();

    let mut result = Achievability::default();
    for observer in &scene.observers {
        let fov = observer.fov().ok_or(SolveError::NotAnObserver(observer.id))?;
        let origin = observer.anchor;
        let border = match visible_border(&origin, fov, horizon) {
            Ok(border) => border,
            // Nothing lies between this observer and the horizon
            Err(VisibilityError::ObserverBeyondHorizon { .. }) => {
                warn!(
                    "observer {} at {} is not below the horizon y={}; it achieves nothing",
                    observer.id, origin, horizon,
                );
                result.goals.insert(observer.id, Vec::new());
                continue;
            }
            Err(source) => {
                return Err(SolveError::Visibility {
                    observer: observer.id,
                    source,
                })
            }
        };
        let wedge = visibility_wedge(&origin, &border);

        let candidates: Vec<&Shaped> = targets
            .iter()
            .filter(|t| wedge.intersects(&t.polygon))
            .collect();
        debug!(
            "observer {} at {}: border {}, {} candidate targets",
            observer.id,
            origin,
            border,
            candidates.len(),
        );

        let mut achieved: Vec<EntityId> = Vec::new();
        if !candidates.is_empty() {
            for end in border_samples(&border, accuracy) {
                let ray = Segment::new(origin, end);
                let Some(target) = first_hit(&candidates, &ray, hit_order) else {
                    continue;
                };
                if achieved.contains(&target.entity.id) {
                    continue;
                }
                let reach = origin.distance(&target.entity.anchor);
                let unobstructed = match first_hit(&obstacles, &ray, hit_order) {
                    None => true,
                    Some(obstacle) => reach < origin.distance(&obstacle.entity.anchor),
                };
                if unobstructed {
                    debug!(
                        "observer {} achieves target {} via {}",
                        observer.id, target.entity.id, ray
                    );
                    achieved.push(target.entity.id);
                    result.rays.push(ray);
                }
            }
        }
        result.goals.insert(observer.id, achieved);
    }

    info!(
        "achievability: {} observers, {} targets, {} obstacles → {} achieved",
        scene.observers.len(),
        scene.targets.len(),
        scene.obstacles.len(),
        result.goals.values().map(Vec::len).sum::<usize>(),
    );
    Ok(result)
}
