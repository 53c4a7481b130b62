//! Entities placed on the field: typed kinds, their footprints, and the factory that
//! builds them from input records.

use std::f64::consts::{FRAC_PI_3, PI};

use derive_more::Display;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{error::EntityError, point::Point, polygon::Polygon};

/// Number of edges used to approximate a circular footprint.
pub const CIRCLE_EDGES: usize = 100;

/// Full field-of-view angle of a turret.
pub const TURRET_FOV: f64 = FRAC_PI_3;

pub type EntityId = u32;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum Footprint {
    /// Spans `[x, x + width] × [y, y + height]` from the anchor.
    Rect { width: f64, height: f64 },
    /// Centered on the anchor.
    Circle { radius: f64 },
}

impl Footprint {
    pub fn polygon(&self, anchor: &Point) -> Polygon {
        match self {
            Footprint::Rect { width, height } => Polygon::from_vertices(&[
                *anchor,
                Point::new(anchor.x + width, anchor.y),
                Point::new(anchor.x + width, anchor.y + height),
                Point::new(anchor.x, anchor.y + height),
            ]),
            Footprint::Circle { radius } => {
                let vertices: Vec<Point> = (0..CIRCLE_EDGES)
                    .map(|i| {
                        let theta = 2. * PI * (i as f64) / (CIRCLE_EDGES as f64);
                        Point::new(anchor.x + radius * theta.cos(), anchor.y + radius * theta.sin())
                    })
                    .collect();
                Polygon::from_vertices(&vertices)
            }
        }
    }
}

#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[display(fmt = "target")]
    Target,
    #[display(fmt = "obstacle")]
    Obstacle,
    #[display(fmt = "observer")]
    Observer,
}

#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    #[display(fmt = "tank")]
    Tank,
    #[display(fmt = "carrier")]
    Carrier,
    #[display(fmt = "turret")]
    Turret,
    #[display(fmt = "round")]
    #[serde(rename = "round")]
    RoundObstacle,
    #[display(fmt = "square")]
    #[serde(rename = "square")]
    SquareObstacle,
}

impl EntityKind {
    pub fn parse(tag: &str) -> Option<EntityKind> {
        match tag {
            "tank" => Some(EntityKind::Tank),
            "carrier" => Some(EntityKind::Carrier),
            "turret" => Some(EntityKind::Turret),
            "round" => Some(EntityKind::RoundObstacle),
            "square" => Some(EntityKind::SquareObstacle),
            _ => None,
        }
    }

    pub fn category(&self) -> Category {
        match self {
            EntityKind::Tank | EntityKind::Carrier => Category::Target,
            EntityKind::Turret => Category::Observer,
            EntityKind::RoundObstacle | EntityKind::SquareObstacle => Category::Obstacle,
        }
    }

    /// Field of view of observer kinds.
    pub fn fov(&self) -> Option<f64> {
        match self {
            EntityKind::Turret => Some(TURRET_FOV),
            _ => None,
        }
    }
}

/// One entity as written in an input file. `type` selects the kind; the sizing fields
/// are read only by the kinds that use them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub number: EntityId,
    #[serde(rename = "type")]
    pub kind: String,
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub anchor: Point,
    pub footprint: Footprint,
}

impl Entity {
    pub fn new(id: EntityId, kind: EntityKind, anchor: Point, footprint: Footprint) -> Self {
        Entity { id, kind, anchor, footprint }
    }

    pub fn tank(id: EntityId, anchor: Point) -> Self {
        Entity::new(id, EntityKind::Tank, anchor, Footprint::Rect { width: 4., height: 5. })
    }

    pub fn carrier(id: EntityId, anchor: Point) -> Self {
        Entity::new(id, EntityKind::Carrier, anchor, Footprint::Rect { width: 3., height: 8. })
    }

    pub fn turret(id: EntityId, anchor: Point) -> Self {
        Entity::new(id, EntityKind::Turret, anchor, Footprint::Rect { width: 1., height: 1. })
    }

    pub fn round_obstacle(id: EntityId, center: Point, radius: f64) -> Self {
        Entity::new(id, EntityKind::RoundObstacle, center, Footprint::Circle { radius })
    }

    pub fn square_obstacle(id: EntityId, anchor: Point, width: f64, height: f64) -> Self {
        Entity::new(id, EntityKind::SquareObstacle, anchor, Footprint::Rect { width, height })
    }

    /// Build an entity from its input record, failing on an unknown `type` or a missing
    /// sizing field.
    pub fn from_record(record: &EntityRecord) -> Result<Entity, EntityError> {
        let EntityRecord { number, x, y, .. } = *record;
        let anchor = Point::new(x, y);
        let kind = EntityKind::parse(&record.kind).ok_or_else(|| EntityError::UnknownKind {
            number,
            kind: record.kind.clone(),
        })?;
        let require = |value: Option<f64>, field: &'static str| {
            value.ok_or_else(|| EntityError::MissingField {
                number,
                kind: record.kind.clone(),
                field,
            })
        };
        let entity = match kind {
            EntityKind::Tank => Entity::tank(number, anchor),
            EntityKind::Carrier => Entity::carrier(number, anchor),
            EntityKind::Turret => Entity::turret(number, anchor),
            EntityKind::RoundObstacle => {
                Entity::round_obstacle(number, anchor, require(record.radius, "radius")?)
            }
            EntityKind::SquareObstacle => Entity::square_obstacle(
                number,
                anchor,
                require(record.width, "width")?,
                require(record.height, "height")?,
            ),
        };
        Ok(entity)
    }

    pub fn category(&self) -> Category {
        self.kind.category()
    }

    pub fn fov(&self) -> Option<f64> {
        self.kind.fov()
    }

    pub fn polygon(&self) -> Polygon {
        self.footprint.polygon(&self.anchor)
    }
}

/// Entity lists as they appear in an input file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneInput {
    #[serde(default)]
    pub turrets: Vec<EntityRecord>,
    #[serde(default)]
    pub enemies: Vec<EntityRecord>,
    #[serde(default)]
    pub obstacles: Vec<EntityRecord>,
}

/// A fully-parsed set of entities, split by category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub observers: Vec<Entity>,
    pub targets: Vec<Entity>,
    pub obstacles: Vec<Entity>,
}

impl Scene {
    pub fn new(observers: Vec<Entity>, targets: Vec<Entity>, obstacles: Vec<Entity>) -> Self {
        Scene { observers, targets, obstacles }
    }

    /// Parse every record; any failure aborts the whole load.
    pub fn from_input(input: &SceneInput) -> Result<Scene, EntityError> {
        let parse = |records: &[EntityRecord], expected: Category| {
            records
                .iter()
                .map(|record| {
                    let entity = Entity::from_record(record)?;
                    let actual = entity.category();
                    if actual != expected {
                        return Err(EntityError::WrongCategory {
                            number: record.number,
                            kind: record.kind.clone(),
                            actual,
                            expected,
                        });
                    }
                    Ok(entity)
                })
                .collect::<Result<Vec<_>, _>>()
        };
        let scene = Scene {
            observers: parse(&input.turrets, Category::Observer)?,
            targets: parse(&input.enemies, Category::Target)?,
            obstacles: parse(&input.obstacles, Category::Obstacle)?,
        };
        debug!(
            "Scene::from_input: {} observers, {} targets, {} obstacles",
            scene.observers.len(),
            scene.targets.len(),
            scene.obstacles.len(),
        );
        Ok(scene)
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.observers.iter().chain(self.targets.iter()).chain(self.obstacles.iter())
    }
}
