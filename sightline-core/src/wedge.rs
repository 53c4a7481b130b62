//! Visibility wedges: the triangle an observer facing toward decreasing Y can see, cut
//! off at a horizontal horizon line.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::{
    entity::Entity, error::VisibilityError, point::Point, polygon::Polygon, segment::Segment,
};

/// Where the far edge of every wedge lies.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Horizon {
    /// A fixed y-coordinate.
    Fixed(f64),
    /// The smallest y over all target footprints (0 when there are no targets).
    TargetMin,
}

impl Default for Horizon {
    fn default() -> Self {
        Horizon::Fixed(0.)
    }
}

impl Horizon {
    pub fn resolve(&self, targets: &[Entity]) -> f64 {
        match self {
            Horizon::Fixed(y) => *y,
            Horizon::TargetMin => targets
                .iter()
                .flat_map(|t| t.polygon().vertices())
                .map(|v| v.y)
                .reduce(f64::min)
                .unwrap_or(0.),
        }
    }
}

/// Horizontal segment at `horizon` bounding what `p` sees with full field-of-view `fov`.
///
/// The half-width follows from the right triangle between the vertical drop to the
/// horizon and the half-angle: `Δ = (p.y - y₀)·√(1/cos²(θ/2) - 1)`, i.e.
/// `(p.y - y₀)·tan(θ/2)`.
pub fn visible_border(p: &Point, fov: f64, horizon: f64) -> Result<Segment, VisibilityError> {
    if !(fov > 0. && fov < PI) {
        return Err(VisibilityError::InvalidFov(fov));
    }
    if !(p.y > horizon) {
        return Err(VisibilityError::ObserverBeyondHorizon { observer: *p, horizon });
    }
    let half_cos = (fov / 2.).cos();
    let dx = (p.y - horizon) * (1. / (half_cos * half_cos) - 1.).sqrt();
    Ok(Segment::new(
        Point::new(p.x - dx, horizon),
        Point::new(p.x + dx, horizon),
    ))
}

/// Triangle from `p` to both ends of `border`.
pub fn visibility_wedge(p: &Point, border: &Segment) -> Polygon {
    Polygon::new(vec![
        Segment::new(*p, border.p1),
        *border,
        Segment::new(*p, border.p2),
    ])
}
