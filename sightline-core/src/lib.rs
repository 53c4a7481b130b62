#[cfg_attr(not(test), allow(unused_imports))]
#[macro_use]
extern crate approx;

// Organized modules
pub mod geometry;

pub mod achievability;
pub mod coverage;
pub mod entity;
pub mod error;
pub mod wedge;

// Re-exports for convenience
pub use geometry::point;
pub use geometry::polygon;
pub use geometry::sector;
pub use geometry::segment;

// Re-export key types for external use
pub use achievability::{Achievability, AchievabilityConfig, HitOrder};
pub use coverage::{CoverageConfig, CoverageProblem, Placement, TargetPoint};
pub use entity::{Category, Entity, EntityKind, EntityRecord, Footprint, Scene, SceneInput};
pub use error::{EntityError, LogLevelError, SolveError, VisibilityError};
pub use point::Point;
pub use polygon::Polygon;
pub use segment::{Orientation, Segment};
pub use wedge::Horizon;

/// Parse a log level string into LevelFilter.
pub fn parse_log_level(level: Option<&str>) -> Result<log::LevelFilter, LogLevelError> {
    match level {
        Some("off") => Ok(log::LevelFilter::Off),
        Some("error") => Ok(log::LevelFilter::Error),
        Some("warn") => Ok(log::LevelFilter::Warn),
        Some("info") | Some("") | None => Ok(log::LevelFilter::Info),
        Some("debug") => Ok(log::LevelFilter::Debug),
        Some("trace") => Ok(log::LevelFilter::Trace),
        Some(level) => Err(LogLevelError(level.to_string())),
    }
}
