use crate::{entity::Category, point::Point};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EntityError {
    #[error("Entity {number}: unknown entity type {kind:?}")]
    UnknownKind { number: u32, kind: String },

    #[error("Entity {number} ({kind}): missing required field {field:?}")]
    MissingField {
        number: u32,
        kind: String,
        field: &'static str,
    },

    #[error("Entity {number} ({kind}) is a {actual}, but was listed under {expected}s")]
    WrongCategory {
        number: u32,
        kind: String,
        actual: Category,
        expected: Category,
    },
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum VisibilityError {
    #[error("Field of view must lie strictly between 0 and π radians, got {0}")]
    InvalidFov(f64),

    #[error("Observer at {observer} does not lie below the horizon y={horizon}")]
    ObserverBeyondHorizon { observer: Point, horizon: f64 },
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SolveError {
    #[error("Sampling accuracy must be finite and positive, got {0}")]
    InvalidAccuracy(f64),

    #[error("Guard sampling step must be finite and positive, got {0}")]
    InvalidStep(f64),

    #[error("Camera aperture must lie in (0, π/2] radians, got {0}")]
    InvalidAperture(f64),

    #[error("Entity {0} has no field of view and cannot observe")]
    NotAnObserver(u32),

    #[error("Target id {0} appears more than once")]
    DuplicateTarget(usize),

    #[error("Observer {observer}: {source}")]
    Visibility {
        observer: u32,
        #[source]
        source: VisibilityError,
    },
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("Invalid log level: {0:?}")]
pub struct LogLevelError(pub String);
