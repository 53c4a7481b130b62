use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use super::point::Point;

/// Which side of a directed segment a point falls on.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
    Collinear,
}

impl Orientation {
    pub fn sign(&self) -> i8 {
        match self {
            Orientation::CounterClockwise => 1,
            Orientation::Clockwise => -1,
            Orientation::Collinear => 0,
        }
    }

    /// True if `self` and `o` lie on strictly opposite sides.
    pub fn opposes(&self, o: &Orientation) -> bool {
        self.sign() * o.sign() < 0
    }
}

/// A segment between two points: directed for orientation tests, undirected for
/// intersection and length. Serializes as `[p1, p2]`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(Point, Point)", into = "(Point, Point)")]
pub struct Segment {
    pub p1: Point,
    pub p2: Point,
}

impl From<(Point, Point)> for Segment {
    fn from((p1, p2): (Point, Point)) -> Self {
        Segment { p1, p2 }
    }
}

impl From<Segment> for (Point, Point) {
    fn from(s: Segment) -> Self {
        (s.p1, s.p2)
    }
}

impl Segment {
    pub fn new(p1: Point, p2: Point) -> Self {
        Segment { p1, p2 }
    }

    pub fn direction(&self) -> Point {
        self.p2 - self.p1
    }

    /// Euclidean length.
    pub fn length(&self) -> f64 {
        self.p1.distance(&self.p2)
    }

    /// Sign of `(p2 - p1) × (p - p2)`.
    pub fn orientation(&self, p: &Point) -> Orientation {
        let turn = self.direction().cross(&(*p - self.p2));
        if turn > 0. {
            Orientation::CounterClockwise
        } else if turn < 0. {
            Orientation::Clockwise
        } else {
            Orientation::Collinear
        }
    }

    /// Proper intersection: each segment's endpoints lie strictly on opposite sides of the other.
    /// Touching endpoints and collinear overlaps don't count.
    pub fn intersects(&self, o: &Segment) -> bool {
        self.orientation(&o.p1).opposes(&self.orientation(&o.p2))
            && o.orientation(&self.p1).opposes(&o.orientation(&self.p2))
    }

    /// Point at parameter `t`, where `t = 0` is `p1` and `t = 1` is `p2`.
    pub fn at(&self, t: f64) -> Point {
        self.p1 + self.direction() * t
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.p1, self.p2)
    }
}
