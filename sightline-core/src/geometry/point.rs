use std::{
    fmt::{self, Display, Formatter},
    hash::{Hash, Hasher},
    ops::{Add, Mul, Sub},
};

use approx::{AbsDiffEq, RelativeEq};
use derive_more::From;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// A point in the plane. Equality and hashing use the exact coordinates.
#[derive(Debug, Copy, Clone, From, Serialize, Deserialize)]
#[serde(from = "PointRepr")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Input files write points either as `{"x": .., "y": ..}` or as `[x, y]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum PointRepr {
    Xy { x: f64, y: f64 },
    Pair(f64, f64),
}

impl From<PointRepr> for Point {
    fn from(repr: PointRepr) -> Self {
        match repr {
            PointRepr::Xy { x, y } | PointRepr::Pair(x, y) => Point { x, y },
        }
    }
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// z-component of the 2D cross product `self × o`.
    pub fn cross(&self, o: &Point) -> f64 {
        self.x * o.y - self.y * o.x
    }

    pub fn dot(&self, o: &Point) -> f64 {
        self.x * o.x + self.y * o.y
    }

    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Euclidean distance.
    pub fn distance(&self, o: &Point) -> f64 {
        (*o - *self).norm()
    }

    fn key(&self) -> (OrderedFloat<f64>, OrderedFloat<f64>) {
        (OrderedFloat(self.x), OrderedFloat(self.y))
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state)
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

impl AbsDiffEq for Point {
    type Epsilon = f64;
    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }
    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon) && self.y.abs_diff_eq(&other.y, epsilon)
    }
}

impl RelativeEq for Point {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }
    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
    }
}

impl Add for Point {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Point {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Point {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Point {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Mul<f64> for Point {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        Point {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn exact_equality_and_hashing() {
        let a = Point::new(1., 2.);
        let b: Point = (1., 2.).into();
        assert_eq!(a, b);
        assert_ne!(a, Point::new(1., 2. + 1e-12));

        let set: HashSet<Point> = [a, b, Point::new(2., 1.)].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Point::new(0., 0.);
        let b = Point::new(3., 4.);
        assert_relative_eq!(a.distance(&b), 5.);
        assert_relative_eq!(b.distance(&a), 5.);
    }

    #[test]
    fn deserialize_both_shapes() {
        let p: Point = serde_json::from_str("[1.5, -2]").unwrap();
        assert_eq!(p, Point::new(1.5, -2.));
        let p: Point = serde_json::from_str(r#"{"x": 3, "y": 4}"#).unwrap();
        assert_eq!(p, Point::new(3., 4.));
    }
}
