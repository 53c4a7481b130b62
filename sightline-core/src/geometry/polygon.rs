use std::fmt::{self, Display, Formatter};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::{point::Point, segment::Segment};

/// Closed boundary made of segments; consecutive segments share an endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub segments: Vec<Segment>,
}

impl Polygon {
    pub fn new(segments: Vec<Segment>) -> Self {
        Polygon { segments }
    }

    /// Close the chain `v0 → v1 → … → v(n-1) → v0`.
    pub fn from_vertices(vertices: &[Point]) -> Self {
        let n = vertices.len();
        let segments = (0..n)
            .map(|i| Segment::new(vertices[i], vertices[(i + 1) % n]))
            .collect();
        Polygon { segments }
    }

    /// Unique boundary vertices, in boundary order.
    pub fn vertices(&self) -> Vec<Point> {
        self.segments
            .iter()
            .flat_map(|s| [s.p1, s.p2])
            .unique()
            .collect()
    }

    /// Even-odd ray casting: cast a ray rightward from `p` and count boundary crossings.
    /// Uses a half-open `[y_min, y_max)` rule so shared vertices aren't counted twice.
    pub fn contains(&self, p: &Point) -> bool {
        let mut crossings = 0;
        for s in &self.segments {
            let (v0, v1) = (&s.p1, &s.p2);
            let (y_min, y_max) = if v0.y < v1.y { (v0.y, v1.y) } else { (v1.y, v0.y) };
            if p.y < y_min || p.y >= y_max {
                continue;
            }
            let t = (p.y - v0.y) / (v1.y - v0.y);
            let x_crossing = v0.x + t * (v1.x - v0.x);
            if x_crossing > p.x {
                crossings += 1;
            }
        }
        crossings % 2 == 1
    }

    /// True if either polygon contains a vertex of the other, or any of their edges cross.
    pub fn intersects(&self, o: &Polygon) -> bool {
        o.vertices().iter().any(|v| self.contains(v))
            || self.vertices().iter().any(|v| o.contains(v))
            || self
                .segments
                .iter()
                .cartesian_product(o.segments.iter())
                .any(|(a, b)| a.intersects(b))
    }

    /// True if `s` crosses the boundary, or starts or ends inside the polygon.
    pub fn is_crossed_by(&self, s: &Segment) -> bool {
        self.segments.iter().any(|edge| edge.intersects(s))
            || self.contains(&s.p1)
            || self.contains(&s.p2)
    }
}

impl Display for Polygon {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let verts: Vec<String> = self.vertices().iter().map(|v| v.to_string()).collect();
        write!(f, "Polygon[{}]", verts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64, side: f64) -> Polygon {
        Polygon::from_vertices(&[
            Point::new(x, y),
            Point::new(x + side, y),
            Point::new(x + side, y + side),
            Point::new(x, y + side),
        ])
    }

    #[test]
    fn square_contains() {
        let s = square(0., 0., 10.);
        assert!(s.contains(&Point::new(5., 5.)));
        assert!(!s.contains(&Point::new(20., 20.)));
        assert!(!s.contains(&Point::new(-1., 5.)));
        assert!(!s.contains(&Point::new(5., 11.)));
    }

    #[test]
    fn chain_is_closed() {
        let s = square(0., 0., 10.);
        assert_eq!(s.segments.len(), 4);
        for (a, b) in s.segments.iter().circular_tuple_windows() {
            assert_eq!(a.p2, b.p1);
        }
        assert_eq!(s.vertices().len(), 4);
    }

    #[test]
    fn overlapping_squares_intersect() {
        let a = square(0., 0., 10.);
        let b = square(5., 5., 10.);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn nested_squares_intersect() {
        // No edges cross; only containment detects it, from either side
        let outer = square(0., 0., 10.);
        let inner = square(4., 4., 2.);
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
    }

    #[test]
    fn cross_shaped_overlap() {
        // Neither contains a vertex of the other; only edge crossings detect it
        let wide = Polygon::from_vertices(&[
            Point::new(0., 4.),
            Point::new(10., 4.),
            Point::new(10., 6.),
            Point::new(0., 6.),
        ]);
        let tall = Polygon::from_vertices(&[
            Point::new(4., 0.),
            Point::new(6., 0.),
            Point::new(6., 10.),
            Point::new(4., 10.),
        ]);
        assert!(wide.intersects(&tall));
        assert!(tall.intersects(&wide));
    }

    #[test]
    fn disjoint_squares() {
        let a = square(0., 0., 10.);
        let b = square(20., 0., 10.);
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn crossed_by_segment() {
        let s = square(0., 0., 10.);
        assert!(s.is_crossed_by(&Segment::new(Point::new(-5., 5.), Point::new(15., 5.))));
        // Ends inside
        assert!(s.is_crossed_by(&Segment::new(Point::new(5., 5.), Point::new(5., 20.))));
        assert!(!s.is_crossed_by(&Segment::new(Point::new(-5., 15.), Point::new(15., 15.))));
    }
}
