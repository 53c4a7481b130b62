//! Angular sectors rooted at a point, bounded by the rays toward two other points.
//!
//! Sectors are taken to be the smaller (< π) of the two angles between the bounding rays.
//! Testing only "which side of each bounding line" also accepts the mirrored cone behind
//! the root, so membership additionally requires the point to lie ahead of the root along
//! the sector's bisector.

use super::point::Point;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Sector {
    pub root: Point,
    pub left: Point,
    pub right: Point,
}

impl Sector {
    pub fn new(root: Point, left: Point, right: Point) -> Self {
        Sector { root, left, right }
    }

    fn arms(&self) -> (Point, Point) {
        (self.left - self.root, self.right - self.root)
    }

    /// Opening angle in radians, in `[0, π]`.
    pub fn angle(&self) -> f64 {
        let (u, w) = self.arms();
        u.cross(&w).abs().atan2(u.dot(&w))
    }

    /// Closed membership: points on either bounding ray count.
    pub fn contains(&self, p: &Point) -> bool {
        self.test(p, false)
    }

    /// Open membership: points on the bounding rays (or at the root) don't count.
    pub fn contains_strictly(&self, p: &Point) -> bool {
        self.test(p, true)
    }

    fn test(&self, p: &Point, strict: bool) -> bool {
        let (u, w) = self.arms();
        let v = *p - self.root;
        let ahead = v.dot(&(u + w)) > 0.;
        if !ahead {
            return false;
        }
        // Orient so that `u → w` turns counter-clockwise.
        let turn = u.cross(&w);
        let (a, b) = if turn >= 0. {
            (u.cross(&v), v.cross(&w))
        } else {
            (v.cross(&u), w.cross(&v))
        };
        if strict {
            a > 0. && b > 0.
        } else {
            a >= 0. && b >= 0.
        }
    }
}
