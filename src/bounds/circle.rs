//! Bounding circle computation.

use crate::primitives::Point2;
use num_traits::Float;

/// A 2D bounding circle defined by center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingCircle<F> {
    /// Center of the circle.
    pub center: Point2<F>,
    /// Radius of the circle.
    pub radius: F,
}

impl<F: Float> BoundingCircle<F> {
    /// Creates a new bounding circle.
    #[inline]
    pub fn new(center: Point2<F>, radius: F) -> Self {
        Self { center, radius }
    }

    /// Creates the smallest circle containing two points (diameter circle).
    #[inline]
    pub fn from_two_points(a: Point2<F>, b: Point2<F>) -> Self {
        let center = a.midpoint(b);
        let radius = center.distance(a);
        Self { center, radius }
    }

    /// Creates the circumcircle of three points.
    ///
    /// Returns `None` if the points are collinear.
    pub fn from_three_points(a: Point2<F>, b: Point2<F>, c: Point2<F>) -> Option<Self> {
        let d =
            (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y)) * (F::one() + F::one());

        if d.abs() <= F::epsilon() {
            return None; // Collinear points
        }

        let a_sq = a.x * a.x + a.y * a.y;
        let b_sq = b.x * b.x + b.y * b.y;
        let c_sq = c.x * c.x + c.y * c.y;

        let cx = (a_sq * (b.y - c.y) + b_sq * (c.y - a.y) + c_sq * (a.y - b.y)) / d;
        let cy = (a_sq * (c.x - b.x) + b_sq * (a.x - c.x) + c_sq * (b.x - a.x)) / d;

        let center = Point2::new(cx, cy);
        let radius = center.distance(a);

        Some(Self { center, radius })
    }

    /// Creates the minimum circle enclosing triangle `abc`.
    ///
    /// This is the diameter circle of the longest side when the opposite
    /// vertex falls inside it (the obtuse case), and the circumcircle
    /// otherwise. For a degenerate (collinear) triangle it falls back to
    /// the diameter circle of the farthest point pair.
    pub fn enclosing_triangle(a: Point2<F>, b: Point2<F>, c: Point2<F>) -> Self {
        let ab = a.distance_squared(b);
        let bc = b.distance_squared(c);
        let ca = c.distance_squared(a);

        // Longest side and its opposite vertex.
        let (s1, s2, opposite) = if ab >= bc && ab >= ca {
            (a, b, c)
        } else if bc >= ca {
            (b, c, a)
        } else {
            (c, a, b)
        };

        let diam = Self::from_two_points(s1, s2);
        if diam.contains_point(opposite) {
            return diam;
        }
        match Self::from_three_points(a, b, c) {
            Some(circ) => circ,
            // Near-collinear: the diameter circle of the longest side
            // already covers the third point to within rounding.
            None => diam,
        }
    }

    /// Returns `true` if the circle contains the given point.
    ///
    /// Points exactly on the boundary are considered inside.
    #[inline]
    pub fn contains_point(self, p: Point2<F>) -> bool {
        self.center.distance_squared(p) <= self.radius * self.radius
    }
}
