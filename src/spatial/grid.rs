//! Uniform grid index for dynamic point sets.
//!
//! The decimation engine needs a point index that shrinks as vertices are
//! removed, so a build-once tree does not fit. A uniform hash grid supports
//! `insert`, `remove`, and circle queries in time proportional to the local
//! point density.
//!
//! # Example
//!
//! ```
//! use mapthin::{BoundingCircle, Point2, PointGrid};
//!
//! let mut grid: PointGrid<f64, usize> = PointGrid::new(1.0);
//! grid.insert(0, Point2::new(0.5, 0.5));
//! grid.insert(1, Point2::new(8.0, 8.0));
//!
//! let mut hits = Vec::new();
//! let region = BoundingCircle::new(Point2::new(0.0, 0.0), 2.0);
//! grid.for_each_in_circle(region, |id, _p| hits.push(id));
//! assert_eq!(hits, vec![0]);
//! ```

use crate::bounds::{Aabb2, BoundingCircle};
use crate::primitives::Point2;
use num_traits::Float;
use std::collections::HashMap;

/// A uniform grid over 2D points, keyed by a caller-supplied id.
///
/// Ids are opaque to the grid; the caller guarantees that `remove` is
/// called with the same coordinates the id was inserted at.
#[derive(Debug, Clone)]
pub struct PointGrid<F, K> {
    cell: F,
    buckets: HashMap<(i64, i64), Vec<(K, Point2<F>)>>,
    len: usize,
}

impl<F: Float, K: Copy + PartialEq> PointGrid<F, K> {
    /// Creates an empty grid with the given cell width.
    ///
    /// # Panics
    ///
    /// Panics if `cell_width` is not strictly positive.
    pub fn new(cell_width: F) -> Self {
        assert!(cell_width > F::zero(), "grid cell width must be positive");
        Self {
            cell: cell_width,
            buckets: HashMap::new(),
            len: 0,
        }
    }

    /// Creates an empty grid sized for roughly `count` points spread over
    /// `bounds`, aiming for a handful of points per cell.
    pub fn with_bounds(bounds: Aabb2<F>, count: usize) -> Self {
        let extent = bounds.width().max(bounds.height());
        let n = F::from(count.max(1)).unwrap_or_else(F::one);
        let cell = extent / n.sqrt();
        let cell = if cell > F::zero() { cell } else { F::one() };
        Self::new(cell)
    }

    /// Returns the number of indexed points.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the grid holds no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn cell_of(&self, p: Point2<F>) -> (i64, i64) {
        let cx = (p.x / self.cell).floor().to_i64().unwrap_or(0);
        let cy = (p.y / self.cell).floor().to_i64().unwrap_or(0);
        (cx, cy)
    }

    /// Inserts a point under the given id.
    pub fn insert(&mut self, id: K, p: Point2<F>) {
        let key = self.cell_of(p);
        self.buckets.entry(key).or_default().push((id, p));
        self.len += 1;
    }

    /// Removes the point previously inserted under `id` at `p`.
    ///
    /// Returns `true` if the point was found and removed.
    pub fn remove(&mut self, id: K, p: Point2<F>) -> bool {
        let key = self.cell_of(p);
        if let Some(bucket) = self.buckets.get_mut(&key) {
            if let Some(pos) = bucket.iter().position(|(k, _)| *k == id) {
                bucket.swap_remove(pos);
                if bucket.is_empty() {
                    self.buckets.remove(&key);
                }
                self.len -= 1;
                return true;
            }
        }
        false
    }

    /// Visits every indexed point inside the given circle.
    ///
    /// Points exactly on the boundary are visited. The visitor receives the
    /// id and the stored coordinates.
    pub fn for_each_in_circle<V>(&self, region: BoundingCircle<F>, mut visit: V)
    where
        V: FnMut(K, Point2<F>),
    {
        let r = region.radius;
        let lo = self.cell_of(Point2::new(region.center.x - r, region.center.y - r));
        let hi = self.cell_of(Point2::new(region.center.x + r, region.center.y + r));

        for cx in lo.0..=hi.0 {
            for cy in lo.1..=hi.1 {
                if let Some(bucket) = self.buckets.get(&(cx, cy)) {
                    for &(id, p) in bucket {
                        if region.contains_point(p) {
                            visit(id, p);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_of(points: &[(usize, (f64, f64))]) -> PointGrid<f64, usize> {
        let mut g = PointGrid::new(1.0);
        for &(id, (x, y)) in points {
            g.insert(id, Point2::new(x, y));
        }
        g
    }

    #[test]
    fn test_insert_query() {
        let g = grid_of(&[(0, (0.5, 0.5)), (1, (3.0, 3.0)), (2, (0.9, 0.1))]);
        let mut hits = Vec::new();
        g.for_each_in_circle(BoundingCircle::new(Point2::new(0.5, 0.5), 1.0), |id, _| {
            hits.push(id)
        });
        hits.sort_unstable();
        assert_eq!(hits, vec![0, 2]);
    }

    #[test]
    fn test_remove() {
        let mut g = grid_of(&[(0, (0.5, 0.5)), (1, (0.6, 0.5))]);
        assert!(g.remove(0, Point2::new(0.5, 0.5)));
        assert!(!g.remove(0, Point2::new(0.5, 0.5)));
        assert_eq!(g.len(), 1);

        let mut hits = Vec::new();
        g.for_each_in_circle(BoundingCircle::new(Point2::new(0.5, 0.5), 1.0), |id, _| {
            hits.push(id)
        });
        assert_eq!(hits, vec![1]);
    }

    #[test]
    fn test_boundary_point_is_visited() {
        let g = grid_of(&[(7, (2.0, 0.0))]);
        let mut hits = Vec::new();
        g.for_each_in_circle(BoundingCircle::new(Point2::new(0.0, 0.0), 2.0), |id, _| {
            hits.push(id)
        });
        assert_eq!(hits, vec![7]);
    }

    #[test]
    fn test_negative_coordinates() {
        let g = grid_of(&[(0, (-3.5, -2.5)), (1, (-3.4, -2.4)), (2, (4.0, 4.0))]);
        let mut count = 0;
        g.for_each_in_circle(
            BoundingCircle::new(Point2::new(-3.45, -2.45), 0.5),
            |_, _| count += 1,
        );
        assert_eq!(count, 2);
    }

    #[test]
    fn test_with_bounds_degenerate_extent() {
        let bounds = Aabb2::from_point(Point2::new(1.0, 1.0));
        let g: PointGrid<f64, usize> = PointGrid::with_bounds(bounds, 10);
        assert!(g.is_empty());
    }
}
