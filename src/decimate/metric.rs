//! Perpendicular-deviation error metric.

use crate::primitives::Point2;
use num_traits::Float;

/// Perpendicular distance from `q` to the infinite line through `p` and `r`.
///
/// This is the supporting line of the merged edge, not the segment, so a
/// point beyond either endpoint still measures only its lateral offset.
/// Exactly zero for collinear triples.
///
/// # Panics
///
/// Debug-asserts that `p != r`; coincident endpoints have no supporting
/// line.
pub fn deviation_from_line<F: Float>(q: Point2<F>, p: Point2<F>, r: Point2<F>) -> F {
    debug_assert!(p != r, "supporting line endpoints coincide");
    let d = r - p;
    let len = d.magnitude();
    if len == F::zero() {
        // Release-mode fallback for coincident endpoints.
        return q.distance(p);
    }
    (d.cross(q - p)).abs() / len
}
