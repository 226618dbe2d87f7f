//! Cumulative error against absorbed-point histories.
//!
//! Every constrained edge remembers the original points it has absorbed
//! (see [`EdgeHistory`](crate::graph::EdgeHistory)). The cost of a merge is
//! measured against those histories, not against the current vertices, so
//! error can never silently accumulate across successive removals.

use super::metric::deviation_from_line;
use crate::graph::{PlanarGraph, VertexKey};
use crate::primitives::Point2;
use num_traits::Float;

/// Largest perpendicular deviation of any point in `points` from the line
/// through `p` and `r`.
pub fn chain_deviation<F: Float>(points: &[Point2<F>], p: Point2<F>, r: Point2<F>) -> F {
    points
        .iter()
        .map(|&pt| deviation_from_line(pt, p, r))
        .fold(F::zero(), F::max)
}

/// Cost of merging edges `p`–`q` and `q`–`r` into `p`–`r`: the largest
/// deviation of every absorbed point of both histories from the new
/// supporting line.
///
/// The live endpoints `p` and `r` deviate by exactly zero, so including
/// them is harmless; `q` itself is an absorbed point and always counts.
///
/// # Panics
///
/// Panics if either constrained edge is missing, or (debug) if `p` and `r`
/// coincide.
pub fn merge_deviation<F, G>(graph: &G, p: VertexKey, q: VertexKey, r: VertexKey) -> F
where
    F: Float,
    G: PlanarGraph<F> + ?Sized,
{
    let pp = graph.point(p);
    let pr = graph.point(r);
    let first = chain_deviation(&graph.history(p, q), pp, pr);
    let second = chain_deviation(&graph.history(q, r), pp, pr);
    first.max(second)
}
