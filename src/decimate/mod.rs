//! Incremental, topology-safe decimation.
//!
//! The engine removes degree-2 shape points from a planar graph, cheapest
//! first, while three independent checks keep every merge honest:
//!
//! - the **ledger** ([`merge_deviation`]) prices a merge against every
//!   original point its edges have absorbed, so error cannot creep across
//!   successive removals;
//! - the **ambiguity guard** ([`OriginSnapshot`]) refuses merges that would
//!   conflate parallel paths between junctions of the original graph;
//! - a **topology guard** ([`RingGuard`] or [`SquatterGuard`]) refuses
//!   merges that would sweep another vertex across the boundary.
//!
//! Most callers want one of the two entry points:
//!
//! ```
//! use mapthin::{simplify_subdivision, PlanarGraph, Point2, Subdivision};
//!
//! let mut map: Subdivision<f64> = Subdivision::new();
//! map.insert_polyline(&[
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(2.0, 0.0),
//!     Point2::new(3.0, 0.0),
//! ])
//! .unwrap();
//!
//! let removed = simplify_subdivision(&mut map, 0.01);
//! assert_eq!(removed, 2);
//! assert_eq!(map.vertex_count(), 2);
//! ```

mod ambiguity;
mod guard;
mod ledger;
mod metric;
mod scheduler;

use crate::graph::{RingMesh, Subdivision};
use num_traits::Float;

pub use ambiguity::{chain_neighbors, OriginSnapshot};
pub use guard::{RingGuard, SquatterGuard, TopologyGuard};
pub use ledger::{chain_deviation, merge_deviation};
pub use metric::deviation_from_line;
pub use scheduler::Decimator;

/// Simplifies a [`Subdivision`] in place under the given error bound,
/// returning the number of vertices removed.
pub fn simplify_subdivision<F: Float>(map: &mut Subdivision<F>, max_error: F) -> usize {
    let guard = SquatterGuard::build(map);
    let mut engine = Decimator::new(map, guard, max_error);
    engine.run(map)
}

/// Simplifies a [`RingMesh`] in place under the given error bound,
/// returning the number of vertices removed.
pub fn simplify_mesh<F: Float>(mesh: &mut RingMesh<F>, max_error: F) -> usize {
    let mut engine = Decimator::new(mesh, RingGuard, max_error);
    engine.run(mesh)
}

/// [`simplify_subdivision`] with a progress callback, called with
/// `(removed, initial candidate count)` at a fixed removal stride and once
/// at the end.
pub fn simplify_subdivision_with_progress<F, P>(
    map: &mut Subdivision<F>,
    max_error: F,
    progress: P,
) -> usize
where
    F: Float,
    P: FnMut(usize, usize),
{
    let guard = SquatterGuard::build(map);
    let mut engine = Decimator::new(map, guard, max_error).with_progress(progress);
    engine.run(map)
}

/// [`simplify_mesh`] with a progress callback.
pub fn simplify_mesh_with_progress<F, P>(mesh: &mut RingMesh<F>, max_error: F, progress: P) -> usize
where
    F: Float,
    P: FnMut(usize, usize),
{
    let mut engine = Decimator::new(mesh, RingGuard, max_error).with_progress(progress);
    engine.run(mesh)
}
