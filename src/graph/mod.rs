//! Planar graph substrates and the capability surface the engine needs.
//!
//! The decimation engine does not own a graph representation. It drives any
//! substrate that can answer a small set of local questions (neighbors of a
//! vertex, constrained adjacency, per-edge absorbed-point history) and can
//! remove a degree-2 vertex while reconnecting its two neighbors. Two
//! substrates are provided: [`Subdivision`] for general planar coverage
//! maps and [`RingMesh`] for constrained triangulations.
//!
//! Vertices are addressed by generation-tagged arena keys ([`VertexKey`]);
//! removing a vertex invalidates its key rather than leaving anything
//! dangling, and every walk re-resolves keys against the live arena.

mod mesh;
mod subdivision;

use crate::primitives::Point2;
use num_traits::Float;
use slotmap::new_key_type;

pub use mesh::RingMesh;
pub use subdivision::Subdivision;

new_key_type! {
    /// Key addressing a vertex in a substrate's arena.
    pub struct VertexKey;
}

/// Normalizes an unordered vertex pair for use as an edge map key.
#[inline]
pub(crate) fn edge_id(a: VertexKey, b: VertexKey) -> (VertexKey, VertexKey) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// The ordered list of original points absorbed into one constrained edge.
///
/// A fresh edge's history is its two endpoints. Every merge splices the two
/// incident histories end to end, so the list always runs from one live
/// endpoint to the other with every absorbed point in between, in walk
/// order.
#[derive(Debug, Clone)]
pub struct EdgeHistory<F> {
    a: VertexKey,
    b: VertexKey,
    /// Points ordered from `a` to `b`.
    points: Vec<Point2<F>>,
}

impl<F: Float> EdgeHistory<F> {
    /// History of a freshly constrained edge: just its endpoints.
    pub fn seed(a: VertexKey, pa: Point2<F>, b: VertexKey, pb: Point2<F>) -> Self {
        Self {
            a,
            b,
            points: vec![pa, pb],
        }
    }

    /// The absorbed points, ordered from one endpoint to the other.
    pub fn points(&self) -> &[Point2<F>] {
        &self.points
    }

    /// The absorbed points ordered so the list starts at `from`.
    ///
    /// # Panics
    ///
    /// Debug-asserts that `from` is one of the edge's endpoints.
    pub fn oriented(&self, from: VertexKey) -> Vec<Point2<F>> {
        debug_assert!(
            from == self.a || from == self.b,
            "orientation endpoint is not on this edge"
        );
        if from == self.a {
            self.points.clone()
        } else {
            let mut pts = self.points.clone();
            pts.reverse();
            pts
        }
    }

    /// Splices the histories of `p`–`q` and `q`–`r` into the history of the
    /// merged edge `p`–`r`.
    ///
    /// The shared seam point `q` is kept once, so no absorbed point is lost.
    pub fn splice(pq: &Self, qr: &Self, p: VertexKey, q: VertexKey, r: VertexKey) -> Self {
        let mut points = pq.oriented(p);
        let tail = qr.oriented(q);
        debug_assert!(
            points.last() == tail.first(),
            "histories do not share the merged vertex"
        );
        points.extend_from_slice(&tail[1..]);
        Self { a: p, b: r, points }
    }
}


/// The substrate capability set the generic engine is written against.
///
/// "Constrained" edges are the boundary/coverage edges being simplified;
/// a triangulated substrate may have additional unconstrained edges, which
/// only participate through [`all_neighbors`](PlanarGraph::all_neighbors)
/// and the mesh topology guard.
pub trait PlanarGraph<F: Float> {
    /// Number of live vertices.
    fn vertex_count(&self) -> usize;

    /// Keys of all live vertices.
    fn vertex_keys(&self) -> Vec<VertexKey>;

    /// Whether `v` refers to a live vertex.
    fn contains(&self, v: VertexKey) -> bool;

    /// Position of a live vertex.
    fn point(&self, v: VertexKey) -> Point2<F>;

    /// Whether the caller pinned this vertex against removal.
    fn is_locked(&self, v: VertexKey) -> bool;

    /// Neighbors along constrained edges only.
    fn constrained_neighbors(&self, v: VertexKey) -> Vec<VertexKey>;

    /// All graph neighbors, constrained or not.
    fn all_neighbors(&self, v: VertexKey) -> Vec<VertexKey>;

    /// Whether an edge already joins `a` and `b`. Used as the merge
    /// pre-check: a triangulated substrate answers over all edges, since
    /// merging a chain onto an existing adjacency would collapse the face
    /// between them.
    fn are_connected(&self, a: VertexKey, b: VertexKey) -> bool;

    /// Absorbed-point history of the constrained edge between `from` and
    /// `to`, ordered starting at `from`.
    ///
    /// # Panics
    ///
    /// Panics if no constrained edge joins the two vertices.
    fn history(&self, from: VertexKey, to: VertexKey) -> Vec<Point2<F>>;

    /// Removes shape point `q`, merging its constrained edges `p`–`q` and
    /// `q`–`r` into a single constrained edge `p`–`r` whose history is the
    /// splice of the two old histories.
    ///
    /// Preconditions (debug-asserted): `q`'s constrained neighbors are
    /// exactly `p` and `r`, and no constrained edge `p`–`r` exists yet.
    fn remove_and_reconnect(&mut self, q: VertexKey, p: VertexKey, r: VertexKey);
}

/// Extra capability of triangulated substrates: an angularly ordered
/// neighbor ring, which lets the topology guard walk the fan between two
/// neighbors instead of querying a spatial index.
pub trait NeighborRing<F: Float>: PlanarGraph<F> {
    /// All neighbors of `v` in counter-clockwise order.
    fn ring(&self, v: VertexKey) -> Vec<VertexKey>;
}
