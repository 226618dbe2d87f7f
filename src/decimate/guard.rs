//! Topology guards: the final veto on every merge.
//!
//! Merging `p`–`q`–`r` into `p`–`r` sweeps the triangle `p q r`. Any vertex
//! inside that triangle (or on its new edge) would change sides relative to
//! the constrained boundary, so the merge must be refused. Both guards
//! answer exactly that question, by different means:
//!
//! - [`RingGuard`] uses the platelet property of a tiled neighborhood: a
//!   squatter inside the triangle must be a graph neighbor of `q`, so
//!   walking `q`'s angular ring between `r` and `p` is a complete check.
//! - [`SquatterGuard`] keeps a uniform-grid index of all live vertices and
//!   queries the triangle's minimum enclosing circle.

use crate::bounds::{Aabb2, BoundingCircle};
use crate::graph::{NeighborRing, PlanarGraph, VertexKey};
use crate::primitives::Point2;
use crate::spatial::PointGrid;
use crate::tolerance::{orient2d, point_in_triangle, Orientation};
use num_traits::Float;
use std::collections::HashMap;

/// Strategy deciding whether a merge preserves topology.
///
/// The scheduler calls [`merge_is_safe`](Self::merge_is_safe) last, after
/// the degree, lock, adjacency, ambiguity and error checks have all passed,
/// and [`before_removal`](Self::before_removal) just before the substrate
/// removes `q`, while `q` is still live.
pub trait TopologyGuard<F: Float, G: PlanarGraph<F> + ?Sized> {
    /// Whether replacing the chain `p`–`q`–`r` by the edge `p`–`r` leaves
    /// every other vertex on the side of the boundary it started on.
    ///
    /// Takes `&mut self` so a guard may remember which vertex it refused
    /// `q` for; [`before_removal`](Self::before_removal) hands those
    /// refusals back when the blocker disappears.
    fn merge_is_safe(&mut self, graph: &G, q: VertexKey, p: VertexKey, r: VertexKey) -> bool;

    /// Hook run before the substrate removes `q`. Returns the candidates
    /// this guard had refused because of `q`; the scheduler re-prices them
    /// along with `q`'s graph neighbors.
    fn before_removal(&mut self, _graph: &G, _q: VertexKey) -> Vec<VertexKey> {
        Vec::new()
    }
}

/// Fan-walk guard for triangulated substrates.
///
/// Needs no auxiliary state: the mesh's own rings are the index.
#[derive(Debug, Clone, Copy, Default)]
pub struct RingGuard;

impl RingGuard {
    /// Walks `q`'s ring counter-clockwise from `a` to `b` and checks that
    /// every fan vertex in between lies strictly on the far side of the
    /// line `a`–`b` from `q`.
    fn fan_is_clear<F, G>(graph: &G, q: VertexKey, a: VertexKey, b: VertexKey) -> bool
    where
        F: Float,
        G: NeighborRing<F> + ?Sized,
    {
        let ring = graph.ring(q);
        let ia = ring.iter().position(|&v| v == a).expect("a not in ring");
        let ib = ring.iter().position(|&v| v == b).expect("b not in ring");
        let pa = graph.point(a);
        let pb = graph.point(b);

        let mut i = (ia + 1) % ring.len();
        while i != ib {
            let v = graph.point(ring[i]);
            // Collinear contact with the new edge also blocks.
            if orient2d(pa, pb, v, F::zero()) != Orientation::Clockwise {
                return false;
            }
            i = (i + 1) % ring.len();
        }
        true
    }
}

impl<F, G> TopologyGuard<F, G> for RingGuard
where
    F: Float,
    G: NeighborRing<F> + ?Sized,
{
    // Every blocker sits in q's own ring, and ring adjacency is symmetric,
    // so the scheduler's neighbor refresh already re-prices its victims.
    // No refusal bookkeeping is needed here.
    fn merge_is_safe(&mut self, graph: &G, q: VertexKey, p: VertexKey, r: VertexKey) -> bool {
        let pp = graph.point(p);
        let pq = graph.point(q);
        let pr = graph.point(r);

        match orient2d(pp, pq, pr, F::zero()) {
            // The chain is already straight; nothing is swept.
            Orientation::Collinear => true,
            // Interior of the triangle is in the fan from r CCW to p.
            Orientation::CounterClockwise => Self::fan_is_clear(graph, q, r, p),
            // Mirror image: the fan from p CCW to r is swept.
            Orientation::Clockwise => Self::fan_is_clear(graph, q, p, r),
        }
    }
}

/// Spatial-index guard for general subdivisions.
///
/// Maintains a [`PointGrid`] of every live vertex; the scheduler's
/// `before_removal` hook keeps it in sync as vertices disappear.
///
/// A refused merge is remembered against each squatter that caused it.
/// Unlike the mesh case, a squatter need not be a graph neighbor of the
/// candidate it blocks, so the scheduler's neighbor refresh alone would
/// never re-admit the candidate once the squatter is removed.
/// `before_removal` returns those candidates so the scheduler can.
#[derive(Debug, Clone)]
pub struct SquatterGuard<F> {
    grid: PointGrid<F, VertexKey>,
    /// Squatter to the candidates it has vetoed.
    vetoes: HashMap<VertexKey, Vec<VertexKey>>,
}

impl<F: Float> SquatterGuard<F> {
    /// Indexes every live vertex of the graph.
    pub fn build<G>(graph: &G) -> Self
    where
        G: PlanarGraph<F> + ?Sized,
    {
        let keys = graph.vertex_keys();
        let bounds = Aabb2::from_points(keys.iter().map(|&v| graph.point(v)))
            .unwrap_or_else(|| Aabb2::from_point(Point2::origin()));
        let mut grid = PointGrid::with_bounds(bounds, keys.len());
        for v in keys {
            grid.insert(v, graph.point(v));
        }
        Self {
            grid,
            vetoes: HashMap::new(),
        }
    }

    /// Degenerate case: `p`, `q`, `r` collinear. The merge sweeps no area,
    /// but the new edge covers the whole span of the three points, so any
    /// other vertex sitting on that span blocks it.
    fn span_blockers(
        &self,
        q: VertexKey,
        p: VertexKey,
        r: VertexKey,
        pts: [Point2<F>; 3],
    ) -> Vec<VertexKey> {
        let [pp, pq, pr] = pts;
        // Farthest pair spans all three collinear points.
        let pairs = [(pp, pq), (pq, pr), (pp, pr)];
        let (a, b) = pairs
            .iter()
            .copied()
            .max_by(|x, y| {
                x.0.distance_squared(x.1)
                    .partial_cmp(&y.0.distance_squared(y.1))
                    .expect("non-finite coordinate")
            })
            .expect("pairs is non-empty");

        let bbox = Aabb2::from_corners(a, b);
        let mut blockers = Vec::new();
        self.grid
            .for_each_in_circle(BoundingCircle::from_two_points(a, b), |id, pt| {
                if id == q || id == p || id == r {
                    return;
                }
                if bbox.contains(pt) && orient2d(a, b, pt, F::zero()) == Orientation::Collinear {
                    blockers.push(id);
                }
            });
        blockers
    }

    /// Every indexed vertex inside (or on the boundary of) the region swept
    /// by merging `p`–`q`–`r`.
    fn blockers<G>(&self, graph: &G, q: VertexKey, p: VertexKey, r: VertexKey) -> Vec<VertexKey>
    where
        G: PlanarGraph<F> + ?Sized,
    {
        let pp = graph.point(p);
        let pq = graph.point(q);
        let pr = graph.point(r);

        if orient2d(pp, pq, pr, F::zero()) == Orientation::Collinear {
            return self.span_blockers(q, p, r, [pp, pq, pr]);
        }

        let region = BoundingCircle::enclosing_triangle(pp, pq, pr);
        let mut blockers = Vec::new();
        self.grid.for_each_in_circle(region, |id, pt| {
            if id == q || id == p || id == r {
                return;
            }
            // Boundary contact counts as a squatter.
            if point_in_triangle(pt, pp, pq, pr, F::zero()) {
                blockers.push(id);
            }
        });
        blockers
    }
}

impl<F, G> TopologyGuard<F, G> for SquatterGuard<F>
where
    F: Float,
    G: PlanarGraph<F> + ?Sized,
{
    fn merge_is_safe(&mut self, graph: &G, q: VertexKey, p: VertexKey, r: VertexKey) -> bool {
        let blockers = self.blockers(graph, q, p, r);
        for &squatter in &blockers {
            let victims = self.vetoes.entry(squatter).or_default();
            if !victims.contains(&q) {
                victims.push(q);
            }
        }
        blockers.is_empty()
    }

    fn before_removal(&mut self, graph: &G, q: VertexKey) -> Vec<VertexKey> {
        let removed = self.grid.remove(q, graph.point(q));
        debug_assert!(removed, "removed vertex was not indexed");
        // Candidates q had vetoed; stale entries are harmless, the
        // scheduler re-checks liveness before re-pricing.
        self.vetoes.remove(&q).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{RingMesh, Subdivision};

    #[test]
    fn test_squatter_guard_rejects_interior_vertex() {
        let mut map: Subdivision<f64> = Subdivision::new();
        let keys = map
            .insert_polyline(&[
                Point2::new(0.0, 0.0),
                Point2::new(2.0, 2.0),
                Point2::new(4.0, 0.0),
            ])
            .unwrap();
        // An unrelated vertex inside the triangle swept by the merge.
        map.add_vertex(Point2::new(2.0, 0.5));

        let mut guard = SquatterGuard::build(&map);
        assert!(!guard.merge_is_safe(&map, keys[1], keys[0], keys[2]));

        // Outside the triangle it does not block.
        let mut map2: Subdivision<f64> = Subdivision::new();
        let keys2 = map2
            .insert_polyline(&[
                Point2::new(0.0, 0.0),
                Point2::new(2.0, 2.0),
                Point2::new(4.0, 0.0),
            ])
            .unwrap();
        map2.add_vertex(Point2::new(2.0, -0.5));
        let mut guard2 = SquatterGuard::build(&map2);
        assert!(guard2.merge_is_safe(&map2, keys2[1], keys2[0], keys2[2]));
    }

    #[test]
    fn test_before_removal_unindexes() {
        let mut map: Subdivision<f64> = Subdivision::new();
        let keys = map
            .insert_polyline(&[
                Point2::new(0.0, 0.0),
                Point2::new(2.0, 2.0),
                Point2::new(2.5, 1.5),
                Point2::new(6.0, 2.0),
            ])
            .unwrap();
        let mut guard = SquatterGuard::build(&map);

        // keys[2] sits inside the triangle of the later merge and blocks it
        // until it is itself removed.
        assert!(!guard.merge_is_safe(&map, keys[1], keys[0], keys[3]));
        let victims = guard.before_removal(&map, keys[2]);
        assert_eq!(victims, vec![keys[1]]);
        map.remove_and_reconnect(keys[2], keys[1], keys[3]);
        assert!(guard.merge_is_safe(&map, keys[1], keys[0], keys[3]));
    }

    #[test]
    fn test_squatter_guard_boundary_contact_blocks() {
        let mut map: Subdivision<f64> = Subdivision::new();
        let keys = map
            .insert_polyline(&[
                Point2::new(0.0, 0.0),
                Point2::new(2.0, 2.0),
                Point2::new(4.0, 0.0),
            ])
            .unwrap();
        // Exactly on the new edge p-r.
        map.add_vertex(Point2::new(2.0, 0.0));
        let mut guard = SquatterGuard::build(&map);
        assert!(!guard.merge_is_safe(&map, keys[1], keys[0], keys[2]));
    }

    #[test]
    fn test_squatter_guard_collinear_span() {
        let mut map: Subdivision<f64> = Subdivision::new();
        let keys = map
            .insert_polyline(&[
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(2.0, 0.0),
            ])
            .unwrap();
        let mut guard = SquatterGuard::build(&map);
        assert!(guard.merge_is_safe(&map, keys[1], keys[0], keys[2]));

        // A stray vertex on the covered span blocks the merge.
        map.add_vertex(Point2::new(1.5, 0.0));
        let mut guard = SquatterGuard::build(&map);
        assert!(!guard.merge_is_safe(&map, keys[1], keys[0], keys[2]));
    }

    fn bent_fan() -> (RingMesh<f64>, [VertexKey; 4]) {
        // Right-angle chain p-q-r with a fourth vertex in q's ring.
        let mut mesh: RingMesh<f64> = RingMesh::new();
        let p = mesh.add_vertex(Point2::new(0.0, 1.0));
        let q = mesh.add_vertex(Point2::new(0.0, 0.0));
        let r = mesh.add_vertex(Point2::new(1.0, 0.0));
        let v = mesh.add_vertex(Point2::new(0.25, 0.25));
        mesh.add_triangle(p, q, v).unwrap();
        mesh.add_triangle(q, r, v).unwrap();
        mesh.constrain(p, q).unwrap();
        mesh.constrain(q, r).unwrap();
        (mesh, [p, q, r, v])
    }

    #[test]
    fn test_ring_guard_rejects_fan_vertex_in_triangle() {
        let (mesh, [p, q, r, _v]) = bent_fan();
        // v = (0.25, 0.25) is inside triangle p-q-r.
        assert!(!RingGuard.merge_is_safe(&mesh, q, p, r));
    }

    #[test]
    fn test_ring_guard_accepts_fan_vertex_outside_triangle() {
        let mut mesh: RingMesh<f64> = RingMesh::new();
        let p = mesh.add_vertex(Point2::new(0.0, 1.0));
        let q = mesh.add_vertex(Point2::new(0.0, 0.0));
        let r = mesh.add_vertex(Point2::new(1.0, 0.0));
        // Beyond the new edge p-r, outside the swept triangle.
        let v = mesh.add_vertex(Point2::new(2.0, 2.0));
        mesh.add_triangle(p, q, v).unwrap();
        mesh.add_triangle(q, r, v).unwrap();
        mesh.constrain(p, q).unwrap();
        mesh.constrain(q, r).unwrap();
        assert!(RingGuard.merge_is_safe(&mesh, q, p, r));
    }

    #[test]
    fn test_ring_guard_collinear_is_safe() {
        let mut mesh: RingMesh<f64> = RingMesh::new();
        let p = mesh.add_vertex(Point2::new(0.0, 0.0));
        let q = mesh.add_vertex(Point2::new(1.0, 0.0));
        let r = mesh.add_vertex(Point2::new(2.0, 0.0));
        let up = mesh.add_vertex(Point2::new(1.0, 1.0));
        mesh.add_triangle(p, q, up).unwrap();
        mesh.add_triangle(q, r, up).unwrap();
        mesh.constrain(p, q).unwrap();
        mesh.constrain(q, r).unwrap();
        assert!(RingGuard.merge_is_safe(&mesh, q, p, r));
    }

    #[test]
    fn test_ring_guard_mirrored_winding() {
        let (mut mesh, _) = bent_fan();
        // Same shape reflected: p-q-r now turns the other way.
        let p = mesh.add_vertex(Point2::new(10.0, 1.0));
        let q = mesh.add_vertex(Point2::new(10.0, 0.0));
        let r = mesh.add_vertex(Point2::new(9.0, 0.0));
        let v = mesh.add_vertex(Point2::new(9.75, 0.25));
        mesh.add_triangle(p, q, v).unwrap();
        mesh.add_triangle(q, r, v).unwrap();
        mesh.constrain(p, q).unwrap();
        mesh.constrain(q, r).unwrap();
        assert!(!RingGuard.merge_is_safe(&mesh, q, p, r));
    }
}
