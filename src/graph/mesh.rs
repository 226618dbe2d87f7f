//! Triangulated mesh substrate with angular neighbor rings.

use super::{edge_id, EdgeHistory, NeighborRing, PlanarGraph, VertexKey};
use crate::error::GraphError;
use crate::primitives::Point2;
use crate::tolerance::{orient2d, point_in_triangle, Orientation};
use num_traits::Float;
use slotmap::SlotMap;
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct MeshVertex<F> {
    point: Point2<F>,
    locked: bool,
    /// Neighbors in counter-clockwise order by angle around this vertex.
    ring: Vec<VertexKey>,
}

/// A constrained triangulation stored as per-vertex neighbor rings.
///
/// Edges come in two flavors. Triangulation edges tile the plane and only
/// matter to the topology guard; constrained edges carry absorbed-point
/// histories and are what the engine simplifies. Build the tiling with
/// [`add_triangle`](Self::add_triangle), then mark boundary chains with
/// [`constrain`](Self::constrain).
///
/// Each vertex keeps its neighbors sorted counter-clockwise, which is what
/// lets the fan-walk topology guard run without any spatial index.
#[derive(Debug, Clone, Default)]
pub struct RingMesh<F> {
    verts: SlotMap<VertexKey, MeshVertex<F>>,
    constraints: HashMap<(VertexKey, VertexKey), EdgeHistory<F>>,
}

impl<F: Float> RingMesh<F> {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self {
            verts: SlotMap::with_key(),
            constraints: HashMap::new(),
        }
    }

    /// Adds an isolated vertex and returns its key.
    pub fn add_vertex(&mut self, point: Point2<F>) -> VertexKey {
        self.verts.insert(MeshVertex {
            point,
            locked: false,
            ring: Vec::new(),
        })
    }

    /// Adds the three edges of a triangle, skipping edges already present.
    pub fn add_triangle(
        &mut self,
        a: VertexKey,
        b: VertexKey,
        c: VertexKey,
    ) -> Result<(), GraphError> {
        if a == b || b == c || a == c {
            return Err(GraphError::SelfLoop);
        }
        for v in [a, b, c] {
            if !self.verts.contains_key(v) {
                return Err(GraphError::UnknownVertex);
            }
        }
        self.connect(a, b);
        self.connect(b, c);
        self.connect(c, a);
        Ok(())
    }

    /// Marks an existing triangulation edge as constrained, seeding its
    /// history with the two endpoints.
    pub fn constrain(&mut self, a: VertexKey, b: VertexKey) -> Result<(), GraphError> {
        if a == b {
            return Err(GraphError::SelfLoop);
        }
        if !self.verts.contains_key(a) || !self.verts.contains_key(b) {
            return Err(GraphError::UnknownVertex);
        }
        if !self.verts[a].ring.contains(&b) {
            return Err(GraphError::MissingEdge);
        }
        if self.constraints.contains_key(&edge_id(a, b)) {
            return Err(GraphError::DuplicateEdge);
        }
        let pa = self.verts[a].point;
        let pb = self.verts[b].point;
        self.constraints
            .insert(edge_id(a, b), EdgeHistory::seed(a, pa, b, pb));
        Ok(())
    }

    /// Pins a vertex so the engine treats it as a junction regardless of
    /// degree.
    pub fn lock(&mut self, v: VertexKey) -> Result<(), GraphError> {
        match self.verts.get_mut(v) {
            Some(vert) => {
                vert.locked = true;
                Ok(())
            }
            None => Err(GraphError::UnknownVertex),
        }
    }

    /// Whether edge `a`–`b` is constrained.
    pub fn is_constrained(&self, a: VertexKey, b: VertexKey) -> bool {
        self.constraints.contains_key(&edge_id(a, b))
    }

    /// All constrained edges as unordered endpoint pairs.
    pub fn constrained_edges(&self) -> impl Iterator<Item = (VertexKey, VertexKey)> + '_ {
        self.constraints.keys().copied()
    }

    /// The absorbed-point history of constrained edge `a`–`b`, ordered from
    /// `a`, or `None` if the edge is not constrained.
    pub fn edge_history(&self, a: VertexKey, b: VertexKey) -> Option<Vec<Point2<F>>> {
        self.constraints.get(&edge_id(a, b)).map(|h| h.oriented(a))
    }

    fn insert_by_angle(&mut self, v: VertexKey, n: VertexKey) {
        let origin = self.verts[v].point;
        let a = (self.verts[n].point - origin).angle();
        let idx = self.verts[v]
            .ring
            .partition_point(|&m| (self.verts[m].point - origin).angle() < a);
        self.verts[v].ring.insert(idx, n);
    }

    fn connect(&mut self, a: VertexKey, b: VertexKey) {
        if !self.verts[a].ring.contains(&b) {
            self.insert_by_angle(a, b);
            self.insert_by_angle(b, a);
        }
    }

    /// Triangulates the hole left on one side of the new edge `p`–`r`.
    ///
    /// `chain` runs from `p` to `r` along the old ring of the removed
    /// vertex. Clips ears, adding an unconstrained diagonal per ear, until
    /// only a triangle remains.
    fn fill_chain(&mut self, chain: &mut Vec<VertexKey>) {
        // Orient the polygon counter-clockwise so convexity tests agree.
        let area = self.signed_area(chain);
        if area < F::zero() {
            chain.reverse();
        }

        while chain.len() > 3 {
            let mut clipped = false;
            for i in 0..chain.len() {
                let prev = chain[(i + chain.len() - 1) % chain.len()];
                let cur = chain[i];
                let next = chain[(i + 1) % chain.len()];
                let (a, b, c) = (
                    self.verts[prev].point,
                    self.verts[cur].point,
                    self.verts[next].point,
                );
                if orient2d(a, b, c, F::zero()) != Orientation::CounterClockwise {
                    continue;
                }
                let blocked = chain.iter().any(|&v| {
                    v != prev && v != cur && v != next && {
                        point_in_triangle(self.verts[v].point, a, b, c, F::zero())
                    }
                });
                if blocked {
                    continue;
                }
                self.connect(prev, next);
                chain.remove(i);
                clipped = true;
                break;
            }
            if !clipped {
                // No ear in a degenerate chain; leave the hole untiled.
                break;
            }
        }
    }

    fn signed_area(&self, chain: &[VertexKey]) -> F {
        let mut twice = F::zero();
        for i in 0..chain.len() {
            let a = self.verts[chain[i]].point;
            let b = self.verts[chain[(i + 1) % chain.len()]].point;
            twice = twice + (a.x * b.y - b.x * a.y);
        }
        twice
    }
}

impl<F: Float> PlanarGraph<F> for RingMesh<F> {
    fn vertex_count(&self) -> usize {
        self.verts.len()
    }

    fn vertex_keys(&self) -> Vec<VertexKey> {
        self.verts.keys().collect()
    }

    fn contains(&self, v: VertexKey) -> bool {
        self.verts.contains_key(v)
    }

    fn point(&self, v: VertexKey) -> Point2<F> {
        self.verts[v].point
    }

    fn is_locked(&self, v: VertexKey) -> bool {
        self.verts[v].locked
    }

    fn constrained_neighbors(&self, v: VertexKey) -> Vec<VertexKey> {
        self.verts[v]
            .ring
            .iter()
            .copied()
            .filter(|&n| self.constraints.contains_key(&edge_id(v, n)))
            .collect()
    }

    fn all_neighbors(&self, v: VertexKey) -> Vec<VertexKey> {
        self.verts[v].ring.clone()
    }

    fn are_connected(&self, a: VertexKey, b: VertexKey) -> bool {
        // Any triangulation edge counts: merging a chain onto an existing
        // adjacency would collapse the face between them.
        self.verts[a].ring.contains(&b)
    }

    fn history(&self, from: VertexKey, to: VertexKey) -> Vec<Point2<F>> {
        self.constraints
            .get(&edge_id(from, to))
            .expect("no constrained edge between vertices")
            .oriented(from)
    }

    fn remove_and_reconnect(&mut self, q: VertexKey, p: VertexKey, r: VertexKey) {
        debug_assert_eq!(
            {
                let mut cn = self.constrained_neighbors(q);
                cn.sort();
                cn
            },
            {
                let mut pr = vec![p, r];
                pr.sort();
                pr
            },
            "merged vertex must have exactly the two given constrained neighbors"
        );
        debug_assert!(!self.are_connected(p, r), "merge would duplicate an edge");

        let pq = self
            .constraints
            .remove(&edge_id(p, q))
            .expect("missing edge history");
        let qr = self
            .constraints
            .remove(&edge_id(q, r))
            .expect("missing edge history");
        self.constraints
            .insert(edge_id(p, r), EdgeHistory::splice(&pq, &qr, p, q, r));

        let ring_q = self.verts[q].ring.clone();
        for &n in &ring_q {
            self.verts[n].ring.retain(|&m| m != q);
        }
        self.verts.remove(q);

        self.connect(p, r);

        // Split q's old ring at p and r; each half bounds a hole on one side
        // of the new edge.
        let ip = ring_q.iter().position(|&v| v == p).expect("p not in ring");
        let ir = ring_q.iter().position(|&v| v == r).expect("r not in ring");
        let mut side_a: Vec<VertexKey> = Vec::new();
        let mut i = ip;
        loop {
            side_a.push(ring_q[i]);
            if i == ir {
                break;
            }
            i = (i + 1) % ring_q.len();
        }
        let mut side_b: Vec<VertexKey> = Vec::new();
        let mut i = ir;
        loop {
            side_b.push(ring_q[i]);
            if i == ip {
                break;
            }
            i = (i + 1) % ring_q.len();
        }

        for side in [&mut side_a, &mut side_b] {
            if side.len() > 3 {
                self.fill_chain(side);
            }
        }
    }
}

impl<F: Float> NeighborRing<F> for RingMesh<F> {
    fn ring(&self, v: VertexKey) -> Vec<VertexKey> {
        self.verts[v].ring.clone()
    }
}
