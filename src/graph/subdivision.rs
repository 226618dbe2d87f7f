//! General planar subdivision substrate.

use super::{edge_id, EdgeHistory, PlanarGraph, VertexKey};
use crate::error::GraphError;
use crate::primitives::Point2;
use num_traits::Float;
use slotmap::SlotMap;
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct SubVertex<F> {
    point: Point2<F>,
    locked: bool,
    neighbors: Vec<VertexKey>,
}

/// A planar coverage map: vertices joined by constrained edges.
///
/// Every edge of a subdivision is constrained (there is no triangulation
/// backbone), so this substrate pairs with the spatial-index topology
/// guard. Build one with [`add_vertex`](Self::add_vertex) /
/// [`add_edge`](Self::add_edge) or by inserting whole polylines, then hand
/// it to [`simplify_subdivision`](crate::decimate::simplify_subdivision).
///
/// # Example
///
/// ```
/// use mapthin::{PlanarGraph, Point2, Subdivision};
///
/// let mut map: Subdivision<f64> = Subdivision::new();
/// map.insert_polyline(&[
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(2.0, 0.0),
/// ])
/// .unwrap();
/// assert_eq!(map.vertex_count(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Subdivision<F> {
    verts: SlotMap<VertexKey, SubVertex<F>>,
    edges: HashMap<(VertexKey, VertexKey), EdgeHistory<F>>,
}

impl<F: Float> Subdivision<F> {
    /// Creates an empty subdivision.
    pub fn new() -> Self {
        Self {
            verts: SlotMap::with_key(),
            edges: HashMap::new(),
        }
    }

    /// Adds an isolated vertex and returns its key.
    pub fn add_vertex(&mut self, point: Point2<F>) -> VertexKey {
        self.verts.insert(SubVertex {
            point,
            locked: false,
            neighbors: Vec::new(),
        })
    }

    /// Finds a live vertex at exactly these coordinates, if any.
    pub fn vertex_at(&self, point: Point2<F>) -> Option<VertexKey> {
        self.verts
            .iter()
            .find(|(_, v)| v.point == point)
            .map(|(k, _)| k)
    }

    /// Adds a constrained edge between two existing vertices.
    pub fn add_edge(&mut self, a: VertexKey, b: VertexKey) -> Result<(), GraphError> {
        if a == b {
            return Err(GraphError::SelfLoop);
        }
        if !self.verts.contains_key(a) || !self.verts.contains_key(b) {
            return Err(GraphError::UnknownVertex);
        }
        if self.edges.contains_key(&edge_id(a, b)) {
            return Err(GraphError::DuplicateEdge);
        }

        let pa = self.verts[a].point;
        let pb = self.verts[b].point;
        self.edges
            .insert(edge_id(a, b), EdgeHistory::seed(a, pa, b, pb));
        self.verts[a].neighbors.push(b);
        self.verts[b].neighbors.push(a);
        Ok(())
    }

    /// Inserts an open polyline, reusing existing vertices at exactly
    /// matching coordinates, and returns the keys along the line.
    ///
    /// # Errors
    ///
    /// Fails on fewer than two points, consecutive coincident points, or a
    /// segment that duplicates an existing edge. A duplicate-edge failure
    /// is detected mid-insertion, so vertices and edges added before it
    /// remain in the subdivision.
    pub fn insert_polyline(&mut self, points: &[Point2<F>]) -> Result<Vec<VertexKey>, GraphError> {
        if points.len() < 2 {
            return Err(GraphError::DegeneratePolyline);
        }
        if points.windows(2).any(|w| w[0] == w[1]) {
            return Err(GraphError::CoincidentPoints);
        }

        let keys: Vec<VertexKey> = points
            .iter()
            .map(|&p| self.vertex_at(p).unwrap_or_else(|| self.add_vertex(p)))
            .collect();
        for w in keys.windows(2) {
            self.add_edge(w[0], w[1])?;
        }
        Ok(keys)
    }

    /// Inserts a closed polygon ring (the last point connects back to the
    /// first).
    ///
    /// # Errors
    ///
    /// As [`insert_polyline`](Self::insert_polyline), including its
    /// partial-insertion behavior on a duplicate edge.
    pub fn insert_polygon(&mut self, points: &[Point2<F>]) -> Result<Vec<VertexKey>, GraphError> {
        if points.len() < 3 {
            return Err(GraphError::DegeneratePolyline);
        }
        let keys = self.insert_polyline(points)?;
        self.add_edge(keys[keys.len() - 1], keys[0])?;
        Ok(keys)
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

    /// Degree of a vertex over constrained edges.
    pub fn degree(&self, v: VertexKey) -> usize {
        self.verts.get(v).map_or(0, |vert| vert.neighbors.len())
    }

    /// All constrained edges as unordered endpoint pairs.
    pub fn edges(&self) -> impl Iterator<Item = (VertexKey, VertexKey)> + '_ {
        self.edges.keys().copied()
    }

    /// The absorbed-point history of edge `a`–`b`, ordered from `a`,
    /// or `None` if no such edge exists.
    pub fn edge_history(&self, a: VertexKey, b: VertexKey) -> Option<Vec<Point2<F>>> {
        self.edges.get(&edge_id(a, b)).map(|h| h.oriented(a))
    }
}

impl<F: Float> PlanarGraph<F> for Subdivision<F> {
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
        self.verts[v].neighbors.clone()
    }

    fn all_neighbors(&self, v: VertexKey) -> Vec<VertexKey> {
        // Every subdivision edge is constrained.
        self.verts[v].neighbors.clone()
    }

    fn are_connected(&self, a: VertexKey, b: VertexKey) -> bool {
        self.edges.contains_key(&edge_id(a, b))
    }

    fn history(&self, from: VertexKey, to: VertexKey) -> Vec<Point2<F>> {
        self.edges
            .get(&edge_id(from, to))
            .expect("no constrained edge between vertices")
            .oriented(from)
    }

    fn remove_and_reconnect(&mut self, q: VertexKey, p: VertexKey, r: VertexKey) {
        debug_assert_eq!(self.degree(q), 2, "merged vertex must have degree 2");
        debug_assert!(self.are_connected(p, q) && self.are_connected(q, r));
        debug_assert!(!self.are_connected(p, r), "merge would duplicate an edge");

        let pq = self
            .edges
            .remove(&edge_id(p, q))
            .expect("missing edge history");
        let qr = self
            .edges
            .remove(&edge_id(q, r))
            .expect("missing edge history");
        self.edges
            .insert(edge_id(p, r), EdgeHistory::splice(&pq, &qr, p, q, r));

        self.verts.remove(q);
        for v in [p, r] {
            self.verts[v].neighbors.retain(|&n| n != q);
        }
        self.verts[p].neighbors.push(r);
        self.verts[r].neighbors.push(p);
    }
}
