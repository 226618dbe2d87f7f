//! Shape-point rules and the original-graph ambiguity guard.
//!
//! A vertex is removable only if it is an unlocked shape point, and only if
//! merging its two edges cannot conflate parallel paths between junctions.
//! The second question is asked of the graph as it was before any removal,
//! so the answer cannot drift as the run proceeds.

use crate::graph::{PlanarGraph, VertexKey};
use num_traits::Float;
use slotmap::SecondaryMap;

/// The two constrained neighbors of `q`, if `q` is an unlocked shape point.
///
/// Returns `None` when `q` is locked or its constrained degree is not
/// exactly two. Unconstrained triangulation edges do not count toward the
/// degree.
pub fn chain_neighbors<F, G>(graph: &G, q: VertexKey) -> Option<(VertexKey, VertexKey)>
where
    F: Float,
    G: PlanarGraph<F> + ?Sized,
{
    if graph.is_locked(q) {
        return None;
    }
    match graph.constrained_neighbors(q).as_slice() {
        &[p, r] if p != r => Some((p, r)),
        _ => None,
    }
}

/// Constrained adjacency of the graph as it stood before decimation began.
///
/// Vertex keys are generation-tagged, so a surviving vertex indexes its own
/// original record directly; no id translation is needed.
#[derive(Debug, Clone)]
pub struct OriginSnapshot {
    adjacency: SecondaryMap<VertexKey, Vec<VertexKey>>,
}

impl OriginSnapshot {
    /// Records the constrained adjacency of every live vertex.
    pub fn capture<F, G>(graph: &G) -> Self
    where
        F: Float,
        G: PlanarGraph<F> + ?Sized,
    {
        let mut adjacency = SecondaryMap::new();
        for v in graph.vertex_keys() {
            adjacency.insert(v, graph.constrained_neighbors(v));
        }
        Self { adjacency }
    }

    /// Constrained degree of `v` in the original graph.
    pub fn degree(&self, v: VertexKey) -> usize {
        self.adjacency.get(v).map_or(0, Vec::len)
    }

    /// Counts original shape-point chains leading from `a` to `b`, walking
    /// each constrained spoke of `a` through degree-2 vertices.
    ///
    /// Counting stops once it reaches `cap`; callers only ever need to know
    /// whether more than one path exists.
    pub fn distinct_paths(&self, a: VertexKey, b: VertexKey, cap: usize) -> usize {
        let spokes = match self.adjacency.get(a) {
            Some(s) => s,
            None => return 0,
        };
        let mut count = 0;
        for &spoke in spokes {
            let mut prev = a;
            let mut cur = spoke;
            while cur != b && cur != a && self.degree(cur) == 2 {
                let next = self.adjacency[cur]
                    .iter()
                    .copied()
                    .find(|&n| n != prev)
                    .expect("degree-2 vertex with one neighbor");
                prev = cur;
                cur = next;
            }
            if cur == b {
                count += 1;
                if count >= cap {
                    return count;
                }
            }
        }
        count
    }

    /// Whether merging around `q` (current chain neighbors `p`, `r`) keeps
    /// path multiplicity unambiguous.
    ///
    /// The merge is refused only when both neighbors were junctions in the
    /// original graph and more than one shape-point chain originally ran
    /// between them.
    pub fn merge_is_unambiguous(&self, q: VertexKey, p: VertexKey, r: VertexKey) -> bool {
        debug_assert_eq!(self.degree(q), 2, "candidate was not an original shape point");
        if self.degree(p) > 2 && self.degree(r) > 2 {
            self.distinct_paths(p, r, 2) <= 1
        } else {
            true
        }
    }
}
