//! The greedy decimation scheduler.

use super::ambiguity::{chain_neighbors, OriginSnapshot};
use super::guard::TopologyGuard;
use super::ledger::merge_deviation;
use crate::graph::{PlanarGraph, VertexKey};
use num_traits::Float;
use priority_queue::PriorityQueue;
use std::cmp::Ordering;

/// How many removals between progress callbacks.
const PROGRESS_STRIDE: usize = 256;

/// Queue priority for a candidate vertex.
///
/// The queue pops its maximum, so the ordering is reversed: the smallest
/// error is the greatest priority, and among equal errors the earliest
/// admission wins. The sequence number makes every pop deterministic.
#[derive(Debug, Clone, Copy)]
struct CandidateCost<F> {
    error: F,
    seq: u64,
}

impl<F: Float> PartialEq for CandidateCost<F> {
    fn eq(&self, other: &Self) -> bool {
        self.error == other.error && self.seq == other.seq
    }
}

impl<F: Float> Eq for CandidateCost<F> {}

impl<F: Float> Ord for CandidateCost<F> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .error
            .partial_cmp(&self.error)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<F: Float> PartialOrd for CandidateCost<F> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The greedy decimation engine.
///
/// Generic over the substrate and its [`TopologyGuard`]; the convenience
/// wrappers [`simplify_subdivision`](super::simplify_subdivision) and
/// [`simplify_mesh`](super::simplify_mesh) pick the pairing for you.
///
/// Construction prices every current shape point and queues those whose
/// merge passes all guards; [`run`](Self::run) then pops candidates in
/// ascending error order, merges them, and re-prices the former neighbors
/// of each removed vertex plus any candidate the guard had refused because
/// of it. Queue entries stay exact under that discipline, so no global
/// rescan ever happens.
pub struct Decimator<'a, F, T> {
    guard: T,
    max_error: F,
    origin: OriginSnapshot,
    queue: PriorityQueue<VertexKey, CandidateCost<F>>,
    seq: u64,
    initial_candidates: usize,
    removed: usize,
    progress: Option<Box<dyn FnMut(usize, usize) + 'a>>,
}

impl<'a, F: Float, T> Decimator<'a, F, T> {
    /// Snapshots the graph's original adjacency and prices every vertex.
    pub fn new<G>(graph: &G, guard: T, max_error: F) -> Self
    where
        G: PlanarGraph<F>,
        T: TopologyGuard<F, G>,
    {
        let mut this = Self {
            guard,
            max_error,
            origin: OriginSnapshot::capture(graph),
            queue: PriorityQueue::new(),
            seq: 0,
            initial_candidates: 0,
            removed: 0,
            progress: None,
        };
        for v in graph.vertex_keys() {
            this.refresh(graph, v);
        }
        this.initial_candidates = this.queue.len();
        this
    }

    /// Installs a progress callback, called with `(removed, initial
    /// candidate count)` at a fixed removal stride and once at the end of a
    /// run.
    pub fn with_progress(mut self, callback: impl FnMut(usize, usize) + 'a) -> Self {
        self.progress = Some(Box::new(callback));
        self
    }

    /// Vertices removed so far.
    pub fn removed(&self) -> usize {
        self.removed
    }

    /// Runs decimation to completion and returns the number of vertices
    /// removed.
    ///
    /// `graph` must be the same graph this engine was constructed over.
    pub fn run<G>(&mut self, graph: &mut G) -> usize
    where
        G: PlanarGraph<F>,
        T: TopologyGuard<F, G>,
    {
        while let Some((q, _)) = self.queue.pop() {
            // Neighbor-scoped refresh keeps entries exact, so this is a
            // consistency re-read, not a re-validation.
            let (p, r) = chain_neighbors(graph, q).expect("queued vertex is not a shape point");
            debug_assert!(
                merge_deviation(graph, p, q, r) <= self.max_error,
                "queued merge no longer under the error bound"
            );

            let affected = graph.all_neighbors(q);
            // The guard also hands back any candidate it had refused
            // because of q; a squatter need not neighbor its victim.
            let unblocked = self.guard.before_removal(graph, q);
            graph.remove_and_reconnect(q, p, r);
            self.removed += 1;
            if self.removed % PROGRESS_STRIDE == 0 {
                self.report();
            }

            // Only a former neighbor of q, or a merge q itself was
            // blocking, can change candidacy.
            for v in affected.into_iter().chain(unblocked) {
                if graph.contains(v) {
                    self.refresh(graph, v);
                }
            }
        }
        self.report();
        self.removed
    }

    /// Re-prices one vertex: queued with its current error if its merge
    /// passes every check, dropped from the queue otherwise.
    fn refresh<G>(&mut self, graph: &G, v: VertexKey)
    where
        G: PlanarGraph<F>,
        T: TopologyGuard<F, G>,
    {
        match self.evaluate(graph, v) {
            Some(error) => {
                let cost = CandidateCost {
                    error,
                    seq: self.seq,
                };
                self.seq += 1;
                self.queue.push(v, cost);
            }
            None => {
                self.queue.remove(&v);
            }
        }
    }

    /// Full candidacy pipeline for one vertex, in guard order: shape-point
    /// rules, adjacency pre-check, ambiguity, error bound, topology.
    fn evaluate<G>(&mut self, graph: &G, q: VertexKey) -> Option<F>
    where
        G: PlanarGraph<F>,
        T: TopologyGuard<F, G>,
    {
        let (p, r) = chain_neighbors(graph, q)?;
        if graph.are_connected(p, r) {
            return None;
        }
        if !self.origin.merge_is_unambiguous(q, p, r) {
            return None;
        }
        let error = merge_deviation(graph, p, q, r);
        if !(error <= self.max_error) {
            return None;
        }
        if !self.guard.merge_is_safe(graph, q, p, r) {
            return None;
        }
        Some(error)
    }

    fn report(&mut self) {
        if let Some(callback) = &mut self.progress {
            callback(self.removed, self.initial_candidates);
        }
    }
}
