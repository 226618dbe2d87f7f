//! mapthin - Topology-safe decimation of planar graphs
//!
//! Coverage maps and constrained meshes carry far more shape points than
//! their geometry deserves. This library removes them incrementally,
//! cheapest first, with the cumulative error of every merge priced against
//! the full history of absorbed points, while preserving topology exactly:
//! junctions survive in place, path multiplicity between junctions is
//! unchanged, and no new edge crossings appear.

pub mod bounds;
pub mod decimate;
pub mod error;
pub mod graph;
pub mod primitives;
pub mod spatial;
pub mod tolerance;

pub use bounds::{Aabb2, BoundingCircle};
pub use decimate::{
    simplify_mesh, simplify_mesh_with_progress, simplify_subdivision,
    simplify_subdivision_with_progress, Decimator, RingGuard, SquatterGuard, TopologyGuard,
};
pub use error::GraphError;
pub use graph::{EdgeHistory, NeighborRing, PlanarGraph, RingMesh, Subdivision, VertexKey};
pub use primitives::{Point2, Segment2, Vec2};
pub use spatial::PointGrid;
pub use tolerance::{orient2d, point_in_triangle, point_on_segment, segments_cross, Orientation};
