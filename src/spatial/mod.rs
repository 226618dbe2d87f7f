//! Spatial indexing for point-in-region queries.

mod grid;

pub use grid::PointGrid;
