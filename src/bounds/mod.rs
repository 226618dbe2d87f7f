//! Bounding volume computation.

mod aabb;
mod circle;

pub use aabb::Aabb2;
pub use circle::BoundingCircle;
