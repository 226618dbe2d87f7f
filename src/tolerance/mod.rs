//! Epsilon-aware geometric predicates.
//!
//! All functions in this module take explicit tolerance parameters.
//! No hidden epsilons are used. The decimation engine passes `eps = 0`
//! everywhere, turning every test into a strict floating-point sign test.

mod predicates;

pub use predicates::{
    orient2d, point_in_triangle, point_on_segment, segments_cross, Orientation,
};
