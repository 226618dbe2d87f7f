//! Orientation and incidence predicates with explicit tolerance.

use crate::primitives::{Point2, Segment2};
use num_traits::Float;

/// Result of an orientation test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Points are counter-clockwise (positive area).
    CounterClockwise,
    /// Points are clockwise (negative area).
    Clockwise,
    /// Points are collinear (within tolerance).
    Collinear,
}

/// Computes the orientation of three points with tolerance.
///
/// Returns the orientation of the triangle formed by points `a`, `b`, `c`:
/// - `CounterClockwise` if `c` is to the left of the line from `a` to `b`
/// - `Clockwise` if `c` is to the right of the line from `a` to `b`
/// - `Collinear` if `c` is on the line (within `eps` tolerance)
///
/// The test is based on the signed area of the triangle. If the absolute
/// value of twice the signed area is less than `eps`, the points are
/// considered collinear. With `eps = 0` this is a strict sign test on the
/// cross product, which is what the decimation guards use.
#[inline]
pub fn orient2d<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>, eps: F) -> Orientation {
    // Cross product of (b - a) and (c - a): twice the signed area of abc.
    let cross = (b - a).cross(c - a);

    if cross > eps {
        Orientation::CounterClockwise
    } else if cross < -eps {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Checks if a point lies on a line segment within tolerance.
///
/// Returns `true` if the point `p` is within distance `eps` of the segment.
#[inline]
pub fn point_on_segment<F: Float>(p: Point2<F>, segment: Segment2<F>, eps: F) -> bool {
    segment.distance_squared_to_point(p) <= eps * eps
}

/// Checks whether a point lies inside or on the boundary of triangle `abc`.
///
/// The winding of `abc` does not matter. For a degenerate (collinear)
/// triangle every point on the supporting line tests as inside; callers
/// with possibly-degenerate triangles must special-case that themselves.
pub fn point_in_triangle<F: Float>(
    p: Point2<F>,
    a: Point2<F>,
    b: Point2<F>,
    c: Point2<F>,
    eps: F,
) -> bool {
    let o1 = orient2d(a, b, p, eps);
    let o2 = orient2d(b, c, p, eps);
    let o3 = orient2d(c, a, p, eps);

    let has_cw = [o1, o2, o3].contains(&Orientation::Clockwise);
    let has_ccw = [o1, o2, o3].contains(&Orientation::CounterClockwise);

    // Inside or on the boundary iff p is never on both sides.
    !(has_cw && has_ccw)
}

/// Tests whether two segments make contact anywhere other than a shared
/// endpoint.
///
/// Returns `true` for a proper crossing, for an endpoint of one segment
/// lying in the interior of the other, and for a collinear overlap of
/// positive length. Two segments that only touch endpoint-to-endpoint
/// return `false`; that is the one contact a planar graph allows.
pub fn segments_cross<F: Float>(s1: Segment2<F>, s2: Segment2<F>, eps: F) -> bool {
    use Orientation::{Clockwise, CounterClockwise};

    let o1 = orient2d(s1.start, s1.end, s2.start, eps);
    let o2 = orient2d(s1.start, s1.end, s2.end, eps);
    let o3 = orient2d(s2.start, s2.end, s1.start, eps);
    let o4 = orient2d(s2.start, s2.end, s1.end, eps);

    let straddles = |a: Orientation, b: Orientation| {
        (a == Clockwise && b == CounterClockwise) || (a == CounterClockwise && b == Clockwise)
    };

    // Proper crossing: each segment's endpoints straddle the other.
    if straddles(o1, o2) && straddles(o3, o4) {
        return true;
    }

    // Endpoint contact away from the other segment's endpoints. This also
    // catches collinear overlaps of positive length, since any such overlap
    // puts at least one endpoint in the other segment's interior.
    let eps_sq = eps * eps;
    let interior_touch = |p: Point2<F>, s: Segment2<F>| {
        point_on_segment(p, s, eps)
            && p.distance_squared(s.start) > eps_sq
            && p.distance_squared(s.end) > eps_sq
    };

    interior_touch(s2.start, s1)
        || interior_touch(s2.end, s1)
        || interior_touch(s1.start, s2)
        || interior_touch(s1.end, s2)
}
