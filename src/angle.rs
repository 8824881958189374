//! Heading and angular-difference helpers shared by both error models.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::point::Point;

/// Heading, in (-pi, pi], of the segment from `from` to `to`.
///
/// A zero-length segment has heading 0 by the `atan2(0, 0)` convention, so
/// coincident consecutive points read as a straight continuation.
#[inline]
pub fn heading_between(from: Point, to: Point) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Wraps a raw difference of two headings onto its shortest-path
/// representation. The result `w` satisfies |w| <= pi and w = diff (mod 2pi).
#[inline]
pub fn wrap_heading_diff(diff: f64) -> f64 {
    if diff.abs() > PI {
        -diff.signum() * (2.0 * PI - diff.abs())
    } else {
        diff
    }
}

/// Unit vector perpendicular to `heading` (rotated +pi/2), used to displace
/// a point sideways from its nominal position.
#[inline]
pub fn unit_normal(heading: f64) -> Point {
    Point::new((heading + FRAC_PI_2).cos(), (heading + FRAC_PI_2).sin())
}
