//! Point type for the 2-D drawing plane.

use serde::{Deserialize, Serialize};

/// A point in the drawing plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Create the origin point
    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// The point reached by travelling `radius` from `self` at `heading`.
    pub fn step_along(&self, heading: f64, radius: f64) -> Point {
        Point::new(
            self.x + radius * heading.cos(),
            self.y + radius * heading.sin(),
        )
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::Point;

    #[test]
    fn distance_is_euclidean() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(4.0, 6.0);
        assert!((a.distance_to(b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn step_along_recovers_target() {
        let from = Point::new(-2.0, 3.5);
        let to = Point::new(1.25, -0.75);
        let heading = (to.y - from.y).atan2(to.x - from.x);
        let stepped = from.step_along(heading, from.distance_to(to));
        assert!((stepped.x - to.x).abs() < 1e-12);
        assert!((stepped.y - to.y).abs() < 1e-12);
    }
}
