//! Court geometry helpers
//!
//! Pure functions over court coordinates. The court origin is the top-left
//! corner of the rendered court and coordinates grow right and down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Offset factor applied perpendicular to a segment to place the control
/// point of a curved connector.
pub const CURVE_SAG: f32 = 0.5;

/// Number of polyline segments used to approximate a quadratic curve
const CURVE_SAMPLES: usize = 24;

/// Size of the court as currently rendered
///
/// This is a runtime value reported by the rendering surface, not a constant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Check whether a point lies inside the bounds (edges included)
    pub fn contains(&self, point: Vec2) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        // Aspect of a full basketball court (94 x 50 ft)
        Self::new(940.0, 500.0)
    }
}

/// Clamp a point into `[0, width] x [0, height]`
pub fn clamp(point: Vec2, bounds: Bounds) -> Vec2 {
    Vec2::new(
        point.x.min(bounds.width).max(0.0),
        point.y.min(bounds.height).max(0.0),
    )
}

/// Euclidean distance between two points
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

/// Direction from `a` to `b` in degrees, in `(-180, 180]`
pub fn angle(a: Vec2, b: Vec2) -> f32 {
    let d = b - a;
    d.y.atan2(d.x).to_degrees()
}

pub fn midpoint(a: Vec2, b: Vec2) -> Vec2 {
    (a + b) * 0.5
}

/// Control point of the quadratic Bézier used by curved connectors.
///
/// The control point sits on the perpendicular bisector of the segment at a
/// distance of half the segment length, on the left of the travel direction
/// for `reverse == false` and on the right otherwise. A zero-length segment
/// yields the midpoint.
pub fn curve_control_point(start: Vec2, end: Vec2, reverse: bool) -> Vec2 {
    let d = end - start;
    let offset = if reverse {
        Vec2::new(d.y * CURVE_SAG, -d.x * CURVE_SAG)
    } else {
        Vec2::new(-d.y * CURVE_SAG, d.x * CURVE_SAG)
    };
    midpoint(start, end) + offset
}

/// Evaluate a quadratic Bézier at `t` in `[0, 1]`
pub fn quadratic_point(start: Vec2, control: Vec2, end: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    start * (u * u) + control * (2.0 * u * t) + end * (t * t)
}

/// Distance from a point to a line segment
pub fn distance_to_segment(point: Vec2, start: Vec2, end: Vec2) -> f32 {
    let line = end - start;
    let len_sq = line.length_squared();

    if len_sq < 1e-10 {
        return (point - start).length();
    }

    let t = ((point - start).dot(line) / len_sq).clamp(0.0, 1.0);
    let projection = start + line * t;
    (point - projection).length()
}

/// Approximate distance from a point to a quadratic Bézier
pub fn distance_to_quadratic(point: Vec2, start: Vec2, control: Vec2, end: Vec2) -> f32 {
    let mut closest = f32::INFINITY;
    let mut prev = start;
    for i in 1..=CURVE_SAMPLES {
        let t = i as f32 / CURVE_SAMPLES as f32;
        let next = quadratic_point(start, control, end, t);
        closest = closest.min(distance_to_segment(point, prev, next));
        prev = next;
    }
    closest
}
