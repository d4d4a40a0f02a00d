//! Per-frame pose geometry: is the thumb tip touching the little-finger tip?
//!
//! Everything here is pure. Degenerate input (flat bounding box, zero-length
//! vectors, missing points) resolves to a "not touching" result instead of an error.

use crate::types::{BoundingBox, HandDetection, Point2D};

/// Angle reported when either reference vector has zero length.
pub const DEGENERATE_ANGLE_DEG: f32 = 180.0;

/// Detector indices bound to the three semantic roles the pose test needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LandmarkRoles {
    pub thumb_tip: usize,
    pub little_tip: usize,
    pub little_base: usize,
}

impl Default for LandmarkRoles {
    fn default() -> Self {
        Self {
            thumb_tip: 4,
            little_tip: 20,
            little_base: 17,
        }
    }
}

/// The three tracked points of one frame, looked up by role.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedPoints {
    pub thumb_tip: Point2D,
    pub little_tip: Point2D,
    pub little_base: Point2D,
}

impl LandmarkRoles {
    pub fn resolve(&self, hand: &HandDetection) -> Option<TrackedPoints> {
        Some(TrackedPoints {
            thumb_tip: hand.point(self.thumb_tip)?,
            little_tip: hand.point(self.little_tip)?,
            little_base: hand.point(self.little_base)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryResult {
    /// Tip-to-tip distance over bbox height; +inf when the box is flat.
    pub normalized_distance: f32,
    /// Angle at the little-finger base between the little finger and the thumb, in [0, 180].
    pub angle_degrees: f32,
}

impl GeometryResult {
    pub const NOT_TOUCHING: GeometryResult = GeometryResult {
        normalized_distance: f32::INFINITY,
        angle_degrees: DEGENERATE_ANGLE_DEG,
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseThresholds {
    pub distance: f32,
    pub angle_degrees: f32,
}

impl Default for PoseThresholds {
    fn default() -> Self {
        Self {
            distance: 0.25,
            angle_degrees: 60.0,
        }
    }
}

impl PoseThresholds {
    pub fn is_touching(&self, result: &GeometryResult) -> bool {
        result.normalized_distance < self.distance && result.angle_degrees < self.angle_degrees
    }
}

/// Evaluates the pose for one detected hand.
pub fn evaluate(hand: &HandDetection, roles: &LandmarkRoles) -> GeometryResult {
    match roles.resolve(hand) {
        Some(points) => evaluate_points(&points, &hand.bbox),
        None => GeometryResult::NOT_TOUCHING,
    }
}

pub fn evaluate_points(points: &TrackedPoints, bbox: &BoundingBox) -> GeometryResult {
    let raw_distance = points.thumb_tip.distance(&points.little_tip);

    let scale = bbox.height();
    // `!(scale > 0)` also catches a NaN height
    let normalized_distance = if !(scale > 0.0) {
        f32::INFINITY
    } else {
        raw_distance / scale
    };

    let angle_degrees = angle_at(points.little_base, points.little_tip, points.thumb_tip);

    GeometryResult {
        normalized_distance,
        angle_degrees,
    }
}

/// Angle at `origin` between the rays towards `a` and `b`, in degrees.
pub fn angle_at(origin: Point2D, a: Point2D, b: Point2D) -> f32 {
    let (ax, ay) = (a.x - origin.x, a.y - origin.y);
    let (bx, by) = (b.x - origin.x, b.y - origin.y);

    let mag_a = ax.hypot(ay);
    let mag_b = bx.hypot(by);
    let usable = |m: f32| m > 0.0 && m.is_finite();
    if !usable(mag_a) || !usable(mag_b) {
        return DEGENERATE_ANGLE_DEG;
    }

    // Unit vectors first: products of raw pixel offsets can under- or overflow in f32.
    let (ux, uy) = (ax / mag_a, ay / mag_a);
    let (vx, vy) = (bx / mag_b, by / mag_b);
    let dot = ux * vx + uy * vy;
    let cross = ux * vy - uy * vx;

    cross.atan2(dot).abs().to_degrees().clamp(0.0, DEGENERATE_ANGLE_DEG)
}
