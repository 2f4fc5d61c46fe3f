#![warn(missing_docs)]

//! Math primitives for GemCad design reconstruction.
//!
//! A single [`Point3`] value type serves as both position and free vector
//! (the decoders and the reconstruction engine pass the same triples in
//! both roles), plus the angle, rotation, and projection helpers the
//! faceting math is built from. Angles at this API are degrees unless a
//! function says otherwise.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Euclidean distance below which two points are treated as the same point.
pub const TOLERANCE: f64 = 1e-10;

/// A point (or free vector) in 3D space.
///
/// Serializes with named fields (`{"x":…,"y":…,"z":…}`) for the viewer-facing
/// document model.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Point3 {
    /// Create a new point.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The origin (0, 0, 0).
    pub fn origin() -> Self {
        Self::default()
    }

    /// Dot product.
    pub fn dot(self, other: Point3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product.
    pub fn cross(self, other: Point3) -> Point3 {
        Point3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Length of the vector from the origin to this point.
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Point3) -> f64 {
        (other - self).length()
    }

    /// Unit-length copy. A zero-length input is returned unchanged.
    pub fn normalized(self) -> Point3 {
        let len = self.length();
        if len > 0.0 {
            self / len
        } else {
            self
        }
    }

    /// Whether `other` lies within [`TOLERANCE`] of this point.
    pub fn coincident(self, other: Point3) -> bool {
        self.distance(other) < TOLERANCE
    }
}

impl Add for Point3 {
    type Output = Point3;

    fn add(self, rhs: Point3) -> Point3 {
        Point3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3 {
    type Output = Point3;

    fn sub(self, rhs: Point3) -> Point3 {
        Point3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Point3 {
    type Output = Point3;

    fn neg(self) -> Point3 {
        Point3::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Point3 {
    type Output = Point3;

    fn mul(self, rhs: f64) -> Point3 {
        Point3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f64> for Point3 {
    type Output = Point3;

    fn div(self, rhs: f64) -> Point3 {
        Point3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

/// Unit normal of the plane through three points, from the winding
/// `p1 → p2 → p3` (cross of the two edge vectors, normalized).
pub fn face_normal(p1: Point3, p2: Point3, p3: Point3) -> Point3 {
    (p1 - p2).cross(p2 - p3).normalized()
}

/// Angle between two vectors in degrees, in `[0, 180]`.
///
/// Chord-based asin form, numerically stable where the dot-product acos
/// form loses precision (vectors nearly parallel or anti-parallel).
pub fn angle_between(v1: Point3, v2: Point3) -> f64 {
    let v1 = v1.normalized();
    let v2 = v2.normalized();
    if v1.dot(v2) >= 0.0 {
        (2.0 * ((v1 - v2).length() / 2.0).asin()).to_degrees()
    } else {
        (PI - 2.0 * ((-v1 - v2).length() / 2.0).asin()).to_degrees()
    }
}

/// Angle in degrees between the segment `p1 → p2` and the segment
/// `p2 → p3`, in `[0, 180]`. Returns `-1.0` when either segment is
/// degenerate (callers treat that as a sentinel, not an angle).
pub fn angle_between_connected(p1: Point3, p2: Point3, p3: Point3) -> f64 {
    let a = p1.distance(p2);
    let b = p2.distance(p3);
    let dc = a * b;
    if dc.abs() < f64::EPSILON {
        return -1.0;
    }

    let nc = (p2 - p1).dot(p3 - p2);
    let ic = nc / dc;
    if ic <= -1.0 {
        return 180.0;
    }
    if ic >= 1.0 {
        return 0.0;
    }

    let s = (1.0 - ic * ic).sqrt();
    if s.abs() < f64::EPSILON {
        return -1.0;
    }
    (90.0 - (ic / s).atan().to_degrees()).abs()
}

/// Planar bearing of `p2` as seen from `p1`, in degrees in `(-180, 180]`.
/// Only the X and Y components participate.
pub fn angle_2d(p1: Point3, p2: Point3) -> f64 {
    (p2.y - p1.y).atan2(p2.x - p1.x).to_degrees()
}

/// Rotate `point` about `center` by `yaw`, `roll`, and `pitch` degrees.
///
/// The spins apply in that order: yaw in the XZ plane, roll in the XY
/// plane, pitch in the YZ plane. Angles pass through [`filter_angle`]
/// first.
pub fn rotate_point(point: Point3, yaw: f64, roll: f64, pitch: f64, center: Point3) -> Point3 {
    if yaw.abs() < f64::EPSILON && roll.abs() < f64::EPSILON && pitch.abs() < f64::EPSILON {
        return point;
    }

    let yaw = filter_angle(yaw).to_radians();
    let roll = filter_angle(roll).to_radians();
    let pitch = filter_angle(pitch).to_radians();

    let mut p = point - center;

    let (yaw_sin, yaw_cos) = yaw.sin_cos();
    let (roll_sin, roll_cos) = roll.sin_cos();
    let (pitch_sin, pitch_cos) = pitch.sin_cos();

    let work_x = yaw_cos * p.x - yaw_sin * p.z;
    let work_z = yaw_sin * p.x + yaw_cos * p.z;
    p.x = roll_cos * work_x + roll_sin * p.y;
    let work_y = roll_cos * p.y - roll_sin * work_x;
    p.z = pitch_cos * work_z - pitch_sin * work_y;
    p.y = pitch_sin * work_z + pitch_cos * work_y;

    p + center
}

/// Move from `p1` toward `p2` by `distance` (which may overshoot or be
/// negative). Degenerate inputs return `p1` unchanged.
pub fn project_along(p1: Point3, p2: Point3, distance: f64) -> Point3 {
    if distance.abs() < f64::EPSILON {
        return p1;
    }
    let len = p1.distance(p2);
    if len < f64::EPSILON {
        return p1;
    }
    p1 + (p2 - p1) * (distance / len)
}

/// Intersection of the ray `origin + t·direction` with the plane through
/// `plane_point` with normal `plane_normal`. `None` when the ray is
/// parallel to the plane.
pub fn ray_plane_intersection(
    origin: Point3,
    direction: Point3,
    plane_point: Point3,
    plane_normal: Point3,
) -> Option<Point3> {
    let denom = direction.dot(plane_normal);
    if denom.abs() < TOLERANCE {
        return None;
    }
    let t = (plane_point - origin).dot(plane_normal) / denom;
    Some(origin + direction * t)
}

/// Wrap an angle in degrees into `(-360, 360]`, snapping values within
/// 1e-8 of zero to exactly zero.
pub fn filter_angle(angle: f64) -> f64 {
    let mut result = angle;
    while result > 360.0 {
        result -= 360.0;
    }
    while result < -360.0 {
        result += 360.0;
    }
    if result.abs() < 1e-8 {
        result = 0.0;
    }
    result
}

/// Scrub a decoded scalar: non-finite values and magnitudes outside the
/// plain-decimal range (`|v| >= 1e15` or `0 < |v| < 1e-4`) become 0.0.
///
/// The binary format leaves garbage bytes in never-assigned slots; those
/// decode to absurd magnitudes and must not leak into geometry.
pub fn validate_scalar(v: f64) -> f64 {
    if !v.is_finite() {
        return 0.0;
    }
    if v != 0.0 && (v.abs() >= 1e15 || v.abs() < 1e-4) {
        return 0.0;
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_arithmetic() {
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Point3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Point3::new(3.0, 3.0, 3.0));
        assert_eq!(-a, Point3::new(-1.0, -2.0, -3.0));
        assert_eq!(a * 2.0, Point3::new(2.0, 4.0, 6.0));
        assert_eq!(b / 2.0, Point3::new(2.0, 2.5, 3.0));
        assert!((a.dot(b) - 32.0).abs() < 1e-12);
    }

    #[test]
    fn test_cross_product() {
        let x = Point3::new(1.0, 0.0, 0.0);
        let y = Point3::new(0.0, 1.0, 0.0);
        let z = x.cross(y);
        assert!(z.distance(Point3::new(0.0, 0.0, 1.0)) < 1e-12);
    }

    #[test]
    fn test_normalized_zero_guard() {
        let zero = Point3::origin();
        assert_eq!(zero.normalized(), zero);
        let v = Point3::new(3.0, 4.0, 0.0).normalized();
        assert!((v.length() - 1.0).abs() < 1e-12);
        assert!((v.x - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_coincident_uses_tolerance() {
        let a = Point3::new(1.0, 2.0, 3.0);
        let near = Point3::new(1.0 + 1e-11, 2.0, 3.0);
        let far = Point3::new(1.0 + 1e-9, 2.0, 3.0);
        assert!(a.coincident(near));
        assert!(!a.coincident(far));
    }

    #[test]
    fn test_face_normal_winding() {
        let n = face_normal(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        );
        assert!((n.length() - 1.0).abs() < 1e-12);
        // (p1-p2) x (p2-p3) = (-1,0,0) x (0,-1,0) = (0,0,1)
        assert!(n.distance(Point3::new(0.0, 0.0, 1.0)) < 1e-12);
    }

    #[test]
    fn test_angle_between() {
        let x = Point3::new(1.0, 0.0, 0.0);
        let y = Point3::new(0.0, 2.0, 0.0);
        assert!((angle_between(x, y) - 90.0).abs() < 1e-9);
        assert!(angle_between(x, x).abs() < 1e-9);
        assert!((angle_between(x, -x) - 180.0).abs() < 1e-9);
        // Near-parallel vectors stay stable
        let almost = Point3::new(1.0, 1e-9, 0.0);
        let small = angle_between(x, almost);
        assert!(small > 0.0 && small < 1e-6);
    }

    #[test]
    fn test_angle_between_connected() {
        let o = Point3::origin();
        let x1 = Point3::new(1.0, 0.0, 0.0);
        let straight = angle_between_connected(o, x1, Point3::new(2.0, 0.0, 0.0));
        assert!(straight.abs() < 1e-9);
        let right = angle_between_connected(o, x1, Point3::new(1.0, 1.0, 0.0));
        assert!((right - 90.0).abs() < 1e-9);
        let back = angle_between_connected(o, x1, o);
        assert!((back - 180.0).abs() < 1e-9);
        // Degenerate segment -> sentinel
        assert_eq!(angle_between_connected(o, o, x1), -1.0);
    }

    #[test]
    fn test_angle_2d_quadrants() {
        let o = Point3::origin();
        assert!(angle_2d(o, Point3::new(5.0, 0.0, 0.0)).abs() < 1e-12);
        assert!((angle_2d(o, Point3::new(0.0, 5.0, 0.0)) - 90.0).abs() < 1e-12);
        assert!((angle_2d(o, Point3::new(-5.0, 0.0, 0.0)) - 180.0).abs() < 1e-12);
        assert!((angle_2d(o, Point3::new(0.0, -5.0, 0.0)) + 90.0).abs() < 1e-12);
    }

    #[test]
    fn test_rotate_point_single_axes() {
        let o = Point3::origin();
        // Yaw spins XZ: +x heads to +z
        let p = rotate_point(Point3::new(1.0, 0.0, 0.0), 90.0, 0.0, 0.0, o);
        assert!(p.distance(Point3::new(0.0, 0.0, 1.0)) < 1e-12);
        // Roll spins XY: +x heads to -y
        let p = rotate_point(Point3::new(1.0, 0.0, 0.0), 0.0, 90.0, 0.0, o);
        assert!(p.distance(Point3::new(0.0, -1.0, 0.0)) < 1e-12);
        // Pitch spins YZ: +y heads to -z
        let p = rotate_point(Point3::new(0.0, 1.0, 0.0), 0.0, 0.0, 90.0, o);
        assert!(p.distance(Point3::new(0.0, 0.0, -1.0)) < 1e-12);
    }

    #[test]
    fn test_rotate_point_about_center() {
        let center = Point3::new(1.0, 0.0, 0.0);
        let p = rotate_point(Point3::new(2.0, 0.0, 0.0), 180.0, 0.0, 0.0, center);
        assert!(p.distance(Point3::new(0.0, 0.0, 0.0)) < 1e-12);
    }

    #[test]
    fn test_project_along() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(10.0, 0.0, 0.0);
        let mid = project_along(a, b, a.distance(b) / 2.0);
        assert!(mid.distance(Point3::new(5.0, 0.0, 0.0)) < 1e-12);
        // Zero distance and coincident endpoints fall back to the start
        assert_eq!(project_along(a, b, 0.0), a);
        assert_eq!(project_along(a, a, 5.0), a);
    }

    #[test]
    fn test_ray_plane_intersection() {
        let hit = ray_plane_intersection(
            Point3::origin(),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, 5.0),
            Point3::new(0.0, 0.0, 1.0),
        )
        .unwrap();
        assert!(hit.distance(Point3::new(0.0, 0.0, 5.0)) < 1e-12);

        // Slanted ray against the same plane
        let hit = ray_plane_intersection(
            Point3::origin(),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, 5.0),
            Point3::new(0.0, 0.0, 1.0),
        )
        .unwrap();
        assert!(hit.distance(Point3::new(5.0, 0.0, 5.0)) < 1e-12);

        let parallel = ray_plane_intersection(
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 5.0),
            Point3::new(0.0, 0.0, 1.0),
        );
        assert!(parallel.is_none());
    }

    #[test]
    fn test_filter_angle() {
        assert!((filter_angle(725.0) - 5.0).abs() < 1e-12);
        assert!((filter_angle(-725.0) + 5.0).abs() < 1e-12);
        // 360 sits inside the wrap range
        assert_eq!(filter_angle(360.0), 360.0);
        assert_eq!(filter_angle(1e-9), 0.0);
    }

    #[test]
    fn test_validate_scalar() {
        assert_eq!(validate_scalar(12.5), 12.5);
        assert_eq!(validate_scalar(0.0), 0.0);
        assert_eq!(validate_scalar(1e-4), 1e-4);
        assert_eq!(validate_scalar(9e-5), 0.0);
        assert_eq!(validate_scalar(1e16), 0.0);
        assert_eq!(validate_scalar(f64::NAN), 0.0);
        assert_eq!(validate_scalar(f64::INFINITY), 0.0);
    }
}
