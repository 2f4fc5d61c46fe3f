//! Inverse facet math: recovering tier parameters from decoded geometry.
//!
//! The binary format stores facet normals and boundary points but not the
//! angle/distance/index numbers a faceting machine needs, so those are
//! reconstructed from the geometry.

use gemcad_math::{angle_2d, angle_between_connected, face_normal, ray_plane_intersection, Point3};

use crate::plane::IndexGear;

/// Recover a tier's signed cut angle in degrees from a facet normal.
///
/// The connected-vector spread between the normal, the origin, and the
/// normal's XY-plane projection is `90 + |angle|`; the z component's sign
/// restores the pavilion side. Vertical (and degenerate) normals are flat
/// table cuts at angle 0.
pub fn tier_angle_from_normal(normal: Point3) -> f64 {
    let flat = Point3::new(normal.x, normal.y, 0.0);
    let spread = angle_between_connected(normal, Point3::origin(), flat);
    if spread < 0.0 {
        return 0.0;
    }
    let magnitude = spread - 90.0;
    if normal.z < 0.0 {
        -magnitude
    } else {
        magnitude
    }
}

/// Recover a tier's cut distance from a facet's normal and boundary.
///
/// Casts a ray from the origin along the normal against the plane of the
/// facet's first boundary triangle; the distance is how far from the
/// origin it lands. Facets without 3 boundary points, or whose triangle
/// is degenerate, yield 0.
pub fn tier_distance_from_facet(normal: Point3, boundary: &[Point3]) -> f64 {
    if boundary.len() < 3 {
        return 0.0;
    }
    let plane_normal = face_normal(boundary[0], boundary[1], boundary[2]);
    match ray_plane_intersection(Point3::origin(), normal, boundary[0], plane_normal) {
        Some(hit) => hit.length(),
        None => 0.0,
    }
}

/// Recover a facet's index number from its normal's azimuth.
///
/// Normals below the girdle plane are un-folded (XY components negated)
/// before taking the bearing; the gear wraps the result into
/// `[0, teeth)`. Vertical normals have no azimuth and come back as the
/// wrapped gear offset alone.
pub fn facet_index_from_normal(gear: IndexGear, normal: Point3) -> f64 {
    let (x, y) = if normal.z < 0.0 {
        (-normal.x, -normal.y)
    } else {
        (normal.x, normal.y)
    };
    let azimuth = angle_2d(Point3::origin(), Point3::new(x, y, 0.0));
    gear.index_at(azimuth)
}
