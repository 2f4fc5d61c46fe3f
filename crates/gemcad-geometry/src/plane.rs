//! Cutting-plane generation from gear positions.

use gemcad_math::{project_along, rotate_point, Point3};

/// A cutting plane in point-normal form.
///
/// `normal` points away from the kept half-space and is not required to be
/// unit length; the clipper only uses it in ratios and sign tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutPlane {
    /// A point on the plane.
    pub point: Point3,
    /// Direction perpendicular to the plane, toward the removed side.
    pub normal: Point3,
}

impl CutPlane {
    /// Plane through `point` perpendicular to the origin-to-`point`
    /// direction. The classic faceting convention: the facet point doubles
    /// as the plane normal.
    pub fn from_facet_point(point: Point3) -> Self {
        Self {
            point,
            normal: point,
        }
    }

    /// The plane normal scaled to unit length.
    pub fn unit_normal(&self) -> Point3 {
        self.normal.normalized()
    }
}

/// The index gear: the rotational divisions used to position facets around
/// the gem's axis.
#[derive(Debug, Clone, Copy)]
pub struct IndexGear {
    /// Tooth count. Positive for any usable design.
    pub teeth: f64,
    /// Rotational offset of index zero, in teeth.
    pub location: f64,
}

impl IndexGear {
    /// Build gear settings from decoded metadata values.
    pub fn new(teeth: f64, location: f64) -> Self {
        Self { teeth, location }
    }

    /// Azimuth of facet index `index`, in radians.
    pub fn azimuth(&self, index: f64) -> f64 {
        (index + self.location) / self.teeth * std::f64::consts::TAU
    }

    /// Recover a facet index from a planar azimuth in degrees, wrapped
    /// into `[0, teeth)`.
    pub fn index_at(&self, azimuth_deg: f64) -> f64 {
        wrap_index(azimuth_deg / 360.0 * self.teeth - self.location, self.teeth)
    }
}

/// Least non-negative residue of `value` modulo `modulus`.
fn wrap_index(value: f64, modulus: f64) -> f64 {
    let r = value % modulus;
    if r < 0.0 {
        r + modulus
    } else {
        r
    }
}

/// Facet point for a tier cut, spherical form.
///
/// `angle_deg` is the signed cut angle from the gem's axis and `distance`
/// the cut depth from the origin. Negative angles fold the point below the
/// girdle plane while keeping z on the angle's side.
pub fn spherical_facet_point(gear: IndexGear, angle_deg: f64, distance: f64, index: f64) -> Point3 {
    let alpha = angle_deg.to_radians();
    let sg = if alpha < 0.0 { -1.0 } else { 1.0 };
    let beta = gear.azimuth(index);
    Point3::new(
        distance * alpha.sin() * beta.cos(),
        distance * alpha.sin() * beta.sin(),
        sg * distance * alpha.cos(),
    )
}

/// The same cutting plane derived by rotating the gear pole instead of by
/// the spherical closed form.
///
/// The pole `(0, 0, d)` is yawed down by `|angle|`, rolled to the facet's
/// azimuth, and mirrored through the origin for negative angles. The plane
/// normal is recovered from the point's 3-unit inward projection, so it
/// carries the outward direction at non-unit length. Agrees with
/// [`spherical_facet_point`] on the resulting plane.
pub fn rotational_cut_plane(gear: IndexGear, angle_deg: f64, distance: f64, index: f64) -> CutPlane {
    let beta_deg = gear.azimuth(index).to_degrees();
    let pole = Point3::new(0.0, 0.0, distance);
    let mut point = rotate_point(pole, -angle_deg.abs(), -beta_deg, 0.0, Point3::origin());
    if angle_deg < 0.0 {
        point = -point;
    }
    let inward = project_along(point, Point3::origin(), 3.0);
    CutPlane {
        point,
        normal: point - inward,
    }
}
