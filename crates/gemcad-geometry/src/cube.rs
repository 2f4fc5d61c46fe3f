//! The rough seed solid that cutting planes carve down.

use gemcad_math::Point3;
use gemcad_mesh::Polygon;

/// Half edge length of the seed cube. Large enough to enclose any
/// practical design; every cut lands strictly inside it.
pub const SEED_HALF_EXTENT: f64 = 10.0;

/// The six quad faces of the axis-aligned seed cube, in left, front,
/// right, back, top, bottom order. Each face's vertex winding makes its
/// natural normal point outward.
pub fn seed_cube() -> Vec<Polygon> {
    let l = SEED_HALF_EXTENT;
    vec![
        // Left, x = -l
        face([(-l, l, l), (-l, l, -l), (-l, -l, -l), (-l, -l, l)]),
        // Front, z = l
        face([(l, l, l), (-l, l, l), (-l, -l, l), (l, -l, l)]),
        // Right, x = l
        face([(l, -l, -l), (l, l, -l), (l, l, l), (l, -l, l)]),
        // Back, z = -l
        face([(-l, -l, -l), (-l, l, -l), (l, l, -l), (l, -l, -l)]),
        // Top, y = l
        face([(l, l, -l), (-l, l, -l), (-l, l, l), (l, l, l)]),
        // Bottom, y = -l
        face([(-l, -l, l), (-l, -l, -l), (l, -l, -l), (l, -l, l)]),
    ]
}

fn face(corners: [(f64, f64, f64); 4]) -> Polygon {
    let points: Vec<Point3> = corners
        .iter()
        .map(|&(x, y, z)| Point3::new(x, y, z))
        .collect();
    Polygon::from_points(&points)
}
