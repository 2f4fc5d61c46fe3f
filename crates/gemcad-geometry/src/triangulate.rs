//! Fan triangulation with outward-winding repair.

use gemcad_math::{face_normal, Point3};
use gemcad_mesh::{Polygon, Quad, Triangle};

/// Fan-triangulate a convex ring into `n - 2` triangles anchored at the
/// first vertex. Rings with fewer than 3 vertices emit nothing.
///
/// The ring's winding is not trusted; every fan triangle goes through
/// [`oriented_triangle`] and the polygon's tag is carried onto each
/// result.
pub fn fan_triangulate(polygon: &Polygon) -> Vec<Triangle> {
    let points = polygon.points();
    if points.len() < 3 {
        return Vec::new();
    }

    let mut triangles = Vec::with_capacity(points.len() - 2);
    for j in 1..points.len() - 1 {
        let mut triangle = oriented_triangle(points[0], points[j], points[j + 1]);
        triangle.tag = polygon.tag.clone();
        triangles.push(triangle);
    }
    triangles
}

/// Build one triangle with the outward winding of its two candidates.
///
/// Both windings are evaluated and the one whose unit normal, anchored at
/// the first vertex, ends farther from the origin wins; that normal is
/// written to the face and all three vertices. Works for any solid that
/// encloses the origin, which the clipped seed cube always does.
pub fn oriented_triangle(a: Point3, b: Point3, c: Point3) -> Triangle {
    let forward = face_normal(a, b, c);
    let forward_reach = (forward + a).length();
    let reversed = face_normal(c, b, a);
    let reversed_reach = (reversed + a).length();

    let mut triangle = Triangle::from_points(a, b, c);
    let normal = if reversed_reach.abs() > forward_reach.abs() {
        triangle.reverse();
        reversed
    } else {
        forward
    };
    triangle.normal = normal;
    for vertex in triangle.vertices_mut() {
        vertex.normal = normal;
    }
    triangle
}

/// Split quads into triangle pairs (1-2-3 and 1-3-4), keeping winding.
pub fn quads_to_triangles(quads: &[Quad]) -> Vec<Triangle> {
    let mut triangles = Vec::with_capacity(quads.len() * 2);
    for quad in quads {
        let v = quad.vertices();
        let mut first = Triangle::from_points(v[0].vertex, v[1].vertex, v[2].vertex);
        let mut second = Triangle::from_points(v[0].vertex, v[2].vertex, v[3].vertex);
        first.normal = quad.normal;
        second.normal = quad.normal;
        first.tag = quad.tag.clone();
        second.tag = quad.tag.clone();
        triangles.push(first);
        triangles.push(second);
    }
    triangles
}
