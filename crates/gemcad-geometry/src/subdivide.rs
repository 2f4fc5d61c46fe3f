//! Midpoint subdivision with location-averaged vertex normals.

use std::collections::HashMap;

use gemcad_math::{face_normal, project_along, Point3};
use gemcad_mesh::{Quad, Triangle};

use crate::triangulate::quads_to_triangles;

/// Refine triangles by `iterations` rounds of 4-way midpoint subdivision.
///
/// Each round replaces every triangle with four children built on its edge
/// midpoints: three corner triangles plus the central one. Children keep
/// the parent's tag. After each parent's batch of four, face normals are
/// recomputed from the vertex positions and vertex normals are averaged
/// per rounded location across the batch, which smooths shading over the
/// split face.
pub fn subdivide(triangles: Vec<Triangle>, iterations: u32) -> Vec<Triangle> {
    let mut result = triangles;
    for _ in 0..iterations {
        let parents = std::mem::take(&mut result);
        result.reserve(parents.len() * 4);
        for parent in parents {
            let (p1, p2, p3) = {
                let v = parent.vertices();
                (v[0].vertex, v[1].vertex, v[2].vertex)
            };
            let a = project_along(p1, p2, p1.distance(p2) / 2.0);
            let b = project_along(p2, p3, p2.distance(p3) / 2.0);
            let c = project_along(p3, p1, p3.distance(p1) / 2.0);

            let mut batch = [
                Triangle::from_points(p1, a, c),
                Triangle::from_points(a, p2, b),
                Triangle::from_points(c, b, p3),
                Triangle::from_points(a, b, c),
            ];
            for child in &mut batch {
                child.tag = parent.tag.clone();
            }
            compute_face_normals(&mut batch);
            average_vertex_normals(&mut batch);
            result.extend(batch);
        }
    }
    result
}

/// Subdivide quads by splitting each into two triangles first.
pub fn subdivide_quads(quads: &[Quad], iterations: u32) -> Vec<Triangle> {
    subdivide(quads_to_triangles(quads), iterations)
}

fn compute_face_normals(triangles: &mut [Triangle]) {
    for triangle in triangles.iter_mut() {
        let (p1, p2, p3) = {
            let v = triangle.vertices();
            (v[0].vertex, v[1].vertex, v[2].vertex)
        };
        triangle.normal = face_normal(p1, p2, p3);
    }
}

/// Average face normals over every vertex location within `triangles`.
///
/// Location identity is the printed coordinate form at 4 decimal places,
/// so positions within rounding distance share one shading normal.
fn average_vertex_normals(triangles: &mut [Triangle]) {
    let mut groups: HashMap<String, Vec<(usize, usize)>> = HashMap::new();
    for (t, triangle) in triangles.iter().enumerate() {
        for (v, vertex) in triangle.vertices().iter().enumerate() {
            groups
                .entry(location_key(vertex.vertex))
                .or_default()
                .push((t, v));
        }
    }

    for members in groups.values() {
        let mut sum = Point3::origin();
        for &(t, _) in members {
            sum = sum + triangles[t].normal;
        }
        let normal = (sum / members.len() as f64).normalized();
        for &(t, v) in members {
            triangles[t].vertices_mut()[v].normal = normal;
        }
    }
}

fn location_key(p: Point3) -> String {
    format!("{:.4},{:.4},{:.4}", p.x, p.y, p.z)
}
