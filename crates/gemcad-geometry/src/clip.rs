//! Half-space clipping of the working polygon soup.

use gemcad_math::{Point3, TOLERANCE};
use gemcad_mesh::{OrientedVertex, Polygon};
use log::debug;

use crate::order::reorder_convex;
use crate::plane::CutPlane;

/// Clip one polygon against a cutting plane, in place.
///
/// Walks the edge cycle collecting plane crossings (deduplicated by
/// tolerance), removes every vertex on the plane's positive side, inserts
/// the crossings that are not already present, and re-orders the ring when
/// it grew past a triangle. Returns the crossings for the caller to pool
/// into the plane's new cut face.
pub fn clip_polygon(polygon: &mut Polygon, plane: &CutPlane) -> Vec<Point3> {
    let normal = plane.normal;
    let mut crossings: Vec<Point3> = Vec::new();

    let count = polygon.vertex_count();
    for i in 0..count {
        let g0 = polygon[i].vertex;
        let g1 = polygon[(i + 1) % count].vertex;

        let den = normal.dot(g1 - g0);
        if den.abs() <= TOLERANCE {
            // Edge parallel to the plane.
            continue;
        }

        let mut delta = normal.dot(plane.point - g0) / den;
        if delta.abs() < TOLERANCE {
            delta = 0.0;
        }
        if (0.0..=1.0).contains(&delta) {
            let crossing = g0 + (g1 - g0) * delta;
            if !crossings.iter().any(|c| c.coincident(crossing)) {
                crossings.push(crossing);
            }
        }
    }

    for i in (0..polygon.vertex_count()).rev() {
        if normal.dot(polygon[i].vertex - plane.point) > 0.0 {
            polygon.remove_at(i);
        }
    }

    for crossing in &crossings {
        let present = polygon
            .vertices()
            .iter()
            .any(|v| v.vertex.coincident(*crossing));
        if !present {
            polygon.push(OrientedVertex::new(*crossing));
        }
    }

    if polygon.vertex_count() > 3 {
        reorder_convex(polygon);
    }

    crossings
}

/// Cut every polygon in the soup by one plane and append the cut face.
///
/// Crossing points from all polygons are pooled, deduplicated by
/// tolerance; when more than two distinct points remain they become a new
/// polygon carrying `tag` and the plane's unit normal, re-ordered into a
/// convex ring. Planes that merely graze the solid leave no face behind.
pub fn apply_cut(polygons: &mut Vec<Polygon>, plane: &CutPlane, tag: &str) {
    let mut pool: Vec<Point3> = Vec::new();
    for polygon in polygons.iter_mut() {
        if polygon.vertex_count() == 0 {
            continue;
        }
        for crossing in clip_polygon(polygon, plane) {
            if !pool.iter().any(|c| c.coincident(crossing)) {
                pool.push(crossing);
            }
        }
    }

    debug!("cut {tag}: {} distinct crossing points", pool.len());

    if pool.len() > 2 {
        let mut face = Polygon::from_points(&pool);
        face.normal = plane.unit_normal();
        face.tag = tag.to_string();
        reorder_convex(&mut face);
        polygons.push(face);
    }
}
