//! Convex re-ordering of clipped vertex rings.
//!
//! The clipper inserts intersection points in discovery order, which is
//! adjacency order only by accident. This module restores a convex cyclic
//! walk so triangulation sees a proper ring.

use gemcad_math::{angle_between, Point3};
use gemcad_mesh::{OrientedVertex, Polygon};

/// Re-order a polygon's coplanar vertices into a convex cycle.
///
/// Polygons with fewer than 4 vertices are left untouched. The first
/// vertex anchors the cycle. The vertex whose widest subtended angle
/// against the other candidates (seen from the anchor) is globally largest
/// becomes the second cycle vertex; every remaining vertex is then placed
/// by ranking its angle against the anchor-to-second baseline. Vertex
/// normals are reset by the rebuild.
///
/// O(n^3) over the vertex count, which never exceeds the cut's crossing
/// count in practice.
pub fn reorder_convex(polygon: &mut Polygon) {
    let points = polygon.points();
    let count = points.len();
    if count < 4 {
        return;
    }

    let p0 = points[0];
    let mut slots = vec![Point3::origin(); count];
    slots[0] = p0;

    // Angular fingerprint per candidate: the widest angle it spans against
    // any other candidate, with the anchor as the vertex.
    let mut fingerprints = vec![0.0f64; count];
    for i in 1..count {
        let mut widest = 0.0f64;
        for j in 1..count {
            if i != j {
                let angle = angle_between(points[i] - p0, points[j] - p0);
                if angle > widest {
                    widest = angle;
                }
            }
        }
        fingerprints[i] = widest;
    }

    let mut second = 0;
    let mut widest = 0.0f64;
    for (i, &fingerprint) in fingerprints.iter().enumerate().skip(1) {
        if fingerprint > widest {
            widest = fingerprint;
            second = i;
        }
    }

    let p1 = points[second];
    slots[1] = p1;

    // Baseline angles; the anchor gets a sentinel so it always ranks first.
    let mut baseline = vec![-1.0f64];
    for point in points.iter().skip(1) {
        baseline.push(angle_between(p1 - p0, *point - p0));
    }

    for i in 1..count {
        if i != second {
            let rank = baseline.iter().filter(|&&a| a < baseline[i]).count();
            slots[rank] = points[i];
        }
    }

    polygon.replace(slots.into_iter().map(OrientedVertex::new).collect());
}
