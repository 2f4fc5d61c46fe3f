#![warn(missing_docs)]

//! Polygon and mesh-container types for GemCad design reconstruction.
//!
//! [`Polygon`] is the clipper's working face: its vertex list grows and
//! shrinks as cutting planes trim it. [`Triangle`] and [`Quad`] fix their
//! arity at construction (a fixed-size vertex array, so there is nothing
//! to mutate structurally), and [`PolygonSet`] buckets faces by arity
//! under monotonically increasing identities for downstream consumers.
//!
//! All face types hold owned vertex values; no vertex is ever shared
//! between two faces.

use gemcad_math::Point3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::{Index, IndexMut};
use thiserror::Error;

/// Errors from arity-checked face conversions.
#[derive(Error, Debug)]
pub enum MeshError {
    /// A polygon had the wrong number of vertices for the target type.
    #[error("expected a {expected}-vertex polygon, got {actual} vertices")]
    ArityMismatch {
        /// Required vertex count.
        expected: usize,
        /// Vertex count actually present.
        actual: usize,
    },
}

/// A polygon vertex: world-space position plus shading normal.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OrientedVertex {
    /// Position.
    pub vertex: Point3,
    /// Shading normal (zero until a pipeline stage assigns one).
    pub normal: Point3,
}

impl OrientedVertex {
    /// Vertex at `point` with a zero normal.
    pub fn new(point: Point3) -> Self {
        Self {
            vertex: point,
            normal: Point3::origin(),
        }
    }
}

/// An arbitrary-arity face. Grows and shrinks freely during clipping.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polygon {
    /// Face normal.
    pub normal: Point3,
    /// Opaque identity tag (empty unless a pipeline stage assigns one).
    #[serde(default)]
    pub tag: String,
    vertices: Vec<OrientedVertex>,
}

impl Polygon {
    /// Empty polygon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Polygon over `points`, with zero vertex normals.
    pub fn from_points(points: &[Point3]) -> Self {
        Self {
            normal: Point3::origin(),
            tag: String::new(),
            vertices: points.iter().map(|p| OrientedVertex::new(*p)).collect(),
        }
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// The vertices as a slice.
    pub fn vertices(&self) -> &[OrientedVertex] {
        &self.vertices
    }

    /// The vertex positions, collected.
    pub fn points(&self) -> Vec<Point3> {
        self.vertices.iter().map(|v| v.vertex).collect()
    }

    /// Append a vertex.
    pub fn push(&mut self, vertex: OrientedVertex) {
        self.vertices.push(vertex);
    }

    /// Remove the vertex at `index`. Panics when out of range.
    pub fn remove_at(&mut self, index: usize) {
        self.vertices.remove(index);
    }

    /// Swap in a whole new vertex list.
    pub fn replace(&mut self, vertices: Vec<OrientedVertex>) {
        self.vertices = vertices;
    }

    /// Reverse the winding.
    pub fn reverse(&mut self) {
        self.vertices.reverse();
    }

    fn into_parts(self) -> (Point3, String, Vec<OrientedVertex>) {
        (self.normal, self.tag, self.vertices)
    }
}

impl Index<usize> for Polygon {
    type Output = OrientedVertex;

    fn index(&self, index: usize) -> &OrientedVertex {
        &self.vertices[index]
    }
}

impl IndexMut<usize> for Polygon {
    fn index_mut(&mut self, index: usize) -> &mut OrientedVertex {
        &mut self.vertices[index]
    }
}

/// A face with exactly three vertices. Arity is fixed at construction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Triangle {
    /// Face normal.
    pub normal: Point3,
    /// Opaque identity tag.
    #[serde(default)]
    pub tag: String,
    vertices: [OrientedVertex; 3],
}

impl Triangle {
    /// Triangle over three positions, with zero normals.
    pub fn from_points(p1: Point3, p2: Point3, p3: Point3) -> Self {
        Self {
            normal: Point3::origin(),
            tag: String::new(),
            vertices: [
                OrientedVertex::new(p1),
                OrientedVertex::new(p2),
                OrientedVertex::new(p3),
            ],
        }
    }

    /// The vertices.
    pub fn vertices(&self) -> &[OrientedVertex; 3] {
        &self.vertices
    }

    /// Mutable access to the vertices (positions and normals, never count).
    pub fn vertices_mut(&mut self) -> &mut [OrientedVertex; 3] {
        &mut self.vertices
    }

    /// Reverse the winding.
    pub fn reverse(&mut self) {
        self.vertices.reverse();
    }
}

impl TryFrom<Polygon> for Triangle {
    type Error = MeshError;

    fn try_from(polygon: Polygon) -> Result<Self, MeshError> {
        let (normal, tag, vertices) = polygon.into_parts();
        let vertices: [OrientedVertex; 3] =
            vertices
                .try_into()
                .map_err(|v: Vec<OrientedVertex>| MeshError::ArityMismatch {
                    expected: 3,
                    actual: v.len(),
                })?;
        Ok(Self {
            normal,
            tag,
            vertices,
        })
    }
}

impl From<Triangle> for Polygon {
    fn from(triangle: Triangle) -> Polygon {
        Polygon {
            normal: triangle.normal,
            tag: triangle.tag,
            vertices: triangle.vertices.to_vec(),
        }
    }
}

/// A face with exactly four vertices. Arity is fixed at construction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Quad {
    /// Face normal.
    pub normal: Point3,
    /// Opaque identity tag.
    #[serde(default)]
    pub tag: String,
    vertices: [OrientedVertex; 4],
}

impl Quad {
    /// Quad over four positions, with zero normals.
    pub fn from_points(p1: Point3, p2: Point3, p3: Point3, p4: Point3) -> Self {
        Self {
            normal: Point3::origin(),
            tag: String::new(),
            vertices: [
                OrientedVertex::new(p1),
                OrientedVertex::new(p2),
                OrientedVertex::new(p3),
                OrientedVertex::new(p4),
            ],
        }
    }

    /// The vertices.
    pub fn vertices(&self) -> &[OrientedVertex; 4] {
        &self.vertices
    }

    /// Mutable access to the vertices (positions and normals, never count).
    pub fn vertices_mut(&mut self) -> &mut [OrientedVertex; 4] {
        &mut self.vertices
    }

    /// Reverse the winding.
    pub fn reverse(&mut self) {
        self.vertices.reverse();
    }
}

impl TryFrom<Polygon> for Quad {
    type Error = MeshError;

    fn try_from(polygon: Polygon) -> Result<Self, MeshError> {
        let (normal, tag, vertices) = polygon.into_parts();
        let vertices: [OrientedVertex; 4] =
            vertices
                .try_into()
                .map_err(|v: Vec<OrientedVertex>| MeshError::ArityMismatch {
                    expected: 4,
                    actual: v.len(),
                })?;
        Ok(Self {
            normal,
            tag,
            vertices,
        })
    }
}

impl From<Quad> for Polygon {
    fn from(quad: Quad) -> Polygon {
        Polygon {
            normal: quad.normal,
            tag: quad.tag,
            vertices: quad.vertices.to_vec(),
        }
    }
}

/// A face of any arity, tagged by kind. [`PolygonSet`] stores these.
#[derive(Debug, Clone)]
pub enum Face {
    /// Three vertices.
    Triangle(Triangle),
    /// Four vertices.
    Quad(Quad),
    /// Any other arity.
    Polygon(Polygon),
}

impl From<Triangle> for Face {
    fn from(t: Triangle) -> Face {
        Face::Triangle(t)
    }
}

impl From<Quad> for Face {
    fn from(q: Quad) -> Face {
        Face::Quad(q)
    }
}

impl From<Polygon> for Face {
    fn from(polygon: Polygon) -> Face {
        let (normal, tag, vertices) = polygon.into_parts();
        match <[OrientedVertex; 3]>::try_from(vertices) {
            Ok(vertices) => Face::Triangle(Triangle {
                normal,
                tag,
                vertices,
            }),
            Err(vertices) => match <[OrientedVertex; 4]>::try_from(vertices) {
                Ok(vertices) => Face::Quad(Quad {
                    normal,
                    tag,
                    vertices,
                }),
                Err(vertices) => Face::Polygon(Polygon {
                    normal,
                    tag,
                    vertices,
                }),
            },
        }
    }
}

/// A borrowed face from a [`PolygonSet`] lookup.
#[derive(Debug, Clone, Copy)]
pub enum FaceRef<'a> {
    /// Three vertices.
    Triangle(&'a Triangle),
    /// Four vertices.
    Quad(&'a Quad),
    /// Any other arity.
    Polygon(&'a Polygon),
}

/// Mesh container partitioned by arity.
///
/// Every inserted face receives the next monotonically increasing `u64`
/// identity and lands in the bucket matching its vertex count (3 →
/// triangles, 4 → quads, anything else → general polygons). Identities
/// are only reused after [`clear`](PolygonSet::clear).
#[derive(Debug, Clone, Default)]
pub struct PolygonSet {
    triangles: HashMap<u64, Triangle>,
    quads: HashMap<u64, Quad>,
    polygons: HashMap<u64, Polygon>,
    last_id: u64,
}

impl PolygonSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a face, returning its assigned identity.
    pub fn add(&mut self, face: impl Into<Face>) -> u64 {
        self.last_id += 1;
        let id = self.last_id;
        match face.into() {
            Face::Triangle(t) => {
                self.triangles.insert(id, t);
            }
            Face::Quad(q) => {
                self.quads.insert(id, q);
            }
            Face::Polygon(p) => {
                self.polygons.insert(id, p);
            }
        }
        id
    }

    /// Insert every face of an iterator.
    pub fn add_all<F: Into<Face>>(&mut self, faces: impl IntoIterator<Item = F>) {
        for face in faces {
            self.add(face);
        }
    }

    /// Look up a face by identity, whichever bucket holds it.
    pub fn get(&self, id: u64) -> Option<FaceRef<'_>> {
        if let Some(t) = self.triangles.get(&id) {
            return Some(FaceRef::Triangle(t));
        }
        if let Some(q) = self.quads.get(&id) {
            return Some(FaceRef::Quad(q));
        }
        self.polygons.get(&id).map(FaceRef::Polygon)
    }

    /// Remove a face by identity. Returns whether anything was removed.
    pub fn remove(&mut self, id: u64) -> bool {
        self.triangles.remove(&id).is_some()
            || self.quads.remove(&id).is_some()
            || self.polygons.remove(&id).is_some()
    }

    /// The triangle bucket.
    pub fn triangles(&self) -> impl Iterator<Item = &Triangle> {
        self.triangles.values()
    }

    /// The quad bucket.
    pub fn quads(&self) -> impl Iterator<Item = &Quad> {
        self.quads.values()
    }

    /// The general-polygon bucket.
    pub fn polygons(&self) -> impl Iterator<Item = &Polygon> {
        self.polygons.values()
    }

    /// Total face count across buckets.
    pub fn total_count(&self) -> usize {
        self.triangles.len() + self.quads.len() + self.polygons.len()
    }

    /// Whether the set holds no faces.
    pub fn is_empty(&self) -> bool {
        self.total_count() == 0
    }

    /// Drop every face and restart identity assignment.
    pub fn clear(&mut self) {
        self.triangles.clear();
        self.quads.clear();
        self.polygons.clear();
        self.last_id = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(n: usize) -> Polygon {
        let points: Vec<Point3> = (0..n)
            .map(|i| {
                let a = i as f64 / n as f64 * std::f64::consts::TAU;
                Point3::new(a.cos(), a.sin(), 0.0)
            })
            .collect();
        Polygon::from_points(&points)
    }

    #[test]
    fn test_polygon_mutation() {
        let mut pg = ring(4);
        assert_eq!(pg.vertex_count(), 4);
        pg.push(OrientedVertex::new(Point3::new(5.0, 5.0, 0.0)));
        assert_eq!(pg.vertex_count(), 5);
        pg.remove_at(0);
        assert_eq!(pg.vertex_count(), 4);
        let first = pg[0].vertex;
        pg.reverse();
        assert_eq!(pg[3].vertex, first);
        pg.replace(vec![OrientedVertex::new(Point3::origin())]);
        assert_eq!(pg.vertex_count(), 1);
    }

    #[test]
    fn test_triangle_arity_is_fixed() {
        let tri = Triangle::from_points(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        assert_eq!(tri.vertices().len(), 3);
        // Wrong-arity conversions must fail
        let bad = Triangle::try_from(ring(5));
        assert!(matches!(
            bad,
            Err(MeshError::ArityMismatch {
                expected: 3,
                actual: 5
            })
        ));
        let ok = Triangle::try_from(ring(3));
        assert!(ok.is_ok());
    }

    #[test]
    fn test_quad_arity_is_fixed() {
        let quad = Quad::try_from(ring(4)).unwrap();
        assert_eq!(quad.vertices().len(), 4);
        assert!(matches!(
            Quad::try_from(ring(3)),
            Err(MeshError::ArityMismatch {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_triangle_reverse() {
        let mut tri = Triangle::from_points(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        tri.reverse();
        assert_eq!(tri.vertices()[0].vertex, Point3::new(0.0, 1.0, 0.0));
        assert_eq!(tri.vertices()[2].vertex, Point3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_set_partitions_by_arity() {
        let mut set = PolygonSet::new();
        let a = set.add(ring(3));
        let b = set.add(ring(4));
        let c = set.add(ring(6));
        assert_eq!((a, b, c), (1, 2, 3));
        assert_eq!(set.triangles().count(), 1);
        assert_eq!(set.quads().count(), 1);
        assert_eq!(set.polygons().count(), 1);
        assert_eq!(set.total_count(), 3);

        assert!(matches!(set.get(a), Some(FaceRef::Triangle(_))));
        assert!(matches!(set.get(b), Some(FaceRef::Quad(_))));
        assert!(matches!(set.get(c), Some(FaceRef::Polygon(_))));
        assert!(set.get(99).is_none());
    }

    #[test]
    fn test_set_ids_stay_monotonic_across_removal() {
        let mut set = PolygonSet::new();
        let a = set.add(ring(3));
        assert!(set.remove(a));
        assert!(!set.remove(a));
        let b = set.add(ring(4));
        assert_eq!(b, 2);
    }

    #[test]
    fn test_set_clear_restarts_ids() {
        let mut set = PolygonSet::new();
        set.add(ring(3));
        set.add(ring(4));
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.add(ring(5)), 1);
    }

    #[test]
    fn test_vertex_json_shape() {
        let v = OrientedVertex {
            vertex: Point3::new(1.0, 2.0, 3.0),
            normal: Point3::new(0.0, 0.0, 1.0),
        };
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["vertex"]["x"], 1.0);
        assert_eq!(json["normal"]["z"], 1.0);
    }
}
