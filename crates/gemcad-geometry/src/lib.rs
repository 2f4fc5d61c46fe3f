#![warn(missing_docs)]

//! Geometric reconstruction engine for GemCad designs.
//!
//! Turns decoded tier definitions into a solid:
//! 1. Cutting planes are derived from gear positions (spherical or
//!    rotational form)
//! 2. The planes carve a rough seed cube, one convex cut face per facet
//! 3. Cut faces are fan-triangulated with outward-winding repair
//! 4. Triangles are midpoint-subdivided with location-averaged normals
//!
//! For the binary format, which stores only the resulting geometry, the
//! inverse functions recover each tier's angle, distance, and facet
//! indices from the stored normals and boundary points.

mod clip;
mod cube;
mod inverse;
mod order;
mod plane;
mod subdivide;
mod triangulate;

pub use clip::{apply_cut, clip_polygon};
pub use cube::{seed_cube, SEED_HALF_EXTENT};
pub use inverse::{facet_index_from_normal, tier_angle_from_normal, tier_distance_from_facet};
pub use order::reorder_convex;
pub use plane::{rotational_cut_plane, spherical_facet_point, CutPlane, IndexGear};
pub use subdivide::{subdivide, subdivide_quads};
pub use triangulate::{fan_triangulate, oriented_triangle, quads_to_triangles};
