#![warn(missing_docs)]

//! Document model for decoded GemCad designs.
//!
//! A [`DesignDocument`] is the decoder-independent result of importing a
//! design file: global metadata plus the tier/facet hierarchy, each facet
//! carrying its boundary polygon and subdivided rendering triangles. The
//! JSON shape (camelCase keys) is shared with the TypeScript viewer.

use gemcad_math::Point3;
use gemcad_mesh::{PolygonSet, Triangle};
use serde::{Deserialize, Serialize};

/// Global design parameters and free-text annotations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignMetadata {
    /// Index-gear tooth count.
    pub gear: i32,
    /// Rotational offset of index zero, in gear steps.
    pub gear_location_angle: f64,
    /// Refractive index of the design material.
    pub refractive_index: f64,
    /// Rotational symmetry fold count.
    pub symmetry_folds: i32,
    /// Whether the design is mirror-symmetric.
    pub symmetry_mirror: bool,
    /// Free-text header lines.
    pub headers: Vec<String>,
    /// Free-text footnote lines.
    pub footnotes: Vec<String>,
    /// Opaque bytes from the binary trailer header. `None` for text decodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unknown_marker: Option<[u8; 4]>,
    /// Reserved bytes following the refractive index. `None` for text decodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserved_marker: Option<[u8; 4]>,
}

/// One facet: a single cut positioned by its gear index.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetSpec {
    /// Owning tier number.
    pub tier: i32,
    /// Display name (e.g. `"C1"`, `"Table"`), possibly empty.
    pub name: String,
    /// Index number on the gear. Fractional for off-tooth cuts.
    pub index: f64,
    /// Unit normal of the facet's cutting plane.
    pub facet_normal: Point3,
    /// Free text attached to this facet.
    pub cutting_instructions: String,
    /// Convex boundary ring of the facet.
    pub points: Vec<Point3>,
    /// Subdivided triangles with per-vertex shading normals.
    pub rendering_triangles: Vec<Triangle>,
}

/// A group of facets cut at the same angle and distance.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierSpec {
    /// Whether the tier belongs to the preform sub-section. Viewers skip
    /// preform tiers when rendering the finished stone.
    pub is_preform: bool,
    /// Tier number.
    pub number: i32,
    /// Cutting angle in degrees. Negative angles cut the pavilion side.
    pub angle: f64,
    /// Cutting distance from the origin along the plane normal.
    pub distance: f64,
    /// Free text for the whole tier.
    pub cutting_instructions: String,
    /// Facets of this tier.
    pub indices: Vec<FacetSpec>,
}

/// A decoded GemCad design: metadata plus the tier/facet hierarchy.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DesignDocument {
    /// Global parameters and annotations.
    pub metadata: DesignMetadata,
    /// Tiers in decode order.
    pub tiers: Vec<TierSpec>,
}

impl DesignDocument {
    /// Empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Collect every non-preform facet's rendering triangles into a fresh
    /// [`PolygonSet`] for renderers.
    pub fn render_set(&self) -> PolygonSet {
        let mut set = PolygonSet::new();
        for tier in self.tiers.iter().filter(|t| !t.is_preform) {
            for facet in &tier.indices {
                set.add_all(facet.rendering_triangles.iter().cloned());
            }
        }
        set
    }
}
