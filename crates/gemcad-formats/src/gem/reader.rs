//! Assembly of the record stream into a document.

use gemcad_geometry::{
    facet_index_from_normal, fan_triangulate, subdivide, tier_angle_from_normal,
    tier_distance_from_facet, IndexGear,
};
use gemcad_math::TOLERANCE;
use gemcad_mesh::Polygon;
use gemcad_model::{DesignDocument, DesignMetadata, FacetSpec, TierSpec};
use log::debug;

use crate::error::FormatError;
use crate::gem::cursor::Cursor;
use crate::gem::records::{read_record, FacetRecord, Record, TrailerRecord};

/// Consecutive facet records sharing a tier marker and preform state.
struct TierGroup {
    preform: bool,
    number: i32,
    records: Vec<FacetRecord>,
}

/// Decode GemCad binary (`.gem`) content into a document.
///
/// The stream stores already-clipped facet boundaries but no cutting
/// recipe, so tier angles, distances, and facet indices are recovered
/// from the stored plane normals. Tier text stays empty.
pub fn decode_binary(bytes: &[u8]) -> Result<DesignDocument, FormatError> {
    let mut cursor = Cursor::new(bytes);
    let mut metadata = DesignMetadata::default();

    // Facet groups in stream order. A group closes when the tier marker
    // changes or when a trailer switches the stream into preform records.
    let mut groups: Vec<TierGroup> = Vec::new();
    let mut preform = false;
    while cursor.remaining() >= 4 {
        match read_record(&mut cursor)? {
            Record::Facet(record) => match groups.last_mut() {
                Some(group) if group.preform == preform && group.number == record.tier => {
                    group.records.push(*record);
                }
                _ => groups.push(TierGroup {
                    preform,
                    number: record.tier,
                    records: vec![*record],
                }),
            },
            Record::Trailer(trailer) => {
                merge_trailer(&mut metadata, &trailer);
                preform = preform || trailer.enters_preform;
            }
        }
    }
    debug!(
        "decoded {} tier group(s), gear {} with {} fold(s)",
        groups.len(),
        metadata.gear,
        metadata.symmetry_folds
    );

    let gear = (metadata.gear > 0)
        .then(|| IndexGear::new(f64::from(metadata.gear), metadata.gear_location_angle));
    let tiers = groups
        .into_iter()
        .map(|group| build_tier(group, gear))
        .collect();

    Ok(DesignDocument { metadata, tiers })
}

/// Fold one trailer's metadata into the document.
///
/// Scalars from a later trailer overwrite earlier ones; string lines
/// append. Non-blank lines are headers until the first blank line of the
/// trailer and footnotes after it, with the switch starting fresh for
/// each trailer.
fn merge_trailer(metadata: &mut DesignMetadata, trailer: &TrailerRecord) {
    metadata.gear = trailer.gear;
    metadata.gear_location_angle = trailer.gear_location;
    metadata.refractive_index = trailer.refractive_index;
    metadata.symmetry_folds = trailer.symmetry_folds;
    metadata.symmetry_mirror = trailer.symmetry_mirror;
    metadata.unknown_marker = Some(trailer.unknown_marker);
    metadata.reserved_marker = Some(trailer.reserved_marker);

    let mut in_footnotes = false;
    for line in &trailer.strings {
        if line.is_empty() {
            in_footnotes = true;
        } else if in_footnotes {
            metadata.footnotes.push(line.clone());
        } else {
            metadata.headers.push(line.clone());
        }
    }
}

/// Turn one group of facet records into a tier.
///
/// The tier angle and distance come from the first facet that has both a
/// non-degenerate normal and at least three boundary points. Facets with
/// shorter boundaries keep their points but get no triangles.
fn build_tier(group: TierGroup, gear: Option<IndexGear>) -> TierSpec {
    let mut tier = TierSpec {
        is_preform: group.preform,
        number: group.number,
        ..TierSpec::default()
    };
    let mut recovered = false;
    for record in group.records {
        let has_ring = record.points.len() >= 3;
        if !recovered && has_ring && record.normal.length() > TOLERANCE {
            tier.angle = tier_angle_from_normal(record.normal);
            tier.distance = tier_distance_from_facet(record.normal, &record.points);
            recovered = true;
        }
        let index = match gear {
            Some(gear) => facet_index_from_normal(gear, record.normal),
            None => 0.0,
        };
        let rendering_triangles = if has_ring {
            let boundary = Polygon::from_points(&record.points);
            subdivide(fan_triangulate(&boundary), 1)
        } else {
            Vec::new()
        };
        tier.indices.push(FacetSpec {
            tier: group.number,
            name: record.name,
            index,
            facet_normal: record.normal,
            cutting_instructions: record.cutting_instructions,
            points: record.points,
            rendering_triangles,
        });
    }
    tier
}
