//! Text (`.asc`) decoder and forward reconstruction pipeline.
//!
//! The text form stores the cutting recipe (gear, tiers, angles, distances,
//! facet indices) and no geometry at all. After the lines are parsed, the
//! gem is rebuilt by carving a seed cube with one cutting plane per facet.

use gemcad_geometry::{
    apply_cut, fan_triangulate, seed_cube, spherical_facet_point, subdivide, CutPlane, IndexGear,
};
use gemcad_model::{DesignDocument, FacetSpec, TierSpec};
use log::{debug, warn};

/// Decode GemCad text (`.asc`) content into a document.
///
/// Malformed and unknown lines are skipped with a debug log; the text
/// decoder itself never fails.
pub fn decode_text(source: &str) -> DesignDocument {
    let mut doc = DesignDocument::new();
    for line in source.lines() {
        if !line.trim().is_empty() {
            process_line(line, &mut doc);
        }
    }
    if !doc.tiers.is_empty() {
        build_geometry(&mut doc);
    }
    doc
}

fn process_line(line: &str, doc: &mut DesignDocument) {
    let tokens: Vec<&str> = line.split_ascii_whitespace().collect();
    match tokens[0] {
        "g" if tokens.len() == 3 => {
            if let (Ok(gear), Ok(location)) = (tokens[1].parse::<i32>(), tokens[2].parse::<f64>()) {
                debug!("gear {} at location {}", gear, location);
                doc.metadata.gear = gear;
                doc.metadata.gear_location_angle = location;
            }
        }
        "y" if tokens.len() == 3 => {
            if let Ok(folds) = tokens[1].parse::<i32>() {
                debug!("symmetry {}-fold, mirror token {:?}", folds, tokens[2]);
                doc.metadata.symmetry_folds = folds;
                doc.metadata.symmetry_mirror = tokens[2] == "y";
            }
        }
        "I" if tokens.len() == 2 => {
            if let Ok(index) = tokens[1].parse::<f64>() {
                debug!("refractive index {}", index);
                doc.metadata.refractive_index = index;
            }
        }
        "H" if tokens.len() > 1 => {
            let header = tokens[1..].join(" ");
            debug!("header {:?}", header);
            doc.metadata.headers.push(header);
        }
        "F" if tokens.len() > 1 => {
            let footnote = tokens[1..].join(" ");
            debug!("footnote {:?}", footnote);
            doc.metadata.footnotes.push(footnote);
        }
        // A tier line needs both scalars and at least one trailing item.
        "a" if tokens.len() > 3 => {
            if let (Ok(angle), Ok(distance)) = (tokens[1].parse::<f64>(), tokens[2].parse::<f64>())
            {
                let number = doc.tiers.len() as i32 + 1;
                doc.tiers
                    .push(parse_tier(number, angle, distance, &tokens[3..]));
            } else {
                debug!("skipping tier line with unparseable scalars: {:?}", line);
            }
        }
        _ => debug!("skipping line {:?}", line),
    }
}

/// Parse the items after `a <angle> <distance>` into facets plus optional
/// free-text cutting instructions.
///
/// Numeric tokens hold one pending index at a time; `n <name>` flushes the
/// pending index under that name, a second numeric flushes it unnamed, and
/// the first token that is neither ends index parsing and starts the
/// instruction text.
fn parse_tier(number: i32, angle: f64, distance: f64, items: &[&str]) -> TierSpec {
    let mut facets: Vec<(String, f64)> = Vec::new();
    let mut pending: Option<f64> = None;
    let mut instructions = String::new();

    let mut i = 0;
    while i < items.len() {
        if items[i] == "n" {
            if let Some(index) = pending.take() {
                let name = items.get(i + 1).copied().unwrap_or_default();
                facets.push((name.to_string(), index));
            }
            i += 2;
        } else if let Ok(index) = items[i].parse::<f64>() {
            if let Some(previous) = pending.replace(index) {
                facets.push((String::new(), previous));
            }
            i += 1;
        } else {
            if let Some(index) = pending.take() {
                facets.push((String::new(), index));
            }
            instructions = items[i..].join(" ");
            break;
        }
    }
    if let Some(index) = pending {
        facets.push((String::new(), index));
    }

    debug!(
        "tier {}: angle {}, distance {}, {} facet(s), instructions {:?}",
        number,
        angle,
        distance,
        facets.len(),
        instructions
    );
    TierSpec {
        is_preform: false,
        number,
        angle,
        distance,
        cutting_instructions: instructions,
        indices: facets
            .into_iter()
            .map(|(name, index)| FacetSpec {
                tier: number,
                name,
                index,
                ..FacetSpec::default()
            })
            .collect(),
    }
}

/// Carve the seed cube with every tier's cutting planes and attach the
/// surviving cut faces to their facets.
fn build_geometry(doc: &mut DesignDocument) {
    if doc.metadata.gear <= 0 {
        warn!(
            "gear tooth count {} is unusable; facet geometry left empty",
            doc.metadata.gear
        );
        return;
    }
    let gear = IndexGear::new(
        f64::from(doc.metadata.gear),
        doc.metadata.gear_location_angle,
    );

    // Cut in file order. Each cut face is tagged with the facet's
    // tier number and slot so duplicate index values cannot collide.
    let mut soup = seed_cube();
    for tier in &doc.tiers {
        for (slot, facet) in tier.indices.iter().enumerate() {
            let point = spherical_facet_point(gear, tier.angle, tier.distance, facet.index);
            let plane = CutPlane::from_facet_point(point);
            apply_cut(&mut soup, &plane, &facet_tag(tier.number, slot));
        }
    }

    for tier in &mut doc.tiers {
        for (slot, facet) in tier.indices.iter_mut().enumerate() {
            let tag = facet_tag(tier.number, slot);
            let Some(face) = soup
                .iter()
                .find(|p| p.tag == tag && p.vertex_count() >= 3)
            else {
                debug!("facet {} was cut away entirely", tag);
                continue;
            };
            let point = spherical_facet_point(gear, tier.angle, tier.distance, facet.index);
            facet.facet_normal = CutPlane::from_facet_point(point).unit_normal();
            facet.points = face.points();
            facet.rendering_triangles = subdivide(fan_triangulate(face), 1);
        }
    }
}

fn facet_tag(tier: i32, slot: usize) -> String {
    format!("{}:{}", tier, slot)
}
