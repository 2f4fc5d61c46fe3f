//! Record-level parsing of the binary stream.
//!
//! The stream has no record tags. A trailer is recognized structurally by
//! its 16-byte header; everything else is a facet record.

use gemcad_math::{validate_scalar, Point3};
use log::{debug, warn};

use crate::error::FormatError;
use crate::gem::cursor::Cursor;

/// One facet record: the stored plane normal, the tier marker it repeats,
/// its text fields, and the clipped boundary ring.
#[derive(Debug, Clone, Default)]
pub(crate) struct FacetRecord {
    pub(crate) tier: i32,
    pub(crate) normal: Point3,
    pub(crate) name: String,
    pub(crate) cutting_instructions: String,
    pub(crate) points: Vec<Point3>,
}

/// One trailer record: design metadata plus its raw string lines.
#[derive(Debug, Clone, Default)]
pub(crate) struct TrailerRecord {
    pub(crate) unknown_marker: [u8; 4],
    pub(crate) symmetry_folds: i32,
    pub(crate) symmetry_mirror: bool,
    pub(crate) gear: i32,
    pub(crate) refractive_index: f64,
    pub(crate) reserved_marker: [u8; 4],
    pub(crate) gear_location: f64,
    pub(crate) strings: Vec<String>,
    /// Whether the string section ended on the preform marker.
    pub(crate) enters_preform: bool,
}

#[derive(Debug)]
pub(crate) enum Record {
    Facet(Box<FacetRecord>),
    Trailer(Box<TrailerRecord>),
}

/// Read the next record at the cursor, deciding its kind structurally.
pub(crate) fn read_record(cursor: &mut Cursor) -> Result<Record, FormatError> {
    if let Some(trailer) = try_read_trailer(cursor)? {
        Ok(Record::Trailer(Box::new(trailer)))
    } else {
        Ok(Record::Facet(Box::new(read_facet(cursor)?)))
    }
}

/// Attempt to read a trailer record, rewinding the cursor on mismatch.
///
/// The 16-byte trailer header is four little-endian 32-bit slots: a zero
/// marker, four opaque bytes that are never all zero, a positive symmetry
/// fold count, and a mirror flag of 0 or 1. A facet record whose leading
/// normal bytes happen to satisfy all four conditions would be
/// misidentified here; nothing in the stream can distinguish that case.
fn try_read_trailer(cursor: &mut Cursor) -> Result<Option<TrailerRecord>, FormatError> {
    let start = cursor.position();
    let zero_marker = cursor.read_i32()?;
    // Conversions cannot fail after the length check inside read_bytes
    let unknown_marker: [u8; 4] = cursor.read_bytes(4)?.try_into().unwrap();
    let folds = cursor.read_i32()?;
    let mirror = cursor.read_i32()?;

    let is_trailer = zero_marker == 0
        && unknown_marker != [0u8; 4]
        && folds > 0
        && (mirror == 0 || mirror == 1);
    if !is_trailer {
        cursor.seek(start);
        return Ok(None);
    }
    debug!("trailer record at offset {:#06x}", start);

    let gear = cursor.read_i32()?;
    let refractive_index = validate_scalar(cursor.read_f64()?);
    let reserved_marker: [u8; 4] = cursor.read_bytes(4)?.try_into().unwrap();
    let gear_location = validate_scalar(cursor.read_f64()?);

    let mut strings = Vec::new();
    let mut enters_preform = false;
    while cursor.remaining() >= 4 {
        let line = read_string(cursor)?;
        let line = line.trim();
        if line.eq_ignore_ascii_case("preform") {
            enters_preform = true;
            break;
        }
        strings.push(line.to_string());
    }

    Ok(Some(TrailerRecord {
        unknown_marker,
        symmetry_folds: folds,
        symmetry_mirror: mirror == 1,
        gear,
        refractive_index,
        reserved_marker,
        gear_location,
        strings,
        enters_preform,
    }))
}

/// Read one facet record at the cursor.
fn read_facet(cursor: &mut Cursor) -> Result<FacetRecord, FormatError> {
    let offset = cursor.position();
    let (normal, tier) = read_point_and_marker(cursor)?;
    debug!("facet record at offset {:#06x}, tier marker {}", offset, tier);

    let text_offset = cursor.position();
    let text = read_string(cursor)?;
    cursor.read_i32()?; // post-string slot, value unused

    let mut fields = text.split('\t');
    let name = fields.next().unwrap_or_default().trim().to_string();
    let cutting_instructions = fields.next().unwrap_or_default().trim().to_string();
    let extra = fields.count();
    if extra > 0 {
        warn!(
            "discarding {} extra tab field(s) at offset {:#06x}",
            extra, text_offset
        );
    }

    // The marker after each point repeats the tier number until a zero
    // closes the ring. The point paired with the zero still belongs to it.
    let mut points = Vec::new();
    let mut marker = tier;
    while marker > 0 {
        let (point, next) = read_point_and_marker(cursor)?;
        points.push(point);
        marker = next;
    }

    Ok(FacetRecord {
        tier,
        normal,
        name,
        cutting_instructions,
        points,
    })
}

/// Three scrubbed doubles followed by a 32-bit marker.
fn read_point_and_marker(cursor: &mut Cursor) -> Result<(Point3, i32), FormatError> {
    let x = validate_scalar(cursor.read_f64()?);
    let y = validate_scalar(cursor.read_f64()?);
    let z = validate_scalar(cursor.read_f64()?);
    let marker = cursor.read_i32()?;
    Ok((Point3::new(x, y, z), marker))
}

/// Length-prefixed string: one length byte, then that many ASCII bytes.
fn read_string(cursor: &mut Cursor) -> Result<String, FormatError> {
    let len = cursor.read_u8()? as usize;
    let bytes = cursor.read_bytes(len)?;
    Ok(String::from_utf8_lossy(bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_i32(buf: &mut Vec<u8>, value: i32) {
        buf.extend_from_slice(&value.to_le_bytes());
    }

    fn push_f64(buf: &mut Vec<u8>, value: f64) {
        buf.extend_from_slice(&value.to_le_bytes());
    }

    fn push_string(buf: &mut Vec<u8>, text: &str) {
        buf.push(text.len() as u8);
        buf.extend_from_slice(text.as_bytes());
    }

    fn facet_bytes(
        tier: i32,
        normal: (f64, f64, f64),
        text: &str,
        points: &[(f64, f64, f64)],
    ) -> Vec<u8> {
        let mut buf = Vec::new();
        push_f64(&mut buf, normal.0);
        push_f64(&mut buf, normal.1);
        push_f64(&mut buf, normal.2);
        push_i32(&mut buf, tier);
        push_string(&mut buf, text);
        push_i32(&mut buf, 1);
        for (i, point) in points.iter().enumerate() {
            push_f64(&mut buf, point.0);
            push_f64(&mut buf, point.1);
            push_f64(&mut buf, point.2);
            let marker = if i + 1 == points.len() { 0 } else { 1 };
            push_i32(&mut buf, marker);
        }
        buf
    }

    fn trailer_bytes(folds: i32, mirror: i32, gear: i32, strings: &[&str]) -> Vec<u8> {
        let mut buf = Vec::new();
        push_i32(&mut buf, 0);
        buf.extend_from_slice(&[1, 0, 0, 0]);
        push_i32(&mut buf, folds);
        push_i32(&mut buf, mirror);
        push_i32(&mut buf, gear);
        push_f64(&mut buf, 1.54);
        push_i32(&mut buf, 32767);
        push_f64(&mut buf, 0.5);
        for text in strings {
            push_string(&mut buf, text);
        }
        buf
    }

    #[test]
    fn test_facet_record_parses() {
        let data = facet_bytes(
            3,
            (0.25, -0.5, 0.75),
            "Table\tcut to temp center point",
            &[(1.0, 2.0, 3.0), (4.0, 5.0, 6.0), (7.0, 8.0, 9.0)],
        );
        let mut cursor = Cursor::new(&data);
        let record = match read_record(&mut cursor).unwrap() {
            Record::Facet(record) => record,
            Record::Trailer(_) => panic!("expected facet"),
        };
        assert_eq!(record.tier, 3);
        assert_eq!(record.normal, Point3::new(0.25, -0.5, 0.75));
        assert_eq!(record.name, "Table");
        assert_eq!(record.cutting_instructions, "cut to temp center point");
        assert_eq!(record.points.len(), 3);
        assert_eq!(record.points[2], Point3::new(7.0, 8.0, 9.0));
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_facet_point_on_zero_marker_is_kept() {
        let data = facet_bytes(1, (0.5, 0.5, 0.5), "", &[(1.0, 1.0, 1.0)]);
        let mut cursor = Cursor::new(&data);
        let record = match read_record(&mut cursor).unwrap() {
            Record::Facet(record) => record,
            Record::Trailer(_) => panic!("expected facet"),
        };
        assert_eq!(record.points, vec![Point3::new(1.0, 1.0, 1.0)]);
    }

    #[test]
    fn test_facet_extra_tab_fields_discarded() {
        let data = facet_bytes(1, (0.5, 0.0, 0.5), "A\tb\tc\td", &[(0.0, 0.0, 1.0)]);
        let mut cursor = Cursor::new(&data);
        let record = match read_record(&mut cursor).unwrap() {
            Record::Facet(record) => record,
            Record::Trailer(_) => panic!("expected facet"),
        };
        assert_eq!(record.name, "A");
        assert_eq!(record.cutting_instructions, "b");
    }

    #[test]
    fn test_nonpositive_tier_reads_no_points() {
        let mut data = Vec::new();
        push_f64(&mut data, 0.5);
        push_f64(&mut data, 0.5);
        push_f64(&mut data, 0.5);
        push_i32(&mut data, -2);
        push_string(&mut data, "ghost");
        push_i32(&mut data, 1);
        let mut cursor = Cursor::new(&data);
        let record = match read_record(&mut cursor).unwrap() {
            Record::Facet(record) => record,
            Record::Trailer(_) => panic!("expected facet"),
        };
        assert_eq!(record.tier, -2);
        assert!(record.points.is_empty());
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_garbage_scalars_are_scrubbed() {
        let data = facet_bytes(1, (1.0e20, 0.0, 1.0e-9), "", &[(0.0, 0.0, 4.0)]);
        let mut cursor = Cursor::new(&data);
        let record = match read_record(&mut cursor).unwrap() {
            Record::Facet(record) => record,
            Record::Trailer(_) => panic!("expected facet"),
        };
        assert_eq!(record.normal, Point3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_trailer_recognized() {
        let data = trailer_bytes(8, 1, 96, &["Standard Round Brilliant", "", "by Anon"]);
        let mut cursor = Cursor::new(&data);
        let trailer = match read_record(&mut cursor).unwrap() {
            Record::Trailer(trailer) => trailer,
            Record::Facet(_) => panic!("expected trailer"),
        };
        assert_eq!(trailer.symmetry_folds, 8);
        assert!(trailer.symmetry_mirror);
        assert_eq!(trailer.gear, 96);
        assert!((trailer.refractive_index - 1.54).abs() < 1e-12);
        assert!((trailer.gear_location - 0.5).abs() < 1e-12);
        assert_eq!(trailer.unknown_marker, [1, 0, 0, 0]);
        assert_eq!(trailer.reserved_marker, 32767i32.to_le_bytes());
        assert_eq!(
            trailer.strings,
            vec!["Standard Round Brilliant", "", "by Anon"]
        );
        assert!(!trailer.enters_preform);
    }

    #[test]
    fn test_trailer_strings_stop_at_preform() {
        let mut data = trailer_bytes(4, 0, 72, &["Header", "PREFORM"]);
        // Bytes past the marker belong to the next record
        push_i32(&mut data, 42);
        let mut cursor = Cursor::new(&data);
        let trailer = match read_record(&mut cursor).unwrap() {
            Record::Trailer(trailer) => trailer,
            Record::Facet(_) => panic!("expected trailer"),
        };
        assert_eq!(trailer.strings, vec!["Header"]);
        assert!(trailer.enters_preform);
        assert!(!trailer.symmetry_mirror);
        assert_eq!(cursor.remaining(), 4);
    }

    #[test]
    fn test_zero_folds_rejects_trailer() {
        let mut data = Vec::new();
        push_i32(&mut data, 0);
        data.extend_from_slice(&[1, 0, 0, 0]);
        push_i32(&mut data, 0);
        push_i32(&mut data, 1);
        let mut cursor = Cursor::new(&data);
        assert!(try_read_trailer(&mut cursor).unwrap().is_none());
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_blank_opaque_bytes_reject_trailer() {
        // A leading 0.0 double covers both the zero marker and the opaque
        // bytes, so a facet normal starting with 0.0 stays a facet.
        let mut data = Vec::new();
        push_f64(&mut data, 0.0);
        push_i32(&mut data, 8);
        push_i32(&mut data, 1);
        let mut cursor = Cursor::new(&data);
        assert!(try_read_trailer(&mut cursor).unwrap().is_none());
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_out_of_range_mirror_rejects_trailer() {
        let mut data = Vec::new();
        push_i32(&mut data, 0);
        data.extend_from_slice(&[1, 0, 0, 0]);
        push_i32(&mut data, 8);
        push_i32(&mut data, 2);
        let mut cursor = Cursor::new(&data);
        assert!(try_read_trailer(&mut cursor).unwrap().is_none());
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_truncated_facet_reports_offset() {
        let full = facet_bytes(2, (0.5, 0.5, 0.5), "T", &[(1.0, 1.0, 1.0), (2.0, 2.0, 2.0)]);
        let cut = &full[..full.len() - 4];
        let mut cursor = Cursor::new(cut);
        let err = read_record(&mut cursor).unwrap_err();
        assert!(matches!(err, FormatError::Truncated { .. }));
    }
}
