//! Minimal JPEG marker-segment walker for lifting EXIF out of a source file.
//!
//! The `image` crate decodes pixels but drops APP segments, so the EXIF blob is
//! read here and handed to the exporter, which writes it into the new file.
//!
//! Segment layout (everything before the first SOS):
//!   Bytes 0-1: 0xFF, marker
//!   Bytes 2-3: segment length (big-endian u16, includes these two bytes)
//!   Bytes 4+:  payload
//!
//! EXIF lives in APP1 (0xFFE1) with a payload starting `Exif\0\0`, followed by
//! a TIFF structure. That TIFF structure is the blob we preserve.

const MARKER_PREFIX: u8 = 0xFF;
const SOI: u8 = 0xD8;
const EOI: u8 = 0xD9;
const SOS: u8 = 0xDA;
const APP1: u8 = 0xE1;
const EXIF_HEADER: &[u8] = b"Exif\0\0";

/// A header segment between SOI and SOS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Segment<'a> {
    marker: u8,
    payload: &'a [u8],
}

/// Walk the header segments of a JPEG stream.
///
/// Stops at SOS, EOI, or the first malformed segment. Returns an empty list
/// when the data does not start with SOI.
fn header_segments(data: &[u8]) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    if data.len() < 2 || data[0] != MARKER_PREFIX || data[1] != SOI {
        return segments;
    }

    let mut pos = 2;
    while pos + 4 <= data.len() {
        if data[pos] != MARKER_PREFIX {
            break;
        }
        let marker = data[pos + 1];
        // Fill bytes: a run of 0xFF before the real marker
        if marker == MARKER_PREFIX {
            pos += 1;
            continue;
        }
        if marker == SOS || marker == EOI {
            break;
        }
        // Standalone markers carry no length field
        if (0xD0..=0xD7).contains(&marker) || marker == 0x01 {
            pos += 2;
            continue;
        }

        let len = u16::from_be_bytes([data[pos + 2], data[pos + 3]]) as usize;
        let end = pos + 2 + len;
        if len < 2 || end > data.len() {
            break;
        }
        segments.push(Segment {
            marker,
            payload: &data[pos + 4..end],
        });
        pos = end;
    }
    segments
}

/// Extract the EXIF blob (the TIFF structure after `Exif\0\0`) from a JPEG.
///
/// Returns the first APP1 EXIF segment's blob, or `None` when the file has
/// none or is not a JPEG.
pub fn read_exif(data: &[u8]) -> Option<&[u8]> {
    header_segments(data)
        .into_iter()
        .find(|seg| seg.marker == APP1 && seg.payload.starts_with(EXIF_HEADER))
        .map(|seg| &seg.payload[EXIF_HEADER.len()..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{jpeg_bytes, jpeg_with_exif, sample_exif};

    const APP0: u8 = 0xE0;

    fn segment(marker: u8, payload: &[u8]) -> Vec<u8> {
        let mut out = vec![MARKER_PREFIX, marker];
        out.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
        out.extend_from_slice(payload);
        out
    }

    /// SOI + APP0(JFIF) + a fake SOS + EOI: enough structure for the walker.
    fn tiny_jpeg() -> Vec<u8> {
        let mut data = vec![0xFF, SOI];
        data.extend(segment(APP0, b"JFIF\0"));
        data.extend_from_slice(&[0xFF, SOS, 0x00, 0x02, 0x12, 0x34]);
        data.extend_from_slice(&[0xFF, EOI]);
        data
    }

    #[test]
    fn walker_lists_header_segments_until_sos() {
        let data = tiny_jpeg();
        let segments = header_segments(&data);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].marker, APP0);
        assert_eq!(segments[0].payload, b"JFIF\0");
    }

    #[test]
    fn walker_rejects_non_jpeg() {
        assert!(header_segments(b"\x89PNG\r\n\x1a\n").is_empty());
        assert!(header_segments(&[]).is_empty());
    }

    #[test]
    fn walker_stops_on_truncated_segment() {
        let mut data = vec![0xFF, SOI, 0xFF, APP1, 0x10, 0x00];
        data.extend_from_slice(b"Exif");
        assert!(header_segments(&data).is_empty());
        assert_eq!(read_exif(&data), None);
    }

    #[test]
    fn walker_skips_fill_bytes() {
        let mut data = vec![0xFF, SOI, 0xFF];
        data.extend(segment(APP1, b"Exif\0\0MM\0*"));
        assert_eq!(read_exif(&data), Some(&b"MM\0*"[..]));
    }

    #[test]
    fn read_exif_after_jfif_header() {
        let mut data = vec![0xFF, SOI];
        data.extend(segment(APP0, b"JFIF\0"));
        data.extend(segment(APP1, b"Exif\0\0II*\0"));
        data.extend_from_slice(&[0xFF, EOI]);
        assert_eq!(read_exif(&data), Some(&b"II*\0"[..]));
    }

    #[test]
    fn read_exif_from_real_encoder_output() {
        assert_eq!(read_exif(&jpeg_bytes(16, 12)), None);

        let exif = sample_exif();
        let tagged = jpeg_with_exif(16, 12, &exif);
        assert_eq!(read_exif(&tagged), Some(exif.as_slice()));
    }

    #[test]
    fn read_exif_ignores_non_exif_app1() {
        let mut data = vec![0xFF, SOI];
        // XMP-style APP1 first, then the EXIF one
        data.extend(segment(APP1, b"http://ns.adobe.com/xap/1.0/\0<x/>"));
        data.extend(segment(APP1, b"Exif\0\0II*\0"));
        data.extend_from_slice(&[0xFF, EOI]);

        assert_eq!(read_exif(&data), Some(&b"II*\0"[..]));
    }

    #[test]
    fn read_exif_stops_at_scan_data() {
        let mut data = vec![0xFF, SOI];
        data.extend_from_slice(&[0xFF, SOS, 0x00, 0x02]);
        data.extend(segment(APP1, b"Exif\0\0II*\0"));
        assert_eq!(read_exif(&data), None);
    }
}
