//! PNG textual metadata: reading `tEXt`/`zTXt`/`iTXt` chunks.
//!
//! Only the chunks that precede `IDAT` are read. Text chunks placed after the
//! image data are dropped on purpose: the decoder stops at the first `IDAT`,
//! and the exporter writes every chunk it keeps ahead of the pixels, so a
//! late chunk in the source does not survive the round trip.

use std::io::Cursor;

/// Read every textual chunk from a PNG stream as `(keyword, text)` pairs.
///
/// Compressed chunks are inflated. Chunks that fail to decode are skipped
/// with a warning; an unreadable stream yields an empty list, since the
/// pixel decoder reports that failure on its own.
pub fn read_text_chunks(data: &[u8]) -> Vec<(String, String)> {
    let reader = match png::Decoder::new(Cursor::new(data)).read_info() {
        Ok(reader) => reader,
        Err(e) => {
            log::warn!("could not read PNG text chunks: {e}");
            return Vec::new();
        }
    };
    let info = reader.info();

    let mut entries: Vec<(String, String)> = info
        .uncompressed_latin1_text
        .iter()
        .map(|chunk| (chunk.keyword.clone(), chunk.text.clone()))
        .collect();

    for chunk in &info.compressed_latin1_text {
        match chunk.get_text() {
            Ok(text) => entries.push((chunk.keyword.clone(), text)),
            Err(e) => log::warn!("skipping zTXt chunk '{}': {e}", chunk.keyword),
        }
    }
    for chunk in &info.utf8_text {
        match chunk.get_text() {
            Ok(text) => entries.push((chunk.keyword.clone(), text)),
            Err(e) => log::warn!("skipping iTXt chunk '{}': {e}", chunk.keyword),
        }
    }

    entries
}

/// Whether `keyword` is a legal PNG text keyword: 1–79 Latin-1 characters,
/// no leading, trailing, or doubled spaces, no control characters.
pub fn is_valid_keyword(keyword: &str) -> bool {
    let len = keyword.chars().count();
    (1..=79).contains(&len)
        && keyword.chars().all(|c| matches!(c as u32, 0x20..=0x7E | 0xA1..=0xFF))
        && !keyword.starts_with(' ')
        && !keyword.ends_with(' ')
        && !keyword.contains("  ")
}

/// Whether `text` can be stored in a Latin-1 `tEXt` chunk.
pub fn is_latin1(text: &str) -> bool {
    text.chars().all(|c| (c as u32) <= 0xFF)
}
