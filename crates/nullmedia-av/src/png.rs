//! PNG dimensions straight from the file header.
//!
//! Width and height live in the IHDR chunk, which sits inside the first 64
//! bytes of every PNG, including Apple's CgBI variant where a `CgBI` chunk
//! precedes IHDR. Reading them here avoids spawning `identify` for the most
//! common image format.

use crate::pool::HeaderReaderPool;
use crate::sniff::is_png;
use crate::{Error, Result};
use std::path::Path;

/// IHDR chunk type; width and height follow it as big-endian `u32`s.
const IHDR: &[u8; 4] = b"IHDR";

/// Read PNG dimensions from the header of `path`.
///
/// Returns `Ok(None)` when the file does not start with the PNG signature, so
/// that callers can route it to a generic extractor.
///
/// # Errors
///
/// - [`Error::MalformedHeader`] if the signature is present but the IHDR
///   marker or the eight bytes after it are not within the header window.
/// - [`Error::Io`] if the file cannot be opened.
pub fn png_dimensions(path: &Path, pool: &HeaderReaderPool) -> Result<Option<(u32, u32)>> {
    let header = pool.peek_file(path)?;
    parse_header(&header).map_err(|message| Error::malformed_header(path, message))
}

/// Parse PNG dimensions out of a header window.
///
/// ```
/// use nullmedia_av::png::parse_header;
///
/// let mut header = b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0dIHDR".to_vec();
/// header.extend_from_slice(&[0, 0, 0x07, 0x80, 0, 0, 0x04, 0x38]);
/// assert_eq!(parse_header(&header), Ok(Some((1920, 1080))));
/// assert_eq!(parse_header(b"GIF89a"), Ok(None));
/// ```
pub fn parse_header(header: &[u8]) -> std::result::Result<Option<(u32, u32)>, String> {
    if !is_png(header) {
        return Ok(None);
    }

    let marker = header
        .windows(IHDR.len())
        .position(|w| w == IHDR)
        .ok_or_else(|| format!("no IHDR marker in the first {} bytes", header.len()))?;

    let fields = marker + IHDR.len();
    let dims = header
        .get(fields..fields + 8)
        .ok_or_else(|| format!("IHDR at offset {marker} is not followed by 8 bytes"))?;

    let width = u32::from_be_bytes([dims[0], dims[1], dims[2], dims[3]]);
    let height = u32::from_be_bytes([dims[4], dims[5], dims[6], dims[7]]);
    Ok(Some((width, height)))
}
