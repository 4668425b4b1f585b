//! Identity signatures.
//!
//! A signature is the first six lowercase hex digits of some longer tag,
//! normally the MD5 digest of the original file. Null media embed it as the
//! fill color of images and video, and as the title tag of audio.

use crate::{Error, Result};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Number of hex digits kept from a raw signature.
pub const SIGNATURE_LEN: usize = 6;

/// Hex digits in an MD5 digest.
const MD5_HEX_LEN: usize = 32;

/// Validate a raw signature and return its first six characters.
///
/// Trailing characters after the sixth are discarded without inspection.
///
/// # Examples
///
/// ```
/// use nullmedia_common::validate_signature;
///
/// assert_eq!(validate_signature("12ab34extra").unwrap(), "12ab34");
/// assert!(validate_signature("12ab_zz").is_err());
/// assert!(validate_signature("12AB34").is_err());
/// assert!(validate_signature("12ab3").is_err());
/// ```
pub fn validate_signature(raw: &str) -> Result<String> {
    let prefix = raw
        .as_bytes()
        .get(..SIGNATURE_LEN)
        .ok_or_else(|| Error::invalid_signature(raw))?;

    if !prefix
        .iter()
        .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(b))
    {
        return Err(Error::invalid_signature(raw));
    }

    // All six bytes are ASCII, so this slice lies on a char boundary.
    Ok(raw[..SIGNATURE_LEN].to_string())
}

/// Compute the lowercase hex MD5 digest of everything `reader` yields.
pub fn reader_digest<R: Read>(mut reader: R) -> Result<String> {
    let mut context = md5::Context::new();
    let mut buffer = [0u8; 64 * 1024];
    loop {
        let n = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        context.consume(&buffer[..n]);
    }

    let hex = format!("{:x}", context.compute());
    if hex.len() != MD5_HEX_LEN {
        return Err(Error::HashFailure {
            expected: MD5_HEX_LEN,
            actual: hex.len(),
        });
    }
    Ok(hex)
}

/// Derive the full-length content signature of a file (its MD5 hex digest).
///
/// The result still has to go through [`validate_signature`] to become a
/// six-digit signature.
pub fn file_signature(path: &Path) -> Result<String> {
    let file = File::open(path)?;
    reader_digest(file)
}
