//! Nullmedia-Common: Shared types and codecs.
//!
//! This crate provides the pieces of nullmedia that do not touch external tools:
//!
//! - **Media kinds**: the image/audio/video extension tables and lookups
//! - **Metadata model**: [`MediaInfo`] and its `WxHxDxSIG.ext` string form
//! - **Signatures**: the 6-hex-digit validator and content-hash derivation
//! - **Error Handling**: Common error types and result aliases
//!
//! # Examples
//!
//! ```
//! use nullmedia_common::{MediaInfo, MediaKind};
//!
//! let info: MediaInfo = "128x128x5000x123456.mp4".parse().unwrap();
//! assert_eq!(info.duration(), 5000);
//! assert_eq!(info.kind(), Some(MediaKind::Video));
//! assert_eq!(info.to_string(), "128x128x5000x123456.mp4");
//! ```

pub mod error;
pub mod info;
pub mod kind;
pub mod signature;

pub use error::{Error, Result};
pub use info::MediaInfo;
pub use kind::MediaKind;
pub use signature::{file_signature, validate_signature, SIGNATURE_LEN};
