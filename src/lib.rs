//! Nullmedia - identify media files and replace them with null placeholders
//!
//! This library crate exposes configuration loading for the CLI and for
//! integration testing. The media logic lives in `nullmedia-av` and
//! `nullmedia-common`.

pub mod config;
