//! This crate provides the container codec used by the `fic` command line utility.
//!
//! A fic container is a small header followed by the compressed payload:
//!
//! | Field   | Size | Value                            |
//! |---------|------|----------------------------------|
//! | Magic   | 3    | `FIC`                            |
//! | Version | 1    | [`FIC_VERSION`]                  |
//! | Quality | 1    | quality of the payload, 0 to 100 |
//! | Payload | n    | a Zstandard frame                |
//!
//! The quality (0 to 100) selects the effort spent on compression, see [`quality_level`].
//!
//! Fic uses the bindings from the [zstd_safe] crate.
//!
//! # Compression
//!
//! ```
//! use std::io::{self, Cursor};
//! use fic::EncodeOptions;
//!
//! let mut input = Cursor::new(b"Hello, World!");
//! let mut output = Vec::new();
//! let mut encoder = EncodeOptions::new().quality(90).into_encoder(&mut output)?;
//! io::copy(&mut input, &mut encoder)?;
//! encoder.finish()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Decompression
//!
//! ```
//! # use std::io::{self, Cursor};
//! # use fic::{Decoder, Encoder};
//! # let mut container = Vec::new();
//! # let mut encoder = Encoder::new(&mut container)?;
//! # encoder.compress(b"Hello, World!")?;
//! # encoder.finish()?;
//! let mut decoder = Decoder::new(Cursor::new(container))?;
//! assert_eq!(decoder.header().quality(), 80);
//! let mut output = Vec::new();
//! io::copy(&mut decoder, &mut output)?;
//! assert_eq!(output, b"Hello, World!");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [zstd_safe]: https://docs.rs/zstd-safe/latest/zstd_safe/

mod decode;
mod encode;
mod error;
mod header;

pub use decode::Decoder;
pub use encode::{EncodeOptions, Encoder};
pub use error::{Error, Result};
pub use header::{FIC_MAGIC, FIC_VERSION, HEADER_SIZE, Header};
// Re-export as it's part of the API.
pub use zstd_safe::CompressionLevel;

/// The quality used when none is configured.
pub const DEFAULT_QUALITY: i32 = 80;

/// The lowest zstd level a quality maps to.
const MIN_LEVEL: CompressionLevel = 1;
/// The highest zstd level a quality maps to.
const MAX_LEVEL: CompressionLevel = 19;

/// Maps a quality onto a zstd compression level.
///
/// The quality is clamped to `0..=100` and spread linearly over the levels 1 to 19.
///
/// ```
/// assert_eq!(fic::quality_level(0), 1);
/// assert_eq!(fic::quality_level(80), 15);
/// assert_eq!(fic::quality_level(100), 19);
/// assert_eq!(fic::quality_level(-3), 1);
/// ```
pub fn quality_level(quality: i32) -> CompressionLevel {
    MIN_LEVEL + quality.clamp(0, 100) * (MAX_LEVEL - MIN_LEVEL) / 100
}
