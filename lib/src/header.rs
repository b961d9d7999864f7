use std::io::{self, Read};

use crate::{Error, error::Result};

/// The magic bytes every fic container starts with.
pub const FIC_MAGIC: [u8; 3] = *b"FIC";
/// The container format version written by this crate.
pub const FIC_VERSION: u8 = 1;
/// The size of the container header.
///
/// Magic (3 bytes) + version (1 byte) + quality (1 byte)
pub const HEADER_SIZE: usize = 5;

/// The header in front of the compressed payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    quality: u8,
}

impl Header {
    /// Creates a header for the given quality, clamped to `0..=100`.
    pub fn new(quality: i32) -> Self {
        Self {
            quality: quality.clamp(0, 100).unsigned_abs() as u8,
        }
    }

    /// The quality the payload was compressed with.
    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Serializes the header.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let [m0, m1, m2] = FIC_MAGIC;
        [m0, m1, m2, FIC_VERSION, self.quality]
    }

    /// Parses a header from the start of `buf`.
    ///
    /// # Errors
    ///
    /// Fails if `buf` is shorter than [`HEADER_SIZE`], the magic bytes do not match or the
    /// version is unknown.
    pub fn from_bytes(buf: &[u8]) -> Result<Self> {
        if buf.len() < HEADER_SIZE {
            return Err(Error::truncated_header());
        }
        if buf[..3] != FIC_MAGIC {
            return Err(Error::bad_magic());
        }
        if buf[3] != FIC_VERSION {
            return Err(Error::unsupported_version(buf[3]));
        }

        Ok(Self { quality: buf[4] })
    }

    /// Reads exactly [`HEADER_SIZE`] bytes from `reader` and parses them.
    ///
    /// # Errors
    ///
    /// Fails if reading fails, the input ends early or the header is invalid.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut buf = [0u8; HEADER_SIZE];
        reader.read_exact(&mut buf).map_err(|err| {
            if err.kind() == io::ErrorKind::UnexpectedEof {
                Error::truncated_header()
            } else {
                Error::from(err)
            }
        })?;

        Self::from_bytes(&buf)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn quality_is_clamped() {
        assert_eq!(Header::new(-20).quality(), 0);
        assert_eq!(Header::new(80).quality(), 80);
        assert_eq!(Header::new(250).quality(), 100);
    }

    #[test]
    fn parse_written_header() {
        let header = Header::new(42);
        let bytes = header.to_bytes();
        assert_eq!(&bytes[..3], b"FIC");
        assert_eq!(Header::from_bytes(&bytes).unwrap(), header);
    }

    #[test]
    fn reject_bad_magic() {
        let err = Header::from_bytes(b"PNG\x01\x50").unwrap_err();
        assert!(err.is_format_error());
        assert_eq!(err.to_string(), "not a fic container");
    }

    #[test]
    fn reject_unknown_version() {
        let err = Header::from_bytes(b"FIC\x07\x50").unwrap_err();
        assert_eq!(err.to_string(), "unsupported container version 7");
    }

    #[test]
    fn short_input_is_truncated() {
        let err = Header::read_from(&mut Cursor::new(b"FI")).unwrap_err();
        assert_eq!(err.to_string(), "container header is truncated");
    }
}
