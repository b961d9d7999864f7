use std::fmt::Display;

use zstd_safe::{ErrorCode, get_error_name};

/// A `Result` alias where the `Err` case is `fic::Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// The errors that may occur when working with this crate.
#[derive(Debug)]
pub struct Error {
    kind: Kind,
}

impl Error {
    pub(crate) fn bad_magic() -> Self {
        Self {
            kind: Kind::BadMagic,
        }
    }

    pub(crate) fn unsupported_version(version: u8) -> Self {
        Self {
            kind: Kind::UnsupportedVersion(version),
        }
    }

    pub(crate) fn truncated_header() -> Self {
        Self {
            kind: Kind::TruncatedHeader,
        }
    }

    pub(crate) fn truncated_payload() -> Self {
        Self {
            kind: Kind::TruncatedPayload,
        }
    }

    pub(crate) fn zstd_create(msg: &'static str) -> Self {
        Self {
            kind: Kind::Create(msg),
        }
    }

    /// Whether the input was rejected because it is not a fic container.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self.kind,
            Kind::BadMagic
                | Kind::UnsupportedVersion(_)
                | Kind::TruncatedHeader
                | Kind::TruncatedPayload
        )
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            Kind::IO(err) => write!(f, "io error: {err}"),
            Kind::BadMagic => f.write_str("not a fic container"),
            Kind::UnsupportedVersion(v) => write!(f, "unsupported container version {v}"),
            Kind::TruncatedHeader => f.write_str("container header is truncated"),
            Kind::TruncatedPayload => f.write_str("compressed data is truncated"),
            Kind::Create(t) => write!(f, "failed to create {t:?}"),
            Kind::Zstd(code) => f.write_str(get_error_name(*code)),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            Kind::IO(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self {
            kind: Kind::IO(value),
        }
    }
}

impl From<ErrorCode> for Error {
    fn from(value: ErrorCode) -> Self {
        Self {
            kind: Kind::Zstd(value),
        }
    }
}

#[derive(Debug)]
enum Kind {
    /// IO error.
    IO(std::io::Error),
    /// The magic bytes do not match.
    BadMagic,
    /// The container was written by an unknown format version.
    UnsupportedVersion(u8),
    /// The input ended inside the header.
    TruncatedHeader,
    /// The input ended inside the compressed payload.
    TruncatedPayload,
    /// Failed to create zstd type.
    Create(&'static str),
    /// An error from the zstd library.
    Zstd(ErrorCode),
}
