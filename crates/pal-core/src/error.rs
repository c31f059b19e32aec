//! Error types for palette and gradient operations.
//!
//! A single [`Error`] enum is shared by the model and by every format coder,
//! so a caller loading an arbitrary file only has one type to match on.
//!
//! # Categories
//!
//! Each variant belongs to one [`ErrorKind`]:
//!
//! - **Format**: [`InvalidFormat`](Error::InvalidFormat),
//!   [`InvalidVersion`](Error::InvalidVersion), [`EndOfStream`](Error::EndOfStream),
//!   [`DuplicateStopPosition`](Error::DuplicateStopPosition), [`EmptyGradient`](Error::EmptyGradient)
//! - **ColorSpace**: [`UnsupportedColorSpace`](Error::UnsupportedColorSpace),
//!   [`CannotConvertColorSpace`](Error::CannotConvertColorSpace),
//!   [`InvalidComponentCount`](Error::InvalidComponentCount)
//! - **Encoding**: [`InvalidString`](Error::InvalidString), [`TooManyEntries`](Error::TooManyEntries)
//! - **Lookup**: [`UnsupportedCoderType`](Error::UnsupportedCoderType)
//! - **Io**: [`Io`](Error::Io)
//!
//! # Usage
//!
//! ```rust
//! use pal_core::{Color, ColorSpace, Error, ErrorKind};
//!
//! let err = Color::new("bad", ColorSpace::Rgb, vec![1.0, 0.0]).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::ColorSpace);
//! assert!(matches!(err, Error::InvalidComponentCount { expected: 3, actual: 2, .. }));
//! ```

use crate::ColorSpace;
use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while building, converting, decoding or encoding palettes.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed structural data: bad signature, wrong field count, bad value.
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// The file declares a version this library cannot read.
    #[error("invalid version: {0}")]
    InvalidVersion(String),

    /// The stream ended before a complete value could be read.
    #[error("unexpected end of stream")]
    EndOfStream,

    /// The color model is recognized (or not) but cannot be represented.
    #[error("unsupported colorspace: {0}")]
    UnsupportedColorSpace(String),

    /// No deterministic transform exists between two colorspaces.
    #[error("cannot convert colorspace {from} to {to}")]
    CannotConvertColorSpace {
        /// Source colorspace.
        from: ColorSpace,
        /// Requested colorspace.
        to: ColorSpace,
    },

    /// Component count does not match the arity of the colorspace.
    #[error("{colorspace} expects {expected} components, got {actual}")]
    InvalidComponentCount {
        /// Colorspace of the rejected color.
        colorspace: ColorSpace,
        /// Required component count.
        expected: usize,
        /// Supplied component count.
        actual: usize,
    },

    /// A string could not be decoded or cannot be written in the target encoding.
    #[error("invalid string: {0}")]
    InvalidString(String),

    /// The target format has a hard limit on an entry count.
    #[error("too many entries: {count} (maximum {max})")]
    TooManyEntries {
        /// Number of entries requested.
        count: usize,
        /// Format limit.
        max: usize,
    },

    /// Two gradient stops share a position after normalization.
    #[error("duplicate gradient stop position: {0}")]
    DuplicateStopPosition(f64),

    /// A gradient operation needs at least one stop.
    #[error("gradient has no stops")]
    EmptyGradient,

    /// No coder is registered for the requested extension.
    #[error("unsupported coder type: {0}")]
    UnsupportedCoderType(String),

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse error category, used by callers to decide on retry or fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or truncated input.
    Format,
    /// Unsupported or lossy colorspace request.
    ColorSpace,
    /// The model cannot be rendered to the target bytes.
    Encoding,
    /// No coder matched.
    Lookup,
    /// Host I/O failure.
    Io,
}

impl Error {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidFormat(_)
            | Error::InvalidVersion(_)
            | Error::EndOfStream
            | Error::DuplicateStopPosition(_)
            | Error::EmptyGradient => ErrorKind::Format,
            Error::UnsupportedColorSpace(_)
            | Error::CannotConvertColorSpace { .. }
            | Error::InvalidComponentCount { .. } => ErrorKind::ColorSpace,
            Error::InvalidString(_) | Error::TooManyEntries { .. } => ErrorKind::Encoding,
            Error::UnsupportedCoderType(_) => ErrorKind::Lookup,
            Error::Io(_) => ErrorKind::Io,
        }
    }

    /// Shorthand for [`Error::InvalidFormat`].
    pub fn format(msg: impl Into<String>) -> Self {
        Error::InvalidFormat(msg.into())
    }
}
