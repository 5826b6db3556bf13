//! Error types shared by every decoder in the workspace.
//!
//! A single [`DecodeError`] enum covers the container, prober, schema
//! and action layers. Every variant records the byte offset at which
//! the failure was detected, relative to the buffer being decoded at
//! the time (file bytes for header errors, inflated payload bytes for
//! schema errors).

use std::error::Error;
use std::fmt;

use crate::signature::Codec;

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Why a container header was rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeaderFault {
    /// Neither `HBR2` nor `HBRP` was found where a magic is expected.
    BadMagic {
        /// The first four bytes of the file.
        found: [u8; 4],
    },
    /// Neither byte order yields a version in the plausible range.
    AmbiguousVersion {
        /// The version read as big-endian.
        big_endian: u32,
        /// The version read as little-endian.
        little_endian: u32,
    },
    /// The version is plausible but no schema profile handles it.
    UnsupportedVersion {
        /// The resolved version.
        version: u32,
    },
    /// The file ends before magic and version are complete.
    TooShort {
        /// Total file length.
        len: usize,
    },
}

impl fmt::Display for HeaderFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadMagic { found } => {
                write!(f, "bad magic {found:02x?} (expected \"HBR2\" or \"HBRP\")")
            }
            Self::AmbiguousVersion {
                big_endian,
                little_endian,
            } => write!(
                f,
                "no plausible version: big-endian={big_endian}, little-endian={little_endian}"
            ),
            Self::UnsupportedVersion { version } => {
                write!(f, "unsupported version {version}")
            }
            Self::TooShort { len } => write!(f, "file too short for a header ({len} bytes)"),
        }
    }
}

/// Which discriminant table rejected a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiscriminantKind {
    /// An action type byte in the action log.
    Action,
    /// A stadium type byte.
    Stadium,
}

impl fmt::Display for DiscriminantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Action => f.write_str("action"),
            Self::Stadium => f.write_str("stadium"),
        }
    }
}

/// Errors produced while decoding a replay file or payload.
#[derive(Clone, Debug, PartialEq)]
pub enum DecodeError {
    /// Magic or version could not be resolved.
    MalformedHeader {
        /// Offset of the offending header field.
        offset: usize,
        /// What was wrong.
        fault: HeaderFault,
    },
    /// A read needed more bytes than remain.
    TruncatedBuffer {
        /// Position of the failed read.
        offset: usize,
        /// Bytes the read required.
        needed: usize,
        /// Bytes that were left.
        available: usize,
    },
    /// A type byte is outside its dispatch table.
    UnsupportedDiscriminant {
        /// Position of the type byte.
        offset: usize,
        /// Which table was consulted.
        kind: DiscriminantKind,
        /// The value read.
        value: u8,
        /// Number of entries in the table.
        table_len: usize,
    },
    /// A decompressor rejected its input or exceeded the inflate budget.
    DecompressionFailure {
        /// Offset of the compressed data.
        offset: usize,
        /// Codec that failed.
        codec: Codec,
        /// Message from the underlying decompressor.
        detail: String,
    },
    /// The prober exhausted every route.
    NoDecodeRouteMatched {
        /// Always the start of the probed payload.
        offset: usize,
        /// Labels of every route attempted, in order.
        attempted: Vec<String>,
    },
    /// A decoded field exceeds its documented limit.
    FieldConstraintViolation {
        /// Position where the field started.
        offset: usize,
        /// Field name.
        field: &'static str,
        /// Maximum allowed length.
        limit: usize,
        /// Observed length.
        actual: usize,
    },
    /// A varint ran past its maximum width.
    MalformedVarint {
        /// Position where the varint started.
        offset: usize,
    },
    /// String bytes are not valid UTF-8.
    InvalidUtf8 {
        /// Position where the string bytes started.
        offset: usize,
    },
    /// An absolute seek landed past the end of the buffer.
    SeekOutOfBounds {
        /// Requested position.
        offset: usize,
        /// Buffer length.
        len: usize,
    },
}

impl DecodeError {
    /// Byte offset at which the error was detected.
    pub fn offset(&self) -> usize {
        match self {
            Self::MalformedHeader { offset, .. }
            | Self::TruncatedBuffer { offset, .. }
            | Self::UnsupportedDiscriminant { offset, .. }
            | Self::DecompressionFailure { offset, .. }
            | Self::NoDecodeRouteMatched { offset, .. }
            | Self::FieldConstraintViolation { offset, .. }
            | Self::MalformedVarint { offset }
            | Self::InvalidUtf8 { offset }
            | Self::SeekOutOfBounds { offset, .. } => *offset,
        }
    }

    /// Whether no later section of the file can be trusted after this error.
    ///
    /// Header faults invalidate the whole file; an unknown discriminant
    /// means the byte layout that follows is unknown.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::MalformedHeader { .. } | Self::UnsupportedDiscriminant { .. }
        )
    }

    /// Shift the recorded offset by `base`.
    ///
    /// Used when a sub-buffer was decoded with its own cursor and the
    /// error should point into the enclosing buffer.
    pub fn rebase(mut self, base: usize) -> Self {
        match &mut self {
            Self::MalformedHeader { offset, .. }
            | Self::TruncatedBuffer { offset, .. }
            | Self::UnsupportedDiscriminant { offset, .. }
            | Self::DecompressionFailure { offset, .. }
            | Self::NoDecodeRouteMatched { offset, .. }
            | Self::FieldConstraintViolation { offset, .. }
            | Self::MalformedVarint { offset }
            | Self::InvalidUtf8 { offset }
            | Self::SeekOutOfBounds { offset, .. } => *offset += base,
        }
        self
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedHeader { offset, fault } => {
                write!(f, "malformed header at {offset}: {fault}")
            }
            Self::TruncatedBuffer {
                offset,
                needed,
                available,
            } => write!(
                f,
                "truncated buffer at {offset}: needed {needed} bytes, {available} available"
            ),
            Self::UnsupportedDiscriminant {
                offset,
                kind,
                value,
                table_len,
            } => write!(
                f,
                "unsupported {kind} type {value} at {offset} (table has {table_len} entries)"
            ),
            Self::DecompressionFailure {
                offset,
                codec,
                detail,
            } => write!(f, "{codec} decompression failed at {offset}: {detail}"),
            Self::NoDecodeRouteMatched { attempted, .. } => {
                write!(f, "no decode route matched (tried {})", attempted.join(", "))
            }
            Self::FieldConstraintViolation {
                offset,
                field,
                limit,
                actual,
            } => write!(
                f,
                "field '{field}' at {offset} has length {actual}, limit is {limit}"
            ),
            Self::MalformedVarint { offset } => write!(f, "malformed varint at {offset}"),
            Self::InvalidUtf8 { offset } => write!(f, "invalid UTF-8 string at {offset}"),
            Self::SeekOutOfBounds { offset, len } => {
                write!(f, "seek to {offset} is past the end of a {len}-byte buffer")
            }
        }
    }
}

impl Error for DecodeError {}
