//! Container header resolution.
//!
//! ```text
//! HBR2 / HBRP : [MAGIC 4] [VERSION 4] [DURATION 4] [payload ...]
//! legacy HBRP : [VERSION 4] [MAGIC 4] [DURATION 4] [payload ...]
//! ```
//!
//! The version field has been written in both byte orders over the
//! format's history, so both readings are computed and the plausible
//! one wins. The duration is then read in the same order.

use std::ops::RangeInclusive;

use crate::error::{DecodeError, HeaderFault, Result};
use crate::signature::Signature;

/// Versions considered plausible when resolving byte order.
pub const PLAUSIBLE_VERSIONS: RangeInclusive<u32> = 1..=99;

/// Offset of the payload in the canonical layout.
pub const CANONICAL_PAYLOAD_OFFSET: usize = 12;

/// Offset just past magic and version.
pub const MAGIC_VERSION_LEN: usize = 8;

/// The container flavour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Magic {
    /// `HBR2`, the current container.
    Hbr2,
    /// `HBRP`, the legacy container.
    Hbrp,
}

impl Magic {
    /// The four magic bytes.
    pub fn bytes(self) -> &'static [u8; 4] {
        match self {
            Self::Hbr2 => b"HBR2",
            Self::Hbrp => b"HBRP",
        }
    }
}

/// Where the magic sits relative to the version.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// Magic at 0, version at 4.
    MagicFirst,
    /// Version at 0, magic at 4 (older `HBRP` writers).
    VersionFirst,
}

/// Byte order of the header integers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteOrder {
    /// Most significant byte first.
    Big,
    /// Least significant byte first.
    Little,
}

impl ByteOrder {
    /// Interpret four bytes in this order.
    pub fn u32(self, bytes: [u8; 4]) -> u32 {
        match self {
            Self::Big => u32::from_be_bytes(bytes),
            Self::Little => u32::from_le_bytes(bytes),
        }
    }
}

/// How [`ContainerHeader::resolve`] locates the payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PayloadScan {
    /// Payload directly follows the duration field.
    Fixed,
    /// Scan for the first compression or JSON signature after the version.
    Signatures,
}

/// The fixed fields at the start of every replay file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainerHeader {
    /// Container flavour.
    pub magic: Magic,
    /// Field order.
    pub layout: Layout,
    /// Format version.
    pub version: u32,
    /// Byte order the version was written in.
    pub byte_order: ByteOrder,
    /// Replay length in frames, when the file is long enough to hold it.
    pub duration: Option<u32>,
}

/// A header plus the slices it delimits.
#[derive(Clone, Debug)]
pub struct ResolvedContainer<'a> {
    /// The parsed header.
    pub header: ContainerHeader,
    /// Opaque bytes between the version field and the payload.
    pub header_bytes: &'a [u8],
    /// Payload bytes, still compressed.
    pub payload: &'a [u8],
    /// File offset of `payload`.
    pub payload_offset: usize,
    /// Signature found at the payload start, if any.
    pub signature: Option<Signature>,
}

fn quad(bytes: &[u8], at: usize) -> Option<[u8; 4]> {
    bytes.get(at..at + 4)?.try_into().ok()
}

impl ContainerHeader {
    /// Parse magic, version and duration.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let (Some(first), Some(second)) = (quad(bytes, 0), quad(bytes, 4)) else {
            return Err(DecodeError::MalformedHeader {
                offset: 0,
                fault: HeaderFault::TooShort { len: bytes.len() },
            });
        };

        let (magic, layout, version_at) = match (&first, &second) {
            (b"HBR2", _) => (Magic::Hbr2, Layout::MagicFirst, 4),
            (b"HBRP", _) => (Magic::Hbrp, Layout::MagicFirst, 4),
            (_, b"HBRP") => (Magic::Hbrp, Layout::VersionFirst, 0),
            _ => {
                return Err(DecodeError::MalformedHeader {
                    offset: 0,
                    fault: HeaderFault::BadMagic { found: first },
                })
            }
        };
        let version_bytes = if version_at == 0 { first } else { second };
        let (version, byte_order) = resolve_version(version_bytes, version_at)?;
        let duration = quad(bytes, MAGIC_VERSION_LEN).map(|d| byte_order.u32(d));

        log::debug!(
            "container {magic:?} ({layout:?}) version {version} ({byte_order:?}), duration {duration:?}"
        );
        Ok(Self {
            magic,
            layout,
            version,
            byte_order,
            duration,
        })
    }

    /// Parse the header and split off the payload.
    pub fn resolve(bytes: &[u8], scan: PayloadScan) -> Result<ResolvedContainer<'_>> {
        let header = Self::parse(bytes)?;
        let payload_offset = match scan {
            PayloadScan::Fixed => {
                if bytes.len() < CANONICAL_PAYLOAD_OFFSET {
                    return Err(DecodeError::TruncatedBuffer {
                        offset: MAGIC_VERSION_LEN,
                        needed: CANONICAL_PAYLOAD_OFFSET - MAGIC_VERSION_LEN,
                        available: bytes.len() - MAGIC_VERSION_LEN,
                    });
                }
                CANONICAL_PAYLOAD_OFFSET
            }
            PayloadScan::Signatures => Signature::find(bytes, MAGIC_VERSION_LEN)
                .map(|(at, _)| at)
                .unwrap_or(MAGIC_VERSION_LEN),
        };
        let payload = &bytes[payload_offset..];
        Ok(ResolvedContainer {
            header,
            header_bytes: &bytes[MAGIC_VERSION_LEN..payload_offset],
            payload,
            payload_offset,
            signature: Signature::sniff(payload),
        })
    }
}

fn resolve_version(bytes: [u8; 4], offset: usize) -> Result<(u32, ByteOrder)> {
    let big_endian = u32::from_be_bytes(bytes);
    let little_endian = u32::from_le_bytes(bytes);
    if PLAUSIBLE_VERSIONS.contains(&big_endian) {
        Ok((big_endian, ByteOrder::Big))
    } else if PLAUSIBLE_VERSIONS.contains(&little_endian) {
        Ok((little_endian, ByteOrder::Little))
    } else {
        Err(DecodeError::MalformedHeader {
            offset,
            fault: HeaderFault::AmbiguousVersion {
                big_endian,
                little_endian,
            },
        })
    }
}
