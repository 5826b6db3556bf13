//! Route identity and per-route failure reasons.

use std::fmt;

use hbr_core::Codec;

/// How the bytes handed to a format parser were obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    /// The payload as found.
    Raw,
    /// The payload decompressed as one stream.
    Inflated(Codec),
    /// Independent streams decompressed back to back and concatenated.
    Concatenated(Codec),
}

/// The record format a route parses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// An array of maps, or an object with a `ticks` array.
    Json,
    /// One map per line.
    Ndjson,
    /// A stream of msgpack maps.
    Msgpack,
    /// A stream of CBOR maps.
    Cbor,
    /// `u32` LE length-prefixed blobs, each decoded on its own.
    Framed,
}

impl Format {
    /// Lowercase label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Ndjson => "ndjson",
            Self::Msgpack => "msgpack",
            Self::Cbor => "cbor",
            Self::Framed => "framed",
        }
    }
}

/// The route that produced a probe result.
///
/// Displays as a stable label such as `json`, `zlib+json`,
/// `concat-deflate+ndjson` or `framed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Route {
    /// Where the parsed bytes came from.
    pub source: Source,
    /// How they were parsed.
    pub format: Format,
}

impl Route {
    /// A route over the raw payload.
    pub const fn raw(format: Format) -> Self {
        Self {
            source: Source::Raw,
            format,
        }
    }

    /// The diagnostic label.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source {
            Source::Raw => f.write_str(self.format.label()),
            Source::Inflated(codec) => write!(f, "{codec}+{}", self.format.label()),
            Source::Concatenated(codec) => {
                write!(f, "concat-{codec}+{}", self.format.label())
            }
        }
    }
}

// ── Miss ───────────────────────────────────────────────────────

/// Why a single route did not match. Never surfaced to callers.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Miss {
    /// The bytes are not valid in the route's format.
    Syntax(String),
    /// A record was not a map; holds the kind found instead.
    Shape(&'static str),
    /// The route parsed but produced no records.
    Empty,
    /// The bytes did not decompress.
    Codec(String),
    /// The bytes are not length-framed.
    Unframed,
}

impl fmt::Display for Miss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax(detail) => write!(f, "syntax: {detail}"),
            Self::Shape(found) => write!(f, "expected a map, found {found}"),
            Self::Empty => write!(f, "no records"),
            Self::Codec(detail) => write!(f, "decompression: {detail}"),
            Self::Unframed => write!(f, "not length-framed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(Route::raw(Format::Json).label(), "json");
        assert_eq!(
            Route {
                source: Source::Inflated(Codec::Zlib),
                format: Format::Json
            }
            .label(),
            "zlib+json"
        );
        assert_eq!(
            Route {
                source: Source::Concatenated(Codec::RawDeflate),
                format: Format::Ndjson
            }
            .label(),
            "concat-deflate+ndjson"
        );
        assert_eq!(
            Route {
                source: Source::Inflated(Codec::Lz4Frame),
                format: Format::Framed
            }
            .label(),
            "lz4+framed"
        );
    }
}
