//! Compression and payload signature sniffing.

use std::fmt;

/// A decompression codec understood by the decoders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Codec {
    /// zlib-wrapped deflate (RFC 1950).
    Zlib,
    /// Raw deflate stream without a wrapper (RFC 1951).
    RawDeflate,
    /// gzip member (RFC 1952).
    Gzip,
    /// LZ4 frame format.
    Lz4Frame,
    /// Zstandard frame.
    Zstd,
}

impl Codec {
    /// Every codec in the order the prober tries them.
    pub const ALL: [Codec; 5] = [
        Codec::Zlib,
        Codec::RawDeflate,
        Codec::Gzip,
        Codec::Lz4Frame,
        Codec::Zstd,
    ];

    /// Short lowercase label, used in route names and logs.
    pub fn label(self) -> &'static str {
        match self {
            Self::Zlib => "zlib",
            Self::RawDeflate => "deflate",
            Self::Gzip => "gzip",
            Self::Lz4Frame => "lz4",
            Self::Zstd => "zstd",
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A recognisable payload prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signature {
    /// `1f 8b 08`
    Gzip,
    /// `78 xx` with a valid FCHECK.
    Zlib,
    /// `04 22 4d 18`
    Lz4Frame,
    /// `28 b5 2f fd`
    Zstd,
    /// A literal `{`.
    Json,
}

const GZIP_MAGIC: [u8; 3] = [0x1f, 0x8b, 0x08];
const LZ4_MAGIC: [u8; 4] = [0x04, 0x22, 0x4d, 0x18];
const ZSTD_MAGIC: [u8; 4] = [0x28, 0xb5, 0x2f, 0xfd];

impl Signature {
    /// Classify the start of `bytes`.
    pub fn sniff(bytes: &[u8]) -> Option<Signature> {
        if bytes.starts_with(&GZIP_MAGIC) {
            return Some(Self::Gzip);
        }
        if bytes.starts_with(&LZ4_MAGIC) {
            return Some(Self::Lz4Frame);
        }
        if bytes.starts_with(&ZSTD_MAGIC) {
            return Some(Self::Zstd);
        }
        if is_zlib_header(bytes) {
            return Some(Self::Zlib);
        }
        if bytes.first() == Some(&b'{') {
            return Some(Self::Json);
        }
        None
    }

    /// First offset at or after `from` where a signature begins.
    pub fn find(bytes: &[u8], from: usize) -> Option<(usize, Signature)> {
        (from..bytes.len()).find_map(|i| Self::sniff(&bytes[i..]).map(|sig| (i, sig)))
    }

    /// The codec needed to unwrap this signature, if any.
    pub fn codec(self) -> Option<Codec> {
        match self {
            Self::Gzip => Some(Codec::Gzip),
            Self::Zlib => Some(Codec::Zlib),
            Self::Lz4Frame => Some(Codec::Lz4Frame),
            Self::Zstd => Some(Codec::Zstd),
            Self::Json => None,
        }
    }
}

fn is_zlib_header(bytes: &[u8]) -> bool {
    match bytes {
        [cmf @ 0x78, flg, ..] => (u16::from(*cmf) << 8 | u16::from(*flg)) % 31 == 0,
        _ => false,
    }
}
