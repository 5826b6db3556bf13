//! Payload inflation.

use std::io::Read;

use flate2::read::{DeflateDecoder, ZlibDecoder};
use hbr_core::{Codec, DecodeError, Result};

/// Inflate a zlib-wrapped or raw deflate payload.
///
/// `offset` is the file position of `bytes`, reported on failure.
/// Output larger than `limit` bytes is a
/// [`DecodeError::DecompressionFailure`].
pub fn inflate(codec: Codec, bytes: &[u8], limit: usize, offset: usize) -> Result<Vec<u8>> {
    let fail = |detail: String| DecodeError::DecompressionFailure {
        offset,
        codec,
        detail,
    };
    let cap = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1);
    let mut out = Vec::new();
    let read = match codec {
        Codec::Zlib => ZlibDecoder::new(bytes).take(cap).read_to_end(&mut out),
        Codec::RawDeflate => DeflateDecoder::new(bytes).take(cap).read_to_end(&mut out),
        Codec::Gzip | Codec::Lz4Frame | Codec::Zstd => {
            return Err(fail("not a replay payload codec".into()))
        }
    };
    read.map_err(|e| fail(e.to_string()))?;
    if out.len() > limit {
        return Err(fail(format!("inflated size exceeds {limit} bytes")));
    }
    log::debug!("inflated {} {codec} bytes to {}", bytes.len(), out.len());
    Ok(out)
}
