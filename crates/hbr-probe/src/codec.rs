//! Whole-buffer and concatenated-stream decompression.

use std::io::Read;

use flate2::bufread;
use flate2::read::MultiGzDecoder;
use hbr_core::Codec;

use crate::route::Miss;

/// Codecs whose streams can be chained back to back.
pub(crate) const CHAINABLE: [Codec; 2] = [Codec::Zlib, Codec::RawDeflate];

fn read_capped(mut reader: impl Read, limit: usize) -> Result<Vec<u8>, Miss> {
    let cap = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1);
    let mut out = Vec::new();
    reader
        .by_ref()
        .take(cap)
        .read_to_end(&mut out)
        .map_err(|e| Miss::Codec(e.to_string()))?;
    if out.len() > limit {
        return Err(Miss::Codec(format!("output exceeds {limit} bytes")));
    }
    Ok(out)
}

/// Decompress all of `bytes` as a single stream.
///
/// A zlib or raw deflate stream that ends before the input does is a
/// miss; such input is left to [`concatenated`].
pub(crate) fn decompress(codec: Codec, bytes: &[u8], limit: usize) -> Result<Vec<u8>, Miss> {
    let out = match codec {
        Codec::Zlib | Codec::RawDeflate => {
            let (out, rest) = member(codec, bytes, limit)?;
            if !rest.is_empty() {
                return Err(Miss::Codec(format!(
                    "{} bytes follow the {codec} stream",
                    rest.len()
                )));
            }
            Ok(out)
        }
        Codec::Gzip => read_capped(MultiGzDecoder::new(bytes), limit),
        Codec::Lz4Frame => read_capped(lz4_flex::frame::FrameDecoder::new(bytes), limit),
        Codec::Zstd => {
            let decoder = zstd::stream::read::Decoder::new(bytes)
                .map_err(|e| Miss::Codec(e.to_string()))?;
            read_capped(decoder, limit)
        }
    }?;
    if out.is_empty() {
        return Err(Miss::Empty);
    }
    Ok(out)
}

/// Decompress one stream from the front of `input`, returning the
/// output and the unconsumed remainder.
fn member<'a>(codec: Codec, input: &'a [u8], limit: usize) -> Result<(Vec<u8>, &'a [u8]), Miss> {
    match codec {
        Codec::Zlib => {
            let mut decoder = bufread::ZlibDecoder::new(input);
            let out = read_capped(&mut decoder, limit)?;
            Ok((out, decoder.into_inner()))
        }
        Codec::RawDeflate => {
            let mut decoder = bufread::DeflateDecoder::new(input);
            let out = read_capped(&mut decoder, limit)?;
            Ok((out, decoder.into_inner()))
        }
        other => Err(Miss::Codec(format!("{other} streams are not chained"))),
    }
}

/// Decompress independent streams back to back until `bytes` is
/// exhausted and concatenate their output.
///
/// Every member must decompress. The total output is bounded by `limit`.
pub(crate) fn concatenated(codec: Codec, bytes: &[u8], limit: usize) -> Result<Vec<u8>, Miss> {
    let mut out = Vec::new();
    let mut rest = bytes;
    let mut members = 0usize;
    while !rest.is_empty() {
        let budget = limit.saturating_sub(out.len());
        let (chunk, remainder) = member(codec, rest, budget)?;
        if remainder.len() == rest.len() {
            return Err(Miss::Codec("trailing bytes are not a stream".into()));
        }
        out.extend_from_slice(&chunk);
        rest = remainder;
        members += 1;
    }
    log::trace!("{members} concatenated {codec} members, {} bytes", out.len());
    if out.is_empty() {
        return Err(Miss::Empty);
    }
    Ok(out)
}
