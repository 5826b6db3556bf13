//! Test utilities for the HaxBall replay decoders.
//!
//! The decoders have no encode path, so tests build their inputs here:
//! [`WireWriter`] emits the primitive encodings the cursor reads, the
//! [`fixtures`] module writes whole records, and the compression
//! helpers wrap payloads in each supported codec.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::io::Write;

use flate2::write::{DeflateEncoder, GzEncoder, ZlibEncoder};
use flate2::Compression;

pub use fixtures::{GameFixture, PlayerFixture, ReplayFixture, RoomFixture, StadiumFixture};

/// Byte sink with one chainable method per wire primitive.
///
/// Integers are big-endian unless the method name says otherwise;
/// strings are varint-length-prefixed UTF-8.
#[derive(Clone, Debug, Default)]
pub struct WireWriter {
    buf: Vec<u8>,
}

impl WireWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    pub fn u8(&mut self, v: u8) -> &mut Self {
        self.buf.push(v);
        self
    }

    pub fn bool(&mut self, v: bool) -> &mut Self {
        self.u8(u8::from(v))
    }

    pub fn u16(&mut self, v: u16) -> &mut Self {
        self.bytes(&v.to_be_bytes())
    }

    pub fn u32(&mut self, v: u32) -> &mut Self {
        self.bytes(&v.to_be_bytes())
    }

    pub fn u32_le(&mut self, v: u32) -> &mut Self {
        self.bytes(&v.to_le_bytes())
    }

    pub fn i32(&mut self, v: i32) -> &mut Self {
        self.bytes(&v.to_be_bytes())
    }

    pub fn f32_le(&mut self, v: f32) -> &mut Self {
        self.bytes(&v.to_le_bytes())
    }

    pub fn f64(&mut self, v: f64) -> &mut Self {
        self.bytes(&v.to_be_bytes())
    }

    /// Unsigned LEB128.
    pub fn varint(&mut self, mut v: u64) -> &mut Self {
        loop {
            let byte = (v & 0x7f) as u8;
            v >>= 7;
            if v == 0 {
                return self.u8(byte);
            }
            self.u8(byte | 0x80);
        }
    }

    pub fn string(&mut self, s: &str) -> &mut Self {
        self.varint(s.len() as u64).bytes(s.as_bytes())
    }

    /// Presence byte, then the string when `Some`.
    pub fn nullable_string(&mut self, s: Option<&str>) -> &mut Self {
        match s {
            Some(s) => self.u8(1).string(s),
            None => self.u8(0),
        }
    }
}

// ── Compression ─────────────────────────────────────────────────

pub fn deflate_raw(data: &[u8]) -> Vec<u8> {
    let mut enc = DeflateEncoder::new(Vec::new(), Compression::default());
    enc.write_all(data).unwrap();
    enc.finish().unwrap()
}

pub fn deflate_zlib(data: &[u8]) -> Vec<u8> {
    let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
    enc.write_all(data).unwrap();
    enc.finish().unwrap()
}

pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut enc = GzEncoder::new(Vec::new(), Compression::default());
    enc.write_all(data).unwrap();
    enc.finish().unwrap()
}

pub fn lz4_frame(data: &[u8]) -> Vec<u8> {
    let mut enc = lz4_flex::frame::FrameEncoder::new(Vec::new());
    enc.write_all(data).unwrap();
    enc.finish().unwrap()
}

pub fn zstd_frame(data: &[u8]) -> Vec<u8> {
    zstd::encode_all(data, 0).unwrap()
}

/// Concatenate blobs, each prefixed with its little-endian `u32` length.
pub fn length_framed<'a>(blobs: impl IntoIterator<Item = &'a [u8]>) -> Vec<u8> {
    let mut w = WireWriter::new();
    for blob in blobs {
        w.u32_le(blob.len() as u32).bytes(blob);
    }
    w.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn varint_encoding() {
        let mut w = WireWriter::new();
        w.varint(0).varint(127).varint(300);
        assert_eq!(w.as_bytes(), &[0x00, 0x7f, 0xac, 0x02]);
    }

    #[test]
    fn framing_layout() {
        let framed = length_framed([b"ab".as_slice(), b"c".as_slice()]);
        assert_eq!(framed, [2, 0, 0, 0, b'a', b'b', 1, 0, 0, 0, b'c']);
    }
}
