//! Bounds-checked, position-tracking reader over an in-memory buffer.
//!
//! Every read either succeeds and advances, or fails with a
//! [`DecodeError`] and leaves the position where it was. Nothing is
//! ever silently truncated or zero-filled.

use crate::error::{DecodeError, Result};

/// Largest accumulated shift a varint may reach before it is treated
/// as corrupt.
pub const MAX_VARINT_SHIFT: u32 = 35;

/// A forward reader over a borrowed byte buffer.
///
/// Cloning (or [`fork`](Self::fork)ing) a cursor is cheap and yields an
/// independent position over the same bytes, which is how optional
/// sections are trial-decoded.
#[derive(Clone, Debug)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    /// Start reading `buf` at offset 0.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current read offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Total buffer length.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the buffer holds no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Whether every byte has been consumed.
    pub fn is_eof(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// The whole underlying buffer.
    pub fn buffer(&self) -> &'a [u8] {
        self.buf
    }

    /// The unread tail, without advancing.
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    /// An independent cursor at the same position.
    pub fn fork(&self) -> Self {
        self.clone()
    }

    /// Move to an absolute offset. Seeking to exactly the end is allowed.
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos > self.buf.len() {
            return Err(DecodeError::SeekOutOfBounds {
                offset: pos,
                len: self.buf.len(),
            });
        }
        self.pos = pos;
        Ok(())
    }

    /// Advance by `n` bytes.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.take(n).map(|_| ())
    }

    /// Run `f`, restoring the position if it fails.
    ///
    /// Composite reads (strings, varints, nullable values) go through
    /// here so a failure never leaves the cursor mid-field.
    pub fn atomically<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let start = self.pos;
        let result = f(self);
        if result.is_err() {
            self.pos = start;
        }
        result
    }

    // ── Raw bytes ───────────────────────────────────────────────

    fn truncated(&self, needed: usize) -> DecodeError {
        DecodeError::TruncatedBuffer {
            offset: self.pos,
            needed,
            available: self.remaining(),
        }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(self.truncated(n));
        }
        let bytes = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Read `n` raw bytes.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.take(n)
    }

    /// Look at the next `n` bytes without advancing.
    pub fn peek_bytes(&self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(self.truncated(n));
        }
        Ok(&self.buf[self.pos..self.pos + n])
    }

    /// Look at the next byte without advancing.
    pub fn peek_u8(&self) -> Result<u8> {
        self.peek_bytes(1).map(|b| b[0])
    }

    // ── Fixed-width integers ────────────────────────────────────

    /// Read one byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        self.array::<1>().map(|b| b[0])
    }

    /// Read one signed byte.
    pub fn read_i8(&mut self) -> Result<i8> {
        self.array::<1>().map(i8::from_be_bytes)
    }

    /// Read a byte as a flag; any non-zero value is `true`.
    pub fn read_bool(&mut self) -> Result<bool> {
        self.read_u8().map(|b| b != 0)
    }

    /// Read a big-endian u16.
    pub fn read_u16_be(&mut self) -> Result<u16> {
        self.array().map(u16::from_be_bytes)
    }

    /// Read a little-endian u16.
    pub fn read_u16_le(&mut self) -> Result<u16> {
        self.array().map(u16::from_le_bytes)
    }

    /// Read a big-endian i16.
    pub fn read_i16_be(&mut self) -> Result<i16> {
        self.array().map(i16::from_be_bytes)
    }

    /// Read a little-endian i16.
    pub fn read_i16_le(&mut self) -> Result<i16> {
        self.array().map(i16::from_le_bytes)
    }

    /// Read a big-endian u32.
    pub fn read_u32_be(&mut self) -> Result<u32> {
        self.array().map(u32::from_be_bytes)
    }

    /// Read a little-endian u32.
    pub fn read_u32_le(&mut self) -> Result<u32> {
        self.array().map(u32::from_le_bytes)
    }

    /// Read a big-endian i32.
    pub fn read_i32_be(&mut self) -> Result<i32> {
        self.array().map(i32::from_be_bytes)
    }

    /// Read a little-endian i32.
    pub fn read_i32_le(&mut self) -> Result<i32> {
        self.array().map(i32::from_le_bytes)
    }

    // ── Floats ──────────────────────────────────────────────────

    /// Read a little-endian f32.
    pub fn read_f32_le(&mut self) -> Result<f32> {
        self.array().map(f32::from_le_bytes)
    }

    /// Read a big-endian f64.
    pub fn read_f64_be(&mut self) -> Result<f64> {
        self.array().map(f64::from_be_bytes)
    }

    /// Read a big-endian f64, mapping NaN to `0.0`.
    pub fn read_f64_be_nan_zero(&mut self) -> Result<f64> {
        self.read_f64_be()
            .map(|v| if v.is_nan() { 0.0 } else { v })
    }

    // ── Variable-length values ──────────────────────────────────

    /// Read an unsigned LEB128 varint.
    ///
    /// Fails with [`DecodeError::MalformedVarint`] once the shift would
    /// exceed [`MAX_VARINT_SHIFT`].
    pub fn read_varint(&mut self) -> Result<u64> {
        let start = self.pos;
        self.atomically(|c| {
            let mut value = 0u64;
            let mut shift = 0u32;
            loop {
                let byte = c.read_u8()?;
                value |= u64::from(byte & 0x7f) << shift;
                if byte & 0x80 == 0 {
                    return Ok(value);
                }
                shift += 7;
                if shift > MAX_VARINT_SHIFT {
                    return Err(DecodeError::MalformedVarint { offset: start });
                }
            }
        })
    }

    /// Read a varint and convert it to a length.
    pub fn read_varint_len(&mut self) -> Result<usize> {
        let start = self.pos;
        let value = self.read_varint()?;
        usize::try_from(value).map_err(|_| DecodeError::MalformedVarint { offset: start })
    }

    /// Read exactly `n` bytes as UTF-8.
    pub fn read_fixed_str(&mut self, n: usize) -> Result<&'a str> {
        self.atomically(|c| {
            let offset = c.pos;
            let bytes = c.take(n)?;
            std::str::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8 { offset })
        })
    }

    /// Read a varint byte length followed by that many UTF-8 bytes.
    pub fn read_string(&mut self) -> Result<String> {
        self.atomically(|c| {
            let len = c.read_varint_len()?;
            c.read_fixed_str(len).map(str::to_owned)
        })
    }

    /// Read a string and reject it if it has more than `max_chars` characters.
    pub fn read_string_max(&mut self, field: &'static str, max_chars: usize) -> Result<String> {
        let offset = self.pos;
        self.atomically(|c| {
            let s = c.read_string()?;
            check_max_chars(&s, offset, field, max_chars)?;
            Ok(s)
        })
    }

    /// Read a presence byte, then the value if the byte is non-zero.
    ///
    /// An absent value consumes only the presence byte.
    pub fn read_nullable<T>(
        &mut self,
        read: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<Option<T>> {
        self.atomically(|c| {
            if c.read_bool()? {
                read(c).map(Some)
            } else {
                Ok(None)
            }
        })
    }

    /// A presence-gated string.
    pub fn read_nullable_string(&mut self) -> Result<Option<String>> {
        self.read_nullable(Self::read_string)
    }

    /// A presence-gated string with a character limit.
    pub fn read_nullable_string_max(
        &mut self,
        field: &'static str,
        max_chars: usize,
    ) -> Result<Option<String>> {
        self.read_nullable(|c| c.read_string_max(field, max_chars))
    }

    /// A presence-gated big-endian i32.
    pub fn read_nullable_i32_be(&mut self) -> Result<Option<i32>> {
        self.read_nullable(Self::read_i32_be)
    }
}

fn check_max_chars(s: &str, offset: usize, field: &'static str, limit: usize) -> Result<()> {
    let actual = s.chars().count();
    if actual > limit {
        return Err(DecodeError::FieldConstraintViolation {
            offset,
            field,
            limit,
            actual,
        });
    }
    Ok(())
}
