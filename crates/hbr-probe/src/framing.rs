//! Length-prefixed framing: `([len u32 LE] [blob])*`.

use hbr_core::ByteCursor;

use crate::route::Miss;

/// Largest blob length accepted by default: 64 MiB.
pub const MAX_FRAME_LEN: usize = 64 << 20;

/// Split `bytes` into blobs.
///
/// Each length must lie in `1..=max_len` and fit in the remaining
/// bytes. A trailing residue shorter than a length field is ignored.
/// Anything else means the buffer is not framed.
pub(crate) fn split(bytes: &[u8], max_len: usize) -> Result<Vec<&[u8]>, Miss> {
    let mut c = ByteCursor::new(bytes);
    let mut blobs = Vec::new();
    while c.remaining() >= 4 {
        let len = c.read_u32_le().map_err(|_| Miss::Unframed)? as usize;
        if len == 0 || len > max_len {
            return Err(Miss::Unframed);
        }
        blobs.push(c.read_bytes(len).map_err(|_| Miss::Unframed)?);
    }
    if blobs.is_empty() {
        return Err(Miss::Unframed);
    }
    Ok(blobs)
}
