//! Unsigned LEB128 varints: seven payload bits per byte, low groups first,
//! high bit set on every byte except the last.

use crate::error::DecodeError;

/// Longest encoding of a `u64`.
pub const MAX_VARINT_LEN: usize = 10;

/// Appends the varint encoding of `n` to `buf` and returns the number of bytes written.
pub fn put_uvarint(buf: &mut Vec<u8>, mut n: u64) -> usize {
    let start = buf.len();
    loop {
        let mut byte = (n & 0x7F) as u8;
        n >>= 7;
        if n != 0 {
            byte |= 0x80;
        }
        buf.push(byte);
        if n == 0 {
            break;
        }
    }
    buf.len() - start
}

/// Decodes a varint from the front of `bytes`, returning the value and the
/// number of bytes consumed.
pub fn uvarint(bytes: &[u8]) -> Result<(u64, usize), DecodeError> {
    let mut n: u64 = 0;
    let mut shift = 0u32;
    for (i, &byte) in bytes.iter().enumerate() {
        if i == MAX_VARINT_LEN - 1 && byte > 1 {
            // Tenth byte may only contribute the top bit of a u64.
            return Err(DecodeError::VarintOverflow);
        }
        n |= ((byte & 0x7F) as u64) << shift;
        if byte & 0x80 == 0 {
            return Ok((n, i + 1));
        }
        shift += 7;
    }
    Err(DecodeError::end("varint"))
}
