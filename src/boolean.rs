//! Bit-packed boolean encoding.
//!
//! Each compressed slice holds a one-byte header whose high nibble is the
//! encoding tag, a varint count of the booleans in the slice, and then one
//! byte per eight booleans, most-significant bit first. The last byte is
//! padded with zero bits.

use crate::error::DecodeError;
use crate::varint::{put_uvarint, uvarint, MAX_VARINT_LEN};
use crate::Encoding;

/// Packs booleans one bit each.
///
/// # Example
/// ```
/// use tscodec::{BoolDecoder, BoolEncoder};
///
/// let mut encoder = BoolEncoder::new();
/// encoder.write(true);
/// encoder.write(false);
/// let bytes = encoder.bytes();
///
/// let mut decoder = BoolDecoder::new(&bytes).unwrap();
/// assert!(decoder.advance());
/// assert_eq!(decoder.read(), Ok(true));
/// assert!(decoder.advance());
/// assert_eq!(decoder.read(), Ok(false));
/// assert!(!decoder.advance());
/// ```
#[derive(Debug, Clone, Default)]
pub struct BoolEncoder {
    /// Completed bytes.
    bytes: Vec<u8>,
    /// The byte currently being filled, low bits first shifted up.
    current: u8,
    /// Number of booleans packed into `current`.
    pending: u8,
    /// Total number of booleans written.
    count: u64,
}

impl BoolEncoder {
    /// Creates a new, empty `BoolEncoder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a `BoolEncoder` with room for `values` booleans before reallocating.
    pub fn with_capacity(values: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(values.div_ceil(8)),
            ..Self::default()
        }
    }

    /// Appends one boolean.
    pub fn write(&mut self, value: bool) {
        self.current = (self.current << 1) | value as u8;
        self.pending += 1;
        self.count += 1;
        if self.pending == 8 {
            self.bytes.push(self.current);
            self.current = 0;
            self.pending = 0;
        }
    }

    /// Returns the number of booleans written so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Returns `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the encoded slice: header, varint count, packed bits.
    ///
    /// The encoder itself is left untouched, so repeated calls return the same
    /// bytes and later writes are still accepted.
    pub fn bytes(&self) -> Vec<u8> {
        let tail = usize::from(self.pending > 0);
        let mut out = Vec::with_capacity(1 + MAX_VARINT_LEN + self.bytes.len() + tail);
        out.push((Encoding::BitPacked as u8) << 4);
        put_uvarint(&mut out, self.count);
        out.extend_from_slice(&self.bytes);
        if self.pending > 0 {
            out.push(self.current << (8 - self.pending));
        }
        tracing::debug!(count = self.count, bytes = out.len(), "encoded booleans");
        out
    }
}

/// Reads booleans back out of a slice produced by [`BoolEncoder::bytes`].
///
/// Call [`advance`](Self::advance) before every [`read`](Self::read).
#[derive(Debug, Clone)]
pub struct BoolDecoder<'a> {
    /// Packed bits, header and count stripped.
    packed: &'a [u8],
    /// Index of the current boolean, `None` before the first advance.
    cursor: Option<u64>,
    count: u64,
}

impl<'a> BoolDecoder<'a> {
    /// Parses the header and count of an encoded slice.
    pub fn new(bytes: &'a [u8]) -> Result<Self, DecodeError> {
        let (&header, rest) = bytes
            .split_first()
            .ok_or(DecodeError::end("boolean header"))?;
        let tag = header >> 4;
        if tag != Encoding::BitPacked as u8 {
            return Err(DecodeError::UnknownEncoding(tag));
        }
        let (count, used) = uvarint(rest)?;
        Ok(Self {
            packed: &rest[used..],
            cursor: None,
            count,
        })
    }

    /// Moves to the next boolean. Returns `false` once all values have been visited.
    pub fn advance(&mut self) -> bool {
        let next = self.cursor.map_or(0, |i| i.saturating_add(1).min(self.count));
        self.cursor = Some(next);
        next < self.count
    }

    /// Returns the boolean at the current position.
    pub fn read(&self) -> Result<bool, DecodeError> {
        let index = match self.cursor {
            Some(i) if i < self.count => i as usize,
            _ => return Err(DecodeError::NotPositioned),
        };
        let byte = self
            .packed
            .get(index / 8)
            .ok_or(DecodeError::BitOutOfRange {
                index,
                available: self.packed.len() * 8,
            })?;
        let mask = 1u8 << (7 - index % 8);
        Ok(byte & mask == mask)
    }

    /// Returns the number of booleans declared in the header.
    pub fn len(&self) -> u64 {
        self.count
    }

    /// Returns `true` if the slice declares no booleans.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the number of booleans not yet visited.
    pub fn remaining(&self) -> u64 {
        match self.cursor {
            None => self.count,
            Some(i) => self.count.saturating_sub(i.saturating_add(1)),
        }
    }
}

impl Iterator for BoolDecoder<'_> {
    type Item = Result<bool, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.advance() {
            return None;
        }
        let item = self.read();
        if item.is_err() {
            // A corrupt slice stops iteration after reporting once.
            self.cursor = Some(self.count);
            tracing::warn!(count = self.count, "boolean slice shorter than its count");
        }
        Some(item)
    }
}

/// Decodes every boolean in `bytes`.
pub fn decode_bools(bytes: &[u8]) -> Result<Vec<bool>, DecodeError> {
    let decoder = BoolDecoder::new(bytes)?;
    let mut out = Vec::with_capacity(decoder.len().min(bytes.len() as u64 * 8) as usize);
    for value in decoder {
        out.push(value?);
    }
    Ok(out)
}
