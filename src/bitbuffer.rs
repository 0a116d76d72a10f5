/// A growable bit buffer that supports writing individual bits and multi-bit
/// values, most-significant bit first. Used as the output of the float encoder.
#[derive(Debug, Clone, Default)]
pub struct BitBuffer {
    bytes: Vec<u8>,
    /// Number of valid bits in the last byte (1..=8, or 0 if empty).
    bit_count: u8,
}

impl BitBuffer {
    /// Creates a new empty `BitBuffer`.
    pub fn new() -> Self {
        Self {
            bytes: Vec::new(),
            bit_count: 0,
        }
    }

    /// Creates a `BitBuffer` with the given pre-allocated capacity in bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            bit_count: 0,
        }
    }

    /// Returns the total number of bits written, including flush padding.
    #[inline]
    pub fn len_bits(&self) -> usize {
        if self.bytes.is_empty() {
            0
        } else {
            (self.bytes.len() - 1) * 8 + self.bit_count as usize
        }
    }

    /// Returns `true` if no bits have been written.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns `true` if the written bits end on a byte boundary.
    #[inline]
    pub fn is_aligned(&self) -> bool {
        self.bit_count == 0 || self.bit_count == 8
    }

    /// Returns a reference to the underlying byte slice. A partially filled
    /// last byte is included with its unwritten low bits set to zero.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the buffer and returns the raw byte vector.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Writes a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) {
        if self.is_aligned() {
            self.bytes.push(0);
            self.bit_count = 0;
        }
        if bit {
            if let Some(last) = self.bytes.last_mut() {
                *last |= 1 << (7 - self.bit_count);
            }
        }
        self.bit_count += 1;
    }

    /// Writes the lowest `n` bits of `value` (big-endian order). `n` must be <= 64.
    pub fn write_bits(&mut self, value: u64, n: u8) {
        debug_assert!(n <= 64);
        for i in (0..n).rev() {
            self.write_bit((value >> i) & 1 == 1);
        }
    }

    /// Pads the partially filled last byte with `pad` bits up to the next byte
    /// boundary. Does nothing when already aligned.
    pub fn flush(&mut self, pad: bool) {
        while !self.is_aligned() {
            self.write_bit(pad);
        }
    }
}

/// A cursor for reading bits sequentially from a byte slice.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    bytes: &'a [u8],
    /// Total number of valid bits.
    total_bits: usize,
    /// Current bit position (0-indexed from the start).
    pos: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a `BitReader` over every bit of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            total_bits: bytes.len() * 8,
            pos: 0,
        }
    }

    /// Returns the number of bits consumed so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of bits remaining.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.total_bits.saturating_sub(self.pos)
    }

    /// Returns `true` if there are no more bits to read.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.total_bits
    }

    /// Reads a single bit. Returns `None` if exhausted.
    #[inline]
    pub fn read_bit(&mut self) -> Option<bool> {
        if self.pos >= self.total_bits {
            return None;
        }
        let byte_idx = self.pos / 8;
        let bit_idx = self.pos % 8;
        self.pos += 1;
        Some((self.bytes[byte_idx] >> (7 - bit_idx)) & 1 == 1)
    }

    /// Reads `n` bits as a `u64` (big-endian). Returns `None` without consuming
    /// anything if not enough bits remain.
    pub fn read_bits(&mut self, n: u8) -> Option<u64> {
        debug_assert!(n <= 64);
        if self.remaining() < n as usize {
            return None;
        }
        let mut value: u64 = 0;
        for _ in 0..n {
            value = (value << 1) | (self.read_bit()? as u64);
        }
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_and_read_bits() {
        let mut buf = BitBuffer::new();
        buf.write_bit(true);
        buf.write_bit(false);
        buf.write_bit(true);
        buf.write_bit(true);
        assert_eq!(buf.len_bits(), 4);
        assert_eq!(buf.as_bytes(), &[0b1011_0000]);

        let mut reader = BitReader::new(buf.as_bytes());
        assert_eq!(reader.read_bit(), Some(true));
        assert_eq!(reader.read_bit(), Some(false));
        assert_eq!(reader.read_bit(), Some(true));
        assert_eq!(reader.read_bit(), Some(true));
        assert_eq!(reader.remaining(), 4);
    }

    #[test]
    fn test_write_and_read_multi_bits() {
        let mut buf = BitBuffer::new();
        buf.write_bits(0b11010, 5);
        buf.write_bits(0xFF, 8);
        buf.write_bits(0x00, 8);
        assert_eq!(buf.len_bits(), 21);

        let mut reader = BitReader::new(buf.as_bytes());
        assert_eq!(reader.read_bits(5), Some(0b11010));
        assert_eq!(reader.read_bits(8), Some(0xFF));
        assert_eq!(reader.read_bits(8), Some(0x00));
        assert_eq!(reader.position(), 21);
    }

    #[test]
    fn test_64_bit_value() {
        let mut buf = BitBuffer::new();
        let val: u64 = 0xDEAD_BEEF_CAFE_BABE;
        buf.write_bits(val, 64);
        assert_eq!(buf.len_bits(), 64);

        let mut reader = BitReader::new(buf.as_bytes());
        assert_eq!(reader.read_bits(64), Some(val));
        assert!(reader.is_exhausted());
    }

    #[test]
    fn test_zero_width_write_is_noop() {
        let mut buf = BitBuffer::new();
        buf.write_bits(u64::MAX, 0);
        assert!(buf.is_empty());

        let mut reader = BitReader::new(&[]);
        assert_eq!(reader.read_bits(0), Some(0));
    }

    #[test]
    fn test_empty_buffer() {
        let buf = BitBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.len_bits(), 0);

        let mut reader = BitReader::new(buf.as_bytes());
        assert!(reader.is_exhausted());
        assert_eq!(reader.read_bit(), None);
    }

    #[test]
    fn test_flush_pads_to_byte_boundary() {
        let mut buf = BitBuffer::new();
        buf.write_bits(0b101, 3);
        buf.flush(false);
        assert_eq!(buf.len_bits(), 8);
        assert_eq!(buf.as_bytes(), &[0b1010_0000]);

        buf.write_bit(true);
        buf.flush(true);
        assert_eq!(buf.as_bytes(), &[0b1010_0000, 0xFF]);
    }

    #[test]
    fn test_flush_when_aligned_is_noop() {
        let mut buf = BitBuffer::new();
        buf.flush(true);
        assert!(buf.is_empty());

        buf.write_bits(0xAB, 8);
        buf.flush(true);
        assert_eq!(buf.as_bytes(), &[0xAB]);
    }

    #[test]
    fn test_short_read_consumes_nothing() {
        let mut reader = BitReader::new(&[0xF0]);
        assert_eq!(reader.read_bits(9), None);
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.read_bits(4), Some(0xF));
    }
}
