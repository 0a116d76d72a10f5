//! XOR-delta float compression.
//!
//! The first value is stored as its raw 64 IEEE 754 bits. Every later value is
//! XORed with its predecessor and written as:
//!
//! | XOR result                         | bits                                         |
//! |------------------------------------|----------------------------------------------|
//! | zero                               | `0`                                          |
//! | fits the previous window           | `10` + meaningful bits                       |
//! | otherwise                          | `11` + 5-bit leading + 6-bit length + bits   |
//!
//! The stream ends with a NaN pushed through the same rules and is then
//! zero-padded to a byte boundary. NaN is therefore not a storable value.

mod decoder;
mod encoder;

pub use decoder::{decode_floats, FloatDecoder, FloatIter};
pub use encoder::FloatEncoder;

/// Width of the leading-zero field in a window header.
pub(crate) const LEADING_FIELD_BITS: u8 = 5;
/// Width of the meaningful-bit-length field in a window header.
pub(crate) const LENGTH_FIELD_BITS: u8 = 6;
/// Largest leading-zero count the 5-bit field can carry. Longer runs are
/// clamped, widening the payload instead.
pub(crate) const MAX_LEADING_ZEROS: u8 = (1 << LEADING_FIELD_BITS) - 1;
/// A 64-bit payload is written as length 0, which is otherwise impossible.
pub(crate) const LENGTH_MASK: u64 = (1 << LENGTH_FIELD_BITS) - 1;
/// Raw bits of the end-of-stream marker.
pub(crate) const END_OF_STREAM: u64 = 0x7FF8_0000_0000_0001;
