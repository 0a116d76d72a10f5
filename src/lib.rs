//! # tscodec
//!
//! Compact, lossless encoders and decoders for two scalar value streams of a
//! time-series storage engine: booleans and 64-bit floats.
//!
//! ## Formats
//!
//! - **Booleans** are bit-packed: a one-byte header carrying the encoding tag
//!   in its high nibble, a varint count, then eight values per byte,
//!   most-significant bit first.
//!
//! - **Floats** use the XOR scheme from Facebook's Gorilla paper (VLDB 2015).
//!   Consecutive samples are XORed and only the changed bits are stored,
//!   inside a leading/trailing zero window that is reused while the changes
//!   keep fitting in it. The stream ends with a NaN marker, so NaN itself
//!   cannot be stored.
//!
//! ## Example
//!
//! ```rust
//! use tscodec::{decode_bools, decode_floats, BoolEncoder, FloatEncoder};
//!
//! let mut floats = FloatEncoder::new();
//! floats.push(1.0).unwrap();
//! floats.push(1.0).unwrap();
//! floats.push(2.0).unwrap();
//! floats.finish();
//! assert_eq!(decode_floats(floats.bytes()).unwrap(), vec![1.0, 1.0, 2.0]);
//!
//! let mut bools = BoolEncoder::new();
//! for b in [true, false, true, true] {
//!     bools.write(b);
//! }
//! let bytes = bools.bytes();
//! assert_eq!(bytes, vec![0x10, 0x04, 0xB0]);
//! assert_eq!(decode_bools(&bytes).unwrap(), vec![true, false, true, true]);
//! ```
//!
//! ## Pull-style decoding
//!
//! Decoders hand out one value at a time and never allocate:
//!
//! ```rust
//! # use tscodec::{FloatDecoder, FloatEncoder};
//! # let mut encoder = FloatEncoder::new();
//! # encoder.push(20.5).unwrap();
//! # encoder.finish();
//! let mut decoder = FloatDecoder::new(encoder.bytes()).unwrap();
//! while decoder.advance() {
//!     println!("{}", decoder.value());
//! }
//! if let Some(err) = decoder.error() {
//!     eprintln!("corrupt block: {err}");
//! }
//! ```

pub mod bitbuffer;
pub mod boolean;
pub mod error;
pub mod float;
pub mod varint;

// Re-export primary types at the crate root.
pub use boolean::{decode_bools, BoolDecoder, BoolEncoder};
pub use error::{DecodeError, EncodeError};
pub use float::{decode_floats, FloatDecoder, FloatEncoder, FloatIter};

/// Format tags stored in the high nibble of a header byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Encoding {
    /// One bit per boolean.
    BitPacked = 1,
}
