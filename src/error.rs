use thiserror::Error;

/// Error returned when a value cannot be added to an encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// NaN is reserved as the float stream's end-of-stream marker.
    #[error("NaN cannot be encoded: it is reserved as the end-of-stream marker")]
    NanValue,
    /// The encoder was already finished.
    #[error("cannot push after finish()")]
    Finished,
}

/// Error type for decoding failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The compressed stream ended while a field was being read.
    #[error("unexpected end of compressed stream while reading {context}")]
    UnexpectedEnd { context: &'static str },
    /// The header carries a format tag this crate does not implement.
    #[error("unknown encoding tag {0}")]
    UnknownEncoding(u8),
    /// The varint is longer than ten bytes or overflows a u64.
    #[error("varint overflows u64")]
    VarintOverflow,
    /// A bit index points past the end of the packed region.
    #[error("bit {index} is out of range ({available} bits available)")]
    BitOutOfRange { index: usize, available: usize },
    /// A window header describes more than 64 bits.
    #[error("invalid window: {leading} leading zeros with {significant} significant bits")]
    InvalidWindow { leading: u8, significant: u8 },
    /// A value asked to reuse a window before any window was sent.
    #[error("window reuse before any window was established")]
    MissingWindow,
    /// `read()` was called without a successful `advance()`.
    #[error("decoder is not positioned on a value")]
    NotPositioned,
}

impl DecodeError {
    pub(crate) fn end(context: &'static str) -> Self {
        DecodeError::UnexpectedEnd { context }
    }
}
