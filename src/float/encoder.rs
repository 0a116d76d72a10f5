use super::{
    END_OF_STREAM, LEADING_FIELD_BITS, LENGTH_FIELD_BITS, LENGTH_MASK, MAX_LEADING_ZEROS,
};
use crate::bitbuffer::BitBuffer;
use crate::error::{DecodeError, EncodeError};
use crate::float::FloatDecoder;

/// Marks the leading/trailing window as not yet established.
const WINDOW_UNSET: u8 = u8::MAX;

/// The float compressor.
///
/// # Example
/// ```
/// use tscodec::{decode_floats, FloatEncoder};
///
/// let mut encoder = FloatEncoder::new();
/// encoder.push(12.0).unwrap();
/// encoder.push(12.5).unwrap();
/// encoder.push(13.0).unwrap();
/// encoder.finish();
///
/// let values = decode_floats(encoder.bytes()).unwrap();
/// assert_eq!(values, vec![12.0, 12.5, 13.0]);
/// ```
#[derive(Debug, Clone)]
pub struct FloatEncoder {
    buf: BitBuffer,
    /// Number of values pushed, not counting the end-of-stream marker.
    count: u64,
    /// Previous value as raw bits.
    prev_value_bits: u64,
    /// Number of leading zeros in the current window.
    prev_leading_zeros: u8,
    /// Number of trailing zeros in the current window.
    prev_trailing_zeros: u8,
    /// Whether the next value is written raw.
    first: bool,
    /// Whether `finish()` has been called.
    finished: bool,
}

impl FloatEncoder {
    /// Creates a new `FloatEncoder` with a default buffer.
    pub fn new() -> Self {
        Self::with_capacity(128)
    }

    /// Creates a new `FloatEncoder` with `capacity` bytes pre-allocated.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BitBuffer::with_capacity(capacity),
            count: 0,
            prev_value_bits: 0,
            prev_leading_zeros: WINDOW_UNSET,
            prev_trailing_zeros: WINDOW_UNSET,
            first: true,
            finished: false,
        }
    }

    /// Appends a value to the stream.
    ///
    /// NaN is rejected because it marks the end of the stream, and no value
    /// is accepted once the encoder is finished.
    pub fn push(&mut self, value: f64) -> Result<(), EncodeError> {
        if self.finished {
            return Err(EncodeError::Finished);
        }
        if value.is_nan() {
            return Err(EncodeError::NanValue);
        }
        self.push_bits(value.to_bits());
        self.count += 1;
        Ok(())
    }

    /// Writes the end-of-stream marker and pads the stream to a whole byte.
    /// Calling it again has no effect.
    pub fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.push_bits(END_OF_STREAM);
        self.buf.flush(false);
        self.finished = true;
        tracing::debug!(
            count = self.count,
            bits = self.buf.len_bits(),
            "finished float stream"
        );
    }

    /// Returns `true` once `finish()` has been called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Returns the number of values pushed so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Returns `true` if no values have been pushed.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the number of bits written so far.
    pub fn len_bits(&self) -> usize {
        self.buf.len_bits()
    }

    /// Returns the encoded bytes. Only a finished stream is complete.
    pub fn bytes(&self) -> &[u8] {
        self.buf.as_bytes()
    }

    /// Consumes the encoder and returns the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf.into_bytes()
    }

    /// Returns a decoder over the bytes written so far.
    pub fn decoder(&self) -> Result<FloatDecoder<'_>, DecodeError> {
        FloatDecoder::new(self.bytes())
    }

    // ── internal helpers ───────────────────────────────────────────────

    fn push_bits(&mut self, bits: u64) {
        if self.first {
            self.buf.write_bits(bits, 64);
            self.prev_value_bits = bits;
            self.first = false;
            return;
        }

        let xor = bits ^ self.prev_value_bits;
        if xor == 0 {
            self.buf.write_bit(false);
        } else {
            self.buf.write_bit(true); // '1' — value changed
            self.encode_xor(xor);
        }
        self.prev_value_bits = bits;
    }

    /// Writes a non-zero XOR, reusing the current window when the meaningful
    /// bits fall inside it.
    fn encode_xor(&mut self, xor: u64) {
        let leading = (xor.leading_zeros() as u8).min(MAX_LEADING_ZEROS);
        let trailing = xor.trailing_zeros() as u8;

        if self.prev_leading_zeros != WINDOW_UNSET
            && leading >= self.prev_leading_zeros
            && trailing >= self.prev_trailing_zeros
        {
            self.buf.write_bit(false); // '0' — reuse window
            let meaningful_bits = 64 - self.prev_leading_zeros - self.prev_trailing_zeros;
            self.buf
                .write_bits(xor >> self.prev_trailing_zeros, meaningful_bits);
        } else {
            self.buf.write_bit(true); // '1' — new window
            let meaningful_bits = 64 - leading - trailing;
            self.buf.write_bits(leading as u64, LEADING_FIELD_BITS);
            self.buf
                .write_bits(meaningful_bits as u64 & LENGTH_MASK, LENGTH_FIELD_BITS);
            self.buf.write_bits(xor >> trailing, meaningful_bits);

            tracing::trace!(leading, trailing, "new float window");
            self.prev_leading_zeros = leading;
            self.prev_trailing_zeros = trailing;
        }
    }
}

impl Default for FloatEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_value_is_raw() {
        let mut enc = FloatEncoder::new();
        enc.push(1.0).unwrap();
        assert_eq!(enc.len_bits(), 64);
        assert_eq!(enc.bytes(), &1.0f64.to_bits().to_be_bytes());
    }

    #[test]
    fn test_repeated_value_costs_one_bit() {
        let mut enc = FloatEncoder::new();
        enc.push(42.0).unwrap();
        for _ in 0..10 {
            enc.push(42.0).unwrap();
        }
        assert_eq!(enc.len_bits(), 64 + 10);
        assert_eq!(enc.count(), 11);
    }

    #[test]
    fn test_new_window_header() {
        let mut enc = FloatEncoder::new();
        enc.push(1.0).unwrap();
        enc.push(2.0).unwrap();
        // 1.0 ^ 2.0 = 0x7FF0_0000_0000_0000: 1 leading zero, 52 trailing, 11 meaningful.
        assert_eq!(enc.len_bits(), 64 + 2 + 5 + 6 + 11);
        assert_eq!(enc.prev_leading_zeros, 1);
        assert_eq!(enc.prev_trailing_zeros, 52);
    }

    #[test]
    fn test_window_reuse() {
        let mut enc = FloatEncoder::new();
        enc.push(1.0).unwrap();
        enc.push(2.0).unwrap();
        let before = enc.len_bits();
        // 2.0 ^ 4.0 = 0x0010_0000_0000_0000 fits inside the 11-bit window.
        enc.push(4.0).unwrap();
        assert_eq!(enc.len_bits() - before, 2 + 11);
    }

    #[test]
    fn test_leading_zeros_clamped() {
        let mut enc = FloatEncoder::new();
        enc.push(f64::from_bits(0)).unwrap();
        enc.push(f64::from_bits(1)).unwrap();
        // 63 leading zeros are stored as 31, leaving 33 meaningful bits.
        assert_eq!(enc.prev_leading_zeros, MAX_LEADING_ZEROS);
        assert_eq!(enc.prev_trailing_zeros, 0);
        assert_eq!(enc.len_bits(), 64 + 2 + 5 + 6 + 33);
    }

    #[test]
    fn test_full_width_window() {
        let mut enc = FloatEncoder::new();
        enc.push(f64::from_bits(0x0000_0000_0000_0000)).unwrap();
        enc.push(f64::from_bits(0x8000_0000_0000_0001)).unwrap();
        assert_eq!(enc.len_bits(), 64 + 2 + 5 + 6 + 64);
    }

    #[test]
    fn test_rejects_nan() {
        let mut enc = FloatEncoder::new();
        assert_eq!(enc.push(f64::NAN), Err(EncodeError::NanValue));
        assert!(enc.is_empty());
        assert_eq!(enc.len_bits(), 0);
    }

    #[test]
    fn test_finish_is_idempotent() {
        let mut enc = FloatEncoder::new();
        enc.push(3.5).unwrap();
        enc.finish();
        let bytes = enc.bytes().to_vec();
        enc.finish();
        assert_eq!(enc.bytes(), bytes.as_slice());
        assert!(enc.is_finished());
        assert_eq!(enc.len_bits() % 8, 0);
    }

    #[test]
    fn test_push_after_finish() {
        let mut enc = FloatEncoder::new();
        enc.finish();
        assert_eq!(enc.push(1.0), Err(EncodeError::Finished));
        assert_eq!(enc.count(), 0);
    }
}
