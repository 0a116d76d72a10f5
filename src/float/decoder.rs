use super::{LEADING_FIELD_BITS, LENGTH_FIELD_BITS};
use crate::bitbuffer::BitReader;
use crate::error::DecodeError;

/// The float decompressor.
///
/// Pull-style: [`advance`](Self::advance) moves to the next value and reports
/// whether one is available, [`value`](Self::value) returns it. When
/// `advance` returns `false`, [`error`](Self::error) tells a clean end of
/// stream apart from truncated or corrupt input.
///
/// # Example
/// ```
/// use tscodec::{FloatDecoder, FloatEncoder};
///
/// let mut encoder = FloatEncoder::new();
/// encoder.push(1.0).unwrap();
/// encoder.push(2.0).unwrap();
/// encoder.finish();
///
/// let mut decoder = FloatDecoder::new(encoder.bytes()).unwrap();
/// let mut values = Vec::new();
/// while decoder.advance() {
///     values.push(decoder.value());
/// }
/// assert!(decoder.error().is_none());
/// assert_eq!(values, vec![1.0, 2.0]);
/// ```
#[derive(Debug, Clone)]
pub struct FloatDecoder<'a> {
    reader: BitReader<'a>,
    /// Current value as raw bits.
    value_bits: u64,
    /// Current window, `None` until the stream sends one.
    window: Option<(u8, u8)>,
    /// Whether the raw first value has yet to be handed out.
    first: bool,
    finished: bool,
    err: Option<DecodeError>,
}

impl<'a> FloatDecoder<'a> {
    /// Creates a decoder over a finished stream. Fails if the stream is too
    /// short to hold the first value.
    pub fn new(bytes: &'a [u8]) -> Result<Self, DecodeError> {
        let mut reader = BitReader::new(bytes);
        let value_bits = reader
            .read_bits(64)
            .ok_or(DecodeError::end("initial value"))?;
        // An empty stream holds nothing but the end-of-stream marker.
        let finished = f64::from_bits(value_bits).is_nan();
        Ok(Self {
            reader,
            value_bits,
            window: None,
            first: true,
            finished,
            err: None,
        })
    }

    /// Moves to the next value. Returns `false` at the end of the stream or
    /// after an error, and keeps returning `false` from then on.
    pub fn advance(&mut self) -> bool {
        if self.finished || self.err.is_some() {
            return false;
        }
        if self.first {
            self.first = false;
            return true;
        }
        match self.decode_next() {
            Ok(bits) if f64::from_bits(bits).is_nan() => {
                self.finished = true;
                false
            }
            Ok(bits) => {
                self.value_bits = bits;
                true
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    bit = self.reader.position(),
                    "float stream is corrupt"
                );
                self.err = Some(e);
                false
            }
        }
    }

    /// Returns the value at the current position.
    pub fn value(&self) -> f64 {
        f64::from_bits(self.value_bits)
    }

    /// Returns the error that stopped decoding, if any.
    pub fn error(&self) -> Option<&DecodeError> {
        self.err.as_ref()
    }

    /// Returns `true` once the end-of-stream marker has been read.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn decode_next(&mut self) -> Result<u64, DecodeError> {
        let changed = self
            .reader
            .read_bit()
            .ok_or(DecodeError::end("control bit"))?;
        if !changed {
            return Ok(self.value_bits);
        }

        let new_window = self
            .reader
            .read_bit()
            .ok_or(DecodeError::end("window control bit"))?;
        let (leading, trailing) = if new_window {
            let window = self.read_window()?;
            self.window = Some(window);
            window
        } else {
            self.window.ok_or(DecodeError::MissingWindow)?
        };

        let meaningful_bits = 64 - leading - trailing;
        let meaningful = self
            .reader
            .read_bits(meaningful_bits)
            .ok_or(DecodeError::end("payload"))?;
        Ok(self.value_bits ^ (meaningful << trailing))
    }

    /// Reads a window header, returning `(leading, trailing)`.
    fn read_window(&mut self) -> Result<(u8, u8), DecodeError> {
        let leading = self
            .reader
            .read_bits(LEADING_FIELD_BITS)
            .ok_or(DecodeError::end("window leading zeros"))? as u8;
        let significant = match self
            .reader
            .read_bits(LENGTH_FIELD_BITS)
            .ok_or(DecodeError::end("window length"))?
        {
            0 => 64,
            n => n as u8,
        };
        if leading + significant > 64 {
            return Err(DecodeError::InvalidWindow {
                leading,
                significant,
            });
        }
        Ok((leading, 64 - leading - significant))
    }
}

impl<'a> IntoIterator for FloatDecoder<'a> {
    type Item = Result<f64, DecodeError>;
    type IntoIter = FloatIter<'a>;

    fn into_iter(self) -> FloatIter<'a> {
        FloatIter {
            decoder: self,
            done: false,
        }
    }
}

/// Iterator over the values of a [`FloatDecoder`].
///
/// Yields each value, then at most one error, then stops.
#[derive(Debug, Clone)]
pub struct FloatIter<'a> {
    decoder: FloatDecoder<'a>,
    done: bool,
}

impl Iterator for FloatIter<'_> {
    type Item = Result<f64, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.decoder.advance() {
            return Some(Ok(self.decoder.value()));
        }
        self.done = true;
        self.decoder.error().cloned().map(Err)
    }
}

/// Decodes every value of a finished stream.
pub fn decode_floats(bytes: &[u8]) -> Result<Vec<f64>, DecodeError> {
    let mut decoder = FloatDecoder::new(bytes)?;
    let mut values = Vec::new();
    while decoder.advance() {
        values.push(decoder.value());
    }
    match decoder.err {
        Some(e) => Err(e),
        None => Ok(values),
    }
}
