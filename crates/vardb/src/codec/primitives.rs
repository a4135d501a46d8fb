//! Primitive encoding/decoding for the variable database format.
//!
//! Implements the 7-bit encoded length, little-endian scalars and
//! length-prefixed strings that every value is built from.

use crate::error::{DecodeError, EncodeError};
use crate::limits::{MAX_VARINT_BYTES, MAX_WIRE_LEN};

// =============================================================================
// DECODING
// =============================================================================

/// Reader for decoding binary data.
///
/// Wraps a byte slice and provides methods for reading primitives
/// with bounds checking. Every error carries the offset it was raised at.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader from a byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the current position in the data.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Moves the cursor to an absolute position, clamped to the end of data.
    pub fn seek(&mut self, pos: usize) {
        self.pos = pos.min(self.data.len());
    }

    /// Returns the total length of the underlying data.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns the number of remaining bytes.
    pub fn remaining_len(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns true if all data has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Returns the byte at an absolute position without moving the cursor.
    pub fn byte_at(&self, pos: usize) -> Option<u8> {
        self.data.get(pos).copied()
    }

    /// Reads a single byte.
    #[inline]
    pub fn read_byte(&mut self, context: &'static str) -> Result<u8, DecodeError> {
        let Some(&byte) = self.data.get(self.pos) else {
            return Err(DecodeError::UnexpectedEof {
                context,
                offset: self.pos,
            });
        };
        self.pos += 1;
        Ok(byte)
    }

    /// Reads exactly n bytes.
    #[inline]
    pub fn read_bytes(&mut self, n: usize, context: &'static str) -> Result<&'a [u8], DecodeError> {
        if n > self.remaining_len() {
            return Err(DecodeError::UnexpectedEof {
                context,
                offset: self.pos,
            });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Reads exactly N bytes into an array.
    #[inline]
    pub fn read_array<const N: usize>(&mut self, context: &'static str) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N, context)?);
        Ok(out)
    }

    /// Skips n bytes.
    pub fn skip(&mut self, n: usize, context: &'static str) -> Result<(), DecodeError> {
        self.read_bytes(n, context).map(|_| ())
    }

    /// Reads a 7-bit encoded unsigned length.
    ///
    /// Each byte contributes its low 7 bits, least significant group first;
    /// a set high bit means another byte follows.
    #[inline]
    pub fn read_varint(&mut self, context: &'static str) -> Result<u32, DecodeError> {
        let start = self.pos;
        let mut result: u32 = 0;

        for i in 0..MAX_VARINT_BYTES - 1 {
            let byte = self.read_byte(context)?;
            result |= ((byte & 0x7F) as u32) << (7 * i);
            if byte & 0x80 == 0 {
                return Ok(result);
            }
        }

        // Fifth group: only the top four bits of a u32 are left.
        let byte = self.read_byte(context)?;
        if byte & 0x80 != 0 {
            return Err(DecodeError::VarintTooLong { offset: start });
        }
        if byte > 0x0F {
            return Err(DecodeError::VarintOverflow { offset: start });
        }
        Ok(result | ((byte as u32) << 28))
    }

    /// Reads a length-prefixed UTF-8 string.
    #[inline]
    pub fn read_string(&mut self, context: &'static str) -> Result<String, DecodeError> {
        let len = self.read_varint(context)? as usize;
        let offset = self.pos;
        let bytes = self.read_bytes(len, context)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| DecodeError::InvalidUtf8 { offset })
    }

    /// Reads a little-endian f64, keeping the exact bit pattern.
    #[inline]
    pub fn read_f64(&mut self, context: &'static str) -> Result<f64, DecodeError> {
        Ok(f64::from_le_bytes(self.read_array(context)?))
    }

    /// Reads a little-endian i32.
    #[inline]
    pub fn read_i32(&mut self, context: &'static str) -> Result<i32, DecodeError> {
        Ok(i32::from_le_bytes(self.read_array(context)?))
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Writer for encoding binary data.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Creates a new writer.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Creates a new writer with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Returns the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Returns a reference to the written bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Returns the number of bytes written.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if no bytes have been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Writes a single byte.
    #[inline]
    pub fn write_byte(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    /// Writes raw bytes.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Writes a 7-bit encoded unsigned length.
    #[inline]
    pub fn write_varint(&mut self, mut value: u32) {
        let mut buf = [0u8; MAX_VARINT_BYTES];
        let mut len = 0;
        while value >= 0x80 {
            buf[len] = (value as u8) | 0x80;
            value >>= 7;
            len += 1;
        }
        buf[len] = value as u8;
        self.buf.extend_from_slice(&buf[..=len]);
    }

    /// Writes a length-prefixed UTF-8 string.
    pub fn write_string(&mut self, s: &str, field: &'static str) -> Result<(), EncodeError> {
        let len = wire_len(s.len(), field)?;
        self.write_varint(len);
        self.buf.extend_from_slice(s.as_bytes());
        Ok(())
    }

    /// Writes a little-endian f64, bit pattern included.
    pub fn write_f64(&mut self, value: f64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a little-endian i32.
    pub fn write_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }
}

/// Checks that a length fits the format's signed 32-bit length fields.
pub(crate) fn wire_len(len: usize, field: &'static str) -> Result<u32, EncodeError> {
    if len > MAX_WIRE_LEN {
        return Err(EncodeError::LengthExceedsLimit {
            field,
            len,
            max: MAX_WIRE_LEN,
        });
    }
    Ok(len as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_varint_boundaries() {
        let cases: [(u32, &[u8]); 6] = [
            (0, &[0x00]),
            (127, &[0x7F]),
            (128, &[0x80, 0x01]),
            (16383, &[0xFF, 0x7F]),
            (16384, &[0x80, 0x80, 0x01]),
            (u32::MAX, &[0xFF, 0xFF, 0xFF, 0xFF, 0x0F]),
        ];

        for (value, expected) in cases {
            let mut writer = Writer::new();
            writer.write_varint(value);
            assert_eq!(writer.as_bytes(), expected, "encoding {}", value);

            let mut reader = Reader::new(expected);
            assert_eq!(reader.read_varint("test").unwrap(), value);
            assert!(reader.is_empty());
        }
    }

    #[test]
    fn test_varint_too_long() {
        let data = [0x80u8; 6];
        let mut reader = Reader::new(&data);
        assert_eq!(
            reader.read_varint("test"),
            Err(DecodeError::VarintTooLong { offset: 0 })
        );
    }

    #[test]
    fn test_varint_overflow() {
        let data = [0xFF, 0xFF, 0xFF, 0xFF, 0x10];
        let mut reader = Reader::new(&data);
        assert_eq!(
            reader.read_varint("test"),
            Err(DecodeError::VarintOverflow { offset: 0 })
        );
    }

    #[test]
    fn test_varint_truncated() {
        let data = [0x80u8, 0x80];
        let mut reader = Reader::new(&data);
        assert_eq!(
            reader.read_varint("string length"),
            Err(DecodeError::UnexpectedEof {
                context: "string length",
                offset: 2
            })
        );
    }

    #[test]
    fn test_string_lengths_across_group_transitions() {
        for len in [0usize, 127, 128, 16383, 16384] {
            let s = "x".repeat(len);
            let mut writer = Writer::new();
            writer.write_string(&s, "test").unwrap();

            let mut reader = Reader::new(writer.as_bytes());
            assert_eq!(reader.read_string("test").unwrap(), s);
            assert!(reader.is_empty());
        }
    }

    #[test]
    fn test_string_unicode() {
        let mut writer = Writer::new();
        writer.write_string("Revachol \u{1F4A9}", "test").unwrap();
        // 9 ASCII bytes + 4-byte emoji, length counts bytes not chars
        assert_eq!(writer.as_bytes()[0], 13);

        let mut reader = Reader::new(writer.as_bytes());
        assert_eq!(reader.read_string("test").unwrap(), "Revachol \u{1F4A9}");
    }

    #[test]
    fn test_string_invalid_utf8() {
        let data = [0x02, 0xC3, 0x28];
        let mut reader = Reader::new(&data);
        assert_eq!(
            reader.read_string("test"),
            Err(DecodeError::InvalidUtf8 { offset: 1 })
        );
    }

    #[test]
    fn test_f64_bit_patterns() {
        let values = [0.0, -0.0, 1.5, f64::INFINITY, f64::NEG_INFINITY, f64::NAN, f64::MIN_POSITIVE];

        for v in values {
            let mut writer = Writer::new();
            writer.write_f64(v);
            assert_eq!(writer.len(), 8);

            let mut reader = Reader::new(writer.as_bytes());
            let decoded = reader.read_f64("test").unwrap();
            assert_eq!(v.to_bits(), decoded.to_bits());
        }
    }

    #[test]
    fn test_i32_little_endian() {
        let mut writer = Writer::new();
        writer.write_i32(0x0102_0304);
        assert_eq!(writer.as_bytes(), &[0x04, 0x03, 0x02, 0x01]);

        let mut reader = Reader::new(&[0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(reader.read_i32("test").unwrap(), -1);
    }

    #[test]
    fn test_unexpected_eof() {
        let data = [0u8; 5];
        let mut reader = Reader::new(&data);
        reader.skip(2, "padding").unwrap();
        let result = reader.read_bytes(10, "test");
        assert_eq!(
            result,
            Err(DecodeError::UnexpectedEof {
                context: "test",
                offset: 2
            })
        );
        // A failed read does not move the cursor
        assert_eq!(reader.position(), 2);
    }

    #[test]
    fn test_seek_clamps() {
        let data = [1u8, 2, 3];
        let mut reader = Reader::new(&data);
        reader.seek(10);
        assert!(reader.is_empty());
        reader.seek(1);
        assert_eq!(reader.read_byte("test").unwrap(), 2);
        assert_eq!(reader.byte_at(0), Some(1));
        assert_eq!(reader.byte_at(3), None);
    }
}
