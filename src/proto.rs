//! Protobuf wire-format codec
//!
//! Low-level proto3 encoding and decoding used to build the canonical
//! transaction documents. Zero and empty scalar fields are skipped on encode
//! (proto3 default behavior); embedded messages are always length-prefixed.
//!
//! | Wire type | Meaning          | Used for                          |
//! |-----------|------------------|-----------------------------------|
//! | 0         | Varint           | uint32, uint64, bool, enum        |
//! | 2         | Length-delimited | string, bytes, embedded messages  |
//! | 5         | 32-bit           | fixed32                           |

use crate::errors::{CroSignerError, CroSignerResult};

/// Wire type constants
pub mod wire_type {
    /// Varint: uint32, uint64, bool, enum
    pub const VARINT: u8 = 0;
    /// Length-delimited: string, bytes, embedded messages
    pub const LENGTH_DELIMITED: u8 = 2;
    /// 32-bit: fixed32
    pub const FIXED32: u8 = 5;
}

/// Encode a variable-length integer (varint)
#[inline]
pub fn encode_varint(buf: &mut Vec<u8>, value: u64) {
    let mut v = value;
    while v >= 0x80 {
        buf.push((v as u8) | 0x80);
        v >>= 7;
    }
    buf.push(v as u8);
}

/// Encode a field tag (field number + wire type)
#[inline]
pub fn encode_tag(buf: &mut Vec<u8>, field_number: u32, wire_type: u8) {
    encode_varint(buf, ((field_number as u64) << 3) | (wire_type as u64));
}

/// Encode a uint32 field, skipping the proto3 default (0)
#[inline]
pub fn encode_uint32(buf: &mut Vec<u8>, field_number: u32, value: u32) {
    if value == 0 {
        return;
    }
    encode_tag(buf, field_number, wire_type::VARINT);
    encode_varint(buf, value as u64);
}

/// Encode a uint64 field, skipping the proto3 default (0)
#[inline]
pub fn encode_uint64(buf: &mut Vec<u8>, field_number: u32, value: u64) {
    if value == 0 {
        return;
    }
    encode_tag(buf, field_number, wire_type::VARINT);
    encode_varint(buf, value);
}

/// Encode a boolean field, skipping the proto3 default (false)
#[inline]
pub fn encode_bool(buf: &mut Vec<u8>, field_number: u32, value: bool) {
    if !value {
        return;
    }
    encode_tag(buf, field_number, wire_type::VARINT);
    buf.push(1);
}

/// Encode a string field, skipping the proto3 default (empty)
#[inline]
pub fn encode_string(buf: &mut Vec<u8>, field_number: u32, value: &str) {
    if value.is_empty() {
        return;
    }
    encode_tag(buf, field_number, wire_type::LENGTH_DELIMITED);
    encode_varint(buf, value.len() as u64);
    buf.extend_from_slice(value.as_bytes());
}

/// Encode a bytes field, skipping the proto3 default (empty)
#[inline]
pub fn encode_bytes(buf: &mut Vec<u8>, field_number: u32, value: &[u8]) {
    if value.is_empty() {
        return;
    }
    encode_tag(buf, field_number, wire_type::LENGTH_DELIMITED);
    encode_varint(buf, value.len() as u64);
    buf.extend_from_slice(value);
}

/// Encode a length-delimited field (for embedded messages)
///
/// Unlike `encode_bytes`, this always encodes even when the payload is
/// empty, which embedded message fields require.
#[inline]
pub fn encode_length_delimited(buf: &mut Vec<u8>, field_number: u32, value: &[u8]) {
    encode_tag(buf, field_number, wire_type::LENGTH_DELIMITED);
    encode_varint(buf, value.len() as u64);
    buf.extend_from_slice(value);
}

/// Decode a varint starting at `*pos`, advancing `*pos` past it
pub fn decode_varint(buf: &[u8], pos: &mut usize) -> CroSignerResult<u64> {
    let mut value: u64 = 0;
    let mut shift: u32 = 0;
    loop {
        let byte = *buf.get(*pos).ok_or_else(|| CroSignerError::DecodeError {
            message: "truncated varint".to_string(),
        })?;
        *pos += 1;
        if shift >= 64 {
            return Err(CroSignerError::Overflow {
                message: "varint exceeds 64 bits".to_string(),
            });
        }
        value |= ((byte & 0x7f) as u64) << shift;
        if byte & 0x80 == 0 {
            return Ok(value);
        }
        shift += 7;
    }
}

/// A single decoded field payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// Wire type 0
    Varint(u64),
    /// Wire type 2
    LengthDelimited(&'a [u8]),
    /// Wire type 5
    Fixed32(u32),
}

/// Iterator over the `(field_number, value)` pairs of an encoded message
pub struct FieldIter<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> FieldIter<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }
}

impl<'a> Iterator for FieldIter<'a> {
    type Item = CroSignerResult<(u32, FieldValue<'a>)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.buf.len() {
            return None;
        }
        Some(self.read_field())
    }
}

impl<'a> FieldIter<'a> {
    fn read_field(&mut self) -> CroSignerResult<(u32, FieldValue<'a>)> {
        let tag = decode_varint(self.buf, &mut self.pos)?;
        let field_number = (tag >> 3) as u32;
        let wire = (tag & 0x07) as u8;
        let value = match wire {
            wire_type::VARINT => FieldValue::Varint(decode_varint(self.buf, &mut self.pos)?),
            wire_type::LENGTH_DELIMITED => {
                let len = decode_varint(self.buf, &mut self.pos)? as usize;
                let end = self.pos.checked_add(len).filter(|end| *end <= self.buf.len()).ok_or_else(
                    || CroSignerError::DecodeError {
                        message: format!("truncated field {field_number}"),
                    },
                )?;
                let slice = &self.buf[self.pos..end];
                self.pos = end;
                FieldValue::LengthDelimited(slice)
            }
            wire_type::FIXED32 => {
                let end =
                    self.pos
                        .checked_add(4)
                        .filter(|end| *end <= self.buf.len())
                        .ok_or_else(|| CroSignerError::DecodeError {
                            message: "truncated fixed32".to_string(),
                        })?;
                let mut bytes = [0u8; 4];
                bytes.copy_from_slice(&self.buf[self.pos..end]);
                self.pos = end;
                FieldValue::Fixed32(u32::from_le_bytes(bytes))
            }
            other => {
                return Err(CroSignerError::DecodeError {
                    message: format!("unsupported wire type {other}"),
                })
            }
        };
        Ok((field_number, value))
    }
}

/// Extract a length-delimited payload, rejecting other wire types
pub fn expect_bytes<'a>(field_number: u32, value: FieldValue<'a>) -> CroSignerResult<&'a [u8]> {
    match value {
        FieldValue::LengthDelimited(bytes) => Ok(bytes),
        _ => Err(CroSignerError::DecodeError {
            message: format!("field {field_number}: expected length-delimited payload"),
        }),
    }
}

/// Extract a varint payload, rejecting other wire types
pub fn expect_varint(field_number: u32, value: FieldValue<'_>) -> CroSignerResult<u64> {
    match value {
        FieldValue::Varint(v) => Ok(v),
        _ => Err(CroSignerError::DecodeError {
            message: format!("field {field_number}: expected varint payload"),
        }),
    }
}

/// Extract a UTF-8 string payload
pub fn expect_string(field_number: u32, value: FieldValue<'_>) -> CroSignerResult<String> {
    let bytes = expect_bytes(field_number, value)?;
    String::from_utf8(bytes.to_vec()).map_err(|e| CroSignerError::DecodeError {
        message: format!("field {field_number}: invalid UTF-8: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_varint_small() {
        let mut buf = Vec::new();
        encode_varint(&mut buf, 1);
        assert_eq!(buf, vec![1]);
    }

    #[test]
    fn test_encode_varint_large() {
        let mut buf = Vec::new();
        encode_varint(&mut buf, 300);
        assert_eq!(buf, vec![0xAC, 0x02]);
    }

    #[test]
    fn test_varint_roundtrip() {
        for value in [0u64, 1, 127, 128, 300, 16383, 16384, u64::MAX] {
            let mut buf = Vec::new();
            encode_varint(&mut buf, value);
            let mut pos = 0;
            assert_eq!(decode_varint(&buf, &mut pos).unwrap(), value);
            assert_eq!(pos, buf.len());
        }
    }

    #[test]
    fn test_decode_varint_truncated() {
        let mut pos = 0;
        let result = decode_varint(&[0x80], &mut pos);
        assert!(matches!(result, Err(CroSignerError::DecodeError { .. })));
    }

    #[test]
    fn test_decode_varint_overflow() {
        // 11 continuation bytes cannot fit in 64 bits
        let buf = [0xFFu8; 11];
        let mut pos = 0;
        let result = decode_varint(&buf, &mut pos);
        assert!(matches!(result, Err(CroSignerError::Overflow { .. })));
    }

    #[test]
    fn test_encode_string() {
        let mut buf = Vec::new();
        encode_string(&mut buf, 1, "testing");
        assert_eq!(
            buf,
            vec![0x0A, 0x07, b't', b'e', b's', b't', b'i', b'n', b'g']
        );
    }

    #[test]
    fn test_encode_string_empty() {
        let mut buf = Vec::new();
        encode_string(&mut buf, 1, "");
        assert!(buf.is_empty());
    }

    #[test]
    fn test_encode_uint32() {
        let mut buf = Vec::new();
        encode_uint32(&mut buf, 2, 150);
        assert_eq!(buf, vec![0x10, 0x96, 0x01]);
    }

    #[test]
    fn test_encode_uint64_zero_skipped() {
        let mut buf = Vec::new();
        encode_uint64(&mut buf, 2, 0);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_encode_bool() {
        let mut buf = Vec::new();
        encode_bool(&mut buf, 1, true);
        assert_eq!(buf, vec![0x08, 0x01]);

        let mut buf = Vec::new();
        encode_bool(&mut buf, 1, false);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_field_iter_roundtrip() {
        let mut buf = Vec::new();
        encode_string(&mut buf, 1, "memo");
        encode_uint64(&mut buf, 3, 42);
        encode_bytes(&mut buf, 5, &[9, 8, 7]);

        let fields: Vec<_> = FieldIter::new(&buf).collect::<Result<_, _>>().unwrap();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0].0, 1);
        assert_eq!(fields[0].1, FieldValue::LengthDelimited(b"memo"));
        assert_eq!(fields[1], (3, FieldValue::Varint(42)));
        assert_eq!(fields[2], (5, FieldValue::LengthDelimited(&[9, 8, 7][..])));
    }

    #[test]
    fn test_field_iter_truncated_payload() {
        // Claims 5 payload bytes but supplies 2
        let buf = vec![0x0A, 0x05, 0x01, 0x02];
        let result: Result<Vec<_>, _> = FieldIter::new(&buf).collect();
        assert!(matches!(result, Err(CroSignerError::DecodeError { .. })));
    }

    #[test]
    fn test_expect_helpers() {
        assert_eq!(expect_varint(1, FieldValue::Varint(7)).unwrap(), 7);
        assert!(expect_varint(1, FieldValue::LengthDelimited(&[])).is_err());
        assert_eq!(
            expect_string(2, FieldValue::LengthDelimited(b"hi")).unwrap(),
            "hi"
        );
        assert!(expect_bytes(3, FieldValue::Varint(1)).is_err());
    }
}
