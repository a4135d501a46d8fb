//! Value encoding/decoding for the variable database format.
//!
//! Wire grammar, one tag byte then the payload:
//!
//! ```text
//! 'S' varint(len) utf8[len]
//! 'N' f64 (little-endian)
//! 'B' u8 (nonzero = true)
//! 'T' padding[4] i32 count (little-endian) (key value){count}
//! ```

use tracing::debug;

use crate::codec::primitives::{Reader, Writer, wire_len};
use crate::error::{DecodeError, EncodeError};
use crate::limits::{MAX_NESTING_DEPTH, MIN_ENTRY_LEN, TABLE_PADDING_LEN, TAG_STRING};
use crate::model::{Table, Value, ValueKind};

// =============================================================================
// DECODING
// =============================================================================

/// Decodes one tagged value (recursing into tables).
pub fn decode_value(reader: &mut Reader<'_>) -> Result<Value, DecodeError> {
    decode_nested(reader, 0)
}

fn decode_nested(reader: &mut Reader<'_>, depth: usize) -> Result<Value, DecodeError> {
    let offset = reader.position();
    let tag = reader.read_byte("type tag")?;
    match ValueKind::from_tag(tag) {
        Some(ValueKind::Str) => reader.read_string("string").map(Value::Str),
        Some(ValueKind::Num) => reader.read_f64("number").map(Value::Num),
        Some(ValueKind::Bool) => Ok(Value::Bool(reader.read_byte("boolean")? != 0)),
        Some(ValueKind::Table) => decode_table(reader, depth + 1, offset).map(Value::Table),
        None => Err(DecodeError::UnknownTypeTag { tag, offset }),
    }
}

/// Decodes a table body; the `'T'` tag has already been consumed.
fn decode_table(reader: &mut Reader<'_>, depth: usize, offset: usize) -> Result<Table, DecodeError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(DecodeError::NestingTooDeep {
            max: MAX_NESTING_DEPTH,
            offset,
        });
    }

    reader.skip(TABLE_PADDING_LEN, "table padding")?;
    let count_offset = reader.position();
    let count = reader.read_i32("table count")?;
    if count < 0 {
        return Err(DecodeError::NegativeTableCount {
            count,
            offset: count_offset,
        });
    }
    let count = count as usize;

    // The count is untrusted; never reserve more than the input could hold.
    let mut table = Table::with_capacity(count.min(reader.remaining_len() / MIN_ENTRY_LEN));
    for _ in 0..count {
        let key = decode_key(reader, depth)?;
        let value = decode_nested(reader, depth)?;
        table.insert(key, value);
    }
    Ok(table)
}

/// Key given to a table found in key position.
pub const TABLE_KEY_PLACEHOLDER: &str = "unknown";

/// Decodes a table key and coerces it to a string.
fn decode_key(reader: &mut Reader<'_>, depth: usize) -> Result<String, DecodeError> {
    let offset = reader.position();
    match decode_nested(reader, depth)? {
        Value::Str(s) => Ok(s),
        Value::Num(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Table(t) => {
            debug!(offset, entries = t.len(), "table used as key, coerced to placeholder");
            Ok(TABLE_KEY_PLACEHOLDER.to_owned())
        }
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes one tagged value (recursing into tables).
pub fn encode_value(writer: &mut Writer, value: &Value) -> Result<(), EncodeError> {
    encode_nested(writer, value, 0)
}

/// Encodes a table as a tagged `'T'` value.
pub fn encode_table(writer: &mut Writer, table: &Table) -> Result<(), EncodeError> {
    encode_table_at(writer, table, 1)
}

fn encode_nested(writer: &mut Writer, value: &Value, depth: usize) -> Result<(), EncodeError> {
    match value {
        Value::Str(s) => {
            writer.write_byte(ValueKind::Str.tag());
            writer.write_string(s, "string")?;
        }
        Value::Num(n) => {
            writer.write_byte(ValueKind::Num.tag());
            writer.write_f64(*n);
        }
        Value::Bool(b) => {
            writer.write_byte(ValueKind::Bool.tag());
            writer.write_byte(u8::from(*b));
        }
        Value::Table(t) => encode_table_at(writer, t, depth + 1)?,
    }
    Ok(())
}

fn encode_table_at(writer: &mut Writer, table: &Table, depth: usize) -> Result<(), EncodeError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(EncodeError::NestingTooDeep {
            max: MAX_NESTING_DEPTH,
        });
    }

    let count = wire_len(table.len(), "table count")?;
    writer.write_byte(ValueKind::Table.tag());
    writer.write_bytes(&[0u8; TABLE_PADDING_LEN]);
    writer.write_i32(count as i32);

    for (key, value) in table {
        writer.write_byte(TAG_STRING);
        writer.write_string(key, "table key")?;
        encode_nested(writer, value, depth)?;
    }
    Ok(())
}
