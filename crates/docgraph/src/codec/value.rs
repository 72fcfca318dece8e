//! Value encoding/decoding.
//!
//! Two wire forms:
//! - JSON: a two-element array `[tag, payload]`, e.g. `["int64", 10100]`
//! - packed binary: varuint32 variant index followed by the payload

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;

use crate::codec::primitives::{Reader, Writer};
use crate::error::DecodeError;
use crate::limits::MAX_STRING_LEN;
use crate::model::{Asset, Checksum256, Name, Symbol, TimePoint, Value, ValueTag};

// =============================================================================
// JSON
// =============================================================================

/// Decodes a JSON payload for the given wire tag.
pub fn decode_value(tag: &str, payload: &JsonValue) -> Result<Value, DecodeError> {
    let tag = ValueTag::from_tag(tag).ok_or_else(|| DecodeError::UnknownVariantTag {
        tag: tag.to_string(),
    })?;
    decode_tagged(tag, payload)
}

fn decode_tagged(tag: ValueTag, payload: &JsonValue) -> Result<Value, DecodeError> {
    let invalid = |expected| DecodeError::InvalidPayload {
        tag: tag.as_str(),
        expected,
    };
    let text = || payload.as_str().ok_or_else(|| invalid("a string"));

    match tag {
        ValueTag::Monostate => match payload {
            JsonValue::Null => Ok(Value::Monostate),
            JsonValue::Number(n) if n.as_u64() == Some(0) => Ok(Value::Monostate),
            _ => Err(invalid("0 or null")),
        },
        ValueTag::Name => Ok(Value::Name(Name::new(text()?)?)),
        ValueTag::String => Ok(Value::String(text()?.to_string())),
        ValueTag::Asset => Ok(Value::Asset(text()?.parse()?)),
        ValueTag::TimePoint => Ok(Value::TimePoint(TimePoint::parse(text()?)?)),
        ValueTag::Int64 => match payload {
            JsonValue::Number(n) => n.as_i64().map(Value::Int64).ok_or_else(|| invalid("a signed 64-bit integer")),
            JsonValue::String(s) => s
                .parse()
                .map(Value::Int64)
                .map_err(|_| invalid("a signed 64-bit integer")),
            _ => Err(invalid("a signed 64-bit integer")),
        },
        ValueTag::Checksum256 => Ok(Value::Checksum256(Checksum256::from_hex(text()?)?)),
        ValueTag::Bool => payload.as_bool().map(Value::Bool).ok_or_else(|| invalid("true or false")),
        ValueTag::Uint64 => match payload {
            JsonValue::Number(n) => n.as_u64().map(Value::Uint64).ok_or_else(|| invalid("an unsigned 64-bit integer")),
            JsonValue::String(s) => s
                .parse()
                .map(Value::Uint64)
                .map_err(|_| invalid("an unsigned 64-bit integer")),
            _ => Err(invalid("an unsigned 64-bit integer")),
        },
    }
}

/// Encodes a value as its wire tag and JSON payload.
pub fn encode_value(value: &Value) -> (&'static str, JsonValue) {
    let payload = match value {
        Value::Monostate => JsonValue::from(0u8),
        Value::Name(n) => JsonValue::String(n.to_string()),
        Value::String(s) => JsonValue::String(s.clone()),
        Value::Asset(a) => JsonValue::String(a.to_string()),
        Value::TimePoint(t) => JsonValue::String(t.to_string()),
        Value::Int64(v) => JsonValue::from(*v),
        Value::Checksum256(c) => JsonValue::String(c.to_hex()),
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Uint64(v) => JsonValue::from(*v),
    };
    (value.tag().as_str(), payload)
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        encode_value(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (tag, payload) = <(String, JsonValue)>::deserialize(deserializer)?;
        decode_value(&tag, &payload).map_err(D::Error::custom)
    }
}

// =============================================================================
// PACKED BINARY
// =============================================================================

/// Writes a value as variant index plus payload.
pub fn pack_value(writer: &mut Writer, value: &Value) {
    writer.write_varuint32(value.tag().index());
    match value {
        Value::Monostate => {}
        Value::Name(n) => writer.write_name(*n),
        Value::String(s) => writer.write_string(s),
        Value::Asset(a) => {
            writer.write_i64(a.amount);
            writer.write_u64(a.symbol.as_u64());
        }
        Value::TimePoint(t) => writer.write_time_point(*t),
        Value::Int64(v) => writer.write_i64(*v),
        Value::Checksum256(c) => writer.write_checksum(c),
        Value::Bool(b) => writer.write_bool(*b),
        Value::Uint64(v) => writer.write_u64(*v),
    }
}

/// Reads a value written by [`pack_value`].
pub fn unpack_value(reader: &mut Reader<'_>) -> Result<Value, DecodeError> {
    let index = reader.read_varuint32("value.index")?;
    let tag = ValueTag::from_index(index).ok_or(DecodeError::UnknownVariantIndex { index })?;

    Ok(match tag {
        ValueTag::Monostate => Value::Monostate,
        ValueTag::Name => Value::Name(reader.read_name("value.name")?),
        ValueTag::String => Value::String(reader.read_string(MAX_STRING_LEN, "value.string")?),
        ValueTag::Asset => {
            let amount = reader.read_i64("value.asset.amount")?;
            let symbol = Symbol::from_u64(reader.read_u64("value.asset.symbol")?)?;
            Value::Asset(Asset::new(amount, symbol)?)
        }
        ValueTag::TimePoint => Value::TimePoint(reader.read_time_point("value.time_point")?),
        ValueTag::Int64 => Value::Int64(reader.read_i64("value.int64")?),
        ValueTag::Checksum256 => Value::Checksum256(reader.read_checksum("value.checksum256")?),
        ValueTag::Bool => Value::Bool(reader.read_bool("value.bool")?),
        ValueTag::Uint64 => Value::Uint64(reader.read_u64("value.uint64")?),
    })
}
