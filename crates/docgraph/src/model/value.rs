//! Variant values carried by content items.
//!
//! A value is one of a closed set of primitive types. Each type has a wire
//! tag (used by the JSON `[tag, payload]` form) and a variant index (used by
//! the packed binary form).

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;

use crate::model::{Asset, Checksum256, Name, TimePoint};

/// Registered value types, in variant-index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ValueTag {
    Monostate = 0,
    Name = 1,
    String = 2,
    Asset = 3,
    TimePoint = 4,
    Int64 = 5,
    Checksum256 = 6,
    Bool = 7,
    Uint64 = 8,
}

/// Every registered tag, in variant-index order.
pub const ALL_TAGS: [ValueTag; 9] = [
    ValueTag::Monostate,
    ValueTag::Name,
    ValueTag::String,
    ValueTag::Asset,
    ValueTag::TimePoint,
    ValueTag::Int64,
    ValueTag::Checksum256,
    ValueTag::Bool,
    ValueTag::Uint64,
];

lazy_static! {
    static ref TAG_REGISTRY: FxHashMap<&'static str, ValueTag> =
        ALL_TAGS.iter().map(|tag| (tag.as_str(), *tag)).collect();
}

impl ValueTag {
    /// Looks up a wire tag in the registry.
    pub fn from_tag(tag: &str) -> Option<ValueTag> {
        TAG_REGISTRY.get(tag).copied()
    }

    /// Creates a ValueTag from its binary variant index.
    pub fn from_index(index: u32) -> Option<ValueTag> {
        ALL_TAGS.get(index as usize).copied()
    }

    /// Returns the binary variant index.
    pub fn index(self) -> u32 {
        self as u32
    }

    /// Returns the wire tag.
    pub fn as_str(self) -> &'static str {
        match self {
            ValueTag::Monostate => "monostate",
            ValueTag::Name => "name",
            ValueTag::String => "string",
            ValueTag::Asset => "asset",
            ValueTag::TimePoint => "time_point",
            ValueTag::Int64 => "int64",
            ValueTag::Checksum256 => "checksum256",
            ValueTag::Bool => "bool",
            ValueTag::Uint64 => "uint64",
        }
    }
}

impl std::fmt::Display for ValueTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Value {
    /// No value.
    #[default]
    Monostate,
    /// Ledger identifier.
    Name(Name),
    /// UTF-8 text.
    String(String),
    /// Token amount.
    Asset(Asset),
    /// Timestamp.
    TimePoint(TimePoint),
    /// Signed 64-bit integer.
    Int64(i64),
    /// Reference to another document by its content address.
    Checksum256(Checksum256),
    Bool(bool),
    /// Unsigned 64-bit integer.
    Uint64(u64),
}

impl Value {
    /// Returns the tag of this value.
    pub fn tag(&self) -> ValueTag {
        match self {
            Value::Monostate => ValueTag::Monostate,
            Value::Name(_) => ValueTag::Name,
            Value::String(_) => ValueTag::String,
            Value::Asset(_) => ValueTag::Asset,
            Value::TimePoint(_) => ValueTag::TimePoint,
            Value::Int64(_) => ValueTag::Int64,
            Value::Checksum256(_) => ValueTag::Checksum256,
            Value::Bool(_) => ValueTag::Bool,
            Value::Uint64(_) => ValueTag::Uint64,
        }
    }

    /// Validates this value.
    ///
    /// Returns an error description if invalid, None if valid. Values built
    /// through the primitive constructors are always valid; this catches
    /// assets assembled field by field.
    pub fn validate(&self) -> Option<&'static str> {
        match self {
            Value::Asset(asset) => asset.validate(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<Name> {
        match self {
            Value::Name(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Uint64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_asset(&self) -> Option<&Asset> {
        match self {
            Value::Asset(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_time_point(&self) -> Option<TimePoint> {
        match self {
            Value::TimePoint(t) => Some(*t),
            _ => None,
        }
    }

    pub fn as_checksum(&self) -> Option<&Checksum256> {
        match self {
            Value::Checksum256(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Uint64(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<Name> for Value {
    fn from(v: Name) -> Self {
        Value::Name(v)
    }
}

impl From<Asset> for Value {
    fn from(v: Asset) -> Self {
        Value::Asset(v)
    }
}

impl From<TimePoint> for Value {
    fn from(v: TimePoint) -> Self {
        Value::TimePoint(v)
    }
}

impl From<Checksum256> for Value {
    fn from(v: Checksum256) -> Self {
        Value::Checksum256(v)
    }
}
