//! Ledger account/action identifiers.
//!
//! A name is up to 13 characters from `.12345abcdefghijklmnopqrstuvwxyz`
//! packed into a `u64`: 5 bits per character for the first twelve, 4 bits
//! for the thirteenth (which is therefore limited to `.1-5a-j`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DecodeError;

const CHARMAP: &[u8; 32] = b".12345abcdefghijklmnopqrstuvwxyz";

/// Maximum number of characters in a name.
pub const MAX_NAME_LEN: usize = 13;

/// A validated ledger identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Name(u64);

fn char_to_symbol(c: u8) -> Option<u64> {
    match c {
        b'a'..=b'z' => Some((c - b'a') as u64 + 6),
        b'1'..=b'5' => Some((c - b'1') as u64 + 1),
        b'.' => Some(0),
        _ => None,
    }
}

impl Name {
    /// Parses and validates a name.
    pub fn new(s: &str) -> Result<Self, DecodeError> {
        let invalid = |reason| DecodeError::InvalidName {
            name: s.to_string(),
            reason,
        };

        let bytes = s.as_bytes();
        if bytes.len() > MAX_NAME_LEN {
            return Err(invalid("longer than 13 characters"));
        }

        let mut value = 0u64;
        for (i, &c) in bytes.iter().enumerate() {
            let symbol = char_to_symbol(c).ok_or_else(|| invalid("contains a character outside .12345a-z"))?;
            if i < 12 {
                value |= (symbol & 0x1f) << (64 - 5 * (i + 1));
            } else {
                if symbol > 0x0f {
                    return Err(invalid("13th character must be one of .12345abcdefghij"));
                }
                value |= symbol;
            }
        }

        let name = Name(value);
        // Trailing dots vanish when packed.
        if name.to_string() != s {
            return Err(invalid("not in canonical form"));
        }
        Ok(name)
    }

    /// Packs a name literal at compile time.
    ///
    /// Intended for constants; an invalid literal fails const evaluation.
    pub const fn from_static(s: &str) -> Self {
        let bytes = s.as_bytes();
        assert!(bytes.len() <= MAX_NAME_LEN, "name longer than 13 characters");
        let mut value = 0u64;
        let mut i = 0;
        while i < bytes.len() {
            let symbol = match bytes[i] {
                c @ b'a'..=b'z' => (c - b'a') as u64 + 6,
                c @ b'1'..=b'5' => (c - b'1') as u64 + 1,
                b'.' => 0,
                _ => panic!("name contains a character outside .12345a-z"),
            };
            if i < 12 {
                value |= symbol << (64 - 5 * (i + 1));
            } else {
                assert!(symbol <= 0x0f, "13th character must be one of .12345abcdefghij");
                value |= symbol;
            }
            i += 1;
        }
        Name(value)
    }

    /// Wraps a raw packed value without validation; every u64 is a valid name.
    pub const fn from_u64(value: u64) -> Self {
        Name(value)
    }

    /// Returns the packed value.
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns true for the empty name.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = [b'.'; MAX_NAME_LEN];
        let mut tmp = self.0;
        for i in 0..MAX_NAME_LEN {
            let (mask, shift) = if i == 0 { (0x0f, 4) } else { (0x1f, 5) };
            out[MAX_NAME_LEN - 1 - i] = CHARMAP[(tmp & mask) as usize];
            tmp >>= shift;
        }
        let len = out.iter().rposition(|&c| c != b'.').map(|p| p + 1).unwrap_or(0);
        // CHARMAP is ASCII
        f.write_str(std::str::from_utf8(&out[..len]).map_err(|_| fmt::Error)?)
    }
}

impl FromStr for Name {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Name::new(s)
    }
}

impl TryFrom<&str> for Name {
    type Error = DecodeError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Name::new(s)
    }
}

impl Serialize for Name {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Name::new(&s).map_err(serde::de::Error::custom)
    }
}
