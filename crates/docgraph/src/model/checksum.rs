//! 32-byte content addresses.
//!
//! Document hashes are opaque to the client: the ledger assigns them and the
//! client only compares them and converts them to and from lowercase hex.
//! [`content_address`](crate::codec::content_address) gives a locally
//! computed address for ledgers that do not supply their own.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::error::DecodeError;

/// A SHA-256 sized digest, used as a document identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Checksum256([u8; 32]);

impl Checksum256 {
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Checksum256(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// SHA-256 of `input`.
    pub fn digest(input: &[u8]) -> Self {
        let hash = Sha256::digest(input);
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hash);
        Checksum256(bytes)
    }

    /// Parses 64 hex characters (either case).
    pub fn from_hex(s: &str) -> Result<Self, DecodeError> {
        if s.len() != 64 {
            return Err(DecodeError::InvalidChecksum {
                value: s.to_string(),
                reason: "expected 64 hex characters",
            });
        }
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| DecodeError::InvalidChecksum {
            value: s.to_string(),
            reason: "not a hex string",
        })?;
        Ok(Checksum256(bytes))
    }

    /// Lowercase hex form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Checksum256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Checksum256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Checksum256({})", self.to_hex())
    }
}

impl FromStr for Checksum256 {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Checksum256::from_hex(s)
    }
}

impl From<[u8; 32]> for Checksum256 {
    fn from(bytes: [u8; 32]) -> Self {
        Checksum256(bytes)
    }
}

impl Serialize for Checksum256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Checksum256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Checksum256::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
