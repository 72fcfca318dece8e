//! Token amounts such as `"130.00 USD"`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DecodeError;

/// Largest precision a symbol may declare.
pub const MAX_PRECISION: u8 = 18;

/// Largest absolute amount, in smallest units.
pub const MAX_AMOUNT: i64 = (1 << 62) - 1;

/// Precision plus an upper-case code of 1 to 7 letters.
///
/// Packed as `precision | code[0] << 8 | code[1] << 16 | ...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol(u64);

impl Symbol {
    pub fn new(precision: u8, code: &str) -> Result<Self, DecodeError> {
        let invalid = |reason| DecodeError::InvalidAsset {
            asset: format!("{precision},{code}"),
            reason,
        };
        if precision > MAX_PRECISION {
            return Err(invalid("precision exceeds 18"));
        }
        if code.is_empty() || code.len() > 7 {
            return Err(invalid("symbol code must be 1 to 7 characters"));
        }
        let mut value = precision as u64;
        for (i, c) in code.bytes().enumerate() {
            if !c.is_ascii_uppercase() {
                return Err(invalid("symbol code must be upper-case A-Z"));
            }
            value |= (c as u64) << (8 * (i + 1));
        }
        Ok(Symbol(value))
    }

    /// Validates a packed symbol read from the wire.
    pub fn from_u64(value: u64) -> Result<Self, DecodeError> {
        let symbol = Symbol(value);
        Symbol::new(symbol.precision(), &symbol.code())?;
        Ok(symbol)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }

    pub fn precision(self) -> u8 {
        (self.0 & 0xff) as u8
    }

    pub fn code(self) -> String {
        let mut code = String::with_capacity(7);
        let mut rest = self.0 >> 8;
        while rest & 0xff != 0 {
            code.push((rest & 0xff) as u8 as char);
            rest >>= 8;
        }
        code
    }
}

/// An amount in smallest units together with its symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Asset {
    pub amount: i64,
    pub symbol: Symbol,
}

impl Asset {
    pub fn new(amount: i64, symbol: Symbol) -> Result<Self, DecodeError> {
        let asset = Asset { amount, symbol };
        if let Some(reason) = asset.validate() {
            return Err(DecodeError::InvalidAsset {
                asset: asset.to_string(),
                reason,
            });
        }
        Ok(asset)
    }

    /// Returns an error description if the amount is out of range.
    pub fn validate(&self) -> Option<&'static str> {
        if self.amount < -MAX_AMOUNT || self.amount > MAX_AMOUNT {
            return Some("amount out of range");
        }
        None
    }
}

impl FromStr for Asset {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| DecodeError::InvalidAsset {
            asset: s.to_string(),
            reason,
        };

        let s_trimmed = s.trim();
        let (amount_str, code) = s_trimmed
            .split_once(' ')
            .ok_or_else(|| invalid("expected \"<amount> <SYMBOL>\""))?;
        let code = code.trim_start();

        let (negative, digits) = match amount_str.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, amount_str),
        };
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, f),
            None => (digits, ""),
        };
        if int_part.is_empty() || !int_part.bytes().all(|c| c.is_ascii_digit()) {
            return Err(invalid("amount must be digits"));
        }
        if !frac_part.bytes().all(|c| c.is_ascii_digit()) {
            return Err(invalid("fraction must be digits"));
        }
        if frac_part.len() > MAX_PRECISION as usize {
            return Err(invalid("precision exceeds 18"));
        }

        let precision = frac_part.len() as u8;
        let symbol = Symbol::new(precision, code).map_err(|_| invalid("invalid symbol"))?;

        let overflow = || invalid("amount out of range");
        let mut amount: i64 = 0;
        for c in int_part.bytes().chain(frac_part.bytes()) {
            amount = amount
                .checked_mul(10)
                .and_then(|a| a.checked_add((c - b'0') as i64))
                .ok_or_else(overflow)?;
        }
        if negative {
            amount = -amount;
        }

        let asset = Asset { amount, symbol };
        if asset.validate().is_some() {
            return Err(overflow());
        }
        Ok(asset)
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = self.symbol.precision() as u32;
        let sign = if self.amount < 0 { "-" } else { "" };
        let abs = self.amount.unsigned_abs();
        if precision == 0 {
            write!(f, "{sign}{abs} {}", self.symbol.code())
        } else {
            let scale = 10u64.pow(precision);
            write!(
                f,
                "{sign}{}.{:0width$} {}",
                abs / scale,
                abs % scale,
                self.symbol.code(),
                width = precision as usize
            )
        }
    }
}

impl Serialize for Asset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Asset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
