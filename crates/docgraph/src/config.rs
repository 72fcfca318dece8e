//! Client configuration.
//!
//! The crate reads no environment variables; callers build a [`GraphConfig`]
//! themselves or load one from JSON.

use serde::{Deserialize, Serialize};

use crate::model::Name;

/// Default account hosting the document contract.
pub const DEFAULT_CONTRACT: Name = Name::from_static("docs");

/// Options for [`GraphClient`](crate::graph::GraphClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Account the document contract is deployed to.
    pub contract: Name,
    /// Check that a freshly created document carries the submitted content.
    pub verify_round_trip: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            contract: DEFAULT_CONTRACT,
            verify_round_trip: true,
        }
    }
}

impl GraphConfig {
    pub fn new(contract: Name) -> Self {
        Self {
            contract,
            ..Self::default()
        }
    }

    pub fn with_verify_round_trip(mut self, verify: bool) -> Self {
        self.verify_round_trip = verify;
        self
    }

    /// Parses a JSON object; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
