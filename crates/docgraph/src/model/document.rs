//! Documents: immutable bundles of content groups addressed by their content.

use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::ContentNotFoundError;
use crate::model::{Checksum256, ContentGroup, ContentGroups, ContentItem, Name, TimePoint, Value};

/// A ledger attestation attached to a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Certificate {
    pub certifier: Name,
    pub notes: String,
    pub certification_date: TimePoint,
}

/// A content-addressed document.
///
/// `id`, `hash` and `created_date` are assigned by the ledger; a freshly built
/// candidate has none of them. `PartialEq` compares every field, while
/// [`Document::is_equal`] compares content only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<Checksum256>,
    pub creator: Name,
    pub content_groups: ContentGroups,
    #[serde(default)]
    pub certificates: Vec<Certificate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<TimePoint>,
}

impl Document {
    /// Creates an uncommitted candidate document.
    pub fn new(creator: Name, content_groups: ContentGroups) -> Self {
        Self {
            id: None,
            hash: None,
            creator,
            content_groups,
            certificates: Vec::new(),
            created_date: None,
        }
    }

    /// Creates a candidate holding a single content group.
    pub fn from_group(creator: Name, group: ContentGroup) -> Self {
        Self::new(creator, vec![group])
    }

    /// Creates a candidate holding a single item in a single group.
    pub fn from_item(creator: Name, label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::from_group(creator, ContentGroup::from(vec![ContentItem::new(label, value)]))
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Returns the value of the first item labelled `label`, scanning groups
    /// in order and items within each group in order.
    pub fn get_content(&self, label: &str) -> Result<&Value, ContentNotFoundError> {
        self.content_groups
            .iter()
            .find_map(|group| group.get(label))
            .ok_or_else(|| self.not_found(label))
    }

    /// Returns true if both documents hold the same content groups in the
    /// same order. Identity, creator, certificates and dates are ignored.
    pub fn is_equal(&self, other: &Document) -> bool {
        self.content_groups == other.content_groups
    }

    /// Returns the first group whose `content_group_label` is `group_label`.
    pub fn content_group(&self, group_label: &str) -> Option<&ContentGroup> {
        self.content_groups
            .iter()
            .find(|group| group.label() == Some(group_label))
    }

    /// Looks up `label` inside the group named `group_label`.
    pub fn content_in_group(&self, group_label: &str, label: &str) -> Result<&Value, ContentNotFoundError> {
        self.content_group(group_label)
            .and_then(|group| group.get(label))
            .ok_or_else(|| self.not_found(label))
    }

    pub fn exists(&self, group_label: &str, label: &str) -> bool {
        self.content_in_group(group_label, label).is_ok()
    }

    /// Locally computed content address.
    pub fn content_address(&self) -> Checksum256 {
        codec::content_address(&self.content_groups)
    }

    fn not_found(&self, label: &str) -> ContentNotFoundError {
        ContentNotFoundError {
            label: label.to_string(),
            document_hash: self.hash,
        }
    }
}

/// The Healer badge document as rendered by the ledger.
#[cfg(test)]
pub(crate) const HEALER_JSON: &str = r#"{
    "id": 24,
    "hash": "05e81010c4600ed5d978d2ddf22420ffdf6c4094f4b3822711f0596c7c342ccb",
    "creator": "johnnyhypha1",
    "content_groups": [[
        {"label": "content_group_label", "value": ["string", "details"]},
        {"label": "title", "value": ["string", "Healer"]},
        {"label": "description", "value": ["string", "Holder of indigenous wisdom ready to transfer the knowledge to others willing to receive"]},
        {"label": "icon", "value": ["string", "https://myiconlink.com/fakelink"]},
        {"label": "seeds_coefficient_x10000", "value": ["int64", 10010]},
        {"label": "hypha_coefficient_x10000", "value": ["int64", 10015]},
        {"label": "hvoice_coefficient_x10000", "value": ["int64", 10000]},
        {"label": "husd_coefficient_x10000", "value": ["int64", 10100]}
    ], [
        {"label": "content_group_label", "value": ["string", "system"]},
        {"label": "client_version", "value": ["string", "1.0.13 0c81dde6"]},
        {"label": "contract_version", "value": ["string", "1.0.1 366e8dfe"]},
        {"label": "ballot_id", "value": ["name", "hypha1....14i"]},
        {"label": "proposer", "value": ["name", "johnnyhypha1"]},
        {"label": "type", "value": ["name", "badge"]}
    ]],
    "certificates": [
        {
            "certifier": "dao.hypha",
            "notes": "certification notes",
            "certification_date": "2020-10-19T14:02:32.500"
        }
    ],
    "created_date": "2020-10-16T14:02:32.500"
}"#;
