//! Directed, named relations between documents.

use serde::{Deserialize, Serialize};

use crate::model::{Checksum256, Name, TimePoint};

/// An edge from one document to another.
///
/// At most one edge exists per `(from_node, to_node, edge_name)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub id: u64,
    pub from_node: Checksum256,
    pub to_node: Checksum256,
    pub edge_name: Name,
    pub created_date: TimePoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<Name>,
}

impl Edge {
    /// Returns true if this edge matches the `(from, to, name)` key.
    pub fn connects(&self, from: &Checksum256, to: &Checksum256, edge_name: Name) -> bool {
        self.from_node == *from && self.to_node == *to && self.edge_name == edge_name
    }
}
