//! Builder API for ergonomic Document construction.
//!
//! # Example
//!
//! ```rust
//! use docgraph::model::builder::DocumentBuilder;
//! use docgraph::Name;
//!
//! let creator = Name::new("johnnyhypha1").unwrap();
//! let doc = DocumentBuilder::new(creator)
//!     .group("details", |g| g
//!         .string("title", "Healer")
//!         .int64("husd_coefficient_x10000", 10100)
//!     )
//!     .build();
//!
//! assert_eq!(doc.content_in_group("details", "title").unwrap().as_str(), Some("Healer"));
//! ```

use crate::model::{
    Asset, Checksum256, ContentGroup, ContentGroups, ContentItem, Document, Name, TimePoint, Value,
    CONTENT_GROUP_LABEL,
};

/// Builder for constructing a candidate Document.
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    creator: Name,
    content_groups: ContentGroups,
}

impl DocumentBuilder {
    pub fn new(creator: Name) -> Self {
        Self {
            creator,
            content_groups: Vec::new(),
        }
    }

    /// Adds a group named `label` using a builder function.
    pub fn group<F>(self, label: &str, f: F) -> Self
    where
        F: FnOnce(ContentGroupBuilder) -> ContentGroupBuilder,
    {
        self.content_group(f(ContentGroupBuilder::new().label(label)).build())
    }

    /// Adds a group with no `content_group_label` using a builder function.
    pub fn unlabelled_group<F>(self, f: F) -> Self
    where
        F: FnOnce(ContentGroupBuilder) -> ContentGroupBuilder,
    {
        self.content_group(f(ContentGroupBuilder::new()).build())
    }

    /// Adds a prebuilt group.
    pub fn content_group(mut self, group: ContentGroup) -> Self {
        self.content_groups.push(group);
        self
    }

    pub fn build(self) -> Document {
        Document::new(self.creator, self.content_groups)
    }
}

/// Builder for one content group.
#[derive(Debug, Clone, Default)]
pub struct ContentGroupBuilder {
    items: Vec<ContentItem>,
}

impl ContentGroupBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the group's `content_group_label`.
    pub fn label(self, label: &str) -> Self {
        self.string(CONTENT_GROUP_LABEL, label)
    }

    /// Adds an item with an arbitrary value.
    pub fn value(mut self, label: impl Into<String>, value: impl Into<Value>) -> Self {
        self.items.push(ContentItem::new(label, value));
        self
    }

    pub fn string(self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.value(label, Value::String(value.into()))
    }

    pub fn name(self, label: impl Into<String>, value: Name) -> Self {
        self.value(label, Value::Name(value))
    }

    pub fn asset(self, label: impl Into<String>, value: Asset) -> Self {
        self.value(label, Value::Asset(value))
    }

    pub fn time_point(self, label: impl Into<String>, value: TimePoint) -> Self {
        self.value(label, Value::TimePoint(value))
    }

    pub fn int64(self, label: impl Into<String>, value: i64) -> Self {
        self.value(label, Value::Int64(value))
    }

    pub fn uint64(self, label: impl Into<String>, value: u64) -> Self {
        self.value(label, Value::Uint64(value))
    }

    /// Adds a reference to another document.
    pub fn checksum(self, label: impl Into<String>, value: Checksum256) -> Self {
        self.value(label, Value::Checksum256(value))
    }

    pub fn bool(self, label: impl Into<String>, value: bool) -> Self {
        self.value(label, Value::Bool(value))
    }

    pub fn build(self) -> ContentGroup {
        ContentGroup::from(self.items)
    }
}
