//! Labelled content items and the groups that bundle them.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::model::Value;

/// Label of the item that names its enclosing group.
pub const CONTENT_GROUP_LABEL: &str = "content_group_label";

/// A labelled typed value.
///
/// Labels are not unique within a group; lookups return the first match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentItem {
    pub label: String,
    pub value: Value,
}

impl ContentItem {
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// An ordered bundle of content items. Serialized as a bare JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentGroup(Vec<ContentItem>);

/// Ordered sequence of content groups.
pub type ContentGroups = Vec<ContentGroup>;

impl ContentGroup {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, item: ContentItem) {
        self.0.push(item);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContentItem> {
        self.0.iter()
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.0
    }

    /// Returns the first item with `label`.
    pub fn get(&self, label: &str) -> Option<&Value> {
        self.0.iter().find(|item| item.label == label).map(|item| &item.value)
    }

    /// Returns the group's own name, if it carries a string `content_group_label`.
    pub fn label(&self) -> Option<&str> {
        self.get(CONTENT_GROUP_LABEL).and_then(Value::as_str)
    }

    /// Replaces the value of the first item sharing `item.label`, or appends.
    pub fn insert_or_replace(&mut self, item: ContentItem) {
        match self.0.iter_mut().find(|existing| existing.label == item.label) {
            Some(existing) => existing.value = item.value,
            None => self.0.push(item),
        }
    }
}

impl Index<usize> for ContentGroup {
    type Output = ContentItem;

    fn index(&self, index: usize) -> &ContentItem {
        &self.0[index]
    }
}

impl From<Vec<ContentItem>> for ContentGroup {
    fn from(items: Vec<ContentItem>) -> Self {
        Self(items)
    }
}

impl FromIterator<ContentItem> for ContentGroup {
    fn from_iter<I: IntoIterator<Item = ContentItem>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ContentGroup {
    type Item = ContentItem;
    type IntoIter = std::vec::IntoIter<ContentItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ContentGroup {
    type Item = &'a ContentItem;
    type IntoIter = std::slice::Iter<'a, ContentItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
