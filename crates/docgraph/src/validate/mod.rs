//! Semantic validation of content before it is submitted to a ledger.
//!
//! Structural checks happen while decoding; these rules cover what a well
//! formed payload can still get wrong.

use crate::error::ValidationError;
use crate::limits::MAX_LABEL_LEN;
use crate::model::{ContentGroup, Document, Value, ValueTag, CONTENT_GROUP_LABEL};

/// Validates content groups:
/// - there is at least one group and no group is empty
/// - labels are non-empty and at most `MAX_LABEL_LEN` bytes
/// - a `content_group_label` item holds a string
/// - every value passes [`validate_value`]
pub fn validate_content_groups(groups: &[ContentGroup]) -> Result<(), ValidationError> {
    if groups.is_empty() {
        return Err(ValidationError::EmptyContentGroups);
    }

    for (index, group) in groups.iter().enumerate() {
        if group.is_empty() {
            return Err(ValidationError::EmptyContentGroup { index });
        }
        for (item_index, item) in group.iter().enumerate() {
            if item.label.is_empty() {
                return Err(ValidationError::EmptyLabel {
                    group: index,
                    item: item_index,
                });
            }
            if item.label.len() > MAX_LABEL_LEN {
                return Err(ValidationError::LabelTooLong {
                    group: index,
                    len: item.label.len(),
                    max: MAX_LABEL_LEN,
                });
            }
            if item.label == CONTENT_GROUP_LABEL && item.value.tag() != ValueTag::String {
                return Err(ValidationError::GroupLabelNotString { index });
            }
            if let Some(reason) = validate_value(&item.value) {
                return Err(ValidationError::InvalidValue {
                    label: item.label.clone(),
                    reason,
                });
            }
        }
    }

    Ok(())
}

pub fn validate_document(document: &Document) -> Result<(), ValidationError> {
    validate_content_groups(&document.content_groups)
}

/// Validates a single value. Returns an error description if invalid.
pub fn validate_value(value: &Value) -> Option<&'static str> {
    value.validate()
}
