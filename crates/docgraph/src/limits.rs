//! Security limits for decoding untrusted input.

/// Maximum bytes in a varuint32.
pub const MAX_VARUINT32_BYTES: usize = 5;

/// Maximum length of any string payload (label, text value, notes), in bytes.
pub const MAX_STRING_LEN: usize = 1024 * 1024;

/// Maximum number of content groups in one document.
pub const MAX_CONTENT_GROUPS: usize = 4096;

/// Maximum number of items in one content group.
pub const MAX_GROUP_ITEMS: usize = 4096;

/// Maximum length of a content label, in bytes.
pub const MAX_LABEL_LEN: usize = 256;
