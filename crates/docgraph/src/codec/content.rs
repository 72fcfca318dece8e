//! Packed content groups and the local content address.

use crate::codec::primitives::{Reader, Writer};
use crate::codec::value::{pack_value, unpack_value};
use crate::error::DecodeError;
use crate::limits::{MAX_CONTENT_GROUPS, MAX_GROUP_ITEMS, MAX_STRING_LEN};
use crate::model::{Checksum256, ContentGroup, ContentGroups, ContentItem};

/// Writes content groups: group count, then per group an item count and
/// each item as label string followed by its packed value.
pub fn write_content_groups(writer: &mut Writer, groups: &[ContentGroup]) {
    writer.write_len(groups.len());
    for group in groups {
        writer.write_len(group.len());
        for item in group {
            writer.write_string(&item.label);
            pack_value(writer, &item.value);
        }
    }
}

pub fn read_content_groups(reader: &mut Reader<'_>) -> Result<ContentGroups, DecodeError> {
    let group_count = reader.read_len(MAX_CONTENT_GROUPS, "content_groups")?;
    let mut groups = Vec::with_capacity(group_count);
    for _ in 0..group_count {
        let item_count = reader.read_len(MAX_GROUP_ITEMS, "content_group")?;
        let mut items = Vec::with_capacity(item_count);
        for _ in 0..item_count {
            let label = reader.read_string(MAX_STRING_LEN, "content_item.label")?;
            let value = unpack_value(reader)?;
            items.push(ContentItem { label, value });
        }
        groups.push(ContentGroup::from(items));
    }
    Ok(groups)
}

/// Packs content groups into a standalone buffer.
pub fn pack_content_groups(groups: &[ContentGroup]) -> Vec<u8> {
    let mut writer = Writer::with_capacity(64 * groups.len().max(1));
    write_content_groups(&mut writer, groups);
    writer.into_bytes()
}

/// Unpacks a buffer produced by [`pack_content_groups`]. Trailing bytes are an error.
pub fn unpack_content_groups(data: &[u8]) -> Result<ContentGroups, DecodeError> {
    let mut reader = Reader::new(data);
    let groups = read_content_groups(&mut reader)?;
    reader.finish("content_groups")?;
    Ok(groups)
}

/// SHA-256 of the packed content groups.
///
/// The creator is not part of the input, so identical content from
/// different creators shares an address.
pub fn content_address(groups: &[ContentGroup]) -> Checksum256 {
    Checksum256::digest(&pack_content_groups(groups))
}
