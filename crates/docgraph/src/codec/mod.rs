//! Wire encodings: the JSON value form and the packed binary form used for
//! content addressing and contract action payloads.

pub mod action;
pub mod content;
pub mod primitives;
pub mod value;

pub use action::{Action, PackedAction};
pub use content::{content_address, pack_content_groups, unpack_content_groups};
pub use primitives::{Reader, Writer};
pub use value::{decode_value, encode_value, pack_value, unpack_value};
