//! Data model types for the document graph.
//!
//! - Primitives (names, assets, checksums, timestamps)
//! - Values (tagged primitive instances)
//! - Content (labelled items grouped in order)
//! - Documents and edges
//! - Builders (ergonomic construction)

pub mod asset;
pub mod builder;
pub mod checksum;
pub mod content;
pub mod document;
pub mod edge;
pub mod name;
pub mod time_point;
pub mod value;

pub use asset::{Asset, Symbol};
pub use builder::{ContentGroupBuilder, DocumentBuilder};
pub use checksum::Checksum256;
pub use content::{ContentGroup, ContentGroups, ContentItem, CONTENT_GROUP_LABEL};
pub use document::{Certificate, Document};
pub use edge::Edge;
pub use name::Name;
pub use time_point::TimePoint;
pub use value::{Value, ValueTag, ALL_TAGS};
