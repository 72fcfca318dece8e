//! docgraph: a content-addressed document graph.
//!
//! Documents are immutable bundles of ordered content groups, each group a
//! list of labelled typed values. A document's identity is the hash of its
//! content. Documents are linked by named, directed edges. A ledger persists
//! both and assigns ids, hashes and timestamps; this crate is the client-side
//! core in front of it.
//!
//! # Quick Start
//!
//! ```rust
//! use docgraph::{DocumentBuilder, GraphClient, GraphConfig, MemoryLedger, Name};
//!
//! let client = GraphClient::new(MemoryLedger::new(), GraphConfig::default());
//! let alice = Name::new("alice").unwrap();
//!
//! let badge = DocumentBuilder::new(alice)
//!     .group("details", |g| g.string("title", "Healer"))
//!     .build();
//! let member = DocumentBuilder::new(alice)
//!     .group("details", |g| g.name("member", alice))
//!     .build();
//!
//! let (badge, created) = client.get_or_new(alice, &badge).unwrap();
//! assert!(created);
//! let (member, _) = client.get_or_new(alice, &member).unwrap();
//!
//! let holds = Name::new("holdsbadge").unwrap();
//! client
//!     .create_edge(alice, &member.hash.unwrap(), &badge.hash.unwrap(), holds)
//!     .unwrap();
//! assert!(client.edge_exists(&member, &badge, holds).unwrap());
//! ```
//!
//! # Modules
//!
//! - [`model`]: Core data types (Name, Asset, Value, Document, Edge)
//! - [`codec`]: JSON value form, packed binary form, action payloads
//! - [`validate`]: Semantic validation before submission
//! - [`ledger`]: The ledger trait and an in-memory implementation
//! - [`graph`]: Graph client and edge queries
//! - [`config`]: Client configuration
//! - [`error`]: Error types
//! - [`limits`]: Security limits for decoding
//!
//! # Logging
//!
//! Ledger and client operations emit `tracing` events. The crate never
//! installs a subscriber.

pub mod codec;
pub mod config;
pub mod error;
pub mod graph;
pub mod ledger;
pub mod limits;
pub mod model;
pub mod util;
pub mod validate;

// Re-export commonly used types at crate root
pub use codec::{content_address, decode_value, encode_value, Action, PackedAction};
pub use config::GraphConfig;
pub use error::{ContentNotFoundError, DecodeError, GraphError, LedgerError, ObjectKind, ValidationError};
pub use graph::GraphClient;
pub use ledger::{Ledger, MemoryLedger};
pub use model::{
    Asset, Certificate, Checksum256, ContentGroup, ContentGroupBuilder, ContentGroups, ContentItem, Document,
    DocumentBuilder, Edge, Name, Symbol, TimePoint, Value, ValueTag,
};
pub use validate::{validate_content_groups, validate_document, validate_value};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
