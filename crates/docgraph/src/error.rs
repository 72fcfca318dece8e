//! Error types for decoding, validation, ledger access and graph operations.

use thiserror::Error;

use crate::model::{Checksum256, Name};

/// Error while decoding a value, a primitive, or a packed binary payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    // === Variant registry ===
    #[error("unknown variant tag: {tag:?}")]
    UnknownVariantTag { tag: String },

    #[error("unknown variant index: {index}")]
    UnknownVariantIndex { index: u32 },

    #[error("invalid payload for {tag}: expected {expected}")]
    InvalidPayload {
        tag: &'static str,
        expected: &'static str,
    },

    // === Primitives ===
    #[error("invalid name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("invalid asset {asset:?}: {reason}")]
    InvalidAsset { asset: String, reason: &'static str },

    #[error("invalid checksum256 {value:?}: {reason}")]
    InvalidChecksum { value: String, reason: &'static str },

    #[error("invalid time point {value:?}: {reason}")]
    InvalidTimePoint { value: String, reason: String },

    // === Packed binary ===
    #[error("unexpected end of input while reading {context}")]
    UnexpectedEof { context: &'static str },

    #[error("varuint32 exceeds maximum length (5 bytes)")]
    VarintTooLong,

    #[error("{field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("invalid UTF-8 in {field}")]
    InvalidUtf8 { field: &'static str },

    #[error("invalid bool value: {value} (expected 0x00 or 0x01)")]
    InvalidBool { value: u8 },

    #[error("{count} trailing bytes after {context}")]
    TrailingBytes { context: &'static str, count: usize },

    #[error("unknown action: {name}")]
    UnknownAction { name: Name },
}

/// A label lookup that matched nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("content not found: label {label:?} in document {}", display_hash(.document_hash))]
pub struct ContentNotFoundError {
    pub label: String,
    pub document_hash: Option<Checksum256>,
}

fn display_hash(hash: &Option<Checksum256>) -> String {
    match hash {
        Some(h) => h.to_string(),
        None => "<uncommitted>".to_string(),
    }
}

/// Error during semantic validation of content before submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("document has no content groups")]
    EmptyContentGroups,

    #[error("content group {index} is empty")]
    EmptyContentGroup { index: usize },

    #[error("content group {group} item {item} has an empty label")]
    EmptyLabel { group: usize, item: usize },

    #[error("content group {group} label length {len} exceeds maximum {max}")]
    LabelTooLong { group: usize, len: usize, max: usize },

    #[error("content_group_label in group {index} must be a string")]
    GroupLabelNotString { index: usize },

    #[error("invalid value for label {label:?}: {reason}")]
    InvalidValue { label: String, reason: &'static str },
}

/// Kind of ledger object an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Document,
    Edge,
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectKind::Document => f.write_str("document"),
            ObjectKind::Edge => f.write_str("edge"),
        }
    }
}

/// Error reported by a ledger collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The requested document or edge does not exist.
    #[error("{kind} not found: {key}")]
    NotFound { kind: ObjectKind, key: String },

    /// A uniqueness constraint rejected the write.
    #[error("{kind} exists already: {key}")]
    AlreadyExists { kind: ObjectKind, key: String },

    /// The ledger refused the operation (authorization, malformed content, ...).
    #[error("{operation} rejected for {key}: {message}")]
    Rejected {
        operation: &'static str,
        key: String,
        message: String,
    },

    /// The ledger could not be reached or answered garbage.
    #[error("transport error during {operation}: {message}")]
    Transport {
        operation: &'static str,
        message: String,
    },
}

impl LedgerError {
    pub fn document_not_found(hash: &Checksum256) -> Self {
        LedgerError::NotFound {
            kind: ObjectKind::Document,
            key: hash.to_string(),
        }
    }

    pub fn edge_not_found(from: &Checksum256, to: &Checksum256, edge_name: Name) -> Self {
        LedgerError::NotFound {
            kind: ObjectKind::Edge,
            key: edge_key(from, to, edge_name),
        }
    }
}

/// Formats the (from, to, name) removal key used in edge errors and logs.
pub fn edge_key(from: &Checksum256, to: &Checksum256, edge_name: Name) -> String {
    format!("{from} -{edge_name}-> {to}")
}

/// Error returned by [`GraphClient`](crate::graph::GraphClient) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The document has no hash yet, so it cannot take part in edges.
    #[error("document has not been committed to the ledger")]
    Uncommitted,

    /// The ledger returned a document whose content differs from the candidate.
    #[error("ledger returned different content for document {hash}")]
    RoundTripMismatch { hash: Checksum256 },
}

impl GraphError {
    /// Returns true if the ledger reported the object as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GraphError::Ledger(LedgerError::NotFound { .. }))
    }
}
