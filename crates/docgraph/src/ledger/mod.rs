//! The ledger seam.
//!
//! A [`Ledger`] is the system of record for documents and edges. It assigns
//! ids, hashes and timestamps and enforces uniqueness; the graph client only
//! composes these calls. [`MemoryLedger`] is an in-process implementation.

mod memory;

pub use memory::MemoryLedger;

pub use crate::error::{LedgerError, ObjectKind};

use crate::codec;
use crate::model::{Checksum256, ContentGroup, ContentGroups, Document, Edge, Name};

/// Capability surface of a document ledger.
///
/// Calls are blocking request/response. Implementations report a missing
/// document or edge as [`LedgerError::NotFound`] so callers can tell it apart
/// from transport failures.
pub trait Ledger {
    /// Content address the ledger will assign to `content_groups`.
    ///
    /// Defaults to the locally computed address; a ledger hashing content
    /// differently must override this.
    fn content_address(&self, content_groups: &[ContentGroup]) -> Result<Checksum256, LedgerError> {
        Ok(codec::content_address(content_groups))
    }

    fn submit_create_document(&self, creator: Name, content_groups: ContentGroups) -> Result<Document, LedgerError>;

    fn get_document(&self, hash: &Checksum256) -> Result<Document, LedgerError>;

    fn erase_document(&self, hash: &Checksum256) -> Result<(), LedgerError>;

    /// Creates a new document derived from the one at `hash`.
    ///
    /// The parent must exist. The fork is addressed by its own content, so
    /// content already stored under another document is `AlreadyExists`.
    fn fork_document(
        &self,
        hash: &Checksum256,
        creator: Name,
        content_groups: ContentGroups,
    ) -> Result<Document, LedgerError>;

    /// Appends a certificate and returns the updated document.
    fn certify_document(&self, certifier: Name, hash: &Checksum256, notes: &str) -> Result<Document, LedgerError>;

    fn submit_create_edge(
        &self,
        creator: Name,
        from: &Checksum256,
        to: &Checksum256,
        edge_name: Name,
    ) -> Result<Edge, LedgerError>;

    fn remove_edge(&self, from: &Checksum256, to: &Checksum256, edge_name: Name) -> Result<(), LedgerError>;

    /// Removes every edge from `from` to `to`; returns how many were removed.
    fn remove_edges_between(&self, from: &Checksum256, to: &Checksum256) -> Result<usize, LedgerError>;

    /// Removes every edge from `from` named `edge_name`; returns how many were removed.
    fn remove_edges_from_named(&self, from: &Checksum256, edge_name: Name) -> Result<usize, LedgerError>;

    fn list_all_edges(&self) -> Result<Vec<Edge>, LedgerError>;
}
