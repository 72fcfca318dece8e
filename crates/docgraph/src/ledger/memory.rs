use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use super::Ledger;
use crate::codec;
use crate::error::{edge_key, LedgerError, ObjectKind};
use crate::model::{Certificate, Checksum256, ContentGroups, Document, Edge, Name, TimePoint};
use crate::validate::validate_content_groups;

/// An in-process ledger.
///
/// Clones share state. Content-address uniqueness and edge-key uniqueness
/// are checked under the write lock, so racing writers see one winner.
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    state: Arc<RwLock<State>>,
}

#[derive(Debug, Default)]
struct State {
    documents: FxHashMap<Checksum256, Document>,
    /// Edges in creation order.
    edges: Vec<Edge>,
    next_document_id: u64,
    next_edge_id: u64,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document_count(&self) -> usize {
        self.state.read().documents.len()
    }

    pub fn edge_count(&self) -> usize {
        self.state.read().edges.len()
    }
}

impl State {
    fn document_mut(&mut self, hash: &Checksum256) -> Result<&mut Document, LedgerError> {
        self.documents
            .get_mut(hash)
            .ok_or_else(|| LedgerError::document_not_found(hash))
    }

    fn require_document(&self, hash: &Checksum256) -> Result<(), LedgerError> {
        if self.documents.contains_key(hash) {
            Ok(())
        } else {
            Err(LedgerError::document_not_found(hash))
        }
    }

    /// Stores a new document under its content address.
    fn insert_document(
        &mut self,
        hash: Checksum256,
        creator: Name,
        content_groups: ContentGroups,
    ) -> Result<Document, LedgerError> {
        if self.documents.contains_key(&hash) {
            return Err(LedgerError::AlreadyExists {
                kind: ObjectKind::Document,
                key: hash.to_string(),
            });
        }

        let id = self.next_document_id;
        self.next_document_id += 1;
        let document = Document {
            id: Some(id),
            hash: Some(hash),
            creator,
            content_groups,
            certificates: Vec::new(),
            created_date: Some(TimePoint::now()),
        };
        self.documents.insert(hash, document.clone());
        Ok(document)
    }

    fn remove_edges_where(&mut self, keep: impl Fn(&Edge) -> bool) -> usize {
        let before = self.edges.len();
        self.edges.retain(|edge| keep(edge));
        before - self.edges.len()
    }
}

fn checked_address(operation: &'static str, content_groups: &ContentGroups) -> Result<Checksum256, LedgerError> {
    let hash = codec::content_address(content_groups);
    validate_content_groups(content_groups).map_err(|e| LedgerError::Rejected {
        operation,
        key: hash.to_string(),
        message: e.to_string(),
    })?;
    Ok(hash)
}

impl Ledger for MemoryLedger {
    fn submit_create_document(&self, creator: Name, content_groups: ContentGroups) -> Result<Document, LedgerError> {
        let hash = checked_address("create", &content_groups)?;
        let document = self.state.write().insert_document(hash, creator, content_groups)?;
        debug!(%hash, %creator, id = document.id, "document created");
        Ok(document)
    }

    fn get_document(&self, hash: &Checksum256) -> Result<Document, LedgerError> {
        self.state
            .read()
            .documents
            .get(hash)
            .cloned()
            .ok_or_else(|| LedgerError::document_not_found(hash))
    }

    fn erase_document(&self, hash: &Checksum256) -> Result<(), LedgerError> {
        let mut state = self.state.write();
        if state.documents.remove(hash).is_none() {
            return Err(LedgerError::document_not_found(hash));
        }
        let edges_removed = state.remove_edges_where(|e| e.from_node != *hash && e.to_node != *hash);
        info!(%hash, edges_removed, "document erased");
        Ok(())
    }

    fn fork_document(
        &self,
        hash: &Checksum256,
        creator: Name,
        content_groups: ContentGroups,
    ) -> Result<Document, LedgerError> {
        let fork = checked_address("fork", &content_groups)?;
        let mut state = self.state.write();
        state.require_document(hash)?;
        let document = state.insert_document(fork, creator, content_groups)?;
        debug!(parent = %hash, hash = %fork, %creator, "document forked");
        Ok(document)
    }

    fn certify_document(&self, certifier: Name, hash: &Checksum256, notes: &str) -> Result<Document, LedgerError> {
        let mut state = self.state.write();
        let document = state.document_mut(hash)?;
        document.certificates.push(Certificate {
            certifier,
            notes: notes.to_string(),
            certification_date: TimePoint::now(),
        });
        debug!(%hash, %certifier, "document certified");
        Ok(document.clone())
    }

    fn submit_create_edge(
        &self,
        creator: Name,
        from: &Checksum256,
        to: &Checksum256,
        edge_name: Name,
    ) -> Result<Edge, LedgerError> {
        let mut state = self.state.write();
        state.require_document(from)?;
        state.require_document(to)?;
        if state.edges.iter().any(|e| e.connects(from, to, edge_name)) {
            return Err(LedgerError::AlreadyExists {
                kind: ObjectKind::Edge,
                key: edge_key(from, to, edge_name),
            });
        }

        let id = state.next_edge_id;
        state.next_edge_id += 1;
        let edge = Edge {
            id,
            from_node: *from,
            to_node: *to,
            edge_name,
            created_date: TimePoint::now(),
            creator: Some(creator),
        };
        state.edges.push(edge.clone());
        debug!(%from, %to, %edge_name, id, "edge created");
        Ok(edge)
    }

    fn remove_edge(&self, from: &Checksum256, to: &Checksum256, edge_name: Name) -> Result<(), LedgerError> {
        let mut state = self.state.write();
        let position = state
            .edges
            .iter()
            .position(|e| e.connects(from, to, edge_name))
            .ok_or_else(|| LedgerError::edge_not_found(from, to, edge_name))?;
        state.edges.remove(position);
        debug!(%from, %to, %edge_name, "edge removed");
        Ok(())
    }

    fn remove_edges_between(&self, from: &Checksum256, to: &Checksum256) -> Result<usize, LedgerError> {
        let removed = self
            .state
            .write()
            .remove_edges_where(|e| !(e.from_node == *from && e.to_node == *to));
        debug!(%from, %to, removed, "edges between removed");
        Ok(removed)
    }

    fn remove_edges_from_named(&self, from: &Checksum256, edge_name: Name) -> Result<usize, LedgerError> {
        let removed = self
            .state
            .write()
            .remove_edges_where(|e| !(e.from_node == *from && e.edge_name == edge_name));
        debug!(%from, %edge_name, removed, "named edges removed");
        Ok(removed)
    }

    fn list_all_edges(&self) -> Result<Vec<Edge>, LedgerError> {
        Ok(self.state.read().edges.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContentGroup, ContentItem};

    fn name(s: &str) -> Name {
        Name::new(s).unwrap()
    }

    fn groups(title: &str) -> ContentGroups {
        vec![ContentGroup::from(vec![ContentItem::new("title", title)])]
    }

    #[test]
    fn test_create_assigns_identity() {
        let ledger = MemoryLedger::new();
        let doc = ledger.submit_create_document(name("alice"), groups("one")).unwrap();
        assert_eq!(doc.id, Some(0));
        assert_eq!(doc.hash, Some(codec::content_address(&groups("one"))));
        assert!(doc.created_date.is_some());

        let second = ledger.submit_create_document(name("alice"), groups("two")).unwrap();
        assert_eq!(second.id, Some(1));
        assert_eq!(ledger.get_document(&second.hash.unwrap()).unwrap(), second);
    }

    #[test]
    fn test_duplicate_content_rejected() {
        let ledger = MemoryLedger::new();
        ledger.submit_create_document(name("alice"), groups("one")).unwrap();
        let err = ledger.submit_create_document(name("bob"), groups("one")).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::AlreadyExists {
                kind: ObjectKind::Document,
                ..
            }
        ));
        assert_eq!(ledger.document_count(), 1);
    }

    #[test]
    fn test_invalid_content_rejected() {
        let ledger = MemoryLedger::new();
        let err = ledger.submit_create_document(name("alice"), Vec::new()).unwrap_err();
        assert!(matches!(err, LedgerError::Rejected { operation: "create", .. }));
    }

    #[test]
    fn test_fork_creates_new_document() {
        let ledger = MemoryLedger::new();
        let parent = ledger.submit_create_document(name("alice"), groups("v1")).unwrap();
        let parent_hash = parent.hash.unwrap();

        let fork = ledger.fork_document(&parent_hash, name("bob"), groups("v2")).unwrap();
        assert_eq!(fork.id, Some(1));
        assert_eq!(fork.hash, Some(codec::content_address(&groups("v2"))));
        assert_eq!(fork.creator, name("bob"));
        assert_eq!(ledger.get_document(&parent_hash).unwrap(), parent);
        assert_eq!(ledger.document_count(), 2);

        // Forking to content that already exists collides like a create.
        assert!(matches!(
            ledger.fork_document(&parent_hash, name("bob"), groups("v1")),
            Err(LedgerError::AlreadyExists {
                kind: ObjectKind::Document,
                ..
            })
        ));
    }

    #[test]
    fn test_fork_requires_parent() {
        let ledger = MemoryLedger::new();
        let missing = Checksum256::from_bytes([4; 32]);
        assert!(matches!(
            ledger.fork_document(&missing, name("bob"), groups("v2")),
            Err(LedgerError::NotFound {
                kind: ObjectKind::Document,
                ..
            })
        ));
        assert!(matches!(
            ledger.fork_document(&missing, name("bob"), Vec::new()),
            Err(LedgerError::Rejected { operation: "fork", .. })
        ));
        assert_eq!(ledger.document_count(), 0);
    }

    #[test]
    fn test_get_missing_document() {
        let ledger = MemoryLedger::new();
        let err = ledger.get_document(&Checksum256::from_bytes([9; 32])).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::NotFound {
                kind: ObjectKind::Document,
                ..
            }
        ));
    }

    #[test]
    fn test_certify_appends() {
        let ledger = MemoryLedger::new();
        let hash = ledger
            .submit_create_document(name("alice"), groups("one"))
            .unwrap()
            .hash
            .unwrap();
        let doc = ledger.certify_document(name("dao.hypha"), &hash, "looks good").unwrap();
        assert_eq!(doc.certificates.len(), 1);
        assert_eq!(doc.certificates[0].notes, "looks good");
        let doc = ledger.certify_document(name("bob"), &hash, "").unwrap();
        assert_eq!(doc.certificates.len(), 2);
        assert_eq!(ledger.get_document(&hash).unwrap().certificates.len(), 2);
    }

    #[test]
    fn test_edge_lifecycle() {
        let ledger = MemoryLedger::new();
        let a = ledger.submit_create_document(name("alice"), groups("a")).unwrap().hash.unwrap();
        let b = ledger.submit_create_document(name("alice"), groups("b")).unwrap().hash.unwrap();

        let edge = ledger.submit_create_edge(name("alice"), &a, &b, name("edge1")).unwrap();
        assert_eq!(edge.creator, Some(name("alice")));
        assert!(matches!(
            ledger.submit_create_edge(name("alice"), &a, &b, name("edge1")),
            Err(LedgerError::AlreadyExists {
                kind: ObjectKind::Edge,
                ..
            })
        ));
        // Same endpoints, different name is a separate edge.
        ledger.submit_create_edge(name("alice"), &a, &b, name("edge2")).unwrap();
        assert_eq!(ledger.edge_count(), 2);

        ledger.remove_edge(&a, &b, name("edge1")).unwrap();
        assert!(matches!(
            ledger.remove_edge(&a, &b, name("edge1")),
            Err(LedgerError::NotFound { kind: ObjectKind::Edge, .. })
        ));
        assert_eq!(ledger.list_all_edges().unwrap().len(), 1);
    }

    #[test]
    fn test_edge_requires_documents() {
        let ledger = MemoryLedger::new();
        let a = ledger.submit_create_document(name("alice"), groups("a")).unwrap().hash.unwrap();
        let missing = Checksum256::from_bytes([1; 32]);
        assert!(matches!(
            ledger.submit_create_edge(name("alice"), &a, &missing, name("edge1")),
            Err(LedgerError::NotFound {
                kind: ObjectKind::Document,
                ..
            })
        ));
    }

    #[test]
    fn test_bulk_removal_counts() {
        let ledger = MemoryLedger::new();
        let hashes: Vec<Checksum256> = ["a", "b", "c"]
            .iter()
            .map(|t| ledger.submit_create_document(name("alice"), groups(t)).unwrap().hash.unwrap())
            .collect();
        let (a, b, c) = (&hashes[0], &hashes[1], &hashes[2]);

        ledger.submit_create_edge(name("alice"), a, b, name("owns")).unwrap();
        ledger.submit_create_edge(name("alice"), a, b, name("likes")).unwrap();
        ledger.submit_create_edge(name("alice"), a, c, name("owns")).unwrap();
        ledger.submit_create_edge(name("alice"), b, c, name("owns")).unwrap();

        assert_eq!(ledger.remove_edges_between(a, b).unwrap(), 2);
        assert_eq!(ledger.remove_edges_between(a, b).unwrap(), 0);
        assert_eq!(ledger.remove_edges_from_named(a, name("owns")).unwrap(), 1);
        let left = ledger.list_all_edges().unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].from_node, *b);
    }

    #[test]
    fn test_erase_removes_incident_edges() {
        let ledger = MemoryLedger::new();
        let a = ledger.submit_create_document(name("alice"), groups("a")).unwrap().hash.unwrap();
        let b = ledger.submit_create_document(name("alice"), groups("b")).unwrap().hash.unwrap();
        let c = ledger.submit_create_document(name("alice"), groups("c")).unwrap().hash.unwrap();
        ledger.submit_create_edge(name("alice"), &a, &b, name("x")).unwrap();
        ledger.submit_create_edge(name("alice"), &c, &a, name("x")).unwrap();
        ledger.submit_create_edge(name("alice"), &b, &c, name("x")).unwrap();

        ledger.erase_document(&a).unwrap();
        assert!(ledger.get_document(&a).is_err());
        assert_eq!(ledger.list_all_edges().unwrap().len(), 1);
        assert!(ledger.erase_document(&a).is_err());
    }

    #[test]
    fn test_clones_share_state() {
        let ledger = MemoryLedger::new();
        let other = ledger.clone();
        let doc = ledger.submit_create_document(name("alice"), groups("a")).unwrap();
        assert_eq!(other.get_document(&doc.hash.unwrap()).unwrap(), doc);
    }

    #[test]
    fn test_concurrent_creates_have_one_winner() {
        let ledger = MemoryLedger::new();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ledger = ledger.clone();
                std::thread::spawn(move || ledger.submit_create_document(name("alice"), groups("race")))
            })
            .collect();
        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(Result::is_ok)
            .count();
        assert_eq!(successes, 1);
        assert_eq!(ledger.document_count(), 1);
    }
}
