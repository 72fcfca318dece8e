//! Graph client: document and edge workflows composed over a [`Ledger`].

pub mod edges;

use tracing::{debug, info, warn};

use crate::codec::{Action, PackedAction};
use crate::config::GraphConfig;
use crate::error::{GraphError, LedgerError, ObjectKind};
use crate::ledger::Ledger;
use crate::model::{Checksum256, ContentGroups, Document, Edge, Name};
use crate::validate::validate_content_groups;

/// Stateless front end to a ledger.
///
/// Holds no caches; every call goes to the ledger. Get-or-create is
/// read-before-write, so deduplication under concurrent callers depends on
/// the ledger rejecting duplicate content addresses.
#[derive(Debug, Clone)]
pub struct GraphClient<L: Ledger> {
    ledger: L,
    config: GraphConfig,
}

impl<L: Ledger> GraphClient<L> {
    pub fn new(ledger: L, config: GraphConfig) -> Self {
        Self { ledger, config }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    // =========================================================================
    // Documents
    // =========================================================================

    /// Returns the document with the candidate's content, creating it if needed.
    ///
    /// The flag is true when this call created the document. Content equal
    /// candidates resolve to the same document whatever their creator.
    pub fn get_or_new(&self, creator: Name, candidate: &Document) -> Result<(Document, bool), GraphError> {
        validate_content_groups(&candidate.content_groups)?;
        let address = self.ledger.content_address(&candidate.content_groups)?;

        match self.ledger.get_document(&address) {
            Ok(existing) => {
                debug!(hash = %address, "document exists");
                return Ok((existing, false));
            }
            Err(LedgerError::NotFound { .. }) => {}
            Err(e) => return Err(e.into()),
        }

        match self.ledger.submit_create_document(creator, candidate.content_groups.clone()) {
            Ok(created) => {
                self.verify(candidate, &created, &address)?;
                info!(hash = %address, %creator, "document created");
                Ok((created, true))
            }
            Err(LedgerError::AlreadyExists {
                kind: ObjectKind::Document,
                ..
            }) => {
                // Lost a race with another creator.
                warn!(hash = %address, "document created concurrently, loading winner");
                Ok((self.ledger.get_document(&address)?, false))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Creates a document; duplicate content is an error.
    pub fn create_document(&self, creator: Name, content_groups: ContentGroups) -> Result<Document, GraphError> {
        validate_content_groups(&content_groups)?;
        let candidate = Document::new(creator, content_groups);
        let created = self
            .ledger
            .submit_create_document(creator, candidate.content_groups.clone())?;
        let hash = created.hash.unwrap_or_else(|| candidate.content_address());
        self.verify(&candidate, &created, &hash)?;
        info!(%hash, %creator, "document created");
        Ok(created)
    }

    pub fn load_document(&self, hash: &Checksum256) -> Result<Document, GraphError> {
        Ok(self.ledger.get_document(hash)?)
    }

    /// Irreversibly removes a document.
    pub fn erase_document(&self, hash: &Checksum256) -> Result<(), GraphError> {
        self.ledger.erase_document(hash)?;
        info!(%hash, "document erased");
        Ok(())
    }

    /// Creates a new document derived from the committed document at `hash`.
    ///
    /// The fork gets its own content address; the parent is left untouched.
    pub fn fork_document(
        &self,
        hash: &Checksum256,
        creator: Name,
        content_groups: ContentGroups,
    ) -> Result<Document, GraphError> {
        validate_content_groups(&content_groups)?;
        let candidate = Document::new(creator, content_groups);
        let forked = self
            .ledger
            .fork_document(hash, creator, candidate.content_groups.clone())?;
        let fork = forked.hash.unwrap_or_else(|| candidate.content_address());
        self.verify(&candidate, &forked, &fork)?;
        info!(parent = %hash, hash = %fork, %creator, "document forked");
        Ok(forked)
    }

    pub fn certify_document(&self, certifier: Name, hash: &Checksum256, notes: &str) -> Result<Document, GraphError> {
        let document = self.ledger.certify_document(certifier, hash, notes)?;
        info!(%hash, %certifier, "document certified");
        Ok(document)
    }

    fn verify(&self, candidate: &Document, created: &Document, address: &Checksum256) -> Result<(), GraphError> {
        if self.config.verify_round_trip && !created.is_equal(candidate) {
            let hash = created.hash.unwrap_or(*address);
            warn!(%hash, "ledger returned different content");
            return Err(GraphError::RoundTripMismatch { hash });
        }
        Ok(())
    }

    /// Packs `action` for submission to the configured contract.
    pub fn pack_action(&self, action: &Action) -> PackedAction {
        action.to_packed(self.config.contract)
    }

    // =========================================================================
    // Edge mutations
    // =========================================================================

    pub fn create_edge(
        &self,
        creator: Name,
        from: &Checksum256,
        to: &Checksum256,
        edge_name: Name,
    ) -> Result<Edge, GraphError> {
        let edge = self.ledger.submit_create_edge(creator, from, to, edge_name)?;
        debug!(%from, %to, %edge_name, "edge created");
        Ok(edge)
    }

    /// Removes the edge keyed by `(from, to, edge_name)`; a missing edge is NotFound.
    pub fn remove_edge(&self, from: &Checksum256, to: &Checksum256, edge_name: Name) -> Result<(), GraphError> {
        self.ledger.remove_edge(from, to, edge_name)?;
        debug!(%from, %to, %edge_name, "edge removed");
        Ok(())
    }

    pub fn remove_edges_between(&self, from: &Checksum256, to: &Checksum256) -> Result<usize, GraphError> {
        Ok(self.ledger.remove_edges_between(from, to)?)
    }

    pub fn remove_edges_from_named(&self, from: &Checksum256, edge_name: Name) -> Result<usize, GraphError> {
        Ok(self.ledger.remove_edges_from_named(from, edge_name)?)
    }

    // =========================================================================
    // Edge queries
    // =========================================================================

    pub fn edges_from(&self, document: &Document) -> Result<Vec<Edge>, GraphError> {
        let hash = committed(document)?;
        self.query(|all| edges::edges_from(all, &hash))
    }

    pub fn edges_to(&self, document: &Document) -> Result<Vec<Edge>, GraphError> {
        let hash = committed(document)?;
        self.query(|all| edges::edges_to(all, &hash))
    }

    pub fn edges_from_by_name(&self, document: &Document, edge_name: Name) -> Result<Vec<Edge>, GraphError> {
        let hash = committed(document)?;
        self.query(|all| edges::edges_from_named(all, &hash, edge_name))
    }

    pub fn edges_to_by_name(&self, document: &Document, edge_name: Name) -> Result<Vec<Edge>, GraphError> {
        let hash = committed(document)?;
        self.query(|all| edges::edges_to_named(all, &hash, edge_name))
    }

    pub fn edge_exists(&self, from: &Document, to: &Document, edge_name: Name) -> Result<bool, GraphError> {
        let (from, to) = (committed(from)?, committed(to)?);
        let all = self.ledger.list_all_edges()?;
        Ok(edges::edge_exists(&all, &from, &to, edge_name))
    }

    fn query<F>(&self, filter: F) -> Result<Vec<Edge>, GraphError>
    where
        F: for<'a> FnOnce(&'a [Edge]) -> Vec<&'a Edge>,
    {
        let all = self.ledger.list_all_edges()?;
        Ok(filter(&all).into_iter().cloned().collect())
    }
}

fn committed(document: &Document) -> Result<Checksum256, GraphError> {
    document.hash.ok_or(GraphError::Uncommitted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::MemoryLedger;
    use crate::model::document::HEALER_JSON;
    use crate::model::{ContentGroup, ContentItem, TimePoint, Value};

    fn name(s: &str) -> Name {
        Name::new(s).unwrap()
    }

    fn client() -> GraphClient<MemoryLedger> {
        GraphClient::new(MemoryLedger::new(), GraphConfig::default())
    }

    fn candidate(title: &str) -> Document {
        Document::from_item(name("alice"), "title", title)
    }

    #[test]
    fn test_get_or_new_is_idempotent() {
        let client = client();
        let fixture = Document::from_json_str(HEALER_JSON).unwrap();

        let (first, created) = client.get_or_new(name("johnnyhypha1"), &fixture).unwrap();
        assert!(created);
        assert!(first.is_equal(&fixture));
        assert_eq!(first.creator, name("johnnyhypha1"));

        let (second, created) = client.get_or_new(name("johnnyhypha1"), &fixture).unwrap();
        assert!(!created);
        assert_eq!(second.hash, first.hash);

        // A different creator resolves to the first document.
        let (third, created) = client.get_or_new(name("bob"), &fixture).unwrap();
        assert!(!created);
        assert_eq!(third.hash, first.hash);
        assert_eq!(third.creator, name("johnnyhypha1"));
        assert_eq!(client.ledger().document_count(), 1);
    }

    #[test]
    fn test_get_or_new_rejects_invalid_content() {
        let client = client();
        let empty = Document::new(name("alice"), Vec::new());
        assert!(matches!(
            client.get_or_new(name("alice"), &empty),
            Err(GraphError::Validation(_))
        ));
    }

    #[test]
    fn test_load_and_erase() {
        let client = client();
        let (doc, _) = client.get_or_new(name("alice"), &candidate("one")).unwrap();
        let hash = doc.hash.unwrap();

        assert_eq!(client.load_document(&hash).unwrap(), doc);
        client.erase_document(&hash).unwrap();
        let err = client.load_document(&hash).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_create_document_rejects_duplicates() {
        let client = client();
        let groups = candidate("one").content_groups;
        client.create_document(name("alice"), groups.clone()).unwrap();
        let err = client.create_document(name("bob"), groups).unwrap_err();
        assert!(matches!(
            err,
            GraphError::Ledger(LedgerError::AlreadyExists {
                kind: ObjectKind::Document,
                ..
            })
        ));
    }

    #[test]
    fn test_get_or_new_ignores_sub_millisecond_time() {
        let client = client();
        let at = |us| Document::from_item(name("alice"), "start", TimePoint::from_micros(us).unwrap());
        let (first, created) = client.get_or_new(name("alice"), &at(1_602_856_952_500_000)).unwrap();
        assert!(created);
        let (second, created) = client.get_or_new(name("alice"), &at(1_602_856_952_500_123)).unwrap();
        assert!(!created);
        assert_eq!(second.hash, first.hash);
        assert_eq!(client.ledger().document_count(), 1);
    }

    #[test]
    fn test_fork_document() {
        let client = client();
        let (parent, _) = client.get_or_new(name("alice"), &candidate("v1")).unwrap();
        let parent_hash = parent.hash.unwrap();

        let fork = client
            .fork_document(&parent_hash, name("bob"), candidate("v2").content_groups)
            .unwrap();
        assert_ne!(fork.hash, parent.hash);
        assert_eq!(fork.hash, Some(candidate("v2").content_address()));
        assert_eq!(fork.creator, name("bob"));
        assert_eq!(client.load_document(&parent_hash).unwrap(), parent);

        // The fork is an ordinary document for get-or-create.
        let (found, created) = client.get_or_new(name("carol"), &candidate("v2")).unwrap();
        assert!(!created);
        assert_eq!(found.hash, fork.hash);
    }

    #[test]
    fn test_fork_errors() {
        let client = client();
        let missing = Checksum256::from_bytes([5; 32]);
        let err = client
            .fork_document(&missing, name("bob"), candidate("v2").content_groups)
            .unwrap_err();
        assert!(err.is_not_found());

        assert!(matches!(
            client.fork_document(&missing, name("bob"), Vec::new()),
            Err(GraphError::Validation(_))
        ));

        let (parent, _) = client.get_or_new(name("alice"), &candidate("v1")).unwrap();
        assert!(matches!(
            client.fork_document(&parent.hash.unwrap(), name("bob"), candidate("v1").content_groups),
            Err(GraphError::Ledger(LedgerError::AlreadyExists { .. }))
        ));
        assert_eq!(client.ledger().document_count(), 1);
    }

    #[test]
    fn test_pack_action_uses_configured_contract() {
        let action = Action::Erase {
            hash: Checksum256::from_bytes([6; 32]),
        };
        let default = client().pack_action(&action);
        assert_eq!(default.contract, name("docs"));

        let config = GraphConfig::new(name("hyphadao"));
        let packed = GraphClient::new(MemoryLedger::new(), config).pack_action(&action);
        assert_eq!(packed.contract, name("hyphadao"));
        assert_eq!(packed.action, name("erase"));
        assert_eq!(packed.data, action.pack());
        assert_eq!(packed.unpack().unwrap(), action);
    }

    #[test]
    fn test_certify() {
        let client = client();
        let (doc, _) = client.get_or_new(name("alice"), &candidate("one")).unwrap();
        let certified = client
            .certify_document(name("dao.hypha"), &doc.hash.unwrap(), "approved")
            .unwrap();
        assert_eq!(certified.certificates[0].certifier, name("dao.hypha"));
        // Certificates do not change content identity.
        assert!(certified.is_equal(&doc));
    }

    #[test]
    fn test_edge_queries() {
        let client = client();
        let (a, _) = client.get_or_new(name("alice"), &candidate("a")).unwrap();
        let (b, _) = client.get_or_new(name("alice"), &candidate("b")).unwrap();
        let (ha, hb) = (a.hash.unwrap(), b.hash.unwrap());

        client.create_edge(name("alice"), &ha, &hb, name("edge1")).unwrap();

        let from_a = client.edges_from(&a).unwrap();
        assert_eq!(from_a.len(), 1);
        assert_eq!(from_a[0].edge_name, name("edge1"));
        assert!(client.edges_to(&a).unwrap().is_empty());
        assert_eq!(client.edges_to(&b).unwrap().len(), 1);
        assert_eq!(client.edges_from_by_name(&a, name("edge1")).unwrap().len(), 1);
        assert!(client.edges_from_by_name(&a, name("wrongedge")).unwrap().is_empty());
        assert_eq!(client.edges_to_by_name(&b, name("edge1")).unwrap().len(), 1);
        assert!(client.edge_exists(&a, &b, name("edge1")).unwrap());
        assert!(!client.edge_exists(&a, &b, name("doesnotexist")).unwrap());
    }

    #[test]
    fn test_uncommitted_document_in_edge_query() {
        let client = client();
        assert_eq!(client.edges_from(&candidate("a")), Err(GraphError::Uncommitted));
    }

    #[test]
    fn test_remove_many_edges() {
        let client = client();
        let (root, _) = client.get_or_new(name("alice"), &candidate("root")).unwrap();
        let from = root.hash.unwrap();
        let edge_name = name("test");

        let targets: Vec<Checksum256> = (0..5)
            .map(|i| {
                let (doc, _) = client.get_or_new(name("alice"), &candidate(&format!("leaf {i}"))).unwrap();
                let to = doc.hash.unwrap();
                client.create_edge(name("alice"), &from, &to, edge_name).unwrap();
                to
            })
            .collect();
        assert_eq!(client.edges_from(&root).unwrap().len(), 5);

        for to in &targets {
            client.remove_edge(&from, to, edge_name).unwrap();
        }
        assert!(client.ledger().list_all_edges().unwrap().is_empty());

        let err = client.remove_edge(&from, &targets[0], edge_name).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_bulk_edge_removal() {
        let client = client();
        let (a, _) = client.get_or_new(name("alice"), &candidate("a")).unwrap();
        let (b, _) = client.get_or_new(name("alice"), &candidate("b")).unwrap();
        let (ha, hb) = (a.hash.unwrap(), b.hash.unwrap());
        client.create_edge(name("alice"), &ha, &hb, name("owns")).unwrap();
        client.create_edge(name("alice"), &ha, &hb, name("likes")).unwrap();
        client.create_edge(name("alice"), &hb, &ha, name("owns")).unwrap();

        assert_eq!(client.remove_edges_from_named(&ha, name("owns")).unwrap(), 1);
        assert_eq!(client.remove_edges_between(&ha, &hb).unwrap(), 1);
        assert_eq!(client.remove_edges_between(&ha, &hb).unwrap(), 0);
        assert_eq!(client.edges_from(&b).unwrap().len(), 1);
    }

    /// Wraps a memory ledger to inject faults and rewrite content.
    #[derive(Clone, Default)]
    struct FaultyLedger {
        inner: MemoryLedger,
        fail_reads: bool,
        tamper_creates: bool,
    }

    impl Ledger for FaultyLedger {
        fn submit_create_document(&self, creator: Name, mut groups: ContentGroups) -> Result<Document, LedgerError> {
            if self.tamper_creates {
                groups[0].push(ContentItem::new("injected", Value::Bool(true)));
            }
            self.inner.submit_create_document(creator, groups)
        }

        fn get_document(&self, hash: &Checksum256) -> Result<Document, LedgerError> {
            if self.fail_reads {
                return Err(LedgerError::Transport {
                    operation: "get_document",
                    message: "connection reset".to_string(),
                });
            }
            self.inner.get_document(hash)
        }

        fn erase_document(&self, hash: &Checksum256) -> Result<(), LedgerError> {
            self.inner.erase_document(hash)
        }

        fn fork_document(
            &self,
            hash: &Checksum256,
            creator: Name,
            mut groups: ContentGroups,
        ) -> Result<Document, LedgerError> {
            if self.tamper_creates {
                groups[0].push(ContentItem::new("injected", Value::Bool(true)));
            }
            self.inner.fork_document(hash, creator, groups)
        }

        fn certify_document(&self, certifier: Name, hash: &Checksum256, notes: &str) -> Result<Document, LedgerError> {
            self.inner.certify_document(certifier, hash, notes)
        }

        fn submit_create_edge(
            &self,
            creator: Name,
            from: &Checksum256,
            to: &Checksum256,
            edge_name: Name,
        ) -> Result<Edge, LedgerError> {
            self.inner.submit_create_edge(creator, from, to, edge_name)
        }

        fn remove_edge(&self, from: &Checksum256, to: &Checksum256, edge_name: Name) -> Result<(), LedgerError> {
            self.inner.remove_edge(from, to, edge_name)
        }

        fn remove_edges_between(&self, from: &Checksum256, to: &Checksum256) -> Result<usize, LedgerError> {
            self.inner.remove_edges_between(from, to)
        }

        fn remove_edges_from_named(&self, from: &Checksum256, edge_name: Name) -> Result<usize, LedgerError> {
            self.inner.remove_edges_from_named(from, edge_name)
        }

        fn list_all_edges(&self) -> Result<Vec<Edge>, LedgerError> {
            self.inner.list_all_edges()
        }
    }

    #[test]
    fn test_transport_error_is_not_not_found() {
        let ledger = FaultyLedger {
            fail_reads: true,
            ..Default::default()
        };
        let client = GraphClient::new(ledger, GraphConfig::default());
        let err = client.get_or_new(name("alice"), &candidate("a")).unwrap_err();
        assert!(!err.is_not_found());
        assert!(matches!(err, GraphError::Ledger(LedgerError::Transport { .. })));
        // Nothing was created on a failed read.
        assert_eq!(client.ledger().inner.document_count(), 0);
    }

    #[test]
    fn test_round_trip_mismatch() {
        let ledger = FaultyLedger {
            tamper_creates: true,
            ..Default::default()
        };
        let client = GraphClient::new(ledger.clone(), GraphConfig::default());
        assert!(matches!(
            client.get_or_new(name("alice"), &candidate("a")),
            Err(GraphError::RoundTripMismatch { .. })
        ));

        let parent = ledger.inner.submit_create_document(name("alice"), candidate("p").content_groups).unwrap();
        assert!(matches!(
            client.fork_document(&parent.hash.unwrap(), name("alice"), candidate("f").content_groups),
            Err(GraphError::RoundTripMismatch { .. })
        ));

        let lenient = GraphClient::new(ledger, GraphConfig::default().with_verify_round_trip(false));
        let (doc, created) = lenient.get_or_new(name("alice"), &candidate("b")).unwrap();
        assert!(created);
        assert_eq!(doc.get_content("injected").unwrap(), &Value::Bool(true));
    }

    #[test]
    fn test_concurrent_get_or_new_converges() {
        let ledger = MemoryLedger::new();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let client = GraphClient::new(ledger.clone(), GraphConfig::default());
                std::thread::spawn(move || {
                    let creator = if i % 2 == 0 { name("alice") } else { name("bob") };
                    let candidate = Document::from_group(
                        creator,
                        ContentGroup::from(vec![ContentItem::new("title", "shared")]),
                    );
                    client.get_or_new(creator, &candidate).unwrap()
                })
            })
            .collect();

        let results: Vec<(Document, bool)> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let hash = results[0].0.hash;
        assert!(results.iter().all(|(doc, _)| doc.hash == hash));
        assert_eq!(results.iter().filter(|(_, created)| *created).count(), 1);
        assert_eq!(ledger.document_count(), 1);
    }
}
