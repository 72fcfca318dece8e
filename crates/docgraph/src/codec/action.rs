//! Packed payloads for the document contract's actions.
//!
//! A transport submits a [`PackedAction`]: the contract account, the action
//! name and the packed arguments. The payload layout follows the action's
//! argument list in order.

use crate::codec::content::{read_content_groups, write_content_groups};
use crate::codec::primitives::{Reader, Writer};
use crate::error::DecodeError;
use crate::limits::MAX_STRING_LEN;
use crate::model::{Checksum256, ContentGroups, Name};

pub const CREATE: Name = Name::from_static("create");
pub const GET_OR_CREATE: Name = Name::from_static("getorcreate");
pub const NEW_EDGE: Name = Name::from_static("newedge");
pub const REMOVE_EDGE: Name = Name::from_static("removeedge");
pub const REMOVE_EDGES_BETWEEN: Name = Name::from_static("removeedgest");
pub const REMOVE_EDGES_NAMED: Name = Name::from_static("removeedgese");
pub const CERTIFY: Name = Name::from_static("certify");
pub const ERASE: Name = Name::from_static("erase");
pub const FORK: Name = Name::from_static("fork");

/// A contract action with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Create {
        creator: Name,
        content_groups: ContentGroups,
    },
    GetOrCreate {
        creator: Name,
        content_groups: ContentGroups,
    },
    NewEdge {
        from_node: Checksum256,
        to_node: Checksum256,
        edge_name: Name,
    },
    /// With `strict`, the contract fails when nothing matches.
    RemoveEdge {
        from_node: Checksum256,
        to_node: Checksum256,
        edge_name: Name,
        strict: bool,
    },
    RemoveEdgesBetween {
        from_node: Checksum256,
        to_node: Checksum256,
        strict: bool,
    },
    RemoveEdgesNamed {
        from_node: Checksum256,
        edge_name: Name,
        strict: bool,
    },
    Certify {
        certifier: Name,
        hash: Checksum256,
        notes: String,
    },
    Erase {
        hash: Checksum256,
    },
    /// New document derived from the one at `hash`.
    Fork {
        hash: Checksum256,
        creator: Name,
        content_groups: ContentGroups,
    },
}

/// An action addressed to a contract, ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedAction {
    pub contract: Name,
    pub action: Name,
    pub data: Vec<u8>,
}

impl PackedAction {
    pub fn unpack(&self) -> Result<Action, DecodeError> {
        Action::unpack(self.action, &self.data)
    }
}

impl Action {
    pub fn to_packed(&self, contract: Name) -> PackedAction {
        PackedAction {
            contract,
            action: self.name(),
            data: self.pack(),
        }
    }

    /// The contract action name.
    pub fn name(&self) -> Name {
        match self {
            Action::Create { .. } => CREATE,
            Action::GetOrCreate { .. } => GET_OR_CREATE,
            Action::NewEdge { .. } => NEW_EDGE,
            Action::RemoveEdge { .. } => REMOVE_EDGE,
            Action::RemoveEdgesBetween { .. } => REMOVE_EDGES_BETWEEN,
            Action::RemoveEdgesNamed { .. } => REMOVE_EDGES_NAMED,
            Action::Certify { .. } => CERTIFY,
            Action::Erase { .. } => ERASE,
            Action::Fork { .. } => FORK,
        }
    }

    /// Packs the action arguments.
    pub fn pack(&self) -> Vec<u8> {
        let mut writer = Writer::new();
        match self {
            Action::Create { creator, content_groups } | Action::GetOrCreate { creator, content_groups } => {
                writer.write_name(*creator);
                write_content_groups(&mut writer, content_groups);
            }
            Action::NewEdge {
                from_node,
                to_node,
                edge_name,
            } => {
                writer.write_checksum(from_node);
                writer.write_checksum(to_node);
                writer.write_name(*edge_name);
            }
            Action::RemoveEdge {
                from_node,
                to_node,
                edge_name,
                strict,
            } => {
                writer.write_checksum(from_node);
                writer.write_checksum(to_node);
                writer.write_name(*edge_name);
                writer.write_bool(*strict);
            }
            Action::RemoveEdgesBetween {
                from_node,
                to_node,
                strict,
            } => {
                writer.write_checksum(from_node);
                writer.write_checksum(to_node);
                writer.write_bool(*strict);
            }
            Action::RemoveEdgesNamed {
                from_node,
                edge_name,
                strict,
            } => {
                writer.write_checksum(from_node);
                writer.write_name(*edge_name);
                writer.write_bool(*strict);
            }
            Action::Certify { certifier, hash, notes } => {
                writer.write_name(*certifier);
                writer.write_checksum(hash);
                writer.write_string(notes);
            }
            Action::Erase { hash } => writer.write_checksum(hash),
            Action::Fork {
                hash,
                creator,
                content_groups,
            } => {
                writer.write_checksum(hash);
                writer.write_name(*creator);
                write_content_groups(&mut writer, content_groups);
            }
        }
        writer.into_bytes()
    }

    /// Decodes the payload of the action called `name`.
    pub fn unpack(name: Name, data: &[u8]) -> Result<Action, DecodeError> {
        let mut reader = Reader::new(data);
        let r = &mut reader;
        let action = match name {
            CREATE => Action::Create {
                creator: r.read_name("create.creator")?,
                content_groups: read_content_groups(r)?,
            },
            GET_OR_CREATE => Action::GetOrCreate {
                creator: r.read_name("getorcreate.creator")?,
                content_groups: read_content_groups(r)?,
            },
            NEW_EDGE => Action::NewEdge {
                from_node: r.read_checksum("newedge.from_node")?,
                to_node: r.read_checksum("newedge.to_node")?,
                edge_name: r.read_name("newedge.edge_name")?,
            },
            REMOVE_EDGE => Action::RemoveEdge {
                from_node: r.read_checksum("removeedge.from_node")?,
                to_node: r.read_checksum("removeedge.to_node")?,
                edge_name: r.read_name("removeedge.edge_name")?,
                strict: r.read_bool("removeedge.strict")?,
            },
            REMOVE_EDGES_BETWEEN => Action::RemoveEdgesBetween {
                from_node: r.read_checksum("removeedgest.from_node")?,
                to_node: r.read_checksum("removeedgest.to_node")?,
                strict: r.read_bool("removeedgest.strict")?,
            },
            REMOVE_EDGES_NAMED => Action::RemoveEdgesNamed {
                from_node: r.read_checksum("removeedgese.from_node")?,
                edge_name: r.read_name("removeedgese.edge_name")?,
                strict: r.read_bool("removeedgese.strict")?,
            },
            CERTIFY => Action::Certify {
                certifier: r.read_name("certify.certifier")?,
                hash: r.read_checksum("certify.hash")?,
                notes: r.read_string(MAX_STRING_LEN, "certify.notes")?,
            },
            ERASE => Action::Erase {
                hash: r.read_checksum("erase.hash")?,
            },
            FORK => Action::Fork {
                hash: r.read_checksum("fork.hash")?,
                creator: r.read_name("fork.creator")?,
                content_groups: read_content_groups(r)?,
            },
            _ => return Err(DecodeError::UnknownAction { name }),
        };
        reader.finish("action")?;
        Ok(action)
    }
}
