//! Mutation log for host documents.
//!
//! When [`HostDocumentConfig::record_mutations`](crate::HostDocumentConfig) is
//! enabled every structural change is appended here in application order.
//! Tests use it to check exactly which nodes construction created or moved.
//!
//! Invariants:
//! - Entries are recorded in the order the document applied them.
//! - `InsertBefore { before: None }` is an append.
//! - `Remove` is recorded only when the node was attached to a parent.

use crate::types::HostNodeId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomMutation {
    CreateElement { key: HostNodeId, name: String },
    CreateText { key: HostNodeId, text: String },
    CreateComment { key: HostNodeId, text: String },
    SetAttribute {
        key: HostNodeId,
        name: String,
        value: String,
    },
    InsertBefore {
        parent: HostNodeId,
        child: HostNodeId,
        before: Option<HostNodeId>,
    },
    Remove { key: HostNodeId, parent: HostNodeId },
}

impl DomMutation {
    pub fn is_create_comment(&self) -> bool {
        matches!(self, DomMutation::CreateComment { .. })
    }
}
