//! Host-document primitives used by the view core.
//!
//! The document is an arena of element, text and comment nodes keyed by
//! [`HostNodeId`]. It provides the handful of mutations the view core needs
//! (`create_comment`, `insert_before`, `remove`) plus the [`ReverseWalker`]
//! cursor used while hydrating server-rendered markup.

mod document;
mod error;
mod mutation;
#[cfg(any(test, feature = "dom-snapshot"))]
pub mod snapshot;
mod types;
mod walker;

pub use crate::document::{HostDocument, HostDocumentConfig};
pub use crate::error::HostDomError;
pub use crate::mutation::DomMutation;
pub use crate::types::{HostNodeId, Node, NodeKind};
pub use crate::walker::ReverseWalker;
