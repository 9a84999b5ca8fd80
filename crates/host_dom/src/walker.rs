//! Sequential cursor over a parent's existing children, used for hydration.
//!
//! The walker snapshots the child list once at construction. Nodes inserted
//! into the target afterwards (synthesized markers, healed elements) are not
//! visited; they are placed before [`ReverseWalker::current`], which keeps the
//! remaining snapshot in document order.

use crate::document::HostDocument;
use crate::error::HostDomError;
use crate::types::{HostNodeId, NodeKind};

#[derive(Debug)]
pub struct ReverseWalker {
    target: HostNodeId,
    raw: Vec<HostNodeId>,
    index: usize,
}

impl ReverseWalker {
    /// Snapshot `target`'s children. Element, comment and non-blank text
    /// nodes are kept; whitespace-only text nodes are removed from the
    /// document when the document is configured to strip them.
    pub fn new(doc: &mut HostDocument, target: HostNodeId) -> Result<Self, HostDomError> {
        let strip = doc.config().strip_whitespace_text;
        let children = doc.children(target).to_vec();
        let mut raw = Vec::with_capacity(children.len());
        for child in children {
            let blank = matches!(
                doc.kind(child)?,
                NodeKind::Text { text } if text.trim().is_empty()
            );
            if blank && strip {
                doc.remove(child)?;
                continue;
            }
            raw.push(child);
        }
        log::trace!(target: "host_dom", "walker over {target}: {} nodes", raw.len());
        Ok(Self {
            target,
            raw,
            index: 0,
        })
    }

    /// The parent whose children are being walked.
    pub fn target(&self) -> HostNodeId {
        self.target
    }

    /// Node under the cursor, `None` once every child was consumed.
    pub fn current(&self) -> Option<HostNodeId> {
        self.raw.get(self.index).copied()
    }

    pub fn next(&self) -> Option<HostNodeId> {
        self.raw.get(self.index + 1).copied()
    }

    pub fn go_next(&mut self) {
        if self.index < self.raw.len() {
            self.index += 1;
        }
    }

    pub fn is_done(&self) -> bool {
        self.index >= self.raw.len()
    }
}
