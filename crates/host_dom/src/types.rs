use std::fmt;

/// Arena key for a node in a [`HostDocument`](crate::HostDocument).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HostNodeId(pub u32);

impl HostNodeId {
    /// Reserved sentinel for "unassigned/invalid" identity.
    pub const INVALID: HostNodeId = HostNodeId(0);

    pub(crate) fn from_index(index: usize) -> Self {
        HostNodeId(index as u32 + 1)
    }

    pub(crate) fn index(self) -> Option<usize> {
        (self.0 as usize).checked_sub(1)
    }
}

impl fmt::Display for HostNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Payload of a live arena node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Element {
        name: String,
        attributes: Vec<(String, String)>,
    },
    Text {
        text: String,
    },
    Comment {
        text: String,
    },
}

impl NodeKind {
    pub fn allows_children(&self) -> bool {
        matches!(self, NodeKind::Document | NodeKind::Element { .. })
    }
}

/// Owned tree copy of a document subtree, produced by
/// [`HostDocument::materialize`](crate::HostDocument::materialize).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Document {
        id: HostNodeId,
        children: Vec<Node>,
    },
    Element {
        id: HostNodeId,
        name: String,
        attributes: Vec<(String, String)>,
        children: Vec<Node>,
    },
    Text {
        id: HostNodeId,
        text: String,
    },
    Comment {
        id: HostNodeId,
        text: String,
    },
}

impl Node {
    pub fn id(&self) -> HostNodeId {
        match self {
            Node::Document { id, .. } => *id,
            Node::Element { id, .. } => *id,
            Node::Text { id, .. } => *id,
            Node::Comment { id, .. } => *id,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Document { children, .. } | Node::Element { children, .. } => children,
            _ => &[],
        }
    }
}
