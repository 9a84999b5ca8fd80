use crate::types::HostNodeId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostDomError {
    #[error("unknown host node {0}")]
    UnknownNode(HostNodeId),
    #[error("host node {0} cannot have children")]
    InvalidParent(HostNodeId),
    #[error("{before} is not a child of {parent}")]
    InvalidSibling {
        parent: HostNodeId,
        before: HostNodeId,
    },
    #[error("inserting {child} under {parent} would create a cycle")]
    CycleDetected {
        parent: HostNodeId,
        child: HostNodeId,
    },
    #[error("host node {0} has the wrong kind for this operation")]
    WrongNodeKind(HostNodeId),
}
