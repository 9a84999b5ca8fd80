use crate::guid::NodeId;
use host_dom::HostDomError;

#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error(transparent)]
    Host(#[from] HostDomError),
    /// A node tried to place content next to its anchor comment while the
    /// anchor was not in the document.
    #[error("anchor of node {0} is detached from the document")]
    DetachedAnchor(NodeId),
}
