//! The capability contract shared by every view node variant.

use std::fmt;
use std::rc::Rc;

use host_dom::{HostDocument, HostNodeId, ReverseWalker};

use crate::anode::ANode;
use crate::component::OwnerRef;
use crate::data::{DataChange, ScopeRef};
use crate::error::ViewError;
use crate::guid::{NodeId, next_id};
use crate::life_cycle::LifeCycle;
use crate::node_type::NodeType;

/// A live node of the rendered tree.
///
/// Parents and the update/teardown drivers only ever call `attach`,
/// `dispose`, `update` and `el_as_root_node`, plus the read-only identity
/// accessors.
pub trait ViewNode: fmt::Debug {
    fn id(&self) -> NodeId;

    fn node_type(&self) -> NodeType;

    fn life_cycle(&self) -> LifeCycle;

    /// Nearest ancestor that is a component node.
    fn parent_component(&self) -> Option<NodeId>;

    /// Back-reference handed to children built by this node.
    fn link(&self) -> ParentLink {
        ParentLink {
            id: self.id(),
            node_type: self.node_type(),
            parent_component: self.parent_component(),
        }
    }

    /// Create host content for a node built without a walker and insert it
    /// into `parent_el` before `before` (append when `None`).
    fn attach(
        &mut self,
        doc: &mut HostDocument,
        parent_el: HostNodeId,
        before: Option<HostNodeId>,
    ) -> Result<(), ViewError>;

    /// Tear the node down. Must be called at most once.
    ///
    /// `no_detach` leaves host content in place because an ancestor removes
    /// the whole subtree; `no_transition` suppresses exit animations and is
    /// passed on to children.
    fn dispose(
        &mut self,
        doc: &mut HostDocument,
        no_detach: bool,
        no_transition: bool,
    ) -> Result<(), ViewError>;

    fn update(&mut self, doc: &mut HostDocument, changes: &[DataChange]) -> Result<(), ViewError>;

    /// Single host node ancestors can use as this node's anchor.
    fn el_as_root_node(&self) -> Option<HostNodeId>;

    /// Register a callback that runs as the last step of `dispose`.
    fn set_on_disposed(&mut self, hook: DisposeHook);
}

/// Non-owning back-reference from a node to its tree parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParentLink {
    pub id: NodeId,
    pub node_type: NodeType,
    pub parent_component: Option<NodeId>,
}

impl ParentLink {
    /// Parent component for a node placed under this parent.
    pub fn component_for_child(&self) -> Option<NodeId> {
        if self.node_type == NodeType::Cmpt {
            Some(self.id)
        } else {
            self.parent_component
        }
    }
}

/// Direct constructor stored on [`ANode::clazz`]; bypasses registry lookup.
pub trait NodeClass: fmt::Debug {
    fn construct(
        &self,
        doc: &mut HostDocument,
        a_node: &Rc<ANode>,
        parent: Option<ParentLink>,
        scope: &ScopeRef,
        owner: &OwnerRef,
        reverse_walker: Option<&mut ReverseWalker>,
    ) -> Result<Box<dyn ViewNode>, ViewError>;
}

pub struct DisposeHook(Box<dyn FnOnce()>);

impl DisposeHook {
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Box::new(f))
    }

    pub fn run(self) {
        (self.0)()
    }
}

impl fmt::Debug for DisposeHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DisposeHook")
    }
}

/// State every built-in variant carries.
#[derive(Debug)]
pub(crate) struct NodeBase {
    pub(crate) id: NodeId,
    pub(crate) a_node: Rc<ANode>,
    pub(crate) owner: Option<OwnerRef>,
    pub(crate) scope: Option<ScopeRef>,
    pub(crate) parent: Option<ParentLink>,
    pub(crate) parent_component: Option<NodeId>,
    pub(crate) life_cycle: LifeCycle,
    pub(crate) on_disposed: Option<DisposeHook>,
}

impl NodeBase {
    pub(crate) fn new(
        a_node: &Rc<ANode>,
        parent: Option<ParentLink>,
        scope: Option<&ScopeRef>,
        owner: Option<&OwnerRef>,
    ) -> Self {
        Self {
            id: next_id(),
            a_node: Rc::clone(a_node),
            owner: owner.cloned(),
            scope: scope.cloned(),
            parent,
            parent_component: parent.and_then(|p| p.component_for_child()),
            life_cycle: LifeCycle::Start,
            on_disposed: None,
        }
    }

    /// Release back-references, enter `Disposed` and run the dispose hook.
    pub(crate) fn finish_dispose(&mut self) {
        self.owner = None;
        self.scope = None;
        self.parent = None;
        self.life_cycle = LifeCycle::Disposed;
        if let Some(hook) = self.on_disposed.take() {
            hook.run();
        }
    }
}
