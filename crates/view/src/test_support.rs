//! Recording node class shared by the unit and integration suites.
//!
//! Compiled for this crate's own tests and, behind the `test-support`
//! feature, for `tests/`.

use std::cell::RefCell;
use std::rc::Rc;

use host_dom::{HostDocument, HostNodeId, ReverseWalker};

use crate::anode::ANode;
use crate::component::OwnerRef;
use crate::data::{DataChange, ScopeRef};
use crate::error::ViewError;
use crate::guid::{NodeId, next_id};
use crate::life_cycle::LifeCycle;
use crate::node::{DisposeHook, NodeClass, ParentLink, ViewNode};
use crate::node_type::NodeType;

#[derive(Debug, Default)]
struct Calls {
    entries: Vec<String>,
    mutation_marks: Vec<usize>,
    update_ptrs: Vec<*const DataChange>,
    parent_components: Vec<Option<NodeId>>,
}

/// Shared log written by every node built from one [`RecordingClass`].
#[derive(Clone, Debug, Default)]
pub struct CallLog(Rc<RefCell<Calls>>);

impl CallLog {
    /// `attach <name>`, `dispose <name> no_detach=.. no_transition=..` and
    /// `update <name>` lines, in call order.
    pub fn entries(&self) -> Vec<String> {
        self.0.borrow().entries.clone()
    }

    /// Length of the document's mutation log at each dispose call.
    pub fn mutation_marks(&self) -> Vec<usize> {
        self.0.borrow().mutation_marks.clone()
    }

    /// Address of the `changes` slice each update received.
    pub fn update_ptrs(&self) -> Vec<*const DataChange> {
        self.0.borrow().update_ptrs.clone()
    }

    /// Parent component seen by each construction.
    pub fn parent_components(&self) -> Vec<Option<NodeId>> {
        self.0.borrow().parent_components.clone()
    }

    fn push(&self, entry: String) {
        self.0.borrow_mut().entries.push(entry);
    }
}

/// Node class that records lifecycle calls into a [`CallLog`]. When built
/// with a walker it claims the walker's current host node, if any is left.
#[derive(Debug)]
pub struct RecordingClass {
    log: CallLog,
    fail_dispose: bool,
}

impl RecordingClass {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            fail_dispose: false,
        }
    }

    /// Nodes that record their dispose call, finish disposing, then return
    /// an error.
    pub fn failing(log: CallLog) -> Self {
        Self {
            log,
            fail_dispose: true,
        }
    }

    /// Abstract node named `name` bound to a recording class.
    pub fn anode(log: &CallLog, name: &str) -> ANode {
        ANode::new(name).with_clazz(Rc::new(Self::new(log.clone())))
    }

    pub fn failing_anode(log: &CallLog, name: &str) -> ANode {
        ANode::new(name).with_clazz(Rc::new(Self::failing(log.clone())))
    }
}

impl NodeClass for RecordingClass {
    fn construct(
        &self,
        _doc: &mut HostDocument,
        a_node: &Rc<ANode>,
        parent: Option<ParentLink>,
        _scope: &ScopeRef,
        _owner: &OwnerRef,
        reverse_walker: Option<&mut ReverseWalker>,
    ) -> Result<Box<dyn ViewNode>, ViewError> {
        let parent_component = parent.and_then(|p| p.component_for_child());
        self.log
            .0
            .borrow_mut()
            .parent_components
            .push(parent_component);
        let mut node = RecordingNode {
            id: next_id(),
            name: a_node.tag_name.clone(),
            parent_component,
            life_cycle: LifeCycle::Start,
            claimed: None,
            fail_dispose: self.fail_dispose,
            log: self.log.clone(),
            on_disposed: None,
        };
        if let Some(walker) = reverse_walker {
            node.claimed = walker.current();
            walker.go_next();
            node.life_cycle = LifeCycle::Attached;
        }
        Ok(Box::new(node))
    }
}

#[derive(Debug)]
pub struct RecordingNode {
    id: NodeId,
    name: String,
    parent_component: Option<NodeId>,
    life_cycle: LifeCycle,
    claimed: Option<HostNodeId>,
    fail_dispose: bool,
    log: CallLog,
    on_disposed: Option<DisposeHook>,
}

impl ViewNode for RecordingNode {
    fn id(&self) -> NodeId {
        self.id
    }

    fn node_type(&self) -> NodeType {
        NodeType::Custom
    }

    fn life_cycle(&self) -> LifeCycle {
        self.life_cycle
    }

    fn parent_component(&self) -> Option<NodeId> {
        self.parent_component
    }

    fn attach(
        &mut self,
        _doc: &mut HostDocument,
        _parent_el: HostNodeId,
        _before: Option<HostNodeId>,
    ) -> Result<(), ViewError> {
        self.log.push(format!("attach {}", self.name));
        self.life_cycle = LifeCycle::Attached;
        Ok(())
    }

    fn dispose(
        &mut self,
        doc: &mut HostDocument,
        no_detach: bool,
        no_transition: bool,
    ) -> Result<(), ViewError> {
        self.log.push(format!(
            "dispose {} no_detach={no_detach} no_transition={no_transition}",
            self.name
        ));
        self.log.0.borrow_mut().mutation_marks.push(doc.mutations().len());
        self.life_cycle = LifeCycle::Disposed;
        if let Some(hook) = self.on_disposed.take() {
            hook.run();
        }
        if self.fail_dispose {
            return Err(ViewError::DetachedAnchor(self.id));
        }
        Ok(())
    }

    fn update(&mut self, _doc: &mut HostDocument, changes: &[DataChange]) -> Result<(), ViewError> {
        self.log.push(format!("update {}", self.name));
        self.log.0.borrow_mut().update_ptrs.push(changes.as_ptr());
        Ok(())
    }

    fn el_as_root_node(&self) -> Option<HostNodeId> {
        self.claimed
    }

    fn set_on_disposed(&mut self, hook: DisposeHook) {
        self.on_disposed = Some(hook);
    }
}
