//! Nodes carrying an `is` directive.
//!
//! The directive is evaluated against the scope and the child is built from
//! the rinsed abstract node (no `is`) under that name. An `<!-- is -->`
//! anchor follows the child; hydration adopts one already in the markup.
//! When the evaluated name changes on update the child is rebuilt in front
//! of the anchor.

use std::rc::Rc;

use host_dom::{HostDocument, HostNodeId, ReverseWalker};

use crate::anode::ANode;
use crate::children::adopt_or_insert_anchor;
use crate::component::OwnerRef;
use crate::data::{DataChange, Model, ScopeRef};
use crate::error::ViewError;
use crate::factory::{create_node, create_reverse_node};
use crate::guid::NodeId;
use crate::life_cycle::LifeCycle;
use crate::node::{DisposeHook, NodeBase, NodeClass, ParentLink, ViewNode};
use crate::node_type::NodeType;

const ANCHOR_LABEL: &str = "is";

/// Constructor attached to abstract nodes that carry an `is` directive.
#[derive(Debug)]
pub struct IsClass;

impl NodeClass for IsClass {
    fn construct(
        &self,
        doc: &mut HostDocument,
        a_node: &Rc<ANode>,
        parent: Option<ParentLink>,
        scope: &ScopeRef,
        owner: &OwnerRef,
        reverse_walker: Option<&mut ReverseWalker>,
    ) -> Result<Box<dyn ViewNode>, ViewError> {
        Ok(Box::new(IsNode::new(
            doc,
            a_node,
            parent,
            scope,
            owner,
            reverse_walker,
        )?))
    }
}

/// Dynamic node: renders whatever its `is` directive names, and rebuilds the
/// child when that name changes.
#[derive(Debug)]
pub struct IsNode {
    base: NodeBase,
    cmpt: String,
    child: Option<Box<dyn ViewNode>>,
    anchor: Option<HostNodeId>,
}

impl IsNode {
    pub fn new(
        doc: &mut HostDocument,
        a_node: &Rc<ANode>,
        parent: Option<ParentLink>,
        scope: &ScopeRef,
        owner: &OwnerRef,
        reverse_walker: Option<&mut ReverseWalker>,
    ) -> Result<Self, ViewError> {
        let mut node = Self {
            base: NodeBase::new(a_node, parent, Some(scope), Some(owner)),
            cmpt: resolve_name(a_node, scope),
            child: None,
            anchor: None,
        };
        let Some(walker) = reverse_walker else {
            return Ok(node);
        };

        let child = create_reverse_node(
            doc,
            &a_node.rinsed(),
            Some(node.link()),
            scope,
            owner,
            Some(&mut *walker),
            Some(&node.cmpt),
        )?;
        node.child = Some(child);

        node.anchor = Some(adopt_or_insert_anchor(doc, walker, ANCHOR_LABEL)?);
        node.base.life_cycle = LifeCycle::Attached;
        Ok(node)
    }

    /// Name the child was last built for.
    pub fn cmpt(&self) -> &str {
        &self.cmpt
    }

    pub fn child(&self) -> Option<&dyn ViewNode> {
        self.child.as_deref()
    }

    pub fn anchor(&self) -> Option<HostNodeId> {
        self.anchor
    }

    fn build_child(
        &self,
        doc: &mut HostDocument,
        scope: &ScopeRef,
        owner: &OwnerRef,
    ) -> Result<Box<dyn ViewNode>, ViewError> {
        create_node(
            doc,
            &self.base.a_node.rinsed(),
            Some(self.link()),
            scope,
            owner,
            Some(&self.cmpt),
        )
    }
}

fn resolve_name(a_node: &ANode, scope: &Model) -> String {
    a_node
        .directives
        .is
        .as_ref()
        .and_then(|directive| directive.eval(scope))
        .unwrap_or_else(|| a_node.tag_name.clone())
}

impl ViewNode for IsNode {
    fn id(&self) -> NodeId {
        self.base.id
    }

    fn node_type(&self) -> NodeType {
        NodeType::Is
    }

    fn life_cycle(&self) -> LifeCycle {
        self.base.life_cycle
    }

    fn parent_component(&self) -> Option<NodeId> {
        self.base.parent_component
    }

    fn attach(
        &mut self,
        doc: &mut HostDocument,
        parent_el: HostNodeId,
        before: Option<HostNodeId>,
    ) -> Result<(), ViewError> {
        let (Some(scope), Some(owner)) = (self.base.scope.clone(), self.base.owner.clone()) else {
            log::warn!(target: "view.dispose", "attach on disposed is-node {}", self.base.id);
            return Ok(());
        };
        let mut child = self.build_child(doc, &scope, &owner)?;
        child.attach(doc, parent_el, before)?;
        self.child = Some(child);

        let anchor = doc.create_comment(ANCHOR_LABEL);
        doc.insert_before(parent_el, anchor, before)?;
        self.anchor = Some(anchor);
        self.base.life_cycle = LifeCycle::Attached;
        Ok(())
    }

    fn dispose(
        &mut self,
        doc: &mut HostDocument,
        no_detach: bool,
        no_transition: bool,
    ) -> Result<(), ViewError> {
        let disposed = match self.child.take() {
            Some(mut child) => child.dispose(doc, no_detach, no_transition),
            None => Ok(()),
        };
        let detached = match self.anchor {
            Some(anchor) if !no_detach => doc.remove(anchor).map_err(ViewError::from),
            _ => Ok(()),
        };
        self.anchor = None;
        self.base.finish_dispose();
        disposed.and(detached)
    }

    fn update(&mut self, doc: &mut HostDocument, changes: &[DataChange]) -> Result<(), ViewError> {
        let (Some(scope), Some(owner), Some(anchor)) =
            (self.base.scope.clone(), self.base.owner.clone(), self.anchor)
        else {
            return Ok(());
        };

        let name = resolve_name(&self.base.a_node, &scope);
        if name == self.cmpt {
            return match self.child.as_mut() {
                Some(child) => child.update(doc, changes),
                None => Ok(()),
            };
        }

        let parent_el = doc
            .parent(anchor)
            .ok_or(ViewError::DetachedAnchor(self.base.id))?;
        log::debug!(
            target: "view.factory",
            "is-node {}: {} -> {}",
            self.base.id,
            self.cmpt,
            name
        );
        if let Some(mut previous) = self.child.take() {
            previous.dispose(doc, false, false)?;
        }
        self.cmpt = name;
        let mut child = self.build_child(doc, &scope, &owner)?;
        child.attach(doc, parent_el, Some(anchor))?;
        self.child = Some(child);
        Ok(())
    }

    fn el_as_root_node(&self) -> Option<HostNodeId> {
        self.child
            .as_ref()
            .and_then(|child| child.el_as_root_node())
            .or(self.anchor)
    }

    fn set_on_disposed(&mut self, hook: DisposeHook) {
        self.base.on_disposed = Some(hook);
    }
}
