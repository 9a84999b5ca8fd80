//! Plain host elements.
//!
//! Hydration adopts the walker's current node when it is an element with the
//! same tag name (ASCII case-insensitive) and otherwise inserts a new one in
//! front of it. Children hydrate against their own walker over the element.
//! On dispose the children are told not to detach, since removing the
//! element takes their host nodes with it.

use std::rc::Rc;

use host_dom::{HostDocument, HostNodeId, ReverseWalker};

use crate::anode::ANode;
use crate::children::dispose_children;
use crate::component::OwnerRef;
use crate::data::{DataChange, ScopeRef};
use crate::error::ViewError;
use crate::factory::{create_node, create_reverse_node};
use crate::guid::NodeId;
use crate::life_cycle::LifeCycle;
use crate::node::{DisposeHook, NodeBase, ParentLink, ViewNode};
use crate::node_type::NodeType;

/// Plain host element. Only static props are applied here; dynamic
/// attribute and event bindings belong to the binding layer.
#[derive(Debug)]
pub struct Element {
    base: NodeBase,
    tag_name: String,
    el: Option<HostNodeId>,
    children: Vec<Box<dyn ViewNode>>,
}

impl Element {
    /// `component_name` overrides the tag, as for `<div is="section">`.
    pub fn new(
        doc: &mut HostDocument,
        a_node: &Rc<ANode>,
        parent: Option<ParentLink>,
        scope: &ScopeRef,
        owner: &OwnerRef,
        component_name: Option<&str>,
        reverse_walker: Option<&mut ReverseWalker>,
    ) -> Result<Self, ViewError> {
        let tag_name = component_name
            .unwrap_or(&a_node.tag_name)
            .to_ascii_lowercase();
        let mut element = Self {
            base: NodeBase::new(a_node, parent, Some(scope), Some(owner)),
            tag_name,
            el: None,
            children: Vec::new(),
        };

        let Some(walker) = reverse_walker else {
            return Ok(element);
        };

        let current = walker.current();
        let adopted = current.filter(|&node| {
            doc.element_name(node)
                .is_some_and(|name| name.eq_ignore_ascii_case(&element.tag_name))
        });
        let el = match adopted {
            Some(node) => {
                walker.go_next();
                node
            }
            None => {
                let el = element.create_el(doc)?;
                doc.insert_before(walker.target(), el, current)?;
                log::debug!(
                    target: "view.hydrate",
                    "element {} <{}> missing from markup, inserted",
                    element.base.id,
                    element.tag_name
                );
                el
            }
        };
        element.el = Some(el);

        if !a_node.children.is_empty() {
            let mut child_walker = ReverseWalker::new(doc, el)?;
            let link = element.link();
            for child in &a_node.children {
                let node = create_reverse_node(
                    doc,
                    child,
                    Some(link),
                    scope,
                    owner,
                    Some(&mut child_walker),
                    None,
                )?;
                element.children.push(node);
            }
        }

        element.base.life_cycle = LifeCycle::Attached;
        Ok(element)
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn el(&self) -> Option<HostNodeId> {
        self.el
    }

    pub fn children(&self) -> &[Box<dyn ViewNode>] {
        &self.children
    }

    fn create_el(&self, doc: &mut HostDocument) -> Result<HostNodeId, ViewError> {
        let el = doc.create_element(&self.tag_name);
        for (name, value) in &self.base.a_node.props {
            doc.set_attribute(el, name, value)?;
        }
        Ok(el)
    }
}

impl ViewNode for Element {
    fn id(&self) -> NodeId {
        self.base.id
    }

    fn node_type(&self) -> NodeType {
        NodeType::Elem
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
        let el = match self.el {
            Some(el) => el,
            None => {
                let (Some(scope), Some(owner)) = (self.base.scope.clone(), self.base.owner.clone())
                else {
                    log::warn!(target: "view.dispose", "attach on disposed element {}", self.base.id);
                    return Ok(());
                };
                let el = self.create_el(doc)?;
                let link = self.link();
                let a_node = Rc::clone(&self.base.a_node);
                for child in &a_node.children {
                    let mut node = create_node(doc, child, Some(link), &scope, &owner, None)?;
                    node.attach(doc, el, None)?;
                    self.children.push(node);
                }
                self.el = Some(el);
                el
            }
        };
        doc.insert_before(parent_el, el, before)?;
        self.base.life_cycle = LifeCycle::Attached;
        Ok(())
    }

    fn dispose(
        &mut self,
        doc: &mut HostDocument,
        no_detach: bool,
        no_transition: bool,
    ) -> Result<(), ViewError> {
        // removing our element takes the children's host nodes with it
        let disposed = dispose_children(doc, &mut self.children, true, no_transition);
        let detached = match self.el {
            Some(el) if !no_detach => doc.remove(el).map_err(ViewError::from),
            _ => Ok(()),
        };
        self.el = None;
        self.base.finish_dispose();
        disposed.and(detached)
    }

    fn update(&mut self, doc: &mut HostDocument, changes: &[DataChange]) -> Result<(), ViewError> {
        for child in &mut self.children {
            child.update(doc, changes)?;
        }
        Ok(())
    }

    fn el_as_root_node(&self) -> Option<HostNodeId> {
        self.el
    }

    fn set_on_disposed(&mut self, hook: DisposeHook) {
        self.base.on_disposed = Some(hook);
    }
}
