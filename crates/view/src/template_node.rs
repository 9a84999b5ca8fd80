//! Transparent `<template>`/`<fragment>` container delimited by two comment
//! markers.
//!
//! Invariants:
//! - Host nodes `[sel, children.., el]` are contiguous and cover exactly the
//!   slice of markup the walker moved over during hydration.
//! - A comment at the walker is adopted as `sel`; otherwise a comment
//!   labelled with the node id is inserted before it.
//! - Children consume the walker in document order, depth first, before the
//!   end marker is looked for.
//! - `el` is adopted only when `sel` was adopted and the walker sits on a
//!   comment. Anything else there, including an element, gets a new end
//!   marker inserted before it and is left for the next sibling.
//! - Dispose finishes every child before touching the markers, then removes
//!   `el` and `sel` unless an ancestor detaches the subtree.

use std::rc::Rc;

use host_dom::{HostDocument, HostNodeId, ReverseWalker};

use crate::anode::ANode;
use crate::children::{attach_own_only_children, dispose_children};
use crate::component::OwnerRef;
use crate::data::{DataChange, ScopeRef};
use crate::error::ViewError;
use crate::factory::create_reverse_node;
use crate::guid::NodeId;
use crate::life_cycle::LifeCycle;
use crate::node::{DisposeHook, NodeBase, NodeClass, ParentLink, ViewNode};
use crate::node_type::NodeType;

/// Constructor for `<template>`/`<fragment>` abstract nodes.
#[derive(Debug)]
pub struct TemplateClass;

impl NodeClass for TemplateClass {
    fn construct(
        &self,
        doc: &mut HostDocument,
        a_node: &Rc<ANode>,
        parent: Option<ParentLink>,
        scope: &ScopeRef,
        owner: &OwnerRef,
        reverse_walker: Option<&mut ReverseWalker>,
    ) -> Result<Box<dyn ViewNode>, ViewError> {
        Ok(Box::new(TemplateNode::new(
            doc,
            a_node,
            parent,
            scope,
            owner,
            reverse_walker,
        )?))
    }
}

/// Transparent container. Renders no element; its content sits between the
/// `sel` and `el` comment markers.
#[derive(Debug)]
pub struct TemplateNode {
    base: NodeBase,
    sel: Option<HostNodeId>,
    el: Option<HostNodeId>,
    children: Vec<Box<dyn ViewNode>>,
}

impl TemplateNode {
    /// Without a walker the node stays in `Start` with no markers or
    /// children until [`ViewNode::attach`].
    ///
    /// With a walker, markers found in the markup are adopted and missing
    /// ones are synthesized in place, so `[sel, children.., el]` covers
    /// exactly the slice of host nodes the walker moved over.
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
            sel: None,
            el: None,
            children: Vec::new(),
        };
        let Some(walker) = reverse_walker else {
            return Ok(node);
        };

        let has_flag_comment = match walker.current() {
            Some(current) if doc.is_comment(current) => {
                node.sel = Some(current);
                walker.go_next();
                true
            }
            _ => {
                node.sel = Some(node.insert_marker(doc, walker, "start")?);
                false
            }
        };

        let link = node.link();
        for child in &a_node.children {
            let child = create_reverse_node(doc, child, Some(link), scope, owner, Some(&mut *walker), None)?;
            node.children.push(child);
        }

        let end = match walker.current() {
            Some(current) if has_flag_comment && doc.is_comment(current) => {
                walker.go_next();
                current
            }
            _ => node.insert_marker(doc, walker, "end")?,
        };
        node.el = Some(end);

        node.base.life_cycle = LifeCycle::Attached;
        Ok(node)
    }

    pub fn sel(&self) -> Option<HostNodeId> {
        self.sel
    }

    pub fn el(&self) -> Option<HostNodeId> {
        self.el
    }

    pub fn children(&self) -> &[Box<dyn ViewNode>] {
        &self.children
    }

    pub fn owner(&self) -> Option<&OwnerRef> {
        self.base.owner.as_ref()
    }

    pub fn scope(&self) -> Option<&ScopeRef> {
        self.base.scope.as_ref()
    }

    pub fn parent(&self) -> Option<ParentLink> {
        self.base.parent
    }

    fn insert_marker(
        &self,
        doc: &mut HostDocument,
        walker: &ReverseWalker,
        which: &str,
    ) -> Result<HostNodeId, ViewError> {
        let marker = doc.create_comment(&self.base.id.to_string());
        doc.insert_before(walker.target(), marker, walker.current())?;
        log::debug!(
            target: "view.hydrate",
            "template {}: {which} marker missing, synthesized {marker}",
            self.base.id
        );
        Ok(marker)
    }

    fn remove_markers(&self, doc: &mut HostDocument) -> Result<(), ViewError> {
        if let Some(el) = self.el {
            doc.remove(el)?;
        }
        if let Some(sel) = self.sel {
            doc.remove(sel)?;
        }
        Ok(())
    }
}

impl ViewNode for TemplateNode {
    fn id(&self) -> NodeId {
        self.base.id
    }

    fn node_type(&self) -> NodeType {
        NodeType::Tpl
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
            log::warn!(target: "view.dispose", "attach on disposed template {}", self.base.id);
            return Ok(());
        };
        let a_node = Rc::clone(&self.base.a_node);
        let (span, children) = attach_own_only_children(
            doc,
            self.base.id,
            &a_node,
            self.link(),
            &scope,
            &owner,
            parent_el,
            before,
        )?;
        self.sel = Some(span.sel);
        self.el = Some(span.el);
        self.children = children;
        self.base.life_cycle = LifeCycle::Attached;
        Ok(())
    }

    fn dispose(
        &mut self,
        doc: &mut HostDocument,
        no_detach: bool,
        no_transition: bool,
    ) -> Result<(), ViewError> {
        let disposed = dispose_children(doc, &mut self.children, no_detach, no_transition);
        let detached = if no_detach {
            Ok(())
        } else {
            self.remove_markers(doc)
        };

        self.sel = None;
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
        self.sel
    }

    fn set_on_disposed(&mut self, hook: DisposeHook) {
        self.base.on_disposed = Some(hook);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{ComponentContext, ComponentRegistry};
    use crate::data::Model;
    use crate::test_support::{CallLog, RecordingClass};
    use host_dom::{DomMutation, HostDocumentConfig};
    use std::cell::Cell;

    fn recording_doc() -> HostDocument {
        HostDocument::new(HostDocumentConfig {
            record_mutations: true,
            ..HostDocumentConfig::default()
        })
    }

    fn owner() -> OwnerRef {
        ComponentContext::with_components(ComponentRegistry::new())
    }

    fn recording_template(log: &CallLog, names: &[&str]) -> Rc<ANode> {
        let children = names.iter().map(|name| RecordingClass::anode(log, name));
        Rc::new(ANode::new("template").with_children(children))
    }

    #[test]
    fn hydration_pairs_existing_markers() {
        let mut doc = recording_doc();
        let root = doc.root();
        let start = doc.create_comment("X");
        let span = doc.create_element("span");
        let end = doc.create_comment("X");
        let after = doc.create_element("p");
        for node in [start, span, end, after] {
            doc.append_child(root, node).unwrap();
        }
        doc.take_mutations();

        let a_node = Rc::new(ANode::new("template").with_child(ANode::new("span")));
        let mut walker = ReverseWalker::new(&mut doc, root).unwrap();
        let node = TemplateNode::new(&mut doc, &a_node, None, &Model::new(), &owner(), Some(&mut walker))
            .unwrap();

        assert_eq!(node.sel(), Some(start));
        assert_eq!(node.el(), Some(end));
        assert_eq!(node.children().len(), 1);
        assert_eq!(node.children()[0].el_as_root_node(), Some(span));
        assert_eq!(walker.current(), Some(after));
        assert_eq!(node.life_cycle(), LifeCycle::Attached);
        assert!(doc.mutations().is_empty());
        assert_eq!(doc.children(root), &[start, span, end, after]);
    }

    #[test]
    fn empty_region_synthesizes_both_markers() {
        let mut doc = recording_doc();
        let root = doc.root();
        let a_node = Rc::new(ANode::new("template"));
        let mut walker = ReverseWalker::new(&mut doc, root).unwrap();
        let node = TemplateNode::new(&mut doc, &a_node, None, &Model::new(), &owner(), Some(&mut walker))
            .unwrap();

        let (sel, el) = (node.sel().unwrap(), node.el().unwrap());
        assert_ne!(sel, el);
        assert!(node.children().is_empty());
        assert_eq!(doc.children(root), &[sel, el]);
        let label = node.id().to_string();
        assert_eq!(doc.comment_text(sel), Some(label.as_str()));
        assert_eq!(
            doc.mutations(),
            &[
                DomMutation::CreateComment {
                    key: sel,
                    text: label.clone()
                },
                DomMutation::InsertBefore {
                    parent: root,
                    child: sel,
                    before: None
                },
                DomMutation::CreateComment {
                    key: el,
                    text: label
                },
                DomMutation::InsertBefore {
                    parent: root,
                    child: el,
                    before: None
                },
            ]
        );
        assert!(node.life_cycle().is_attached());
    }

    #[test]
    fn missing_start_marker_synthesizes_end_marker_too() {
        let mut doc = HostDocument::default();
        let root = doc.root();
        let span = doc.create_element("span");
        let trailing = doc.create_comment("other");
        doc.append_child(root, span).unwrap();
        doc.append_child(root, trailing).unwrap();

        let a_node = Rc::new(ANode::new("template").with_child(ANode::new("span")));
        let mut walker = ReverseWalker::new(&mut doc, root).unwrap();
        let node = TemplateNode::new(&mut doc, &a_node, None, &Model::new(), &owner(), Some(&mut walker))
            .unwrap();

        let (sel, el) = (node.sel().unwrap(), node.el().unwrap());
        assert_eq!(doc.children(root), &[sel, span, el, trailing]);
        assert_eq!(walker.current(), Some(trailing));
    }

    #[test]
    fn missing_end_marker_is_synthesized_once() {
        let mut doc = recording_doc();
        let root = doc.root();
        let start = doc.create_comment("X");
        let span = doc.create_element("span");
        doc.append_child(root, start).unwrap();
        doc.append_child(root, span).unwrap();
        doc.take_mutations();

        let a_node = Rc::new(ANode::new("template").with_child(ANode::new("span")));
        let mut walker = ReverseWalker::new(&mut doc, root).unwrap();
        let node = TemplateNode::new(&mut doc, &a_node, None, &Model::new(), &owner(), Some(&mut walker))
            .unwrap();

        let el = node.el().unwrap();
        assert_eq!(node.sel(), Some(start));
        assert_eq!(doc.children(root), &[start, span, el]);
        let created = doc
            .mutations()
            .iter()
            .filter(|m| m.is_create_comment())
            .count();
        assert_eq!(created, 1);
        assert!(walker.is_done());
    }

    #[test]
    fn element_after_children_is_not_taken_as_end_marker() {
        let mut doc = recording_doc();
        let root = doc.root();
        let start = doc.create_comment("X");
        let span = doc.create_element("span");
        let p = doc.create_element("p");
        for node in [start, span, p] {
            doc.append_child(root, node).unwrap();
        }
        doc.take_mutations();

        let a_node = Rc::new(ANode::new("template").with_child(ANode::new("span")));
        let mut walker = ReverseWalker::new(&mut doc, root).unwrap();
        let node = TemplateNode::new(&mut doc, &a_node, None, &Model::new(), &owner(), Some(&mut walker))
            .unwrap();

        let el = node.el().unwrap();
        assert_ne!(el, p);
        assert!(doc.is_comment(el));
        assert_eq!(node.sel(), Some(start));
        assert_eq!(doc.children(root), &[start, span, el, p]);
        assert_eq!(walker.current(), Some(p));
    }

    #[test]
    fn without_walker_stays_in_start() {
        let mut doc = recording_doc();
        let a_node = Rc::new(ANode::new("template").with_child(ANode::new("span")));
        let node = TemplateNode::new(&mut doc, &a_node, None, &Model::new(), &owner(), None).unwrap();
        assert_eq!(node.life_cycle(), LifeCycle::Start);
        assert_eq!(node.sel(), None);
        assert_eq!(node.el(), None);
        assert!(node.children().is_empty());
        assert!(doc.mutations().is_empty());
    }

    #[test]
    fn parent_component_follows_parent_link() {
        let mut doc = HostDocument::default();
        let a_node = Rc::new(ANode::new("template"));
        let cmpt = ParentLink {
            id: crate::guid::next_id(),
            node_type: NodeType::Cmpt,
            parent_component: None,
        };
        let node = TemplateNode::new(&mut doc, &a_node, Some(cmpt), &Model::new(), &owner(), None).unwrap();
        assert_eq!(node.parent_component(), Some(cmpt.id));

        let nested = TemplateNode::new(&mut doc, &a_node, Some(node.link()), &Model::new(), &owner(), None)
            .unwrap();
        assert_eq!(nested.parent_component(), Some(cmpt.id));
    }

    #[test]
    fn attach_places_markers_around_children() {
        let mut doc = HostDocument::default();
        let root = doc.root();
        let tail = doc.create_element("footer");
        doc.append_child(root, tail).unwrap();

        let a_node = Rc::new(
            ANode::new("template")
                .with_child(ANode::new("h1"))
                .with_child(ANode::new("p")),
        );
        let mut node = TemplateNode::new(&mut doc, &a_node, None, &Model::new(), &owner(), None).unwrap();
        node.attach(&mut doc, root, Some(tail)).unwrap();

        let children = doc.children(root).to_vec();
        assert_eq!(children.len(), 5);
        assert_eq!(children[0], node.sel().unwrap());
        assert_eq!(doc.element_name(children[1]), Some("h1"));
        assert_eq!(doc.element_name(children[2]), Some("p"));
        assert_eq!(children[3], node.el().unwrap());
        assert_eq!(children[4], tail);
        assert_eq!(node.el_as_root_node(), node.sel());
        assert!(node.life_cycle().is_attached());
    }

    #[test]
    fn dispose_cascades_in_order_before_removing_markers() {
        let log = CallLog::default();
        let mut doc = recording_doc();
        let root = doc.root();
        let a_node = recording_template(&log, &["a", "b", "c"]);
        let mut walker = ReverseWalker::new(&mut doc, root).unwrap();
        let mut node = TemplateNode::new(&mut doc, &a_node, None, &Model::new(), &owner(), Some(&mut walker))
            .unwrap();
        let (sel, el) = (node.sel().unwrap(), node.el().unwrap());
        doc.take_mutations();

        let hook_ran = Rc::new(Cell::new(false));
        let flag = Rc::clone(&hook_ran);
        node.set_on_disposed(DisposeHook::new(move || flag.set(true)));
        node.dispose(&mut doc, false, false).unwrap();

        assert_eq!(
            log.entries(),
            vec![
                "dispose a no_detach=false no_transition=false",
                "dispose b no_detach=false no_transition=false",
                "dispose c no_detach=false no_transition=false",
            ]
        );
        assert_eq!(
            doc.mutations(),
            &[
                DomMutation::Remove {
                    key: el,
                    parent: root
                },
                DomMutation::Remove {
                    key: sel,
                    parent: root
                },
            ]
        );
        assert!(log.mutation_marks().iter().all(|&mark| mark == 0));
        assert!(node.children().is_empty());
        assert_eq!(node.sel(), None);
        assert_eq!(node.el(), None);
        assert!(node.owner().is_none());
        assert!(node.scope().is_none());
        assert!(node.parent().is_none());
        assert_eq!(node.life_cycle(), LifeCycle::Disposed);
        assert!(hook_ran.get());
    }

    #[test]
    fn no_detach_keeps_markers_in_document() {
        let log = CallLog::default();
        let mut doc = recording_doc();
        let root = doc.root();
        let a_node = recording_template(&log, &["a", "b"]);
        let mut walker = ReverseWalker::new(&mut doc, root).unwrap();
        let mut node = TemplateNode::new(&mut doc, &a_node, None, &Model::new(), &owner(), Some(&mut walker))
            .unwrap();
        let (sel, el) = (node.sel().unwrap(), node.el().unwrap());
        doc.take_mutations();

        node.dispose(&mut doc, true, true).unwrap();

        assert_eq!(
            log.entries(),
            vec![
                "dispose a no_detach=true no_transition=true",
                "dispose b no_detach=true no_transition=true",
            ]
        );
        assert!(doc.mutations().is_empty());
        assert_eq!(doc.children(root), &[sel, el]);
        assert_eq!(node.sel(), None);
        assert!(node.owner().is_none());
        assert!(node.scope().is_none());
        assert!(node.life_cycle().is_disposed());
    }

    #[test]
    fn update_fans_out_identical_changes() {
        let log = CallLog::default();
        let mut doc = HostDocument::default();
        let root = doc.root();
        let a_node = recording_template(&log, &["c1", "c2"]);
        let mut walker = ReverseWalker::new(&mut doc, root).unwrap();
        let mut node = TemplateNode::new(&mut doc, &a_node, None, &Model::new(), &owner(), Some(&mut walker))
            .unwrap();

        let changes = vec![
            DataChange { key: "a".into() },
            DataChange { key: "b".into() },
        ];
        node.update(&mut doc, &changes).unwrap();

        assert_eq!(log.entries(), vec!["update c1", "update c2"]);
        assert_eq!(log.update_ptrs(), vec![changes.as_ptr(), changes.as_ptr()]);
    }
}
