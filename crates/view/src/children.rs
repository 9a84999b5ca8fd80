//! Helpers shared by container variants.

use host_dom::{HostDocument, HostNodeId, ReverseWalker};

use crate::anode::ANode;
use crate::component::OwnerRef;
use crate::data::ScopeRef;
use crate::error::ViewError;
use crate::factory::create_node;
use crate::guid::NodeId;
use crate::node::{ParentLink, ViewNode};

/// Dispose every child in order, then drop them. `children` is left empty.
///
/// A child that fails does not stop its later siblings; the first error is
/// returned once every child has been disposed.
pub fn dispose_children(
    doc: &mut HostDocument,
    children: &mut Vec<Box<dyn ViewNode>>,
    no_detach: bool,
    no_transition: bool,
) -> Result<(), ViewError> {
    let mut first_err = None;
    for mut child in children.drain(..) {
        if let Err(err) = child.dispose(doc, no_detach, no_transition) {
            log::warn!(target: "view.dispose", "child {} failed to dispose: {err}", child.id());
            first_err.get_or_insert(err);
        }
    }
    first_err.map_or(Ok(()), Err)
}

/// Anchor comment for a hydrating node: the walker's current node when it is
/// a comment reading `label`, otherwise a new comment inserted before it.
pub(crate) fn adopt_or_insert_anchor(
    doc: &mut HostDocument,
    walker: &mut ReverseWalker,
    label: &str,
) -> Result<HostNodeId, ViewError> {
    if let Some(current) = walker.current() {
        if doc.comment_text(current) == Some(label) {
            walker.go_next();
            return Ok(current);
        }
    }
    let anchor = doc.create_comment(label);
    doc.insert_before(walker.target(), anchor, walker.current())?;
    log::debug!(target: "view.hydrate", "{label} anchor missing, synthesized {anchor}");
    Ok(anchor)
}

/// Start and end comments delimiting a container's content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkerSpan {
    pub sel: HostNodeId,
    pub el: HostNodeId,
}

/// Attach for nodes that render no element of their own: a start marker,
/// each child created and attached in order, then an end marker, all placed
/// before `before` in `parent_el`.
#[allow(clippy::too_many_arguments)]
pub fn attach_own_only_children(
    doc: &mut HostDocument,
    id: NodeId,
    a_node: &ANode,
    link: ParentLink,
    scope: &ScopeRef,
    owner: &OwnerRef,
    parent_el: HostNodeId,
    before: Option<HostNodeId>,
) -> Result<(MarkerSpan, Vec<Box<dyn ViewNode>>), ViewError> {
    let label = id.to_string();
    let sel = doc.create_comment(&label);
    doc.insert_before(parent_el, sel, before)?;

    let mut children = Vec::with_capacity(a_node.children.len());
    for child in &a_node.children {
        let mut node = create_node(doc, child, Some(link), scope, owner, None)?;
        node.attach(doc, parent_el, before)?;
        children.push(node);
    }

    let el = doc.create_comment(&label);
    doc.insert_before(parent_el, el, before)?;
    Ok((MarkerSpan { sel, el }, children))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{ComponentContext, ComponentRegistry};
    use crate::data::Model;
    use crate::test_support::{CallLog, RecordingClass};
    use std::rc::Rc;

    #[test]
    fn dispose_children_reports_first_error_after_all_children() {
        let log = CallLog::default();
        let mut doc = HostDocument::default();
        let owner = ComponentContext::with_components(ComponentRegistry::new());
        let a_nodes = [
            RecordingClass::failing_anode(&log, "a"),
            RecordingClass::anode(&log, "b"),
            RecordingClass::failing_anode(&log, "c"),
        ];
        let mut children: Vec<Box<dyn ViewNode>> = a_nodes
            .into_iter()
            .map(|a_node| create_node(&mut doc, &Rc::new(a_node), None, &Model::new(), &owner, None).unwrap())
            .collect();
        let first = children[0].id();

        let err = dispose_children(&mut doc, &mut children, true, false).unwrap_err();

        assert!(matches!(err, ViewError::DetachedAnchor(id) if id == first));
        assert!(children.is_empty());
        assert_eq!(
            log.entries(),
            vec![
                "dispose a no_detach=true no_transition=false",
                "dispose b no_detach=true no_transition=false",
                "dispose c no_detach=true no_transition=false",
            ]
        );
    }

    #[test]
    fn anchor_with_other_label_is_not_adopted() {
        let mut doc = HostDocument::default();
        let root = doc.root();
        let marker = doc.create_comment("async");
        doc.append_child(root, marker).unwrap();

        let mut walker = ReverseWalker::new(&mut doc, root).unwrap();
        let anchor = adopt_or_insert_anchor(&mut doc, &mut walker, "is").unwrap();
        assert_eq!(doc.children(root), &[anchor, marker]);
        assert_eq!(walker.current(), Some(marker));

        let adopted = adopt_or_insert_anchor(&mut doc, &mut walker, "async").unwrap();
        assert_eq!(adopted, marker);
        assert!(walker.is_done());
    }
}
