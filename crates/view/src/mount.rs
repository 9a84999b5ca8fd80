//! Root entry points.

use std::rc::Rc;

use host_dom::{HostDocument, HostNodeId, ReverseWalker};

use crate::anode::ANode;
use crate::component::{Component, ComponentDefinition, ComponentOptions};
use crate::error::ViewError;
use crate::node::ViewNode;

/// Build the root component against markup already present under `target`.
///
/// Host nodes the template did not claim are left in place.
pub fn hydrate(
    doc: &mut HostDocument,
    target: HostNodeId,
    definition: &ComponentDefinition,
) -> Result<Component, ViewError> {
    let mut walker = ReverseWalker::new(doc, target)?;
    let component = Component::new(doc, definition, root_options(definition, Some(&mut walker)))?;

    if !walker.is_done() {
        log::warn!(
            target: "view.hydrate",
            "{}: unclaimed markup left under {target} from {:?}",
            definition.name,
            walker.current()
        );
    }
    Ok(component)
}

/// Build the root component from scratch and insert it into `parent_el`
/// before `before`.
pub fn mount(
    doc: &mut HostDocument,
    definition: &ComponentDefinition,
    parent_el: HostNodeId,
    before: Option<HostNodeId>,
) -> Result<Component, ViewError> {
    let mut component = Component::new(doc, definition, root_options(definition, None))?;
    component.attach(doc, parent_el, before)?;
    Ok(component)
}

fn root_options<'w>(
    definition: &ComponentDefinition,
    reverse_walker: Option<&'w mut ReverseWalker>,
) -> ComponentOptions<'w> {
    ComponentOptions {
        source: Rc::new(ANode::new(definition.name.clone())),
        owner: None,
        scope: None,
        parent: None,
        reverse_walker,
    }
}
