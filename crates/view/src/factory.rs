//! Node factory: decides which view node variant an abstract node becomes.

use std::rc::Rc;

use host_dom::{HostDocument, ReverseWalker};

use crate::anode::ANode;
use crate::async_component::{AsyncComponent, ComponentLoader};
use crate::component::{ComponentClass, ComponentContext, ComponentEntry, ComponentOptions, OwnerRef};
use crate::data::ScopeRef;
use crate::element::Element;
use crate::error::ViewError;
use crate::node::{NodeClass, ParentLink, ViewNode};
use crate::template_node::TemplateNode;

/// Outcome of [`classify`].
#[derive(Debug)]
pub enum Dispatch {
    /// The abstract node is already marked as a plain element.
    Element,
    /// The abstract node carries its own constructor.
    Class(Rc<dyn NodeClass>),
    Component(Rc<dyn ComponentClass>),
    AsyncComponent(Rc<ComponentLoader>),
    Template,
    /// Nothing matched; the decision is memoized on the abstract node.
    DefaultElement,
    /// `is` named neither a registered component nor a container.
    UnresolvedIs,
}

impl Dispatch {
    pub fn label(&self) -> &'static str {
        match self {
            Dispatch::Element => "element",
            Dispatch::Class(_) => "class",
            Dispatch::Component(_) => "component",
            Dispatch::AsyncComponent(_) => "async-component",
            Dispatch::Template => "template",
            Dispatch::DefaultElement => "default-element",
            Dispatch::UnresolvedIs => "unresolved-is",
        }
    }
}

/// Pure dispatch rule. First match wins:
/// `elem` flag, `clazz`, registry entry for `component_name` or the tag,
/// `is` container names, then the plain element default.
pub fn classify(a_node: &ANode, owner: &ComponentContext, component_name: Option<&str>) -> Dispatch {
    if a_node.is_elem() {
        return Dispatch::Element;
    }
    if let Some(clazz) = &a_node.clazz {
        return Dispatch::Class(Rc::clone(clazz));
    }

    let name = component_name.unwrap_or(&a_node.tag_name);
    match owner.components().get(name) {
        Some(ComponentEntry::Class(class)) => return Dispatch::Component(Rc::clone(class)),
        Some(ComponentEntry::Loader(loader)) => return Dispatch::AsyncComponent(Rc::clone(loader)),
        None => {}
    }

    if a_node.directives.is.is_some() {
        return match component_name {
            Some("fragment" | "template") => Dispatch::Template,
            _ => Dispatch::UnresolvedIs,
        };
    }
    Dispatch::DefaultElement
}

/// Build exactly one view node for `a_node`.
///
/// A walker selects hydration mode for the whole subtree; the walker is
/// consumed strictly in document order by the node and its descendants.
#[allow(clippy::too_many_arguments)]
pub fn create_reverse_node(
    doc: &mut HostDocument,
    a_node: &Rc<ANode>,
    parent: Option<ParentLink>,
    scope: &ScopeRef,
    owner: &OwnerRef,
    reverse_walker: Option<&mut ReverseWalker>,
    component_name: Option<&str>,
) -> Result<Box<dyn ViewNode>, ViewError> {
    let dispatch = classify(a_node, owner, component_name);
    log::trace!(
        target: "view.factory",
        "<{}> as {:?} -> {}",
        a_node.tag_name,
        component_name,
        dispatch.label()
    );

    let node: Box<dyn ViewNode> = match dispatch {
        Dispatch::Element | Dispatch::UnresolvedIs => Box::new(Element::new(
            doc,
            a_node,
            parent,
            scope,
            owner,
            component_name,
            reverse_walker,
        )?),
        Dispatch::DefaultElement => {
            a_node.mark_elem();
            Box::new(Element::new(
                doc,
                a_node,
                parent,
                scope,
                owner,
                component_name,
                reverse_walker,
            )?)
        }
        Dispatch::Class(clazz) => clazz.construct(doc, a_node, parent, scope, owner, reverse_walker)?,
        Dispatch::Component(class) => class.construct(
            doc,
            component_options(a_node, parent, scope, owner, reverse_walker),
        )?,
        Dispatch::AsyncComponent(loader) => Box::new(AsyncComponent::new(
            doc,
            component_options(a_node, parent, scope, owner, reverse_walker),
            loader,
        )?),
        Dispatch::Template => Box::new(TemplateNode::new(
            doc,
            a_node,
            parent,
            scope,
            owner,
            reverse_walker,
        )?),
    };
    Ok(node)
}

fn component_options<'w>(
    a_node: &Rc<ANode>,
    parent: Option<ParentLink>,
    scope: &ScopeRef,
    owner: &OwnerRef,
    reverse_walker: Option<&'w mut ReverseWalker>,
) -> ComponentOptions<'w> {
    ComponentOptions {
        source: Rc::clone(a_node),
        owner: Some(Rc::clone(owner)),
        scope: Some(Rc::clone(scope)),
        parent,
        reverse_walker,
    }
}

/// Create-mode factory: same dispatch, no walker. The node still needs
/// [`ViewNode::attach`].
pub fn create_node(
    doc: &mut HostDocument,
    a_node: &Rc<ANode>,
    parent: Option<ParentLink>,
    scope: &ScopeRef,
    owner: &OwnerRef,
    component_name: Option<&str>,
) -> Result<Box<dyn ViewNode>, ViewError> {
    create_reverse_node(doc, a_node, parent, scope, owner, None, component_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anode::DirectiveValue;
    use crate::component::{Component, ComponentDefinition, ComponentRegistry};
    use crate::data::Model;
    use crate::node_type::NodeType;
    use crate::test_support::{CallLog, RecordingClass};
    use host_dom::HostDocumentConfig;

    fn owner_with(registry: ComponentRegistry) -> OwnerRef {
        ComponentContext::with_components(registry)
    }

    fn card() -> Rc<dyn ComponentClass> {
        Rc::new(ComponentDefinition::new("card", ANode::new("article")))
    }

    #[test]
    fn elem_flag_beats_clazz() {
        let mut doc = HostDocument::default();
        let a_node = Rc::new(
            ANode::new("x")
                .with_clazz(Rc::new(RecordingClass::new(CallLog::default())))
                .with_elem(),
        );
        let owner = owner_with(ComponentRegistry::new());
        assert!(matches!(classify(&a_node, &owner, None), Dispatch::Element));

        let node = create_node(&mut doc, &a_node, None, &Model::new(), &owner, None).unwrap();
        assert_eq!(node.node_type(), NodeType::Elem);
    }

    #[test]
    fn clazz_beats_registry() {
        let mut registry = ComponentRegistry::new();
        registry.register_class("x", card());
        let owner = owner_with(registry);
        let a_node = ANode::new("x").with_clazz(Rc::new(RecordingClass::new(CallLog::default())));
        assert_eq!(classify(&a_node, &owner, None).label(), "class");
    }

    #[test]
    fn fallback_is_memoized_across_owners() {
        let mut doc = HostDocument::default();
        let a_node = Rc::new(ANode::new("card"));
        let plain = owner_with(ComponentRegistry::new());
        let node = create_node(&mut doc, &a_node, None, &Model::new(), &plain, None).unwrap();
        assert_eq!(node.node_type(), NodeType::Elem);
        assert!(a_node.is_elem());

        let mut registry = ComponentRegistry::new();
        registry.register_class("card", card());
        let with_card = owner_with(registry);
        assert!(matches!(classify(&a_node, &with_card, None), Dispatch::Element));
        let node = create_node(&mut doc, &a_node, None, &Model::new(), &with_card, None).unwrap();
        assert_eq!(node.node_type(), NodeType::Elem);
    }

    #[test]
    fn registry_entries_dispatch_by_kind() {
        let mut doc = HostDocument::default();
        let mut registry = ComponentRegistry::new();
        registry.register_class("card", card());
        registry.register_loader("lazy", Rc::new(ComponentLoader::new()));
        let owner = owner_with(registry);

        let component = create_node(&mut doc, &Rc::new(ANode::new("card")), None, &Model::new(), &owner, None)
            .unwrap();
        assert_eq!(component.node_type(), NodeType::Cmpt);

        let lazy = create_node(&mut doc, &Rc::new(ANode::new("lazy")), None, &Model::new(), &owner, None)
            .unwrap();
        assert_eq!(lazy.node_type(), NodeType::Loader);
    }

    #[test]
    fn component_name_takes_precedence_over_tag() {
        let mut registry = ComponentRegistry::new();
        registry.register_class("card", card());
        let owner = owner_with(registry);
        let a_node = ANode::new("div");
        assert_eq!(classify(&a_node, &owner, Some("card")).label(), "component");
        assert_eq!(classify(&a_node, &owner, None).label(), "default-element");
    }

    #[test]
    fn is_directive_resolves_containers_and_falls_back_without_memo() {
        let mut doc = HostDocument::default();
        let owner = owner_with(ComponentRegistry::new());
        let a_node = ANode::new("div").with_is(DirectiveValue::Literal("fragment".into()));
        let rinsed = a_node.rinsed();

        assert_eq!(classify(&rinsed, &owner, Some("fragment")).label(), "template");
        assert_eq!(classify(&rinsed, &owner, Some("template")).label(), "template");
        assert_eq!(classify(&rinsed, &owner, Some("section")).label(), "unresolved-is");

        let node = create_node(&mut doc, &rinsed, None, &Model::new(), &owner, Some("section")).unwrap();
        assert_eq!(node.node_type(), NodeType::Elem);
        assert!(!rinsed.is_elem());

        let node = create_node(&mut doc, &rinsed, None, &Model::new(), &owner, Some("fragment")).unwrap();
        assert_eq!(node.node_type(), NodeType::Tpl);
    }

    #[test]
    fn component_descendants_report_it_as_parent_component() {
        let mut doc = HostDocument::new(HostDocumentConfig::default());
        let root = doc.root();
        let definition = ComponentDefinition::new(
            "panel",
            ANode::new("template").with_child(ANode::new("p")),
        );
        let outer = ParentLink {
            id: crate::guid::next_id(),
            node_type: NodeType::Cmpt,
            parent_component: None,
        };
        let options = ComponentOptions {
            source: Rc::new(ANode::new("panel")),
            owner: Some(owner_with(ComponentRegistry::new())),
            scope: Some(Model::new()),
            parent: Some(outer),
            reverse_walker: None,
        };
        let mut component = Component::new(&mut doc, &definition, options).unwrap();
        assert_eq!(component.parent_component(), Some(outer.id));

        component.attach(&mut doc, root, None).unwrap();
        let template = component.root().unwrap();
        assert_eq!(template.node_type(), NodeType::Tpl);
        assert_eq!(template.parent_component(), Some(component.id()));
        assert_eq!(template.link().component_for_child(), Some(component.id()));
    }
}
