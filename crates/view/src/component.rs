//! Components: the registry consulted by the node factory, the owner context
//! handed to template nodes, and the `Component` view node itself.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use host_dom::{HostDocument, HostNodeId, ReverseWalker};

use crate::anode::ANode;
use crate::async_component::ComponentLoader;
use crate::data::{DataChange, Model, ScopeRef};
use crate::error::ViewError;
use crate::factory::create_reverse_node;
use crate::guid::{NodeId, next_id};
use crate::life_cycle::LifeCycle;
use crate::node::{DisposeHook, NodeBase, ParentLink, ViewNode};
use crate::node_type::NodeType;

pub type OwnerRef = Rc<ComponentContext>;

/// Registry constructor for a component.
pub trait ComponentClass: fmt::Debug {
    fn construct(
        &self,
        doc: &mut HostDocument,
        options: ComponentOptions<'_>,
    ) -> Result<Box<dyn ViewNode>, ViewError>;
}

/// Configuration record passed to component constructors.
#[derive(Debug)]
pub struct ComponentOptions<'w> {
    pub source: Rc<ANode>,
    /// Enclosing component; `None` for a root component.
    pub owner: Option<OwnerRef>,
    pub scope: Option<ScopeRef>,
    pub parent: Option<ParentLink>,
    pub reverse_walker: Option<&'w mut ReverseWalker>,
}

impl ComponentOptions<'_> {
    /// Same placement, without a walker (create mode).
    pub fn detached(&self) -> ComponentOptions<'static> {
        ComponentOptions {
            source: Rc::clone(&self.source),
            owner: self.owner.clone(),
            scope: self.scope.clone(),
            parent: self.parent,
            reverse_walker: None,
        }
    }
}

#[derive(Clone, Debug)]
pub enum ComponentEntry {
    Class(Rc<dyn ComponentClass>),
    /// Loader token; the factory builds an [`AsyncComponent`](crate::AsyncComponent).
    Loader(Rc<ComponentLoader>),
}

#[derive(Clone, Debug, Default)]
pub struct ComponentRegistry {
    entries: HashMap<String, ComponentEntry>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_class(&mut self, name: impl Into<String>, class: Rc<dyn ComponentClass>) {
        self.entries.insert(name.into(), ComponentEntry::Class(class));
    }

    pub fn register_loader(&mut self, name: impl Into<String>, loader: Rc<ComponentLoader>) {
        self.entries.insert(name.into(), ComponentEntry::Loader(loader));
    }

    pub fn get(&self, name: &str) -> Option<&ComponentEntry> {
        self.entries.get(name)
    }
}

/// Static description of a component: its template, the components its
/// template may use, and initial data.
#[derive(Debug)]
pub struct ComponentDefinition {
    pub name: String,
    pub template: Rc<ANode>,
    pub components: Rc<ComponentRegistry>,
    pub data: Vec<(String, String)>,
}

impl ComponentDefinition {
    pub fn new(name: impl Into<String>, template: ANode) -> Self {
        Self {
            name: name.into(),
            template: Rc::new(template),
            components: Rc::default(),
            data: Vec::new(),
        }
    }

    pub fn with_component(mut self, name: impl Into<String>, class: Rc<dyn ComponentClass>) -> Self {
        Rc::make_mut(&mut self.components).register_class(name, class);
        self
    }

    pub fn with_loader(mut self, name: impl Into<String>, loader: Rc<ComponentLoader>) -> Self {
        Rc::make_mut(&mut self.components).register_loader(name, loader);
        self
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.push((key.into(), value.into()));
        self
    }
}

impl ComponentClass for ComponentDefinition {
    fn construct(
        &self,
        doc: &mut HostDocument,
        options: ComponentOptions<'_>,
    ) -> Result<Box<dyn ViewNode>, ViewError> {
        Ok(Box::new(Component::new(doc, self, options)?))
    }
}

/// Owner context of a component instance: what its template nodes see as
/// `owner`.
#[derive(Debug)]
pub struct ComponentContext {
    id: NodeId,
    name: String,
    template: Rc<ANode>,
    components: Rc<ComponentRegistry>,
    data: ScopeRef,
}

impl ComponentContext {
    pub fn new(id: NodeId, definition: &ComponentDefinition) -> OwnerRef {
        Rc::new(Self {
            id,
            name: definition.name.clone(),
            template: Rc::clone(&definition.template),
            components: Rc::clone(&definition.components),
            data: Model::from_pairs(definition.data.iter().cloned()),
        })
    }

    /// Owner with the given registry and an empty template, for driving the
    /// factory directly.
    pub fn with_components(components: ComponentRegistry) -> OwnerRef {
        let mut definition = ComponentDefinition::new("root", ANode::new("template"));
        definition.components = Rc::new(components);
        Self::new(next_id(), &definition)
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn template(&self) -> &Rc<ANode> {
        &self.template
    }

    pub fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    pub fn data(&self) -> &ScopeRef {
        &self.data
    }
}

/// A component instance in the tree. Its template root is built with the
/// component as parent and its own context as owner.
#[derive(Debug)]
pub struct Component {
    base: NodeBase,
    context: Option<OwnerRef>,
    root: Option<Box<dyn ViewNode>>,
}

impl Component {
    pub fn new(
        doc: &mut HostDocument,
        definition: &ComponentDefinition,
        options: ComponentOptions<'_>,
    ) -> Result<Self, ViewError> {
        let ComponentOptions {
            source,
            owner,
            scope,
            parent,
            reverse_walker,
        } = options;
        let base = NodeBase::new(&source, parent, scope.as_ref(), owner.as_ref());
        let context = ComponentContext::new(base.id, definition);
        let mut component = Self {
            base,
            context: Some(Rc::clone(&context)),
            root: None,
        };

        if let Some(walker) = reverse_walker {
            let root = build_root(doc, &context, component.link(), Some(walker))?;
            component.root = Some(root);
            component.base.life_cycle = LifeCycle::Attached;
        }
        Ok(component)
    }

    pub fn context(&self) -> Option<&OwnerRef> {
        self.context.as_ref()
    }

    pub fn root(&self) -> Option<&dyn ViewNode> {
        self.root.as_deref()
    }

    pub fn owner(&self) -> Option<&OwnerRef> {
        self.base.owner.as_ref()
    }
}

fn build_root(
    doc: &mut HostDocument,
    context: &OwnerRef,
    link: ParentLink,
    reverse_walker: Option<&mut ReverseWalker>,
) -> Result<Box<dyn ViewNode>, ViewError> {
    create_reverse_node(
        doc,
        context.template(),
        Some(link),
        context.data(),
        context,
        reverse_walker,
        None,
    )
}

impl ViewNode for Component {
    fn id(&self) -> NodeId {
        self.base.id
    }

    fn node_type(&self) -> NodeType {
        NodeType::Cmpt
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
        let Some(context) = self.context.clone() else {
            log::warn!(target: "view.dispose", "attach on disposed component {}", self.base.id);
            return Ok(());
        };
        let mut root = build_root(doc, &context, self.link(), None)?;
        root.attach(doc, parent_el, before)?;
        self.root = Some(root);
        self.base.life_cycle = LifeCycle::Attached;
        Ok(())
    }

    fn dispose(
        &mut self,
        doc: &mut HostDocument,
        no_detach: bool,
        no_transition: bool,
    ) -> Result<(), ViewError> {
        let disposed = match self.root.take() {
            Some(mut root) => root.dispose(doc, no_detach, no_transition),
            None => Ok(()),
        };
        if let Some(context) = self.context.take() {
            log::trace!(target: "view.dispose", "component {} ({}) disposed", self.base.id, context.name());
        }
        self.base.finish_dispose();
        disposed
    }

    fn update(&mut self, doc: &mut HostDocument, changes: &[DataChange]) -> Result<(), ViewError> {
        match self.root.as_mut() {
            Some(root) => root.update(doc, changes),
            None => Ok(()),
        }
    }

    fn el_as_root_node(&self) -> Option<HostNodeId> {
        self.root.as_ref().and_then(|root| root.el_as_root_node())
    }

    fn set_on_disposed(&mut self, hook: DisposeHook) {
        self.base.on_disposed = Some(hook);
    }
}
