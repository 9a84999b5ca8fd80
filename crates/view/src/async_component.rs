//! Components whose class arrives later.
//!
//! The registry holds a [`ComponentLoader`] token instead of a class. The
//! factory builds an [`AsyncComponent`] for it, which renders the loader's
//! placeholder behind an anchor comment and swaps in the real component once
//! the loader settles. Fetching is driven from outside; this module only
//! observes the token's state, on `attach` and on every `update`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use host_dom::{HostDocument, HostNodeId, ReverseWalker};

use crate::children::adopt_or_insert_anchor;
use crate::component::{ComponentClass, ComponentOptions};
use crate::data::DataChange;
use crate::error::ViewError;
use crate::guid::NodeId;
use crate::life_cycle::LifeCycle;
use crate::node::{DisposeHook, NodeBase, ViewNode};
use crate::node_type::NodeType;

const ANCHOR_LABEL: &str = "async";

#[derive(Clone, Debug, Default)]
pub enum LoadState {
    #[default]
    Pending,
    Ready(Rc<dyn ComponentClass>),
    Failed,
}

#[derive(Debug, Default)]
pub struct ComponentLoader {
    state: RefCell<LoadState>,
    started: Cell<bool>,
    placeholder: Option<Rc<dyn ComponentClass>>,
    fallback: Option<Rc<dyn ComponentClass>>,
}

impl ComponentLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered until the load settles.
    pub fn with_placeholder(mut self, class: Rc<dyn ComponentClass>) -> Self {
        self.placeholder = Some(class);
        self
    }

    /// Rendered instead of the component when the load fails.
    pub fn with_fallback(mut self, class: Rc<dyn ComponentClass>) -> Self {
        self.fallback = Some(class);
        self
    }

    /// Mark the load as requested. Idempotent.
    pub fn start(&self) {
        if !self.started.replace(true) {
            log::debug!(target: "view.async", "load requested");
        }
    }

    pub fn is_started(&self) -> bool {
        self.started.get()
    }

    pub fn resolve(&self, class: Rc<dyn ComponentClass>) {
        *self.state.borrow_mut() = LoadState::Ready(class);
    }

    pub fn fail(&self) {
        *self.state.borrow_mut() = LoadState::Failed;
    }

    pub fn state(&self) -> LoadState {
        self.state.borrow().clone()
    }

    pub fn placeholder(&self) -> Option<&Rc<dyn ComponentClass>> {
        self.placeholder.as_ref()
    }

    pub fn fallback(&self) -> Option<&Rc<dyn ComponentClass>> {
        self.fallback.as_ref()
    }
}

#[derive(Debug)]
pub struct AsyncComponent {
    base: NodeBase,
    loader: Rc<ComponentLoader>,
    anchor: Option<HostNodeId>,
    child: Option<Box<dyn ViewNode>>,
    settled: bool,
}

impl AsyncComponent {
    pub fn new(
        doc: &mut HostDocument,
        options: ComponentOptions<'_>,
        loader: Rc<ComponentLoader>,
    ) -> Result<Self, ViewError> {
        let ComponentOptions {
            source,
            owner,
            scope,
            parent,
            reverse_walker,
        } = options;
        let mut node = Self {
            base: NodeBase::new(&source, parent, scope.as_ref(), owner.as_ref()),
            loader,
            anchor: None,
            child: None,
            settled: false,
        };

        if let Some(walker) = reverse_walker {
            node.hydrate(doc, walker)?;
        }
        Ok(node)
    }

    pub fn loader(&self) -> &Rc<ComponentLoader> {
        &self.loader
    }

    pub fn anchor(&self) -> Option<HostNodeId> {
        self.anchor
    }

    /// Placeholder, fallback or resolved component, whichever is current.
    pub fn child(&self) -> Option<&dyn ViewNode> {
        self.child.as_deref()
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Swap in the loaded component, or the fallback after a failure, if the
    /// loader has settled since the last poll. Returns whether a swap
    /// happened. At most one swap happens over the node's life.
    pub fn poll(&mut self, doc: &mut HostDocument) -> Result<bool, ViewError> {
        if self.settled {
            return Ok(false);
        }
        let Some(anchor) = self.anchor else {
            return Ok(false);
        };
        let class = match self.loader.state() {
            LoadState::Pending => return Ok(false),
            LoadState::Ready(class) => class,
            LoadState::Failed => match self.loader.fallback() {
                Some(fallback) => Rc::clone(fallback),
                None => {
                    log::warn!(target: "view.async", "async {} failed with no fallback", self.base.id);
                    self.settled = true;
                    return Ok(false);
                }
            },
        };

        let parent_el = doc
            .parent(anchor)
            .ok_or(ViewError::DetachedAnchor(self.base.id))?;
        if let Some(mut previous) = self.child.take() {
            previous.dispose(doc, false, true)?;
        }
        let mut child = class.construct(doc, self.child_options())?;
        child.attach(doc, parent_el, Some(anchor))?;
        self.child = Some(child);
        self.settled = true;
        log::debug!(target: "view.async", "async {} settled", self.base.id);
        Ok(true)
    }

    fn hydrate(&mut self, doc: &mut HostDocument, walker: &mut ReverseWalker) -> Result<(), ViewError> {
        if let Some(placeholder) = self.loader.placeholder().cloned() {
            let mut options = self.child_options();
            options.reverse_walker = Some(&mut *walker);
            self.child = Some(placeholder.construct(doc, options)?);
        }
        self.anchor = Some(adopt_or_insert_anchor(doc, walker, ANCHOR_LABEL)?);
        self.loader.start();
        self.base.life_cycle = LifeCycle::Attached;
        self.poll(doc)?;
        Ok(())
    }

    fn child_options<'w>(&self) -> ComponentOptions<'w> {
        ComponentOptions {
            source: Rc::clone(&self.base.a_node),
            owner: self.base.owner.clone(),
            scope: self.base.scope.clone(),
            parent: Some(self.link()),
            reverse_walker: None,
        }
    }
}

impl ViewNode for AsyncComponent {
    fn id(&self) -> NodeId {
        self.base.id
    }

    fn node_type(&self) -> NodeType {
        NodeType::Loader
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
        if self.base.life_cycle.is_disposed() {
            log::warn!(target: "view.dispose", "attach on disposed async component {}", self.base.id);
            return Ok(());
        }
        if let Some(placeholder) = self.loader.placeholder().cloned() {
            let mut child = placeholder.construct(doc, self.child_options())?;
            child.attach(doc, parent_el, before)?;
            self.child = Some(child);
        }
        let anchor = doc.create_comment(ANCHOR_LABEL);
        doc.insert_before(parent_el, anchor, before)?;
        self.anchor = Some(anchor);
        self.loader.start();
        self.base.life_cycle = LifeCycle::Attached;
        self.poll(doc)?;
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
        self.poll(doc)?;
        match self.child.as_mut() {
            Some(child) => child.update(doc, changes),
            None => Ok(()),
        }
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
