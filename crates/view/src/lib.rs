//! View-node construction and lifecycle core.
//!
//! An abstract node ([`ANode`]) is turned into exactly one live view node by
//! [`create_reverse_node`]. With a [`ReverseWalker`](host_dom::ReverseWalker)
//! the new subtree adopts markup already present in the host document
//! (hydration) and heals whatever is missing; without one, nodes are created
//! detached and placed by [`ViewNode::attach`].
//!
//! Every node moves through [`LifeCycle`] `Start -> Attached -> Disposed`.
//! Disposal cascades parent-first through owned children; `no_detach` tells
//! descendants that an ancestor removes the host subtree in one go.

mod anode;
mod async_component;
mod children;
mod component;
mod data;
mod element;
mod error;
mod factory;
mod guid;
mod is_node;
mod life_cycle;
mod mount;
mod node;
mod node_type;
mod template_node;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use crate::anode::{ANode, Directive, DirectiveValue, Directives};
pub use crate::async_component::{AsyncComponent, ComponentLoader, LoadState};
pub use crate::children::{MarkerSpan, attach_own_only_children, dispose_children};
pub use crate::component::{
    Component, ComponentClass, ComponentContext, ComponentDefinition, ComponentEntry,
    ComponentOptions, ComponentRegistry, OwnerRef,
};
pub use crate::data::{DataChange, Model, ScopeRef};
pub use crate::element::Element;
pub use crate::error::ViewError;
pub use crate::factory::{Dispatch, classify, create_node, create_reverse_node};
pub use crate::guid::{NodeId, next_id};
pub use crate::is_node::{IsClass, IsNode};
pub use crate::life_cycle::LifeCycle;
pub use crate::mount::{hydrate, mount};
pub use crate::node::{DisposeHook, NodeClass, ParentLink, ViewNode};
pub use crate::node_type::NodeType;
pub use crate::template_node::{TemplateClass, TemplateNode};
