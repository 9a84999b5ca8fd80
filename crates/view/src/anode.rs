//! Abstract node model: the parsed, data-only description of one template
//! node. Trees are shared behind `Rc` and are immutable apart from the
//! `elem` memo written by the node factory.

use std::cell::{Cell, OnceCell};
use std::rc::Rc;

use crate::data::Model;
use crate::is_node::IsClass;
use crate::node::NodeClass;
use crate::template_node::TemplateClass;

#[derive(Clone, Debug, Default)]
pub struct ANode {
    pub tag_name: String,
    elem: Cell<bool>,
    pub clazz: Option<Rc<dyn NodeClass>>,
    pub directives: Directives,
    /// Static attributes.
    pub props: Vec<(String, String)>,
    pub children: Vec<Rc<ANode>>,
    rinsed: OnceCell<Rc<ANode>>,
}

impl ANode {
    /// `template` and `fragment` tags resolve straight to a template
    /// container, like the compiler's preheat step does.
    pub fn new(tag_name: impl Into<String>) -> Self {
        let tag_name = tag_name.into();
        let clazz: Option<Rc<dyn NodeClass>> = match tag_name.as_str() {
            "template" | "fragment" => Some(Rc::new(TemplateClass)),
            _ => None,
        };
        Self {
            tag_name,
            clazz,
            ..Self::default()
        }
    }

    pub fn with_child(mut self, child: ANode) -> Self {
        self.children.push(Rc::new(child));
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = ANode>) -> Self {
        self.children.extend(children.into_iter().map(Rc::new));
        self
    }

    pub fn with_prop(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.props.push((name.into(), value.into()));
        self
    }

    pub fn with_clazz(mut self, clazz: Rc<dyn NodeClass>) -> Self {
        self.clazz = Some(clazz);
        self
    }

    /// Attach an `is` directive; the node is then built by [`IsNode`](crate::IsNode).
    pub fn with_is(mut self, value: DirectiveValue) -> Self {
        self.directives.is = Some(Directive { value });
        self.clazz = Some(Rc::new(IsClass));
        self
    }

    pub fn with_elem(self) -> Self {
        self.elem.set(true);
        self
    }

    pub fn is_elem(&self) -> bool {
        self.elem.get()
    }

    /// One-way memo: once set, every later dispatch of this node takes the
    /// plain element branch.
    pub fn mark_elem(&self) {
        self.elem.set(true);
    }

    /// Copy of this node without `clazz`, built once and cached.
    pub fn rinsed(&self) -> Rc<ANode> {
        Rc::clone(self.rinsed.get_or_init(|| {
            Rc::new(ANode {
                clazz: None,
                rinsed: OnceCell::new(),
                ..self.clone()
            })
        }))
    }
}

#[derive(Clone, Debug, Default)]
pub struct Directives {
    pub is: Option<Directive>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Directive {
    pub value: DirectiveValue,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DirectiveValue {
    Literal(String),
    /// Key looked up in the node's scope.
    Binding(String),
}

impl Directive {
    pub fn eval(&self, scope: &Model) -> Option<String> {
        match &self.value {
            DirectiveValue::Literal(value) => Some(value.clone()),
            DirectiveValue::Binding(key) => scope.get(key),
        }
    }
}
