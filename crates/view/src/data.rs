//! Minimal data environment handed to view nodes as their scope.
//!
//! Expression evaluation lives outside this crate; nodes only need key lookups
//! (for `is` directives) and a change record to fan out on update.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub type ScopeRef = Rc<Model>;

#[derive(Debug, Default)]
pub struct Model {
    values: RefCell<HashMap<String, String>>,
    parent: Option<ScopeRef>,
}

impl Model {
    pub fn new() -> ScopeRef {
        Rc::new(Model::default())
    }

    /// Child scope that falls back to `parent` for missing keys.
    pub fn with_parent(parent: ScopeRef) -> ScopeRef {
        Rc::new(Model {
            values: RefCell::default(),
            parent: Some(parent),
        })
    }

    pub fn from_pairs<K: Into<String>, V: Into<String>>(
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> ScopeRef {
        let values = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Rc::new(Model {
            values: RefCell::new(values),
            parent: None,
        })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        if let Some(value) = self.values.borrow().get(key) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|parent| parent.get(key))
    }

    pub fn set(&self, key: &str, value: impl Into<String>) -> DataChange {
        self.values.borrow_mut().insert(key.to_string(), value.into());
        DataChange {
            key: key.to_string(),
        }
    }
}

/// One entry of the change set passed to [`ViewNode::update`](crate::ViewNode::update).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataChange {
    pub key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_scope_falls_back_to_parent() {
        let parent = Model::from_pairs([("kind", "template")]);
        let child = Model::with_parent(parent.clone());
        assert_eq!(child.get("kind").as_deref(), Some("template"));
        child.set("kind", "fragment");
        assert_eq!(child.get("kind").as_deref(), Some("fragment"));
        assert_eq!(parent.get("kind").as_deref(), Some("template"));
        assert_eq!(child.get("missing"), None);
    }

    #[test]
    fn set_reports_changed_key() {
        let model = Model::new();
        assert_eq!(model.set("a", "1"), DataChange { key: "a".into() });
    }
}
