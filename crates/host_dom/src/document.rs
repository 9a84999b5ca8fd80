use crate::error::HostDomError;
use crate::mutation::DomMutation;
use crate::types::{HostNodeId, Node, NodeKind};

#[derive(Clone, Debug)]
pub struct HostDocumentConfig {
    /// Append every structural change to the mutation log.
    pub record_mutations: bool,
    /// Drop whitespace-only text nodes when a [`ReverseWalker`](crate::ReverseWalker)
    /// snapshots a parent's children.
    pub strip_whitespace_text: bool,
}

impl Default for HostDocumentConfig {
    fn default() -> Self {
        Self {
            record_mutations: false,
            strip_whitespace_text: true,
        }
    }
}

/// Arena-backed host document.
///
/// Nodes are never freed; `remove` only detaches a node from its parent, the
/// same way a browser keeps a removed node alive while something references it.
#[derive(Debug)]
pub struct HostDocument {
    config: HostDocumentConfig,
    nodes: Vec<NodeRecord>,
    root: HostNodeId,
    mutations: Vec<DomMutation>,
}

#[derive(Debug)]
struct NodeRecord {
    kind: NodeKind,
    parent: Option<HostNodeId>,
    children: Vec<HostNodeId>,
}

impl HostDocument {
    pub fn new(config: HostDocumentConfig) -> Self {
        let mut doc = Self {
            config,
            nodes: Vec::new(),
            root: HostNodeId::INVALID,
            mutations: Vec::new(),
        };
        doc.root = doc.push(NodeKind::Document);
        doc
    }

    pub fn config(&self) -> &HostDocumentConfig {
        &self.config
    }

    pub fn root(&self) -> HostNodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn create_element(&mut self, name: &str) -> HostNodeId {
        let key = self.push(NodeKind::Element {
            name: name.to_ascii_lowercase(),
            attributes: Vec::new(),
        });
        self.record(|| DomMutation::CreateElement {
            key,
            name: name.to_ascii_lowercase(),
        });
        key
    }

    pub fn create_text(&mut self, text: &str) -> HostNodeId {
        let key = self.push(NodeKind::Text {
            text: text.to_string(),
        });
        self.record(|| DomMutation::CreateText {
            key,
            text: text.to_string(),
        });
        key
    }

    pub fn create_comment(&mut self, label: &str) -> HostNodeId {
        let key = self.push(NodeKind::Comment {
            text: label.to_string(),
        });
        self.record(|| DomMutation::CreateComment {
            key,
            text: label.to_string(),
        });
        key
    }

    pub fn set_attribute(
        &mut self,
        key: HostNodeId,
        name: &str,
        value: &str,
    ) -> Result<(), HostDomError> {
        let record = self.record_mut(key)?;
        let NodeKind::Element { attributes, .. } = &mut record.kind else {
            return Err(HostDomError::WrongNodeKind(key));
        };
        match attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => {
                existing.clear();
                existing.push_str(value);
            }
            None => attributes.push((name.to_string(), value.to_string())),
        }
        self.record(|| DomMutation::SetAttribute {
            key,
            name: name.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    pub fn append_child(&mut self, parent: HostNodeId, child: HostNodeId) -> Result<(), HostDomError> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` into `parent` before `before`, or append when `before`
    /// is `None`. A child that already has a parent is moved.
    pub fn insert_before(
        &mut self,
        parent: HostNodeId,
        child: HostNodeId,
        before: Option<HostNodeId>,
    ) -> Result<(), HostDomError> {
        if parent == child || self.is_descendant(child, parent) {
            debug_assert!(false, "cannot create cycle");
            return Err(HostDomError::CycleDetected { parent, child });
        }
        if !self.record_ref(parent)?.kind.allows_children() {
            return Err(HostDomError::InvalidParent(parent));
        }
        self.record_ref(child)?;
        if let Some(before) = before {
            if self.record_ref(before)?.parent != Some(parent) {
                return Err(HostDomError::InvalidSibling { parent, before });
            }
        }

        self.detach(child)?;
        let siblings = &mut self.record_mut(parent)?.children;
        let pos = match before {
            Some(before) => siblings
                .iter()
                .position(|k| *k == before)
                .ok_or(HostDomError::InvalidSibling { parent, before })?,
            None => siblings.len(),
        };
        siblings.insert(pos, child);
        self.record_mut(child)?.parent = Some(parent);
        self.record(|| DomMutation::InsertBefore {
            parent,
            child,
            before,
        });
        Ok(())
    }

    /// Detach `key` from its parent. Detached nodes are left untouched.
    pub fn remove(&mut self, key: HostNodeId) -> Result<(), HostDomError> {
        if let Some(parent) = self.detach(key)? {
            self.record(|| DomMutation::Remove { key, parent });
        }
        Ok(())
    }

    pub fn parent(&self, key: HostNodeId) -> Option<HostNodeId> {
        self.record_ref(key).ok().and_then(|r| r.parent)
    }

    pub fn children(&self, key: HostNodeId) -> &[HostNodeId] {
        self.record_ref(key).map_or(&[], |r| r.children.as_slice())
    }

    pub fn next_sibling(&self, key: HostNodeId) -> Option<HostNodeId> {
        let parent = self.parent(key)?;
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|k| *k == key)?;
        siblings.get(pos + 1).copied()
    }

    pub fn kind(&self, key: HostNodeId) -> Result<&NodeKind, HostDomError> {
        Ok(&self.record_ref(key)?.kind)
    }

    pub fn is_comment(&self, key: HostNodeId) -> bool {
        matches!(self.kind(key), Ok(NodeKind::Comment { .. }))
    }

    pub fn element_name(&self, key: HostNodeId) -> Option<&str> {
        match self.kind(key) {
            Ok(NodeKind::Element { name, .. }) => Some(name),
            _ => None,
        }
    }

    pub fn comment_text(&self, key: HostNodeId) -> Option<&str> {
        match self.kind(key) {
            Ok(NodeKind::Comment { text }) => Some(text),
            _ => None,
        }
    }

    pub fn mutations(&self) -> &[DomMutation] {
        &self.mutations
    }

    pub fn take_mutations(&mut self) -> Vec<DomMutation> {
        std::mem::take(&mut self.mutations)
    }

    pub fn materialize(&self, key: HostNodeId) -> Result<Node, HostDomError> {
        let record = self.record_ref(key)?;
        let children = record
            .children
            .iter()
            .map(|child| self.materialize(*child))
            .collect::<Result<Vec<_>, _>>()?;
        let node = match &record.kind {
            NodeKind::Document => Node::Document { id: key, children },
            NodeKind::Element { name, attributes } => Node::Element {
                id: key,
                name: name.clone(),
                attributes: attributes.clone(),
                children,
            },
            NodeKind::Text { text } => Node::Text {
                id: key,
                text: text.clone(),
            },
            NodeKind::Comment { text } => Node::Comment {
                id: key,
                text: text.clone(),
            },
        };
        Ok(node)
    }

    fn push(&mut self, kind: NodeKind) -> HostNodeId {
        let key = HostNodeId::from_index(self.nodes.len());
        self.nodes.push(NodeRecord {
            kind,
            parent: None,
            children: Vec::new(),
        });
        key
    }

    fn detach(&mut self, key: HostNodeId) -> Result<Option<HostNodeId>, HostDomError> {
        let Some(parent) = self.record_mut(key)?.parent.take() else {
            return Ok(None);
        };
        self.record_mut(parent)?.children.retain(|k| *k != key);
        Ok(Some(parent))
    }

    fn is_descendant(&self, ancestor: HostNodeId, maybe_descendant: HostNodeId) -> bool {
        let Ok(record) = self.record_ref(ancestor) else {
            return false;
        };
        let mut stack = record.children.clone();
        while let Some(current) = stack.pop() {
            if current == maybe_descendant {
                return true;
            }
            stack.extend(self.children(current).iter().copied());
        }
        false
    }

    fn record(&mut self, mutation: impl FnOnce() -> DomMutation) {
        if self.config.record_mutations {
            let mutation = mutation();
            log::trace!(target: "host_dom", "mutation: {mutation:?}");
            self.mutations.push(mutation);
        }
    }

    fn record_ref(&self, key: HostNodeId) -> Result<&NodeRecord, HostDomError> {
        key.index()
            .and_then(|index| self.nodes.get(index))
            .ok_or(HostDomError::UnknownNode(key))
    }

    fn record_mut(&mut self, key: HostNodeId) -> Result<&mut NodeRecord, HostDomError> {
        key.index()
            .and_then(|index| self.nodes.get_mut(index))
            .ok_or(HostDomError::UnknownNode(key))
    }
}

impl Default for HostDocument {
    fn default() -> Self {
        Self::new(HostDocumentConfig::default())
    }
}
