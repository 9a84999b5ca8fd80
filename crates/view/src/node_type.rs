/// Discriminant tag exposed by every view node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeType {
    Elem,
    Cmpt,
    /// Placeholder for a component whose class is still loading.
    Loader,
    Tpl,
    Is,
    /// Nodes produced by user supplied [`NodeClass`](crate::NodeClass)es.
    Custom,
}
