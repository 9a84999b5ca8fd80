/// Lifecycle state shared by every view node variant.
///
/// `Start -> Attached -> Disposed`; `Disposed` is terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LifeCycle {
    /// Constructed, not bound to host content yet.
    #[default]
    Start,
    /// Bound to freshly created or hydrated host content.
    Attached,
    Disposed,
}

impl LifeCycle {
    pub fn is_attached(self) -> bool {
        self == LifeCycle::Attached
    }

    pub fn is_disposed(self) -> bool {
        self == LifeCycle::Disposed
    }
}
