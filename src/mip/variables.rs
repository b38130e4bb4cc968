//! MILP variable handles.

/// Index of a variable within its [`MipModel`](super::MipModel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub usize);

impl VarId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A boolean (0/1) decision variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoolVar {
    /// Variable name (unique within a model, used by backends and logs).
    pub name: String,
}

impl BoolVar {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
