//! Knobs for conversions and imports.

/// Order in which nodes get their dense IDs when a label-addressed graph is
/// converted into a compact-indexed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeOrder {
    /// Canonical enumeration order of the source, i.e., insertion order
    /// as long as no node was removed.
    #[default]
    Insertion,
    /// Ascending order of labels.
    Sorted,
}

/// What to do with directed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DirectedPolicy {
    /// Fail with `UnsupportedGraphKind`.
    #[default]
    Reject,
    /// Forget directions and merge antiparallel edges.
    /// Attributes of the first edge seen win; the others are lost.
    DownConvert,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub node_order: NodeOrder,
    pub directed: DirectedPolicy,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_order(mut self, order: NodeOrder) -> Self {
        self.node_order = order;
        self
    }

    pub fn directed(mut self, policy: DirectedPolicy) -> Self {
        self.directed = policy;
        self
    }
}
