use petgraph::graph::NodeIndex;

/// Dense ID of a node in a compact-indexed graph, essentially `usize`.
///
/// IDs of a graph with `n` nodes are always exactly `0..n`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct VertexId(pub usize);

impl VertexId {
    pub fn new(x: usize) -> Self {
        Self(x)
    }

    pub fn to_raw(&self) -> usize {
        self.0
    }

    pub(crate) fn to_index(self) -> NodeIndex {
        NodeIndex::new(self.0)
    }
}

impl From<NodeIndex> for VertexId {
    fn from(x: NodeIndex) -> Self {
        Self(x.index())
    }
}

impl std::fmt::Display for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}
