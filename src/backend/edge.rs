use petgraph::graph::EdgeIndex;

/// Dense ID of an edge in a compact-indexed graph.
///
/// It is a number of its own, unrelated to the IDs of its endpoints.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub usize);

impl EdgeId {
    pub fn new(x: usize) -> Self {
        Self(x)
    }

    pub fn to_raw(&self) -> usize {
        self.0
    }

    pub(crate) fn to_index(self) -> EdgeIndex {
        EdgeIndex::new(self.0)
    }
}

impl From<EdgeIndex> for EdgeId {
    fn from(x: EdgeIndex) -> Self {
        Self(x.index())
    }
}

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "e{}", self.0)
    }
}
