use super::Graph;
use crate::algorithm::*;
use crate::backend::*;
use crate::config::Config;
use crate::sparse::CsrMatrix;
use crate::{Error, Result};
use std::fmt::Debug;
use std::hash::Hash;

/// A graph whose backend is chosen at runtime.
///
/// Both variants answer to root labels of type `L`.
pub enum AnyGraph<L>
where
    L: Clone + Eq + Ord + Hash + Debug,
{
    Labeled(Graph<LabeledGraph<L>, L>),
    Indexed(Graph<IndexedGraph<L>, L>),
}

macro_rules! dispatch {
    ($self:expr, $g:ident => $body:expr) => {
        match $self {
            AnyGraph::Labeled($g) => $body,
            AnyGraph::Indexed($g) => $body,
        }
    };
}

impl<L> AnyGraph<L>
where
    L: Clone + Eq + Ord + Hash + Debug,
{
    /// Wraps `backend` as a root graph, converting it first if `kind` asks for the
    /// compact-indexed backend.
    pub fn build(backend: LabeledGraph<L>, kind: BackendKind, config: &Config) -> Self {
        let g = Graph::new(backend);
        match kind {
            BackendKind::Labeled => AnyGraph::Labeled(g),
            BackendKind::Indexed => AnyGraph::Indexed(g.to_indexed(config)),
        }
    }

    pub fn kind(&self) -> BackendKind {
        dispatch!(self, g => g.kind())
    }

    pub fn as_labeled(&self) -> Result<&Graph<LabeledGraph<L>, L>> {
        match self {
            AnyGraph::Labeled(g) => Ok(g),
            AnyGraph::Indexed(_) => Err(self.mismatch(BackendKind::Labeled)),
        }
    }

    pub fn as_indexed(&self) -> Result<&Graph<IndexedGraph<L>, L>> {
        match self {
            AnyGraph::Indexed(g) => Ok(g),
            AnyGraph::Labeled(_) => Err(self.mismatch(BackendKind::Indexed)),
        }
    }

    /// The stable engine behind a label-addressed graph.
    pub fn labeled_engine(&self) -> Result<&petgraph::stable_graph::StableUnGraph<Attributes, Attributes>> {
        Ok(self.as_labeled()?.backend().engine())
    }

    /// The compact engine behind a compact-indexed graph.
    pub fn indexed_engine(&self) -> Result<&petgraph::graph::UnGraph<Attributes, Attributes>> {
        Ok(self.as_indexed()?.backend().engine())
    }

    pub fn node_count(&self) -> usize {
        dispatch!(self, g => g.node_count())
    }

    pub fn edge_count(&self) -> usize {
        dispatch!(self, g => g.edge_count())
    }

    pub fn is_directed(&self) -> bool {
        false
    }

    pub fn num_connected_components(&self) -> usize {
        dispatch!(self, g => g.num_connected_components())
    }

    pub fn is_a_tree(&self) -> bool {
        dispatch!(self, g => g.is_a_tree())
    }

    pub fn laplacian_matrix(&self) -> Result<CsrMatrix> {
        dispatch!(self, g => g.laplacian_matrix())
    }

    pub fn normalized_laplacian_matrix(&self) -> Result<CsrMatrix> {
        dispatch!(self, g => g.normalized_laplacian_matrix())
    }

    /// Root labels of nodes in the row order of the Laplacians.
    pub fn root_labels_in_order(&self) -> Result<Vec<L>> {
        dispatch!(self, g => g.root_labels_in_order())
    }

    /// Root labels of the nodes in every connected component.
    pub fn component_labels(&self) -> Result<Vec<Vec<L>>> {
        match self {
            AnyGraph::Labeled(g) => Ok(g.backend().component_node_sets()),
            AnyGraph::Indexed(g) => g
                .backend()
                .component_node_sets()
                .into_iter()
                .map(|nodes| g.root_labels(&nodes))
                .collect(),
        }
    }

    /// Converts to the label-addressed backend, e.g., before serialization.
    pub fn into_labeled(self) -> Result<Graph<LabeledGraph<L>, L>> {
        match self {
            AnyGraph::Labeled(g) => Ok(g),
            AnyGraph::Indexed(g) => {
                let labeled = g.to_labeled()?.into_backend();
                Ok(Graph::new(labeled))
            }
        }
    }

    fn mismatch(&self, expected: BackendKind) -> Error {
        Error::BackendMismatch {
            expected,
            actual: self.kind(),
        }
    }
}

impl<L> From<Graph<LabeledGraph<L>, L>> for AnyGraph<L>
where
    L: Clone + Eq + Ord + Hash + Debug,
{
    fn from(g: Graph<LabeledGraph<L>, L>) -> Self {
        AnyGraph::Labeled(g)
    }
}

impl<L> From<Graph<IndexedGraph<L>, L>> for AnyGraph<L>
where
    L: Clone + Eq + Ord + Hash + Debug,
{
    fn from(g: Graph<IndexedGraph<L>, L>) -> Self {
        AnyGraph::Indexed(g)
    }
}

impl<L> Debug for AnyGraph<L>
where
    L: Clone + Eq + Ord + Hash + Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        dispatch!(self, g => write!(f, "{:?}", g))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NodeOrder;
    use quickcheck_macros::quickcheck;

    fn star() -> LabeledGraph<u32> {
        let mut g = LabeledGraph::new();
        for x in [7, 3, 5, 1] {
            g.add_node(x, Attributes::new());
        }
        for x in [3, 5, 1] {
            g.add_edge(&7, &x, Attributes::new()).unwrap();
        }
        g
    }

    #[test]
    fn typed_handles() {
        let labeled = AnyGraph::build(star(), BackendKind::Labeled, &Config::default());
        let indexed = AnyGraph::build(star(), BackendKind::Indexed, &Config::default());
        assert_eq!(labeled.kind(), BackendKind::Labeled);
        assert!(labeled.as_labeled().is_ok());
        assert!(labeled.labeled_engine().is_ok());
        assert!(matches!(
            labeled.as_indexed(),
            Err(Error::BackendMismatch {
                expected: BackendKind::Indexed,
                actual: BackendKind::Labeled,
            })
        ));
        assert!(matches!(
            indexed.labeled_engine(),
            Err(Error::BackendMismatch {
                expected: BackendKind::Labeled,
                actual: BackendKind::Indexed,
            })
        ));
        assert_eq!(indexed.indexed_engine().unwrap().node_count(), 4);
    }

    #[test]
    fn both_variants_answer_alike() {
        let config = Config::new().node_order(NodeOrder::Sorted);
        let graphs = [
            AnyGraph::build(star(), BackendKind::Labeled, &config),
            AnyGraph::build(star(), BackendKind::Indexed, &config),
        ];
        for g in graphs.iter() {
            assert_eq!(g.node_count(), 4);
            assert_eq!(g.edge_count(), 3);
            assert!(!g.is_directed());
            assert!(g.is_a_tree());
            assert_eq!(g.num_connected_components(), 1);
            assert_eq!(g.laplacian_matrix().unwrap().row_sums(), vec![0.0; 4]);
        }
        assert_eq!(graphs[0].root_labels_in_order().unwrap(), vec![7, 3, 5, 1]);
        assert_eq!(graphs[1].root_labels_in_order().unwrap(), vec![1, 3, 5, 7]);
    }

    #[test]
    fn back_to_labeled() {
        let g = AnyGraph::build(star(), BackendKind::Indexed, &Config::default());
        let labeled = g.into_labeled().unwrap();
        assert!(labeled.provenance().is_none());
        assert_eq!(labeled.node_ids().collect::<Vec<_>>(), vec![7, 3, 5, 1]);
        assert!(labeled.contains_edge(&(7, 1)));
    }

    #[quickcheck]
    fn component_labels_agree(g: RandomGraph) {
        let labeled = AnyGraph::build(g.to_labeled(), BackendKind::Labeled, &Config::default());
        let indexed = AnyGraph::build(g.to_labeled(), BackendKind::Indexed, &Config::default());
        assert_eq!(
            labeled.component_labels().unwrap(),
            indexed.component_labels().unwrap()
        );
    }
}
