use super::Provenance;
use crate::algorithm::*;
use crate::backend::*;
use crate::sparse::CsrMatrix;
use crate::{Error, Result};
use ahash::RandomState;
use std::collections::{BTreeSet, HashMap};

/// An undirected simple graph over one of the two backends.
///
/// * `B`: the backend, fixed for the lifetime of the graph.
/// * `P`: node IDs of the parent this graph was derived from.
///
/// A graph wrapped directly from a backend has no provenance.
/// Graphs derived by subgraph extraction or conversion record, for each node,
/// its ID in the parent and its label in the label-addressed root.
///
/// Structural mutation is only available on backends before wrapping,
/// which keeps provenance in step with the node set.
pub struct Graph<B, P>
where
    B: Backend,
{
    pub(crate) backend: B,
    pub(crate) provenance: Option<Provenance<B::NodeId, P, B::Label>>,
}

impl<B> Graph<B, B::NodeId>
where
    B: Backend,
{
    /// Wraps a backend as a root graph.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            provenance: None,
        }
    }
}

impl<B, P> Graph<B, P>
where
    B: Backend,
{
    pub fn kind(&self) -> BackendKind {
        B::KIND
    }

    /// The backend, for backend-specific capabilities.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    pub fn provenance(&self) -> Option<&Provenance<B::NodeId, P, B::Label>> {
        self.provenance.as_ref()
    }

    pub fn node_count(&self) -> usize {
        self.backend.node_count()
    }

    pub fn node_ids(&self) -> Box<dyn Iterator<Item = B::NodeId> + '_> {
        self.backend.node_ids()
    }

    pub fn contains_node(&self, n: &B::NodeId) -> bool {
        self.backend.contains_node(n)
    }

    pub fn edge_count(&self) -> usize {
        self.backend.edge_count()
    }

    pub fn edge_ids(&self) -> Box<dyn Iterator<Item = B::EdgeId> + '_> {
        self.backend.edge_ids()
    }

    pub fn contains_edge(&self, e: &B::EdgeId) -> bool {
        self.backend.contains_edge(e)
    }

    pub fn node_data(&self, n: &B::NodeId) -> Result<&Attributes> {
        self.backend.node_data(n)
    }

    pub fn node_data_mut(&mut self, n: &B::NodeId) -> Result<&mut Attributes> {
        self.backend.node_data_mut(n)
    }

    pub fn edge_data(&self, e: &B::EdgeId) -> Result<&Attributes> {
        self.backend.edge_data(e)
    }

    pub fn edge_data_mut(&mut self, e: &B::EdgeId) -> Result<&mut Attributes> {
        self.backend.edge_data_mut(e)
    }

    pub fn neighbors(&self, n: &B::NodeId) -> Result<Box<dyn Iterator<Item = B::NodeId> + '_>> {
        self.backend.neighbors(n)
    }

    pub fn degree(&self, n: &B::NodeId) -> Result<usize> {
        self.backend.degree(n)
    }

    pub fn is_directed(&self) -> bool {
        self.backend.is_directed()
    }

    pub fn edge_id_for(&self, u: &B::NodeId, v: &B::NodeId) -> Result<B::EdgeId> {
        self.backend.edge_id_for(u, v)
    }

    pub fn endpoints_for(&self, e: &B::EdgeId) -> Result<(B::NodeId, B::NodeId)> {
        self.backend.endpoints_for(e)
    }

    pub fn bfs_edges(&self, root: &B::NodeId) -> Result<BfsEdges<'_, B>> {
        self.backend.bfs_edges(root)
    }

    pub fn bfs_successors(
        &self,
        root: &B::NodeId,
    ) -> Result<HashMap<B::NodeId, Vec<B::NodeId>, RandomState>> {
        self.backend.bfs_successors(root)
    }

    pub fn bfs_predecessors(
        &self,
        root: &B::NodeId,
    ) -> Result<HashMap<B::NodeId, B::NodeId, RandomState>> {
        self.backend.bfs_predecessors(root)
    }

    pub fn laplacian_matrix(&self) -> Result<CsrMatrix> {
        self.backend.laplacian_matrix()
    }

    pub fn normalized_laplacian_matrix(&self) -> Result<CsrMatrix> {
        self.backend.normalized_laplacian_matrix()
    }

    pub fn num_connected_components(&self) -> usize {
        self.backend.num_connected_components()
    }

    pub fn is_a_tree(&self) -> bool {
        self.backend.is_a_tree()
    }

    pub fn islands(&self) -> BTreeSet<B::NodeId> {
        self.backend.islands()
    }

    /// Root label of every node in canonical order,
    /// e.g., to align matrices of graphs over different backends.
    ///
    /// A label-addressed root answers with its own labels.
    pub fn root_labels_in_order(&self) -> Result<Vec<B::Label>> {
        self.node_ids()
            .map(|n| self.root_label_or_own(&n).ok_or(Error::NoProvenance))
            .collect()
    }

    pub(crate) fn root_label_or_own(&self, n: &B::NodeId) -> Option<B::Label> {
        match &self.provenance {
            Some(p) => p.root_label_of(n).cloned(),
            None => self.backend.self_label(n),
        }
    }

    fn recorded(&self) -> Result<&Provenance<B::NodeId, P, B::Label>> {
        self.provenance.as_ref().ok_or(Error::NoProvenance)
    }

    fn recorded_root(&self) -> Result<&Provenance<B::NodeId, P, B::Label>> {
        self.recorded()
            .ok()
            .filter(|p| p.has_root_labels())
            .ok_or(Error::NoProvenance)
    }
}

/// Translation of node IDs to ancestors.
///
/// Every method fails with `NoProvenance` on graphs without recorded ancestry and
/// with `NotFound` on IDs absent from this graph. Bulk methods either translate
/// every ID or fail as a whole.
impl<B, P> Graph<B, P>
where
    B: Backend,
    P: Clone,
{
    /// ID of a node in the immediate parent.
    pub fn parent_id(&self, n: &B::NodeId) -> Result<P> {
        self.recorded()?
            .parent_of(n)
            .cloned()
            .ok_or_else(|| Error::node_not_found(n))
    }

    /// IDs in the immediate parent, collected into any collection.
    pub fn parent_ids<'a, I, C>(&self, ids: I) -> Result<C>
    where
        I: IntoIterator<Item = &'a B::NodeId>,
        B::NodeId: 'a,
        C: FromIterator<P>,
    {
        ids.into_iter().map(|n| self.parent_id(n)).collect()
    }

    /// Re-keys a partition, i.e., a mapping from nodes to classes, by parent IDs.
    pub fn partition_to_parent<'a, I, V, C>(&self, partition: I) -> Result<C>
    where
        I: IntoIterator<Item = (&'a B::NodeId, &'a V)>,
        B::NodeId: 'a,
        V: Clone + 'a,
        C: FromIterator<(P, V)>,
    {
        partition
            .into_iter()
            .map(|(n, class)| Ok((self.parent_id(n)?, class.clone())))
            .collect()
    }

    /// Label of a node in the label-addressed root, in one lookup whatever the depth.
    pub fn root_label(&self, n: &B::NodeId) -> Result<B::Label> {
        self.recorded_root()?
            .root_label_of(n)
            .cloned()
            .ok_or_else(|| Error::node_not_found(n))
    }

    pub fn root_labels<'a, I, C>(&self, ids: I) -> Result<C>
    where
        I: IntoIterator<Item = &'a B::NodeId>,
        B::NodeId: 'a,
        C: FromIterator<B::Label>,
    {
        ids.into_iter().map(|n| self.root_label(n)).collect()
    }

    pub fn partition_to_root<'a, I, V, C>(&self, partition: I) -> Result<C>
    where
        I: IntoIterator<Item = (&'a B::NodeId, &'a V)>,
        B::NodeId: 'a,
        V: Clone + 'a,
        C: FromIterator<(B::Label, V)>,
    {
        partition
            .into_iter()
            .map(|(n, class)| Ok((self.root_label(n)?, class.clone())))
            .collect()
    }

    /// The node of this graph which stands for `label` of the root.
    pub fn local_id_for_root_label(&self, label: &B::Label) -> Result<B::NodeId> {
        self.recorded_root()?
            .local_of_root_label(label)
            .cloned()
            .ok_or_else(|| Error::node_not_found(label))
    }
}

impl<B, P> Clone for Graph<B, P>
where
    B: Backend + Clone,
    P: Clone,
{
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            provenance: self.provenance.clone(),
        }
    }
}

impl<B, P> std::fmt::Debug for Graph<B, P>
where
    B: Backend,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} graph {{", B::KIND)?;
        write!(f, "{:?}", super::GraphDebug::new(&self.backend).indent(2, 2))?;
        writeln!(f, "}}")
    }
}
