use crate::backend::*;
use crate::{Error, Result};
use ahash::RandomState;
use bimap::BiHashMap;
use petgraph::{
    algo::kosaraju_scc,
    graph::{EdgeIndex, NodeIndex},
    stable_graph::StableUnGraph,
};
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

/// A label-addressed undirected graph.
///
/// Nodes are identified by caller-chosen labels.
/// An edge is identified by its pair of endpoint labels, ordered by the canonical order
/// of nodes; lookups accept either orientation.
///
/// The canonical order of nodes is the slot order of the underlying stable graph.
/// It is the insertion order as long as no node has been removed;
/// slots freed by removal are reused by later insertions.
#[derive(Clone)]
pub struct LabeledGraph<L>
where
    L: Hash + Eq,
{
    graph: StableUnGraph<Attributes, Attributes>,
    labels: BiHashMap<NodeIndex, L, RandomState, RandomState>,
}

impl<L> Default for LabeledGraph<L>
where
    L: Clone + Eq + Ord + Hash + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<L> LabeledGraph<L>
where
    L: Clone + Eq + Ord + Hash + Debug,
{
    pub fn new() -> Self {
        Self {
            graph: StableUnGraph::with_capacity(0, 0),
            labels: BiHashMap::with_hashers(RandomState::new(), RandomState::new()),
        }
    }

    /// Adds a node if it does not exist, otherwise replaces its attributes.
    ///
    /// Returns whether the node is new.
    pub fn add_node(&mut self, label: L, attrs: Attributes) -> bool {
        if let Some(idx) = self.labels.get_by_right(&label) {
            if let Some(data) = self.graph.node_weight_mut(*idx) {
                *data = attrs;
            }
            false
        } else {
            let idx = self.graph.add_node(attrs);
            self.labels.insert(idx, label);
            true
        }
    }

    /// Adds an edge if it does not exist, otherwise replaces its attributes.
    pub fn add_edge(&mut self, u: &L, v: &L, attrs: Attributes) -> Result<(L, L)> {
        let a = self.index_of(u)?;
        let b = self.index_of(v)?;
        if a == b {
            return Err(Error::unsupported(format!("self loop at {:?}", u)));
        }
        match self.graph.find_edge(a, b) {
            Some(e) => {
                if let Some(data) = self.graph.edge_weight_mut(e) {
                    *data = attrs;
                }
            }
            None => {
                self.graph.add_edge(a, b, attrs);
            }
        }
        Ok(self.ordered_pair(a, b, u, v))
    }

    /// Removes a node, together with edges connecting with it, and returns its attributes.
    pub fn remove_node(&mut self, label: &L) -> Result<Attributes> {
        let (idx, _) = self
            .labels
            .remove_by_right(label)
            .ok_or_else(|| Error::node_not_found(label))?;
        self.graph
            .remove_node(idx)
            .ok_or_else(|| Error::node_not_found(label))
    }

    /// Removes an edge and returns its attributes.
    pub fn remove_edge(&mut self, u: &L, v: &L) -> Result<Attributes> {
        let e = self.find(u, v).ok_or_else(|| Error::no_such_edge(u, v))?;
        self.graph
            .remove_edge(e)
            .ok_or_else(|| Error::no_such_edge(u, v))
    }

    /// The underlying engine.
    ///
    /// Structural mutation is only possible before a graph is wrapped.
    pub fn engine(&self) -> &StableUnGraph<Attributes, Attributes> {
        &self.graph
    }

    fn index_of(&self, label: &L) -> Result<NodeIndex> {
        self.labels
            .get_by_right(label)
            .copied()
            .ok_or_else(|| Error::node_not_found(label))
    }

    fn label_at(&self, idx: NodeIndex) -> Option<&L> {
        self.labels.get_by_left(&idx)
    }

    fn find(&self, u: &L, v: &L) -> Option<EdgeIndex> {
        let a = self.labels.get_by_right(u)?;
        let b = self.labels.get_by_right(v)?;
        self.graph.find_edge(*a, *b)
    }

    fn ordered_pair(&self, a: NodeIndex, b: NodeIndex, u: &L, v: &L) -> (L, L) {
        if a <= b {
            (u.clone(), v.clone())
        } else {
            (v.clone(), u.clone())
        }
    }

    fn endpoints_at(&self, e: EdgeIndex) -> Option<(L, L)> {
        let (a, b) = self.graph.edge_endpoints(e)?;
        let (a, b) = if a <= b { (a, b) } else { (b, a) };
        Some((self.label_at(a)?.clone(), self.label_at(b)?.clone()))
    }

    /// Copies an edge of a simple graph whose endpoints are both already in `self`.
    /// Copying the same edge twice keeps the first copy.
    fn copy_edge(&mut self, u: &L, v: &L, attrs: Attributes) {
        let a = self.labels.get_by_right(u).copied();
        let b = self.labels.get_by_right(v).copied();
        debug_assert!(a.is_some() && b.is_some() && a != b);
        if let (Some(a), Some(b)) = (a, b) {
            if self.graph.find_edge(a, b).is_none() {
                self.graph.add_edge(a, b, attrs);
            }
        }
    }
}

impl<L> Backend for LabeledGraph<L>
where
    L: Clone + Eq + Ord + Hash + Debug,
{
    type NodeId = L;
    type EdgeId = (L, L);
    type Label = L;

    const KIND: BackendKind = BackendKind::Labeled;

    fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    fn node_ids(&self) -> Box<dyn Iterator<Item = L> + '_> {
        let it = self
            .graph
            .node_indices()
            .filter_map(|idx| self.label_at(idx).cloned());
        Box::new(it)
    }

    fn contains_node(&self, n: &L) -> bool {
        self.labels.contains_right(n)
    }

    fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn edge_ids(&self) -> Box<dyn Iterator<Item = (L, L)> + '_> {
        let it = self
            .graph
            .edge_indices()
            .filter_map(|e| self.endpoints_at(e));
        Box::new(it)
    }

    fn contains_edge(&self, e: &(L, L)) -> bool {
        self.find(&e.0, &e.1).is_some()
    }

    fn edges(&self) -> Box<dyn Iterator<Item = EdgeView<'_, Self>> + '_> {
        let it = self.graph.edge_indices().filter_map(|e| {
            let (u, v) = self.endpoints_at(e)?;
            let data = self.graph.edge_weight(e)?;
            Some(EdgeView {
                id: (u.clone(), v.clone()),
                u,
                v,
                data,
            })
        });
        Box::new(it)
    }

    fn node_data(&self, n: &L) -> Result<&Attributes> {
        let idx = self.index_of(n)?;
        self.graph
            .node_weight(idx)
            .ok_or_else(|| Error::node_not_found(n))
    }

    fn node_data_mut(&mut self, n: &L) -> Result<&mut Attributes> {
        let idx = self.index_of(n)?;
        self.graph
            .node_weight_mut(idx)
            .ok_or_else(|| Error::node_not_found(n))
    }

    fn edge_data(&self, e: &(L, L)) -> Result<&Attributes> {
        let eidx = self
            .find(&e.0, &e.1)
            .ok_or_else(|| Error::edge_not_found(e))?;
        self.graph
            .edge_weight(eidx)
            .ok_or_else(|| Error::edge_not_found(e))
    }

    fn edge_data_mut(&mut self, e: &(L, L)) -> Result<&mut Attributes> {
        let eidx = self
            .find(&e.0, &e.1)
            .ok_or_else(|| Error::edge_not_found(e))?;
        self.graph
            .edge_weight_mut(eidx)
            .ok_or_else(|| Error::edge_not_found(e))
    }

    fn neighbors(&self, n: &L) -> Result<Box<dyn Iterator<Item = L> + '_>> {
        let idx = self.index_of(n)?;
        let mut adjacent: Vec<NodeIndex> = self.graph.neighbors(idx).collect();
        adjacent.sort();
        adjacent.dedup();
        let it = adjacent
            .into_iter()
            .filter_map(move |x| self.label_at(x).cloned());
        Ok(Box::new(it))
    }

    fn edge_id_for(&self, u: &L, v: &L) -> Result<(L, L)> {
        let a = self.index_of(u)?;
        let b = self.index_of(v)?;
        match self.graph.find_edge(a, b) {
            Some(_) => Ok(self.ordered_pair(a, b, u, v)),
            None => Err(Error::no_such_edge(u, v)),
        }
    }

    fn endpoints_for(&self, e: &(L, L)) -> Result<(L, L)> {
        let eidx = self
            .find(&e.0, &e.1)
            .ok_or_else(|| Error::edge_not_found(e))?;
        self.endpoints_at(eidx)
            .ok_or_else(|| Error::edge_not_found(e))
    }

    fn self_label(&self, n: &L) -> Option<L> {
        Some(n.clone())
    }

    fn induced_subgraph(&self, nodes: &[L]) -> (Self, Vec<L>) {
        let mut res = Self::new();
        let mut selected = HashSet::with_capacity_and_hasher(nodes.len(), RandomState::new());
        for label in nodes.iter() {
            if let Ok(idx) = self.index_of(label) {
                selected.insert(idx);
                let data = self.graph.node_weight(idx).cloned().unwrap_or_default();
                res.add_node(label.clone(), data);
            }
        }
        for e in self.graph.edge_indices() {
            if let Some((a, b)) = self.graph.edge_endpoints(e) {
                if !selected.contains(&a) || !selected.contains(&b) {
                    continue;
                }
                if let (Some(u), Some(v), Some(data)) =
                    (self.label_at(a), self.label_at(b), self.graph.edge_weight(e))
                {
                    res.copy_edge(u, v, data.clone());
                }
            }
        }
        (res, nodes.to_vec())
    }

    fn spanning_subgraph(&self, edges: &[(L, L)]) -> Self {
        let mut res = Self::new();
        for idx in self.graph.node_indices() {
            if let (Some(label), Some(data)) = (self.label_at(idx), self.graph.node_weight(idx)) {
                res.add_node(label.clone(), data.clone());
            }
        }
        for (u, v) in edges.iter() {
            if let Ok(data) = self.edge_data(&(u.clone(), v.clone())) {
                res.copy_edge(u, v, data.clone());
            }
        }
        res
    }

    fn component_count(&self) -> usize {
        kosaraju_scc(&self.graph).len()
    }
}
