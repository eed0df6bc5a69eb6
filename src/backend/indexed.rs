use crate::backend::*;
use crate::{config::*, Error, Result};
use ahash::RandomState;
use petgraph::{
    algo::connected_components,
    graph::{NodeIndex, UnGraph},
    visit::EdgeRef,
    EdgeType,
};
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;
use tracing::warn;

/// A compact-indexed undirected graph.
///
/// Nodes of a graph with `n` nodes are `VertexId(0)..VertexId(n)`;
/// edges are numbered the same way, independently of their endpoints.
/// Nodes cannot be removed, so IDs stay dense.
///
/// * `L`: labels of the label-addressed graph this one descends from, if any.
///   It only matters to provenance.
#[derive(Clone)]
pub struct IndexedGraph<L = VertexId> {
    graph: UnGraph<Attributes, Attributes>,
    _label: PhantomData<fn() -> L>,
}

impl<L> Default for IndexedGraph<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L> IndexedGraph<L> {
    pub fn new() -> Self {
        Self {
            graph: UnGraph::with_capacity(0, 0),
            _label: PhantomData,
        }
    }

    pub fn add_node(&mut self, attrs: Attributes) -> VertexId {
        self.graph.add_node(attrs).into()
    }

    /// Adds an edge. Self loops and edges parallel to existent ones are rejected.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId, attrs: Attributes) -> Result<EdgeId> {
        for x in [u, v] {
            if x.to_raw() >= self.graph.node_count() {
                return Err(Error::node_not_found(&x));
            }
        }
        if u == v {
            return Err(Error::unsupported(format!("self loop at {:?}", u)));
        }
        if self.graph.find_edge(u.to_index(), v.to_index()).is_some() {
            return Err(Error::unsupported(format!(
                "multi-edge between {:?} and {:?}",
                u, v
            )));
        }
        Ok(self.graph.add_edge(u.to_index(), v.to_index(), attrs).into())
    }

    /// Imports a petgraph graph, keeping its node and edge indices.
    ///
    /// Directed graphs are rejected unless `config.directed` asks for down-conversion,
    /// in which case antiparallel edges are merged and the attributes of the first one win.
    /// Multi-edges and self loops are always rejected.
    pub fn from_petgraph<Ty>(
        graph: petgraph::Graph<Attributes, Attributes, Ty>,
        config: &Config,
    ) -> Result<Self>
    where
        Ty: EdgeType,
    {
        let directed = Ty::is_directed();
        if directed && config.directed == DirectedPolicy::Reject {
            return Err(Error::unsupported("directed graph"));
        }
        let (nodes, edges) = graph.into_nodes_edges();
        let mut res = Self::new();
        for n in nodes.into_iter() {
            res.graph.add_node(n.weight);
        }
        let mut seen: HashSet<(NodeIndex, NodeIndex), RandomState> =
            HashSet::with_capacity_and_hasher(edges.len(), RandomState::new());
        let mut merged = 0usize;
        for e in edges.into_iter() {
            let (a, b) = (e.source(), e.target());
            if a == b {
                return Err(Error::unsupported(format!(
                    "self loop at {:?}",
                    VertexId::from(a)
                )));
            }
            let key = if directed { (a, b) } else { (a.min(b), a.max(b)) };
            if !seen.insert(key) {
                return Err(Error::unsupported(format!(
                    "multi-edge between {:?} and {:?}",
                    VertexId::from(a),
                    VertexId::from(b)
                )));
            }
            if res.graph.find_edge(a, b).is_some() {
                merged += 1;
                continue;
            }
            res.graph.add_edge(a, b, e.weight);
        }
        if directed {
            warn!(
                nodes = res.graph.node_count(),
                edges = res.graph.edge_count(),
                merged,
                "indexed.from_petgraph.down_convert"
            );
        }
        Ok(res)
    }

    /// Copies an edge of a simple graph whose endpoints are both already in `self`.
    /// Copying the same edge twice keeps the first copy.
    pub(crate) fn copy_edge(&mut self, u: VertexId, v: VertexId, attrs: Attributes) {
        let n = self.graph.node_count();
        debug_assert!(u.to_raw() < n && v.to_raw() < n && u != v);
        if u.to_raw() < n && v.to_raw() < n && self.graph.find_edge(u.to_index(), v.to_index()).is_none() {
            self.graph.add_edge(u.to_index(), v.to_index(), attrs);
        }
    }

    /// The underlying engine.
    pub fn engine(&self) -> &UnGraph<Attributes, Attributes> {
        &self.graph
    }

    fn check_node(&self, n: &VertexId) -> Result<NodeIndex> {
        if n.to_raw() < self.graph.node_count() {
            Ok(n.to_index())
        } else {
            Err(Error::node_not_found(n))
        }
    }
}

impl<L> Backend for IndexedGraph<L>
where
    L: Clone + Eq + Ord + Hash + Debug,
{
    type NodeId = VertexId;
    type EdgeId = EdgeId;
    type Label = L;

    const KIND: BackendKind = BackendKind::Indexed;

    fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    fn node_ids(&self) -> Box<dyn Iterator<Item = VertexId> + '_> {
        Box::new((0..self.graph.node_count()).map(VertexId::new))
    }

    fn contains_node(&self, n: &VertexId) -> bool {
        n.to_raw() < self.graph.node_count()
    }

    fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn edge_ids(&self) -> Box<dyn Iterator<Item = EdgeId> + '_> {
        Box::new(self.graph.edge_indices().map(EdgeId::from))
    }

    fn contains_edge(&self, e: &EdgeId) -> bool {
        e.to_raw() < self.graph.edge_count()
    }

    fn edges(&self) -> Box<dyn Iterator<Item = EdgeView<'_, Self>> + '_> {
        let it = self.graph.edge_references().map(|e| {
            let (a, b) = (e.source(), e.target());
            EdgeView {
                id: e.id().into(),
                u: a.min(b).into(),
                v: a.max(b).into(),
                data: e.weight(),
            }
        });
        Box::new(it)
    }

    fn node_data(&self, n: &VertexId) -> Result<&Attributes> {
        self.graph
            .node_weight(n.to_index())
            .ok_or_else(|| Error::node_not_found(n))
    }

    fn node_data_mut(&mut self, n: &VertexId) -> Result<&mut Attributes> {
        self.graph
            .node_weight_mut(n.to_index())
            .ok_or_else(|| Error::node_not_found(n))
    }

    fn edge_data(&self, e: &EdgeId) -> Result<&Attributes> {
        self.graph
            .edge_weight(e.to_index())
            .ok_or_else(|| Error::edge_not_found(e))
    }

    fn edge_data_mut(&mut self, e: &EdgeId) -> Result<&mut Attributes> {
        self.graph
            .edge_weight_mut(e.to_index())
            .ok_or_else(|| Error::edge_not_found(e))
    }

    fn neighbors(&self, n: &VertexId) -> Result<Box<dyn Iterator<Item = VertexId> + '_>> {
        let idx = self.check_node(n)?;
        let mut adjacent: Vec<NodeIndex> = self.graph.neighbors(idx).collect();
        adjacent.sort();
        adjacent.dedup();
        Ok(Box::new(adjacent.into_iter().map(VertexId::from)))
    }

    fn edge_id_for(&self, u: &VertexId, v: &VertexId) -> Result<EdgeId> {
        let a = self.check_node(u)?;
        let b = self.check_node(v)?;
        self.graph
            .find_edge(a, b)
            .map(EdgeId::from)
            .ok_or_else(|| Error::no_such_edge(u, v))
    }

    fn endpoints_for(&self, e: &EdgeId) -> Result<(VertexId, VertexId)> {
        let (a, b) = self
            .graph
            .edge_endpoints(e.to_index())
            .ok_or_else(|| Error::edge_not_found(e))?;
        Ok((a.min(b).into(), a.max(b).into()))
    }

    fn self_label(&self, _: &VertexId) -> Option<L> {
        None
    }

    fn induced_subgraph(&self, nodes: &[VertexId]) -> (Self, Vec<VertexId>) {
        let mut res = Self::new();
        let mut renumber: Vec<Option<NodeIndex>> = vec![None; self.graph.node_count()];
        let mut ids = Vec::with_capacity(nodes.len());
        for n in nodes.iter() {
            if let Some(data) = self.graph.node_weight(n.to_index()) {
                let new_idx = res.graph.add_node(data.clone());
                renumber[n.to_raw()] = Some(new_idx);
                ids.push(new_idx.into());
            }
        }
        for e in self.graph.edge_references() {
            if let (Some(a), Some(b)) = (
                renumber[e.source().index()],
                renumber[e.target().index()],
            ) {
                res.graph.add_edge(a, b, e.weight().clone());
            }
        }
        (res, ids)
    }

    fn spanning_subgraph(&self, edges: &[EdgeId]) -> Self {
        let mut res = Self::new();
        for idx in self.graph.node_indices() {
            if let Some(data) = self.graph.node_weight(idx) {
                res.graph.add_node(data.clone());
            }
        }
        for e in edges.iter() {
            let idx = e.to_index();
            if let (Some((a, b)), Some(data)) =
                (self.graph.edge_endpoints(idx), self.graph.edge_weight(idx))
            {
                res.copy_edge(a.into(), b.into(), data.clone());
            }
        }
        res
    }

    fn component_count(&self) -> usize {
        connected_components(&self.graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::{Directed, Graph};
    use crate::algorithm::Laplacian;
    use serde_json::json;

    fn path(n: usize) -> IndexedGraph {
        let mut g = IndexedGraph::new();
        let vs: Vec<_> = (0..n).map(|_| g.add_node(Attributes::new())).collect();
        for w in vs.windows(2) {
            g.add_edge(w[0], w[1], Attributes::new()).unwrap();
        }
        g
    }

    #[test]
    fn ids_are_dense() {
        let g = path(4);
        assert_eq!(
            g.node_ids().collect::<Vec<_>>(),
            (0..4).map(VertexId).collect::<Vec<_>>()
        );
        assert_eq!(
            g.edge_ids().collect::<Vec<_>>(),
            (0..3).map(EdgeId).collect::<Vec<_>>()
        );
        assert!(!g.contains_node(&VertexId(4)));
    }

    #[test]
    fn edge_identity_is_its_own_number() {
        let g = path(4);
        let e = g.edge_id_for(&VertexId(2), &VertexId(1)).unwrap();
        assert_eq!(e, EdgeId(1));
        assert_eq!(g.endpoints_for(&e).unwrap(), (VertexId(1), VertexId(2)));
        assert!(matches!(
            g.edge_id_for(&VertexId(0), &VertexId(3)),
            Err(Error::NoSuchEdge { .. })
        ));
        assert!(matches!(
            g.edge_data(&EdgeId(7)),
            Err(Error::NotFound { kind: "edge", .. })
        ));
    }

    #[test]
    fn neighbors_ascend() {
        let mut g = path(4);
        g.add_edge(VertexId(3), VertexId(1), Attributes::new())
            .unwrap();
        let nbrs: Vec<_> = g.neighbors(&VertexId(1)).unwrap().collect();
        assert_eq!(nbrs, vec![VertexId(0), VertexId(2), VertexId(3)]);
        assert_eq!(g.degree(&VertexId(1)).unwrap(), 3);
    }

    #[test]
    fn rejects_parallel_edges_and_loops() {
        let mut g = path(3);
        assert!(matches!(
            g.add_edge(VertexId(1), VertexId(0), Attributes::new()),
            Err(Error::UnsupportedGraphKind(_))
        ));
        assert!(matches!(
            g.add_edge(VertexId(1), VertexId(1), Attributes::new()),
            Err(Error::UnsupportedGraphKind(_))
        ));
        assert!(matches!(
            g.add_edge(VertexId(1), VertexId(9), Attributes::new()),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn spanning_subgraph_copies_each_edge_once() {
        let g = path(3);
        let sub = g.spanning_subgraph(&[EdgeId(1), EdgeId(1), EdgeId(9)]);
        assert_eq!(sub.node_count(), 3);
        assert_eq!(sub.edge_count(), 1);
        assert_eq!(
            sub.endpoints_for(&EdgeId(0)).unwrap(),
            (VertexId(1), VertexId(2))
        );
    }

    #[test]
    fn absent_nodes_have_no_data() {
        let mut g = path(3);
        assert!(matches!(
            g.node_data(&VertexId(9)),
            Err(Error::NotFound { kind: "node", .. })
        ));
        assert!(matches!(
            g.node_data_mut(&VertexId(3)),
            Err(Error::NotFound { kind: "node", .. })
        ));
    }

    #[test]
    fn attribute_writes_are_live() {
        let mut g = path(3);
        g.node_data_mut(&VertexId(1))
            .unwrap()
            .insert("population".to_string(), json!(10));
        assert_eq!(g.node_data(&VertexId(1)).unwrap()["population"], json!(10));
        let e = g.edge_id_for(&VertexId(2), &VertexId(1)).unwrap();
        g.edge_data_mut(&e)
            .unwrap()
            .insert("weight".to_string(), json!(4));
        assert_eq!(g.edge_data(&e).unwrap()["weight"], json!(4));
        assert_eq!(g.laplacian_matrix().unwrap().get(2, 2), 4.0);
    }

    fn directed_pair() -> Graph<Attributes, Attributes, Directed> {
        let mut g = Graph::new();
        let a = g.add_node(Attributes::new());
        let b = g.add_node(Attributes::new());
        let c = g.add_node(Attributes::new());
        let mut w = Attributes::new();
        w.insert("weight".to_string(), json!(3));
        g.add_edge(a, b, w);
        g.add_edge(b, a, Attributes::new());
        g.add_edge(b, c, Attributes::new());
        g
    }

    #[test]
    fn directed_input_is_rejected_by_default() {
        let res = IndexedGraph::<VertexId>::from_petgraph(directed_pair(), &Config::default());
        assert!(matches!(res, Err(Error::UnsupportedGraphKind(_))));
    }

    #[test]
    fn directed_input_can_be_down_converted() {
        let config = Config::new().directed(DirectedPolicy::DownConvert);
        let g = IndexedGraph::<VertexId>::from_petgraph(directed_pair(), &config).unwrap();
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 2);
        let e = g.edge_id_for(&VertexId(1), &VertexId(0)).unwrap();
        assert_eq!(g.edge_data(&e).unwrap()["weight"], json!(3));
    }

    #[test]
    fn undirected_multi_edges_are_rejected() {
        let mut g: Graph<Attributes, Attributes, petgraph::Undirected> = Graph::new_undirected();
        let a = g.add_node(Attributes::new());
        let b = g.add_node(Attributes::new());
        g.add_edge(a, b, Attributes::new());
        g.add_edge(b, a, Attributes::new());
        let res = IndexedGraph::<VertexId>::from_petgraph(g, &Config::default());
        assert!(matches!(res, Err(Error::UnsupportedGraphKind(_))));
    }

    #[test]
    fn induced_subgraph_renumbers_in_ascending_order() {
        let g = path(5);
        let (sub, ids) = g.induced_subgraph(&[VertexId(1), VertexId(2), VertexId(4)]);
        assert_eq!(ids, vec![VertexId(0), VertexId(1), VertexId(2)]);
        assert_eq!(sub.edge_count(), 1);
        assert_eq!(
            sub.endpoints_for(&EdgeId(0)).unwrap(),
            (VertexId(0), VertexId(1))
        );
        assert_eq!(sub.component_count(), 2);
    }
}
