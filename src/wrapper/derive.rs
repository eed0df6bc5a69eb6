use super::{Graph, Provenance};
use crate::algorithm::*;
use crate::backend::*;
use crate::{Error, Result};
use ahash::RandomState;
use std::collections::HashSet;
use tracing::debug;

/// Graphs derived from others.
impl<B, P> Graph<B, P>
where
    B: Backend,
    P: Clone,
{
    /// The subgraph induced by `nodes`.
    ///
    /// Label-addressed graphs keep their labels.
    /// Compact-indexed graphs renumber the selected nodes from 0 in ascending order of
    /// their IDs in this graph.
    /// Either way the result records how its nodes map to this graph and to the root.
    pub fn subgraph<I>(&self, nodes: I) -> Result<Graph<B, B::NodeId>>
    where
        I: IntoIterator<Item = B::NodeId>,
    {
        let mut selected = HashSet::with_hasher(RandomState::new());
        for n in nodes.into_iter() {
            if !self.backend.contains_node(&n) {
                return Err(Error::node_not_found(&n));
            }
            selected.insert(n);
        }
        let res = self.extract(&selected);
        debug!(
            kind = %B::KIND,
            parent_nodes = self.node_count(),
            nodes = res.node_count(),
            edges = res.edge_count(),
            "graph.subgraph"
        );
        Ok(res)
    }

    /// One subgraph per connected component,
    /// ordered by their first node in canonical order.
    pub fn connected_components(&self) -> Vec<Graph<B, B::NodeId>> {
        let res: Vec<_> = self
            .backend
            .component_node_sets()
            .into_iter()
            .map(|nodes| {
                let selected: HashSet<_, RandomState> = nodes.into_iter().collect();
                self.extract(&selected)
            })
            .collect();
        debug!(
            kind = %B::KIND,
            nodes = self.node_count(),
            components = res.len(),
            "graph.connected_components"
        );
        res
    }

    /// A minimum spanning forest under edge attribute `weight_attr`, 1 if absent.
    ///
    /// The forest keeps every node with its ID, and so shares the provenance of this graph.
    /// Ties between equal weights go to the edge earlier in canonical order.
    pub fn minimum_spanning_tree(&self, weight_attr: &str) -> Result<Graph<B, P>> {
        let edges = self.backend.minimum_spanning_edges(weight_attr)?;
        let backend = self.backend.spanning_subgraph(&edges);
        debug!(
            kind = %B::KIND,
            nodes = backend.node_count(),
            edges = backend.edge_count(),
            dropped = self.edge_count() - backend.edge_count(),
            "graph.minimum_spanning_tree"
        );
        Ok(Graph {
            backend,
            provenance: self.provenance.clone(),
        })
    }

    fn extract(&self, selected: &HashSet<B::NodeId, RandomState>) -> Graph<B, B::NodeId> {
        let ordered: Vec<B::NodeId> = self
            .backend
            .node_ids()
            .filter(|n| selected.contains(n))
            .collect();
        let (backend, local_ids) = self.backend.induced_subgraph(&ordered);
        let entries = local_ids
            .into_iter()
            .zip(ordered.into_iter())
            .map(|(local, parent)| {
                let root = self.root_label_or_own(&parent);
                (local, parent, root)
            });
        Graph {
            backend,
            provenance: Some(Provenance::new(entries)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use quickcheck_macros::quickcheck;
    use std::collections::{BTreeMap, BTreeSet, HashMap};

    fn abc() -> Graph<LabeledGraph<String>, String> {
        let mut g = LabeledGraph::new();
        for x in ["a", "b", "c"] {
            g.add_node(x.to_string(), Attributes::new());
        }
        g.add_edge(&"a".to_string(), &"b".to_string(), Attributes::new())
            .unwrap();
        g.add_edge(&"b".to_string(), &"c".to_string(), Attributes::new())
            .unwrap();
        Graph::new(g)
    }

    fn s(x: &str) -> String {
        x.to_string()
    }

    #[test]
    fn labeled_subgraph_preserves_labels() {
        let g = abc();
        let sub = g.subgraph(vec![s("a"), s("b")]).unwrap();
        let ids: BTreeSet<_> = sub.node_ids().collect();
        assert_eq!(ids, [s("a"), s("b")].into_iter().collect());
        assert_eq!(sub.edge_count(), 1);
        assert_eq!(sub.parent_id(&s("a")).unwrap(), s("a"));
        assert_eq!(sub.root_label(&s("b")).unwrap(), s("b"));
    }

    #[test]
    fn roots_have_no_provenance() {
        let g = abc();
        assert!(matches!(g.parent_id(&s("a")), Err(Error::NoProvenance)));
        assert!(matches!(g.root_label(&s("a")), Err(Error::NoProvenance)));
        assert_eq!(g.root_labels_in_order().unwrap(), vec![s("a"), s("b"), s("c")]);
    }

    #[test]
    fn unknown_nodes_are_errors() {
        let g = abc();
        assert!(matches!(
            g.subgraph(vec![s("a"), s("zz")]),
            Err(Error::NotFound { .. })
        ));
        let sub = g.subgraph(vec![s("a"), s("b")]).unwrap();
        assert!(matches!(sub.parent_id(&s("c")), Err(Error::NotFound { .. })));
        let res: Result<Vec<String>> = sub.parent_ids(&[s("a"), s("c")]);
        assert!(matches!(res, Err(Error::NotFound { .. })));
    }

    #[test]
    fn indexed_subgraph_renumbers_from_zero() {
        let g = abc().to_indexed(&Config::default());
        let sub = g.subgraph(vec![VertexId(2), VertexId(1)]).unwrap();
        assert_eq!(
            sub.node_ids().collect::<Vec<_>>(),
            vec![VertexId(0), VertexId(1)]
        );
        assert_eq!(sub.parent_id(&VertexId(0)).unwrap(), VertexId(1));
        assert_eq!(sub.parent_id(&VertexId(1)).unwrap(), VertexId(2));
        assert_eq!(sub.root_label(&VertexId(0)).unwrap(), s("b"));
        assert_eq!(sub.local_id_for_root_label(&s("c")).unwrap(), VertexId(1));
        assert!(matches!(
            sub.local_id_for_root_label(&s("a")),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn partitions_are_rekeyed() {
        let g = abc().to_indexed(&Config::default());
        let sub = g.subgraph(vec![VertexId(0), VertexId(2)]).unwrap();
        let mut part = HashMap::new();
        part.insert(VertexId(0), 7u32);
        part.insert(VertexId(1), 9u32);
        let to_parent: BTreeMap<VertexId, u32> = sub.partition_to_parent(&part).unwrap();
        assert_eq!(
            to_parent,
            [(VertexId(0), 7), (VertexId(2), 9)].into_iter().collect()
        );
        let to_root: BTreeMap<String, u32> = sub.partition_to_root(&part).unwrap();
        assert_eq!(to_root, [(s("a"), 7), (s("c"), 9)].into_iter().collect());
        part.insert(VertexId(5), 1);
        let res: Result<BTreeMap<String, u32>> = sub.partition_to_root(&part);
        assert!(matches!(res, Err(Error::NotFound { .. })));
    }

    #[test]
    fn directly_wrapped_indexed_graphs_have_no_root_labels() {
        let mut backend: IndexedGraph = IndexedGraph::new();
        let a = backend.add_node(Attributes::new());
        let b = backend.add_node(Attributes::new());
        backend.add_edge(a, b, Attributes::new()).unwrap();
        let g = Graph::new(backend);
        let sub = g.subgraph(vec![b]).unwrap();
        assert_eq!(sub.parent_id(&VertexId(0)).unwrap(), b);
        assert!(matches!(sub.root_label(&VertexId(0)), Err(Error::NoProvenance)));
        assert!(matches!(sub.root_labels_in_order(), Err(Error::NoProvenance)));
    }

    #[test]
    fn components_carry_provenance() {
        let mut backend = abc().into_backend();
        backend.add_node(s("d"), Attributes::new());
        backend.add_node(s("e"), Attributes::new());
        backend.add_edge(&s("e"), &s("d"), Attributes::new()).unwrap();
        let g = Graph::new(backend).to_indexed(&Config::default());
        let components = g.connected_components();
        assert_eq!(components.len(), 2);
        let labels: Vec<Vec<String>> = components
            .iter()
            .map(|c| c.root_labels_in_order().unwrap())
            .collect();
        assert_eq!(
            labels,
            vec![vec![s("a"), s("b"), s("c")], vec![s("d"), s("e")]]
        );
        let second = &components[1];
        let parents: Vec<VertexId> = second.parent_ids(&[VertexId(0), VertexId(1)]).unwrap();
        assert_eq!(parents, vec![VertexId(3), VertexId(4)]);
        assert!(components.iter().all(|c| c.num_connected_components() == 1));
    }

    #[test]
    fn four_cycle_spanning_tree() {
        let mut backend = LabeledGraph::new();
        for x in 0..4u32 {
            backend.add_node(x, Attributes::new());
        }
        for x in 0..4u32 {
            backend
                .add_edge(&x, &((x + 1) % 4), Attributes::new())
                .unwrap();
        }
        let labeled = Graph::new(backend);
        let indexed = labeled.to_indexed(&Config::default());
        assert!(!labeled.is_a_tree());
        assert!(!indexed.is_a_tree());
        let trees = [
            labeled.minimum_spanning_tree("weight").unwrap().edge_count(),
            indexed.minimum_spanning_tree("weight").unwrap().edge_count(),
        ];
        assert_eq!(trees, [3, 3]);
        assert!(labeled.minimum_spanning_tree("weight").unwrap().is_a_tree());
        let tree = indexed.minimum_spanning_tree("weight").unwrap();
        assert!(tree.is_a_tree());
        assert_eq!(tree.root_label(&VertexId(3)).unwrap(), 3);
    }

    #[quickcheck]
    fn subgraph_translates_onto_selection(g: RandomGraph, mask: Vec<bool>) {
        let labeled = Graph::new(g.to_labeled());
        let indexed = labeled.to_indexed(&Config::default());
        let picked: Vec<VertexId> = indexed
            .node_ids()
            .zip(mask.iter().chain(std::iter::repeat(&true)))
            .filter(|(_, keep)| **keep)
            .map(|(v, _)| v)
            .collect();
        let sub = indexed.subgraph(picked.clone()).unwrap();
        let local: Vec<_> = sub.node_ids().collect();
        let parents: Vec<VertexId> = sub.parent_ids(&local).unwrap();
        assert_eq!(parents, picked);

        let picked_labels: BTreeSet<String> = indexed.root_labels(&picked).unwrap();
        let sub_labels: BTreeSet<String> = sub.root_labels(&local).unwrap();
        assert_eq!(sub_labels, picked_labels);
        for n in local.iter() {
            let label = sub.root_label(n).unwrap();
            assert_eq!(&sub.local_id_for_root_label(&label).unwrap(), n);
        }
    }

    #[quickcheck]
    fn nested_subgraphs_compose(g: RandomGraph, first: Vec<bool>, second: Vec<bool>) {
        let root = Graph::new(g.to_labeled());
        let level0 = root.to_indexed(&Config::default());
        let keep = |mask: &Vec<bool>, i: usize| mask.get(i).copied().unwrap_or(true);
        let level1 = level0
            .subgraph(level0.node_ids().filter(|v| keep(&first, v.to_raw())))
            .unwrap();
        let level2 = level1
            .subgraph(level1.node_ids().filter(|v| keep(&second, v.to_raw())))
            .unwrap();
        let level3 = level2.subgraph(level2.node_ids()).unwrap();

        let leaf_ids: Vec<_> = level3.node_ids().collect();
        let direct: Vec<String> = level3.root_labels(&leaf_ids).unwrap();
        let walked: Vec<String> = leaf_ids
            .iter()
            .map(|v| {
                let v2 = level3.parent_id(v).unwrap();
                let v1 = level2.parent_id(&v2).unwrap();
                let v0 = level1.parent_id(&v1).unwrap();
                level0.root_label(&v0).unwrap()
            })
            .collect();
        assert_eq!(direct, walked);
        let unique: BTreeSet<_> = direct.iter().cloned().collect();
        assert_eq!(unique.len(), direct.len());
        for label in direct.iter() {
            assert!(root.contains_node(label));
        }
        assert_eq!(level3.edge_count(), level2.edge_count());
    }

    #[quickcheck]
    fn labeled_components_partition_the_nodes(g: RandomGraph) {
        let g = Graph::new(g.to_labeled());
        let components = g.connected_components();
        assert_eq!(components.len(), g.num_connected_components());
        let mut all: Vec<String> = components
            .iter()
            .flat_map(|c| c.root_labels_in_order().unwrap())
            .collect();
        all.sort();
        let mut oracle: Vec<String> = g.node_ids().collect();
        oracle.sort();
        assert_eq!(all, oracle);
        let edges: usize = components.iter().map(|c| c.edge_count()).sum();
        assert_eq!(edges, g.edge_count());
    }
}
