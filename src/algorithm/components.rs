use super::BreadthFirstSearch;
use crate::backend::*;
use ahash::RandomState;
use std::collections::{BTreeSet, HashSet};

/// Connectivity queries over any backend.
pub trait ConnectedComponents
where
    Self: Backend,
{
    /// Nodes of every connected component, each in BFS order from its first node.
    ///
    /// Components are ordered by their first node in canonical order.
    fn component_node_sets(&self) -> Vec<Vec<Self::NodeId>> {
        let mut seen = HashSet::with_capacity_and_hasher(self.node_count(), RandomState::new());
        let mut res = vec![];
        for n in self.node_ids() {
            if !seen.insert(n.clone()) {
                continue;
            }
            let mut component = vec![n.clone()];
            if let Ok(edges) = self.bfs_edges(&n) {
                for (_, child) in edges {
                    seen.insert(child.clone());
                    component.push(child);
                }
            }
            res.push(component);
        }
        res
    }

    fn num_connected_components(&self) -> usize {
        self.component_count()
    }

    /// Connected with exactly `node_count - 1` edges. The empty graph is no tree.
    fn is_a_tree(&self) -> bool {
        let n = self.node_count();
        n > 0 && self.edge_count() == n - 1 && self.num_connected_components() == 1
    }

    /// Nodes without any neighbor.
    fn islands(&self) -> BTreeSet<Self::NodeId> {
        self.node_ids()
            .filter(|n| self.degree(n).map(|d| d == 0).unwrap_or(false))
            .collect()
    }
}

impl<B: Backend> ConnectedComponents for B {}
