use super::node_positions;
use crate::backend::*;
use crate::Result;
use petgraph::unionfind::UnionFind;

/// Minimum spanning forests over any backend.
pub trait MinimumSpanningTree
where
    Self: Backend,
{
    /// Edges of a minimum spanning forest by Kruskal's algorithm, in the order they are picked.
    ///
    /// Edges weigh their `weight_attr` attribute, 1 if absent.
    /// Ties are broken by canonical edge order: the earlier edge wins.
    /// Each connected component gets its own tree, so the number of edges is
    /// `node_count - number of components`.
    fn minimum_spanning_edges(&self, weight_attr: &str) -> Result<Vec<Self::EdgeId>> {
        let positions = node_positions(self);
        let mut candidates = Vec::with_capacity(self.edge_count());
        for (rank, e) in self.edges().enumerate() {
            let w = numeric_attr(&e.id, e.data, weight_attr)?;
            if let (Some(&i), Some(&j)) = (positions.get(&e.u), positions.get(&e.v)) {
                candidates.push((w, rank, i, j, e.id));
            }
        }
        candidates.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        let mut forest = UnionFind::<usize>::new(self.node_count());
        let res = candidates
            .into_iter()
            .filter_map(|(_, _, i, j, id)| if forest.union(i, j) { Some(id) } else { None })
            .collect();
        Ok(res)
    }
}

impl<B: Backend> MinimumSpanningTree for B {}
