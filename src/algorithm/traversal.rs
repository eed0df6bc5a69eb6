use crate::backend::*;
use crate::{Error, Result};
use ahash::RandomState;
use std::collections::{HashMap, HashSet, VecDeque};

/// Breadth-first search over any backend.
///
/// Neighbors of a node are visited in the order `Backend::neighbors` reports them,
/// so the result for a fixed graph and root never changes between calls.
pub trait BreadthFirstSearch
where
    Self: Backend,
{
    /// Tree edges `(parent, child)` in visiting order.
    /// `child` is always visited for the first time when yielded.
    fn bfs_edges(&self, root: &Self::NodeId) -> Result<BfsEdges<'_, Self>> {
        BfsEdges::new(self, root)
    }

    /// Children of every parent in visiting order.
    fn bfs_successors(
        &self,
        root: &Self::NodeId,
    ) -> Result<HashMap<Self::NodeId, Vec<Self::NodeId>, RandomState>> {
        let mut res: HashMap<_, Vec<_>, _> = HashMap::with_hasher(RandomState::new());
        for (parent, child) in self.bfs_edges(root)? {
            res.entry(parent).or_default().push(child);
        }
        Ok(res)
    }

    /// The parent of every reached node but `root`.
    fn bfs_predecessors(
        &self,
        root: &Self::NodeId,
    ) -> Result<HashMap<Self::NodeId, Self::NodeId, RandomState>> {
        let res = self
            .bfs_edges(root)?
            .map(|(parent, child)| (child, parent))
            .collect();
        Ok(res)
    }
}

impl<B: Backend> BreadthFirstSearch for B {}

/// Lazy iterator over BFS tree edges.
pub struct BfsEdges<'a, B>
where
    B: Backend,
{
    graph: &'a B,
    visited: HashSet<B::NodeId, RandomState>,
    queue: VecDeque<B::NodeId>,
    pending: VecDeque<(B::NodeId, B::NodeId)>,
}

impl<'a, B> BfsEdges<'a, B>
where
    B: Backend,
{
    fn new(graph: &'a B, root: &B::NodeId) -> Result<Self> {
        if !graph.contains_node(root) {
            return Err(Error::node_not_found(root));
        }
        let mut visited = HashSet::with_hasher(RandomState::new());
        visited.insert(root.clone());
        let mut queue = VecDeque::new();
        queue.push_back(root.clone());
        Ok(Self {
            graph,
            visited,
            queue,
            pending: VecDeque::new(),
        })
    }
}

impl<'a, B> Iterator for BfsEdges<'a, B>
where
    B: Backend,
{
    type Item = (B::NodeId, B::NodeId);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(e) = self.pending.pop_front() {
                return Some(e);
            }
            let parent = self.queue.pop_front()?;
            let graph = self.graph;
            // Queued nodes are the root or neighbors reported by the graph, hence present.
            let neighbors = match graph.neighbors(&parent) {
                Ok(x) => x,
                Err(_) => unreachable!("queued node {:?} is not in the graph", parent),
            };
            for child in neighbors {
                if self.visited.insert(child.clone()) {
                    self.queue.push_back(child.clone());
                    self.pending.push_back((parent.clone(), child));
                }
            }
        }
    }
}
