//! Algorithms written once against [Backend](crate::backend::Backend),
//! giving the same results whichever representation backs a graph.
mod traversal;
pub use self::traversal::*;
mod laplacian;
pub use self::laplacian::*;
mod spanning_tree;
pub use self::spanning_tree::*;
mod components;
pub use self::components::*;

use crate::backend::Backend;
use ahash::RandomState;
use std::collections::HashMap;

/// Position of every node in canonical order.
pub(crate) fn node_positions<B: Backend>(graph: &B) -> HashMap<B::NodeId, usize, RandomState> {
    let mut res = HashMap::with_capacity_and_hasher(graph.node_count(), RandomState::new());
    for (i, n) in graph.node_ids().enumerate() {
        res.insert(n, i);
    }
    res
}
