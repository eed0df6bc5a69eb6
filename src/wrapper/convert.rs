use super::{Graph, Provenance};
use crate::backend::*;
use crate::config::{Config, NodeOrder};
use crate::{Error, Result};
use ahash::RandomState;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::debug;

impl<L, P> Graph<LabeledGraph<L>, P>
where
    L: Clone + Eq + Ord + Hash + Debug,
{
    /// Copies this graph into the compact-indexed backend.
    ///
    /// Nodes are numbered from 0 in the order `config.node_order` asks for.
    /// Attributes are copied; edges keep their canonical order.
    /// The result records, for every `VertexId`, the label it had here and its root label.
    pub fn to_indexed(&self, config: &Config) -> Graph<IndexedGraph<L>, L> {
        let mut labels: Vec<L> = self.node_ids().collect();
        if config.node_order == NodeOrder::Sorted {
            labels.sort();
        }
        let mut backend = IndexedGraph::new();
        let mut ids = HashMap::with_capacity_and_hasher(labels.len(), RandomState::new());
        let mut entries = Vec::with_capacity(labels.len());
        for label in labels.into_iter() {
            let data = self.backend.node_data(&label).cloned().unwrap_or_default();
            let v = backend.add_node(data);
            ids.insert(label.clone(), v);
            let root = self.root_label_or_own(&label);
            entries.push((v, label, root));
        }
        for e in self.backend.edges() {
            if let (Some(u), Some(v)) = (ids.get(&e.u), ids.get(&e.v)) {
                backend.copy_edge(*u, *v, e.data.clone());
            }
        }
        debug!(
            nodes = backend.node_count(),
            edges = backend.edge_count(),
            order = ?config.node_order,
            "graph.to_indexed"
        );
        Graph {
            backend,
            provenance: Some(Provenance::new(entries)),
        }
    }
}

impl<L, P> Graph<IndexedGraph<L>, P>
where
    L: Clone + Eq + Ord + Hash + Debug,
{
    /// Copies this graph into the label-addressed backend, relabeling every node with its
    /// root label.
    ///
    /// Fails with `NoProvenance` unless the chain starts at a label-addressed graph.
    pub fn to_labeled(&self) -> Result<Graph<LabeledGraph<L>, VertexId>> {
        let labels = self.root_labels_in_order()?;
        let mut backend = LabeledGraph::new();
        for (v, label) in self.node_ids().zip(labels.iter()) {
            backend.add_node(label.clone(), self.backend.node_data(&v)?.clone());
        }
        for e in self.backend.edges() {
            let u = labels
                .get(e.u.to_raw())
                .ok_or_else(|| Error::node_not_found(&e.u))?;
            let v = labels
                .get(e.v.to_raw())
                .ok_or_else(|| Error::node_not_found(&e.v))?;
            backend.add_edge(u, v, e.data.clone())?;
        }
        debug!(
            nodes = backend.node_count(),
            edges = backend.edge_count(),
            "graph.to_labeled"
        );
        let entries = self
            .node_ids()
            .zip(labels.into_iter())
            .map(|(v, label)| (label.clone(), v, Some(label)));
        Ok(Graph {
            backend,
            provenance: Some(Provenance::new(entries)),
        })
    }
}
