use crate::{Error, Result};
use serde_json::{Map, Value};
use std::{fmt::Debug, hash::Hash};

/// Attributes of a node or an edge.
pub type Attributes = Map<String, Value>;

/// Which of the two representations backs a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Nodes are addressed by caller-chosen labels.
    Labeled,
    /// Nodes are addressed by a dense range of integers.
    Indexed,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Labeled => write!(f, "label-addressed"),
            BackendKind::Indexed => write!(f, "compact-indexed"),
        }
    }
}

/// An edge together with its endpoints and attributes.
pub struct EdgeView<'a, B: Backend> {
    pub id: B::EdgeId,
    pub u: B::NodeId,
    pub v: B::NodeId,
    pub data: &'a Attributes,
}

/// The query surface shared by both backends.
///
/// All graphs are undirected and simple.
/// Iterations follow a canonical order which is stable as long as the graph is not
/// structurally mutated.
///
/// Attribute maps handed out by `node_data_mut`/`edge_data_mut` are live views into the
/// backend. Structural mutation while holding one is prevented by the borrow checker;
/// callers sharing a graph between threads must serialize access on their own.
pub trait Backend: Sized {
    /// IDs of nodes.
    type NodeId: Clone + Eq + Ord + Hash + Debug;
    /// IDs of edges.
    ///
    /// Use `edge_id_for` and `endpoints_for` to cross between edges and their endpoints.
    type EdgeId: Clone + Eq + Hash + Debug;
    /// Labels of nodes in the label-addressed graph at the root of a provenance chain.
    type Label: Clone + Eq + Ord + Hash + Debug;

    const KIND: BackendKind;

    fn node_count(&self) -> usize;
    /// Iterates over nodes in canonical order.
    fn node_ids(&self) -> Box<dyn Iterator<Item = Self::NodeId> + '_>;
    fn contains_node(&self, n: &Self::NodeId) -> bool;

    fn edge_count(&self) -> usize;
    /// Iterates over edges in canonical order.
    fn edge_ids(&self) -> Box<dyn Iterator<Item = Self::EdgeId> + '_>;
    fn contains_edge(&self, e: &Self::EdgeId) -> bool;
    /// Iterates over edges, with endpoints and attributes, in canonical order.
    fn edges(&self) -> Box<dyn Iterator<Item = EdgeView<'_, Self>> + '_>;

    fn node_data(&self, n: &Self::NodeId) -> Result<&Attributes>;
    fn node_data_mut(&mut self, n: &Self::NodeId) -> Result<&mut Attributes>;
    fn edge_data(&self, e: &Self::EdgeId) -> Result<&Attributes>;
    fn edge_data_mut(&mut self, e: &Self::EdgeId) -> Result<&mut Attributes>;

    /// Neighbors of a node in ascending canonical order.
    fn neighbors(&self, n: &Self::NodeId) -> Result<Box<dyn Iterator<Item = Self::NodeId> + '_>>;

    fn degree(&self, n: &Self::NodeId) -> Result<usize> {
        Ok(self.neighbors(n)?.count())
    }

    /// The edge between `u` and `v`, in either orientation.
    fn edge_id_for(&self, u: &Self::NodeId, v: &Self::NodeId) -> Result<Self::EdgeId>;
    fn endpoints_for(&self, e: &Self::EdgeId) -> Result<(Self::NodeId, Self::NodeId)>;

    fn is_directed(&self) -> bool {
        false
    }

    /// The root label of a node of a graph which is itself a root, if it has labels at all.
    fn self_label(&self, n: &Self::NodeId) -> Option<Self::Label>;

    /// Builds the subgraph induced by `nodes`, which must be present and in canonical order.
    ///
    /// Returns the new backend and, for each of `nodes`, its ID in the new backend.
    fn induced_subgraph(&self, nodes: &[Self::NodeId]) -> (Self, Vec<Self::NodeId>);

    /// Builds a graph with all nodes, keeping their IDs, but only `edges`.
    fn spanning_subgraph(&self, edges: &[Self::EdgeId]) -> Self;

    /// Number of connected components, computed by the backend engine.
    fn component_count(&self) -> usize;
}

/// Reads a numeric attribute, defaulting to 1 when it is absent.
pub(crate) fn numeric_attr<E: Debug>(id: &E, data: &Attributes, attr: &str) -> Result<f64> {
    match data.get(attr) {
        None => Ok(1.0),
        Some(value) => value.as_f64().ok_or_else(|| Error::InvalidAttribute {
            id: format!("{:?}", id),
            attr: attr.to_string(),
            value: value.clone(),
        }),
    }
}
