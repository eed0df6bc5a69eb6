//! One undirected graph API over two interchangeable representations.
//!
//! # Backends
//!
//! * [LabeledGraph](backend::LabeledGraph) addresses nodes by caller-chosen labels,
//!   which stay stable across subgraph extraction.
//! * [IndexedGraph](backend::IndexedGraph) addresses nodes by dense integers,
//!   which are handed out afresh whenever a graph is derived.
//!
//! Algorithms in [algorithm] are written once against [Backend](backend::Backend)
//! and give the same answers on either.
//!
//! # Provenance
//!
//! A [Graph] derived from another, by subgraph extraction or by conversion to the
//! other backend, remembers where each of its nodes comes from.
//! Results computed on a derived graph can then be mapped back to the immediate parent
//! or, in a single lookup, to the labels of the label-addressed root.
//!
//! ```ignore
//! let root = Graph::new(labeled);
//! let indexed = root.to_indexed(&Config::default());
//! let part = indexed.subgraph(picked)?;
//! let labels: Vec<String> = part.root_labels(&part.node_ids().collect::<Vec<_>>())?;
//! ```

pub mod algorithm;
pub mod backend;
pub mod config;
mod error;
pub use self::error::*;
pub mod sparse;
pub mod wrapper;

pub use self::config::{Config, DirectedPolicy, NodeOrder};
pub use self::sparse::CsrMatrix;
pub use self::wrapper::{AnyGraph, Graph, Provenance};
