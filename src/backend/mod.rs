//! The two graph representations and the query surface they share.
//!
//! * [LabeledGraph]: nodes are caller-chosen labels, edges are pairs of labels.
//! * [IndexedGraph]: nodes and edges are dense integers, [VertexId] and [EdgeId].

mod vertex;
pub use self::vertex::*;
mod edge;
pub use self::edge::*;
mod r#trait;
pub use self::r#trait::*;
mod labeled;
pub use self::labeled::*;
mod indexed;
pub use self::indexed::*;
mod node_link;
pub use self::node_link::*;

#[cfg(test)]
pub(crate) use self::tests::*;
