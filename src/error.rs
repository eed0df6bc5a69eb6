use crate::backend::BackendKind;
use thiserror::Error;

/// Errors raised by graph wrappers and their backends.
///
/// Node and edge IDs are rendered with `Debug` so that the error type does not
/// depend on the label type of a graph.
#[derive(Debug, Error)]
pub enum Error {
    /// A node or an edge is absent from the graph.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    /// Two nodes are not adjacent.
    #[error("no edge between {u} and {v}")]
    NoSuchEdge { u: String, v: String },
    /// Directed graphs, multi-edges and self loops are not supported.
    #[error("unsupported graph kind: {0}")]
    UnsupportedGraphKind(String),
    /// Translation was requested on a graph without recorded ancestry.
    #[error("graph has no provenance to translate through")]
    NoProvenance,
    /// An operation for one backend was invoked on the other.
    #[error("backend mismatch: expected {expected}, found {actual}")]
    BackendMismatch {
        expected: BackendKind,
        actual: BackendKind,
    },
    /// An attribute exists but does not hold a usable value,
    /// e.g., a non-numeric weight or a key reserved by node-link JSON.
    #[error("invalid attribute {attr:?} of {id}: {value}")]
    InvalidAttribute {
        id: String,
        attr: String,
        value: serde_json::Value,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn node_not_found<N: std::fmt::Debug>(id: &N) -> Self {
        Error::NotFound {
            kind: "node",
            id: format!("{:?}", id),
        }
    }

    pub(crate) fn edge_not_found<E: std::fmt::Debug>(id: &E) -> Self {
        Error::NotFound {
            kind: "edge",
            id: format!("{:?}", id),
        }
    }

    pub(crate) fn no_such_edge<N: std::fmt::Debug>(u: &N, v: &N) -> Self {
        Error::NoSuchEdge {
            u: format!("{:?}", u),
            v: format!("{:?}", v),
        }
    }

    pub(crate) fn unsupported(msg: impl Into<String>) -> Self {
        Error::UnsupportedGraphKind(msg.into())
    }
}
