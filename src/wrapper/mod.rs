//! Graphs bound to a backend, together with the provenance of their nodes.

mod provenance;
pub use self::provenance::*;
mod graph;
pub use self::graph::*;
mod graph_debug;
pub use self::graph_debug::*;
mod derive;
mod convert;
mod any;
pub use self::any::*;
