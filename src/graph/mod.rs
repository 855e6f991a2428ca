//! Dependency document loading and the directed graph built from it.

mod document;
mod loader;
mod model;

pub use document::{EdgeRecord, GraphDocument, NodeRecord};
pub use loader::{
	DEFAULT_GRAPH_PATH, LoadError, check_status, load_dependency_graph, parse_document,
};
pub use model::{Dependency, DependencyGraph, FileNode, derive_label};
