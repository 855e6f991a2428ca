use std::collections::HashMap;

use log::debug;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use super::document::GraphDocument;

/// Attributes of one file in the dependency graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileNode {
	/// Full path, unique within the graph.
	pub id: String,
	/// Lines of code, 0 when unknown.
	pub lines: i64,
	/// Number of components declared in the file.
	pub components: usize,
	/// Short display name.
	pub label: String,
}

impl FileNode {
	fn bare(id: &str) -> Self {
		Self {
			id: id.to_owned(),
			lines: 0,
			components: 0,
			label: derive_label(id).to_owned(),
		}
	}
}

/// Attributes of a dependency edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dependency {
	/// Relation type, e.g. `import`.
	pub kind: String,
}

/// Directed file-dependency graph keyed by file id.
///
/// At most one edge exists per ordered pair of files; a later record for the
/// same pair replaces the earlier edge's attributes. Edges that name an
/// unknown file create a bare node for it.
#[derive(Clone, Debug, Default)]
pub struct DependencyGraph {
	graph: DiGraph<FileNode, Dependency>,
	node_map: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
	/// Build the graph from a parsed document, in document order.
	pub fn build(doc: &GraphDocument) -> Self {
		let mut this = Self::default();

		for record in &doc.nodes {
			let idx = this.ensure_node(&record.id);
			let node = &mut this.graph[idx];
			node.lines = record.lines_of_code.unwrap_or(0);
			node.components = record.components.len();
		}

		for record in &doc.edges {
			let from = this.ensure_node(&record.source);
			let to = this.ensure_node(&record.target);
			this.graph.update_edge(
				from,
				to,
				Dependency {
					kind: record.kind.clone(),
				},
			);
		}

		debug!(
			"Built dependency graph: {} nodes, {} edges",
			this.node_count(),
			this.edge_count()
		);
		this
	}

	fn ensure_node(&mut self, id: &str) -> NodeIndex {
		if let Some(&idx) = self.node_map.get(id) {
			return idx;
		}
		let idx = self.graph.add_node(FileNode::bare(id));
		self.node_map.insert(id.to_owned(), idx);
		idx
	}

	/// Number of files.
	pub fn node_count(&self) -> usize {
		self.graph.node_count()
	}

	/// Number of dependency edges.
	pub fn edge_count(&self) -> usize {
		self.graph.edge_count()
	}

	/// Graph index of the file `id`.
	pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
		self.node_map.get(id).copied()
	}

	/// Attributes of the file `id`.
	pub fn node(&self, id: &str) -> Option<&FileNode> {
		self.index_of(id).map(|idx| &self.graph[idx])
	}

	/// Files in insertion order.
	pub fn nodes(&self) -> impl Iterator<Item = &FileNode> {
		self.graph.node_indices().map(|idx| &self.graph[idx])
	}

	/// Edges as `(source, target, attributes)`, in insertion order.
	pub fn edges(&self) -> impl Iterator<Item = (&FileNode, &FileNode, &Dependency)> {
		self.graph
			.edge_references()
			.map(|e| (&self.graph[e.source()], &self.graph[e.target()], e.weight()))
	}

	/// Attributes of the edge `source -> target`.
	pub fn edge(&self, source: &str, target: &str) -> Option<&Dependency> {
		let edge = self
			.graph
			.find_edge(self.index_of(source)?, self.index_of(target)?)?;
		self.graph.edge_weight(edge)
	}

	/// The underlying petgraph graph.
	pub fn inner(&self) -> &DiGraph<FileNode, Dependency> {
		&self.graph
	}
}

impl From<&GraphDocument> for DependencyGraph {
	fn from(doc: &GraphDocument) -> Self {
		Self::build(doc)
	}
}

/// Display label of a file: the text after the last `/` of its id.
pub fn derive_label(id: &str) -> &str {
	id.rsplit('/').next().unwrap_or(id)
}
