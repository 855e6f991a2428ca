use serde::Deserialize;

/// The JSON document describing a file-dependency graph.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphDocument {
	/// File records, in document order.
	pub nodes: Vec<NodeRecord>,
	/// Dependency records, in document order.
	pub edges: Vec<EdgeRecord>,
}

/// One file in the document.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
	/// Path of the file, used as the node key.
	pub id: String,
	/// Lines of code, absent in some exports. Taken as given, sign included.
	#[serde(default)]
	pub lines_of_code: Option<i64>,
	/// Components declared in the file. Only the count is used.
	#[serde(default)]
	pub components: Vec<serde_json::Value>,
}

/// A directed dependency between two files.
#[derive(Clone, Debug, Deserialize)]
pub struct EdgeRecord {
	/// Id of the depending file.
	pub source: String,
	/// Id of the file depended upon.
	pub target: String,
	/// Relation type, e.g. `import`.
	#[serde(rename = "type")]
	pub kind: String,
}
