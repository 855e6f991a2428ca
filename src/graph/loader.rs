use std::sync::Arc;

use log::{error, info};
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use super::document::GraphDocument;

/// Document fetched when the page is given no other path.
pub const DEFAULT_GRAPH_PATH: &str = "fileDependencyGraph.json";

/// Failure to obtain a [`GraphDocument`].
#[derive(Clone, Debug, Error)]
pub enum LoadError {
	/// The server has no file at `path`.
	#[error("{path} not found")]
	NotFound {
		/// Requested path.
		path: String,
	},

	/// The server answered with a non-success status other than 404.
	#[error("{path}: unexpected HTTP status {status}")]
	Status {
		/// Requested path.
		path: String,
		/// HTTP status code.
		status: u16,
	},

	/// The browser could not perform the request or read the body.
	#[error("failed to fetch {path}: {message}")]
	Fetch {
		/// Requested path.
		path: String,
		/// Browser-provided description.
		message: String,
	},

	/// The body is not valid JSON, or a record lacks a required key.
	#[error("invalid dependency graph document: {0}")]
	Parse(#[source] Arc<serde_json::Error>),
}

impl From<serde_json::Error> for LoadError {
	fn from(err: serde_json::Error) -> Self {
		Self::Parse(Arc::new(err))
	}
}

/// Fetch and parse the dependency document at `path`.
///
/// The path is resolved relative to the page, the same way a browser
/// resolves any relative URL.
pub async fn load_dependency_graph(path: impl Into<String>) -> Result<GraphDocument, LoadError> {
	let path = path.into();
	info!("Loading dependency graph from {path}");

	let result = match fetch_text(&path).await {
		Ok(text) => parse_document(&text),
		Err(err) => Err(err),
	};
	if let Err(err) = &result {
		error!("{err}");
	}
	result
}

/// Parse a document body. Missing required keys are reported here as well.
pub fn parse_document(text: &str) -> Result<GraphDocument, LoadError> {
	Ok(serde_json::from_str(text)?)
}

/// Map an HTTP status to the load outcome for `path`.
pub fn check_status(path: &str, status: u16) -> Result<(), LoadError> {
	match status {
		200..=299 => Ok(()),
		404 => Err(LoadError::NotFound { path: path.to_owned() }),
		status => Err(LoadError::Status {
			path: path.to_owned(),
			status,
		}),
	}
}

async fn fetch_text(path: &str) -> Result<String, LoadError> {
	let fetch_err = |err: JsValue| LoadError::Fetch {
		path: path.to_owned(),
		message: err.as_string().unwrap_or_else(|| format!("{err:?}")),
	};

	let window = web_sys::window().ok_or_else(|| fetch_err(JsValue::from_str("no window")))?;
	let response: Response = JsFuture::from(window.fetch_with_str(path))
		.await
		.map_err(fetch_err)?
		.dyn_into()
		.map_err(fetch_err)?;
	check_status(path, response.status())?;

	let body = JsFuture::from(response.text().map_err(fetch_err)?)
		.await
		.map_err(fetch_err)?;
	body.as_string()
		.ok_or_else(|| fetch_err(JsValue::from_str("response body is not text")))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_records_with_defaults() {
		let doc = parse_document(
			r#"{"nodes":[{"id":"a/x.py","linesOfCode":50,"components":["c1","c2"]},{"id":"b/y.py"}],
			"edges":[{"source":"a/x.py","target":"b/y.py","type":"import"}]}"#,
		)
		.unwrap();

		assert_eq!(doc.nodes.len(), 2);
		assert_eq!(doc.nodes[0].lines_of_code, Some(50));
		assert_eq!(doc.nodes[0].components.len(), 2);
		assert_eq!(doc.nodes[1].lines_of_code, None);
		assert!(doc.nodes[1].components.is_empty());
		assert_eq!(doc.edges[0].kind, "import");
	}

	#[test]
	fn malformed_json_is_a_parse_error() {
		let err = parse_document("{\"nodes\": [").unwrap_err();
		assert!(matches!(err, LoadError::Parse(_)));
	}

	#[test]
	fn missing_node_id_is_a_parse_error() {
		let err = parse_document(r#"{"nodes":[{"linesOfCode":3}],"edges":[]}"#).unwrap_err();
		assert!(matches!(err, LoadError::Parse(_)));
		assert!(err.to_string().contains("`id`"));
	}

	#[test]
	fn missing_edge_target_is_a_parse_error() {
		let err = parse_document(r#"{"nodes":[],"edges":[{"source":"a","type":"import"}]}"#)
			.unwrap_err();
		assert!(err.to_string().contains("`target`"));
	}

	#[test]
	fn not_found_names_the_path() {
		let err = check_status("missing/graph.json", 404).unwrap_err();
		assert!(matches!(err, LoadError::NotFound { .. }));
		assert_eq!(err.to_string(), "missing/graph.json not found");
	}

	#[test]
	fn other_statuses() {
		assert!(check_status(DEFAULT_GRAPH_PATH, 200).is_ok());
		assert!(check_status(DEFAULT_GRAPH_PATH, 204).is_ok());
		assert!(matches!(
			check_status(DEFAULT_GRAPH_PATH, 500),
			Err(LoadError::Status { status: 500, .. })
		));
	}
}
