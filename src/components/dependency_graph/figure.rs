use std::f64::consts::FRAC_PI_4;

use crate::graph::DependencyGraph;

use super::layout::{Layout, Rect};
use super::scale::{ColorScale, Rgb};

/// CSS pixels per typographic point.
pub const PX_PER_POINT: f64 = 96.0 / 72.0;
/// Figure proportions, width by height.
pub const FIGURE_ASPECT: (f64, f64) = (16.0, 12.0);
pub const TITLE_HEIGHT: f64 = 48.0;
pub const LEGEND_WIDTH: f64 = 110.0;
pub const MARGIN: f64 = 16.0;

/// Marker area in points²; never below 102, even for zero or negative counts.
pub fn node_size(lines: i64) -> f64 {
	lines.max(1).saturating_mul(2).saturating_add(100) as f64
}

/// On-screen radius of a marker of [`node_size`] area.
pub fn node_radius(lines: i64) -> f64 {
	node_size(lines).sqrt() / 2.0 * PX_PER_POINT
}

/// Largest box of [`FIGURE_ASPECT`] fitting the available space.
pub fn figure_size(avail_width: f64, avail_height: f64) -> (f64, f64) {
	let (aw, ah) = FIGURE_ASPECT;
	let height = avail_width * ah / aw;
	if height <= avail_height {
		(avail_width, height)
	} else {
		(avail_height * aw / ah, avail_height)
	}
}

#[derive(Clone, Debug)]
pub struct NodeGlyph {
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	pub color: Rgb,
	pub label: String,
}

/// Where an edge is stroked; `dir` is the unit heading at the arrow tip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EdgePath {
	Line {
		start: (f64, f64),
		tip: (f64, f64),
		dir: (f64, f64),
	},
	/// Self-dependency, drawn as a circle resting on top of the node.
	Loop {
		center: (f64, f64),
		radius: f64,
		tip: (f64, f64),
		dir: (f64, f64),
	},
}

/// Everything needed to draw one frame of the dependency graph.
pub struct Figure {
	pub title: String,
	pub width: f64,
	pub height: f64,
	pub nodes: Vec<NodeGlyph>,
	pub edges: Vec<(usize, usize)>,
	pub scale: ColorScale,
	layout: Layout,
}

impl Figure {
	pub fn new(
		graph: &DependencyGraph,
		layout: Layout,
		title: impl Into<String>,
		width: f64,
		height: f64,
	) -> Self {
		let scale = ColorScale::from_values(graph.nodes().map(|n| n.components));
		let nodes = graph
			.nodes()
			.map(|node| NodeGlyph {
				x: 0.0,
				y: 0.0,
				radius: node_radius(node.lines),
				color: scale.color(node.components),
				label: node.label.clone(),
			})
			.collect();
		let edges = graph
			.inner()
			.raw_edges()
			.iter()
			.map(|e| (e.source().index(), e.target().index()))
			.collect();

		let mut figure = Self {
			title: title.into(),
			width,
			height,
			nodes,
			edges,
			scale,
			layout,
		};
		figure.resize(width, height);
		figure
	}

	/// Area nodes are fitted into, leaving room for the title, legend and
	/// the largest marker.
	pub fn plot_area(&self) -> Rect {
		let pad = self.nodes.iter().map(|n| n.radius).fold(0.0, f64::max);
		Rect {
			x: MARGIN + pad,
			y: TITLE_HEIGHT + pad,
			width: (self.width - LEGEND_WIDTH - 2.0 * MARGIN - 2.0 * pad).max(0.0),
			height: (self.height - TITLE_HEIGHT - MARGIN - 2.0 * pad).max(0.0),
		}
	}

	/// Geometry of the edge `src -> tgt`, `None` only when two distinct
	/// nodes share a position.
	pub fn edge_path(&self, src: usize, tgt: usize) -> Option<EdgePath> {
		let (n1, n2) = (&self.nodes[src], &self.nodes[tgt]);
		if src == tgt {
			let radius = (n1.radius * 0.6).max(6.0);
			let center = (n1.x, n1.y - n1.radius - radius * 0.5);
			let (c, s) = (FRAC_PI_4.cos(), FRAC_PI_4.sin());
			return Some(EdgePath::Loop {
				center,
				radius,
				tip: (center.0 + radius * c, center.1 + radius * s),
				dir: (-s, c),
			});
		}

		let (dx, dy) = (n2.x - n1.x, n2.y - n1.y);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist <= f64::EPSILON {
			return None;
		}
		let (ux, uy) = (dx / dist, dy / dist);
		// overlapping circles: start from the source center instead of its rim
		let start_off = if dist > n1.radius + n2.radius {
			n1.radius
		} else {
			0.0
		};
		Some(EdgePath::Line {
			start: (n1.x + ux * start_off, n1.y + uy * start_off),
			tip: (n2.x - ux * n2.radius, n2.y - uy * n2.radius),
			dir: (ux, uy),
		})
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		let positions = self.layout.fit(self.plot_area());
		for (node, (x, y)) in self.nodes.iter_mut().zip(positions) {
			node.x = x;
			node.y = y;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::dependency_graph::layout::{LayoutParams, compute_layout};
	use crate::components::dependency_graph::scale::VIRIDIS;
	use crate::graph::parse_document;

	#[test]
	fn size_has_visible_minimum() {
		assert_eq!(node_size(0), 102.0);
		assert_eq!(node_size(1), 102.0);
		assert_eq!(node_size(50), 200.0);
		assert_eq!(node_size(-5), 102.0);
		assert_eq!(node_size(i64::MIN), 102.0);
		assert!(node_radius(0) > 0.0);
		assert!(node_radius(5000) > node_radius(50));
	}

	#[test]
	fn figure_keeps_aspect() {
		assert_eq!(figure_size(1600.0, 2000.0), (1600.0, 1200.0));
		assert_eq!(figure_size(2000.0, 900.0), (1200.0, 900.0));
	}

	#[test]
	fn glyphs_follow_graph() {
		let graph = DependencyGraph::build(
			&parse_document(
				r#"{"nodes":[{"id":"a/x.py","linesOfCode":50,"components":["c1","c2"]},{"id":"b/y.py"}],
				"edges":[{"source":"a/x.py","target":"b/y.py","type":"import"}]}"#,
			)
			.unwrap(),
		);
		let layout = compute_layout(&graph, &LayoutParams::default());
		let figure = Figure::new(&graph, layout, "File Dependency Graph", 1600.0, 1200.0);

		assert_eq!(figure.nodes.len(), 2);
		assert_eq!(figure.edges, [(0, 1)]);
		assert_eq!(figure.nodes[0].label, "x.py");
		assert_eq!(figure.nodes[0].color, VIRIDIS[8]);
		assert_eq!(figure.nodes[1].color, VIRIDIS[0]);
		assert_eq!(figure.nodes[1].radius, node_radius(0));

		let area = figure.plot_area();
		assert!(figure.nodes.iter().all(|n| area.contains((n.x, n.y))));
	}

	#[test]
	fn resize_refits_nodes() {
		let graph = DependencyGraph::build(
			&parse_document(r#"{"nodes":[{"id":"a"},{"id":"b"},{"id":"c"}],"edges":[]}"#).unwrap(),
		);
		let layout = compute_layout(&graph, &LayoutParams::default());
		let mut figure = Figure::new(&graph, layout, "t", 800.0, 600.0);
		figure.resize(400.0, 300.0);
		let area = figure.plot_area();
		assert!(area.width < 400.0);
		assert!(figure.nodes.iter().all(|n| area.contains((n.x, n.y))));
	}

	fn two_nodes(edges: &str) -> Figure {
		let graph = DependencyGraph::build(
			&parse_document(&format!(
				r#"{{"nodes":[{{"id":"a"}},{{"id":"b"}}],"edges":[{edges}]}}"#
			))
			.unwrap(),
		);
		let layout = compute_layout(&graph, &LayoutParams::default());
		Figure::new(&graph, layout, "t", 800.0, 600.0)
	}

	fn place(figure: &mut Figure, a: (f64, f64), b: (f64, f64)) {
		(figure.nodes[0].x, figure.nodes[0].y) = a;
		(figure.nodes[1].x, figure.nodes[1].y) = b;
	}

	#[test]
	fn separated_nodes_clip_at_both_rims() {
		let mut figure = two_nodes(r#"{"source":"a","target":"b","type":"import"}"#);
		place(&mut figure, (100.0, 100.0), (200.0, 100.0));
		let r = figure.nodes[0].radius;
		assert_eq!(
			figure.edge_path(0, 1),
			Some(EdgePath::Line {
				start: (100.0 + r, 100.0),
				tip: (200.0 - r, 100.0),
				dir: (1.0, 0.0),
			})
		);
	}

	#[test]
	fn overlapping_nodes_still_get_an_arrow() {
		let mut figure = two_nodes(r#"{"source":"a","target":"b","type":"import"}"#);
		place(&mut figure, (100.0, 100.0), (104.0, 100.0));
		let r = figure.nodes[1].radius;
		assert_eq!(
			figure.edge_path(0, 1),
			Some(EdgePath::Line {
				start: (100.0, 100.0),
				tip: (104.0 - r, 100.0),
				dir: (1.0, 0.0),
			})
		);

		place(&mut figure, (50.0, 50.0), (50.0, 50.0));
		assert_eq!(figure.edge_path(0, 1), None);
	}

	#[test]
	fn self_dependency_is_a_loop_above_the_node() {
		let figure = two_nodes(r#"{"source":"a","target":"a","type":"import"}"#);
		assert_eq!(figure.edges, [(0, 0)]);
		let node = &figure.nodes[0];
		let Some(EdgePath::Loop { center, radius, tip, dir }) = figure.edge_path(0, 0) else {
			panic!("expected a loop");
		};
		assert_eq!(center.0, node.x);
		assert!(center.1 < node.y);
		let on_circle = ((tip.0 - center.0).powi(2) + (tip.1 - center.1).powi(2)).sqrt();
		assert!((on_circle - radius).abs() < 1e-9);
		// heads down toward the node
		assert!(dir.1 > 0.0);
	}
}
