use force_graph::{EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::debug;

use crate::graph::DependencyGraph;

/// Side of the square the initial positions are drawn from.
const WORLD_SIZE: f32 = 400.0;
/// Simulation charge per unit of repulsion.
const CHARGE_PER_K: f32 = 150.0 / 0.35;

/// Force simulation settings.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutParams {
	/// Seed for the initial placement.
	pub seed: u64,
	/// Simulation steps run before the layout is read back.
	pub iterations: usize,
	/// Node repulsion, as a fraction of the unit layout distance.
	pub repulsion: f32,
	/// Seconds advanced per simulation step.
	pub time_step: f32,
}

impl Default for LayoutParams {
	fn default() -> Self {
		Self {
			seed: 42,
			iterations: 100,
			repulsion: 0.35,
			time_step: 0.03,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

impl Rect {
	pub fn center(&self) -> (f64, f64) {
		(self.x + self.width / 2.0, self.y + self.height / 2.0)
	}

	/// Containment with a tolerance for rounding at the edges.
	#[cfg(test)]
	pub fn contains(&self, (x, y): (f64, f64)) -> bool {
		const EPS: f64 = 1e-6;
		x >= self.x - EPS
			&& x <= self.x + self.width + EPS
			&& y >= self.y - EPS
			&& y <= self.y + self.height + EPS
	}
}

/// Node positions in simulation space, indexed like the graph's nodes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
	positions: Vec<(f64, f64)>,
}

impl Layout {
	pub fn positions(&self) -> &[(f64, f64)] {
		&self.positions
	}

	/// Scale and center the layout into `area`, keeping its aspect ratio.
	pub fn fit(&self, area: Rect) -> Vec<(f64, f64)> {
		let finite = self
			.positions
			.iter()
			.filter(|(x, y)| x.is_finite() && y.is_finite());
		let (mut min_x, mut min_y, mut max_x, mut max_y) =
			(f64::MAX, f64::MAX, f64::MIN, f64::MIN);
		for &(x, y) in finite {
			min_x = min_x.min(x);
			min_y = min_y.min(y);
			max_x = max_x.max(x);
			max_y = max_y.max(y);
		}

		let (cx, cy) = area.center();
		let axis_scale = |extent: f64, room: f64| {
			if extent > f64::EPSILON {
				room / extent
			} else {
				f64::INFINITY
			}
		};
		let scale = axis_scale(max_x - min_x, area.width).min(axis_scale(max_y - min_y, area.height));
		if !scale.is_finite() {
			return vec![(cx, cy); self.positions.len()];
		}

		let (mid_x, mid_y) = ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
		self.positions
			.iter()
			.map(|&(x, y)| {
				if x.is_finite() && y.is_finite() {
					(cx + (x - mid_x) * scale, cy + (y - mid_y) * scale)
				} else {
					(cx, cy)
				}
			})
			.collect()
	}
}

/// Deterministic generator for the initial placement.
struct SeededRng(u64);

impl SeededRng {
	fn next_f32(&mut self) -> f32 {
		self.0 = (self.0 * 9301 + 49297) % 233280;
		self.0 as f32 / 233280.0
	}
}

/// Run a fixed number of force simulation steps from seeded positions.
pub fn compute_layout(graph: &DependencyGraph, params: &LayoutParams) -> Layout {
	let inner = graph.inner();
	let mut sim: ForceGraph<usize, ()> = ForceGraph::new(SimulationParameters {
		force_charge: params.repulsion * CHARGE_PER_K,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	});
	let mut rng = SeededRng(params.seed % 233280);

	let handles: Vec<_> = inner
		.node_indices()
		.map(|idx| {
			let (x, y) = (rng.next_f32() * WORLD_SIZE, rng.next_f32() * WORLD_SIZE);
			sim.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: idx.index(),
			})
		})
		.collect();

	for edge in inner.raw_edges() {
		let (src, tgt) = (edge.source().index(), edge.target().index());
		// direction and self-loops do not affect placement
		if src != tgt {
			sim.add_edge(handles[src], handles[tgt], EdgeData::default());
		}
	}

	for _ in 0..params.iterations {
		sim.update(params.time_step);
	}

	let mut positions = vec![(0.0, 0.0); handles.len()];
	sim.visit_nodes(|node| {
		positions[node.data.user_data] = (node.x() as f64, node.y() as f64);
	});
	debug!("Layout settled after {} iterations", params.iterations);
	Layout { positions }
}
