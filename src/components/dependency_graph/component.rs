use std::cell::RefCell;
use std::rc::Rc;

use leptos::ev;
use leptos::leptos_dom::helpers::window_event_listener;
use leptos::prelude::*;
use log::{debug, error};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::figure::{Figure, figure_size};
use super::layout::{LayoutParams, compute_layout};
use super::render;
use crate::graph::DependencyGraph;

pub const DEFAULT_TITLE: &str = "File Dependency Graph";

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

/// Static drawing of a dependency graph, sized to the page.
#[component]
pub fn DependencyGraphCanvas(
	graph: DependencyGraph,
	#[prop(into, default = DEFAULT_TITLE.to_string())] title: String,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let layout = compute_layout(&graph, &LayoutParams::default());
	debug!("Computed layout for {} nodes", layout.positions().len());
	let figure: Rc<RefCell<Option<Figure>>> = Rc::new(RefCell::new(None));

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		let (w, h) = window_size(&window)
			.map(|(w, h)| figure_size(w, h))
			.unwrap_or((800.0, 600.0));
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into().ok())
		{
			Some(ctx) => ctx,
			None => {
				error!("Canvas 2d context unavailable");
				return;
			}
		};

		let fig = Figure::new(&graph, layout.clone(), title.clone(), w, h);
		render::render(&fig, &ctx);
		debug!("Rendered {} nodes, {} edges", fig.nodes.len(), fig.edges.len());
		*figure.borrow_mut() = Some(fig);

		let figure_resize = figure.clone();
		let resize = window_event_listener(ev::resize, move |_| {
			let Some((nw, nh)) = web_sys::window()
				.as_ref()
				.and_then(window_size)
				.map(|(w, h)| figure_size(w, h))
			else {
				return;
			};
			canvas.set_width(nw as u32);
			canvas.set_height(nh as u32);
			if let Some(ref mut fig) = *figure_resize.borrow_mut() {
				fig.resize(nw, nh);
				render::render(fig, &ctx);
			}
		});
		// runs before the next effect pass and on unmount
		on_cleanup(move || resize.remove());
	});

	view! { <canvas node_ref=canvas_ref class="dependency-graph-canvas" style="display: block;" /> }
}
