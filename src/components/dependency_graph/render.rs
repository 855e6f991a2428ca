use std::f64::consts::{FRAC_PI_2, PI};

use web_sys::CanvasRenderingContext2d;

use super::figure::{EdgePath, Figure, LEGEND_WIDTH, MARGIN, TITLE_HEIGHT};
use super::scale::VIRIDIS;

const BACKGROUND: &str = "white";
const EDGE_COLOR: &str = "gray";
const TEXT_COLOR: &str = "black";
const NODE_ALPHA: f64 = 0.85;
const ARROW_SIZE: f64 = 12.0;
const LABEL_FONT: &str = "10px sans-serif";
const TITLE_FONT: &str = "18px sans-serif";
const TICK_FONT: &str = "11px sans-serif";
const LEGEND_CAPTION: &str = "Number of Components";
const LEGEND_BAR_WIDTH: f64 = 16.0;

pub fn render(figure: &Figure, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, figure.width, figure.height);
	draw_edges(figure, ctx);
	draw_nodes(figure, ctx);
	draw_labels(figure, ctx);
	draw_title(figure, ctx);
	draw_legend(figure, ctx);
}

fn draw_edges(figure: &Figure, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str(EDGE_COLOR);
	ctx.set_line_width(1.0);

	for &(src, tgt) in &figure.edges {
		let Some(path) = figure.edge_path(src, tgt) else {
			continue;
		};
		ctx.begin_path();
		let (tip, dir) = match path {
			EdgePath::Line { start, tip, dir } => {
				ctx.move_to(start.0, start.1);
				ctx.line_to(tip.0, tip.1);
				(tip, dir)
			}
			EdgePath::Loop {
				center,
				radius,
				tip,
				dir,
			} => {
				let _ = ctx.arc(center.0, center.1, radius, 0.0, 2.0 * PI);
				(tip, dir)
			}
		};
		ctx.stroke();
		draw_arrow_head(ctx, tip, dir);
	}
}

/// Open "->" head ending at `tip`.
fn draw_arrow_head(
	ctx: &CanvasRenderingContext2d,
	(tip_x, tip_y): (f64, f64),
	(ux, uy): (f64, f64),
) {
	let (back_x, back_y) = (tip_x - ux * ARROW_SIZE, tip_y - uy * ARROW_SIZE);
	let (px, py) = (-uy * ARROW_SIZE * 0.4, ux * ARROW_SIZE * 0.4);
	ctx.begin_path();
	ctx.move_to(back_x + px, back_y + py);
	ctx.line_to(tip_x, tip_y);
	ctx.line_to(back_x - px, back_y - py);
	ctx.stroke();
}

fn draw_nodes(figure: &Figure, ctx: &CanvasRenderingContext2d) {
	for node in &figure.nodes {
		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, node.radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&node.color.css_alpha(NODE_ALPHA));
		ctx.fill();
	}
}

fn draw_labels(figure: &Figure, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(TEXT_COLOR);
	ctx.set_font(LABEL_FONT);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	for node in &figure.nodes {
		let _ = ctx.fill_text(&node.label, node.x, node.y);
	}
}

fn draw_title(figure: &Figure, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(TEXT_COLOR);
	ctx.set_font(TITLE_FONT);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text(&figure.title, figure.width / 2.0, TITLE_HEIGHT / 2.0);
}

/// Vertical colorbar: gradient bar, tick values, rotated caption.
fn draw_legend(figure: &Figure, ctx: &CanvasRenderingContext2d) {
	let (x, top) = (figure.width - LEGEND_WIDTH + MARGIN, TITLE_HEIGHT);
	let height = (figure.height - TITLE_HEIGHT - 2.0 * MARGIN).max(0.0);
	let bottom = top + height;
	if height <= 0.0 {
		return;
	}

	let gradient = ctx.create_linear_gradient(0.0, bottom, 0.0, top);
	let last = (VIRIDIS.len() - 1) as f32;
	for (i, color) in VIRIDIS.iter().enumerate() {
		let _ = gradient.add_color_stop(i as f32 / last, &color.css());
	}
	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill_rect(x, top, LEGEND_BAR_WIDTH, height);
	ctx.set_stroke_style_str(TEXT_COLOR);
	ctx.set_line_width(0.8);
	ctx.stroke_rect(x, top, LEGEND_BAR_WIDTH, height);

	ctx.set_fill_style_str(TEXT_COLOR);
	ctx.set_font(TICK_FONT);
	ctx.set_text_align("left");
	ctx.set_text_baseline("middle");
	let bar_right = x + LEGEND_BAR_WIDTH;
	for tick in figure.scale.ticks() {
		let y = bottom - figure.scale.normalize(tick) * height;
		ctx.begin_path();
		ctx.move_to(bar_right, y);
		ctx.line_to(bar_right + 4.0, y);
		ctx.stroke();
		let _ = ctx.fill_text(&tick.to_string(), bar_right + 7.0, y);
	}

	ctx.save();
	let _ = ctx.translate(bar_right + 48.0, top + height / 2.0);
	let _ = ctx.rotate(-FRAC_PI_2);
	ctx.set_font(TICK_FONT);
	ctx.set_text_align("center");
	let _ = ctx.fill_text(LEGEND_CAPTION, 0.0, 0.0);
	ctx.restore();
}
