use web_sys::CanvasRenderingContext2d;

use super::layout::{LinkBand, NodeBox, SankeyState};

const FONT_SIZE: f64 = 12.0;
const LABEL_GAP: f64 = 6.0;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &SankeyState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(&state.background);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_links(state, ctx);
	draw_nodes(state, ctx);
	draw_labels(state, ctx);
}

fn draw_links(state: &SankeyState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.level),
	);

	for link in &state.links {
		if link.width <= 0.0 {
			continue;
		}
		// t=0: every band at full colour, t=1: touching bands brighten, the rest fade
		let alpha = if !has_highlight {
			1.0
		} else if state.is_link_highlighted(link) {
			1.0 + 0.5 * t
		} else {
			1.0 - 0.75 * t
		};

		ctx.set_global_alpha(alpha.min(1.0));
		ctx.set_stroke_style_str(&link.color);
		ctx.set_line_width(link.width);
		trace_band(ctx, &state.nodes[link.source], &state.nodes[link.target], link);
		ctx.stroke();

		if alpha > 1.0 {
			// Second pass deepens highlighted bands beyond the base opacity.
			ctx.set_global_alpha(alpha - 1.0);
			trace_band(ctx, &state.nodes[link.source], &state.nodes[link.target], link);
			ctx.stroke();
		}
	}
	ctx.set_global_alpha(1.0);
}

fn trace_band(ctx: &CanvasRenderingContext2d, source: &NodeBox, target: &NodeBox, link: &LinkBand) {
	let (x0, x1) = (source.x + source.w, target.x);
	let mid = (x0 + x1) / 2.0;
	ctx.begin_path();
	ctx.move_to(x0, link.y0);
	ctx.bezier_curve_to(mid, link.y0, mid, link.y1, x1, link.y1);
}

fn draw_nodes(state: &SankeyState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.level),
	);

	for (idx, node) in state.nodes.iter().enumerate() {
		if node.h <= 0.0 {
			continue;
		}
		let alpha = if has_highlight && !state.is_highlighted(idx) {
			1.0 - 0.7 * t
		} else {
			1.0
		};

		ctx.set_global_alpha(alpha);
		ctx.set_fill_style_str(&node.color);
		ctx.fill_rect(node.x, node.y, node.w, node.h);

		if state.is_hovered(idx) && t > 0.01 {
			ctx.set_stroke_style_str(&state.text_color);
			ctx.set_line_width(1.5 * t);
			ctx.stroke_rect(node.x - 1.0, node.y - 1.0, node.w + 2.0, node.h + 2.0);
		}
	}
	ctx.set_global_alpha(1.0);
}

fn draw_labels(state: &SankeyState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(&state.text_color);
	ctx.set_font(&format!("{FONT_SIZE}px \"Arial Black\", sans-serif"));
	ctx.set_text_baseline("middle");

	for node in state.nodes.iter().filter(|n| n.h > 0.0) {
		// Last column labels sit left of the bar, the others to the right.
		let (x, align) = if node.column == 2 {
			(node.x - LABEL_GAP, "right")
		} else {
			(node.x + node.w + LABEL_GAP, "left")
		};
		ctx.set_text_align(align);

		let lines: Vec<&str> = node.short_label.lines().collect();
		let line_height = FONT_SIZE * 1.2;
		let top = node.y + node.h / 2.0 - line_height * (lines.len() as f64 - 1.0) / 2.0;
		for (i, line) in lines.iter().enumerate() {
			let _ = ctx.fill_text(line, x, top + i as f64 * line_height);
		}
	}
}
