use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::layout::SankeyState;
use super::render;
use crate::config::AppConfig;
use crate::graph::SankeyGraph;
use crate::style::{ChartDimensions, Theme, graph_colors};

const DEFAULT_WIDTH: f64 = 1200.0;
const TOOLTIP_OFFSET: f64 = 12.0;

/// Canvas Sankey diagram. Short labels are drawn on the chart; hovering a
/// node shows its full label and highlights the flows through it.
#[component]
pub fn SankeyCanvas(
	#[prop(into)] graph: Signal<SankeyGraph>,
	#[prop(into)] theme: Signal<Theme>,
	#[prop(default = None)] width: Option<f64>,
) -> impl IntoView {
	let edge_opacity = use_context::<AppConfig>().unwrap_or_default().edge_opacity;
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<SankeyState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let tooltip = RwSignal::new(None::<(String, f64, f64)>);
	let (state_init, animate_init) = (state.clone(), animate.clone());

	// Rebuilds the layout whenever the graph or theme changes; the frame loop
	// is started once and keeps drawing whatever layout is current.
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (graph, theme) = (graph.get(), theme.get());

		let w = width.unwrap_or_else(|| {
			canvas
				.parent_element()
				.map(|p| p.client_width() as f64)
				.filter(|w| *w > 0.0)
				.unwrap_or(DEFAULT_WIDTH)
		});
		let dims = ChartDimensions::for_organization_count(graph.organization_count);
		canvas.set_width(w as u32);
		canvas.set_height(dims.height as u32);

		let (scheme, edge_colors) = graph_colors(&graph, theme, edge_opacity);
		*state_init.borrow_mut() = Some(SankeyState::new(&graph, &scheme, &edge_colors, dims, w));
		tooltip.set(None);
		debug!(
			"Laid out {} nodes and {} links at {}x{}",
			graph.nodes.len(),
			graph.edges.len(),
			w,
			dims.height
		);

		if animate_init.borrow().is_some() {
			return;
		}
		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("2d canvas context unavailable");
			return;
		};

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(0.016);
				render::render(s, &ctx);
			}
			if let (Some(cb), Some(window)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let (Some(cb), Some(window)) = (&*animate_init.borrow(), web_sys::window()) {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut s) = *state_mm.borrow_mut() {
			let hovered = s.node_at_position(x, y);
			s.set_hover(hovered);
			tooltip.set(hovered.map(|idx| (s.nodes[idx].full_label.clone(), x, y)));
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.set_hover(None);
		}
		tooltip.set(None);
	};

	view! {
		<div class="sankey-chart" style="position: relative;">
			<canvas
				node_ref=canvas_ref
				class="sankey-canvas"
				on:mousemove=on_mousemove
				on:mouseleave=on_mouseleave
				style="display: block;"
			/>
			{move || {
				tooltip
					.get()
					.map(|(label, x, y)| {
						let style = format!(
							"position: absolute; left: {}px; top: {}px; pointer-events: none;",
							x + TOOLTIP_OFFSET,
							y + TOOLTIP_OFFSET,
						);
						view! { <div class="sankey-tooltip" style=style>{label}</div> }
					})
			}}
		</div>
	}
}
