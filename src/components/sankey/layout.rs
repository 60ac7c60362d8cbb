use std::collections::HashSet;

use crate::graph::{NodeCategory, SankeyGraph};
use crate::style::{ChartDimensions, ColorScheme};

/// A positioned node bar.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeBox {
	pub x: f64,
	pub y: f64,
	pub w: f64,
	pub h: f64,
	pub color: String,
	pub short_label: String,
	pub full_label: String,
	pub column: usize,
}

impl NodeBox {
	pub fn contains(&self, x: f64, y: f64) -> bool {
		self.h > 0.0 && x >= self.x && x <= self.x + self.w && y >= self.y && y <= self.y + self.h
	}
}

/// A positioned flow band, centred on `y0` at the source and `y1` at the target.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkBand {
	pub source: usize,
	pub target: usize,
	pub y0: f64,
	pub y1: f64,
	pub width: f64,
	pub color: String,
}

const FADE_IN_SECS: f64 = 0.15;
const FADE_OUT_SECS: f64 = 0.3;

/// Pointer focus and the flow paths traced through it.
#[derive(Clone, Debug, Default)]
pub struct HoverState {
	/// Node under the pointer.
	pub node: Option<usize>,
	/// Last hovered node, kept while its highlight fades out.
	pub focus: Option<usize>,
	/// Every node upstream or downstream of `focus`, `focus` included.
	pub traced: HashSet<usize>,
	/// Highlight strength, `0.0..=1.0`.
	pub level: f64,
}

pub struct SankeyState {
	pub nodes: Vec<NodeBox>,
	pub links: Vec<LinkBand>,
	pub background: String,
	pub text_color: String,
	pub width: f64,
	pub height: f64,
	pub hover: HoverState,
}

impl SankeyState {
	pub fn new(
		graph: &SankeyGraph,
		scheme: &ColorScheme,
		edge_colors: &[String],
		dims: ChartDimensions,
		width: f64,
	) -> Self {
		let (ml, mr, mt, mb) = dims.margin;
		let inner_w = (width - ml - mr).max(1.0);
		let inner_h = (dims.height - mt - mb).max(1.0);
		let node_w = dims.node_thickness.min(inner_w / 4.0);

		// A node is as tall as the larger of its inflow and outflow.
		let mut inflow = vec![0u64; graph.nodes.len()];
		let mut outflow = vec![0u64; graph.nodes.len()];
		for edge in &graph.edges {
			outflow[edge.source] += u64::from(edge.weight);
			inflow[edge.target] += u64::from(edge.weight);
		}
		let values: Vec<f64> = inflow
			.iter()
			.zip(&outflow)
			.map(|(i, o)| (*i.max(o)) as f64)
			.collect();

		let columns: Vec<usize> = graph.nodes.iter().map(|n| column_of(n.category)).collect();

		// One vertical scale for every column, set by the most crowded one.
		let scale = (0..3)
			.filter_map(|col| {
				let members: Vec<f64> = values
					.iter()
					.zip(&columns)
					.filter(|(v, c)| **c == col && **v > 0.0)
					.map(|(v, _)| *v)
					.collect();
				if members.is_empty() {
					return None;
				}
				let gaps = dims.node_padding * (members.len() - 1) as f64;
				Some(((inner_h - gaps).max(1.0)) / members.iter().sum::<f64>())
			})
			.fold(f64::INFINITY, f64::min);
		let scale = if scale.is_finite() { scale } else { 0.0 };

		let mut nodes = Vec::with_capacity(graph.nodes.len());
		let mut cursor = [0.0f64; 3];
		for (i, node) in graph.nodes.iter().enumerate() {
			let col = columns[i];
			let h = values[i] * scale;
			let x = ml + col as f64 * (inner_w - node_w) / 2.0;
			nodes.push(NodeBox {
				x,
				y: cursor[col],
				w: node_w,
				h,
				color: scheme.palette.get(i).copied().unwrap_or(scheme.text_color).to_string(),
				short_label: node.short_label.clone(),
				full_label: node.full_label.clone(),
				column: col,
			});
			if h > 0.0 {
				cursor[col] += h + dims.node_padding;
			}
		}

		// Centre each column vertically.
		for col in 0..3 {
			let used = (cursor[col] - dims.node_padding).max(0.0);
			let offset = mt + (inner_h - used).max(0.0) / 2.0;
			for node in nodes.iter_mut().filter(|n| n.column == col) {
				node.y += offset;
			}
		}

		let mut out_offset = vec![0.0f64; nodes.len()];
		let mut in_offset = vec![0.0f64; nodes.len()];
		let links = graph
			.edges
			.iter()
			.enumerate()
			.map(|(i, edge)| {
				let width = f64::from(edge.weight) * scale;
				let y0 = nodes[edge.source].y + out_offset[edge.source] + width / 2.0;
				let y1 = nodes[edge.target].y + in_offset[edge.target] + width / 2.0;
				out_offset[edge.source] += width;
				in_offset[edge.target] += width;
				LinkBand {
					source: edge.source,
					target: edge.target,
					y0,
					y1,
					width,
					color: edge_colors.get(i).cloned().unwrap_or_default(),
				}
			})
			.collect();

		Self {
			nodes,
			links,
			background: scheme.background.to_string(),
			text_color: scheme.text_color.to_string(),
			width,
			height: dims.height,
			hover: HoverState::default(),
		}
	}

	pub fn node_at_position(&self, x: f64, y: f64) -> Option<usize> {
		self.nodes.iter().position(|n| n.contains(x, y))
	}

	/// Point the highlight at `node`; `None` lets the current one fade out.
	pub fn set_hover(&mut self, node: Option<usize>) {
		if self.hover.node == node {
			return;
		}
		self.hover.node = node;
		if let Some(idx) = node {
			self.hover.focus = Some(idx);
			self.hover.traced = self.trace(idx);
		}
	}

	fn trace(&self, idx: usize) -> HashSet<usize> {
		let mut traced = HashSet::from([idx]);
		// Columns only link left to right, so the two walks never meet.
		for downstream in [true, false] {
			let mut frontier = vec![idx];
			while let Some(at) = frontier.pop() {
				for link in &self.links {
					let (from, to) = if downstream {
						(link.source, link.target)
					} else {
						(link.target, link.source)
					};
					if from == at && traced.insert(to) {
						frontier.push(to);
					}
				}
			}
		}
		traced
	}

	pub fn is_highlighted(&self, idx: usize) -> bool {
		self.hover.traced.contains(&idx)
	}

	pub fn is_hovered(&self, idx: usize) -> bool {
		self.hover.focus == Some(idx)
	}

	/// A band lights up when both of its ends lie on a traced path.
	pub fn is_link_highlighted(&self, link: &LinkBand) -> bool {
		self.is_highlighted(link.source) && self.is_highlighted(link.target)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.focus.is_some()
	}

	/// Advance the linear fade by `dt` seconds.
	pub fn tick(&mut self, dt: f64) {
		let hover = &mut self.hover;
		if hover.node.is_some() {
			hover.level = (hover.level + dt / FADE_IN_SECS).min(1.0);
		} else if hover.focus.is_some() {
			hover.level = (hover.level - dt / FADE_OUT_SECS).max(0.0);
			if hover.level == 0.0 {
				hover.focus = None;
				hover.traced.clear();
			}
		}
	}
}

fn column_of(category: NodeCategory) -> usize {
	match category {
		NodeCategory::Organization => 0,
		NodeCategory::Goal => 1,
		NodeCategory::Domain => 2,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{Edge, Node};
	use crate::style::{Theme, graph_colors};

	fn graph() -> SankeyGraph {
		let node = |label: &str, category| Node {
			short_label: label.to_string(),
			full_label: label.to_string(),
			category,
		};
		SankeyGraph {
			nodes: vec![
				node("A", NodeCategory::Organization),
				node("B", NodeCategory::Organization),
				node("G1", NodeCategory::Goal),
				node("G2", NodeCategory::Goal),
				node("D", NodeCategory::Domain),
			],
			edges: vec![
				Edge { source: 0, target: 2, weight: 3 },
				Edge { source: 1, target: 2, weight: 1 },
				Edge { source: 2, target: 4, weight: 5 },
			],
			organization_count: 2,
		}
	}

	fn state() -> SankeyState {
		let graph = graph();
		let (scheme, edge_colors) = graph_colors(&graph, Theme::Light, 0.4);
		let dims = ChartDimensions::for_organization_count(graph.organization_count);
		SankeyState::new(&graph, &scheme, &edge_colors, dims, 1200.0)
	}

	#[test]
	fn columns_follow_categories() {
		let s = state();
		assert_eq!(s.nodes[0].column, 0);
		assert_eq!(s.nodes[2].column, 1);
		assert_eq!(s.nodes[4].column, 2);
		assert!(s.nodes[0].x < s.nodes[2].x && s.nodes[2].x < s.nodes[4].x);
		assert!(s.nodes[4].x + s.nodes[4].w <= 1200.0);
	}

	#[test]
	fn node_height_tracks_flow() {
		let s = state();
		// G1 takes 4 in and sends 5 out.
		let unit = s.nodes[0].h / 3.0;
		assert!((s.nodes[2].h - 5.0 * unit).abs() < 1e-9);
		// G2 has no flow and is hidden.
		assert_eq!(s.nodes[3].h, 0.0);
		assert_eq!(s.node_at_position(s.nodes[3].x + 1.0, s.nodes[3].y), None);
	}

	#[test]
	fn bands_stack_inside_their_nodes() {
		let s = state();
		let into_goal: Vec<&LinkBand> = s.links.iter().filter(|l| l.target == 2).collect();
		let top = s.nodes[2].y;
		assert!((into_goal[0].y1 - into_goal[0].width / 2.0 - top).abs() < 1e-9);
		let second_top = top + into_goal[0].width;
		assert!((into_goal[1].y1 - into_goal[1].width / 2.0 - second_top).abs() < 1e-9);
	}

	#[test]
	fn hover_traces_flows_and_fades() {
		let mut s = state();
		let target = &s.nodes[2];
		let hit = s.node_at_position(target.x + 1.0, target.y + 1.0);
		assert_eq!(hit, Some(2));

		s.set_hover(hit);
		assert!(s.is_highlighted(0) && s.is_highlighted(1) && s.is_highlighted(4));
		assert!(!s.is_highlighted(3));
		for _ in 0..5 {
			s.tick(0.016);
		}
		assert!(s.hover.level > 0.5 && s.hover.level < 1.0);
		for _ in 0..10 {
			s.tick(0.016);
		}
		assert_eq!(s.hover.level, 1.0);

		s.set_hover(None);
		assert!(s.has_active_highlight() && s.is_hovered(2));
		for _ in 0..10 {
			s.tick(0.016);
		}
		assert!(s.has_active_highlight());
		for _ in 0..10 {
			s.tick(0.016);
		}
		assert!(!s.has_active_highlight());
		assert_eq!(s.hover.level, 0.0);
		assert!(!s.is_highlighted(2));
	}

	#[test]
	fn hovering_an_organization_traces_through_to_domains() {
		let mut s = state();
		s.set_hover(Some(0));
		let lit: Vec<usize> = (0..s.nodes.len()).filter(|&i| s.is_highlighted(i)).collect();
		assert_eq!(lit, [0, 2, 4]);
		let bands: Vec<(usize, usize)> = s
			.links
			.iter()
			.filter(|l| s.is_link_highlighted(l))
			.map(|l| (l.source, l.target))
			.collect();
		assert_eq!(bands, [(0, 2), (2, 4)]);

		// Moving straight to another node keeps the level and swaps the path.
		s.tick(0.3);
		s.set_hover(Some(1));
		assert_eq!(s.hover.level, 1.0);
		assert!(s.is_highlighted(1) && !s.is_highlighted(0));
	}
}
