//! Colours and sizing for the diagram.

use crate::graph::SankeyGraph;

const LIGHT_PALETTE: [&str; 15] = [
	"#2c6e8f", "#4a6fa5", "#4a5f70", "#5c8ba3", // blues
	"#2d7d6a", "#5ba375", "#6ca35e", "#8c8c46", // greens
	"#c06c6c", "#a85555", "#b85555", "#8b4f4d", // reds
	"#8B6F47", "#c9a85a", "#a3845b", // golds
];

const DARK_PALETTE: [&str; 7] = [
	"#4a7bcc", "#5a8cc4", "#4ba892", "#9bc074", "#d08080", "#e08080", "#c9a85a",
];

/// Opacity applied to edge colours.
pub const EDGE_OPACITY: f64 = 0.4;

/// Two-valued colour theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Theme {
	/// White background, dark text.
	#[default]
	Light,
	/// Near-black background, white text.
	Dark,
}

impl Theme {
	/// Display name used by the theme selector.
	pub fn label(self) -> &'static str {
		match self {
			Theme::Light => "Light",
			Theme::Dark => "Dark",
		}
	}

	/// Text colour for surrounding page content.
	pub fn text_color(self) -> &'static str {
		match self {
			Theme::Light => "#111111",
			Theme::Dark => "#ffffff",
		}
	}
}

/// Resolved colours for one rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorScheme {
	/// Canvas background.
	pub background: &'static str,
	/// Label colour.
	pub text_color: &'static str,
	/// One colour per node, in node order.
	pub palette: Vec<&'static str>,
}

/// Colours for `node_count` nodes under `theme`, cycling the theme palette.
pub fn resolve_colors(node_count: usize, theme: Theme) -> ColorScheme {
	let (background, base): (&'static str, &[&'static str]) = match theme {
		Theme::Light => ("white", LIGHT_PALETTE.as_slice()),
		Theme::Dark => ("#1a1a1a", DARK_PALETTE.as_slice()),
	};
	ColorScheme {
		background,
		text_color: theme.text_color(),
		palette: base.iter().copied().cycle().take(node_count).collect(),
	}
}

/// Convert `#rrggbb` to an `rgba(r, g, b, opacity)` string.
///
/// Anything that is not a six-digit hex colour is returned unchanged.
pub fn hex_to_rgba(color: &str, opacity: f64) -> String {
	let Some(hex) = color.strip_prefix('#') else {
		return color.to_string();
	};
	let channel = |i: usize| hex.get(i..i + 2).and_then(|c| u8::from_str_radix(c, 16).ok());
	match (channel(0), channel(2), channel(4)) {
		(Some(r), Some(g), Some(b)) => format!("rgba({r}, {g}, {b}, {opacity})"),
		_ => color.to_string(),
	}
}

/// Node and edge colours for a built graph. Edges take their source node's
/// colour at `edge_opacity`.
pub fn graph_colors(
	graph: &SankeyGraph,
	theme: Theme,
	edge_opacity: f64,
) -> (ColorScheme, Vec<String>) {
	let scheme = resolve_colors(graph.nodes.len(), theme);
	let edge_colors = graph
		.edges
		.iter()
		.map(|edge| hex_to_rgba(scheme.palette[edge.source], edge_opacity))
		.collect();
	(scheme, edge_colors)
}

/// Canvas sizing derived from how many organizations are shown.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartDimensions {
	/// Node bar width in pixels.
	pub node_thickness: f64,
	/// Vertical gap between nodes in a column.
	pub node_padding: f64,
	/// Canvas height in pixels.
	pub height: f64,
	/// Margins as (left, right, top, bottom).
	pub margin: (f64, f64, f64, f64),
}

impl ChartDimensions {
	/// Few organizations get wide bars; many get a taller canvas.
	pub fn for_organization_count(count: usize) -> Self {
		Self {
			node_thickness: if count < 10 { 250.0 } else { 50.0 },
			node_padding: 15.0,
			height: (count as f64 * 40.0).max(800.0),
			margin: (20.0, 20.0, 40.0, 80.0),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{Edge, Node, NodeCategory};

	#[test]
	fn palette_cycles_to_node_count() {
		let light = resolve_colors(40, Theme::Light);
		assert_eq!(light.background, "white");
		assert_eq!(light.text_color, "#111111");
		assert_eq!(light.palette.len(), 40);
		assert_eq!(light.palette[15], light.palette[0]);
		assert_eq!(light.palette[12], "#8B6F47");

		let dark = resolve_colors(9, Theme::Dark);
		assert_eq!(dark.background, "#1a1a1a");
		assert_eq!(dark.palette[7], "#4a7bcc");

		assert!(resolve_colors(0, Theme::Dark).palette.is_empty());
	}

	#[test]
	fn resolution_is_deterministic() {
		assert_eq!(resolve_colors(23, Theme::Light), resolve_colors(23, Theme::Light));
	}

	#[test]
	fn hex_conversion() {
		assert_eq!(hex_to_rgba("#2c6e8f", 0.4), "rgba(44, 110, 143, 0.4)");
		assert_eq!(hex_to_rgba("#8B6F47", 1.0), "rgba(139, 111, 71, 1)");
		assert_eq!(hex_to_rgba("white", 0.4), "white");
		assert_eq!(hex_to_rgba("#zz0000", 0.4), "#zz0000");
		assert_eq!(hex_to_rgba("#abc", 0.4), "#abc");
	}

	#[test]
	fn edges_inherit_source_color() {
		let node = |category| Node {
			short_label: String::new(),
			full_label: String::new(),
			category,
		};
		let graph = SankeyGraph {
			nodes: vec![node(NodeCategory::Organization), node(NodeCategory::Goal)],
			edges: vec![Edge { source: 0, target: 1, weight: 3 }],
			organization_count: 1,
		};
		let (scheme, edges) = graph_colors(&graph, Theme::Light, EDGE_OPACITY);
		assert_eq!(scheme.palette, ["#2c6e8f", "#4a6fa5"]);
		assert_eq!(edges, ["rgba(44, 110, 143, 0.4)"]);
	}

	#[test]
	fn dimensions_scale_with_organizations() {
		let few = ChartDimensions::for_organization_count(9);
		assert_eq!(few.node_thickness, 250.0);
		assert_eq!(few.height, 800.0);

		let many = ChartDimensions::for_organization_count(48);
		assert_eq!(many.node_thickness, 50.0);
		assert_eq!(many.height, 1920.0);
	}
}
