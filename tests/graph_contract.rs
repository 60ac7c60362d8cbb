use std::sync::Arc;

use fsds_sankey::dataset::{self, Dataset, cache};
use fsds_sankey::graph::{Edge, GOAL_DOMAIN_WEIGHT, NodeCategory, build_graph};
use fsds_sankey::style::{Theme, graph_colors};
use fsds_sankey::tables::organization_rows;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/fsds_data.json");

fn fixture() -> Dataset {
	dataset::load_from_path(FIXTURE).unwrap()
}

fn org_index(graph: &fsds_sankey::graph::SankeyGraph, code: &str) -> usize {
	graph
		.nodes
		.iter()
		.position(|n| {
			n.category == NodeCategory::Organization
				&& n.short_label.starts_with(&format!("{code}\n"))
		})
		.unwrap()
}

#[test]
fn fixture_builds_full_graph() {
	let graph = build_graph(&fixture(), 0);
	assert_eq!(graph.organization_count, 7);
	assert_eq!(graph.nodes.len(), 7 + 7 + 5);
	assert_eq!(graph.category_range(NodeCategory::Organization), 0..7);
	assert_eq!(graph.category_range(NodeCategory::Goal), 7..14);
	assert_eq!(graph.category_range(NodeCategory::Domain), 14..19);
	assert_eq!(graph.nodes[1].short_label, "ESDC\n(Employment and Socia...)");
	assert_eq!(
		graph.nodes[14].full_label,
		"Quality of Life Domain: Good Governance"
	);
}

#[test]
fn isc_strategies_are_tallied_by_goal() {
	let graph = build_graph(&fixture(), 0);
	let isc = org_index(&graph, "ISC");
	let edges: Vec<Edge> = graph.edges.iter().copied().filter(|e| e.source == isc).collect();
	assert_eq!(
		edges,
		[
			Edge { source: isc, target: 7, weight: 2 },
			Edge { source: isc, target: 8, weight: 1 },
			Edge { source: isc, target: 9, weight: 2 },
		]
	);
}

#[test]
fn unparseable_strategies_contribute_nothing() {
	let data = fixture();
	let graph = build_graph(&data, 0);
	let wage = org_index(&graph, "WAGE");
	let total: u32 = graph.edges.iter().filter(|e| e.source == wage).map(|e| e.weight).sum();
	assert_eq!(data.organizations["WAGE"].strategy_count(), 3);
	assert_eq!(total, 1);
}

#[test]
fn goal_domain_edges_are_constant() {
	let graph = build_graph(&fixture(), 0);
	let goal_edges: Vec<&Edge> = graph.edges.iter().filter(|e| e.source >= 7).collect();
	assert_eq!(goal_edges.len(), 13);
	assert!(goal_edges.iter().all(|e| e.weight == GOAL_DOMAIN_WEIGHT));
}

#[test]
fn organization_count_shrinks_with_threshold() {
	let data = fixture();
	let counts: Vec<usize> = (0..=15).map(|t| build_graph(&data, t).organization_count).collect();
	assert!(counts.windows(2).all(|w| w[0] >= w[1]), "{counts:?}");
	assert_eq!(counts[5], 2);
	assert_eq!(counts[15], 0);

	for t in 0..=15 {
		assert_eq!(build_graph(&data, t).organization_count, organization_rows(&data, t).len());
	}
}

#[test]
fn edge_colors_follow_source_nodes() {
	let graph = build_graph(&fixture(), 0);
	let (scheme, colors) = graph_colors(&graph, Theme::Dark, 0.4);
	assert_eq!(scheme.palette.len(), graph.nodes.len());
	assert_eq!(colors.len(), graph.edges.len());
	assert_eq!(colors[0], "rgba(74, 123, 204, 0.4)");
}

#[test]
fn dataset_is_cached_until_invalidated() {
	cache::invalidate();
	let first = cache::get_or_load(|| dataset::load_from_path(FIXTURE)).unwrap();
	let second = cache::get_or_load(|| panic!("cache miss")).unwrap();
	assert!(Arc::ptr_eq(&first, &second));

	cache::invalidate();
	let missing = cache::get_or_load(|| dataset::load_from_path("missing/fsds_data.json"));
	assert!(missing.unwrap_err().is_missing());
	assert!(cache::get().is_none());
}
