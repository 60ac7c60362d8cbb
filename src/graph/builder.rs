use indexmap::IndexMap;
use log::debug;

use super::types::{Edge, Node, NodeCategory, NodeKey, NodeTable, SankeyGraph};
use crate::dataset::{Dataset, Goal, Organization, QOL_DOMAIN_ORDER, QolDomain};

/// Weight given to every goal to domain flow. The dataset carries no
/// weighting for these links.
pub const GOAL_DOMAIN_WEIGHT: u32 = 5;

const ORG_NAME_CHARS: usize = 20;

/// Reshape the dataset into a three-column Sankey graph.
///
/// Organizations with fewer than `min_strategy_count` strategies are left
/// out. Strategy codes that do not name a known goal, and goal domains that
/// are not part of the diagram, produce no edge.
pub fn build_graph(dataset: &Dataset, min_strategy_count: usize) -> SankeyGraph {
	let mut organizations: Vec<&Organization> = dataset
		.organizations
		.values()
		.filter(|org| org.strategy_count() >= min_strategy_count)
		.collect();
	organizations.sort_by(|a, b| a.code.cmp(&b.code));

	let mut goal_keys: Vec<&str> = dataset.goals.keys().map(String::as_str).collect();
	goal_keys.sort_unstable();

	let domain_keys: Vec<&str> = QOL_DOMAIN_ORDER
		.into_iter()
		.filter(|key| dataset.qol_domains.contains_key(*key))
		.collect();

	let mut nodes = Vec::with_capacity(organizations.len() + goal_keys.len() + domain_keys.len());
	nodes.extend(organizations.iter().map(|org| organization_node(org)));
	nodes.extend(goal_keys.iter().map(|key| goal_node(&dataset.goals[*key])));
	nodes.extend(domain_keys.iter().map(|key| domain_node(&dataset.qol_domains[*key])));

	let table = NodeTable::new(
		organizations.iter().map(|org| org.code.clone()),
		goal_keys.iter().map(|key| key.to_string()),
		domain_keys.iter().map(|key| key.to_string()),
	);

	let mut edges = Vec::new();

	for (org_index, org) in organizations.iter().enumerate() {
		// Goals in order of first appearance.
		let mut tally: IndexMap<String, u32> = IndexMap::new();
		for strategy in org.strategies() {
			match goal_code(strategy) {
				Some(code) if dataset.goals.contains_key(&code) => {
					*tally.entry(code).or_insert(0) += 1;
				}
				_ => debug!("{}: dropping strategy {strategy:?} with no known goal", org.code),
			}
		}

		for (code, count) in tally {
			if let Some(goal_index) = table.index_of(&NodeKey::Goal(code)) {
				edges.push(Edge {
					source: org_index,
					target: goal_index,
					weight: count,
				});
			}
		}
	}

	for key in &goal_keys {
		let Some(goal_index) = table.index_of(&NodeKey::Goal(key.to_string())) else {
			continue;
		};
		for domain in &dataset.goals[*key].qol_domains {
			match table.index_of(&NodeKey::Domain(domain.clone())) {
				Some(domain_index) => edges.push(Edge {
					source: goal_index,
					target: domain_index,
					weight: GOAL_DOMAIN_WEIGHT,
				}),
				None => debug!("Goal {key}: dropping unknown QoL domain {domain:?}"),
			}
		}
	}

	debug!(
		"Built graph with {} nodes and {} edges ({} organizations at threshold {})",
		nodes.len(),
		edges.len(),
		organizations.len(),
		min_strategy_count
	);

	SankeyGraph {
		nodes,
		edges,
		organization_count: organizations.len(),
	}
}

/// Goal code named by a strategy code: its first two dot-separated parts.
pub fn goal_code(strategy: &str) -> Option<String> {
	let mut parts = strategy.split('.');
	match (parts.next(), parts.next()) {
		(Some(chapter), Some(goal)) => Some(format!("{chapter}.{goal}")),
		_ => None,
	}
}

fn organization_node(org: &Organization) -> Node {
	let name = org.name.split('(').next().unwrap_or_default();
	let short: String = name.chars().take(ORG_NAME_CHARS).collect();
	Node {
		short_label: format!("{}\n({short}...)", org.code),
		full_label: format!("{} ({})", org.name, org.code),
		category: NodeCategory::Organization,
	}
}

fn goal_node(goal: &Goal) -> Node {
	let first_word = goal.title.split(' ').next().unwrap_or_default();
	Node {
		short_label: format!("Goal {}:\n{first_word}...", goal.code),
		full_label: format!("Goal {}: {}", goal.code, goal.title),
		category: NodeCategory::Goal,
	}
}

fn domain_node(domain: &QolDomain) -> Node {
	Node {
		short_label: format!("QoL:\n{}", domain.name),
		full_label: format!("Quality of Life Domain: {}", domain.name),
		category: NodeCategory::Domain,
	}
}
