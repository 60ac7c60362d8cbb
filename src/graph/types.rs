use std::ops::Range;

/// Which column of the diagram a node belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeCategory {
	/// A federal organization.
	Organization,
	/// An FSDS goal.
	Goal,
	/// A Quality of Life domain.
	Domain,
}

/// Typed identity of a node, used to resolve edge endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKey {
	/// Organization code.
	Organization(String),
	/// Goal code.
	Goal(String),
	/// QoL domain key.
	Domain(String),
}

impl NodeKey {
	/// The column this key lives in.
	pub fn category(&self) -> NodeCategory {
		match self {
			NodeKey::Organization(_) => NodeCategory::Organization,
			NodeKey::Goal(_) => NodeCategory::Goal,
			NodeKey::Domain(_) => NodeCategory::Domain,
		}
	}

	fn code(&self) -> &str {
		match self {
			NodeKey::Organization(code) | NodeKey::Goal(code) | NodeKey::Domain(code) => code,
		}
	}
}

/// A diagram node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
	/// Compact label drawn on the chart.
	pub short_label: String,
	/// Untruncated label shown on hover.
	pub full_label: String,
	/// Column of the node.
	pub category: NodeCategory,
}

/// A weighted flow between two nodes, by index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
	/// Index of the source node.
	pub source: usize,
	/// Index of the target node.
	pub target: usize,
	/// Flow weight, always positive.
	pub weight: u32,
}

/// Output of the graph builder.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SankeyGraph {
	/// Nodes, organizations first, then goals, then domains.
	pub nodes: Vec<Node>,
	/// Organization to goal edges followed by goal to domain edges.
	pub edges: Vec<Edge>,
	/// How many organizations passed the strategy threshold.
	pub organization_count: usize,
}

impl SankeyGraph {
	/// Whether there is nothing to draw.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Index range of the nodes in `category`.
	pub fn category_range(&self, category: NodeCategory) -> Range<usize> {
		let start = self.nodes.iter().position(|n| n.category == category);
		match start {
			Some(start) => {
				let len = self.nodes[start..]
					.iter()
					.take_while(|n| n.category == category)
					.count();
				start..start + len
			}
			None => 0..0,
		}
	}
}

/// Dense node indices for typed keys.
///
/// Keys are stored in index order: organizations, goals, domains. The
/// organization and goal blocks are sorted by code, so lookups there are
/// binary searches; the domain block follows the canonical domain order and
/// is scanned.
#[derive(Clone, Debug, Default)]
pub struct NodeTable {
	keys: Vec<NodeKey>,
	goals_start: usize,
	domains_start: usize,
}

impl NodeTable {
	/// Build a table from the three key blocks. Organization and goal codes
	/// must already be sorted ascending.
	pub fn new<O, G, D>(organizations: O, goals: G, domains: D) -> Self
	where
		O: IntoIterator<Item = String>,
		G: IntoIterator<Item = String>,
		D: IntoIterator<Item = String>,
	{
		let mut keys: Vec<NodeKey> = organizations.into_iter().map(NodeKey::Organization).collect();
		let goals_start = keys.len();
		keys.extend(goals.into_iter().map(NodeKey::Goal));
		let domains_start = keys.len();
		keys.extend(domains.into_iter().map(NodeKey::Domain));
		debug_assert!(
			is_sorted(&keys[..goals_start]) && is_sorted(&keys[goals_start..domains_start])
		);

		Self {
			keys,
			goals_start,
			domains_start,
		}
	}

	/// Number of indexed nodes.
	pub fn len(&self) -> usize {
		self.keys.len()
	}

	/// Whether the table holds no keys.
	pub fn is_empty(&self) -> bool {
		self.keys.is_empty()
	}

	/// Keys in index order.
	pub fn keys(&self) -> &[NodeKey] {
		&self.keys
	}

	/// Index of `key`, or `None` if it is not part of the graph.
	///
	/// A code that occurs twice in a sorted block resolves to its first index.
	pub fn index_of(&self, key: &NodeKey) -> Option<usize> {
		let code = key.code();
		match key.category() {
			NodeCategory::Organization => first_match(&self.keys[..self.goals_start], code),
			NodeCategory::Goal => {
				let goals = &self.keys[self.goals_start..self.domains_start];
				first_match(goals, code).map(|i| i + self.goals_start)
			}
			NodeCategory::Domain => self.keys[self.domains_start..]
				.iter()
				.position(|k| k.code() == code)
				.map(|i| i + self.domains_start),
		}
	}
}

fn first_match(block: &[NodeKey], code: &str) -> Option<usize> {
	let i = block.partition_point(|k| k.code() < code);
	(block.get(i)?.code() == code).then_some(i)
}

fn is_sorted(block: &[NodeKey]) -> bool {
	block.windows(2).all(|w| w[0].code() <= w[1].code())
}
