//! Organization → goal → domain graph construction.

mod builder;
mod types;

pub use builder::{GOAL_DOMAIN_WEIGHT, build_graph, goal_code};
pub use types::{Edge, Node, NodeCategory, NodeKey, NodeTable, SankeyGraph};
