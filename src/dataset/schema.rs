use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Keys of the Quality of Life domains in the order they are laid out.
pub const QOL_DOMAIN_ORDER: [&str; 5] = [
	"good_governance",
	"prosperity",
	"environment",
	"health",
	"society",
];

/// The complete FSDS document as loaded from `fsds_data.json`.
///
/// Maps keep the order in which records appear in the file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
	/// Organizations keyed by organization code.
	pub organizations: IndexMap<String, Organization>,
	/// Goals keyed by goal code (`"1.1"`).
	pub goals: IndexMap<String, Goal>,
	/// Quality of Life domains keyed by domain key (`"good_governance"`).
	pub qol_domains: IndexMap<String, QolDomain>,
	/// Summary counts.
	pub statistics: Statistics,
}

/// A federal organization and its implementation strategies per chapter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
	/// Short code, e.g. `"ISC"`.
	pub code: String,
	/// Full name.
	pub name: String,
	/// Strategy codes (`"<chapter>.<goal>.<sequence>"`) listed under chapter 1.
	pub chapter1_strategies: Vec<String>,
	/// Strategy codes listed under chapter 2.
	pub chapter2_strategies: Vec<String>,
	/// Strategy codes listed under chapter 3.
	pub chapter3_strategies: Vec<String>,
}

impl Organization {
	/// All strategy codes, chapter 1 through 3, in listing order.
	pub fn strategies(&self) -> impl Iterator<Item = &str> {
		self.chapter1_strategies
			.iter()
			.chain(&self.chapter2_strategies)
			.chain(&self.chapter3_strategies)
			.map(String::as_str)
	}

	/// Total number of strategies across the three chapters.
	pub fn strategy_count(&self) -> usize {
		self.chapter1_strategies.len()
			+ self.chapter2_strategies.len()
			+ self.chapter3_strategies.len()
	}
}

/// An FSDS goal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
	/// Goal code, e.g. `"1.1"`.
	pub code: String,
	/// Goal title.
	pub title: String,
	/// Chapter the goal belongs to.
	#[serde(deserialize_with = "chapter_number")]
	pub chapter: u32,
	/// Keys of the Quality of Life domains this goal supports.
	pub qol_domains: Vec<String>,
}

/// A Quality of Life framework domain.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QolDomain {
	/// Display name.
	pub name: String,
}

/// Summary counts shipped with the dataset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
	/// Number of goals in the strategy.
	pub total_goals: usize,
	/// Number of participating organizations, when recorded.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub total_organizations: Option<usize>,
	/// Number of implementation strategies, when recorded.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub total_strategies: Option<usize>,
}

// Chapters show up both as numbers and as numeric strings.
fn chapter_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Chapter {
		Number(u32),
		Text(String),
	}

	match Chapter::deserialize(deserializer)? {
		Chapter::Number(n) => Ok(n),
		Chapter::Text(s) => s
			.trim()
			.parse()
			.map_err(|_| serde::de::Error::custom(format!("chapter must be numeric, got {s:?}"))),
	}
}
