//! Row models for the raw data explorer.

use crate::dataset::Dataset;

/// One organization with its strategy counts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrganizationRow {
	/// Organization code as keyed in the dataset.
	pub code: String,
	/// Organization name.
	pub name: String,
	/// Strategies across all chapters.
	pub total: usize,
	/// Strategies per chapter, chapters 1 to 3.
	pub per_chapter: [usize; 3],
}

/// One goal with its Quality of Life alignment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoalRow {
	/// Goal code as keyed in the dataset.
	pub code: String,
	/// Goal title.
	pub title: String,
	/// Chapter number.
	pub chapter: u32,
	/// Readable domain names, comma separated.
	pub qol_domains: String,
}

/// Organizations meeting the strategy threshold, in file order.
pub fn organization_rows(dataset: &Dataset, min_strategy_count: usize) -> Vec<OrganizationRow> {
	dataset
		.organizations
		.iter()
		.filter(|(_, org)| org.strategy_count() >= min_strategy_count)
		.map(|(code, org)| OrganizationRow {
			code: code.clone(),
			name: org.name.clone(),
			total: org.strategy_count(),
			per_chapter: [
				org.chapter1_strategies.len(),
				org.chapter2_strategies.len(),
				org.chapter3_strategies.len(),
			],
		})
		.collect()
}

/// Every goal, in file order.
pub fn goal_rows(dataset: &Dataset) -> Vec<GoalRow> {
	dataset
		.goals
		.iter()
		.map(|(code, goal)| GoalRow {
			code: code.clone(),
			title: goal.title.clone(),
			chapter: goal.chapter,
			qol_domains: goal
				.qol_domains
				.iter()
				.map(|key| title_case(&key.replace('_', " ")))
				.collect::<Vec<_>>()
				.join(", "),
		})
		.collect()
}

// Upper-cases the first letter of every alphabetic run and lower-cases the rest.
fn title_case(text: &str) -> String {
	let mut out = String::with_capacity(text.len());
	let mut in_word = false;
	for c in text.chars() {
		if c.is_alphabetic() {
			if in_word {
				out.extend(c.to_lowercase());
			} else {
				out.extend(c.to_uppercase());
			}
			in_word = true;
		} else {
			out.push(c);
			in_word = false;
		}
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::dataset::{Goal, Organization};

	fn dataset() -> Dataset {
		let mut dataset = Dataset::default();
		for (code, name, strategies) in [
			("PHAC", "Public Health Agency of Canada", 4),
			("JUS", "Justice Canada", 1),
		] {
			dataset.organizations.insert(
				code.to_string(),
				Organization {
					code: code.to_string(),
					name: name.to_string(),
					chapter1_strategies: vec!["1.1.1".to_string(); strategies],
					chapter2_strategies: vec![],
					chapter3_strategies: vec!["3.4.1".to_string()],
				},
			);
		}
		dataset.goals.insert(
			"3.4".to_string(),
			Goal {
				code: "3.4".to_string(),
				title: "Water and air quality".to_string(),
				chapter: 3,
				qol_domains: vec!["good_governance".to_string(), "HEALTH".to_string()],
			},
		);
		dataset
	}

	#[test]
	fn organization_rows_keep_file_order_and_filter() {
		let rows = organization_rows(&dataset(), 0);
		assert_eq!(rows.len(), 2);
		assert_eq!(rows[0].code, "PHAC");
		assert_eq!(rows[0].total, 5);
		assert_eq!(rows[0].per_chapter, [4, 0, 1]);

		let rows = organization_rows(&dataset(), 3);
		assert_eq!(rows.len(), 1);
		assert_eq!(rows[0].code, "PHAC");
	}

	#[test]
	fn goal_domains_are_readable() {
		let rows = goal_rows(&dataset());
		assert_eq!(rows[0].qol_domains, "Good Governance, Health");
		assert_eq!(rows[0].chapter, 3);
	}

	#[test]
	fn title_case_matches_word_boundaries() {
		assert_eq!(title_case("good governance"), "Good Governance");
		assert_eq!(title_case("well-being 2nd"), "Well-Being 2Nd");
	}
}
