//! Application settings shared through Leptos context.

use crate::style::{EDGE_OPACITY, Theme};

/// Settings the page and chart read at start-up.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
	/// Location of the dataset, relative to the served bundle.
	pub data_path: String,
	/// Lowest value of the strategy threshold slider.
	pub min_threshold: usize,
	/// Highest value of the strategy threshold slider.
	pub max_threshold: usize,
	/// Theme selected when the page opens.
	pub default_theme: Theme,
	/// Opacity of edge colours.
	pub edge_opacity: f64,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			data_path: "fsds_data.json".to_string(),
			min_threshold: 0,
			max_threshold: 15,
			default_theme: Theme::Light,
			edge_opacity: EDGE_OPACITY,
		}
	}
}

impl AppConfig {
	/// Clamp a requested threshold into the slider range.
	pub fn clamp_threshold(&self, value: usize) -> usize {
		value.clamp(self.min_threshold, self.max_threshold)
	}
}
