use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{error, warn};

use crate::components::DataTables;
use crate::components::sankey::SankeyCanvas;
use crate::config::AppConfig;
use crate::dataset::{self, Dataset, cache};
use crate::graph::{SankeyGraph, build_graph};
use crate::style::{Theme, resolve_colors};

macro_rules! consultation_url {
	($tail:literal) => {
		concat!(
			"https://www.canada.ca/en/environment-climate-change/corporate/transparency/",
			"consultations/share-your-throughts-draft-2026-2029-federal-sustainable-",
			"development-strategy",
			$tail
		)
	};
}

/// Sidebar link groups: heading, then `(label, url)` pairs.
const RESOURCES: [(&str, &[(&str, &str)]); 2] = [
	(
		"FSDS Documents:",
		&[
			("Consultation Draft 2026–2029", consultation_url!("/draft-strategy.html")),
			(
				"2025 FSDS Progress Report",
				concat!(
					"https://www.canada.ca/en/environment-climate-change/services/climate-change/",
					"federal-sustainable-development-strategy/strategies-reports/",
					"2025-progress-report.html"
				),
			),
		],
	),
	("Get Involved:", &[("Consultation Process Details", consultation_url!(".html"))]),
];

const CONSULTATION_DEADLINE: &str = "May 12, 2026";

#[derive(Clone, Debug)]
enum LoadState {
	Loading,
	Ready(Arc<Dataset>),
	Missing,
	Failed(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tab {
	Visualization,
	DataTables,
}

async fn load_into(state: RwSignal<LoadState>, path: String) {
	let next = match dataset::fetch_cached(&path).await {
		Ok(dataset) => LoadState::Ready(dataset),
		Err(err) if err.is_missing() => {
			warn!("{err}");
			LoadState::Missing
		}
		Err(err) => {
			error!("{err}");
			LoadState::Failed(err.to_string())
		}
	};
	state.set(next);
}

/// Dashboard page: sidebar controls, the Sankey chart and the raw data tables.
#[component]
pub fn Home() -> impl IntoView {
	let config = use_context::<AppConfig>().unwrap_or_default();
	let (theme, set_theme) = signal(config.default_theme);
	let (threshold, set_threshold) = signal(config.min_threshold);
	let (tab, set_tab) = signal(Tab::Visualization);
	let load = RwSignal::new(LoadState::Loading);

	spawn_local(load_into(load, config.data_path.clone()));

	let graph = Memo::new(move |_| {
		load.with(|state| match state {
			LoadState::Ready(dataset) => build_graph(dataset, threshold.get()),
			_ => SankeyGraph::default(),
		})
	});

	let data_path = config.data_path.clone();
	let reload = move |_| {
		cache::invalidate();
		load.set(LoadState::Loading);
		spawn_local(load_into(load, data_path.clone()));
	};

	let page_style = move || {
		let scheme = resolve_colors(0, theme.get());
		format!("background: {}; color: {};", scheme.background, scheme.text_color)
	};
	let (min_threshold, max_threshold) = (config.min_threshold, config.max_threshold);
	let slider_config = config;

	view! {
		<div class="app-layout" style=page_style>
			<aside class="sidebar">
				<h2>"Configuration"</h2>
				<fieldset>
					<legend>"Theme"</legend>
					{[Theme::Light, Theme::Dark]
						.into_iter()
						.map(move |t| {
							view! {
								<label>
									<input
										type="radio"
										name="theme"
										prop:checked=move || theme.get() == t
										on:change=move |_| set_theme.set(t)
									/>
									{t.label()}
								</label>
							}
						})
						.collect_view()}
				</fieldset>

				<hr />
				<h3>"Data Filters"</h3>
				<label for="min-strategies">"Minimum Strategy Count"</label>
				<input
					id="min-strategies"
					type="range"
					min=min_threshold.to_string()
					max=max_threshold.to_string()
					title="Filter out organizations with fewer implementation strategies."
					prop:value=move || threshold.get().to_string()
					on:input=move |ev| {
						if let Ok(value) = event_target_value(&ev).parse::<usize>() {
							set_threshold.set(slider_config.clamp_threshold(value));
						}
					}
				/>
				<p class="info">
					{move || format!("Showing organizations with {}+ strategies.", threshold.get())}
				</p>
				<button on:click=reload>"Reload data"</button>

				<hr />
				<OfficialResources />
			</aside>

			<main>
				<h1>"Consultation Draft 2026-2029 FSDS"</h1>
				<h3 class="subtitle">"Governance Architecture & Framework Alignment"</h3>
				<p>
					<i>
						"Visualizing the distribution of implementation strategies across "
						"federal organizations."
					</i>
				</p>
				<DashboardIntro />

				{move || match load.get() {
					LoadState::Loading => view! { <p>"Loading data..."</p> }.into_any(),
					LoadState::Missing => {
						view! {
							<p class="warning">
								"Please upload 'fsds_data.json' to view the visualization."
							</p>
						}
							.into_any()
					}
					LoadState::Failed(message) => {
						view! { <p class="error">{message}</p> }.into_any()
					}
					LoadState::Ready(dataset) => {
						let total_goals = dataset.statistics.total_goals;
						view! {
							<nav class="tabs">
								<button
									class:active=move || tab.get() == Tab::Visualization
									on:click=move |_| set_tab.set(Tab::Visualization)
								>
									"Visualization"
								</button>
								<button
									class:active=move || tab.get() == Tab::DataTables
									on:click=move |_| set_tab.set(Tab::DataTables)
								>
									"Data Tables"
								</button>
							</nav>
							{move || match tab.get() {
								Tab::Visualization => {
									view! {
										<p>
											"Hover over nodes to see full titles. "
											"Adjust filters in the sidebar."
										</p>
										<SankeyCanvas graph=graph theme=theme />
										<p class="caption">
											{move || {
												let orgs = graph.with(|g| g.organization_count);
												caption(orgs, total_goals)
											}}
										</p>
									}
										.into_any()
								}
								Tab::DataTables => {
									let dataset = dataset.clone();
									view! {
										<DataTables dataset=dataset min_strategy_count=threshold />
									}
										.into_any()
								}
							}}
						}
							.into_any()
					}
				}}
			</main>
		</div>
	}
}

fn caption(organizations: usize, goals: usize) -> String {
	format!(
		"Data Source: Government of Canada (2026). \
		 Displaying {organizations} Organizations linking to {goals} Goals."
	)
}

#[component]
fn OfficialResources() -> impl IntoView {
	view! {
		<section class="resources">
			<h3>"Official Resources"</h3>
			{RESOURCES
				.into_iter()
				.map(|(heading, links)| {
					view! {
						<p>
							<b>{heading}</b>
						</p>
						<ul>
							{links
								.iter()
								.map(|&(label, href)| {
									view! {
										<li>
											<a href=href target="_blank">
												{label}
											</a>
										</li>
									}
								})
								.collect_view()}
						</ul>
					}
				})
				.collect_view()}
			<div class="deadline">
				<b>"Consultation Deadline:"</b>
				<br />
				{CONSULTATION_DEADLINE}
			</div>
		</section>
	}
}

#[component]
fn DashboardIntro() -> impl IntoView {
	view! {
		<p class="intro">
			"This interactive dashboard visualizes the " <b>"whole-of-government framework"</b>
			" for sustainable development as outlined in the "
			<i>"Consultation Draft 2026–2029 Federal Sustainable Development Strategy"</i>
			" (Environment and Climate Change Canada, 2026). Under the "
			<b>"Federal Sustainable Development Act"</b>
			", this strategy reflects the collective efforts of " <b>"48 federal organizations"</b>
			" to advance shared priorities. The tool tracks how departmental commitments flow "
			"through specific " <b>"FSDS goals"</b> " to support outcomes within Canada's "
			<b>"Quality of Life Framework"</b> "."
		</p>
	}
}
