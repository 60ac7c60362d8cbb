use std::sync::Arc;

use leptos::prelude::*;

use crate::dataset::Dataset;
use crate::tables::{goal_rows, organization_rows};

/// Raw data explorer: organization strategy counts and goal alignment.
#[component]
pub fn DataTables(
	dataset: Arc<Dataset>,
	#[prop(into)] min_strategy_count: Signal<usize>,
) -> impl IntoView {
	let goals = goal_rows(&dataset);
	let org_rows = move || organization_rows(&dataset, min_strategy_count.get());

	view! {
		<section class="data-tables">
			<h2>"Raw Data Explorer"</h2>

			<h3>"Federal Organizations & Strategy Counts"</h3>
			<table>
				<thead>
					<tr>
						<th>"Code"</th>
						<th>"Organization Name"</th>
						<th>"Total Strategies"</th>
						<th>"Ch.1 Strategies"</th>
						<th>"Ch.2 Strategies"</th>
						<th>"Ch.3 Strategies"</th>
					</tr>
				</thead>
				<tbody>
					{move || {
						org_rows()
							.into_iter()
							.map(|row| {
								let [ch1, ch2, ch3] = row.per_chapter;
								view! {
									<tr>
										<td>{row.code}</td>
										<td>{row.name}</td>
										<td>{row.total}</td>
										<td>{ch1}</td>
										<td>{ch2}</td>
										<td>{ch3}</td>
									</tr>
								}
							})
							.collect_view()
					}}
				</tbody>
			</table>

			<hr />

			<h3>"FSDS Goals & QoL Alignment"</h3>
			<table>
				<thead>
					<tr>
						<th>"Goal Code"</th>
						<th>"Goal Title"</th>
						<th>"Chapter"</th>
						<th>"QoL Domains"</th>
					</tr>
				</thead>
				<tbody>
					{goals
						.into_iter()
						.map(|row| {
							view! {
								<tr>
									<td>{row.code}</td>
									<td>{row.title}</td>
									<td>{row.chapter}</td>
									<td>{row.qol_domains}</td>
								</tr>
							}
						})
						.collect_view()}
				</tbody>
			</table>
		</section>
	}
}
