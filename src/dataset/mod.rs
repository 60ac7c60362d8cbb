//! Loading and caching of the FSDS JSON dataset.

pub mod cache;
mod error;
mod schema;

use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use log::{info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

pub use error::{DatasetError, DatasetResult};
pub use schema::{Dataset, Goal, Organization, QOL_DOMAIN_ORDER, QolDomain, Statistics};

/// Decode a dataset document, failing on any missing top-level key or
/// mistyped record.
pub fn parse_dataset(json: &str) -> DatasetResult<Dataset> {
	let dataset: Dataset = serde_json::from_str(json)?;
	info!(
		"Loaded dataset: {} organizations, {} goals, {} QoL domains",
		dataset.organizations.len(),
		dataset.goals.len(),
		dataset.qol_domains.len()
	);
	Ok(dataset)
}

/// Read and decode a dataset from the filesystem.
pub fn load_from_path(path: impl AsRef<Path>) -> DatasetResult<Dataset> {
	let path = path.as_ref();
	let display = path.display().to_string();
	let json = match std::fs::read_to_string(path) {
		Ok(json) => json,
		Err(err) if err.kind() == ErrorKind::NotFound => {
			warn!("Dataset file missing: {display}");
			return Err(DatasetError::NotFound(display));
		}
		Err(source) => {
			return Err(DatasetError::Io {
				path: display,
				source,
			});
		}
	};
	parse_dataset(&json)
}

/// Fetch and decode a dataset served next to the application bundle.
pub async fn fetch_dataset(url: &str) -> DatasetResult<Dataset> {
	let fetch_error = |reason: String| DatasetError::Fetch {
		url: url.to_string(),
		reason,
	};

	let window = web_sys::window().ok_or_else(|| fetch_error("no window available".into()))?;
	let response = JsFuture::from(window.fetch_with_str(url))
		.await
		.map_err(|err| fetch_error(js_reason(&err)))?;
	let response: Response = response
		.dyn_into()
		.map_err(|_| fetch_error("fetch did not yield a Response".into()))?;

	if response.status() == 404 {
		warn!("Dataset file missing: {url}");
		return Err(DatasetError::NotFound(url.to_string()));
	}
	if !response.ok() {
		return Err(fetch_error(format!(
			"HTTP {} {}",
			response.status(),
			response.status_text()
		)));
	}

	let body = response.text().map_err(|err| fetch_error(js_reason(&err)))?;
	let body = JsFuture::from(body)
		.await
		.map_err(|err| fetch_error(js_reason(&err)))?;
	let json = body
		.as_string()
		.ok_or_else(|| fetch_error("response body is not text".into()))?;
	parse_dataset(&json)
}

/// Serve the dataset from the process cache, fetching it on a miss.
pub async fn fetch_cached(url: &str) -> DatasetResult<Arc<Dataset>> {
	if let Some(dataset) = cache::get() {
		return Ok(dataset);
	}
	fetch_dataset(url).await.map(cache::store)
}

fn js_reason(value: &wasm_bindgen::JsValue) -> String {
	value
		.dyn_ref::<js_sys::Error>()
		.map(|err| String::from(err.message()))
		.or_else(|| value.as_string())
		.unwrap_or_else(|| format!("{value:?}"))
}
