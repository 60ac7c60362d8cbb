//! Process-wide read-through cache for the loaded dataset.
//!
//! The dataset is read once and shared until [`invalidate`] is called.

use std::sync::Arc;

use log::debug;
use parking_lot::{RwLock, RwLockUpgradableReadGuard};

use super::error::DatasetResult;
use super::schema::Dataset;

static CACHE: RwLock<Option<Arc<Dataset>>> = RwLock::new(None);

/// The cached dataset, if one has been loaded.
pub fn get() -> Option<Arc<Dataset>> {
	CACHE.read().clone()
}

/// Replace the cached dataset and return the shared handle.
pub fn store(dataset: Dataset) -> Arc<Dataset> {
	let dataset = Arc::new(dataset);
	*CACHE.write() = Some(dataset.clone());
	debug!("Cached dataset with {} organizations", dataset.organizations.len());
	dataset
}

/// Return the cached dataset, running `loader` to fill the cache on a miss.
///
/// A failing loader leaves the cache empty so the next call retries.
pub fn get_or_load<F>(loader: F) -> DatasetResult<Arc<Dataset>>
where
	F: FnOnce() -> DatasetResult<Dataset>,
{
	let slot = CACHE.upgradable_read();
	if let Some(dataset) = slot.as_ref() {
		return Ok(dataset.clone());
	}
	let dataset = Arc::new(loader()?);
	*RwLockUpgradableReadGuard::upgrade(slot) = Some(dataset.clone());
	Ok(dataset)
}

/// Drop the cached dataset; the next read goes back to the source.
pub fn invalidate() {
	if CACHE.write().take().is_some() {
		debug!("Dataset cache invalidated");
	}
}
