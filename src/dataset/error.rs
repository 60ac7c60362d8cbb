use thiserror::Error;

/// Errors raised while locating, reading or decoding the FSDS dataset.
#[derive(Error, Debug)]
pub enum DatasetError {
	/// The data file does not exist at the configured path.
	#[error("File not found: {0}. Please ensure the JSON file is in the same directory.")]
	NotFound(String),

	/// Reading the file failed for a reason other than absence.
	#[error("Failed to read {path}: {source}")]
	Io {
		/// Path that was being read.
		path: String,
		/// Underlying I/O failure.
		#[source]
		source: std::io::Error,
	},

	/// The document parsed as JSON but does not match the expected record schema,
	/// or is not JSON at all.
	#[error("Malformed dataset: {0}")]
	MalformedDataset(String),

	/// The browser fetch of the data file failed.
	#[error("Failed to fetch {url}: {reason}")]
	Fetch {
		/// Requested URL.
		url: String,
		/// Browser-side reason (status text or JS exception).
		reason: String,
	},
}

impl DatasetError {
	/// Whether the error means the data file is simply absent, which the UI
	/// reports as a warning rather than an error.
	pub fn is_missing(&self) -> bool {
		matches!(self, DatasetError::NotFound(_))
	}
}

impl From<serde_json::Error> for DatasetError {
	fn from(err: serde_json::Error) -> Self {
		DatasetError::MalformedDataset(err.to_string())
	}
}

/// Result alias for dataset operations.
pub type DatasetResult<T> = Result<T, DatasetError>;
