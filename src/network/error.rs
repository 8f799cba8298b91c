use std::fmt;

use thiserror::Error;

/// The two static inputs the explorer loads at start-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
	Graph,
	Biography,
}

impl fmt::Display for Resource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Resource::Graph => f.write_str("relationship graph"),
			Resource::Biography => f.write_str("biography database"),
		}
	}
}

/// Failure to obtain or parse one of the input resources.
#[derive(Debug, Error)]
pub enum LoadError {
	#[error("failed to fetch {resource}: {message}")]
	Fetch { resource: Resource, message: String },

	#[error("fetching {resource} returned HTTP {status}")]
	Status { resource: Resource, status: u16 },

	#[error("malformed {resource}: {source}")]
	Malformed {
		resource: Resource,
		#[source]
		source: serde_json::Error,
	},
}

impl LoadError {
	pub fn resource(&self) -> Resource {
		match self {
			LoadError::Fetch { resource, .. }
			| LoadError::Status { resource, .. }
			| LoadError::Malformed { resource, .. } => *resource,
		}
	}
}
