use std::{fmt, num::NonZeroU32};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::TimeWindow;

/// Named log stream the search backend can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
	Integration,
	ObjectLifecycle,
}
impl SearchScope {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Integration => "integration",
			Self::ObjectLifecycle => "object_lifecycle",
		}
	}
}

impl fmt::Display for SearchScope {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Single constraint on a log entry. All predicates of one query must hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
	/// `field` equals `value`, compared as JSON.
	Equals { field: String, value: Value },
	/// `field` is an array of objects and one of them has `key` containing `value`.
	Contains { field: String, key: String, value: String },
}
impl Predicate {
	pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
		Self::Equals { field: field.into(), value: value.into() }
	}

	pub fn contains(
		field: impl Into<String>,
		key: impl Into<String>,
		value: impl Into<String>,
	) -> Self {
		Self::Contains { field: field.into(), key: key.into(), value: value.into() }
	}
}

/// Everything the backend needs to run one search.
///
/// `window: None` searches the whole scope. `max_results: None` returns every match.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorCriteria {
	pub scope: SearchScope,
	pub predicates: Vec<Predicate>,
	pub window: Option<TimeWindow>,
	pub max_results: Option<NonZeroU32>,
}
impl AnchorCriteria {
	pub fn with_max_results(mut self, max_results: NonZeroU32) -> Self {
		self.max_results = Some(max_results);

		self
	}
}
