use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key under which the backend reports an error, both at the top level of a response and
/// in place of a record.
pub const ERROR_FIELD: &str = "error";

/// One log record as returned by the backend. Field names and values are opaque to the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogEntry(Map<String, Value>);
impl LogEntry {
	pub fn get(&self, field: &str) -> Option<&Value> {
		self.0.get(field)
	}

	/// Returns the chain identifier stored under `field` as the backend sent it.
	///
	/// `null` and blank strings count as absent. Any other value, numbers included, is
	/// returned unchanged so the chain search can match it exactly.
	pub fn correlation_id(&self, field: &str) -> Option<&Value> {
		self.0.get(field).filter(|value| match value {
			Value::Null => false,
			Value::String(text) => !text.trim().is_empty(),
			_ => true,
		})
	}
}

impl From<Map<String, Value>> for LogEntry {
	fn from(fields: Map<String, Value>) -> Self {
		Self(fields)
	}
}

/// Element of a backend result list.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendRecord {
	Record(LogEntry),
	/// The backend put an error object where a record was expected.
	ErrorMarker(LogEntry),
}
impl BackendRecord {
	pub fn classify(fields: Map<String, Value>) -> Self {
		if fields.contains_key(ERROR_FIELD) {
			Self::ErrorMarker(fields.into())
		} else {
			Self::Record(fields.into())
		}
	}

	pub fn into_entry(self) -> LogEntry {
		match self {
			Self::Record(entry) | Self::ErrorMarker(entry) => entry,
		}
	}
}
