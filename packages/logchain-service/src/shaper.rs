//! Turns raw backend bodies into [`ChainResult`] values. Every assumption about the shape of
//! a backend response lives here.

use serde_json::Value;

use logchain_domain::{BackendRecord, ERROR_FIELD};

use crate::{ChainResult, Error, ErrorKind, Result};

pub const NON_DECODABLE_MESSAGE: &str = "backend returned non-decodable content";

// Older backend builds spell the key with a Cyrillic "о".
const RESULT_FIELDS: [&str; 2] = ["found_logs", "found_l\u{043e}gs"];

pub fn normalize(raw: &str) -> ChainResult {
	match decode(raw) {
		Ok(records) if records.is_empty() => ChainResult::Empty,
		Ok(records) => ChainResult::Found {
			entries: records.into_iter().map(BackendRecord::into_entry).collect(),
		},
		Err(err) => err.into(),
	}
}

/// Decodes a response into its records, keeping backend order.
///
/// An empty vector means the backend matched nothing.
pub fn decode(raw: &str) -> Result<Vec<BackendRecord>> {
	let json: Value = serde_json::from_str(raw)
		.map_err(|_| Error::new(ErrorKind::MalformedResponse, NON_DECODABLE_MESSAGE))?;
	let Value::Object(mut body) = json else {
		return Err(Error::new(
			ErrorKind::MalformedResponse,
			"backend response is not a JSON object",
		));
	};

	if let Some(marker) = body.get(ERROR_FIELD)
		&& is_set(marker)
	{
		return Err(Error::new(ErrorKind::BackendReported, marker_message(marker)));
	}

	match RESULT_FIELDS.iter().find_map(|field| body.remove(*field)) {
		None | Some(Value::Null) => Ok(Vec::new()),
		Some(Value::Array(items)) => items.into_iter().map(record).collect(),
		Some(_) => Err(Error::new(ErrorKind::MalformedResponse, "found_logs is not an array")),
	}
}

fn record(item: Value) -> Result<BackendRecord> {
	match item {
		Value::Object(fields) => Ok(BackendRecord::classify(fields)),
		_ => Err(Error::new(
			ErrorKind::MalformedResponse,
			"found_logs contains a non-object entry",
		)),
	}
}

fn marker_message(marker: &Value) -> String {
	match marker {
		Value::String(message) => message.clone(),
		other => other.to_string(),
	}
}

// The backend sends `"error": null` or `""` alongside successful results.
fn is_set(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(flag) => *flag,
		Value::Number(number) => number.as_f64().map(|n| n != 0.0).unwrap_or(true),
		Value::String(text) => !text.is_empty(),
		Value::Array(items) => !items.is_empty(),
		Value::Object(fields) => !fields.is_empty(),
	}
}
