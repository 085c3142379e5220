use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde_json::{Map, Value};

use logchain_config::{Backend, Scopes};
use logchain_domain::{AnchorCriteria, Predicate, SearchScope, timestamp};

use crate::{Error, Result};

/// Wire form of one search, as accepted by the backend's find endpoint.
#[derive(Debug, Serialize)]
pub struct SearchRequest<'a> {
	pub file_path: &'a str,
	pub find: Map<String, Value>,
	pub pretty: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub from: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub to: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub log_count: Option<u32>,
}

/// Runs one search and returns the raw response body. Makes exactly one attempt.
pub async fn search(
	backend: &Backend,
	scopes: &Scopes,
	criteria: &AnchorCriteria,
) -> Result<String> {
	let client = Client::builder().timeout(Duration::from_millis(backend.timeout_ms)).build()?;
	let url = format!("{}{}", backend.api_base, backend.path);
	let payload = serde_json::to_string(&encode_request(backend, scopes, criteria)?)?;

	if backend.log_payload {
		tracing::debug!(%payload, "Search payload.");
	}

	let res = client
		.post(&url)
		.headers(crate::request_headers(&backend.content_type, &backend.default_headers)?)
		.body(payload)
		.send()
		.await?;

	tracing::info!(endpoint = %url, scope = %criteria.scope, "Search request sent.");

	let status = res.status();

	if !status.is_success() {
		return Err(Error::Status { status: status.as_u16() });
	}

	Ok(res.text().await?)
}

pub fn encode_request<'a>(
	backend: &Backend,
	scopes: &'a Scopes,
	criteria: &AnchorCriteria,
) -> Result<SearchRequest<'a>> {
	let (from, to) = match criteria.window.as_ref() {
		Some(window) =>
			(Some(timestamp::format(&window.start())?), Some(timestamp::format(&window.end())?)),
		None => (None, None),
	};

	Ok(SearchRequest {
		file_path: scope_path(scopes, criteria.scope),
		find: find_map(&criteria.predicates),
		pretty: backend.pretty,
		from,
		to,
		log_count: criteria.max_results.map(|max| max.get()),
	})
}

pub fn scope_path(scopes: &Scopes, scope: SearchScope) -> &str {
	match scope {
		SearchScope::Integration => &scopes.integration,
		SearchScope::ObjectLifecycle => &scopes.object_lifecycle,
	}
}

fn find_map(predicates: &[Predicate]) -> Map<String, Value> {
	let mut find = Map::new();

	for predicate in predicates {
		match predicate {
			Predicate::Equals { field, value } => {
				find.insert(field.clone(), value.clone());
			},
			Predicate::Contains { field, key, value } => {
				let mut item = Map::new();

				item.insert(key.clone(), Value::String(value.clone()));

				match find.get_mut(field) {
					Some(Value::Array(items)) => items.push(Value::Object(item)),
					_ => {
						find.insert(field.clone(), Value::Array(vec![Value::Object(item)]));
					},
				}
			},
		}
	}

	find
}
