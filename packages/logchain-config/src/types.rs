use serde::Deserialize;
use serde_json::{Map, Value};

/// Placeholder substituted with the anchor key inside [`AnchorShape::data_template`].
pub const KEY_PLACEHOLDER: &str = "{key}";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub backend: Backend,
	pub scopes: Scopes,
	pub anchors: Anchors,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub log_level: String,
}

/// Remote log search backend.
#[derive(Debug, Clone, Deserialize)]
pub struct Backend {
	pub api_base: String,
	pub path: String,
	#[serde(default = "default_content_type")]
	pub content_type: String,
	pub timeout_ms: u64,
	/// Forwarded to the backend as the request's `pretty` flag.
	#[serde(default)]
	pub pretty: bool,
	/// Log every outgoing search payload at debug level.
	#[serde(default)]
	pub log_payload: bool,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

/// Backing file for each search scope, as seen by the backend host.
#[derive(Debug, Clone, Deserialize)]
pub struct Scopes {
	pub integration: String,
	pub object_lifecycle: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Anchors {
	/// Field shared by every entry of one chain.
	#[serde(default = "default_correlation_field")]
	pub correlation_field: String,
	pub rule: AnchorShape,
	pub object: AnchorShape,
}

/// How an anchor key is turned into search predicates.
///
/// An entry matches when `marker_field` equals `marker_value` and one element of the
/// `data_field` array has a `data_key` value containing `data_template` with the key
/// substituted for `{key}`.
#[derive(Debug, Clone, Deserialize)]
pub struct AnchorShape {
	pub marker_field: String,
	pub marker_value: String,
	pub data_field: String,
	pub data_key: String,
	#[serde(default = "default_data_template")]
	pub data_template: String,
}
impl AnchorShape {
	pub fn render(&self, key: &str) -> String {
		self.data_template.replace(KEY_PLACEHOLDER, key)
	}
}

fn default_content_type() -> String {
	"application/json".to_string()
}

fn default_correlation_field() -> String {
	"sphaera_x_operation_id".to_string()
}

fn default_data_template() -> String {
	KEY_PLACEHOLDER.to_string()
}
