mod error;
mod types;

pub use error::{Error, Result};
pub use types::{AnchorShape, Anchors, Backend, Config, KEY_PLACEHOLDER, Scopes, Service};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}

	let api_base = cfg.backend.api_base.as_str();

	if !(api_base.starts_with("http://") || api_base.starts_with("https://")) {
		return Err(Error::Validation {
			message: "backend.api_base must start with http:// or https://.".to_string(),
		});
	}
	if !cfg.backend.path.starts_with('/') {
		return Err(Error::Validation {
			message: "backend.path must start with /.".to_string(),
		});
	}
	if cfg.backend.content_type.trim().is_empty() {
		return Err(Error::Validation {
			message: "backend.content_type must be non-empty.".to_string(),
		});
	}
	if cfg.backend.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "backend.timeout_ms must be greater than zero.".to_string(),
		});
	}

	for (key, value) in &cfg.backend.default_headers {
		if !value.is_string() {
			return Err(Error::Validation {
				message: format!("backend.default_headers.{key} must be a string."),
			});
		}
	}

	for (label, path) in [
		("scopes.integration", &cfg.scopes.integration),
		("scopes.object_lifecycle", &cfg.scopes.object_lifecycle),
	] {
		if path.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	if cfg.anchors.correlation_field.trim().is_empty() {
		return Err(Error::Validation {
			message: "anchors.correlation_field must be non-empty.".to_string(),
		});
	}

	for (label, shape) in
		[("anchors.rule", &cfg.anchors.rule), ("anchors.object", &cfg.anchors.object)]
	{
		for (field, value) in [
			("marker_field", &shape.marker_field),
			("marker_value", &shape.marker_value),
			("data_field", &shape.data_field),
			("data_key", &shape.data_key),
		] {
			if value.trim().is_empty() {
				return Err(Error::Validation {
					message: format!("{label}.{field} must be non-empty."),
				});
			}
		}

		if !shape.data_template.contains(KEY_PLACEHOLDER) {
			return Err(Error::Validation {
				message: format!("{label}.data_template must contain {KEY_PLACEHOLDER}."),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.backend.api_base = cfg.backend.api_base.trim().trim_end_matches('/').to_string();
	cfg.service.log_level = cfg.service.log_level.trim().to_string();
}
