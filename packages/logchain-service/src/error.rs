use std::fmt;

use serde::Serialize;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Why a chain could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
	/// Transport failure, timeout, or non-success status.
	BackendUnavailable,
	/// The response body is not the expected structure.
	MalformedResponse,
	/// The backend answered with an explicit error.
	BackendReported,
	/// The anchor entry carries no correlation id.
	MissingCorrelationId,
	InvalidRequest,
}
impl ErrorKind {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::BackendUnavailable => "BACKEND_UNAVAILABLE",
			Self::MalformedResponse => "MALFORMED_RESPONSE",
			Self::BackendReported => "BACKEND_REPORTED",
			Self::MissingCorrelationId => "MISSING_CORRELATION_ID",
			Self::InvalidRequest => "INVALID_REQUEST",
		}
	}
}

impl fmt::Display for ErrorKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct Error {
	pub kind: ErrorKind,
	pub message: String,
}
impl Error {
	pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
		Self { kind, message: message.into() }
	}
}

impl From<logchain_providers::Error> for Error {
	fn from(err: logchain_providers::Error) -> Self {
		Self::new(ErrorKind::BackendUnavailable, err.to_string())
	}
}
