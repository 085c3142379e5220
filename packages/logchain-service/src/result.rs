use serde::Serialize;

use logchain_domain::LogEntry;

use crate::{Error, ErrorKind};

/// Outcome of one chain resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChainResult {
	/// Entries in the order the backend returned them.
	Found { entries: Vec<LogEntry> },
	/// No anchor matched, or the chain search matched nothing.
	Empty,
	Error { kind: ErrorKind, message: String },
}
impl ChainResult {
	pub fn entries(&self) -> &[LogEntry] {
		match self {
			Self::Found { entries } => entries,
			Self::Empty | Self::Error { .. } => &[],
		}
	}

	pub fn error_kind(&self) -> Option<ErrorKind> {
		match self {
			Self::Error { kind, .. } => Some(*kind),
			Self::Found { .. } | Self::Empty => None,
		}
	}
}

impl From<Error> for ChainResult {
	fn from(err: Error) -> Self {
		Self::Error { kind: err.kind, message: err.message }
	}
}
