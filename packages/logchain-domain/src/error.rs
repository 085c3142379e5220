pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid time window: {message}")]
	InvalidWindow { message: String },
	#[error(transparent)]
	TimeParse(#[from] time::error::Parse),
	#[error(transparent)]
	TimeFormat(#[from] time::error::Format),
	#[error(transparent)]
	TimeRange(#[from] time::error::ComponentRange),
}
