use time::OffsetDateTime;

use crate::{Error, Result, timestamp};

/// Closed time range bounding an anchor search.
///
/// Both ends are kept at second precision and in the offset of `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
	start: OffsetDateTime,
	end: OffsetDateTime,
}
impl TimeWindow {
	pub fn new(start: OffsetDateTime, end: OffsetDateTime) -> Result<Self> {
		let start = timestamp::truncate_to_seconds(start)?;
		let end = timestamp::truncate_to_seconds(end)?.to_offset(start.offset());

		if start > end {
			return Err(Error::InvalidWindow {
				message: format!("start {start} is after end {end}."),
			});
		}

		Ok(Self { start, end })
	}

	pub fn parse(start: &str, end: &str) -> Result<Self> {
		Self::new(timestamp::parse(start)?, timestamp::parse(end)?)
	}

	pub fn start(&self) -> OffsetDateTime {
		self.start
	}

	pub fn end(&self) -> OffsetDateTime {
		self.end
	}
}
