//! RFC 3339 timestamps at second precision, the form the search backend expects for `from`
//! and `to`.

use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::Result;

pub fn parse(raw: &str) -> Result<OffsetDateTime> {
	let value = OffsetDateTime::parse(raw.trim(), &Rfc3339)?;

	truncate_to_seconds(value)
}

pub fn format(value: &OffsetDateTime) -> Result<String> {
	Ok(truncate_to_seconds(*value)?.format(&Rfc3339)?)
}

pub fn truncate_to_seconds(value: OffsetDateTime) -> Result<OffsetDateTime> {
	Ok(value.replace_nanosecond(0)?)
}

#[cfg(test)]
mod tests {
	use time::macros::datetime;

	use super::*;

	#[test]
	fn formats_without_fraction() {
		let value = datetime!(2024-03-01 10:15:30.250 +03:00);

		assert_eq!(format(&value).expect("format failed"), "2024-03-01T10:15:30+03:00");
	}

	#[test]
	fn parses_and_drops_fraction() {
		let value = parse("2024-03-01T10:15:30.999Z").expect("parse failed");

		assert_eq!(value, datetime!(2024-03-01 10:15:30 UTC));
	}

	#[test]
	fn truncation_keeps_offset_and_second() {
		let value = truncate_to_seconds(datetime!(2024-03-01 23:59:59.999999999 -05:00))
			.expect("truncate failed");

		assert_eq!(value, datetime!(2024-03-01 23:59:59 -05:00));
		assert_eq!(value.nanosecond(), 0);
	}

	#[test]
	fn rejects_naive_timestamps() {
		assert!(parse("2024-03-01T10:15:30").is_err());
	}
}
