use std::num::NonZeroU32;

use serde_json::Value;

use crate::{AnchorCriteria, Predicate, SearchScope, TimeWindow};

/// Anchor search only needs the first match.
pub const ANCHOR_RESULT_CAP: NonZeroU32 = NonZeroU32::MIN;

pub fn build_anchor_query(
	scope: SearchScope,
	predicates: Vec<Predicate>,
	window: Option<TimeWindow>,
) -> AnchorCriteria {
	AnchorCriteria { scope, predicates, window, max_results: Some(ANCHOR_RESULT_CAP) }
}

/// Chain searches are never time-bounded; a chain may extend past the anchor window.
pub fn build_chain_query(
	scope: SearchScope,
	correlation_field: &str,
	correlation_id: impl Into<Value>,
) -> AnchorCriteria {
	AnchorCriteria {
		scope,
		predicates: vec![Predicate::equals(correlation_field, correlation_id)],
		window: None,
		max_results: None,
	}
}
