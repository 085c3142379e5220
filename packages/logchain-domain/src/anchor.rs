use serde::Serialize;

use logchain_config::{AnchorShape, Anchors};

use crate::{AnchorCriteria, Predicate, SearchScope, TimeWindow, query};

/// Key identifying where a chain starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "key", rename_all = "snake_case")]
pub enum Anchor {
	/// A rule name; matched as a substring of the rule engine's statement payload.
	Rule(String),
	/// An object id; matched in the payload of the object's create/update operation.
	Object(String),
}
impl Anchor {
	pub fn key(&self) -> &str {
		match self {
			Self::Rule(key) | Self::Object(key) => key,
		}
	}

	pub fn scope(&self) -> SearchScope {
		match self {
			Self::Rule(_) => SearchScope::Integration,
			Self::Object(_) => SearchScope::ObjectLifecycle,
		}
	}

	pub fn predicates(&self, anchors: &Anchors) -> Vec<Predicate> {
		let shape = self.shape(anchors);

		vec![
			Predicate::equals(&shape.marker_field, shape.marker_value.as_str()),
			Predicate::contains(&shape.data_field, &shape.data_key, shape.render(self.key())),
		]
	}

	pub fn criteria(&self, anchors: &Anchors, window: Option<TimeWindow>) -> AnchorCriteria {
		query::build_anchor_query(self.scope(), self.predicates(anchors), window)
	}

	fn shape<'a>(&self, anchors: &'a Anchors) -> &'a AnchorShape {
		match self {
			Self::Rule(_) => &anchors.rule,
			Self::Object(_) => &anchors.object,
		}
	}
}
