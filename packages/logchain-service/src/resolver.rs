use serde_json::Value;

use logchain_domain::{
	Anchor, AnchorCriteria, BackendRecord, Predicate, SearchScope, TimeWindow, query,
};

use crate::{ChainResult, ChainService, Error, ErrorKind, Result, shaper};

impl ChainService {
	pub async fn get_chain_for_rule(&self, rule_name: &str, window: TimeWindow) -> ChainResult {
		self.get_chain(&Anchor::Rule(rule_name.to_string()), window).await
	}

	pub async fn get_chain_for_object(&self, object_id: &str, window: TimeWindow) -> ChainResult {
		self.get_chain(&Anchor::Object(object_id.to_string()), window).await
	}

	pub async fn get_chain(&self, anchor: &Anchor, window: TimeWindow) -> ChainResult {
		if anchor.key().trim().is_empty() {
			return Error::new(ErrorKind::InvalidRequest, "Anchor key must be non-empty.").into();
		}

		self.resolve(anchor.criteria(&self.cfg.anchors, Some(window))).await
	}

	/// Finds the first entry matching `predicates` inside `window`, then returns every entry in
	/// `scope` sharing its correlation id.
	///
	/// Issues at most two searches. Any failure ends the resolution without a partial result.
	pub async fn resolve_chain(
		&self,
		scope: SearchScope,
		predicates: Vec<Predicate>,
		window: Option<TimeWindow>,
	) -> ChainResult {
		self.resolve(query::build_anchor_query(scope, predicates, window)).await
	}

	async fn resolve(&self, anchor_query: AnchorCriteria) -> ChainResult {
		let scope = anchor_query.scope;

		match self.try_resolve(anchor_query).await {
			Ok(result) => result,
			Err(err) => {
				tracing::warn!(
					%scope,
					kind = %err.kind,
					message = %err.message,
					"Chain resolution failed."
				);

				err.into()
			},
		}
	}

	async fn try_resolve(&self, anchor_query: AnchorCriteria) -> Result<ChainResult> {
		let scope = anchor_query.scope;
		let raw = self.execute(&anchor_query).await?;
		let Some(anchor) = shaper::decode(&raw)?.into_iter().next() else {
			tracing::debug!(%scope, "No anchor entry matched.");

			return Ok(ChainResult::Empty);
		};
		let entry = match anchor {
			BackendRecord::Record(entry) => entry,
			BackendRecord::ErrorMarker(marker) => {
				tracing::debug!(%scope, "Anchor search returned an error marker.");

				return Ok(ChainResult::Found { entries: vec![marker] });
			},
		};
		let field = self.cfg.anchors.correlation_field.as_str();
		let Some(correlation_id) = entry.correlation_id(field) else {
			return Err(Error::new(
				ErrorKind::MissingCorrelationId,
				format!("Anchor entry has no {field} value."),
			));
		};

		if matches!(correlation_id, Value::Array(_) | Value::Object(_)) {
			return Err(Error::new(
				ErrorKind::MalformedResponse,
				format!("Anchor entry has a non-scalar {field} value: {correlation_id}."),
			));
		}

		tracing::debug!(%scope, %correlation_id, "Anchor entry matched.");

		let chain_query = query::build_chain_query(scope, field, correlation_id.clone());
		let raw = self.execute(&chain_query).await?;

		Ok(shaper::normalize(&raw))
	}

	async fn execute(&self, criteria: &AnchorCriteria) -> Result<String> {
		self.backend.search(&self.cfg, criteria).await.map_err(Error::from)
	}
}
