use std::{
	sync::{Arc, Mutex},
	time::Duration,
};

use axum::{
	Router,
	extract::State,
	http::{HeaderMap, StatusCode},
	response::IntoResponse,
	routing,
};
use reqwest::header::CONTENT_TYPE;
use serde_json::{Map, Value};
use time::macros::datetime;
use tokio::{
	net::TcpListener,
	sync::{oneshot, oneshot::Sender},
};

use logchain_config::{Backend, Scopes};
use logchain_domain::{Anchor, AnchorCriteria, SearchScope, TimeWindow, build_chain_query};
use logchain_providers::{Error, search};

#[derive(Clone, Default)]
struct Captured {
	requests: Arc<Mutex<Vec<(HeaderMap, String)>>>,
}

#[derive(Clone)]
struct StubState {
	captured: Captured,
	status: StatusCode,
	body: &'static str,
	delay: Duration,
}

async fn start_search_server(state: StubState) -> (String, Sender<()>) {
	let app = Router::new().route("/findLogs", routing::post(find_logs)).with_state(state);
	let listener = TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind search server.");
	let addr = listener.local_addr().expect("Failed to read search server address.");
	let (tx, rx) = oneshot::channel();
	let server = axum::serve(listener, app).with_graceful_shutdown(async move {
		let _ = rx.await;
	});

	tokio::spawn(async move {
		let _ = server.await;
	});

	(format!("http://{addr}"), tx)
}

async fn find_logs(
	State(state): State<StubState>,
	headers: HeaderMap,
	body: String,
) -> impl IntoResponse {
	state.captured.requests.lock().unwrap_or_else(|err| err.into_inner()).push((headers, body));

	if !state.delay.is_zero() {
		tokio::time::sleep(state.delay).await;
	}

	(state.status, state.body)
}

fn stub(status: StatusCode, body: &'static str) -> StubState {
	StubState { captured: Captured::default(), status, body, delay: Duration::ZERO }
}

fn backend(api_base: String, timeout_ms: u64) -> Backend {
	let mut default_headers = Map::new();

	default_headers.insert("OkoSystemUrl".to_string(), Value::String("http://oko".to_string()));

	Backend {
		api_base,
		path: "/findLogs".to_string(),
		content_type: "application/json".to_string(),
		timeout_ms,
		pretty: true,
		log_payload: true,
		default_headers,
	}
}

fn scopes() -> Scopes {
	Scopes {
		integration: r"\\logs\integration.log".to_string(),
		object_lifecycle: r"\\logs\objects.log".to_string(),
	}
}

fn anchor_criteria() -> AnchorCriteria {
	let anchors = logchain_config::Anchors {
		correlation_field: "sphaera_x_operation_id".to_string(),
		rule: logchain_config::AnchorShape {
			marker_field: "sphaera_process".to_string(),
			marker_value: "Sphaera.Telemetry.Cep".to_string(),
			data_field: "sphaera_data".to_string(),
			data_key: "data".to_string(),
			data_template: "<statementName>{key}</statementName>".to_string(),
		},
		object: logchain_config::AnchorShape {
			marker_field: "sphaera_operation".to_string(),
			marker_value: "CreateOrUpdateElement".to_string(),
			data_field: "sphaera_data".to_string(),
			data_key: "data".to_string(),
			data_template: "{key}".to_string(),
		},
	};
	let window =
		TimeWindow::new(datetime!(2024-03-01 10:00 +03:00), datetime!(2024-03-01 10:30 +03:00))
			.expect("Window should be valid.");

	Anchor::Rule("RuleA".to_string()).criteria(&anchors, Some(window))
}

#[test]
fn builds_content_type_with_charset() {
	let headers = logchain_providers::request_headers("application/json", &Map::new())
		.expect("Failed to build headers.");
	let value = headers.get(CONTENT_TYPE).expect("Missing content type header.");

	assert_eq!(value, "application/json; charset=utf-8");
}

#[test]
fn rejects_non_string_default_headers() {
	let mut default_headers = Map::new();

	default_headers.insert("X-Count".to_string(), Value::from(3));

	let err = logchain_providers::request_headers("application/json", &default_headers)
		.expect_err("Expected non-string header to be rejected.");

	assert!(matches!(err, Error::InvalidConfig { .. }));
}

#[tokio::test]
async fn posts_anchor_request_and_returns_raw_body() {
	let state = stub(StatusCode::OK, r#"{"found_logs": []}"#);
	let captured = state.captured.clone();
	let (api_base, shutdown) = start_search_server(state).await;
	let body = search::search(&backend(api_base, 5_000), &scopes(), &anchor_criteria())
		.await
		.expect("Search should succeed.");

	assert_eq!(body, r#"{"found_logs": []}"#);

	let requests = captured.requests.lock().unwrap_or_else(|err| err.into_inner()).clone();

	assert_eq!(requests.len(), 1);

	let (headers, raw) = &requests[0];
	let sent: Value = serde_json::from_str(raw).expect("Request body must be JSON.");

	assert_eq!(
		headers.get("content-type").and_then(|value| value.to_str().ok()),
		Some("application/json; charset=utf-8")
	);
	assert_eq!(
		headers.get("okosystemurl").and_then(|value| value.to_str().ok()),
		Some("http://oko")
	);
	assert_eq!(
		sent,
		serde_json::json!({
			"file_path": r"\\logs\integration.log",
			"find": {
				"sphaera_process": "Sphaera.Telemetry.Cep",
				"sphaera_data": [{ "data": "<statementName>RuleA</statementName>" }]
			},
			"pretty": true,
			"from": "2024-03-01T10:00:00+03:00",
			"to": "2024-03-01T10:30:00+03:00",
			"log_count": 1
		})
	);

	let _ = shutdown.send(());
}

#[tokio::test]
async fn passes_non_json_bodies_through_untouched() {
	let (api_base, shutdown) =
		start_search_server(stub(StatusCode::OK, "<html>gateway</html>")).await;
	let criteria = build_chain_query(SearchScope::Integration, "sphaera_x_operation_id", "X1");
	let body = search::search(&backend(api_base, 5_000), &scopes(), &criteria)
		.await
		.expect("Search should succeed.");

	assert_eq!(body, "<html>gateway</html>");

	let _ = shutdown.send(());
}

#[tokio::test]
async fn non_success_status_is_an_error() {
	let (api_base, shutdown) =
		start_search_server(stub(StatusCode::SERVICE_UNAVAILABLE, "busy")).await;
	let err = search::search(&backend(api_base, 5_000), &scopes(), &anchor_criteria())
		.await
		.expect_err("Expected status error.");

	assert!(matches!(err, Error::Status { status: 503 }), "Unexpected error: {err:?}");

	let _ = shutdown.send(());
}

#[tokio::test]
async fn slow_backend_times_out() {
	let mut state = stub(StatusCode::OK, r#"{"found_logs": []}"#);

	state.delay = Duration::from_millis(500);

	let (api_base, shutdown) = start_search_server(state).await;
	let err = search::search(&backend(api_base, 50), &scopes(), &anchor_criteria())
		.await
		.expect_err("Expected timeout.");

	match err {
		Error::Reqwest(inner) => assert!(inner.is_timeout(), "Unexpected error: {inner:?}"),
		other => panic!("Unexpected error: {other:?}"),
	}

	let _ = shutdown.send(());
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
	let listener = TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind probe.");
	let addr = listener.local_addr().expect("Failed to read probe address.");

	drop(listener);

	let backend = backend(format!("http://{addr}"), 1_000);
	let err = search::search(&backend, &scopes(), &anchor_criteria())
		.await
		.expect_err("Expected connection error.");

	assert!(matches!(err, Error::Reqwest(_)), "Unexpected error: {err:?}");
}
