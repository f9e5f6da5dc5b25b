#![cfg(feature = "reqwest")]

// std
use std::sync::{Arc, Mutex};
// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use midnight_booker::{
	auth::{SessionEvent, TokenKind, TokenSecret},
	client::{ApiClient, ApiRequest, ReqwestApiClient},
	config::{ClientConfig, RefreshPolicy},
	error::Error,
	store::{MemoryStore, TokenStore},
};

type Events = Arc<Mutex<Vec<SessionEvent>>>;

async fn build_client(
	server: &MockServer,
	policy: RefreshPolicy,
	refresh: Option<&str>,
) -> (ReqwestApiClient, Arc<MemoryStore>, Events) {
	let store = Arc::new(MemoryStore::default());

	store.set(TokenKind::Access, "A1".into()).await.expect("Seeding access should succeed.");

	if let Some(refresh) = refresh {
		store.set(TokenKind::Refresh, refresh.into()).await.expect("Seeding refresh should succeed.");
	}

	let config = ClientConfig::builder(server.url("/api"))
		.refresh_policy(policy)
		.build()
		.expect("Mock server config should build.");
	let events = Events::default();
	let sink = events.clone();
	let client = ApiClient::new(config, store.clone()).with_observer(move |event: &SessionEvent| {
		sink.lock().expect("Event sink should not be poisoned.").push(event.clone());
	});

	(client, store, events)
}

fn stored(store: &MemoryStore, kind: TokenKind) -> Option<String> {
	store.peek(kind).as_ref().map(TokenSecret::expose).map(ToOwned::to_owned)
}

#[tokio::test]
async fn expired_access_is_refreshed_and_request_retried_once() {
	let server = MockServer::start_async().await;
	let rejected = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/bookings").header("authorization", "Bearer A1");
			then.status(401).json_body(json!({ "error": "Token has expired" }));
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/auth/refresh")
				.header("authorization", "Bearer R1")
				.body("{}");
			then.status(200).json_body(json!({ "access_token": "A2" }));
		})
		.await;
	let retried = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/bookings").header("authorization", "Bearer A2");
			then.status(200).json_body(json!({ "bookings": [] }));
		})
		.await;
	let (client, store, events) = build_client(&server, RefreshPolicy::Independent, Some("R1")).await;
	let body = client.bookings().list().await.expect("Retried request should succeed.");

	assert_eq!(body, json!({ "bookings": [] }));
	rejected.assert_hits_async(1).await;
	refresh.assert_hits_async(1).await;
	retried.assert_hits_async(1).await;
	assert_eq!(stored(&store, TokenKind::Access).as_deref(), Some("A2"));
	assert_eq!(stored(&store, TokenKind::Refresh).as_deref(), Some("R1"));
	assert_eq!(*events.lock().expect("Event sink should not be poisoned."), [
		SessionEvent::Renewed
	]);
	assert_eq!(client.refresh_metrics().successes(), 1);
}

#[tokio::test]
async fn second_unauthorized_is_returned_without_another_refresh() {
	let server = MockServer::start_async().await;
	let bookings = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/bookings");
			then.status(401).json_body(json!({ "error": "Invalid token" }));
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh");
			then.status(200).json_body(json!({ "access_token": "A2" }));
		})
		.await;
	let (client, _, _) = build_client(&server, RefreshPolicy::Independent, Some("R1")).await;
	let err = client.bookings().list().await.expect_err("Retried 401 should reach the caller.");

	assert!(err.is_unauthorized());
	assert_eq!(err.body(), Some(&json!({ "error": "Invalid token" })));
	bookings.assert_hits_async(2).await;
	refresh.assert_hits_async(1).await;
}

#[tokio::test]
async fn missing_refresh_token_returns_original_unauthorized() {
	let server = MockServer::start_async().await;
	let bookings = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/bookings");
			then.status(401).json_body(json!({ "error": "Token has expired" }));
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh");
			then.status(200).json_body(json!({ "access_token": "A2" }));
		})
		.await;
	let (client, store, events) = build_client(&server, RefreshPolicy::Independent, None).await;
	let err = client.bookings().list().await.expect_err("401 should reach the caller.");

	assert_eq!(err.status(), Some(401));
	bookings.assert_hits_async(1).await;
	refresh.assert_hits_async(0).await;
	assert_eq!(stored(&store, TokenKind::Access).as_deref(), Some("A1"));
	assert!(events.lock().expect("Event sink should not be poisoned.").is_empty());
}

#[tokio::test]
async fn failed_refresh_expires_session() {
	let server = MockServer::start_async().await;
	let bookings = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/bookings");
			then.status(401).json_body(json!({ "error": "Token has expired" }));
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh");
			then.status(401).json_body(json!({ "error": "Refresh token revoked" }));
		})
		.await;
	let (client, store, events) = build_client(&server, RefreshPolicy::Independent, Some("R1")).await;
	let err = client.bookings().list().await.expect_err("Failed refresh should end the session.");

	match &err {
		Error::SessionExpired { source } => assert_eq!(source.status(), Some(401)),
		other => panic!("Unexpected error: {other:?}"),
	}

	bookings.assert_hits_async(1).await;
	refresh.assert_hits_async(1).await;
	assert!(store.is_empty());
	assert!(matches!(
		events.lock().expect("Event sink should not be poisoned.").as_slice(),
		[SessionEvent::Expired { redirect, .. }] if redirect == "/login"
	));
	assert_eq!(client.refresh_metrics().failures(), 1);
}

#[tokio::test]
async fn validation_errors_pass_through_untouched() {
	let server = MockServer::start_async().await;
	let create = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/bookings")
				.header("authorization", "Bearer A1")
				.json_body(json!({ "destination": "Paris", "date": "2025-12-15" }));
			then.status(400).json_body(json!({ "error": "Missing required fields" }));
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh");
			then.status(200).json_body(json!({ "access_token": "A2" }));
		})
		.await;
	let (client, store, _) = build_client(&server, RefreshPolicy::Independent, Some("R1")).await;
	let request = ApiRequest::post("/bookings")
		.json(&json!({ "destination": "Paris", "date": "2025-12-15" }))
		.expect("Payload should encode.");
	let err = client.send(request).await.expect_err("400 should reach the caller.");

	assert_eq!(err.status(), Some(400));
	assert_eq!(err.body(), Some(&json!({ "error": "Missing required fields" })));
	create.assert_hits_async(1).await;
	refresh.assert_hits_async(0).await;
	assert_eq!(stored(&store, TokenKind::Access).as_deref(), Some("A1"));
}

#[tokio::test]
async fn coalesced_policy_refreshes_once_for_concurrent_rejections() {
	let server = MockServer::start_async().await;
	let rejected = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/bookings").header("authorization", "Bearer A1");
			then.status(401).json_body(json!({ "error": "Token has expired" }));
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/refresh").header("authorization", "Bearer R1");
			then.status(200).json_body(json!({ "access_token": "A2", "refresh_token": "R2" }));
		})
		.await;
	let accepted = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/bookings").header("authorization", "Bearer A2");
			then.status(200).json_body(json!({ "bookings": [] }));
		})
		.await;
	let (client, store, _) = build_client(&server, RefreshPolicy::Coalesced, Some("R1")).await;
	let (bookings_a, bookings_b) = (client.bookings(), client.bookings());
	let (first, second) = tokio::join!(bookings_a.list(), bookings_b.list());

	first.expect("First request should succeed.");
	second.expect("Second request should succeed.");
	refresh.assert_hits_async(1).await;
	accepted.assert_hits_async(2).await;
	assert!(rejected.hits_async().await <= 2);
	assert_eq!(stored(&store, TokenKind::Refresh).as_deref(), Some("R2"));
}
