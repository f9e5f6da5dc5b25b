//! Logs in against a mocked backend, lets the access token expire, and shows the client renewing
//! it transparently while listing bookings.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
// self
use midnight_booker::{
	auth::SessionEvent,
	client::ApiClient,
	config::ClientConfig,
	resources::models::{self, Booking, LoginRequest},
	store::MemoryStore,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let login_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/auth/login");
			then.status(200)
				.json_body(json!({ "access_token": "demo-access-1", "refresh_token": "demo-refresh" }));
		})
		.await;
	let expired_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/bookings")
				.header("authorization", "Bearer demo-access-1");
			then.status(401).json_body(json!({ "error": "Token has expired" }));
		})
		.await;
	let refresh_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/auth/refresh")
				.header("authorization", "Bearer demo-refresh");
			then.status(200).json_body(json!({ "access_token": "demo-access-2" }));
		})
		.await;
	let bookings_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/bookings")
				.header("authorization", "Bearer demo-access-2");
			then.status(200).json_body(json!({
				"bookings": [
					{ "id": 1, "status": "pending", "destination": "Paris", "departure_date": "2025-12-15" },
					{ "id": 2, "status": "success", "destination": "Tokyo", "booking_reference": "MTB-42" }
				]
			}));
		})
		.await;
	let config = ClientConfig::parse(&server.url("/api"))?;
	let client = ApiClient::new(config, Arc::new(MemoryStore::default()))
		.with_observer(|event: &SessionEvent| println!("Session event: {event:?}."));

	client.auth().login(&LoginRequest::new("demo@example.com", "demo-password")).await?;

	let bookings: Vec<Booking> = models::decode_field(client.bookings().list().await?, "bookings")?;

	for booking in &bookings {
		println!("Booking #{} to {} is {}.", booking.id, booking.destination, booking.status);
	}

	println!("Refresh calls: {}.", client.refresh_metrics().attempts());

	login_mock.assert_async().await;
	expired_mock.assert_async().await;
	refresh_mock.assert_async().await;
	bookings_mock.assert_async().await;

	Ok(())
}
