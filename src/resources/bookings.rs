//! Midnight booking requests of the signed-in user.

// self
use crate::{
	_prelude::*,
	client::{ApiClient, ApiRequest},
	http::HttpTransport,
	resources::models::{BookingUpdate, NewBooking},
};

/// Handle returned by [`ApiClient::bookings`].
#[derive(Debug)]
pub struct BookingsApi<'a, T>
where
	T: ?Sized + HttpTransport,
{
	pub(crate) client: &'a ApiClient<T>,
}
impl<T> BookingsApi<'_, T>
where
	T: ?Sized + HttpTransport,
{
	/// `GET /bookings`.
	pub async fn list(&self) -> Result<Value> {
		self.client.send(ApiRequest::get("/bookings")).await
	}

	/// `GET /bookings/:id`.
	pub async fn get(&self, id: u64) -> Result<Value> {
		self.client.send(ApiRequest::get(format!("/bookings/{id}"))).await
	}

	/// `POST /bookings`.
	pub async fn create(&self, booking: &NewBooking) -> Result<Value> {
		self.client.send(ApiRequest::post("/bookings").json(booking)?).await
	}

	/// `PUT /bookings/:id`.
	pub async fn update(&self, id: u64, update: &BookingUpdate) -> Result<Value> {
		self.client.send(ApiRequest::put(format!("/bookings/{id}")).json(update)?).await
	}

	/// `DELETE /bookings/:id`.
	pub async fn cancel(&self, id: u64) -> Result<Value> {
		self.client.send(ApiRequest::delete(format!("/bookings/{id}"))).await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		_preludet::ScriptedTransport,
		config::ClientConfig,
		http::{HttpResponse, Method},
		store::MemoryStore,
	};

	#[tokio::test]
	async fn operations_map_to_rest_paths() {
		let transport = ScriptedTransport::default();

		for _ in 0..5 {
			transport.push(HttpResponse::new(200, br#"{}"#.to_vec()));
		}

		let config =
			ClientConfig::parse("http://localhost:5000/api").expect("Fixture config should parse.");
		let client = ApiClient::with_transport(
			config,
			Arc::new(MemoryStore::default()),
			transport.clone(),
		);
		let bookings = client.bookings();

		bookings.list().await.expect("List should succeed.");
		bookings.get(7).await.expect("Get should succeed.");
		bookings.create(&NewBooking::default()).await.expect("Create should succeed.");
		bookings
			.update(7, &BookingUpdate { passengers: Some(3), ..Default::default() })
			.await
			.expect("Update should succeed.");
		bookings.cancel(7).await.expect("Cancel should succeed.");

		let sent = transport
			.requests()
			.into_iter()
			.map(|request| (request.method, request.url.path().to_owned()))
			.collect::<Vec<_>>();

		assert_eq!(sent, [
			(Method::Get, "/api/bookings".to_owned()),
			(Method::Get, "/api/bookings/7".to_owned()),
			(Method::Post, "/api/bookings".to_owned()),
			(Method::Put, "/api/bookings/7".to_owned()),
			(Method::Delete, "/api/bookings/7".to_owned()),
		]);
		assert_eq!(
			transport.requests()[3].body.as_deref(),
			Some(br#"{"passengers":3}"#.as_slice())
		);
	}
}
