//! Subscription state and checkout.

// self
use crate::{
	_prelude::*,
	client::{ApiClient, ApiRequest},
	http::HttpTransport,
	resources::models::CheckoutRequest,
};

/// Handle returned by [`ApiClient::subscriptions`].
#[derive(Debug)]
pub struct SubscriptionsApi<'a, T>
where
	T: ?Sized + HttpTransport,
{
	pub(crate) client: &'a ApiClient<T>,
}
impl<T> SubscriptionsApi<'_, T>
where
	T: ?Sized + HttpTransport,
{
	/// `GET /subscriptions`.
	pub async fn current(&self) -> Result<Value> {
		self.client.send(ApiRequest::get("/subscriptions")).await
	}

	/// `POST /subscriptions/create-checkout-session`; the body carries the checkout URL to
	/// redirect the user to.
	pub async fn create_checkout_session(&self, checkout: &CheckoutRequest) -> Result<Value> {
		self.client
			.send(ApiRequest::post("/subscriptions/create-checkout-session").json(checkout)?)
			.await
	}
}
