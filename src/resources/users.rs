//! Profile and stored travel site credentials of the signed-in user.

// self
use crate::{
	_prelude::*,
	client::{ApiClient, ApiRequest},
	http::HttpTransport,
	resources::models::{ProfileUpdate, TravelCredentials},
};

/// Handle returned by [`ApiClient::users`].
#[derive(Debug)]
pub struct UsersApi<'a, T>
where
	T: ?Sized + HttpTransport,
{
	pub(crate) client: &'a ApiClient<T>,
}
impl<T> UsersApi<'_, T>
where
	T: ?Sized + HttpTransport,
{
	/// `GET /users/profile`.
	pub async fn profile(&self) -> Result<Value> {
		self.client.send(ApiRequest::get("/users/profile")).await
	}

	/// `PUT /users/profile`.
	pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Value> {
		self.client.send(ApiRequest::put("/users/profile").json(update)?).await
	}

	/// `POST /users/credentials`.
	pub async fn save_credentials(&self, credentials: &TravelCredentials) -> Result<Value> {
		self.client.send(ApiRequest::post("/users/credentials").json(credentials)?).await
	}

	/// `GET /users/credentials`; reports whether credentials are on file.
	pub async fn check_credentials(&self) -> Result<Value> {
		self.client.send(ApiRequest::get("/users/credentials")).await
	}

	/// `DELETE /users/credentials`.
	pub async fn delete_credentials(&self) -> Result<Value> {
		self.client.send(ApiRequest::delete("/users/credentials")).await
	}
}
