//! Resource clients: one method per backend operation, each sent through the authenticated
//! pipeline of [`ApiClient`].
//!
//! Handles borrow the client and carry no state of their own. Every method resolves to the raw
//! JSON body; use [`models::decode`] or [`models::decode_field`] for a typed view.

pub mod admin;
pub mod auth;
pub mod bookings;
pub mod models;
pub mod subscriptions;
pub mod users;

pub use admin::AdminApi;
pub use auth::AuthApi;
pub use bookings::BookingsApi;
pub use subscriptions::SubscriptionsApi;
pub use users::UsersApi;

// self
use crate::{client::ApiClient, http::HttpTransport};

impl<T> ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Signup, login, and current-user calls.
	pub fn auth(&self) -> AuthApi<'_, T> {
		AuthApi { client: self }
	}

	/// Profile and travel credential calls.
	pub fn users(&self) -> UsersApi<'_, T> {
		UsersApi { client: self }
	}

	/// Booking calls for the signed-in user.
	pub fn bookings(&self) -> BookingsApi<'_, T> {
		BookingsApi { client: self }
	}

	/// Subscription and checkout calls.
	pub fn subscriptions(&self) -> SubscriptionsApi<'_, T> {
		SubscriptionsApi { client: self }
	}

	/// Administrator calls.
	pub fn admin(&self) -> AdminApi<'_, T> {
		AdminApi { client: self }
	}
}
