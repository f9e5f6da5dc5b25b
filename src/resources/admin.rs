//! Administrator endpoints. The backend answers 403 for non-admin sessions; that status is
//! returned as [`Error::Api`] like any other.

// self
use crate::{
	_prelude::*,
	client::{ApiClient, ApiRequest},
	http::HttpTransport,
	resources::models::{AdminUserUpdate, BookingStatus, Pagination},
};

/// Handle returned by [`ApiClient::admin`].
#[derive(Debug)]
pub struct AdminApi<'a, T>
where
	T: ?Sized + HttpTransport,
{
	pub(crate) client: &'a ApiClient<T>,
}
impl<T> AdminApi<'_, T>
where
	T: ?Sized + HttpTransport,
{
	/// `GET /admin/users?page=&per_page=`.
	pub async fn users(&self, pagination: Pagination) -> Result<Value> {
		self.client.send(paginated("/admin/users", pagination)).await
	}

	/// `GET /admin/users/:id`.
	pub async fn user(&self, id: u64) -> Result<Value> {
		self.client.send(ApiRequest::get(format!("/admin/users/{id}"))).await
	}

	/// `PUT /admin/users/:id`.
	pub async fn update_user(&self, id: u64, update: &AdminUserUpdate) -> Result<Value> {
		self.client.send(ApiRequest::put(format!("/admin/users/{id}")).json(update)?).await
	}

	/// `GET /admin/bookings?page=&per_page=[&status=]`.
	pub async fn bookings(
		&self,
		pagination: Pagination,
		status: Option<BookingStatus>,
	) -> Result<Value> {
		self.client.send(paginated("/admin/bookings", pagination).query_opt("status", status)).await
	}

	/// `GET /admin/audit-logs?page=&per_page=[&user_id=]`.
	pub async fn audit_logs(&self, pagination: Pagination, user_id: Option<u64>) -> Result<Value> {
		self.client
			.send(paginated("/admin/audit-logs", pagination).query_opt("user_id", user_id))
			.await
	}

	/// `GET /admin/stats`.
	pub async fn stats(&self) -> Result<Value> {
		self.client.send(ApiRequest::get("/admin/stats")).await
	}
}

fn paginated(path: &str, pagination: Pagination) -> ApiRequest {
	ApiRequest::get(path).query("page", pagination.page).query("per_page", pagination.per_page)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		_preludet::ScriptedTransport, config::ClientConfig, http::HttpResponse, store::MemoryStore,
	};

	fn client(transport: ScriptedTransport) -> ApiClient<ScriptedTransport> {
		let config =
			ClientConfig::parse("http://localhost:5000/api").expect("Fixture config should parse.");

		ApiClient::with_transport(config, Arc::new(MemoryStore::default()), transport)
	}

	#[tokio::test]
	async fn listings_send_pagination_and_optional_filters() {
		let transport = ScriptedTransport::default();

		for _ in 0..4 {
			transport.push(HttpResponse::new(200, br#"{"total":0}"#.to_vec()));
		}

		let client = client(transport.clone());
		let admin = client.admin();

		admin.users(Pagination::default()).await.expect("Users should succeed.");
		admin
			.bookings(Pagination::new(2, 10), Some(BookingStatus::Failed))
			.await
			.expect("Bookings should succeed.");
		admin.bookings(Pagination::default(), None).await.expect("Bookings should succeed.");
		admin.audit_logs(Pagination::audit_logs(), Some(9)).await.expect("Logs should succeed.");

		let urls =
			transport.requests().into_iter().map(|request| request.url.to_string()).collect::<Vec<_>>();

		assert_eq!(urls, [
			"http://localhost:5000/api/admin/users?page=1&per_page=20",
			"http://localhost:5000/api/admin/bookings?page=2&per_page=10&status=failed",
			"http://localhost:5000/api/admin/bookings?page=1&per_page=20",
			"http://localhost:5000/api/admin/audit-logs?page=1&per_page=50&user_id=9",
		]);
	}

	#[tokio::test]
	async fn forbidden_is_reported_as_api_error() {
		let transport = ScriptedTransport::default();

		transport.push(HttpResponse::new(403, br#"{"error":"Admin access required"}"#.to_vec()));

		let err = client(transport.clone())
			.admin()
			.stats()
			.await
			.expect_err("Non-admin sessions should be rejected.");

		assert_eq!(err.status(), Some(403));
		assert_eq!(transport.requests().len(), 1);
	}
}
