//! Logical API requests and the one-shot retry wrapper carried through the pipeline.

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	error::ConfigError,
	http::{AUTHORIZATION, Method},
};

/// A request relative to the configured base URL, before authorization is applied.
#[derive(Clone, PartialEq)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: Method,
	/// Path below the base URL, starting with `/`.
	pub path: String,
	/// Query parameters appended in order.
	pub query: Vec<(String, String)>,
	/// Extra headers; names are stored lower-case.
	pub headers: BTreeMap<String, String>,
	/// JSON body, if any.
	pub body: Option<Value>,
}
impl ApiRequest {
	/// Creates a request without query, headers, or body.
	pub fn new(method: Method, path: impl Into<String>) -> Self {
		Self {
			method,
			path: path.into(),
			query: Vec::new(),
			headers: BTreeMap::new(),
			body: None,
		}
	}

	/// Shorthand for a `GET` request.
	pub fn get(path: impl Into<String>) -> Self {
		Self::new(Method::Get, path)
	}

	/// Shorthand for a `POST` request.
	pub fn post(path: impl Into<String>) -> Self {
		Self::new(Method::Post, path)
	}

	/// Shorthand for a `PUT` request.
	pub fn put(path: impl Into<String>) -> Self {
		Self::new(Method::Put, path)
	}

	/// Shorthand for a `DELETE` request.
	pub fn delete(path: impl Into<String>) -> Self {
		Self::new(Method::Delete, path)
	}

	/// Appends a query parameter.
	pub fn query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
		self.query.push((name.into(), value.to_string()));

		self
	}

	/// Appends a query parameter when `value` is present.
	pub fn query_opt(self, name: impl Into<String>, value: Option<impl ToString>) -> Self {
		match value {
			Some(value) => self.query(name, value),
			None => self,
		}
	}

	/// Sets a header, replacing any previous value.
	pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
		self.headers.insert(name.to_ascii_lowercase(), value.into());

		self
	}

	/// Serializes `body` as the JSON payload.
	pub fn json<B>(mut self, body: &B) -> Result<Self, ConfigError>
	where
		B: ?Sized + Serialize,
	{
		self.body =
			Some(serde_json::to_value(body).map_err(|source| ConfigError::Encode { source })?);

		Ok(self)
	}

	/// Overwrites the authorization header with `token`.
	pub fn set_bearer(&mut self, token: &TokenSecret) {
		self.headers.insert(AUTHORIZATION.to_owned(), token.bearer());
	}

	/// Returns the bearer token currently set on the request, if any.
	pub fn bearer(&self) -> Option<&str> {
		self.headers.get(AUTHORIZATION).and_then(|value| value.strip_prefix("Bearer "))
	}
}
impl Debug for ApiRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiRequest")
			.field("method", &self.method)
			.field("path", &self.path)
			.field("query", &self.query)
			.field("authorized", &self.headers.contains_key(AUTHORIZATION))
			.field("has_body", &self.body.is_some())
			.finish()
	}
}

/// In-flight request plus the marker that limits refresh-and-retry to a single cycle.
#[derive(Clone, Debug)]
pub struct PendingRequest {
	/// Original request configuration.
	pub request: ApiRequest,
	/// Set once the request has been through a refresh-and-retry cycle.
	pub retried: bool,
}
impl PendingRequest {
	/// Wraps a request that has not been retried yet.
	pub fn new(request: ApiRequest) -> Self {
		Self { request, retried: false }
	}

	/// Marks the request as retried; returns `false` if it already was.
	pub fn mark_retried(&mut self) -> bool {
		!std::mem::replace(&mut self.retried, true)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn builder_collects_query_headers_and_body() {
		let request = ApiRequest::get("/admin/bookings")
			.query("page", 2)
			.query("per_page", 20)
			.query_opt("status", None::<&str>)
			.header("X-Trace", "abc")
			.json(&serde_json::json!({ "destination": "Paris" }))
			.expect("JSON bodies should encode.");

		assert_eq!(request.method, Method::Get);
		assert_eq!(
			request.query,
			vec![("page".to_owned(), "2".to_owned()), ("per_page".to_owned(), "20".to_owned())]
		);
		assert_eq!(request.headers.get("x-trace").map(String::as_str), Some("abc"));
		assert_eq!(request.body, Some(serde_json::json!({ "destination": "Paris" })));
	}

	#[test]
	fn bearer_round_trips_and_debug_redacts() {
		let mut request = ApiRequest::get("/bookings");

		assert_eq!(request.bearer(), None);

		request.set_bearer(&TokenSecret::new("A2"));

		assert_eq!(request.bearer(), Some("A2"));
		assert!(!format!("{request:?}").contains("A2"));
	}

	#[test]
	fn pending_request_marks_retry_once() {
		let mut pending = PendingRequest::new(ApiRequest::get("/bookings"));

		assert!(!pending.retried);
		assert!(pending.mark_retried());
		assert!(!pending.mark_retried());
		assert!(pending.retried);
	}
}
