//! Request interceptor: resolves a logical request and attaches the stored access token.

// self
use crate::{
	_prelude::*,
	auth::{TokenKind, TokenSecret},
	client::{ApiClient, ApiRequest, PendingRequest},
	config::ClientConfig,
	error::ConfigError,
	http::{AUTHORIZATION, HttpRequest, HttpTransport},
};

impl<T> ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Builds the outbound request for `request`.
	///
	/// When the store holds an access token it is set as `Authorization: Bearer <token>`,
	/// replacing any header already on the request; without one the request goes out as built.
	/// The store is only read.
	pub async fn intercept(&self, request: &ApiRequest) -> Result<HttpRequest> {
		let token = self.load_token(TokenKind::Access).await;

		resolve(&self.config, request, token.as_ref())
	}

	/// Builds the outbound request for a pipeline attempt.
	///
	/// A retried request already carries the renewed access token and keeps it, even when the
	/// store failed to record it.
	pub(crate) async fn intercept_pending(&self, pending: &PendingRequest) -> Result<HttpRequest> {
		if pending.retried && pending.request.bearer().is_some() {
			return resolve(&self.config, &pending.request, None);
		}

		self.intercept(&pending.request).await
	}
}

fn resolve(
	config: &ClientConfig,
	request: &ApiRequest,
	token: Option<&TokenSecret>,
) -> Result<HttpRequest> {
	let mut url = config.endpoint(&request.path)?;

	if !request.query.is_empty() {
		url.query_pairs_mut().extend_pairs(&request.query);
	}

	let body = request
		.body
		.as_ref()
		.map(serde_json::to_vec)
		.transpose()
		.map_err(|source| ConfigError::Encode { source })?;
	let mut headers = request.headers.clone();

	if let Some(token) = token {
		headers.insert(AUTHORIZATION.to_owned(), token.bearer());
	}

	Ok(HttpRequest { method: request.method, url, headers, body })
}
