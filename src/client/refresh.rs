//! Refresh coordinator: renews the access token once per failed request.
//!
//! When a request is answered with 401 the pipeline asks [`ApiClient::renew_access`] for a new
//! access token. Without a stored refresh token nothing happens and the 401 reaches the caller.
//! Otherwise `POST {refresh_path}` is sent with the refresh token as bearer credential. A
//! successful answer overwrites the stored access token (and a rotated refresh token, when
//! present). Any failure ends the session: both tokens are cleared, the observer receives
//! [`SessionEvent::Expired`], and the caller gets [`Error::SessionExpired`].

// std
use std::sync::atomic::{AtomicU64, Ordering};
// self
use crate::{
	_prelude::*,
	auth::{SessionEvent, TokenKind, TokenSecret},
	client::{ApiClient, into_result},
	config::RefreshPolicy,
	http::{AUTHORIZATION, HttpRequest, HttpTransport, Method},
	obs::{self, CallKind, CallOutcome, CallSpan},
};

/// Thread-safe counters for refresh handshakes.
#[derive(Debug, Default)]
pub struct RefreshMetrics {
	attempts: AtomicU64,
	success: AtomicU64,
	failure: AtomicU64,
	coalesced: AtomicU64,
}
impl RefreshMetrics {
	/// Returns the number of refresh calls sent to the backend.
	pub fn attempts(&self) -> u64 {
		self.attempts.load(Ordering::Relaxed)
	}

	/// Returns the number of refresh calls that produced a new access token.
	pub fn successes(&self) -> u64 {
		self.success.load(Ordering::Relaxed)
	}

	/// Returns the number of refresh calls that ended the session.
	pub fn failures(&self) -> u64 {
		self.failure.load(Ordering::Relaxed)
	}

	/// Returns how often a waiting request reused a token renewed by another request.
	pub fn coalesced(&self) -> u64 {
		self.coalesced.load(Ordering::Relaxed)
	}

	fn record_attempt(&self) {
		self.attempts.fetch_add(1, Ordering::Relaxed);
	}

	fn record_success(&self) {
		self.success.fetch_add(1, Ordering::Relaxed);
	}

	fn record_failure(&self) {
		self.failure.fetch_add(1, Ordering::Relaxed);
	}

	fn record_coalesced(&self) {
		self.coalesced.fetch_add(1, Ordering::Relaxed);
	}
}

#[derive(Deserialize)]
struct RefreshGrant {
	access_token: TokenSecret,
	#[serde(default)]
	refresh_token: Option<TokenSecret>,
}

impl<T> ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Obtains a replacement for the access token a request was rejected with.
	///
	/// `sent_with` is the access token the rejected request carried. Under
	/// [`RefreshPolicy::Coalesced`] refreshes are serialized and a waiter whose stored token
	/// already differs from `sent_with` reuses it instead of refreshing again.
	pub async fn renew_access(&self, sent_with: Option<&str>) -> Result<Option<TokenSecret>> {
		match self.config.refresh_policy {
			RefreshPolicy::Independent => self.refresh_access_token().await,
			RefreshPolicy::Coalesced => {
				let _singleflight = self.refresh_guard.lock().await;

				if let Some(current) = self.load_token(TokenKind::Access).await {
					if Some(current.expose()) != sent_with {
						self.refresh_metrics.record_coalesced();

						return Ok(Some(current));
					}
				}

				self.refresh_access_token().await
			},
		}
	}

	/// Exchanges the stored refresh token for a new access token.
	///
	/// Returns `Ok(None)` without contacting the backend when no refresh token is stored.
	pub async fn refresh_access_token(&self) -> Result<Option<TokenSecret>> {
		const KIND: CallKind = CallKind::Refresh;

		let Some(refresh) = self.load_token(TokenKind::Refresh).await else {
			return Ok(None);
		};
		let span = CallSpan::new(KIND, "refresh_access_token");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);
		self.refresh_metrics.record_attempt();

		match span.instrument(self.exchange_refresh_token(&refresh)).await {
			Ok(grant) => {
				self.save_token(TokenKind::Access, grant.access_token.clone()).await;

				if let Some(rotated) = grant.refresh_token {
					self.save_token(TokenKind::Refresh, rotated).await;
				}

				self.refresh_metrics.record_success();
				obs::record_call_outcome(KIND, CallOutcome::Success);
				self.notify(SessionEvent::Renewed);

				Ok(Some(grant.access_token))
			},
			Err(e) => {
				self.refresh_metrics.record_failure();
				obs::record_call_outcome(KIND, CallOutcome::Failure);
				self.expire_session(&e).await;

				Err(Error::SessionExpired { source: Box::new(e) })
			},
		}
	}

	async fn exchange_refresh_token(&self, refresh: &TokenSecret) -> Result<RefreshGrant> {
		let url = self.config.endpoint(&self.config.refresh_path)?;
		let mut headers = BTreeMap::new();

		headers.insert(AUTHORIZATION.to_owned(), refresh.bearer());

		let request = HttpRequest { method: Method::Post, url, headers, body: Some(b"{}".to_vec()) };
		let response = self.transport.execute(request).await?;
		let status = response.status;
		let body = into_result(response)?;

		serde_path_to_error::deserialize(body)
			.map_err(|source| Error::Decode { source, status: Some(status) })
	}

	async fn expire_session(&self, error: &Error) {
		obs::session_expired(error);
		self.clear_session_tokens().await;
		self.notify(SessionEvent::Expired {
			redirect: self.config.login_path.clone(),
			at: OffsetDateTime::now_utc(),
		});
	}
}
