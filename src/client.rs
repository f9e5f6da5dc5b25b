//! Authenticated API client: bearer attachment, one-shot refresh-and-retry, and session state.

pub mod interceptor;
pub mod refresh;
pub mod request;

pub use refresh::RefreshMetrics;
pub use request::*;

// self
use crate::{
	_prelude::*,
	auth::{NoopObserver, Session, SessionEvent, SessionObserver, TokenKind, TokenSecret},
	config::ClientConfig,
	http::{AUTHORIZATION, HttpResponse, HttpTransport},
	obs::{self, CallKind, CallOutcome, CallSpan},
	store::TokenStore,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestApiClient = ApiClient<ReqwestHttpClient>;

/// Sends API requests with the session's bearer token and renews it transparently.
///
/// The client owns the transport, token store, configuration, and session observer so the
/// resource wrappers only describe requests. Clones share every component, including the
/// refresh metrics and the single-flight guard used by
/// [`RefreshPolicy::Coalesced`](crate::config::RefreshPolicy::Coalesced).
pub struct ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Transport used for every outbound request, refresh calls included.
	pub transport: Arc<T>,
	/// Store holding the session's access and refresh tokens.
	pub store: Arc<dyn TokenStore>,
	/// Base URL, auxiliary paths, and refresh policy.
	pub config: ClientConfig,
	/// Host hook notified about session lifecycle changes.
	pub observer: Arc<dyn SessionObserver>,
	refresh_guard: Arc<AsyncMutex<()>>,
	refresh_metrics: Arc<RefreshMetrics>,
}
impl<T> ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_transport(
		config: ClientConfig,
		store: Arc<dyn TokenStore>,
		transport: impl Into<Arc<T>>,
	) -> Self {
		Self {
			transport: transport.into(),
			store,
			config,
			observer: Arc::new(NoopObserver),
			refresh_guard: Default::default(),
			refresh_metrics: Default::default(),
		}
	}

	/// Sets or replaces the session observer.
	pub fn with_observer(mut self, observer: impl 'static + SessionObserver) -> Self {
		self.observer = Arc::new(observer);

		self
	}

	/// Returns the refresh counters shared by all clones of this client.
	pub fn refresh_metrics(&self) -> &RefreshMetrics {
		&self.refresh_metrics
	}

	/// Sends `request` through the pipeline and returns the decoded response body.
	///
	/// A 401 answer triggers at most one refresh-and-retry cycle; the retried response, success
	/// or failure, is what the caller sees. Any other status passes through unchanged: 2xx
	/// bodies are decoded, everything else becomes [`Error::Api`].
	pub async fn send(&self, request: ApiRequest) -> Result<Value> {
		const KIND: CallKind = CallKind::Request;

		let span = CallSpan::new(KIND, "send");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span.instrument(self.dispatch(PendingRequest::new(request))).await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}

	/// Reads the stored session, if an access token is present.
	pub async fn session(&self) -> Option<Session> {
		let access_token = self.load_token(TokenKind::Access).await?;
		let refresh_token = self.load_token(TokenKind::Refresh).await;

		Some(Session { access_token, refresh_token })
	}

	/// Stores a freshly issued session and notifies the observer.
	pub async fn establish_session(&self, session: Session) {
		self.save_token(TokenKind::Access, session.access_token).await;

		match session.refresh_token {
			Some(refresh) => self.save_token(TokenKind::Refresh, refresh).await,
			None => self.clear_token(TokenKind::Refresh).await,
		}

		self.notify(SessionEvent::Established);
	}

	/// Clears both tokens and notifies the observer.
	pub async fn end_session(&self) {
		self.clear_session_tokens().await;
		self.notify(SessionEvent::LoggedOut);
	}

	async fn dispatch(&self, mut pending: PendingRequest) -> Result<Value> {
		loop {
			let outbound = self.intercept_pending(&pending).await?;
			let sent_with = outbound
				.header(AUTHORIZATION)
				.and_then(|value| value.strip_prefix("Bearer "))
				.map(ToOwned::to_owned);
			let response = self.transport.execute(outbound).await?;

			if !response.is_unauthorized() || !pending.mark_retried() {
				return into_result(response);
			}

			match self.renew_access(sent_with.as_deref()).await? {
				Some(access) => {
					pending.request.set_bearer(&access);
					obs::retrying_after_refresh(pending.request.method, &pending.request.path);
				},
				None => return into_result(response),
			}
		}
	}

	pub(crate) fn notify(&self, event: SessionEvent) {
		obs::record_session_event(&event);
		self.observer.on_session_event(&event);
	}

	pub(crate) async fn load_token(&self, kind: TokenKind) -> Option<TokenSecret> {
		match self.store.get(kind).await {
			Ok(token) => token,
			Err(e) => {
				obs::store_degraded("get", kind, &e);

				None
			},
		}
	}

	pub(crate) async fn save_token(&self, kind: TokenKind, value: TokenSecret) {
		if let Err(e) = self.store.set(kind, value).await {
			obs::store_degraded("set", kind, &e);
		}
	}

	pub(crate) async fn clear_token(&self, kind: TokenKind) {
		if let Err(e) = self.store.clear(kind).await {
			obs::store_degraded("clear", kind, &e);
		}
	}

	pub(crate) async fn clear_session_tokens(&self) {
		for kind in TokenKind::ALL {
			self.clear_token(kind).await;
		}
	}
}
#[cfg(feature = "reqwest")]
impl ApiClient<ReqwestHttpClient> {
	/// Creates a client backed by a default reqwest transport.
	pub fn new(config: ClientConfig, store: Arc<dyn TokenStore>) -> Self {
		Self::with_transport(config, store, ReqwestHttpClient::default())
	}
}
impl<T> Clone for ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self {
			transport: self.transport.clone(),
			store: self.store.clone(),
			config: self.config.clone(),
			observer: self.observer.clone(),
			refresh_guard: self.refresh_guard.clone(),
			refresh_metrics: self.refresh_metrics.clone(),
		}
	}
}
impl<T> Debug for ApiClient<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiClient")
			.field("config", &self.config)
			.field("refresh_metrics", &self.refresh_metrics)
			.finish()
	}
}

/// Converts a final response into the caller-visible outcome.
pub(crate) fn into_result(response: HttpResponse) -> Result<Value> {
	if response.is_success() {
		return decode_body(&response.body, response.status);
	}

	Err(Error::Api { status: response.status, body: error_body(&response.body) })
}

fn decode_body(bytes: &[u8], status: u16) -> Result<Value> {
	if bytes.iter().all(u8::is_ascii_whitespace) {
		return Ok(Value::Null);
	}

	let mut deserializer = serde_json::Deserializer::from_slice(bytes);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| Error::Decode { source, status: Some(status) })
}

fn error_body(bytes: &[u8]) -> Value {
	if bytes.iter().all(u8::is_ascii_whitespace) {
		return Value::Null;
	}

	serde_json::from_slice(bytes)
		.unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
