//! Account creation, login, and identity.

// self
use crate::{
	_prelude::*,
	auth::Session,
	client::{ApiClient, ApiRequest},
	http::HttpTransport,
	resources::models::{self, AuthTokens, LoginRequest, SignupRequest},
};

/// Handle returned by [`ApiClient::auth`].
#[derive(Debug)]
pub struct AuthApi<'a, T>
where
	T: ?Sized + HttpTransport,
{
	pub(crate) client: &'a ApiClient<T>,
}
impl<T> AuthApi<'_, T>
where
	T: ?Sized + HttpTransport,
{
	/// `POST /auth/signup`; stores the issued tokens as the new session.
	pub async fn signup(&self, account: &SignupRequest) -> Result<Value> {
		let body = self.client.send(ApiRequest::post("/auth/signup").json(account)?).await?;

		self.adopt_tokens(&body).await;

		Ok(body)
	}

	/// `POST /auth/login`; stores the issued tokens as the new session.
	///
	/// Login goes through the regular pipeline, so a stale stored token is still attached.
	pub async fn login(&self, credentials: &LoginRequest) -> Result<Value> {
		let body = self.client.send(ApiRequest::post("/auth/login").json(credentials)?).await?;

		self.adopt_tokens(&body).await;

		Ok(body)
	}

	/// `GET /auth/me`.
	pub async fn current_user(&self) -> Result<Value> {
		self.client.send(ApiRequest::get("/auth/me")).await
	}

	/// Forgets the local session; the backend is not contacted.
	pub async fn logout(&self) {
		self.client.end_session().await;
	}

	async fn adopt_tokens(&self, body: &Value) {
		// Bodies without an access token leave the stored session alone.
		if let Ok(tokens) = models::decode::<AuthTokens>(body.clone()) {
			self.client.establish_session(Session::from(tokens)).await;
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		_preludet::{RecordingObserver, ScriptedTransport},
		auth::{SessionEvent, TokenKind, TokenSecret},
		config::ClientConfig,
		http::{AUTHORIZATION, HttpResponse, Method},
		store::{MemoryStore, TokenStore},
	};

	fn client(
		transport: ScriptedTransport,
	) -> (ApiClient<ScriptedTransport>, Arc<MemoryStore>, RecordingObserver) {
		let store = Arc::new(MemoryStore::default());
		let observer = RecordingObserver::default();
		let config =
			ClientConfig::parse("http://localhost:5000/api").expect("Fixture config should parse.");
		let client = ApiClient::with_transport(config, store.clone(), transport)
			.with_observer(observer.clone());

		(client, store, observer)
	}

	#[tokio::test]
	async fn login_establishes_session_from_issued_tokens() {
		let transport = ScriptedTransport::default();

		transport.push(HttpResponse::new(
			200,
			br#"{"access_token":"A1","refresh_token":"R1","user":{"id":1}}"#.to_vec(),
		));

		let (client, store, observer) = client(transport.clone());
		let body = client
			.auth()
			.login(&LoginRequest::new("a@example.com", "hunter2"))
			.await
			.expect("Login should succeed.");

		assert_eq!(body["user"]["id"], 1);
		assert_eq!(store.peek(TokenKind::Access).as_ref().map(TokenSecret::expose), Some("A1"));
		assert_eq!(store.peek(TokenKind::Refresh).as_ref().map(TokenSecret::expose), Some("R1"));
		assert_eq!(observer.events(), [SessionEvent::Established]);

		let sent = transport.requests();

		assert_eq!(sent[0].method, Method::Post);
		assert_eq!(sent[0].url.path(), "/api/auth/login");
		assert_eq!(sent[0].header(AUTHORIZATION), None);
	}

	#[tokio::test]
	async fn signup_replaces_session_and_drops_stale_refresh_token() {
		let transport = ScriptedTransport::default();

		transport.push(HttpResponse::new(
			201,
			br#"{"message":"User created successfully","access_token":"A2","user":{"id":"n/a"}}"#
				.to_vec(),
		));
		transport.push(HttpResponse::new(200, br#"{"message":"Welcome back"}"#.to_vec()));

		let (client, store, observer) = client(transport.clone());

		store.set(TokenKind::Access, "A1".into()).await.expect("Seeding should succeed.");
		store.set(TokenKind::Refresh, "R1".into()).await.expect("Seeding should succeed.");

		let account = SignupRequest {
			email: "b@example.com".into(),
			password: "hunter2".into(),
			first_name: "Bo".into(),
			last_name: "K".into(),
			timezone: None,
		};

		client.auth().signup(&account).await.expect("Signup should succeed.");

		assert_eq!(store.peek(TokenKind::Access).as_ref().map(TokenSecret::expose), Some("A2"));
		assert!(store.peek(TokenKind::Refresh).is_none());

		client
			.auth()
			.login(&LoginRequest::new("b@example.com", "hunter2"))
			.await
			.expect("Login should succeed.");

		assert_eq!(store.peek(TokenKind::Access).as_ref().map(TokenSecret::expose), Some("A2"));
		assert_eq!(observer.events(), [SessionEvent::Established]);
	}

	#[tokio::test]
	async fn rejected_login_leaves_store_untouched() {
		let transport = ScriptedTransport::default();

		transport.push(HttpResponse::new(401, br#"{"error":"Invalid credentials"}"#.to_vec()));

		let (client, store, observer) = client(transport.clone());
		let err = client
			.auth()
			.login(&LoginRequest::new("a@example.com", "wrong"))
			.await
			.expect_err("Rejected login should fail.");

		assert!(err.is_unauthorized());
		assert!(store.is_empty());
		assert!(observer.events().is_empty());
		assert_eq!(transport.requests().len(), 1);
	}

	#[tokio::test]
	async fn logout_clears_tokens_without_http_call() {
		let transport = ScriptedTransport::default();
		let (client, store, observer) = client(transport.clone());

		store.set(TokenKind::Access, "A1".into()).await.expect("Seeding should succeed.");
		store.set(TokenKind::Refresh, "R1".into()).await.expect("Seeding should succeed.");
		client.auth().logout().await;

		assert!(store.is_empty());
		assert!(transport.requests().is_empty());
		assert_eq!(observer.events(), [SessionEvent::LoggedOut]);
	}
}
