//! Access/refresh pair persisted by the token store.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Credentials describing an authenticated session.
///
/// Created from a login/signup response, read on every request, overwritten on refresh, and
/// destroyed when refresh fails or the user logs out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
	/// Bearer credential attached to authorized requests.
	pub access_token: TokenSecret,
	/// Credential used to mint new access tokens, when the backend issued one.
	pub refresh_token: Option<TokenSecret>,
}
impl Session {
	/// Creates a session from an access token alone.
	pub fn new(access_token: impl Into<TokenSecret>) -> Self {
		Self { access_token: access_token.into(), refresh_token: None }
	}

	/// Attaches a refresh token.
	pub fn with_refresh_token(mut self, refresh_token: impl Into<TokenSecret>) -> Self {
		self.refresh_token = Some(refresh_token.into());

		self
	}

	/// Returns `true` if the session can be renewed without re-authenticating.
	pub fn is_refreshable(&self) -> bool {
		self.refresh_token.is_some()
	}
}

/// Session lifecycle notifications delivered to the host application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
	/// Tokens were stored after a login or signup.
	Established,
	/// The access token was replaced by a successful refresh.
	Renewed,
	/// Refresh failed and both tokens were cleared.
	Expired {
		/// Unauthenticated entry point the host should route the user to.
		redirect: String,
		/// Instant the session was torn down.
		at: OffsetDateTime,
	},
	/// The user logged out and both tokens were cleared.
	LoggedOut,
}

/// Receives [`SessionEvent`] notifications; the host decides how to react (navigation,
/// prompting for credentials, shutting down a worker).
pub trait SessionObserver
where
	Self: Send + Sync,
{
	/// Called after the store reflects the event.
	fn on_session_event(&self, event: &SessionEvent);
}
impl<F> SessionObserver for F
where
	F: Fn(&SessionEvent) + Send + Sync,
{
	fn on_session_event(&self, event: &SessionEvent) {
		self(event)
	}
}

/// Observer that ignores every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;
impl SessionObserver for NoopObserver {
	fn on_session_event(&self, _: &SessionEvent) {}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn session_debug_redacts_tokens() {
		let session = Session::new("A1").with_refresh_token("R1");
		let rendered = format!("{session:?}");

		assert!(session.is_refreshable());
		assert!(!rendered.contains("A1"));
		assert!(!rendered.contains("R1"));
	}

	#[test]
	fn closures_observe_events() {
		let seen = Arc::new(Mutex::new(Vec::new()));
		let sink = seen.clone();
		let observer = move |event: &SessionEvent| sink.lock().push(event.clone());

		observer.on_session_event(&SessionEvent::Renewed);

		assert_eq!(seen.lock().as_slice(), [SessionEvent::Renewed]);
	}
}
