//! Async client for the Midnight Travel Booker API: bearer sessions with one-shot token
//! refresh, pluggable token stores and transports, and typed resource calls.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod obs;
pub mod resources;
pub mod store;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports plus scripted fakes for tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// std
	use std::{collections::VecDeque, io};
	// self
	use crate::{
		auth::{SessionEvent, SessionObserver, TokenKind, TokenSecret},
		error::TransportError,
		http::{HttpRequest, HttpResponse, HttpTransport, TransportFuture},
		store::{MemoryStore, StoreError, StoreFuture, TokenStore},
	};

	#[derive(Clone, Debug)]
	enum Scripted {
		Respond(HttpResponse),
		NetworkFailure,
	}

	/// Transport that replays queued responses in order and records every request it sees.
	#[derive(Clone, Debug, Default)]
	pub struct ScriptedTransport {
		script: Arc<Mutex<VecDeque<Scripted>>>,
		requests: Arc<Mutex<Vec<HttpRequest>>>,
	}
	impl ScriptedTransport {
		/// Queues a response.
		pub fn push(&self, response: HttpResponse) {
			self.script.lock().push_back(Scripted::Respond(response));
		}

		/// Queues a connection-level failure.
		pub fn push_network_failure(&self) {
			self.script.lock().push_back(Scripted::NetworkFailure);
		}

		/// Returns every request executed so far.
		pub fn requests(&self) -> Vec<HttpRequest> {
			self.requests.lock().clone()
		}
	}
	impl HttpTransport for ScriptedTransport {
		fn execute(&self, request: HttpRequest) -> TransportFuture<'_> {
			self.requests.lock().push(request);

			let next = self.script.lock().pop_front();

			Box::pin(async move {
				match next {
					Some(Scripted::Respond(response)) => Ok(response),
					Some(Scripted::NetworkFailure) => Err(TransportError::network(io::Error::new(
						io::ErrorKind::ConnectionReset,
						"scripted connection reset",
					))),
					None => Err(TransportError::Io(io::Error::other("no scripted response left"))),
				}
			})
		}
	}

	/// Token store over a [`MemoryStore`] whose selected operations fail with
	/// [`StoreError::Backend`] without touching the inner state.
	#[derive(Clone, Debug, Default)]
	pub struct FailingStore {
		/// Backing state; seed it directly to set up a session.
		pub inner: MemoryStore,
		fail_get: bool,
		fail_set: bool,
		fail_clear: bool,
	}
	impl FailingStore {
		/// Wraps `inner` with every operation succeeding.
		pub fn new(inner: MemoryStore) -> Self {
			Self { inner, ..Default::default() }
		}

		/// Makes `get` fail.
		pub fn failing_get(mut self) -> Self {
			self.fail_get = true;

			self
		}

		/// Makes `set` fail.
		pub fn failing_set(mut self) -> Self {
			self.fail_set = true;

			self
		}

		/// Makes `clear` fail.
		pub fn failing_clear(mut self) -> Self {
			self.fail_clear = true;

			self
		}

		fn unavailable<'a, T>(operation: &str) -> StoreFuture<'a, T>
		where
			T: 'a + Send,
		{
			let message = format!("{operation} unavailable");

			Box::pin(async move { Err(StoreError::Backend { message }) })
		}
	}
	impl TokenStore for FailingStore {
		fn get(&self, kind: TokenKind) -> StoreFuture<'_, Option<TokenSecret>> {
			if self.fail_get {
				return Self::unavailable("get");
			}

			self.inner.get(kind)
		}

		fn set(&self, kind: TokenKind, value: TokenSecret) -> StoreFuture<'_, ()> {
			if self.fail_set {
				return Self::unavailable("set");
			}

			self.inner.set(kind, value)
		}

		fn clear(&self, kind: TokenKind) -> StoreFuture<'_, ()> {
			if self.fail_clear {
				return Self::unavailable("clear");
			}

			self.inner.clear(kind)
		}
	}

	/// Session observer that keeps every event for later assertions.
	#[derive(Clone, Debug, Default)]
	pub struct RecordingObserver(Arc<Mutex<Vec<SessionEvent>>>);
	impl RecordingObserver {
		/// Returns the events observed so far.
		pub fn events(&self) -> Vec<SessionEvent> {
			self.0.lock().clone()
		}
	}
	impl SessionObserver for RecordingObserver {
		fn on_session_event(&self, event: &SessionEvent) {
			self.0.lock().push(event.clone());
		}
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use serde_json;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
