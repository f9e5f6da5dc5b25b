//! Thread-safe in-memory [`TokenStore`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	auth::{TokenKind, TokenSecret},
	store::{StoreFuture, TokenStore},
};

type StoreMap = Arc<RwLock<HashMap<TokenKind, TokenSecret>>>;

/// Thread-safe storage backend that keeps tokens in-process for tests and short-lived tools.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(StoreMap);
impl MemoryStore {
	/// Returns the current secret for `kind` without going through the async contract.
	pub fn peek(&self, kind: TokenKind) -> Option<TokenSecret> {
		self.0.read().get(&kind).cloned()
	}

	/// Returns `true` if no token of either kind is stored.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}
}
impl TokenStore for MemoryStore {
	fn get(&self, kind: TokenKind) -> StoreFuture<'_, Option<TokenSecret>> {
		let map = self.0.clone();

		Box::pin(async move { Ok(map.read().get(&kind).cloned()) })
	}

	fn set(&self, kind: TokenKind, value: TokenSecret) -> StoreFuture<'_, ()> {
		let map = self.0.clone();

		Box::pin(async move {
			map.write().insert(kind, value);

			Ok(())
		})
	}

	fn clear(&self, kind: TokenKind) -> StoreFuture<'_, ()> {
		let map = self.0.clone();

		Box::pin(async move {
			map.write().remove(&kind);

			Ok(())
		})
	}
}
