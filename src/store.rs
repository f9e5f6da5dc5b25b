//! Storage contracts and built-in token store implementations.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{
	_prelude::*,
	auth::{TokenKind, TokenSecret},
};

/// Future returned by [`TokenStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Storage backend contract for the session's access and refresh tokens.
///
/// Writes are last-write-wins overwrites; every `set` is visible to all subsequent `get`
/// calls made through any clone of the client sharing the store.
pub trait TokenStore
where
	Self: Send + Sync,
{
	/// Returns the stored secret for `kind`, if present.
	fn get(&self, kind: TokenKind) -> StoreFuture<'_, Option<TokenSecret>>;

	/// Persists or replaces the secret for `kind`.
	fn set(&self, kind: TokenKind, value: TokenSecret) -> StoreFuture<'_, ()>;

	/// Removes the secret for `kind`; clearing a missing entry succeeds.
	fn clear(&self, kind: TokenKind) -> StoreFuture<'_, ()>;
}

/// Error type produced by [`TokenStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::error::Error;

	#[test]
	fn store_error_converts_into_client_error_with_source() {
		let store_error = StoreError::Backend { message: "disk unavailable".into() };
		let client_error: Error = store_error.clone().into();

		assert!(matches!(client_error, Error::Storage(_)));
		assert!(client_error.to_string().contains("disk unavailable"));

		let source = StdError::source(&client_error)
			.expect("Client error should expose the original store error as its source.");

		assert_eq!(source.to_string(), store_error.to_string());
	}
}
