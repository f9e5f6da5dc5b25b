//! Client-level error types shared across the pipeline, resources, and stores.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Storage-layer failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Backend answered with a non-success status once the pipeline finished.
	#[error("API request failed with status {status}.")]
	Api {
		/// HTTP status code returned by the backend.
		status: u16,
		/// Decoded response payload, left untouched for presentation.
		body: Value,
	},
	/// Response body could not be decoded into the expected shape.
	#[error("Response body could not be decoded.")]
	Decode {
		/// Structured parsing failure, including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when the body came from a response.
		status: Option<u16>,
	},
	/// Token refresh failed; stored credentials were cleared.
	#[error("Session expired; re-authentication is required.")]
	SessionExpired {
		/// Failure reported by the refresh call.
		#[source]
		source: Box<Error>,
	},
}
impl Error {
	/// Returns the HTTP status carried by the error, if any.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Api { status, .. } => Some(*status),
			Self::Decode { status, .. } => *status,
			_ => None,
		}
	}

	/// Returns `true` for authorization failures (HTTP 401).
	pub fn is_unauthorized(&self) -> bool {
		self.status() == Some(401)
	}

	/// Returns `true` when the session ended and the user must authenticate again.
	pub fn is_session_expired(&self) -> bool {
		matches!(self, Self::SessionExpired { .. })
	}

	/// Returns the backend payload for [`Error::Api`] failures.
	pub fn body(&self) -> Option<&Value> {
		match self {
			Self::Api { body, .. } => Some(body),
			_ => None,
		}
	}
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Base URL cannot be parsed.
	#[error("Base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL cannot carry relative API paths.
	#[error("Base URL `{url}` cannot be used as a base for API paths.")]
	CannotBeABase {
		/// Offending URL.
		url: String,
	},
	/// Base URL uses a scheme other than http/https.
	#[error("Base URL scheme `{scheme}` is not supported.")]
	UnsupportedScheme {
		/// Offending scheme.
		scheme: String,
	},
	/// Endpoint path does not start with `/`.
	#[error("Endpoint path `{path}` must start with '/'.")]
	InvalidPath {
		/// Offending path.
		path: String,
	},
	/// Request payload could not be encoded as JSON.
	#[error("Request body could not be encoded as JSON.")]
	Encode {
		/// Underlying serialization failure.
		#[source]
		source: serde_json::Error,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the API.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn api_errors_expose_status_and_body() {
		let err = Error::Api { status: 400, body: serde_json::json!({ "error": "Missing" }) };

		assert_eq!(err.status(), Some(400));
		assert!(!err.is_unauthorized());
		assert_eq!(err.body(), Some(&serde_json::json!({ "error": "Missing" })));
		assert_eq!(err.to_string(), "API request failed with status 400.");
	}

	#[test]
	fn session_expired_keeps_refresh_failure_as_source() {
		let refresh = Error::Api { status: 401, body: Value::Null };
		let err = Error::SessionExpired { source: Box::new(refresh) };

		assert!(err.is_session_expired());
		assert_eq!(err.status(), None);

		let source = StdError::source(&err)
			.expect("Session expiry should expose the refresh failure as its source.");

		assert_eq!(source.to_string(), "API request failed with status 401.");
	}
}
