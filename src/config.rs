//! Client configuration: API base URL, auxiliary paths, and refresh policy.

// std
use std::env;
// self
use crate::{_prelude::*, error::ConfigError};

/// Base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
/// Environment variable consulted by [`ClientConfig::from_env`].
pub const API_URL_ENV: &str = "MIDNIGHT_BOOKER_API_URL";

/// How concurrent refresh attempts are coordinated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RefreshPolicy {
	/// Every request that hits a 401 performs its own refresh call.
	#[default]
	Independent,
	/// Refreshes are single-flight: requests that fail while a refresh is running wait for it
	/// and reuse the renewed access token.
	Coalesced,
}

/// Validated client configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
	/// Base URL every API path is appended to (for example `https://host/api`).
	pub base_url: Url,
	/// Path of the token refresh endpoint.
	pub refresh_path: String,
	/// Unauthenticated entry point reported when the session expires.
	pub login_path: String,
	/// Coordination policy for concurrent refreshes.
	pub refresh_policy: RefreshPolicy,
}
impl ClientConfig {
	/// Default refresh endpoint path.
	pub const DEFAULT_REFRESH_PATH: &'static str = "/auth/refresh";
	/// Default unauthenticated entry point.
	pub const DEFAULT_LOGIN_PATH: &'static str = "/login";

	/// Returns a builder seeded with defaults for the provided base URL.
	pub fn builder(base_url: impl Into<String>) -> ClientConfigBuilder {
		ClientConfigBuilder::new(base_url)
	}

	/// Parses and validates a configuration with default paths and policy.
	pub fn parse(base_url: &str) -> Result<Self, ConfigError> {
		Self::builder(base_url).build()
	}

	/// Reads the base URL from [`API_URL_ENV`], falling back to [`DEFAULT_API_URL`].
	pub fn from_env() -> Result<Self, ConfigError> {
		let base_url = env::var(API_URL_ENV)
			.ok()
			.filter(|value| !value.trim().is_empty())
			.unwrap_or_else(|| DEFAULT_API_URL.to_owned());

		Self::parse(base_url.trim())
	}

	/// Resolves an API path (such as `/bookings/7`) against the base URL.
	pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
		if !path.starts_with('/') {
			return Err(ConfigError::InvalidPath { path: path.to_owned() });
		}

		let mut url = self.base_url.clone();
		let joined = format!("{}{path}", self.base_url.path().trim_end_matches('/'));

		url.set_path(&joined);

		Ok(url)
	}
}

/// Builder for [`ClientConfig`].
#[derive(Clone, Debug)]
pub struct ClientConfigBuilder {
	base_url: String,
	refresh_path: String,
	login_path: String,
	refresh_policy: RefreshPolicy,
}
impl ClientConfigBuilder {
	fn new(base_url: impl Into<String>) -> Self {
		Self {
			base_url: base_url.into(),
			refresh_path: ClientConfig::DEFAULT_REFRESH_PATH.to_owned(),
			login_path: ClientConfig::DEFAULT_LOGIN_PATH.to_owned(),
			refresh_policy: RefreshPolicy::default(),
		}
	}

	/// Overrides the refresh endpoint path.
	pub fn refresh_path(mut self, path: impl Into<String>) -> Self {
		self.refresh_path = path.into();

		self
	}

	/// Overrides the unauthenticated entry point reported on session expiry.
	pub fn login_path(mut self, path: impl Into<String>) -> Self {
		self.login_path = path.into();

		self
	}

	/// Selects the refresh coordination policy.
	pub fn refresh_policy(mut self, policy: RefreshPolicy) -> Self {
		self.refresh_policy = policy;

		self
	}

	/// Validates the inputs and produces a [`ClientConfig`].
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		let base_url = Url::parse(&self.base_url)
			.map_err(|source| ConfigError::InvalidBaseUrl { source })?;

		if !matches!(base_url.scheme(), "http" | "https") {
			return Err(ConfigError::UnsupportedScheme { scheme: base_url.scheme().to_owned() });
		}
		if base_url.cannot_be_a_base() {
			return Err(ConfigError::CannotBeABase { url: self.base_url });
		}
		if !self.refresh_path.starts_with('/') {
			return Err(ConfigError::InvalidPath { path: self.refresh_path });
		}

		Ok(ClientConfig {
			base_url,
			refresh_path: self.refresh_path,
			login_path: self.login_path,
			refresh_policy: self.refresh_policy,
		})
	}
}
