//! Client configuration: the single backend origin, fixed endpoint paths, and retry policy.

// self
use crate::{_prelude::*, error::ConfigError};

/// Retry and timeout budget applied by the resilient fetch loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
	/// Total attempts, including the first one.
	pub max_attempts: u32,
	/// Time budget for a single attempt.
	pub attempt_timeout: Duration,
	/// Delay before the second attempt.
	pub base_delay: Duration,
	/// Multiplier applied to the delay for every further attempt.
	pub factor: u32,
}
impl RetryPolicy {
	/// Default attempt budget (one initial attempt plus two retries).
	pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
	/// Default per-attempt timeout.
	pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(15);
	/// Default base backoff delay.
	pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(500);
	/// Default backoff factor.
	pub const DEFAULT_FACTOR: u32 = 2;

	/// Delay to wait before the 1-based `attempt`; zero for the first attempt.
	///
	/// With the defaults this yields 0 ms, 500 ms, 1000 ms for attempts 1, 2, 3.
	pub fn backoff_delay(&self, attempt: u32) -> Duration {
		if attempt <= 1 {
			return Duration::ZERO;
		}

		match self.factor.checked_pow(attempt - 2) {
			Some(multiplier) => self.base_delay.checked_mul(multiplier).unwrap_or(Duration::MAX),
			None => Duration::MAX,
		}
	}
}
impl Default for RetryPolicy {
	fn default() -> Self {
		Self {
			max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
			attempt_timeout: Self::DEFAULT_ATTEMPT_TIMEOUT,
			base_delay: Self::DEFAULT_BASE_DELAY,
			factor: Self::DEFAULT_FACTOR,
		}
	}
}

/// Immutable client configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
	/// Origin (plus optional path prefix) every endpoint is joined onto.
	pub base_url: Url,
	/// App path navigated to after invalidation.
	pub entry_path: String,
	/// Endpoint path of the token refresh call.
	pub refresh_path: String,
	/// Retry and timeout budget.
	pub retry: RetryPolicy,
}
impl ClientConfig {
	/// Default navigation target after invalidation.
	pub const DEFAULT_ENTRY_PATH: &'static str = "/activate";
	/// Default refresh endpoint path.
	pub const DEFAULT_REFRESH_PATH: &'static str = "/auth/refresh";

	/// Creates a new builder for the provided base URL.
	pub fn builder(base_url: Url) -> ClientConfigBuilder {
		ClientConfigBuilder::new(base_url)
	}

	/// Resolves `endpoint` against the base URL, keeping any base path prefix.
	///
	/// `https://api.example.com/v1` + `/auth/refresh` yields `https://api.example.com/v1/auth/refresh`.
	pub fn endpoint_url(&self, endpoint: &str) -> Result<Url, ConfigError> {
		let base = self.base_url.as_str().trim_end_matches('/');
		let path = endpoint.trim_start_matches('/');

		Url::parse(&format!("{base}/{path}")).map_err(|source| ConfigError::InvalidEndpoint {
			endpoint: endpoint.to_owned(),
			source,
		})
	}

	/// Absolute URL of the refresh endpoint.
	pub fn refresh_url(&self) -> Result<Url, ConfigError> {
		self.endpoint_url(&self.refresh_path)
	}

	fn validate(&self) -> Result<(), ClientConfigError> {
		if !matches!(self.base_url.scheme(), "http" | "https") {
			return Err(ClientConfigError::UnsupportedScheme {
				url: self.base_url.to_string(),
			});
		}
		if self.base_url.cannot_be_a_base() || self.base_url.host().is_none() {
			return Err(ClientConfigError::InvalidBaseUrl { url: self.base_url.to_string() });
		}
		if self.base_url.query().is_some() || self.base_url.fragment().is_some() {
			return Err(ClientConfigError::InvalidBaseUrl { url: self.base_url.to_string() });
		}

		validate_path("entry", &self.entry_path)?;
		validate_path("refresh", &self.refresh_path)?;

		if self.retry.max_attempts == 0 {
			return Err(ClientConfigError::NoAttempts);
		}
		if self.retry.factor == 0 {
			return Err(ClientConfigError::ZeroBackoffFactor);
		}
		if self.retry.attempt_timeout.is_zero() {
			return Err(ClientConfigError::ZeroAttemptTimeout);
		}

		Ok(())
	}
}

/// Errors raised while constructing or validating a [`ClientConfig`].
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum ClientConfigError {
	/// Base URL must use HTTP(S).
	#[error("Base URL must use http or https: {url}.")]
	UnsupportedScheme {
		/// Offending URL.
		url: String,
	},
	/// Base URL must be a hierarchical URL with a host and no query or fragment.
	#[error("Base URL cannot be used as an API origin: {url}.")]
	InvalidBaseUrl {
		/// Offending URL.
		url: String,
	},
	/// App and endpoint paths must be absolute.
	#[error("The {which} path must start with `/`: {path}.")]
	RelativePath {
		/// Which path failed validation.
		which: &'static str,
		/// Offending path.
		path: String,
	},
	/// At least one attempt is required.
	#[error("Retry policy must allow at least one attempt.")]
	NoAttempts,
	/// A zero factor would collapse every backoff delay after the first.
	#[error("Retry backoff factor must be at least 1.")]
	ZeroBackoffFactor,
	/// A zero timeout would fail every attempt immediately.
	#[error("Per-attempt timeout must be positive.")]
	ZeroAttemptTimeout,
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug)]
pub struct ClientConfigBuilder {
	/// Base URL of the backend.
	pub base_url: Url,
	/// App path navigated to after invalidation.
	pub entry_path: String,
	/// Endpoint path of the token refresh call.
	pub refresh_path: String,
	/// Retry and timeout budget.
	pub retry: RetryPolicy,
}
impl ClientConfigBuilder {
	/// Creates a new builder seeded with defaults.
	pub fn new(base_url: Url) -> Self {
		Self {
			base_url,
			entry_path: ClientConfig::DEFAULT_ENTRY_PATH.into(),
			refresh_path: ClientConfig::DEFAULT_REFRESH_PATH.into(),
			retry: RetryPolicy::default(),
		}
	}

	/// Overrides the navigation target used after invalidation.
	pub fn entry_path(mut self, path: impl Into<String>) -> Self {
		self.entry_path = path.into();

		self
	}

	/// Overrides the refresh endpoint path.
	pub fn refresh_path(mut self, path: impl Into<String>) -> Self {
		self.refresh_path = path.into();

		self
	}

	/// Overrides the retry policy.
	pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
		self.retry = retry;

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig, ClientConfigError> {
		let config = ClientConfig {
			base_url: self.base_url,
			entry_path: self.entry_path,
			refresh_path: self.refresh_path,
			retry: self.retry,
		};

		config.validate()?;

		Ok(config)
	}
}

fn validate_path(which: &'static str, path: &str) -> Result<(), ClientConfigError> {
	if path.starts_with('/') {
		Ok(())
	} else {
		Err(ClientConfigError::RelativePath { which, path: path.to_owned() })
	}
}
