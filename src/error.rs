//! Client-level error types shared across fetch, refresh, and store layers.

// self
use crate::{_prelude::*, i18n};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
///
/// Every variant that reaches an end user carries a message already passed through
/// [`i18n::translate`], so callers can display `err.to_string()` directly.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Storage-layer failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration or request-construction problem.
	#[error(transparent)]
	Config(#[from] ConfigError),

	/// A single attempt exceeded its time budget; retried until the budget is exhausted.
	#[error("{message}")]
	Timeout {
		/// Localized message.
		message: String,
		/// Per-attempt budget that elapsed.
		timeout: Duration,
	},
	/// Connectivity, DNS, or transport failure; retried until the budget is exhausted.
	#[error("{message}")]
	Network {
		/// Localized message.
		message: String,
		/// Underlying transport failure.
		#[source]
		source: TransportError,
	},
	/// Server answered 401; local credentials were wiped and navigation was triggered.
	#[error("{message}")]
	Unauthorized {
		/// Server-provided (or fallback) reason.
		reason: String,
		/// Localized message.
		message: String,
	},
	/// Refresh endpoint rejected the rotation; local credentials were wiped.
	#[error("{message}")]
	RefreshFailed {
		/// Server-provided (or fallback) reason.
		reason: String,
		/// HTTP status returned by the refresh endpoint.
		status: u16,
		/// Localized message.
		message: String,
	},
	/// Stored auth state has no refresh token; local credentials were wiped.
	#[error("{message}")]
	MissingRefreshToken {
		/// Localized message.
		message: String,
	},
	/// No access token is stored, so no request was attempted.
	#[error("{message}")]
	NotAuthenticated {
		/// Localized message.
		message: String,
	},
}
impl Error {
	pub(crate) fn timeout(timeout: Duration) -> Self {
		Self::Timeout { message: i18n::translate(i18n::ids::TIMEOUT).into(), timeout }
	}

	pub(crate) fn network(source: TransportError) -> Self {
		Self::Network { message: i18n::translate(i18n::ids::FETCH_FAILED).into(), source }
	}

	pub(crate) fn unauthorized(reason: impl Into<String>) -> Self {
		Self::Unauthorized {
			reason: reason.into(),
			message: i18n::translate(i18n::ids::REDIRECTING).into(),
		}
	}

	pub(crate) fn refresh_failed(reason: impl Into<String>, status: u16) -> Self {
		let reason = reason.into();
		let message = i18n::translate(&reason).to_owned();

		Self::RefreshFailed { reason, status, message }
	}

	pub(crate) fn missing_refresh_token() -> Self {
		Self::MissingRefreshToken {
			message: i18n::translate(i18n::ids::MISSING_REFRESH_TOKEN).into(),
		}
	}

	pub(crate) fn not_authenticated() -> Self {
		Self::NotAuthenticated { message: i18n::translate(i18n::ids::NOT_AUTHENTICATED).into() }
	}

	/// Returns `true` for failures the resilient fetch loop retries.
	pub fn is_retryable(&self) -> bool {
		matches!(self, Self::Timeout { .. } | Self::Network { .. })
	}

	/// Returns `true` when producing this error already ran the invalidation handler.
	pub fn triggered_invalidation(&self) -> bool {
		matches!(
			self,
			Self::Unauthorized { .. } | Self::RefreshFailed { .. } | Self::MissingRefreshToken { .. }
		)
	}
}

/// Configuration and request-construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Endpoint path could not be joined onto the base URL.
	#[error("Endpoint `{endpoint}` cannot be joined onto the base URL.")]
	InvalidEndpoint {
		/// Endpoint path supplied by the caller.
		endpoint: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// A header name or value could not be encoded.
	#[error("Header `{name}` is invalid.")]
	InvalidHeader {
		/// Header name that failed validation.
		name: String,
	},
	/// A [`RequestSigner`](crate::ext::RequestSigner) could not attach its proof.
	#[error("Request signing failed.")]
	Signing {
		/// Signer-specific failure.
		#[source]
		source: BoxError,
	},
	/// Request body could not be serialized.
	#[error("Request body could not be serialized.")]
	RequestBody(#[source] serde_json::Error),
	/// Response body was not the JSON shape the client expected.
	#[error("Response from {endpoint} has an unexpected shape.")]
	ResponseParse {
		/// Endpoint that produced the response.
		endpoint: String,
		/// HTTP status code of the response.
		status: u16,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}

	/// Wraps a request signer failure inside [`ConfigError`].
	pub fn signing(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Signing { source: Box::new(src) }
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
	#[error("Network error occurred while calling the API: {source}")]
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
	fn surfaced_errors_carry_localized_messages() {
		let err = Error::timeout(Duration::from_secs(15));

		assert_eq!(err.to_string(), i18n::translate(i18n::ids::TIMEOUT));
		assert!(err.is_retryable());
		assert!(!err.triggered_invalidation());

		let err = Error::unauthorized("Device revoked");

		assert_eq!(err.to_string(), i18n::translate(i18n::ids::REDIRECTING));
		assert!(!err.is_retryable());
		assert!(err.triggered_invalidation());
	}

	#[test]
	fn refresh_failure_translates_server_reason() {
		let err = Error::refresh_failed(i18n::ids::DEVICE_REVOKED, 403);

		assert_eq!(err.to_string(), i18n::translate(i18n::ids::DEVICE_REVOKED));

		let err = Error::refresh_failed("custom backend text", 500);

		assert_eq!(err.to_string(), "custom backend text");
	}

	#[test]
	fn network_error_keeps_transport_source() {
		let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
		let err = Error::network(TransportError::from(io));
		let source =
			StdError::source(&err).expect("Network errors should expose the transport source.");

		assert!(source.to_string().contains("I/O error"));
		assert!(err.is_retryable());
	}
}
