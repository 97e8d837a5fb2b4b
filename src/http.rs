//! Transport primitives for API calls.
//!
//! The module exposes [`HttpTransport`] alongside the transport-neutral [`ApiRequest`] and
//! [`ApiResponse`] so embedders can plug in any HTTP stack. The client owns retry, timeout,
//! and 401 handling; a transport only moves bytes and reports connectivity failures as
//! [`TransportError`]. Every HTTP status, including 4xx/5xx, is a successful transport outcome.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
use ::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, header::CONTENT_TYPE};
// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError},
};

/// Boxed future returned by [`HttpTransport::execute`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<ApiResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP stacks capable of executing one request.
///
/// Implementations must be `Send + Sync + 'static` so a single transport can be shared across
/// client clones, and the returned future must own whatever state it needs. Dropping the future
/// must abort the in-flight request; the client relies on this to enforce per-attempt timeouts.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` and resolves with the full response.
	fn execute(&self, request: ApiRequest) -> TransportFuture<'_>;
}

/// Fully resolved outbound request.
#[derive(Clone, Debug)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: Method,
	/// Absolute target URL.
	pub url: Url,
	/// Request headers.
	pub headers: HeaderMap,
	/// Optional request body.
	pub body: Option<Vec<u8>>,
}
impl ApiRequest {
	/// Creates a body-less request.
	pub fn new(method: Method, url: Url) -> Self {
		Self { method, url, headers: HeaderMap::new(), body: None }
	}

	/// Creates a `GET` request.
	pub fn get(url: Url) -> Self {
		Self::new(Method::GET, url)
	}

	/// Creates a `POST` request.
	pub fn post(url: Url) -> Self {
		Self::new(Method::POST, url)
	}

	/// Inserts (or replaces) a header.
	pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
		self.headers.insert(name, value);

		self
	}

	/// Serializes `body` as JSON and sets `Content-Type: application/json`.
	pub fn json<T>(mut self, body: &T) -> Result<Self, ConfigError>
	where
		T: ?Sized + Serialize,
	{
		self.body = Some(serde_json::to_vec(body).map_err(ConfigError::RequestBody)?);
		self.headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));

		Ok(self)
	}

	/// Applies caller options: method, body, and headers (caller headers win).
	pub fn with_options(mut self, options: RequestOptions) -> Self {
		self.method = options.method;

		if options.body.is_some() {
			self.body = options.body;
		}

		// Caller headers replace defaults wholesale, including multi-valued ones.
		for name in options.headers.keys() {
			self.headers.remove(name);
		}

		self.headers.extend(options.headers);

		self
	}
}

pub(crate) const JSON_CONTENT_TYPE: &str = "application/json";

/// Fully buffered response.
#[derive(Clone, Debug)]
pub struct ApiResponse {
	/// HTTP status code.
	pub status: StatusCode,
	/// Response headers.
	pub headers: HeaderMap,
	/// Raw body bytes.
	pub body: Vec<u8>,
}
impl ApiResponse {
	/// Creates a response with no headers.
	pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
		Self { status, headers: HeaderMap::new(), body: body.into() }
	}

	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		self.status.is_success()
	}

	/// Decodes the body as JSON, reporting the failing path on error.
	pub fn json<T>(&self) -> Result<T, serde_path_to_error::Error<serde_json::Error>>
	where
		T: for<'de> Deserialize<'de>,
	{
		let mut deserializer = serde_json::Deserializer::from_slice(&self.body);

		serde_path_to_error::deserialize(&mut deserializer)
	}

	/// Returns the body as UTF-8 text, replacing invalid sequences.
	pub fn text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}
}

/// Caller-supplied options for authenticated requests.
#[derive(Clone, Debug)]
pub struct RequestOptions {
	/// HTTP method (defaults to `GET`).
	pub method: Method,
	/// Extra headers; these override the client's defaults.
	pub headers: HeaderMap,
	/// Optional request body.
	pub body: Option<Vec<u8>>,
}
impl Default for RequestOptions {
	fn default() -> Self {
		Self { method: Method::GET, headers: HeaderMap::new(), body: None }
	}
}
impl RequestOptions {
	/// Options for a `GET` request.
	pub fn get() -> Self {
		Self::default()
	}

	/// Options for a `POST` request.
	pub fn post() -> Self {
		Self { method: Method::POST, ..Self::default() }
	}

	/// Overrides the method.
	pub fn method(mut self, method: Method) -> Self {
		self.method = method;

		self
	}

	/// Inserts (or replaces) a typed header.
	pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
		self.headers.insert(name, value);

		self
	}

	/// Inserts (or replaces) a header from strings, validating both parts.
	pub fn try_header(self, name: &str, value: &str) -> Result<Self, ConfigError> {
		let invalid = || ConfigError::InvalidHeader { name: name.to_owned() };
		let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
		let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;

		Ok(self.header(header_name, header_value))
	}

	/// Sets a raw body.
	pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
		self.body = Some(body.into());

		self
	}

	/// Serializes `body` as JSON.
	pub fn json<T>(mut self, body: &T) -> Result<Self, ConfigError>
	where
		T: ?Sized + Serialize,
	{
		self.body = Some(serde_json::to_vec(body).map_err(ConfigError::RequestBody)?);

		Ok(self)
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// [`ReqwestTransport::new`] disables redirect following so a 401 from the API is observed
/// directly instead of being masked by a redirect to a login page.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Builds a transport with redirects disabled.
	pub fn new() -> Result<Self, ConfigError> {
		let client =
			ReqwestClient::builder().redirect(reqwest::redirect::Policy::none()).build()?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestTransport {
	fn execute(&self, request: ApiRequest) -> TransportFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let mut builder =
				client.request(request.method, request.url).headers(request.headers);

			if let Some(body) = request.body {
				builder = builder.body(body);
			}

			let response = builder.send().await?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let body = response.bytes().await?.to_vec();

			Ok(ApiResponse { status, headers, body })
		})
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use ::http::header::{AUTHORIZATION, HeaderValue};
	// self
	use super::*;

	fn url() -> Url {
		Url::parse("https://api.example.com/items").expect("Fixture URL should parse.")
	}

	#[test]
	fn caller_headers_replace_defaults() {
		let request = ApiRequest::get(url())
			.header(AUTHORIZATION, HeaderValue::from_static("Bearer default"))
			.header(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
		let options = RequestOptions::post()
			.try_header("authorization", "Bearer caller")
			.expect("Header should be valid.")
			.body("raw");
		let merged = request.with_options(options);

		assert_eq!(merged.method, Method::POST);
		assert_eq!(merged.headers.get_all(AUTHORIZATION).iter().count(), 1);
		assert_eq!(merged.headers[AUTHORIZATION], "Bearer caller");
		assert_eq!(merged.headers[CONTENT_TYPE], JSON_CONTENT_TYPE);
		assert_eq!(merged.body.as_deref(), Some(&b"raw"[..]));
	}

	#[test]
	fn invalid_header_names_are_config_errors() {
		let err = RequestOptions::get()
			.try_header("bad header", "value")
			.expect_err("Whitespace in header names must be rejected.");

		assert!(matches!(err, ConfigError::InvalidHeader { name } if name == "bad header"));
	}

	#[test]
	fn json_decode_reports_failing_path() {
		#[derive(Debug, Deserialize)]
		struct Body {
			#[allow(dead_code)]
			error: String,
		}

		let response = ApiResponse::new(StatusCode::UNAUTHORIZED, r#"{"error":7}"#);
		let err = response.json::<Body>().expect_err("Numeric error field must be rejected.");

		assert_eq!(err.path().to_string(), "error");
	}
}
