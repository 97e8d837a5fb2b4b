//! API client facade: resilient fetch, authenticated requests, token refresh, and invalidation.

pub mod fetch;
pub mod invalidate;
pub mod refresh;
pub mod request;

mod metrics;

pub use metrics::FetchMetrics;

// self
use crate::{
	_prelude::*,
	auth::DeviceKeySlot,
	config::ClientConfig,
	ext::RequestSigner,
	http::HttpTransport,
	nav::Navigator,
	store::{CredentialStore, SessionCache},
};
#[cfg(feature = "reqwest")] use crate::{error::ConfigError, http::ReqwestTransport};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestApiClient = ApiClient<ReqwestTransport>;

/// Talks to a single backend on behalf of one activated device.
///
/// The client owns the transport, credential store, session cache, navigator, and device key
/// slot so every call path observes the same single point of de-authorization. Cloning is
/// cheap and clones share all of that state, including [`FetchMetrics`].
///
/// Concurrent [`refresh_access_token`](ApiClient::refresh_access_token) calls are not
/// deduplicated; each one reaches the refresh endpoint and the last store write wins.
pub struct ApiClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Transport used for every outbound request.
	pub transport: Arc<C>,
	/// Durable credential table.
	pub store: Arc<dyn CredentialStore>,
	/// Session-scoped validation flags.
	pub session: Arc<dyn SessionCache>,
	/// Navigation capability used after invalidation.
	pub navigator: Arc<dyn Navigator>,
	/// Endpoint, navigation, and retry configuration.
	pub config: ClientConfig,
	/// In-memory device key, emptied on invalidation.
	pub device_key: Arc<DeviceKeySlot>,
	/// Shared attempt/retry/invalidation counters.
	pub metrics: Arc<FetchMetrics>,
	signer: Option<Arc<dyn RequestSigner>>,
}
impl<C> ApiClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_transport(
		config: ClientConfig,
		transport: impl Into<Arc<C>>,
		store: Arc<dyn CredentialStore>,
		session: Arc<dyn SessionCache>,
		navigator: Arc<dyn Navigator>,
	) -> Self {
		Self {
			transport: transport.into(),
			store,
			session,
			navigator,
			config,
			device_key: Default::default(),
			metrics: Default::default(),
			signer: None,
		}
	}

	/// Shares an existing device key slot instead of the client's private one.
	pub fn with_device_key_slot(mut self, slot: Arc<DeviceKeySlot>) -> Self {
		self.device_key = slot;

		self
	}

	/// Installs a signer that attaches proof headers to authenticated requests.
	pub fn with_request_signer(mut self, signer: Arc<dyn RequestSigner>) -> Self {
		self.signer = Some(signer);

		self
	}
}
#[cfg(feature = "reqwest")]
impl ApiClient<ReqwestTransport> {
	/// Creates a client backed by a fresh reqwest transport with redirects disabled.
	pub fn new(
		config: ClientConfig,
		store: Arc<dyn CredentialStore>,
		session: Arc<dyn SessionCache>,
		navigator: Arc<dyn Navigator>,
	) -> Result<Self, ConfigError> {
		Ok(Self::with_transport(config, ReqwestTransport::new()?, store, session, navigator))
	}
}
impl<C> Clone for ApiClient<C>
where
	C: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self {
			transport: self.transport.clone(),
			store: self.store.clone(),
			session: self.session.clone(),
			navigator: self.navigator.clone(),
			config: self.config.clone(),
			device_key: self.device_key.clone(),
			metrics: self.metrics.clone(),
			signer: self.signer.clone(),
		}
	}
}
impl<C> Debug for ApiClient<C>
where
	C: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiClient")
			.field("config", &self.config)
			.field("device_key_set", &self.device_key.is_set())
			.field("signer_set", &self.signer.is_some())
			.finish()
	}
}
