//! Authenticated requests built from the stored credentials.

// crates.io
use ::http::{
	HeaderMap, HeaderName, HeaderValue, Method,
	header::{AUTHORIZATION, CONTENT_TYPE},
};
// self
use crate::{
	_prelude::*,
	auth::{AuthState, InstallId, TokenSecret},
	client::ApiClient,
	error::ConfigError,
	ext::SigningContext,
	http::{ApiRequest, ApiResponse, HttpTransport, JSON_CONTENT_TYPE, RequestOptions},
	obs::{self, CallKind, CallOutcome, CallSpan},
	store,
};

/// Header carrying the installation identifier.
pub const INSTALL_ID_HEADER: &str = "x-pwa-install-id";

impl<C> ApiClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Sends an authenticated request to `base_url + endpoint`.
	///
	/// Fails with [`Error::NotAuthenticated`] before touching the network when no access token
	/// is stored. Default headers (`Authorization`, `X-PWA-Install-ID`, `Content-Type`) are
	/// overridden by any header of the same name in `options`.
	pub async fn authenticated_request(
		&self,
		endpoint: &str,
		options: RequestOptions,
	) -> Result<ApiResponse> {
		const KIND: CallKind = CallKind::Authenticated;

		let span = CallSpan::new(KIND, "authenticated_request");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let (state, install_id) = self.load_credentials().await;
				let token = state
					.as_ref()
					.and_then(AuthState::access_token)
					.ok_or_else(Error::not_authenticated)?;
				let url = self.config.endpoint_url(endpoint)?;
				let mut request = ApiRequest::new(Method::GET, url);

				request.headers = auth_headers(token, install_id.as_ref())?;

				let mut request = request.with_options(options);

				if let Some(signer) = self.signer.as_ref() {
					let context =
						SigningContext { access_token: token, device_key: self.device_key.get() };

					request = signer.sign(request, context)?;
				}

				self.send_with_retry(request).await
			})
			.await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}

	/// Returns the default headers an authenticated request would carry.
	pub async fn auth_headers(&self) -> Result<HeaderMap> {
		let (state, install_id) = self.load_credentials().await;
		let token =
			state.as_ref().and_then(AuthState::access_token).ok_or_else(Error::not_authenticated)?;

		Ok(auth_headers(token, install_id.as_ref())?)
	}

	/// Reads the auth state and install id; any store failure counts as "no credentials".
	async fn load_credentials(&self) -> (Option<AuthState>, Option<InstallId>) {
		let store = self.store.as_ref();
		let loaded = match store::load_auth_state(store).await {
			Ok(state) => store::load_install_id(store).await.map(|install_id| (state, install_id)),
			Err(e) => Err(e),
		};

		loaded.unwrap_or_else(|e| {
			obs::credentials_unavailable(&e);

			(None, None)
		})
	}
}

fn auth_headers(
	token: &TokenSecret,
	install_id: Option<&InstallId>,
) -> Result<HeaderMap, ConfigError> {
	let mut headers = HeaderMap::new();
	let mut bearer = HeaderValue::try_from(format!("Bearer {}", token.expose()))
		.map_err(|_| ConfigError::InvalidHeader { name: AUTHORIZATION.to_string() })?;

	bearer.set_sensitive(true);
	headers.insert(AUTHORIZATION, bearer);

	if let Some(install_id) = install_id.filter(|id| !id.is_empty()) {
		let value = HeaderValue::from_str(install_id)
			.map_err(|_| ConfigError::InvalidHeader { name: INSTALL_ID_HEADER.into() })?;

		headers.insert(HeaderName::from_static(INSTALL_ID_HEADER), value);
	}

	headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));

	Ok(headers)
}
