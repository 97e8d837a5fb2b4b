//! Refresh-token rotation against the backend's refresh endpoint.

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	client::{ApiClient, fetch},
	error::ConfigError,
	http::{ApiRequest, HttpTransport},
	i18n::ids,
	obs::{self, CallKind, CallOutcome, CallSpan},
	store,
};

#[derive(Serialize)]
struct RefreshRequest<'a> {
	refresh_token: &'a str,
}

#[derive(Deserialize)]
struct RefreshResponse {
	access_token: TokenSecret,
	#[serde(default)]
	refresh_token: Option<TokenSecret>,
}

impl<C> ApiClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Exchanges the stored refresh token for a new token pair and persists it.
	///
	/// Only the token fields of the stored auth state are replaced; anything else stored
	/// alongside them survives. Every failure leaves the device signed out: the invalidation
	/// handler runs exactly once before the error is returned.
	pub async fn refresh_access_token(&self) -> Result<TokenSecret> {
		const KIND: CallKind = CallKind::Refresh;

		let span = CallSpan::new(KIND, "refresh_access_token");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span.instrument(self.rotate_tokens()).await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(e) => {
				if !e.triggered_invalidation() {
					self.invalidate_and_redirect(ids::REFRESH_FAILED).await;
				}

				obs::record_call_outcome(KIND, CallOutcome::Failure);
			},
		}

		result
	}

	async fn rotate_tokens(&self) -> Result<TokenSecret> {
		// An unreadable store leaves nothing to refresh with.
		let state = store::load_auth_state(self.store.as_ref()).await.unwrap_or_else(|e| {
			obs::credentials_unavailable(&e);

			None
		});
		let Some((mut state, refresh_token)) = state
			.and_then(|state| state.refresh_token().cloned().map(|token| (state, token)))
		else {
			self.invalidate_and_redirect(ids::MISSING_REFRESH_TOKEN).await;

			return Err(Error::missing_refresh_token());
		};
		let url = self.config.refresh_url()?;
		let request = ApiRequest::post(url.clone())
			.json(&RefreshRequest { refresh_token: refresh_token.expose() })?;
		let response = self.send_with_retry(request).await?;

		if !response.is_success() {
			let reason = fetch::error_reason(&response).unwrap_or_else(|| ids::REFRESH_FAILED.into());

			self.invalidate_and_redirect(&reason).await;

			return Err(Error::refresh_failed(reason, response.status.as_u16()));
		}

		let parsed = response.json::<RefreshResponse>().map_err(|source| {
			ConfigError::ResponseParse {
				endpoint: url.to_string(),
				status: response.status.as_u16(),
				source,
			}
		})?;
		let access_token = parsed.access_token.clone();

		state.rotate(parsed.access_token, parsed.refresh_token);
		store::save_auth_state(self.store.as_ref(), &state).await?;
		obs::tokens_rotated();

		Ok(access_token)
	}
}
