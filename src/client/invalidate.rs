//! Local de-authorization: wipe every credential the device holds and return to the entry
//! surface.

// self
use crate::{
	client::ApiClient,
	http::HttpTransport,
	obs::{self, CallKind, CallOutcome, CallSpan},
	store::SessionValidation,
};

impl<C> ApiClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Wipes local credentials and navigates to the configured entry path.
	///
	/// Each step is attempted independently: a failing store clear does not prevent the session
	/// flags or the device key from being cleared, and navigation always happens last. Calling
	/// this while already signed out is harmless and still navigates.
	pub async fn invalidate_and_redirect(&self, reason: &str) {
		const KIND: CallKind = CallKind::Invalidate;

		let span = CallSpan::new(KIND, "invalidate_and_redirect");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);
		span.instrument(async {
			self.metrics.record_invalidation();
			obs::invalidating(reason);

			if let Err(e) = self.store.clear().await {
				obs::invalidation_step_failed("credential_store", &e);
			}
			if let Err(e) = SessionValidation::clear(self.session.as_ref()) {
				obs::invalidation_step_failed("session_cache", &e);
			}

			self.device_key.clear();
			self.navigator.navigate(&self.config.entry_path);
		})
		.await;
		obs::record_call_outcome(KIND, CallOutcome::Success);
	}
}
