// self
use crate::{_prelude::*, i18n, obs::CallKind, store::StoreError};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// A span builder used by client operations.
#[derive(Clone, Debug)]
pub struct CallSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Creates a new span tagged with the provided call kind + stage.
	pub fn new(kind: CallKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("pwa_auth_fetch.call", call = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

pub(crate) fn attempt_failed(attempt: u32, max_attempts: u32, error: &Error, retry_in: Duration) {
	#[cfg(feature = "tracing")]
	{
		if attempt < max_attempts {
			tracing::warn!(
				attempt,
				max_attempts,
				retry_in_ms = retry_in.as_millis() as u64,
				%error,
				"request attempt failed, retrying"
			);
		} else {
			tracing::warn!(attempt, max_attempts, %error, "request failed after final attempt");
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (attempt, max_attempts, error, retry_in);
	}
}

pub(crate) fn unauthorized_response(url: &Url, reason: &str) {
	#[cfg(feature = "tracing")]
	tracing::warn!(%url, reason, "server rejected credentials");
	#[cfg(not(feature = "tracing"))]
	let _ = (url, reason);
}

pub(crate) fn invalidating(reason: &str) {
	let localized = i18n::translate(reason);

	#[cfg(feature = "tracing")]
	tracing::warn!(reason, localized, "invalidating local credentials");
	#[cfg(not(feature = "tracing"))]
	let _ = (reason, localized);
}

pub(crate) fn invalidation_step_failed(step: &'static str, error: &StoreError) {
	#[cfg(feature = "tracing")]
	tracing::error!(step, %error, "invalidation step failed, continuing");
	#[cfg(not(feature = "tracing"))]
	let _ = (step, error);
}

pub(crate) fn credentials_unavailable(error: &StoreError) {
	#[cfg(feature = "tracing")]
	tracing::warn!(%error, "credential store unavailable, treating as signed out");
	#[cfg(not(feature = "tracing"))]
	let _ = error;
}

pub(crate) fn tokens_rotated() {
	#[cfg(feature = "tracing")]
	tracing::info!("access token refreshed");
}
