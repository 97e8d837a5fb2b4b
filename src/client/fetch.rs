//! Resilient fetch: bounded per-attempt timeouts, exponential backoff, and the single 401
//! interception point.
//!
//! Every call path in the client (direct fetches, authenticated requests, refreshes) funnels
//! through [`ApiClient::fetch_with_retry`], so a 401 anywhere produces exactly one invalidation.
//! Transport failures and timeouts are retried up to the policy's attempt budget; a 401 ends
//! the loop immediately regardless of the remaining budget. Any other status is handed back
//! to the caller untouched.

// crates.io
use ::http::StatusCode;
// self
use crate::{
	_prelude::*,
	client::ApiClient,
	http::{ApiRequest, ApiResponse, HttpTransport},
	i18n::ids,
	obs::{self, CallKind, CallOutcome, CallSpan},
};

#[derive(Deserialize)]
struct ErrorBody {
	error: String,
}

impl<C> ApiClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Sends `request`, retrying transport failures and timeouts with exponential backoff.
	///
	/// A 401 response invalidates local credentials, navigates to the entry surface, and fails
	/// with [`Error::Unauthorized`] without further retries. When every attempt fails, the last
	/// error is returned.
	pub async fn fetch_with_retry(&self, request: ApiRequest) -> Result<ApiResponse> {
		const KIND: CallKind = CallKind::Fetch;

		let span = CallSpan::new(KIND, "fetch_with_retry");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span.instrument(self.send_with_retry(request)).await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}

	pub(crate) async fn send_with_retry(&self, request: ApiRequest) -> Result<ApiResponse> {
		let policy = self.config.retry;
		let max_attempts = policy.max_attempts.max(1);
		let mut attempt = 1;

		loop {
			self.metrics.record_attempt();

			let error = match self.attempt(&request, policy.attempt_timeout).await {
				Ok(response) if response.status == StatusCode::UNAUTHORIZED =>
					return Err(self.reject_unauthorized(&request.url, &response).await),
				Ok(response) => return Ok(response),
				Err(error) => error,
			};

			if attempt >= max_attempts {
				obs::attempt_failed(attempt, max_attempts, &error, Duration::ZERO);

				return Err(error);
			}

			attempt += 1;

			let delay = policy.backoff_delay(attempt);

			obs::attempt_failed(attempt - 1, max_attempts, &error, delay);
			self.metrics.record_retry();
			tokio::time::sleep(delay).await;
		}
	}

	async fn attempt(&self, request: &ApiRequest, budget: Duration) -> Result<ApiResponse> {
		// Dropping the transport future on expiry aborts the in-flight request.
		match tokio::time::timeout(budget, self.transport.execute(request.clone())).await {
			Ok(Ok(response)) => Ok(response),
			Ok(Err(source)) => Err(Error::network(source)),
			Err(_elapsed) => Err(Error::timeout(budget)),
		}
	}

	async fn reject_unauthorized(&self, url: &Url, response: &ApiResponse) -> Error {
		let reason = error_reason(response).unwrap_or_else(|| ids::UNAUTHORIZED.into());

		obs::unauthorized_response(url, &reason);
		self.invalidate_and_redirect(&reason).await;

		Error::unauthorized(reason)
	}
}

/// Extracts the `error` field of a JSON error body, if present and non-empty.
pub(crate) fn error_reason(response: &ApiResponse) -> Option<String> {
	response.json::<ErrorBody>().ok().map(|body| body.error).filter(|reason| !reason.is_empty())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn error_reason_falls_back_on_malformed_bodies() {
		let ok = ApiResponse::new(StatusCode::UNAUTHORIZED, r#"{"error":"Device revoked"}"#);

		assert_eq!(error_reason(&ok).as_deref(), Some("Device revoked"));

		for body in ["", "<html>401</html>", r#"{"message":"nope"}"#, r#"{"error":""}"#] {
			let response = ApiResponse::new(StatusCode::UNAUTHORIZED, body);

			assert_eq!(error_reason(&response), None, "Body {body:?} must not yield a reason.");
		}
	}
}
