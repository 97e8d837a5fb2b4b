//! Persisted auth state record.

// crates.io
use serde_json::{Map, Value};
// self
use crate::{_prelude::*, auth::TokenSecret};

/// Access/refresh token pair stored for the current device.
///
/// No expiry is tracked: tokens are valid until the server says otherwise. Fields written by
/// other collaborators (activation metadata and the like) are kept in `extra` and survive
/// token rotation untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
	/// Bearer token attached to authenticated requests.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub access_token: Option<TokenSecret>,
	/// Token exchanged at the refresh endpoint for a new pair.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub refresh_token: Option<TokenSecret>,
	/// Any other stored fields.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}
impl AuthState {
	/// Creates a state holding both tokens.
	pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
		Self {
			access_token: Some(TokenSecret::new(access_token)),
			refresh_token: Some(TokenSecret::new(refresh_token)),
			extra: Map::new(),
		}
	}

	/// Returns the access token when present and non-empty.
	pub fn access_token(&self) -> Option<&TokenSecret> {
		self.access_token.as_ref().filter(|secret| !secret.is_empty())
	}

	/// Returns the refresh token when present and non-empty.
	pub fn refresh_token(&self) -> Option<&TokenSecret> {
		self.refresh_token.as_ref().filter(|secret| !secret.is_empty())
	}

	/// Replaces the token fields, keeping the previous refresh token when none was issued.
	pub fn rotate(&mut self, access_token: TokenSecret, refresh_token: Option<TokenSecret>) {
		self.access_token = Some(access_token);

		if let Some(refresh) = refresh_token {
			self.refresh_token = Some(refresh);
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn unknown_fields_survive_rotation() {
		let raw = serde_json::json!({
			"accessToken": "old-access",
			"refreshToken": "old-refresh",
			"deviceName": "kiosk-3",
		});
		let mut state: AuthState =
			serde_json::from_value(raw).expect("Stored state should deserialize.");

		state.rotate(TokenSecret::new("new-access"), None);

		let written = serde_json::to_value(&state).expect("State should serialize.");

		assert_eq!(written["accessToken"], "new-access");
		assert_eq!(written["refreshToken"], "old-refresh");
		assert_eq!(written["deviceName"], "kiosk-3");
	}

	#[test]
	fn empty_tokens_count_as_absent() {
		let state = AuthState::new("", "refresh");

		assert!(state.access_token().is_none());
		assert!(state.refresh_token().is_some());
		assert!(AuthState::default().refresh_token().is_none());
	}
}
