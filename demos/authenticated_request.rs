//! Walks an activated device through an authenticated call, a token refresh, and a server-side
//! revocation against a local mock backend.
//!
//! 1. Seed a [`MemoryStore`] with the token pair and install id written at activation.
//! 2. Call a protected endpoint through [`ApiClient::authenticated_request`].
//! 3. Rotate the pair with [`ApiClient::refresh_access_token`].
//! 4. Let the backend answer 401 and watch the client wipe credentials and navigate away.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
use url::Url;
// self
use pwa_auth_fetch::{
	auth::AuthState,
	client::ApiClient,
	config::ClientConfig,
	http::RequestOptions,
	nav::RecordingNavigator,
	store::{self, CredentialStore, MemorySessionCache, MemoryStore},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let store = MemoryStore::default();
	let session = MemorySessionCache::default();
	let navigator = RecordingNavigator::default();

	store::save_auth_state(&store, &AuthState::new("access-1", "refresh-1")).await?;
	store.put(store::INSTALL_ID_KEY, json!("install-demo")).await?;

	let base_url = Url::parse(&format!("http://{}", server.address()))?;
	let config = ClientConfig::builder(base_url).build()?;
	let client = ApiClient::new(
		config,
		Arc::new(store.clone()),
		Arc::new(session),
		Arc::new(navigator.clone()),
	)?;
	let profile = server
		.mock_async(|when, then| {
			when.method(GET).path("/devices/me").header("authorization", "Bearer access-1");
			then.status(200).json_body(json!({ "name": "front desk" }));
		})
		.await;
	let response = client.authenticated_request("/devices/me", RequestOptions::get()).await?;

	println!("Profile lookup returned {} with body {}.", response.status, response.text());

	let refresh = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/auth/refresh")
				.json_body(json!({ "refresh_token": "refresh-1" }));
			then.status(200)
				.json_body(json!({ "access_token": "access-2", "refresh_token": "refresh-2" }));
		})
		.await;
	let access = client.refresh_access_token().await?;

	println!("Refresh issued a new access token: {access}.");

	profile.delete_async().await;
	refresh.delete_async().await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/devices/me");
			then.status(401).json_body(json!({ "error": "Device revoked" }));
		})
		.await;

	match client.authenticated_request("/devices/me", RequestOptions::get()).await {
		Ok(response) => println!("Unexpected success: {}.", response.status),
		Err(e) => println!("Request rejected: {e}."),
	}

	println!("Navigated to {:?}; credentials left: {}.", navigator.visits(), store.len());

	Ok(())
}
