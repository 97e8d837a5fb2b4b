//! Fixtures shared by the integration tests.

#![allow(dead_code)]

// std
use std::{
	collections::VecDeque,
	io::{Error as IoError, ErrorKind},
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
};
// crates.io
use httpmock::MockServer;
use parking_lot::Mutex;
use serde_json::{Value, json};
// self
use pwa_auth_fetch::{
	auth::AuthState,
	client::ApiClient,
	config::ClientConfig,
	error::TransportError,
	http::{ApiRequest, ApiResponse, HttpTransport, TransportFuture},
	http_types::StatusCode,
	nav::RecordingNavigator,
	store::{
		AUTH_STATE_KEY, CredentialStore, INSTALL_ID_KEY, MemorySessionCache, MemoryStore,
		SessionValidation, StoreError, StoreFuture,
	},
	url::Url,
};

/// One scripted transport outcome.
#[derive(Clone, Debug)]
pub enum Step {
	/// Resolve with the given status and body.
	Respond(u16, &'static str),
	/// Fail with a connection error.
	Fail,
	/// Never resolve; only the per-attempt timeout ends it.
	Hang,
}

/// Transport that replays a fixed script and records every request it sees.
#[derive(Clone, Debug, Default)]
pub struct ScriptedTransport {
	steps: Arc<Mutex<VecDeque<Step>>>,
	requests: Arc<Mutex<Vec<ApiRequest>>>,
}
impl ScriptedTransport {
	pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
		Self { steps: Arc::new(Mutex::new(steps.into_iter().collect())), ..Default::default() }
	}

	pub fn calls(&self) -> usize {
		self.requests.lock().len()
	}

	pub fn requests(&self) -> Vec<ApiRequest> {
		self.requests.lock().clone()
	}
}
impl HttpTransport for ScriptedTransport {
	fn execute(&self, request: ApiRequest) -> TransportFuture<'_> {
		self.requests.lock().push(request);

		let step = self.steps.lock().pop_front().unwrap_or(Step::Fail);

		Box::pin(async move {
			match step {
				Step::Respond(status, body) => Ok(ApiResponse::new(
					StatusCode::from_u16(status).expect("Scripted status should be valid."),
					body,
				)),
				Step::Fail => Err(TransportError::Io(IoError::new(
					ErrorKind::ConnectionRefused,
					"connection refused",
				))),
				Step::Hang => std::future::pending().await,
			}
		})
	}
}

/// Store whose `clear` always fails while reads and writes succeed.
#[derive(Clone, Debug, Default)]
pub struct FailingClearStore {
	pub inner: MemoryStore,
}
impl CredentialStore for FailingClearStore {
	fn get<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<Value>> {
		self.inner.get(key)
	}

	fn put<'a>(&'a self, key: &'a str, value: Value) -> StoreFuture<'a, ()> {
		self.inner.put(key, value)
	}

	fn clear(&self) -> StoreFuture<'_, ()> {
		Box::pin(async { Err(StoreError::Backend { message: "database locked".into() }) })
	}
}

/// Store whose reads always fail while writes and clears succeed.
#[derive(Clone, Debug, Default)]
pub struct FailingGetStore {
	pub inner: MemoryStore,
}
impl CredentialStore for FailingGetStore {
	fn get<'a>(&'a self, _: &'a str) -> StoreFuture<'a, Option<Value>> {
		Box::pin(async { Err(StoreError::Backend { message: "store unavailable".into() }) })
	}

	fn put<'a>(&'a self, key: &'a str, value: Value) -> StoreFuture<'a, ()> {
		self.inner.put(key, value)
	}

	fn clear(&self) -> StoreFuture<'_, ()> {
		self.inner.clear()
	}
}

/// Store that counts writes on top of a [`MemoryStore`].
#[derive(Clone, Debug, Default)]
pub struct CountingStore {
	pub inner: MemoryStore,
	puts: Arc<AtomicUsize>,
}
impl CountingStore {
	pub fn puts(&self) -> usize {
		self.puts.load(Ordering::SeqCst)
	}
}
impl CredentialStore for CountingStore {
	fn get<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<Value>> {
		self.inner.get(key)
	}

	fn put<'a>(&'a self, key: &'a str, value: Value) -> StoreFuture<'a, ()> {
		self.puts.fetch_add(1, Ordering::SeqCst);
		self.inner.put(key, value)
	}

	fn clear(&self) -> StoreFuture<'_, ()> {
		self.inner.clear()
	}
}

/// Client plus handles to every collaborator it was built with.
pub struct Harness<C, S>
where
	C: HttpTransport,
{
	pub client: ApiClient<C>,
	pub transport: Arc<C>,
	pub store: S,
	pub session: MemorySessionCache,
	pub navigator: RecordingNavigator,
}

pub fn config(base_url: &str) -> ClientConfig {
	ClientConfig::builder(Url::parse(base_url).expect("Base URL fixture should parse."))
		.build()
		.expect("Client config fixture should be valid.")
}

/// Plain-HTTP config pointing at a running mock server.
pub fn mock_config(server: &MockServer) -> ClientConfig {
	config(&format!("http://{}", server.address()))
}

pub fn harness<C, S>(config: ClientConfig, transport: C, store: S) -> Harness<C, S>
where
	C: HttpTransport,
	S: 'static + Clone + CredentialStore,
{
	let transport = Arc::new(transport);
	let session = MemorySessionCache::default();
	let navigator = RecordingNavigator::default();
	let client = ApiClient::with_transport(
		config,
		transport.clone(),
		Arc::new(store.clone()),
		Arc::new(session.clone()),
		Arc::new(navigator.clone()),
	);

	Harness { client, transport, store, session, navigator }
}

pub fn scripted(steps: impl IntoIterator<Item = Step>) -> Harness<ScriptedTransport, MemoryStore> {
	harness(config("https://api.example.test"), ScriptedTransport::new(steps), MemoryStore::default())
}

/// Stores an activated device: token pair, install id, and validated session flags.
pub async fn seed_credentials(
	store: &dyn CredentialStore,
	session: &MemorySessionCache,
	access: &str,
	refresh: &str,
) {
	let mut state = AuthState::new(access, refresh);

	state.extra.insert("deviceName".into(), json!("kitchen tablet"));
	store
		.put(AUTH_STATE_KEY, serde_json::to_value(&state).expect("Auth state fixture should encode."))
		.await
		.expect("Failed to seed auth state.");
	store
		.put(INSTALL_ID_KEY, json!("install-42"))
		.await
		.expect("Failed to seed install id.");
	SessionValidation::validated_at(time::OffsetDateTime::now_utc())
		.save(session)
		.expect("Failed to seed session flags.");
}
