//! Storage contracts and built-in adapters for persisted credentials and session flags.

pub mod file;
pub mod memory;
pub mod session;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use session::{MemorySessionCache, SessionCache, SessionValidation};

// crates.io
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	auth::{AuthState, InstallId},
};

/// Logical key of the persisted [`AuthState`] record.
pub const AUTH_STATE_KEY: &str = "auth_state";
/// Logical key of the persisted [`InstallId`].
pub const INSTALL_ID_KEY: &str = "install_id";

/// Boxed future returned by every [`CredentialStore`] operation.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Durable key-value table holding the device's credentials.
///
/// Every operation must be awaited to completion before dependent logic proceeds; the client
/// never issues two store operations concurrently within one call chain.
pub trait CredentialStore
where
	Self: Send + Sync,
{
	/// Reads the value stored under `key`.
	fn get<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<Value>>;

	/// Inserts or replaces the value stored under `key`.
	fn put<'a>(&'a self, key: &'a str, value: Value) -> StoreFuture<'a, ()>;

	/// Removes every entry from the table.
	fn clear(&self) -> StoreFuture<'_, ()>;
}

/// Error type produced by [`CredentialStore`] and [`SessionCache`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend or the typed helpers.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Loads the stored [`AuthState`], if any.
pub async fn load_auth_state(store: &dyn CredentialStore) -> Result<Option<AuthState>, StoreError> {
	decode(AUTH_STATE_KEY, store.get(AUTH_STATE_KEY).await?)
}

/// Persists `state` under [`AUTH_STATE_KEY`].
pub async fn save_auth_state(store: &dyn CredentialStore, state: &AuthState) -> Result<(), StoreError> {
	let value = serde_json::to_value(state).map_err(|e| StoreError::Serialization {
		message: format!("Failed to encode {AUTH_STATE_KEY}: {e}"),
	})?;

	store.put(AUTH_STATE_KEY, value).await
}

/// Loads the stored [`InstallId`], if any.
pub async fn load_install_id(store: &dyn CredentialStore) -> Result<Option<InstallId>, StoreError> {
	decode(INSTALL_ID_KEY, store.get(INSTALL_ID_KEY).await?)
}

fn decode<T>(key: &str, value: Option<Value>) -> Result<Option<T>, StoreError>
where
	T: for<'de> Deserialize<'de>,
{
	match value {
		None | Some(Value::Null) => Ok(None),
		Some(value) => serde_json::from_value(value).map(Some).map_err(|e| {
			StoreError::Serialization { message: format!("Failed to decode {key}: {e}") }
		}),
	}
}
