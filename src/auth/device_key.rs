//! Process-scoped slot for the device's private key material.

// self
use crate::_prelude::*;

/// Private key bytes held in memory for the lifetime of the client.
#[derive(Clone, PartialEq, Eq)]
pub struct DeviceKey(Vec<u8>);
impl DeviceKey {
	/// Wraps raw key material.
	pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
		Self(bytes.into())
	}

	/// Returns the key bytes. Callers must avoid logging them.
	pub fn expose(&self) -> &[u8] {
		&self.0
	}
}
impl Debug for DeviceKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("DeviceKey").field(&"<redacted>").finish()
	}
}

/// Optional [`DeviceKey`] owned by an [`ApiClient`](crate::client::ApiClient).
///
/// Producing the key is the activation surface's job; invalidation empties the slot.
#[derive(Debug, Default)]
pub struct DeviceKeySlot(Mutex<Option<DeviceKey>>);
impl DeviceKeySlot {
	/// Stores `key`, replacing any previous key.
	pub fn set(&self, key: DeviceKey) {
		*self.0.lock() = Some(key);
	}

	/// Returns a clone of the current key, if any.
	pub fn get(&self) -> Option<DeviceKey> {
		self.0.lock().clone()
	}

	/// Returns `true` when a key is held.
	pub fn is_set(&self) -> bool {
		self.0.lock().is_some()
	}

	/// Empties the slot, returning the previous key.
	pub fn clear(&self) -> Option<DeviceKey> {
		self.0.lock().take()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn slot_set_and_clear() {
		let slot = DeviceKeySlot::default();

		assert!(!slot.is_set());

		slot.set(DeviceKey::new(vec![1, 2, 3]));

		assert_eq!(slot.get().map(|key| key.expose().to_vec()), Some(vec![1, 2, 3]));
		assert!(slot.clear().is_some());
		assert!(!slot.is_set());
		assert!(slot.clear().is_none());
	}

	#[test]
	fn key_debug_redacts() {
		assert_eq!(format!("{:?}", DeviceKey::new(b"k".to_vec())), "DeviceKey(\"<redacted>\")");
	}
}
