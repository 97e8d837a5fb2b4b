//! Session-scoped cache for the short-lived validation flags.

// crates.io
use time::format_description::well_known::Rfc3339;
// self
use crate::{_prelude::*, store::StoreError};

/// Session key recording whether the current session was validated.
pub const VALIDATED_KEY: &str = "validated";
/// Session key recording when the current session was validated.
pub const VALIDATED_AT_KEY: &str = "validated_at";

/// Tab/session-scoped string cache; entries never outlive the session.
pub trait SessionCache
where
	Self: Send + Sync,
{
	/// Reads the value stored under `key`.
	fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

	/// Inserts or replaces the value stored under `key`.
	fn set(&self, key: &str, value: String) -> Result<(), StoreError>;

	/// Removes `key`; removing an absent key succeeds.
	fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-process [`SessionCache`].
#[derive(Clone, Debug, Default)]
pub struct MemorySessionCache(Arc<RwLock<HashMap<String, String>>>);
impl MemorySessionCache {
	/// Returns `true` when nothing is cached.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}
}
impl SessionCache for MemorySessionCache {
	fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
		Ok(self.0.read().get(key).cloned())
	}

	fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
		self.0.write().insert(key.to_owned(), value);

		Ok(())
	}

	fn remove(&self, key: &str) -> Result<(), StoreError> {
		self.0.write().remove(key);

		Ok(())
	}
}

/// Typed view over the two validation flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionValidation {
	/// Whether the session passed validation.
	pub validated: bool,
	/// When validation happened, if recorded.
	pub validated_at: Option<OffsetDateTime>,
}
impl SessionValidation {
	/// Marks the session validated at `instant`.
	pub fn validated_at(instant: OffsetDateTime) -> Self {
		Self { validated: true, validated_at: Some(instant) }
	}

	/// Reads the flags; returns `None` when neither is present.
	pub fn load(cache: &dyn SessionCache) -> Result<Option<Self>, StoreError> {
		let validated = cache.get(VALIDATED_KEY)?;
		let validated_at = cache.get(VALIDATED_AT_KEY)?;

		if validated.is_none() && validated_at.is_none() {
			return Ok(None);
		}

		let validated_at = validated_at
			.map(|raw| {
				OffsetDateTime::parse(&raw, &Rfc3339).map_err(|e| StoreError::Serialization {
					message: format!("Failed to parse {VALIDATED_AT_KEY}: {e}"),
				})
			})
			.transpose()?;

		Ok(Some(Self { validated: validated.as_deref() == Some("true"), validated_at }))
	}

	/// Writes both flags.
	pub fn save(&self, cache: &dyn SessionCache) -> Result<(), StoreError> {
		cache.set(VALIDATED_KEY, self.validated.to_string())?;

		match self.validated_at {
			Some(instant) => {
				let raw = instant.format(&Rfc3339).map_err(|e| StoreError::Serialization {
					message: format!("Failed to format {VALIDATED_AT_KEY}: {e}"),
				})?;

				cache.set(VALIDATED_AT_KEY, raw)
			},
			None => cache.remove(VALIDATED_AT_KEY),
		}
	}

	/// Removes both flags, attempting the second even when the first fails.
	pub fn clear(cache: &dyn SessionCache) -> Result<(), StoreError> {
		let first = cache.remove(VALIDATED_KEY);
		let second = cache.remove(VALIDATED_AT_KEY);

		first.and(second)
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros::datetime;
	// self
	use super::*;

	#[test]
	fn validation_flags_round_trip() {
		let cache = MemorySessionCache::default();

		assert_eq!(SessionValidation::load(&cache).expect("Empty load should succeed."), None);

		let flags = SessionValidation::validated_at(datetime!(2026-10-19 08:30 UTC));

		flags.save(&cache).expect("Saving flags should succeed.");

		assert_eq!(SessionValidation::load(&cache).expect("Load should succeed."), Some(flags));

		SessionValidation::clear(&cache).expect("Clearing flags should succeed.");

		assert!(cache.is_empty());
	}

	#[test]
	fn malformed_timestamp_is_a_serialization_error() {
		let cache = MemorySessionCache::default();

		cache.set(VALIDATED_AT_KEY, "yesterday".into()).expect("Seeding should succeed.");

		assert!(matches!(
			SessionValidation::load(&cache),
			Err(StoreError::Serialization { .. })
		));
	}
}
