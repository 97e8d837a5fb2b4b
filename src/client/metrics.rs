// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for network attempts and invalidations.
#[derive(Debug, Default)]
pub struct FetchMetrics {
	attempts: AtomicU64,
	retries: AtomicU64,
	invalidations: AtomicU64,
}
impl FetchMetrics {
	/// Returns the total number of transport attempts (initial attempts plus retries).
	pub fn attempts(&self) -> u64 {
		self.attempts.load(Ordering::Relaxed)
	}

	/// Returns the number of retries scheduled after a failed attempt.
	pub fn retries(&self) -> u64 {
		self.retries.load(Ordering::Relaxed)
	}

	/// Returns the number of times the invalidation handler ran.
	pub fn invalidations(&self) -> u64 {
		self.invalidations.load(Ordering::Relaxed)
	}

	pub(crate) fn record_attempt(&self) {
		self.attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_retry(&self) {
		self.retries.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_invalidation(&self) {
		self.invalidations.fetch_add(1, Ordering::Relaxed);
	}
}
