//! Navigation capability used to send the app back to its entry surface.

// self
use crate::_prelude::*;

/// Moves the application to another surface.
///
/// Implementations must not fail: invalidation treats navigation as its unconditional last step.
pub trait Navigator
where
	Self: Send + Sync,
{
	/// Navigates to `path` (relative to the app origin).
	fn navigate(&self, path: &str);
}
impl<F> Navigator for F
where
	F: Fn(&str) + Send + Sync,
{
	fn navigate(&self, path: &str) {
		self(path)
	}
}

/// [`Navigator`] that records every target instead of moving anywhere.
///
/// Useful for headless embeddings and for asserting redirect behavior.
#[derive(Clone, Debug, Default)]
pub struct RecordingNavigator(Arc<Mutex<Vec<String>>>);
impl RecordingNavigator {
	/// Returns every target navigated to so far, oldest first.
	pub fn visits(&self) -> Vec<String> {
		self.0.lock().clone()
	}

	/// Returns the number of navigations so far.
	pub fn count(&self) -> usize {
		self.0.lock().len()
	}
}
impl Navigator for RecordingNavigator {
	fn navigate(&self, path: &str) {
		self.0.lock().push(path.to_owned());
	}
}
