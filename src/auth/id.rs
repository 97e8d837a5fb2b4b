//! Installation identifier persisted alongside the auth state.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

/// Stable identifier of this app installation, sent with authenticated requests.
///
/// The value is opaque: whatever the activation surface stored is carried verbatim. Whether it
/// can travel in an HTTP header is checked only when a request is built.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstallId(String);
impl InstallId {
	/// Wraps a stored identifier.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns `true` when the identifier holds no characters.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl Deref for InstallId {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for InstallId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Borrow<str> for InstallId {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl From<InstallId> for String {
	fn from(value: InstallId) -> Self {
		value.0
	}
}
impl From<String> for InstallId {
	fn from(value: String) -> Self {
		Self(value)
	}
}
impl From<&str> for InstallId {
	fn from(value: &str) -> Self {
		Self(value.to_owned())
	}
}
impl Debug for InstallId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Install({})", self.0)
	}
}
impl Display for InstallId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
