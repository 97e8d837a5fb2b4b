//! Auth-domain identifiers, token secrets, persisted auth state, and the in-memory device key.

pub mod device_key;
pub mod id;
pub mod secret;
pub mod state;

pub use device_key::*;
pub use id::*;
pub use secret::*;
pub use state::*;
