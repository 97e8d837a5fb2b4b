//! Public extension contracts.
//!
//! Proof-of-possession (DPoP) header generation is expected to plug in here; the crate ships
//! the seam without an implementation.

pub mod request_signer;

pub use request_signer::*;
