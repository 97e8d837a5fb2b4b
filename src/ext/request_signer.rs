//! Request signing contract applied to authenticated requests right before dispatch.

// self
use crate::{
	_prelude::*,
	auth::{DeviceKey, TokenSecret},
	http::ApiRequest,
};

/// Credentials available to a [`RequestSigner`].
#[derive(Debug)]
pub struct SigningContext<'a> {
	/// Access token the request is authorized with.
	pub access_token: &'a TokenSecret,
	/// Device key held in memory, if the activation surface produced one.
	pub device_key: Option<DeviceKey>,
}

/// Adds proof headers (for example a DPoP proof bound to the access token) to a fully built
/// authenticated request.
///
/// The signer runs after default and caller headers are merged, so it sees the final method
/// and URL and may overwrite any header.
pub trait RequestSigner
where
	Self: Send + Sync,
{
	/// Consumes the request and returns it with proof material attached.
	fn sign(&self, request: ApiRequest, context: SigningContext<'_>) -> Result<ApiRequest>;
}
