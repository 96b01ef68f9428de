//! Transport primitives for rating lookups.
//!
//! [`CheckHttpClient`] is the client's only dependency on an HTTP stack. The default
//! [`ReqwestHttpClient`] covers the common case; tests and embedding applications can plug in
//! their own implementation through [`JpadClient::with_http_client`].
//!
//! [`JpadClient::with_http_client`]: crate::client::JpadClient::with_http_client

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
#[cfg(feature = "reqwest")] use crate::error::ConfigError;
use crate::{_prelude::*, error::TransportError};

/// Boxed future returned by [`CheckHttpClient::get`].
pub type HttpFuture<'a> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports able to issue a single GET request.
///
/// Implementations must be `Send + Sync + 'static` so one transport can back many clients and
/// concurrent checks. Non-success statuses should be reported as [`TransportError::Status`]; the
/// client never reinterprets transport failures.
pub trait CheckHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Issues a GET for `url` (query string already attached) and returns the raw body.
	fn get(&self, url: Url) -> HttpFuture<'_>;
}

/// Raw response returned by a [`CheckHttpClient`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpResponse {
	/// HTTP status code returned by the rating endpoint.
	pub status: u16,
	/// Undecoded response body.
	pub body: Vec<u8>,
}
impl HttpResponse {
	/// Builds a `200 OK` response carrying `body`.
	pub fn ok(body: impl Into<Vec<u8>>) -> Self {
		Self { status: 200, body: body.into() }
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Timeouts, proxies, and TLS settings belong on the wrapped client; build one with
/// [`ReqwestClient::builder`] and pass it to [`ReqwestHttpClient::with_client`].
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds the wrapped client from a configured [`reqwest::ClientBuilder`].
	pub fn from_builder(builder: reqwest::ClientBuilder) -> Result<Self, ConfigError> {
		Ok(Self(builder.build()?))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl CheckHttpClient for ReqwestHttpClient {
	fn get(&self, url: Url) -> HttpFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let response = client.get(url).send().await?;
			let status = response.status();

			if !status.is_success() {
				return Err(TransportError::Status { status: status.as_u16() });
			}

			let body = response.bytes().await?.to_vec();

			Ok(HttpResponse { status: status.as_u16(), body })
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[cfg(feature = "reqwest")]
	#[test]
	fn reqwest_client_builds_from_configured_builder() {
		let client = ReqwestHttpClient::from_builder(
			ReqwestClient::builder().timeout(std::time::Duration::from_secs(5)),
		)
		.expect("Builder with a timeout should produce a client.");
		let _: &ReqwestClient = client.as_ref();
	}

	#[test]
	fn ok_response_defaults_to_200() {
		let response = HttpResponse::ok("{}");

		assert_eq!(response.status, 200);
		assert_eq!(response.body, b"{}");
	}
}
