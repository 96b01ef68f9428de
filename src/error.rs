//! Client-level error types shared by the normalizer, transport, and configuration layers.

// std
use std::num::ParseIntError;
// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
///
/// Every variant is distinguishable so batch callers can record a per-hostname failure and
/// keep going.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, non-2xx status).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// The response body is not a flat JSON object.
	#[error("The API returned an invalid result.")]
	MalformedResponse {
		/// Structured decoding failure, including the JSON path that failed.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// The decoded response lacks a field every rating must carry.
	#[error("The API response is missing the `{field}` field.")]
	ResponseShape {
		/// Canonical (underscore-joined) name of the missing field.
		field: &'static str,
	},
	/// A field expected to hold an integer does not.
	#[error("The `{field}` field is not a valid integer: {value:?}.")]
	Parse {
		/// Canonical name of the offending field.
		field: &'static str,
		/// Raw value returned by the API.
		value: String,
		/// Underlying integer parsing failure.
		#[source]
		source: ParseIntError,
	},
}

/// Configuration and validation failures raised while building a client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// No base URL was supplied.
	#[error("Missing base URL.")]
	MissingBaseUrl,
	/// No shared secret was supplied, or it was empty.
	#[error("Missing shared secret.")]
	MissingSecret,
	/// Base URL cannot be parsed.
	#[error("Base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL uses a scheme other than `http` or `https`.
	#[error("The base URL must use HTTP or HTTPS: {url}.")]
	UnsupportedScheme {
		/// Base URL that failed validation.
		url: String,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, HTTP status).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the rating endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Rating endpoint answered with a non-success status.
	#[error("Rating endpoint responded with HTTP {status}.")]
	Status {
		/// HTTP status code.
		status: u16,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
