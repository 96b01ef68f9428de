//! Async client for the JusProg jpad age-rating service: derive the request token, query a
//! hostname, and get a typed age gate back.
//!
//! ```no_run
//! # async fn run() -> jpad_client::error::Result<()> {
//! use jpad_client::{client::JpadClient, config::ClientConfig, url::Url};
//!
//! let config = ClientConfig::builder()
//! 	.base_url(Url::parse("https://jpad.example.com/json.php").expect("static URL"))
//! 	.secret("shared-secret")
//! 	.build()?;
//! let client = JpadClient::new(config);
//! let result = client.check_url("https://www.example.com/news", 16).await?;
//!
//! println!("{result}");
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod client;
pub mod config;
pub mod error;
pub mod hostname;
pub mod http;
pub mod obs;
pub mod rating;
pub mod token;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// std
	use std::time::Duration;
	// self
	use crate::{client::JpadClient, config::ClientConfig, http::ReqwestHttpClient};

	/// Shared secret used by integration tests; pairs with the recorded token vectors.
	pub const TEST_SECRET: &str = "vopfe2krtkmotr";

	/// Builds a reqwest HTTP client with a short timeout so a stalled mock fails the test instead
	/// of hanging it.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		ReqwestHttpClient::from_builder(ReqwestClient::builder().timeout(Duration::from_secs(10)))
			.expect("Failed to build Reqwest client for tests.")
	}

	/// Constructs a [`JpadClient`] pointed at `endpoint` (typically `MockServer::url("/json.php")`)
	/// and keyed with [`TEST_SECRET`].
	pub fn build_mock_client(endpoint: &str) -> JpadClient<ReqwestHttpClient> {
		let config = ClientConfig::builder()
			.base_url_str(endpoint)
			.expect("Mock endpoint should parse successfully.")
			.secret(TEST_SECRET)
			.build()
			.expect("Mock client config should build successfully.");

		JpadClient::with_http_client(config, test_reqwest_http_client())
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
