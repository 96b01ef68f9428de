//! Request orchestration for rating lookups.
//!
//! [`JpadClient::check_url`] reduces the input to a hostname, derives the request token, issues a
//! single GET through the configured [`CheckHttpClient`], and normalizes the body into a
//! [`CheckResult`]. There are no retries and no caching: every call is one request, and every
//! failure reaches the caller with its own [`Error`] variant.

// self
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;
use crate::{
	_prelude::*,
	config::ClientConfig,
	hostname,
	http::CheckHttpClient,
	obs::{self, CheckOutcome, CheckSpan},
	rating::{self, CheckResult, RawCheckResponse},
	token,
};

/// Fixed query parameters the endpoint expects alongside `url`, `age`, and `tok`.
const OTF: &str = "y";
const UNK: &str = "y";
const PAR: &str = "jpad";

/// Client for the jpad rating endpoint.
///
/// Cloning is cheap; clones share the same transport.
pub struct JpadClient<C = DefaultHttpClient>
where
	C: ?Sized + CheckHttpClient,
{
	config: ClientConfig,
	http_client: Arc<C>,
}
#[cfg(feature = "reqwest")]
impl JpadClient<ReqwestHttpClient> {
	/// Creates a client backed by a default reqwest transport.
	pub fn new(config: ClientConfig) -> Self {
		Self::with_http_client(config, ReqwestHttpClient::default())
	}
}
impl<C> JpadClient<C>
where
	C: ?Sized + CheckHttpClient,
{
	/// Creates a client backed by a caller-supplied transport.
	pub fn with_http_client(config: ClientConfig, http_client: impl Into<Arc<C>>) -> Self {
		Self { config, http_client: http_client.into() }
	}

	/// Returns the configuration this client was built with.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Builds the exact request URL for `hostname` and `age`.
	///
	/// Query parameters are appended to any the base URL already carries, in the order
	/// `url`, `age`, `otf`, `unk`, `par`, `tok`.
	pub fn request_url(&self, hostname: &str, age: u8) -> Url {
		let token = token::generate_token(hostname, self.config.secret.expose());
		let mut url = self.config.base_url.clone();

		url.query_pairs_mut()
			.append_pair("url", hostname)
			.append_pair("age", &age.to_string())
			.append_pair("otf", OTF)
			.append_pair("unk", UNK)
			.append_pair("par", PAR)
			.append_pair("tok", &token);

		url
	}

	/// Checks whether content at `url_or_hostname` is permitted for `age`.
	///
	/// Accepts full URLs (`https://www.bild.de/news`) and bare hostnames (`bild.de`) alike.
	pub async fn check_url(&self, url_or_hostname: &str, age: u8) -> Result<CheckResult> {
		let hostname = hostname::extract_hostname(url_or_hostname);
		let span = CheckSpan::new("check_url", &hostname);

		obs::record_check_outcome(CheckOutcome::Attempt);

		let result = span
			.instrument(async {
				let response = self.http_client.get(self.request_url(&hostname, age)).await?;
				let raw = RawCheckResponse::decode(&response.body, Some(response.status))?;

				rating::normalize(raw)
			})
			.await;

		match &result {
			Ok(_) => obs::record_check_outcome(CheckOutcome::Success),
			Err(_e) => {
				#[cfg(feature = "tracing")]
				tracing::warn!(hostname = %hostname, error = %_e, "Rating lookup failed.");

				obs::record_check_outcome(CheckOutcome::Failure)
			},
		}

		result
	}
}
impl<C> Clone for JpadClient<C>
where
	C: ?Sized + CheckHttpClient,
{
	fn clone(&self) -> Self {
		Self { config: self.config.clone(), http_client: Arc::clone(&self.http_client) }
	}
}
impl<C> Debug for JpadClient<C>
where
	C: ?Sized + CheckHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("JpadClient").field("base_url", &self.config.base_url.as_str()).finish()
	}
}

/// Transport used by [`JpadClient`] when none is named.
#[cfg(feature = "reqwest")]
pub type DefaultHttpClient = ReqwestHttpClient;
/// Transport used by [`JpadClient`] when none is named.
#[cfg(not(feature = "reqwest"))]
pub type DefaultHttpClient = dyn CheckHttpClient;

#[cfg(test)]
mod tests {
	// std
	use std::sync::Mutex;
	// self
	use super::*;
	use crate::{
		error::TransportError,
		http::{HttpFuture, HttpResponse},
	};

	const SECRET: &str = "vopfe2krtkmotr";
	const BILD_DE: &str = r#"{"age":"12","scope-url":"*.bild.de/*","show":"1","cache":"1","overrule":"0","type":"label","list":"0","cou":"de","urlcheck":"bild.de","age-icon":"12","otf":"0","country":"de","age-issuer":"fsm"}"#;

	/// Replays one canned response and records every requested URL.
	#[derive(Default)]
	struct ReplayHttpClient {
		response: Option<HttpResponse>,
		requests: Mutex<Vec<Url>>,
	}
	impl ReplayHttpClient {
		fn replaying(body: &str) -> Self {
			Self { response: Some(HttpResponse::ok(body)), ..Default::default() }
		}

		fn requests(&self) -> Vec<Url> {
			self.requests.lock().expect("Request log lock should not be poisoned.").clone()
		}
	}
	impl CheckHttpClient for ReplayHttpClient {
		fn get(&self, url: Url) -> HttpFuture<'_> {
			self.requests.lock().expect("Request log lock should not be poisoned.").push(url);

			let response = self.response.clone();

			Box::pin(async move { response.ok_or(TransportError::Status { status: 502 }) })
		}
	}

	fn config() -> ClientConfig {
		ClientConfig::builder()
			.base_url(Url::parse("https://jpad.example.com/json.php").expect("Static URL."))
			.secret(SECRET)
			.build()
			.expect("Test config should build.")
	}

	#[test]
	fn request_url_carries_all_parameters_in_order() {
		let client: JpadClient<ReplayHttpClient> =
			JpadClient::with_http_client(config(), ReplayHttpClient::default());
		let url = client.request_url("bild.de", 16);

		assert_eq!(
			url.as_str(),
			"https://jpad.example.com/json.php?url=bild.de&age=16&otf=y&unk=y&par=jpad&tok=74c807"
		);
	}

	#[tokio::test]
	async fn check_url_extracts_hostname_before_requesting() {
		let transport = Arc::new(ReplayHttpClient::replaying(BILD_DE));
		let client: JpadClient<ReplayHttpClient> =
			JpadClient::with_http_client(config(), Arc::clone(&transport));
		let result = client
			.check_url("https://www.bild.de/politik", 16)
			.await
			.expect("Replayed response should normalize.");

		assert_eq!(result.age, 12);
		assert!(result.show);

		let requests = transport.requests();

		assert_eq!(requests.len(), 1);
		assert!(requests[0].query_pairs().any(|(k, v)| k == "url" && v == "www.bild.de"));
	}

	#[tokio::test]
	async fn check_url_never_caches() {
		let transport = Arc::new(ReplayHttpClient::replaying(BILD_DE));
		let client: JpadClient<ReplayHttpClient> =
			JpadClient::with_http_client(config(), Arc::clone(&transport));

		client.check_url("bild.de", 16).await.expect("First lookup should succeed.");
		client.clone().check_url("bild.de", 16).await.expect("Second lookup should succeed.");

		assert_eq!(transport.requests().len(), 2);
	}

	#[tokio::test]
	async fn transport_failures_pass_through() {
		let client: JpadClient<ReplayHttpClient> =
			JpadClient::with_http_client(config(), ReplayHttpClient::default());
		let err = client.check_url("bild.de", 16).await.expect_err("No canned response.");

		assert!(matches!(err, Error::Transport(TransportError::Status { status: 502 })));
	}

	#[tokio::test]
	async fn plain_text_body_is_malformed() {
		let client: JpadClient<ReplayHttpClient> =
			JpadClient::with_http_client(config(), ReplayHttpClient::replaying("Access denied"));
		let err = client.check_url("bild.de", 16).await.expect_err("Plain text is invalid.");

		assert!(matches!(err, Error::MalformedResponse { status: Some(200), .. }));
		assert_eq!(err.to_string(), "The API returned an invalid result.");
	}

	#[test]
	fn debug_hides_secret() {
		let client: JpadClient<ReplayHttpClient> =
			JpadClient::with_http_client(config(), ReplayHttpClient::default());

		assert!(!format!("{client:?}").contains(SECRET));
	}
}
