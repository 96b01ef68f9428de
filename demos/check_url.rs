//! Demonstrates checking a bare hostname and a full URL against a rating endpoint served by
//! `httpmock`, so the demo runs offline.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use url::Url;
// self
use jpad_client::{client::JpadClient, config::ClientConfig, error::Error};

const SECRET: &str = "demo-secret";

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let rating_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/json.php").query_param("url", "bild.de");
			then.status(200).body(
				"{\"age\":\"12\",\"scope-url\":\"*.bild.de/*\",\"show\":\"1\",\"cache\":\"1\",\
				 \"overrule\":\"0\",\"type\":\"domain\",\"list\":\"0\",\"cou\":\"de\",\
				 \"urlcheck\":\"bild.de\",\"age-icon\":\"12\",\"otf\":\"0\",\"country\":\"de\",\
				 \"age-issuer\":\"fsm\"}",
			);
		})
		.await;
	let broken_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/json.php").query_param("url", "broken.example");
			then.status(200).body("Invalid token.");
		})
		.await;
	let config = ClientConfig::builder()
		.base_url(Url::parse(&server.url("/json.php"))?)
		.secret(SECRET)
		.build()?;
	let client = JpadClient::new(config);

	for input in ["bild.de", "https://bild.de", "https://broken.example/index.html"] {
		match client.check_url(input, 16).await {
			Ok(result) => println!("{input}: {result}"),
			Err(e @ Error::MalformedResponse { .. }) => println!("{input}: skipped ({e})"),
			Err(e) => return Err(e.into()),
		}
	}

	rating_mock.assert_calls_async(2).await;
	broken_mock.assert_async().await;

	Ok(())
}
