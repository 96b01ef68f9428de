//! Client configuration: the rating endpoint and the shared secret.
//!
//! The library hardcodes neither value. Embedding applications build a [`ClientConfig`] through
//! [`ClientConfig::builder`], or deserialize one from their own configuration source and call
//! [`ClientConfig::validate`].

// self
use crate::{_prelude::*, error::ConfigError, token::TokenSecret};

/// Validated settings consumed by [`JpadClient`](crate::client::JpadClient).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
	/// Rating endpoint, e.g. `https://jpad.example.com/json.php`.
	pub base_url: Url,
	/// Secret shared with the service operator, used to derive request tokens.
	pub secret: TokenSecret,
}
impl ClientConfig {
	/// Creates a new, empty builder.
	pub fn builder() -> ClientConfigBuilder {
		ClientConfigBuilder::default()
	}

	/// Validates invariants for the configuration.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.secret.is_empty() {
			return Err(ConfigError::MissingSecret);
		}
		if !matches!(self.base_url.scheme(), "http" | "https") {
			return Err(ConfigError::UnsupportedScheme { url: self.base_url.to_string() });
		}

		Ok(())
	}
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
	/// Rating endpoint.
	pub base_url: Option<Url>,
	/// Shared secret.
	pub secret: Option<TokenSecret>,
}
impl ClientConfigBuilder {
	/// Sets the rating endpoint.
	pub fn base_url(mut self, url: Url) -> Self {
		self.base_url = Some(url);

		self
	}

	/// Parses and sets the rating endpoint.
	pub fn base_url_str(mut self, url: &str) -> Result<Self, ConfigError> {
		let url = Url::parse(url).map_err(|source| ConfigError::InvalidBaseUrl { source })?;

		self.base_url = Some(url);

		Ok(self)
	}

	/// Sets the shared secret.
	pub fn secret(mut self, secret: impl Into<TokenSecret>) -> Self {
		self.secret = Some(secret.into());

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		let base_url = self.base_url.ok_or(ConfigError::MissingBaseUrl)?;
		let secret = self.secret.ok_or(ConfigError::MissingSecret)?;
		let config = ClientConfig { base_url, secret };

		config.validate()?;

		Ok(config)
	}
}
