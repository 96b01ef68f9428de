//! Request-token derivation expected by the jpad rating endpoint.
//!
//! The endpoint authenticates every lookup with a six-character `tok` parameter derived from the
//! queried hostname and a secret shared with the service operator. The derivation is fixed by
//! the remote verifier and must be reproduced exactly:
//!
//! 1. concatenate the hostname and the secret, hostname first;
//! 2. take the lowercase hexadecimal MD5 digest of the UTF-8 bytes;
//! 3. append the decimal character count of the hostname;
//! 4. keep the last six characters.
//!
//! MD5 provides no security here; it is simply what the verifier computes.

// self
use crate::_prelude::*;

/// Number of characters the verifier compares.
pub const TOKEN_LEN: usize = 6;

/// Redacted wrapper for the shared secret, keeping it out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner secret. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Returns `true` when the secret is empty.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl From<&str> for TokenSecret {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}
impl From<String> for TokenSecret {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Derives the `tok` query parameter for `hostname`.
///
/// Always succeeds, including for an empty hostname (a length of `0` is appended).
pub fn generate_token(hostname: &str, secret: &str) -> String {
	let digest = md5::compute(format!("{hostname}{secret}"));
	let combined = format!("{digest:x}{}", hostname.chars().count());
	// The digest is ASCII hex and the suffix ASCII digits, so byte offsets are char offsets.
	let start = combined.len().saturating_sub(TOKEN_LEN);

	combined[start..].to_owned()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	const SECRET: &str = "vopfe2krtkmotr";

	#[test]
	fn token_matches_reference_vectors() {
		assert_eq!(generate_token("bild.de", SECRET), "74c807");
		assert_eq!(generate_token("invalidurl", SECRET), "3a0e10");
		assert_eq!(generate_token("sexism-invalid-url", SECRET), "ed0a18");
	}

	#[test]
	fn token_is_deterministic() {
		let first = generate_token("bild.de", SECRET);

		for _ in 0..16 {
			assert_eq!(generate_token("bild.de", SECRET), first);
		}
	}

	#[test]
	fn token_changes_with_either_input() {
		let base = generate_token("bild.de", SECRET);

		assert_ne!(generate_token("bild.dk", SECRET), base);
		assert_ne!(generate_token("bild.de", "vopfe2krtkmots"), base);
	}

	#[test]
	fn token_always_has_fixed_length() {
		assert_eq!(generate_token("", SECRET), "87e080");

		for hostname in ["a", "bild.de", "a-very-long-hostname.with.many.labels.example.org"] {
			assert_eq!(generate_token(hostname, SECRET).len(), TOKEN_LEN);
		}

		let long = "x".repeat(10_000);

		assert_eq!(generate_token(&long, SECRET).len(), TOKEN_LEN);
	}

	#[test]
	fn multi_digit_length_suffix_is_kept() {
		// md5("aaaaaaaaaaaak") ends in "e5da", followed by the length "12".
		assert_eq!(generate_token("aaaaaaaaaaaa", "k"), "e5da12");
	}

	#[test]
	fn length_suffix_counts_characters() {
		let hostname = "bücher.de";
		let token = generate_token(hostname, SECRET);

		assert!(token.ends_with('9'));
		assert_eq!(token.len(), TOKEN_LEN);
	}

	#[test]
	fn secret_formatters_redact() {
		let secret = TokenSecret::new("super-secret");

		assert_eq!(format!("{secret:?}"), "TokenSecret(\"<redacted>\")");
		assert_eq!(format!("{secret}"), "<redacted>");
		assert_eq!(secret.expose(), "super-secret");
	}
}
