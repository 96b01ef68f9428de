//! Hostname extraction for user-supplied URLs or bare hostnames.

// crates.io
use url::Host;
// self
use crate::_prelude::*;

/// Reduces `input` to the hostname the rating endpoint expects.
///
/// Inputs that parse as a URL with a host (`https://www.bild.de/path`) yield that host, lowercased
/// and without scheme, port, or path. Internationalized hosts come back in Unicode form, so
/// `https://bücher.de/` and `bücher.de` query the same hostname. Everything else, bare hostnames
/// such as `bild.de` included, is returned unchanged.
pub fn extract_hostname(input: &str) -> String {
	let Ok(url) = Url::parse(input) else {
		return input.to_owned();
	};

	match url.host() {
		Some(Host::Ipv6(addr)) => addr.to_string(),
		Some(Host::Ipv4(addr)) => addr.to_string(),
		Some(Host::Domain(domain)) if !domain.is_empty() => as_spelled(input, domain),
		_ => input.to_owned(),
	}
}

// Special-scheme hosts are stored as punycode. Report the Unicode form when that is how the
// input spelled the host, and the ASCII form otherwise (`https://xn--bcher-kva.de/`).
fn as_spelled(input: &str, domain: &str) -> String {
	let ascii = domain.to_ascii_lowercase();
	let (unicode, result) = idna::domain_to_unicode(&ascii);

	if result.is_ok() && unicode != ascii && input.to_lowercase().contains(&unicode) {
		unicode
	} else {
		ascii
	}
}
