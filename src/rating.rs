//! Rating records and the normalizer that maps raw endpoint responses onto them.
//!
//! The endpoint answers with a flat JSON object whose keys may contain hyphens (`scope-url`,
//! `age-issuer`) and whose values are strings, booleans and integers included (`"1"`, `"12"`).
//! Decoding happens in two steps so each failure keeps its own kind:
//!
//! - [`RawCheckResponse::decode`] turns the body into a key/value mapping or fails with
//!   [`Error::MalformedResponse`];
//! - [`normalize`] validates that mapping against a static field table and fails with
//!   [`Error::ResponseShape`] or [`Error::Parse`].

// crates.io
use serde::{
	Deserializer,
	de::{MapAccess, Visitor},
};
// self
use crate::_prelude::*;

/// Wire keys (after hyphen translation) accepted for each required field, keyed by canonical name.
const FIELDS: &[(&str, &[&str])] = &[
	("age", &["age"]),
	("scope_url", &["scope_url"]),
	("show", &["show"]),
	("cache", &["cache"]),
	("overrule", &["overrule"]),
	("type", &["type"]),
	("list", &["list"]),
	("country_of_use", &["cou", "country_of_use"]),
	("url_check", &["urlcheck", "url_check"]),
	("age_icon", &["age_icon"]),
	("on_the_fly", &["otf", "on_the_fly"]),
	("country", &["country"]),
	("age_issuer", &["age_issuer"]),
];

/// Normalized outcome of a single rating lookup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
	/// Minimum age at which the content is permitted.
	pub age: i32,
	/// Wildcard URL pattern the rating applies to, e.g. `*.bild.de/*`.
	pub scope_url: String,
	/// Whether the content may be shown to the requested age.
	pub show: bool,
	/// Whether the service answered from its own cache.
	pub cache: bool,
	/// Opaque override marker.
	pub overrule: String,
	/// Opaque rating type.
	#[serde(rename = "type")]
	pub kind: String,
	/// Opaque list marker.
	pub list: String,
	/// Country of use (`cou` on the wire).
	pub country_of_use: String,
	/// URL check marker (`urlcheck` on the wire).
	pub url_check: String,
	/// Age icon identifier.
	pub age_icon: String,
	/// On-the-fly classification marker (`otf` on the wire).
	pub on_the_fly: String,
	/// Country the rating was issued for.
	pub country: String,
	/// Issuer of the age rating.
	pub age_issuer: String,
}
impl CheckResult {
	/// Returns `true` when `age` meets the minimum age of this rating.
	pub fn permits(&self, age: u8) -> bool {
		i32::from(age) >= self.age
	}
}
impl Display for CheckResult {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{} is available starting at age {}.", self.scope_url, self.age)
	}
}

/// Raw key/value entries decoded from a rating response body, in body order.
///
/// Besides [`RawCheckResponse::decode`], a mapping can be collected from any `(key, value)`
/// iterator, e.g. when the body was decoded by another layer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawCheckResponse(Vec<(String, String)>);
impl RawCheckResponse {
	/// Decodes a response body into raw entries.
	///
	/// Strings and numbers are kept in their textual form and booleans become `"true"`/`"false"`;
	/// nested values, `null`, and anything that is not a JSON object fail with
	/// [`Error::MalformedResponse`].
	pub fn decode(body: &[u8], status: Option<u16>) -> Result<Self> {
		let mut deserializer = serde_json::Deserializer::from_slice(body);
		let WireEntries(entries) = serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| Error::MalformedResponse { source, status })?;

		Ok(Self(entries.into_iter().map(|(key, value)| (key, value.into_text())).collect()))
	}
}
impl<K, V> FromIterator<(K, V)> for RawCheckResponse
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
	{
		Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
	}
}

/// Flat JSON object entries, kept in body order.
struct WireEntries(Vec<(String, WireValue)>);
impl<'de> Deserialize<'de> for WireEntries {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		struct EntriesVisitor;
		impl<'de> Visitor<'de> for EntriesVisitor {
			type Value = WireEntries;

			fn expecting(&self, f: &mut Formatter) -> FmtResult {
				f.write_str("a flat JSON object")
			}

			fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
			where
				A: MapAccess<'de>,
			{
				let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));

				while let Some(entry) = map.next_entry::<String, WireValue>()? {
					entries.push(entry);
				}

				Ok(WireEntries(entries))
			}
		}

		deserializer.deserialize_map(EntriesVisitor)
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireValue {
	Text(String),
	Flag(bool),
	Integer(i64),
	Float(f64),
}
impl WireValue {
	fn into_text(self) -> String {
		match self {
			Self::Text(value) => value,
			Self::Flag(value) => value.to_string(),
			Self::Integer(value) => value.to_string(),
			Self::Float(value) => value.to_string(),
		}
	}
}

/// Maps a raw response onto a [`CheckResult`].
///
/// Keys have every hyphen replaced with an underscore before lookup; when two keys collide after
/// translation (`scope-url` and `scope_url`), the later entry wins. `show` and `cache` are true
/// only for the literal `"1"`. Keys outside the field table are ignored.
pub fn normalize(raw: RawCheckResponse) -> Result<CheckResult> {
	let mut fields = BTreeMap::new();

	for (key, value) in raw.0 {
		fields.insert(key.replace('-', "_"), value);
	}

	let mut take = |canonical: &'static str| -> Result<String> {
		let aliases = FIELDS
			.iter()
			.find(|(name, _)| *name == canonical)
			.map(|(_, aliases)| *aliases)
			.unwrap_or(&[]);

		aliases
			.iter()
			.find_map(|alias| fields.remove(*alias))
			.ok_or(Error::ResponseShape { field: canonical })
	};
	let age = take("age")?;
	let scope_url = take("scope_url")?;
	let show = take("show")?;
	let cache = take("cache")?;
	let overrule = take("overrule")?;
	let kind = take("type")?;
	let list = take("list")?;
	let country_of_use = take("country_of_use")?;
	let url_check = take("url_check")?;
	let age_icon = take("age_icon")?;
	let on_the_fly = take("on_the_fly")?;
	let country = take("country")?;
	let age_issuer = take("age_issuer")?;
	let age = parse_int("age", age)?;

	#[cfg(feature = "tracing")]
	if !fields.is_empty() {
		tracing::debug!(ignored = ?fields.keys().collect::<Vec<_>>(), "Ignoring unknown response keys.");
	}

	Ok(CheckResult {
		age,
		scope_url,
		show: is_set(&show),
		cache: is_set(&cache),
		overrule,
		kind,
		list,
		country_of_use,
		url_check,
		age_icon,
		on_the_fly,
		country,
		age_issuer,
	})
}

fn is_set(value: &str) -> bool {
	value == "1"
}

fn parse_int(field: &'static str, value: String) -> Result<i32> {
	value.trim().parse().map_err(|source| Error::Parse { field, value, source })
}
