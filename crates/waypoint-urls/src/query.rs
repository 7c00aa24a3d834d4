//! Query-string and component codec.
//!
//! Decoding follows form conventions: `+` is a space, then `%XX` sequences are
//! decoded. Malformed escapes are kept verbatim, and byte sequences that are
//! not valid UTF-8 decode lossily instead of failing the whole match.

use std::borrow::Cow;

use crate::params::Params;

/// Percent-decodes a single URL component.
///
/// ```
/// use waypoint_urls::decode_component;
///
/// assert_eq!(decode_component("caf%C3%A9"), "café");
/// assert_eq!(decode_component("100%"), "100%");
/// ```
pub fn decode_component(raw: &str) -> String {
	match urlencoding::decode(raw) {
		Ok(decoded) => decoded.into_owned(),
		Err(_) => String::from_utf8_lossy(&urlencoding::decode_binary(raw.as_bytes())).into_owned(),
	}
}

/// Percent-encodes a single URL component.
///
/// Everything except ASCII alphanumerics and `-_.~` is escaped.
pub fn encode_component(raw: &str) -> Cow<'_, str> {
	urlencoding::encode(raw)
}

/// Parses a query string (without the leading `?`) into [`Params`].
///
/// Each `&`-separated pair is split at its first `=`. A pair without `=`
/// binds an empty value, and empty pairs are skipped, so a bare `?` yields
/// no parameters at all. Keys are taken verbatim; values have `+` turned
/// into spaces and are then percent-decoded. A repeated key keeps its last
/// value.
///
/// ```
/// use waypoint_urls::parse_query;
///
/// let params = parse_query("tab=posts&q=hello+world&flag");
/// assert_eq!(params.get("tab"), Some("posts"));
/// assert_eq!(params.get("q"), Some("hello world"));
/// assert_eq!(params.get("flag"), Some(""));
/// ```
pub fn parse_query(query: &str) -> Params {
	query
		.split('&')
		.filter(|pair| !pair.is_empty())
		.map(|pair| match pair.split_once('=') {
			Some((key, value)) => (key, decode_component(&value.replace('+', " "))),
			None => (pair, String::new()),
		})
		.collect()
}

/// Encodes `(name, value)` pairs as `name=value&...`, percent-encoding both.
///
/// Returns an empty string for an empty iterator.
pub fn encode_query<'a, I>(pairs: I) -> String
where
	I: IntoIterator<Item = (&'a str, &'a str)>,
{
	pairs
		.into_iter()
		.map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
		.collect::<Vec<_>>()
		.join("&")
}
