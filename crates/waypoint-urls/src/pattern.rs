//! Route template parsing and segment matching.
//!
//! A template is split on `/` into segments. Each segment is one of:
//!
//! - a literal, compared verbatim (an empty literal stands for a leading or
//!   trailing `/`)
//! - `:name`, a named placeholder accepting any single URL segment
//! - `*`, accepting any single URL segment without binding it
//!
//! A template consisting solely of `*` is the catch-all: it matches every URL
//! regardless of segment count. There is no escape for a literal leading `:`.

use std::fmt;

use crate::error::RouterError;
use crate::params::Params;
use crate::query::decode_component;

/// Maximum allowed length for a route template in bytes.
const MAX_TEMPLATE_LENGTH: usize = 1024;

/// Maximum allowed number of segments in a route template.
const MAX_TEMPLATE_SEGMENTS: usize = 32;

/// One `/`-delimited piece of a route template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
	/// Text that must equal the URL segment exactly.
	Literal(String),
	/// `:name` placeholder bound to the URL segment.
	Param(String),
	/// `*`, accepting any URL segment.
	Wildcard,
}

impl Segment {
	fn parse(raw: &str) -> Self {
		if raw == "*" {
			Segment::Wildcard
		} else if let Some(name) = raw.strip_prefix(':') {
			Segment::Param(name.to_string())
		} else {
			Segment::Literal(raw.to_string())
		}
	}

	/// Returns whether this segment accepts `url_segment`.
	pub fn accepts(&self, url_segment: &str) -> bool {
		match self {
			Segment::Literal(text) => text == url_segment,
			Segment::Param(_) | Segment::Wildcard => true,
		}
	}
}

impl fmt::Display for Segment {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Segment::Literal(text) => f.write_str(text),
			Segment::Param(name) => write!(f, ":{}", name),
			Segment::Wildcard => f.write_str("*"),
		}
	}
}

/// A parsed route template.
///
/// # Example
///
/// ```
/// use waypoint_urls::TemplatePath;
///
/// let path = TemplatePath::parse("users/:id/posts/:post").unwrap();
/// assert_eq!(path.param_names().collect::<Vec<_>>(), vec!["id", "post"]);
/// assert!(path.matches(&["users", "42", "posts", "7"]));
/// assert!(!path.matches(&["users", "42"]));
/// ```
#[derive(Debug, Clone)]
pub struct TemplatePath {
	raw: String,
	segments: Vec<Segment>,
}

impl TemplatePath {
	/// Parses a template string.
	///
	/// # Errors
	///
	/// Returns [`RouterError::InvalidTemplate`] if:
	/// - the template exceeds 1024 bytes
	/// - it has more than 32 segments
	/// - a placeholder has an empty name (`:`)
	/// - two placeholders share a name
	pub fn parse(path: &str) -> Result<Self, RouterError> {
		if path.len() > MAX_TEMPLATE_LENGTH {
			return Err(RouterError::invalid_template(
				path,
				format!(
					"length {} exceeds maximum allowed length of {} bytes",
					path.len(),
					MAX_TEMPLATE_LENGTH
				),
			));
		}

		let segments: Vec<Segment> = path.split('/').map(Segment::parse).collect();
		if segments.len() > MAX_TEMPLATE_SEGMENTS {
			return Err(RouterError::invalid_template(
				path,
				format!(
					"{} segments exceed maximum of {}",
					segments.len(),
					MAX_TEMPLATE_SEGMENTS
				),
			));
		}

		let mut seen: Vec<&str> = Vec::new();
		for segment in &segments {
			if let Segment::Param(name) = segment {
				if name.is_empty() {
					return Err(RouterError::invalid_template(path, "empty parameter name"));
				}
				if seen.contains(&name.as_str()) {
					return Err(RouterError::invalid_template(
						path,
						format!("duplicate parameter '{}'", name),
					));
				}
				seen.push(name);
			}
		}

		Ok(Self {
			raw: path.to_string(),
			segments,
		})
	}

	/// Returns the original template string.
	pub fn as_str(&self) -> &str {
		&self.raw
	}

	/// Returns the parsed segments.
	pub fn segments(&self) -> &[Segment] {
		&self.segments
	}

	/// Returns whether this is the single-segment `*` catch-all.
	pub fn is_catch_all(&self) -> bool {
		matches!(self.segments.as_slice(), [Segment::Wildcard])
	}

	/// Placeholder names in template order.
	pub fn param_names(&self) -> impl Iterator<Item = &str> {
		self.segments.iter().filter_map(|segment| match segment {
			Segment::Param(name) => Some(name.as_str()),
			_ => None,
		})
	}

	/// Returns whether `name` is one of this template's placeholders.
	pub fn has_param(&self, name: &str) -> bool {
		self.param_names().any(|param| param == name)
	}

	/// Checks the URL's path segments against this template.
	pub fn matches(&self, url_segments: &[&str]) -> bool {
		if self.is_catch_all() {
			return true;
		}
		self.segments.len() == url_segments.len()
			&& self
				.segments
				.iter()
				.zip(url_segments)
				.all(|(segment, url_segment)| segment.accepts(url_segment))
	}

	/// Binds each placeholder to its percent-decoded URL segment.
	///
	/// Call after [`matches`](Self::matches) succeeded; placeholders beyond the
	/// URL's length are left unbound.
	pub fn extract(&self, url_segments: &[&str]) -> Params {
		self.segments
			.iter()
			.zip(url_segments)
			.filter_map(|(segment, value)| match segment {
				Segment::Param(name) => Some((name.as_str(), decode_component(value))),
				_ => None,
			})
			.collect()
	}
}

impl PartialEq for TemplatePath {
	fn eq(&self, other: &Self) -> bool {
		self.raw == other.raw
	}
}

impl Eq for TemplatePath {}

impl fmt::Display for TemplatePath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.raw)
	}
}
