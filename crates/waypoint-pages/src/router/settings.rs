//! Router settings.
//!
//! Settings can be built in code or loaded from TOML:
//!
//! ```toml
//! param_precedence = "path"
//! trailing_slash = "strip"
//! base_url = "/app/"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use waypoint_urls::{MatchOptions, ParamPrecedence, TrailingSlash};

/// Errors raised while loading [`RouterSettings`].
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),
}

/// Matching and history options for a [`Router`](crate::Router).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouterSettings {
	/// Which value wins when a query key shadows a path placeholder.
	pub param_precedence: ParamPrecedence,
	/// Trailing `/` handling before matching.
	pub trailing_slash: TrailingSlash,
	/// Prefix joined onto hydrated paths to form history URLs.
	pub base_url: String,
}

impl RouterSettings {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_param_precedence(mut self, precedence: ParamPrecedence) -> Self {
		self.param_precedence = precedence;
		self
	}

	pub fn with_trailing_slash(mut self, trailing_slash: TrailingSlash) -> Self {
		self.trailing_slash = trailing_slash;
		self
	}

	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url.into();
		self
	}

	/// Parses settings from a TOML document. Missing keys take their defaults.
	///
	/// # Errors
	///
	/// Returns [`SettingsError::Toml`] for malformed documents, unknown keys
	/// and unknown enum values.
	pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
		Ok(toml::from_str(content)?)
	}

	/// Reads and parses a TOML settings file.
	pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let content = std::fs::read_to_string(path.as_ref())?;
		Self::from_toml_str(&content)
	}

	/// Matcher options derived from these settings.
	pub fn match_options(&self) -> MatchOptions {
		MatchOptions {
			precedence: self.param_precedence,
			trailing_slash: self.trailing_slash,
		}
	}

	/// History URL for a hydrated path.
	pub fn url_for(&self, path: &str) -> String {
		format!("{}{}", self.base_url, path)
	}

	/// Removes the base URL from a location read back from the browser.
	pub fn strip_base_url<'a>(&self, url: &'a str) -> &'a str {
		if self.base_url.is_empty() {
			return url;
		}
		url.strip_prefix(self.base_url.as_str()).unwrap_or(url)
	}
}
