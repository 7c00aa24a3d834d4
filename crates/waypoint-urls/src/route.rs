//! Route templates: the immutable unit registered by the host.

use std::fmt;

use crate::error::RouterError;
use crate::pattern::TemplatePath;

/// A registered route.
///
/// Templates are immutable once built; the router pairs them with parameters
/// and guards in a separate resolved value instead of mutating them.
///
/// # Example
///
/// ```
/// use waypoint_urls::RouteTemplate;
///
/// let legacy = RouteTemplate::new("legacyHome", "index.html").redirect_to("home");
/// assert_eq!(legacy.redirect_target(), Some("home"));
///
/// let user = RouteTemplate::new("user", "user/:id");
/// assert_eq!(user.param_names().collect::<Vec<_>>(), vec!["id"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTemplate {
	id: String,
	path: TemplatePath,
	redirect_to: Option<String>,
}

impl RouteTemplate {
	/// Creates a route.
	///
	/// # Panics
	///
	/// Panics if the template is invalid (see [`TemplatePath::parse`]).
	/// Use [`RouteTemplate::try_new`] for fallible construction.
	pub fn new(id: impl Into<String>, path: &str) -> Self {
		Self::try_new(id, path)
			.unwrap_or_else(|e| panic!("Invalid route pattern '{}': {}", path, e))
	}

	/// Creates a route, returning an error for invalid templates.
	pub fn try_new(id: impl Into<String>, path: &str) -> Result<Self, RouterError> {
		Ok(Self {
			id: id.into(),
			path: TemplatePath::parse(path)?,
			redirect_to: None,
		})
	}

	/// Declares that matching this route by URL re-navigates to `target`.
	pub fn redirect_to(mut self, target: impl Into<String>) -> Self {
		self.redirect_to = Some(target.into());
		self
	}

	/// Returns the registry key.
	pub fn id(&self) -> &str {
		&self.id
	}

	/// Returns the parsed template.
	pub fn path(&self) -> &TemplatePath {
		&self.path
	}

	/// Returns the redirect target id, if any.
	pub fn redirect_target(&self) -> Option<&str> {
		self.redirect_to.as_deref()
	}

	/// Placeholder names in template order.
	pub fn param_names(&self) -> impl Iterator<Item = &str> {
		self.path.param_names()
	}
}

impl fmt::Display for RouteTemplate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} ({})", self.id, self.path)
	}
}
