//! Error types for client-side routing.
//!
//! A URL that matches no route and a navigation vetoed by a deactivation
//! guard are ordinary outcomes, not errors; they are reported through
//! `Option` and the navigation outcome type respectively.

/// Error type for router operations.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
	/// No route is registered under the given id.
	#[error("Route not found: {0}")]
	UnknownRoute(String),

	/// A route's `redirect_to` names an id that is not registered.
	#[error("Route '{from}' redirects to unknown route '{target}'")]
	MalformedRedirect {
		/// Id of the route declaring the redirect.
		from: String,
		/// The unresolvable redirect target.
		target: String,
	},

	/// A placeholder in the template has no value to hydrate with.
	#[error("Missing parameter '{param}' for route '{route}'")]
	MissingParameter {
		/// Id of the route being hydrated.
		route: String,
		/// Name of the placeholder without its `:` prefix.
		param: String,
	},

	/// The route template could not be parsed.
	#[error("Invalid route template '{path}': {reason}")]
	InvalidTemplate {
		/// The rejected template.
		path: String,
		/// Why it was rejected.
		reason: String,
	},
}

impl RouterError {
	pub(crate) fn invalid_template(path: &str, reason: impl Into<String>) -> Self {
		Self::InvalidTemplate {
			path: path.to_string(),
			reason: reason.into(),
		}
	}
}
