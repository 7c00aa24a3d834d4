//! URL matching.
//!
//! Resolves a raw URL against a [`RouteRegistry`] by linear scan in
//! registration order. The first template accepting the URL's path segments
//! wins, so a catch-all `*` registered early shadows every later route.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::params::Params;
use crate::query::parse_query;
use crate::registry::RouteRegistry;
use crate::route::RouteTemplate;

/// Which parameter source wins when a path placeholder and a query key share
/// a name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamPrecedence {
	/// Query values overwrite path values.
	#[default]
	Query,
	/// Path values are kept; colliding query keys are dropped.
	Path,
}

/// Handling of a trailing `/` on the URL path before matching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailingSlash {
	/// Match the path as given; `about/` and `about` are different URLs.
	#[default]
	Preserve,
	/// Strip one trailing `/` from any path longer than `/`.
	Strip,
}

/// Matcher configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOptions {
	pub precedence: ParamPrecedence,
	pub trailing_slash: TrailingSlash,
}

/// Result of a successful match.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch {
	/// The matched template, shared with the registry.
	pub route: Rc<RouteTemplate>,
	/// Path and query parameters, merged.
	pub params: Params,
}

impl RouteMatch {
	/// Returns whether the matched route redirects elsewhere.
	pub fn is_redirect(&self) -> bool {
		self.route.redirect_target().is_some()
	}

	/// Returns the id the matched route redirects to.
	pub fn redirect_target(&self) -> Option<&str> {
		self.route.redirect_target()
	}
}

/// Splits a URL at its first `?` into path and query parts.
///
/// ```
/// use waypoint_urls::matcher::split_url;
///
/// assert_eq!(split_url("user/42?tab=posts"), ("user/42", "tab=posts"));
/// assert_eq!(split_url("about"), ("about", ""));
/// ```
pub fn split_url(url: &str) -> (&str, &str) {
	url.split_once('?').unwrap_or((url, ""))
}

/// Resolves `url` against `routes` with default [`MatchOptions`].
///
/// Returns `None` when no route matches. Register a `*` route last to turn
/// that into an explicit not-found route.
pub fn match_url(url: &str, routes: &RouteRegistry) -> Option<RouteMatch> {
	match_url_with(url, routes, MatchOptions::default())
}

/// Resolves `url` against `routes`.
///
/// # Example
///
/// ```
/// use waypoint_urls::{MatchOptions, ParamPrecedence, RouteRegistry, RouteTemplate, match_url_with};
///
/// let routes = RouteRegistry::new().route(RouteTemplate::new("user", "user/:id"));
/// let options = MatchOptions { precedence: ParamPrecedence::Path, ..Default::default() };
///
/// let matched = match_url_with("user/42?id=99", &routes, options).unwrap();
/// assert_eq!(matched.params.get("id"), Some("42"));
/// ```
pub fn match_url_with(url: &str, routes: &RouteRegistry, options: MatchOptions) -> Option<RouteMatch> {
	let (path, query) = split_url(url);
	let query_params = parse_query(query);
	tracing::debug!(url, ?query_params, "parsed query");

	let path = match options.trailing_slash {
		TrailingSlash::Strip if path.len() > 1 => path.strip_suffix('/').unwrap_or(path),
		_ => path,
	};
	tracing::debug!(path, "path without query");

	let segments: Vec<&str> = path.split('/').collect();
	let route = routes.iter().find(|route| route.path().matches(&segments))?;
	tracing::debug!(route_id = route.id(), "matched route");

	let mut params = route.path().extract(&segments);
	match options.precedence {
		ParamPrecedence::Query => params.merge(query_params),
		ParamPrecedence::Path => params.merge_missing(query_params),
	}

	Some(RouteMatch {
		route: Rc::clone(route),
		params,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};

	#[fixture]
	fn routes() -> RouteRegistry {
		RouteRegistry::new()
			.route(RouteTemplate::new("home", ""))
			.route(RouteTemplate::new("about", "about"))
			.route(RouteTemplate::new("user", "user/:id"))
			.route(RouteTemplate::new("post", "user/:id/posts/:post"))
			.route(RouteTemplate::new("notFound", "*"))
	}

	#[rstest]
	#[case("", "home")]
	#[case("about", "about")]
	#[case("user/42", "user")]
	#[case("user/42/posts/7", "post")]
	#[case("nowhere", "notFound")]
	#[case("about/", "notFound")]
	fn test_match_route_id(routes: RouteRegistry, #[case] url: &str, #[case] expected: &str) {
		let matched = match_url(url, &routes).unwrap();
		assert_eq!(matched.route.id(), expected);
	}

	#[rstest]
	fn test_literal_match_has_empty_params(routes: RouteRegistry) {
		let matched = match_url("about", &routes).unwrap();
		assert!(matched.params.is_empty());
	}

	#[rstest]
	fn test_path_and_query_params_merged(routes: RouteRegistry) {
		let matched = match_url("user/42?tab=posts", &routes).unwrap();
		assert_eq!(matched.route.id(), "user");
		assert_eq!(
			matched.params.iter().collect::<Vec<_>>(),
			vec![("id", "42"), ("tab", "posts")]
		);
	}

	#[rstest]
	fn test_query_overrides_path_by_default(routes: RouteRegistry) {
		let matched = match_url("user/42?id=99", &routes).unwrap();
		assert_eq!(matched.params.get("id"), Some("99"));
	}

	#[rstest]
	fn test_path_precedence_keeps_path_value(routes: RouteRegistry) {
		let options = MatchOptions {
			precedence: ParamPrecedence::Path,
			..Default::default()
		};
		let matched = match_url_with("user/42?id=99&tab=posts", &routes, options).unwrap();
		assert_eq!(matched.params.get("id"), Some("42"));
		assert_eq!(matched.params.get("tab"), Some("posts"));
	}

	#[rstest]
	fn test_bare_question_mark(routes: RouteRegistry) {
		let matched = match_url("about?", &routes).unwrap();
		assert_eq!(matched.route.id(), "about");
		assert!(matched.params.is_empty());
	}

	#[rstest]
	fn test_only_first_question_mark_splits(routes: RouteRegistry) {
		let matched = match_url("about?next=a?b", &routes).unwrap();
		assert_eq!(matched.params.get("next"), Some("a?b"));
	}

	#[rstest]
	fn test_trailing_slash_strip(routes: RouteRegistry) {
		let options = MatchOptions {
			trailing_slash: TrailingSlash::Strip,
			..Default::default()
		};
		let matched = match_url_with("about/", &routes, options).unwrap();
		assert_eq!(matched.route.id(), "about");
	}

	#[rstest]
	fn test_trailing_slash_strip_keeps_root() {
		let routes = RouteRegistry::new().route(RouteTemplate::new("root", "/"));
		let options = MatchOptions {
			trailing_slash: TrailingSlash::Strip,
			..Default::default()
		};
		assert!(match_url_with("/", &routes, options).is_some());
	}

	#[rstest]
	fn test_no_match_without_catch_all() {
		let routes = RouteRegistry::new().route(RouteTemplate::new("home", ""));
		assert!(match_url("missing", &routes).is_none());
	}

	#[rstest]
	fn test_empty_registry_matches_nothing() {
		assert!(match_url("", &RouteRegistry::new()).is_none());
	}

	#[rstest]
	fn test_redirect_flags() {
		let routes = RouteRegistry::new()
			.route(RouteTemplate::new("home", ""))
			.route(RouteTemplate::new("legacy", "index.html").redirect_to("home"));

		let matched = match_url("index.html", &routes).unwrap();
		assert!(matched.is_redirect());
		assert_eq!(matched.redirect_target(), Some("home"));
		assert!(!match_url("", &routes).unwrap().is_redirect());
	}

	#[rstest]
	fn test_match_shares_registry_template(routes: RouteRegistry) {
		let matched = match_url("user/1", &routes).unwrap();
		assert!(Rc::ptr_eq(&matched.route, routes.get("user").unwrap()));
	}

	#[rstest]
	#[case("query", ParamPrecedence::Query)]
	#[case("path", ParamPrecedence::Path)]
	fn test_precedence_serde_names(#[case] name: &str, #[case] expected: ParamPrecedence) {
		use serde::de::IntoDeserializer;
		use serde::de::value::{Error, StrDeserializer};

		let deserializer: StrDeserializer<'_, Error> = name.into_deserializer();
		let parsed = ParamPrecedence::deserialize(deserializer).unwrap();
		assert_eq!(parsed, expected);
	}
}
