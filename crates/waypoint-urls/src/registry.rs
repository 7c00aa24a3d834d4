//! Route registry.
//!
//! An ordered `id -> template` mapping. Iteration order is registration order,
//! and that order decides which route wins when several match a URL.

use std::ops::Index;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::matcher::{MatchOptions, RouteMatch, match_url_with};
use crate::route::RouteTemplate;

/// The set of routes known to a router.
///
/// Templates are stored behind `Rc` so resolved routes can share them without
/// copying.
///
/// # Example
///
/// ```
/// use waypoint_urls::{RouteRegistry, RouteTemplate};
///
/// let routes = RouteRegistry::new()
///     .route(RouteTemplate::new("home", ""))
///     .route(RouteTemplate::new("notFound", "*"));
///
/// assert_eq!(routes.len(), 2);
/// assert!(routes.contains("home"));
/// assert_eq!(routes.ids().collect::<Vec<_>>(), vec!["home", "notFound"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteRegistry {
	routes: IndexMap<String, Rc<RouteTemplate>>,
}

impl RouteRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a route (builder style).
	pub fn route(mut self, route: RouteTemplate) -> Self {
		self.insert(route);
		self
	}

	/// Adds a route under its id.
	///
	/// Replacing an existing id keeps the original registration position and
	/// returns the previous template.
	pub fn insert(&mut self, route: RouteTemplate) -> Option<Rc<RouteTemplate>> {
		self.routes.insert(route.id().to_string(), Rc::new(route))
	}

	/// Returns the route registered under `id`.
	pub fn get(&self, id: &str) -> Option<&Rc<RouteTemplate>> {
		self.routes.get(id)
	}

	/// Returns whether `id` is registered.
	pub fn contains(&self, id: &str) -> bool {
		self.routes.contains_key(id)
	}

	/// Routes in registration order.
	pub fn iter(&self) -> impl Iterator<Item = &Rc<RouteTemplate>> {
		self.routes.values()
	}

	/// Route ids in registration order.
	pub fn ids(&self) -> impl Iterator<Item = &str> {
		self.routes.keys().map(String::as_str)
	}

	/// Number of registered routes.
	pub fn len(&self) -> usize {
		self.routes.len()
	}

	/// Returns whether no route is registered.
	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}

	/// Resolves a URL against this registry with default options.
	pub fn resolve(&self, url: &str) -> Option<RouteMatch> {
		self.resolve_with(url, MatchOptions::default())
	}

	/// Resolves a URL against this registry.
	pub fn resolve_with(&self, url: &str, options: MatchOptions) -> Option<RouteMatch> {
		match_url_with(url, self, options)
	}
}

impl FromIterator<RouteTemplate> for RouteRegistry {
	fn from_iter<I: IntoIterator<Item = RouteTemplate>>(iter: I) -> Self {
		let mut registry = RouteRegistry::new();
		for route in iter {
			registry.insert(route);
		}
		registry
	}
}

impl Extend<RouteTemplate> for RouteRegistry {
	fn extend<I: IntoIterator<Item = RouteTemplate>>(&mut self, iter: I) {
		for route in iter {
			self.insert(route);
		}
	}
}

impl Index<&str> for RouteRegistry {
	type Output = RouteTemplate;

	/// # Panics
	///
	/// Panics if `id` is not registered.
	fn index(&self, id: &str) -> &Self::Output {
		match self.routes.get(id) {
			Some(route) => route,
			None => panic!("no route registered under id '{}'", id),
		}
	}
}
