//! Core Router Implementation.
//!
//! The [`Router`] owns the route registry, the current-route observable and the
//! history collaborator. It is the only component with side effects.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use waypoint_urls::{Params, RouteRegistry, RouteTemplate, RouterError, hydrate, match_url_with};

use super::current::CurrentRoute;
use super::history::{History, HistoryState, MemoryHistory};
use super::resolved::{DeactivationGuard, GuardProvider, ResolvedRoute};
use super::settings::RouterSettings;

/// Where to navigate: a registered id or a template held by the caller.
#[derive(Debug, Clone)]
pub enum NavigationTarget {
	/// Looked up in the router's stored registry.
	Id(String),
	/// Used as is, registered or not.
	Route(Rc<RouteTemplate>),
}

impl From<&str> for NavigationTarget {
	fn from(id: &str) -> Self {
		Self::Id(id.to_string())
	}
}

impl From<String> for NavigationTarget {
	fn from(id: String) -> Self {
		Self::Id(id)
	}
}

impl From<Rc<RouteTemplate>> for NavigationTarget {
	fn from(route: Rc<RouteTemplate>) -> Self {
		Self::Route(route)
	}
}

impl From<&Rc<RouteTemplate>> for NavigationTarget {
	fn from(route: &Rc<RouteTemplate>) -> Self {
		Self::Route(Rc::clone(route))
	}
}

impl From<RouteTemplate> for NavigationTarget {
	fn from(route: RouteTemplate) -> Self {
		Self::Route(Rc::new(route))
	}
}

/// Result of a navigation request that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
	/// The route was published and a history entry pushed for `path`.
	Completed { path: String },
	/// The active route's deactivation guard vetoed the navigation.
	Rejected,
	/// Requested while another navigation was running; it runs once that
	/// one finishes.
	Deferred,
}

impl NavigationOutcome {
	pub fn is_completed(&self) -> bool {
		matches!(self, Self::Completed { .. })
	}

	/// Hydrated path of a completed navigation.
	pub fn path(&self) -> Option<&str> {
		match self {
			Self::Completed { path } => Some(path),
			_ => None,
		}
	}
}

enum Request {
	Navigate {
		target: NavigationTarget,
		params: Params,
		bypass_guard: bool,
	},
	MapUrl {
		url: String,
		routes: Option<RouteRegistry>,
	},
}

/// Serializes navigations triggered from guards or listeners.
#[derive(Default)]
struct NavigationQueue {
	in_flight: Cell<bool>,
	pending: RefCell<VecDeque<Request>>,
}

impl NavigationQueue {
	fn begin(&self) -> Option<InFlight<'_>> {
		if self.in_flight.replace(true) {
			None
		} else {
			Some(InFlight(self))
		}
	}

	fn defer(&self, request: Request) {
		self.pending.borrow_mut().push_back(request);
	}

	fn next(&self) -> Option<Request> {
		self.pending.borrow_mut().pop_front()
	}
}

struct InFlight<'a>(&'a NavigationQueue);

impl Drop for InFlight<'_> {
	fn drop(&mut self) {
		self.0.in_flight.set(false);
		// Only reached with requests left if a guard or listener panicked.
		self.0.pending.borrow_mut().clear();
	}
}

/// Client-side navigation controller.
///
/// `Router` is a cheap handle: clones share the registry, the current route,
/// the history and the navigation queue. Builder methods are meant for
/// construction and only affect the handle they are called on.
///
/// # Example
///
/// ```
/// use waypoint_pages::{MemoryHistory, Router};
/// use waypoint_urls::{Params, RouteRegistry, RouteTemplate};
///
/// let history = MemoryHistory::new();
/// let router = Router::new()
///     .with_history(history.clone())
///     .with_routes(
///         RouteRegistry::new()
///             .route(RouteTemplate::new("home", ""))
///             .route(RouteTemplate::new("user", "user/:id")),
///     );
///
/// router.navigate_to("user", Params::new().with("id", 7)).unwrap();
///
/// assert_eq!(router.current_route().id().as_deref(), Some("user"));
/// assert_eq!(history.current_url(), "user/7");
/// ```
#[derive(Clone)]
pub struct Router {
	routes: Rc<RefCell<RouteRegistry>>,
	current: CurrentRoute,
	history: Rc<dyn History>,
	settings: Rc<RouterSettings>,
	guard_provider: Option<GuardProvider>,
	queue: Rc<NavigationQueue>,
}

impl Router {
	/// Creates a router with no routes.
	///
	/// Uses the browser history on `wasm32` targets when a window is
	/// available, and a [`MemoryHistory`] otherwise.
	pub fn new() -> Self {
		Self {
			routes: Rc::new(RefCell::new(RouteRegistry::new())),
			current: CurrentRoute::new(),
			history: default_history(),
			settings: Rc::new(RouterSettings::default()),
			guard_provider: None,
			queue: Rc::new(NavigationQueue::default()),
		}
	}

	pub fn with_history<H>(mut self, history: H) -> Self
	where
		H: History + 'static,
	{
		self.history = Rc::new(history);
		self
	}

	pub fn with_settings(mut self, settings: RouterSettings) -> Self {
		self.settings = Rc::new(settings);
		self
	}

	/// Installs the callback asked for a deactivation guard each time a route
	/// becomes active.
	pub fn with_guard_provider<F>(mut self, provider: F) -> Self
	where
		F: Fn(&ResolvedRoute) -> Option<DeactivationGuard> + 'static,
	{
		self.guard_provider = Some(Rc::new(provider));
		self
	}

	pub fn with_routes(self, routes: RouteRegistry) -> Self {
		self.store_routes(routes);
		self
	}

	/// Replaces the stored registry.
	pub fn store_routes(&self, routes: RouteRegistry) {
		tracing::debug!(count = routes.len(), "storing routes");
		*self.routes.borrow_mut() = routes;
	}

	/// Returns a copy of the stored registry.
	pub fn routes(&self) -> RouteRegistry {
		self.routes.borrow().clone()
	}

	/// The current-route observable.
	pub fn current_route(&self) -> &CurrentRoute {
		&self.current
	}

	pub fn settings(&self) -> &RouterSettings {
		&self.settings
	}

	/// Hydrates the route registered under `id` without navigating.
	pub fn reverse(&self, id: &str, params: &Params) -> Result<String, RouterError> {
		let route = self.lookup(id)?;
		hydrate(&route, params)
	}

	/// Navigates to `target`, consulting the active route's guard.
	///
	/// # Errors
	///
	/// - [`RouterError::UnknownRoute`] if an id is not registered
	/// - [`RouterError::MissingParameter`] if `params` leave a placeholder
	///   unbound
	///
	/// Nothing is published and no history entry is written on error.
	pub fn navigate_to(
		&self,
		target: impl Into<NavigationTarget>,
		params: Params,
	) -> Result<NavigationOutcome, RouterError> {
		self.request(Request::Navigate {
			target: target.into(),
			params,
			bypass_guard: false,
		})
		.map(|completed| completed.unwrap_or(NavigationOutcome::Deferred))
	}

	/// Navigates to `target` without consulting the active route's guard.
	pub fn navigate_to_bypassing_guard(
		&self,
		target: impl Into<NavigationTarget>,
		params: Params,
	) -> Result<NavigationOutcome, RouterError> {
		self.request(Request::Navigate {
			target: target.into(),
			params,
			bypass_guard: true,
		})
		.map(|completed| completed.unwrap_or(NavigationOutcome::Deferred))
	}

	/// Resolves `url` against the stored registry and makes it current.
	///
	/// A configured base URL is stripped from `url` first, so locations read
	/// back from the history (including [`MemoryHistory::back`]) can be passed
	/// in as is.
	///
	/// Entry navigation is not guardable: the match (or `None`) is published
	/// unconditionally. When the current history entry has no state it is
	/// replaced, not pushed. A matched redirect then navigates to its target.
	///
	/// Returns the current route after the call. When called while another
	/// navigation is running, the request is queued and the route current at
	/// call time is returned.
	///
	/// # Errors
	///
	/// [`RouterError::MalformedRedirect`] if the matched route redirects to an
	/// unregistered id; the redirecting route stays current.
	pub fn map_url_to_route(&self, url: &str) -> Result<Option<ResolvedRoute>, RouterError> {
		self.request(Request::MapUrl {
			url: url.to_string(),
			routes: None,
		})?;
		Ok(self.current.get())
	}

	/// Like [`map_url_to_route`](Self::map_url_to_route), matching against
	/// `routes` instead of the stored registry.
	pub fn map_url_to_route_with(
		&self,
		url: &str,
		routes: &RouteRegistry,
	) -> Result<Option<ResolvedRoute>, RouterError> {
		self.request(Request::MapUrl {
			url: url.to_string(),
			routes: Some(routes.clone()),
		})?;
		Ok(self.current.get())
	}

	/// Runs `request` now, or queues it if a navigation is already running.
	/// Returns `None` for a queued request.
	fn request(&self, request: Request) -> Result<Option<NavigationOutcome>, RouterError> {
		let Some(_in_flight) = self.queue.begin() else {
			tracing::debug!("navigation in flight, deferring request");
			self.queue.defer(request);
			return Ok(None);
		};

		let result = self.execute(request);

		while let Some(deferred) = self.queue.next() {
			if let Err(e) = self.execute(deferred) {
				tracing::warn!(error = %e, "deferred navigation failed");
			}
		}

		result.map(Some)
	}

	fn execute(&self, request: Request) -> Result<NavigationOutcome, RouterError> {
		match request {
			Request::Navigate {
				target,
				params,
				bypass_guard,
			} => {
				let route = match target {
					NavigationTarget::Id(id) => self.lookup(&id)?,
					NavigationTarget::Route(route) => route,
				};
				self.perform_navigation(route, params, bypass_guard)
			}
			Request::MapUrl { url, routes } => {
				let routes = match routes {
					Some(routes) => routes,
					None => self.routes(),
				};
				self.perform_map_url(&url, &routes)
			}
		}
	}

	fn perform_navigation(
		&self,
		route: Rc<RouteTemplate>,
		params: Params,
		bypass_guard: bool,
	) -> Result<NavigationOutcome, RouterError> {
		let path = hydrate(&route, &params)?;
		let candidate = ResolvedRoute::new(route, params);

		if !bypass_guard {
			if let Some(guard) = self.current.guard() {
				if !guard(&candidate) {
					tracing::info!(
						from = ?self.current.id(),
						to = candidate.id(),
						"navigation rejected by deactivation guard"
					);
					return Ok(NavigationOutcome::Rejected);
				}
			}
		}

		tracing::debug!(route_id = candidate.id(), path = %path, "navigating");
		self.current.publish(Some(self.activate(candidate)));
		self.history
			.push_state(&HistoryState::new(path.as_str()), &self.settings.url_for(&path));

		Ok(NavigationOutcome::Completed { path })
	}

	fn perform_map_url(&self, url: &str, routes: &RouteRegistry) -> Result<NavigationOutcome, RouterError> {
		let url = self.settings.strip_base_url(url);
		let resolved = match_url_with(url, routes, self.settings.match_options())
			.map(|matched| self.activate(ResolvedRoute::new(matched.route, matched.params)));
		if resolved.is_none() {
			tracing::debug!(url, "no route matches URL");
		}

		let redirect = resolved.as_ref().and_then(|route| {
			route
				.template()
				.redirect_target()
				.map(|target| (route.id().to_string(), target.to_string()))
		});

		self.current.publish(resolved);
		if self.history.state().is_none() {
			self.history
				.replace_state(&HistoryState::new(url), &self.settings.url_for(url));
		}

		let Some((from, target)) = redirect else {
			return Ok(NavigationOutcome::Completed {
				path: url.to_string(),
			});
		};

		let Some(route) = routes.get(&target).cloned() else {
			return Err(RouterError::MalformedRedirect { from, target });
		};
		tracing::info!(from = %from, to = %target, "following redirect");
		self.perform_navigation(route, Params::new(), false)
	}

	fn activate(&self, route: ResolvedRoute) -> ResolvedRoute {
		let guard = self.guard_provider.as_ref().and_then(|provider| provider(&route));
		match guard {
			Some(guard) => route.with_can_deactivate(guard),
			None => route,
		}
	}

	fn lookup(&self, id: &str) -> Result<Rc<RouteTemplate>, RouterError> {
		self.routes
			.borrow()
			.get(id)
			.cloned()
			.ok_or_else(|| RouterError::UnknownRoute(id.to_string()))
	}

	/// Sets up a popstate listener for browser back/forward navigation.
	///
	/// The new location (`pathname` + `search`) is passed to
	/// [`map_url_to_route`](Self::map_url_to_route), which strips the
	/// configured base URL. The listener lives for the lifetime of the page.
	#[cfg(target_arch = "wasm32")]
	pub fn listen_to_history(&self) {
		use wasm_bindgen::JsCast;
		use wasm_bindgen::closure::Closure;

		let Some(window) = web_sys::window() else {
			tracing::warn!("no window, history listener not installed");
			return;
		};

		let router = self.clone();
		let handler = Closure::wrap(Box::new(move |_event: web_sys::Event| {
			let Some(window) = web_sys::window() else {
				return;
			};
			let location = window.location();
			let url = format!(
				"{}{}",
				location.pathname().unwrap_or_default(),
				location.search().unwrap_or_default()
			);
			if let Err(e) = router.map_url_to_route(&url) {
				tracing::warn!(url = %url, error = %e, "failed to map popstate location");
			}
		}) as Box<dyn FnMut(_)>);

		if let Err(e) =
			window.add_event_listener_with_callback("popstate", handler.as_ref().unchecked_ref())
		{
			tracing::warn!(error = ?e, "failed to install popstate listener");
			return;
		}
		handler.forget();
	}

	/// Non-WASM version of `listen_to_history`.
	#[cfg(not(target_arch = "wasm32"))]
	pub fn listen_to_history(&self) {
		// No-op on non-WASM targets
	}
}

impl Default for Router {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for Router {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Router")
			.field("routes", &self.routes.borrow().ids().collect::<Vec<_>>())
			.field("current", &self.current.id())
			.field("settings", &self.settings)
			.field("has_guard_provider", &self.guard_provider.is_some())
			.finish()
	}
}

#[cfg(target_arch = "wasm32")]
fn default_history() -> Rc<dyn History> {
	match super::history::BrowserHistory::new() {
		Some(history) => Rc::new(history),
		None => Rc::new(MemoryHistory::new()),
	}
}

#[cfg(not(target_arch = "wasm32"))]
fn default_history() -> Rc<dyn History> {
	Rc::new(MemoryHistory::new())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};

	#[fixture]
	fn routes() -> RouteRegistry {
		RouteRegistry::new()
			.route(RouteTemplate::new("home", ""))
			.route(RouteTemplate::new("user", "user/:id"))
			.route(RouteTemplate::new("notFound", "*"))
	}

	#[fixture]
	fn history() -> MemoryHistory {
		MemoryHistory::new()
	}

	#[rstest]
	fn test_router_new() {
		let router = Router::new();
		assert!(router.routes().is_empty());
		assert!(router.current_route().get().is_none());
	}

	#[rstest]
	fn test_navigate_by_id(routes: RouteRegistry, history: MemoryHistory) {
		let router = Router::new().with_history(history.clone()).with_routes(routes);

		let outcome = router.navigate_to("user", Params::new().with("id", 7)).unwrap();

		assert_eq!(outcome, NavigationOutcome::Completed { path: "user/7".to_string() });
		assert_eq!(history.state(), Some(HistoryState::new("user/7")));
		assert_eq!(history.len(), 2);
	}

	#[rstest]
	fn test_navigate_by_template_not_registered(history: MemoryHistory) {
		let router = Router::new().with_history(history.clone());
		let outcome = router
			.navigate_to(RouteTemplate::new("adhoc", "adhoc/:x"), Params::new().with("x", 1))
			.unwrap();

		assert_eq!(outcome.path(), Some("adhoc/1"));
		assert_eq!(router.current_route().id().as_deref(), Some("adhoc"));
	}

	#[rstest]
	fn test_navigate_unknown_id(routes: RouteRegistry, history: MemoryHistory) {
		let router = Router::new().with_history(history.clone()).with_routes(routes);

		let result = router.navigate_to("nonexistent", Params::new());

		assert_eq!(result, Err(RouterError::UnknownRoute("nonexistent".to_string())));
		assert!(router.current_route().get().is_none());
		assert_eq!(history.len(), 1);
	}

	#[rstest]
	fn test_navigate_missing_param_aborts(routes: RouteRegistry, history: MemoryHistory) {
		let router = Router::new().with_history(history.clone()).with_routes(routes);

		let result = router.navigate_to("user", Params::new());

		assert!(matches!(result, Err(RouterError::MissingParameter { .. })));
		assert!(router.current_route().get().is_none());
		assert_eq!(history.len(), 1);
	}

	#[rstest]
	fn test_reverse(routes: RouteRegistry) {
		let router = Router::new().with_routes(routes);
		assert_eq!(
			router.reverse("user", &Params::new().with("id", 3).with("tab", "a")),
			Ok("user/3?tab=a".to_string())
		);
		assert_eq!(
			router.reverse("missing", &Params::new()),
			Err(RouterError::UnknownRoute("missing".to_string()))
		);
	}

	#[rstest]
	fn test_base_url_applies_to_history_only(routes: RouteRegistry, history: MemoryHistory) {
		let router = Router::new()
			.with_history(history.clone())
			.with_settings(RouterSettings::new().with_base_url("/app/"))
			.with_routes(routes);

		let outcome = router.navigate_to("user", Params::new().with("id", 7)).unwrap();

		assert_eq!(outcome.path(), Some("user/7"));
		assert_eq!(history.current_url(), "/app/user/7");
		assert_eq!(history.state(), Some(HistoryState::new("user/7")));
	}

	#[rstest]
	fn test_base_url_back_and_forward(routes: RouteRegistry, history: MemoryHistory) {
		// Arrange
		let router = Router::new()
			.with_history(history.clone())
			.with_settings(RouterSettings::new().with_base_url("/app/"))
			.with_routes(routes);
		router.navigate_to("user", Params::new().with("id", 1)).unwrap();
		router.navigate_to("user", Params::new().with("id", 2)).unwrap();

		// Act
		let back = history.back().unwrap();
		let current = router.map_url_to_route(&back).unwrap();

		// Assert
		assert_eq!(back, "/app/user/1");
		assert_eq!(current.unwrap().params().get("id"), Some("1"));
		let forward = history.forward().unwrap();
		let current = router.map_url_to_route(&forward).unwrap();
		assert_eq!(current.unwrap().params().get("id"), Some("2"));
		assert_eq!(router.settings().base_url, "/app/");
	}

	#[rstest]
	fn test_base_url_initial_load_replaces_prefixed_entry(routes: RouteRegistry) {
		let history = MemoryHistory::with_initial_url("/app/user/5");
		let router = Router::new()
			.with_history(history.clone())
			.with_settings(RouterSettings::new().with_base_url("/app/"))
			.with_routes(routes);

		let current = router.map_url_to_route("/app/user/5").unwrap().unwrap();

		assert_eq!(current.id(), "user");
		assert_eq!(history.current_url(), "/app/user/5");
		assert_eq!(history.state(), Some(HistoryState::new("user/5")));
	}

	#[rstest]
	fn test_store_routes_replaces_registry_for_all_handles(
		routes: RouteRegistry,
		history: MemoryHistory,
	) {
		// Arrange
		let router = Router::new().with_history(history.clone()).with_routes(routes);
		let handle = router.clone();

		// Act
		router.store_routes(
			RouteRegistry::new()
				.route(RouteTemplate::new("dashboard", "dashboard"))
				.route(RouteTemplate::new("notFound", "*")),
		);

		// Assert
		assert_eq!(
			handle.navigate_to("home", Params::new()),
			Err(RouterError::UnknownRoute("home".to_string()))
		);
		assert!(!handle.routes().contains("user"));
		assert_eq!(handle.routes().len(), 2);
		let outcome = handle.navigate_to("dashboard", Params::new()).unwrap();
		assert_eq!(outcome.path(), Some("dashboard"));
		assert_eq!(router.current_route().id().as_deref(), Some("dashboard"));
		let current = router.map_url_to_route("user/1").unwrap().unwrap();
		assert_eq!(current.id(), "notFound");
	}

	#[rstest]
	fn test_settings_accessor_defaults() {
		let router = Router::new();
		assert_eq!(router.settings(), &RouterSettings::default());
	}

	#[rstest]
	fn test_guard_provider_attaches_guard(routes: RouteRegistry, history: MemoryHistory) {
		let router = Router::new()
			.with_history(history.clone())
			.with_routes(routes)
			.with_guard_provider(|route| {
				(route.id() == "user").then(|| crate::deactivation_guard(|_| false))
			});

		router.navigate_to("user", Params::new().with("id", 1)).unwrap();
		assert!(router.current_route().get().unwrap().has_guard());

		let outcome = router.navigate_to("home", Params::new()).unwrap();
		assert_eq!(outcome, NavigationOutcome::Rejected);
		assert_eq!(router.current_route().id().as_deref(), Some("user"));
	}

	#[rstest]
	fn test_navigation_outcome_helpers() {
		let completed = NavigationOutcome::Completed { path: "a".to_string() };
		assert!(completed.is_completed());
		assert_eq!(completed.path(), Some("a"));
		assert!(!NavigationOutcome::Rejected.is_completed());
		assert_eq!(NavigationOutcome::Deferred.path(), None);
	}

	#[rstest]
	fn test_listen_to_history_non_wasm() {
		// Non-WASM listener installation is a no-op
		Router::new().listen_to_history();
	}

	#[rstest]
	fn test_router_debug(routes: RouteRegistry) {
		let router = Router::new().with_routes(routes);
		let debug = format!("{:?}", router);
		assert!(debug.contains("notFound"));
	}
}
