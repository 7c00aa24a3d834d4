//! # Waypoint
//!
//! A client-side navigation router for single-page applications.
//!
//! Waypoint maps URLs to registered route templates, extracts path and query
//! parameters, publishes the active route through an observable value and keeps
//! the session history in sync. An optional deactivation guard on the active
//! route can veto navigation away from it.
//!
//! ## Crates
//!
//! - [`core`] - the `Observable` primitive behind the current route
//! - [`urls`] - route templates, the registry, URL matching and hydration
//!   (pure, no side effects)
//! - [`pages`] - the `Router` navigation controller, history integration and
//!   settings
//!
//! ## Quick Example
//!
//! ```
//! use waypoint::prelude::*;
//!
//! let history = MemoryHistory::new();
//! let router = Router::new()
//!     .with_history(history.clone())
//!     .with_routes(
//!         RouteRegistry::new()
//!             .route(RouteTemplate::new("home", ""))
//!             .route(RouteTemplate::new("user", "user/:id"))
//!             .route(RouteTemplate::new("notFound", "*")),
//!     );
//!
//! // Initial load
//! let current = router.map_url_to_route("user/42?tab=posts").unwrap().unwrap();
//! assert_eq!(current.id(), "user");
//! assert_eq!(current.params().get("tab"), Some("posts"));
//!
//! // Explicit navigation
//! router.navigate_to("user", Params::new().with("id", 7)).unwrap();
//! assert_eq!(history.current_url(), "user/7");
//! ```

pub mod core;
pub mod pages;
pub mod urls;

pub use waypoint_core::{Observable, Subscription};
pub use waypoint_pages::{
	CurrentRoute, DeactivationGuard, GuardProvider, History, HistoryState, MemoryHistory,
	NavigationOutcome, NavigationTarget, ResolvedRoute, Router, RouterSettings, SettingsError,
	deactivation_guard,
};
pub use waypoint_urls::{
	MatchOptions, ParamPrecedence, Params, RouteMatch, RouteRegistry, RouteTemplate, RouterError,
	TrailingSlash, hydrate, match_url,
};

/// Commonly used types.
pub mod prelude {
	pub use crate::{
		CurrentRoute, History, MemoryHistory, NavigationOutcome, Params, ResolvedRoute,
		RouteRegistry, RouteTemplate, Router, RouterError, RouterSettings, deactivation_guard,
		hydrate, match_url,
	};
}
