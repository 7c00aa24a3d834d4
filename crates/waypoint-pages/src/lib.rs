//! # Waypoint Pages
//!
//! Stateful half of the waypoint router: a [`Router`] that publishes the
//! active route to a [`CurrentRoute`] observable and keeps a [`History`] in
//! sync, with an optional deactivation guard able to veto navigation.
//!
//! Everything here is single-threaded. Guards and listeners may navigate
//! again; such requests are queued and run after the current one.
//!
//! ## Example
//!
//! ```
//! use waypoint_pages::{MemoryHistory, NavigationOutcome, Router};
//! use waypoint_urls::{Params, RouteRegistry, RouteTemplate};
//!
//! let router = Router::new()
//!     .with_history(MemoryHistory::new())
//!     .with_routes(
//!         RouteRegistry::new()
//!             .route(RouteTemplate::new("home", ""))
//!             .route(RouteTemplate::new("editor", "editor"))
//!             .route(RouteTemplate::new("notFound", "*")),
//!     );
//!
//! router.map_url_to_route("editor").unwrap();
//! router.current_route().add_can_deactivate(|_next| false);
//!
//! let outcome = router.navigate_to("home", Params::new()).unwrap();
//! assert_eq!(outcome, NavigationOutcome::Rejected);
//! assert_eq!(router.current_route().id().as_deref(), Some("editor"));
//! ```

pub mod router;

pub use router::{
	CurrentRoute, DeactivationGuard, GuardProvider, History, HistoryEntry, HistoryState,
	MemoryHistory, NavigationOutcome, NavigationTarget, ResolvedRoute, Router, RouterSettings,
	SettingsError, deactivation_guard,
};
#[cfg(target_arch = "wasm32")]
pub use router::BrowserHistory;
