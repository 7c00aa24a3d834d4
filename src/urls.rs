//! Route templates, registry, URL matching and path hydration.
//!
//! # Examples
//!
//! ```
//! use waypoint::urls::{RouteRegistry, RouteTemplate, match_url};
//!
//! let routes = RouteRegistry::new().route(RouteTemplate::new("user", "user/:id"));
//! let matched = match_url("user/42", &routes).unwrap();
//! assert_eq!(matched.params.get("id"), Some("42"));
//! ```

pub use waypoint_urls::*;
