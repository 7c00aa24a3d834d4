//! # Waypoint URLs
//!
//! Pure routing functions for client-side navigation:
//!
//! - [`RouteTemplate`] / [`TemplatePath`]: `/`-delimited templates with literal,
//!   `:name` and `*` segments
//! - [`RouteRegistry`]: ordered `id -> template` mapping
//! - [`match_url`]: first-match URL resolution with path and query parameters
//! - [`hydrate`]: the inverse, building a concrete URL from a template
//!
//! Nothing in this crate performs I/O or holds global state.
//!
//! ## Example
//!
//! ```
//! use waypoint_urls::{Params, RouteRegistry, RouteTemplate, hydrate, match_url};
//!
//! let routes = RouteRegistry::new()
//!     .route(RouteTemplate::new("home", ""))
//!     .route(RouteTemplate::new("user", "user/:id"))
//!     .route(RouteTemplate::new("notFound", "*"));
//!
//! let matched = match_url("user/42?tab=posts", &routes).unwrap();
//! assert_eq!(matched.route.id(), "user");
//! assert_eq!(matched.params.get("id"), Some("42"));
//! assert_eq!(matched.params.get("tab"), Some("posts"));
//!
//! let params: Params = [("id", 7)].into_iter().collect();
//! assert_eq!(hydrate(&routes["user"], &params).unwrap(), "user/7");
//! ```

pub mod error;
pub mod hydrate;
pub mod matcher;
pub mod params;
pub mod pattern;
pub mod query;
pub mod registry;
pub mod route;

pub use error::RouterError;
pub use hydrate::hydrate;
pub use matcher::{MatchOptions, ParamPrecedence, RouteMatch, TrailingSlash, match_url, match_url_with};
pub use params::Params;
pub use pattern::{Segment, TemplatePath};
pub use query::{decode_component, encode_component, encode_query, parse_query};
pub use registry::RouteRegistry;
pub use route::RouteTemplate;
