//! Navigation controller, current-route observable and history integration.
//!
//! On `wasm32` targets `BrowserHistory` and `Router::listen_to_history` talk
//! to `window.history`; elsewhere the router runs over a `MemoryHistory`.

pub use waypoint_pages::*;
