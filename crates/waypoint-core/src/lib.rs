//! # Waypoint Core
//!
//! Shared building blocks for the waypoint router crates.
//!
//! - [`reactive`]: single-value observable store with synchronous fan-out
//!
//! The router publishes the active route through an [`Observable`], and hosts
//! subscribe to it to re-render their views.

pub mod reactive;

pub use reactive::{Observable, Subscription};
