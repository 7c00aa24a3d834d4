//! Reactive primitives.
//!
//! The router only needs a store-like primitive: one value, many listeners,
//! synchronous delivery. [`Observable`] provides exactly that.

pub mod observable;

pub use observable::{Observable, Subscription};
