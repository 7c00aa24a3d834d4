//! Reactive primitives.
//!
//! # Examples
//!
//! ```
//! use waypoint::core::Observable;
//!
//! let count = Observable::new(0);
//! count.set(1);
//! assert_eq!(count.get(), 1);
//! ```

pub use waypoint_core::*;
