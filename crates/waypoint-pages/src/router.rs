//! Client-side navigation.
//!
//! - [`Router`]: navigation controller over a route registry
//! - [`CurrentRoute`]: observable active route with its deactivation guard
//! - [`History`]: session history collaborator ([`MemoryHistory`] everywhere,
//!   `BrowserHistory` on `wasm32`)
//! - [`RouterSettings`]: matching and history options

pub mod core;
pub mod current;
pub mod history;
pub mod resolved;
pub mod settings;

pub use self::core::{NavigationOutcome, NavigationTarget, Router};
pub use current::CurrentRoute;
#[cfg(target_arch = "wasm32")]
pub use history::BrowserHistory;
pub use history::{History, HistoryEntry, HistoryState, MemoryHistory};
pub use resolved::{DeactivationGuard, GuardProvider, ResolvedRoute, deactivation_guard};
pub use settings::{RouterSettings, SettingsError};
