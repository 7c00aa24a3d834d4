//! History API integration.
//!
//! The router only needs three operations from the session history: push an
//! entry, replace the current entry, and read the current entry's state.
//! [`MemoryHistory`] keeps the stack in process; on `wasm32` targets
//! [`BrowserHistory`] forwards to `window.history`.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// State object stored with each history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryState {
	/// The hydrated path the entry was created for.
	pub path: String,
}

impl HistoryState {
	pub fn new(path: impl Into<String>) -> Self {
		Self { path: path.into() }
	}
}

/// Session history collaborator.
///
/// Writes are fire-and-forget: implementations log failures instead of
/// reporting them.
pub trait History {
	/// Adds an entry after the current one, discarding forward entries.
	fn push_state(&self, state: &HistoryState, url: &str);

	/// Overwrites the current entry.
	fn replace_state(&self, state: &HistoryState, url: &str);

	/// State of the current entry; `None` for an entry the router never wrote.
	fn state(&self) -> Option<HistoryState>;
}

/// One entry of a [`MemoryHistory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
	pub url: String,
	pub state: Option<HistoryState>,
}

#[derive(Debug)]
struct Stack {
	entries: Vec<HistoryEntry>,
	index: usize,
}

/// In-process history stack.
///
/// Starts with one state-less entry, like a freshly loaded document. Clones
/// share the same stack, so a test can keep a handle while the router owns
/// another.
///
/// # Example
///
/// ```
/// use waypoint_pages::{History, HistoryState, MemoryHistory};
///
/// let history = MemoryHistory::new();
/// history.push_state(&HistoryState::new("about"), "about");
/// history.push_state(&HistoryState::new("user/7"), "user/7");
///
/// assert_eq!(history.back().as_deref(), Some("about"));
/// assert_eq!(history.forward().as_deref(), Some("user/7"));
/// assert_eq!(history.forward(), None);
/// ```
#[derive(Debug, Clone)]
pub struct MemoryHistory {
	stack: Rc<RefCell<Stack>>,
}

impl MemoryHistory {
	/// Creates a stack whose only entry has an empty URL.
	pub fn new() -> Self {
		Self::with_initial_url("")
	}

	/// Creates a stack whose only entry is `url`, with no state.
	pub fn with_initial_url(url: impl Into<String>) -> Self {
		Self {
			stack: Rc::new(RefCell::new(Stack {
				entries: vec![HistoryEntry {
					url: url.into(),
					state: None,
				}],
				index: 0,
			})),
		}
	}

	/// Moves one entry back and returns its URL, or `None` at the start.
	pub fn back(&self) -> Option<String> {
		let mut stack = self.stack.borrow_mut();
		if stack.index == 0 {
			return None;
		}
		stack.index -= 1;
		Some(stack.entries[stack.index].url.clone())
	}

	/// Moves one entry forward and returns its URL, or `None` at the end.
	pub fn forward(&self) -> Option<String> {
		let mut stack = self.stack.borrow_mut();
		if stack.index + 1 >= stack.entries.len() {
			return None;
		}
		stack.index += 1;
		Some(stack.entries[stack.index].url.clone())
	}

	/// Number of entries, including forward ones.
	pub fn len(&self) -> usize {
		self.stack.borrow().entries.len()
	}

	/// Always `false`: the stack holds at least the initial entry.
	pub fn is_empty(&self) -> bool {
		self.stack.borrow().entries.is_empty()
	}

	/// Position of the current entry.
	pub fn index(&self) -> usize {
		self.stack.borrow().index
	}

	pub fn current_url(&self) -> String {
		let stack = self.stack.borrow();
		stack.entries[stack.index].url.clone()
	}

	pub fn current_entry(&self) -> HistoryEntry {
		let stack = self.stack.borrow();
		stack.entries[stack.index].clone()
	}

	/// Snapshot of every entry.
	pub fn entries(&self) -> Vec<HistoryEntry> {
		self.stack.borrow().entries.clone()
	}
}

impl Default for MemoryHistory {
	fn default() -> Self {
		Self::new()
	}
}

impl History for MemoryHistory {
	fn push_state(&self, state: &HistoryState, url: &str) {
		let mut stack = self.stack.borrow_mut();
		let next = stack.index + 1;
		stack.entries.truncate(next);
		stack.entries.push(HistoryEntry {
			url: url.to_string(),
			state: Some(state.clone()),
		});
		stack.index = next;
	}

	fn replace_state(&self, state: &HistoryState, url: &str) {
		let mut stack = self.stack.borrow_mut();
		let index = stack.index;
		stack.entries[index] = HistoryEntry {
			url: url.to_string(),
			state: Some(state.clone()),
		};
	}

	fn state(&self) -> Option<HistoryState> {
		let stack = self.stack.borrow();
		stack.entries[stack.index].state.clone()
	}
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserHistory;

#[cfg(target_arch = "wasm32")]
mod browser {
	use wasm_bindgen::JsValue;

	use super::{History, HistoryState};

	/// `window.history`, with [`HistoryState`] stored as a plain JS object.
	#[derive(Debug, Clone)]
	pub struct BrowserHistory {
		history: web_sys::History,
	}

	impl BrowserHistory {
		/// Returns `None` outside a browsing context.
		pub fn new() -> Option<Self> {
			let history = web_sys::window()?.history().ok()?;
			Some(Self { history })
		}
	}

	fn to_js(state: &HistoryState) -> Option<JsValue> {
		let json = serde_json::to_string(state).ok()?;
		js_sys::JSON::parse(&json).ok()
	}

	impl History for BrowserHistory {
		fn push_state(&self, state: &HistoryState, url: &str) {
			let Some(value) = to_js(state) else {
				tracing::warn!(url, "failed to convert history state");
				return;
			};
			if let Err(e) = self.history.push_state_with_url(&value, "", Some(url)) {
				tracing::warn!(url, error = ?e, "pushState failed");
			}
		}

		fn replace_state(&self, state: &HistoryState, url: &str) {
			let Some(value) = to_js(state) else {
				tracing::warn!(url, "failed to convert history state");
				return;
			};
			if let Err(e) = self.history.replace_state_with_url(&value, "", Some(url)) {
				tracing::warn!(url, error = ?e, "replaceState failed");
			}
		}

		fn state(&self) -> Option<HistoryState> {
			let value = self.history.state().ok()?;
			if value.is_null() || value.is_undefined() {
				return None;
			}
			let json: String = js_sys::JSON::stringify(&value).ok()?.into();
			match serde_json::from_str(&json) {
				Ok(state) => Some(state),
				Err(e) => {
					tracing::debug!(error = %e, "history entry carries foreign state");
					None
				}
			}
		}
	}
}
