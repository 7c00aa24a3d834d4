//! Observable - Single-value Reactive Store
//!
//! `Observable<T>` holds exactly one value and fans every change out to its
//! listeners, synchronously and in registration order.
//!
//! ## Key Features
//!
//! - **Store contract**: `subscribe` calls the listener immediately with the
//!   current value, then again after every `set()`/`update()`.
//! - **Re-entrancy safe**: no borrow is held while listeners run. A listener may
//!   read the store, subscribe new listeners or publish a new value; nested
//!   publishes are queued and delivered after the current round, so every
//!   listener sees values in publish order.
//! - **Cheap handles**: clones share the same value and listener list.
//!
//! ## Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use waypoint_core::Observable;
//!
//! let count = Observable::new(0);
//! let seen = Rc::new(RefCell::new(Vec::new()));
//!
//! let sink = Rc::clone(&seen);
//! let subscription = count.subscribe(move |n| sink.borrow_mut().push(*n));
//!
//! count.set(1);
//! count.update(|n| *n += 1);
//! subscription.unsubscribe();
//! count.set(10);
//!
//! assert_eq!(*seen.borrow(), vec![0, 1, 2]);
//! ```

use core::cell::{Cell, RefCell};
use core::fmt;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

type Listener<T> = Rc<dyn Fn(&T)>;

struct Shared<T: 'static> {
	value: RefCell<T>,
	listeners: RefCell<Vec<(usize, Listener<T>)>>,
	next_listener_id: Cell<usize>,
	/// Values waiting to be delivered, in publish order.
	pending: RefCell<VecDeque<T>>,
	publishing: Cell<bool>,
}

/// Resets the publishing flag even if a listener panics.
struct PublishGuard<'a, T: 'static>(&'a Shared<T>);

impl<T: 'static> Drop for PublishGuard<'_, T> {
	fn drop(&mut self) {
		self.0.publishing.set(false);
		self.0.pending.borrow_mut().clear();
	}
}

/// A reactive store holding a single value.
///
/// `Observable<T>` implements `Clone`; all clones share the same value and
/// listeners through `Rc`, so it is intended for single-threaded use.
pub struct Observable<T: 'static> {
	shared: Rc<Shared<T>>,
}

impl<T: 'static> Clone for Observable<T> {
	fn clone(&self) -> Self {
		Self {
			shared: Rc::clone(&self.shared),
		}
	}
}

impl<T: 'static> Observable<T> {
	/// Create a new Observable with the given initial value.
	pub fn new(value: T) -> Self {
		Self {
			shared: Rc::new(Shared {
				value: RefCell::new(value),
				listeners: RefCell::new(Vec::new()),
				next_listener_id: Cell::new(0),
				pending: RefCell::new(VecDeque::new()),
				publishing: Cell::new(false),
			}),
		}
	}

	/// Peek at the current value by reference without subscribing.
	///
	/// The closure must not publish to this observable.
	pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		f(&self.shared.value.borrow())
	}

	/// Returns the number of registered listeners.
	pub fn subscriber_count(&self) -> usize {
		self.shared.listeners.borrow().len()
	}
}

impl<T: Clone + 'static> Observable<T> {
	/// Get a copy of the current value without subscribing.
	pub fn get(&self) -> T {
		self.shared.value.borrow().clone()
	}

	/// Replace the value and notify every listener.
	pub fn set(&self, value: T) {
		*self.shared.value.borrow_mut() = value;
		self.publish();
	}

	/// Mutate the value in place and notify every listener once.
	pub fn update<F>(&self, f: F)
	where
		F: FnOnce(&mut T),
	{
		f(&mut self.shared.value.borrow_mut());
		self.publish();
	}

	/// Register a listener.
	///
	/// The listener runs immediately with the current value and then after
	/// every publish until [`Subscription::unsubscribe`] is called. Dropping the
	/// returned handle does not remove the listener.
	pub fn subscribe<F>(&self, listener: F) -> Subscription
	where
		F: Fn(&T) + 'static,
	{
		let id = self.shared.next_listener_id.get();
		self.shared.next_listener_id.set(id + 1);

		let listener: Listener<T> = Rc::new(listener);
		self.shared
			.listeners
			.borrow_mut()
			.push((id, Rc::clone(&listener)));

		let current = self.get();
		listener(&current);

		let shared: Weak<Shared<T>> = Rc::downgrade(&self.shared);
		Subscription::new(move || {
			if let Some(shared) = shared.upgrade() {
				shared
					.listeners
					.borrow_mut()
					.retain(|(listener_id, _)| *listener_id != id);
			}
		})
	}

	fn publish(&self) {
		self.shared.pending.borrow_mut().push_back(self.get());

		// A publish from inside a listener is delivered by the outer loop.
		if self.shared.publishing.replace(true) {
			return;
		}
		let _guard = PublishGuard(&self.shared);

		loop {
			let next = self.shared.pending.borrow_mut().pop_front();
			let Some(value) = next else {
				break;
			};

			let listeners: Vec<Listener<T>> = self
				.shared
				.listeners
				.borrow()
				.iter()
				.map(|(_, listener)| Rc::clone(listener))
				.collect();

			tracing::trace!(listeners = listeners.len(), "publishing observable value");
			for listener in listeners {
				listener(&value);
			}
		}
	}
}

impl<T: Default + 'static> Default for Observable<T> {
	fn default() -> Self {
		Self::new(T::default())
	}
}

impl<T: fmt::Debug + 'static> fmt::Debug for Observable<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Observable")
			.field("value", &*self.shared.value.borrow())
			.field("subscribers", &self.subscriber_count())
			.finish()
	}
}

/// Handle returned by [`Observable::subscribe`].
pub struct Subscription {
	unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
	fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
		Self {
			unsubscribe: Some(Box::new(unsubscribe)),
		}
	}

	/// Remove the listener from its observable.
	///
	/// Has no effect if the observable has already been dropped.
	pub fn unsubscribe(mut self) {
		if let Some(unsubscribe) = self.unsubscribe.take() {
			unsubscribe();
		}
	}
}

impl fmt::Debug for Subscription {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscription")
			.field("active", &self.unsubscribe.is_some())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn recorder<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, impl Fn(&T) + 'static) {
		let seen = Rc::new(RefCell::new(Vec::new()));
		let sink = Rc::clone(&seen);
		(seen, move |value: &T| sink.borrow_mut().push(value.clone()))
	}

	#[rstest]
	fn test_observable_creation() {
		let observable = Observable::new(42);
		assert_eq!(observable.get(), 42);
		assert_eq!(observable.subscriber_count(), 0);
	}

	#[rstest]
	fn test_observable_set_and_update() {
		let observable = Observable::new(0);

		observable.set(10);
		assert_eq!(observable.get(), 10);

		observable.update(|n| *n *= 3);
		assert_eq!(observable.get(), 30);
	}

	#[rstest]
	fn test_observable_with_peeks_by_reference() {
		let observable = Observable::new(String::from("home"));
		let len = observable.with(|value| value.len());
		assert_eq!(len, 4);
	}

	#[rstest]
	fn test_subscribe_delivers_current_value_immediately() {
		let observable = Observable::new(7);
		let (seen, listener) = recorder();

		let _subscription = observable.subscribe(listener);

		assert_eq!(*seen.borrow(), vec![7]);
	}

	#[rstest]
	fn test_listeners_run_in_registration_order() {
		let observable = Observable::new(0);
		let order = Rc::new(RefCell::new(Vec::new()));

		for name in ["first", "second", "third"] {
			let order = Rc::clone(&order);
			let _ = observable.subscribe(move |value: &i32| {
				order.borrow_mut().push((name, *value));
			});
		}
		order.borrow_mut().clear();

		observable.set(1);

		assert_eq!(
			*order.borrow(),
			vec![("first", 1), ("second", 1), ("third", 1)]
		);
	}

	#[rstest]
	fn test_unsubscribe_stops_delivery() {
		let observable = Observable::new(0);
		let (seen, listener) = recorder();

		let subscription = observable.subscribe(listener);
		observable.set(1);
		subscription.unsubscribe();
		observable.set(2);

		assert_eq!(*seen.borrow(), vec![0, 1]);
		assert_eq!(observable.subscriber_count(), 0);
	}

	#[rstest]
	fn test_dropping_subscription_keeps_listener() {
		let observable = Observable::new(0);
		let (seen, listener) = recorder();

		drop(observable.subscribe(listener));
		observable.set(5);

		assert_eq!(*seen.borrow(), vec![0, 5]);
	}

	#[rstest]
	fn test_clones_share_state() {
		let first = Observable::new(1);
		let second = first.clone();

		second.set(99);

		assert_eq!(first.get(), 99);
	}

	#[rstest]
	fn test_reentrant_publish_is_delivered_in_order() {
		let observable = Observable::new(0);

		// The first listener bumps odd values to the next even value.
		let handle = observable.clone();
		let _ = observable.subscribe(move |value: &i32| {
			if value % 2 == 1 {
				handle.set(value + 1);
			}
		});
		let (seen, listener) = recorder();
		let _ = observable.subscribe(listener);

		observable.set(1);

		assert_eq!(*seen.borrow(), vec![0, 1, 2]);
		assert_eq!(observable.get(), 2);
	}

	#[rstest]
	fn test_listener_can_read_and_subscribe_during_publish() {
		let observable = Observable::new(0);
		let inner_seen = Rc::new(RefCell::new(Vec::new()));

		let handle = observable.clone();
		let sink = Rc::clone(&inner_seen);
		let _ = observable.subscribe(move |value: &i32| {
			if *value == 1 {
				assert_eq!(handle.get(), 1);
				let sink = Rc::clone(&sink);
				let _ = handle.subscribe(move |v: &i32| sink.borrow_mut().push(*v));
			}
		});

		observable.set(1);
		observable.set(2);

		assert_eq!(*inner_seen.borrow(), vec![1, 2]);
	}

	#[rstest]
	fn test_unsubscribe_after_observable_dropped() {
		let observable = Observable::new(0);
		let subscription = observable.subscribe(|_| {});
		drop(observable);

		subscription.unsubscribe();
	}
}
