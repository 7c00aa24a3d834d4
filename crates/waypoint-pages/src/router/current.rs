//! The current-route observable handed to host code.

use std::fmt;

use waypoint_core::{Observable, Subscription};

use super::resolved::{DeactivationGuard, ResolvedRoute, deactivation_guard};

/// Read-only view of the active route, plus [`add_can_deactivate`].
///
/// `None` means nothing has been loaded yet or the last URL matched no route.
/// Clones share the same value.
///
/// [`add_can_deactivate`]: CurrentRoute::add_can_deactivate
#[derive(Clone, Default)]
pub struct CurrentRoute {
	inner: Observable<Option<ResolvedRoute>>,
}

impl CurrentRoute {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a listener.
	///
	/// The listener runs immediately with the current value and then
	/// synchronously on every change, in registration order.
	pub fn subscribe<F>(&self, listener: F) -> Subscription
	where
		F: Fn(Option<&ResolvedRoute>) + 'static,
	{
		self.inner.subscribe(move |route| listener(route.as_ref()))
	}

	/// Returns a copy of the active route.
	pub fn get(&self) -> Option<ResolvedRoute> {
		self.inner.get()
	}

	/// Borrows the active route without cloning it.
	///
	/// The closure must not publish to this handle.
	pub fn with<R>(&self, f: impl FnOnce(Option<&ResolvedRoute>) -> R) -> R {
		self.inner.with(|route| f(route.as_ref()))
	}

	/// Id of the active route.
	pub fn id(&self) -> Option<String> {
		self.with(|route| route.map(|r| r.id().to_string()))
	}

	/// Attaches a deactivation guard to the active route.
	///
	/// The active value is replaced by a copy carrying `guard`, and listeners
	/// are notified. Returns `false` without changing anything when no route
	/// is active.
	pub fn add_can_deactivate<F>(&self, guard: F) -> bool
	where
		F: Fn(&ResolvedRoute) -> bool + 'static,
	{
		let Some(route) = self.get() else {
			tracing::debug!("no active route, deactivation guard ignored");
			return false;
		};
		tracing::debug!(route_id = route.id(), "deactivation guard attached");
		self.publish(Some(route.with_can_deactivate(deactivation_guard(guard))));
		true
	}

	pub fn subscriber_count(&self) -> usize {
		self.inner.subscriber_count()
	}

	pub(crate) fn publish(&self, route: Option<ResolvedRoute>) {
		self.inner.set(route);
	}

	/// Clones the active guard out so no borrow is held while it runs.
	pub(crate) fn guard(&self) -> Option<DeactivationGuard> {
		self.with(|route| route.and_then(|r| r.can_deactivate().cloned()))
	}
}

impl fmt::Debug for CurrentRoute {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("CurrentRoute").field(&self.get()).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::cell::RefCell;
	use std::rc::Rc;

	use rstest::rstest;
	use waypoint_urls::{Params, RouteTemplate};

	fn route(id: &str) -> ResolvedRoute {
		ResolvedRoute::new(Rc::new(RouteTemplate::new(id, id)), Params::new())
	}

	#[rstest]
	fn test_starts_empty() {
		let current = CurrentRoute::new();
		assert!(current.get().is_none());
		assert!(current.guard().is_none());
	}

	#[rstest]
	fn test_subscribe_receives_current_then_updates() {
		let current = CurrentRoute::new();
		let seen = Rc::new(RefCell::new(Vec::new()));
		let sink = Rc::clone(&seen);
		let _subscription = current.subscribe(move |route| {
			sink.borrow_mut().push(route.map(|r| r.id().to_string()));
		});

		current.publish(Some(route("home")));
		current.publish(None);

		assert_eq!(
			*seen.borrow(),
			vec![None, Some("home".to_string()), None]
		);
	}

	#[rstest]
	fn test_unsubscribe_stops_delivery() {
		let current = CurrentRoute::new();
		let count = Rc::new(RefCell::new(0));
		let counter = Rc::clone(&count);
		let subscription = current.subscribe(move |_| *counter.borrow_mut() += 1);

		subscription.unsubscribe();
		current.publish(Some(route("home")));

		assert_eq!(*count.borrow(), 1);
		assert_eq!(current.subscriber_count(), 0);
	}

	#[rstest]
	fn test_add_can_deactivate_without_route_is_noop() {
		let current = CurrentRoute::new();
		assert!(!current.add_can_deactivate(|_| false));
		assert!(current.get().is_none());
	}

	#[rstest]
	fn test_add_can_deactivate_notifies_and_keeps_route() {
		let current = CurrentRoute::new();
		current.publish(Some(route("editor")));

		let notified = Rc::new(RefCell::new(0));
		let counter = Rc::clone(&notified);
		let _subscription = current.subscribe(move |_| *counter.borrow_mut() += 1);

		assert!(current.add_can_deactivate(|_| false));

		assert_eq!(*notified.borrow(), 2);
		assert_eq!(current.id().as_deref(), Some("editor"));
		assert!(current.guard().is_some());
	}
}
