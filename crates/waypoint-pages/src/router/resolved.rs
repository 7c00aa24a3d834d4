//! Resolved routes: a template bound to concrete parameters.

use std::fmt;
use std::rc::Rc;

use waypoint_urls::{Params, RouteTemplate};

/// Predicate run against the candidate next route before leaving the current
/// one. Returning `false` vetoes the navigation.
pub type DeactivationGuard = Rc<dyn Fn(&ResolvedRoute) -> bool>;

/// Host callback asked for a guard whenever a route becomes active.
pub type GuardProvider = Rc<dyn Fn(&ResolvedRoute) -> Option<DeactivationGuard>>;

/// Wraps a closure as a [`DeactivationGuard`].
///
/// ```
/// use waypoint_pages::deactivation_guard;
///
/// let guard = deactivation_guard(|next| next.id() != "checkout");
/// ```
pub fn deactivation_guard<F>(guard: F) -> DeactivationGuard
where
	F: Fn(&ResolvedRoute) -> bool + 'static,
{
	Rc::new(guard)
}

/// The active route: a shared template, its parameters and an optional guard.
///
/// Values are replaced as a whole when the route changes; the registry's
/// templates are never modified.
#[derive(Clone)]
pub struct ResolvedRoute {
	template: Rc<RouteTemplate>,
	params: Params,
	can_deactivate: Option<DeactivationGuard>,
}

impl ResolvedRoute {
	/// Binds `params` to `template` without a guard.
	pub fn new(template: Rc<RouteTemplate>, params: Params) -> Self {
		Self {
			template,
			params,
			can_deactivate: None,
		}
	}

	/// Returns a copy carrying `guard`, replacing any previous one.
	pub fn with_can_deactivate(mut self, guard: DeactivationGuard) -> Self {
		self.can_deactivate = Some(guard);
		self
	}

	/// Id of the underlying template.
	pub fn id(&self) -> &str {
		self.template.id()
	}

	pub fn template(&self) -> &Rc<RouteTemplate> {
		&self.template
	}

	pub fn params(&self) -> &Params {
		&self.params
	}

	/// Returns the deactivation guard, if any.
	pub fn can_deactivate(&self) -> Option<&DeactivationGuard> {
		self.can_deactivate.as_ref()
	}

	pub fn has_guard(&self) -> bool {
		self.can_deactivate.is_some()
	}
}

impl fmt::Debug for ResolvedRoute {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ResolvedRoute")
			.field("id", &self.template.id())
			.field("path", &self.template.path().as_str())
			.field("params", &self.params)
			.field("has_guard", &self.has_guard())
			.finish()
	}
}
