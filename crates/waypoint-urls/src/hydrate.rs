//! Path hydration: building a concrete URL from a template and parameters.

use crate::error::RouterError;
use crate::params::Params;
use crate::pattern::Segment;
use crate::query::{encode_component, encode_query};
use crate::route::RouteTemplate;

/// Hydrates `route` with `params`.
///
/// Placeholders take their percent-encoded value from `params`; literal and
/// `*` segments are copied as written. Parameters that are not placeholders
/// are appended as an encoded query string in insertion order.
///
/// Because values are encoded, `{id: "a b"}` hydrates `user/:id` to
/// `user/a%20b`, and that is the path pushed to history.
///
/// This is the inverse of [`match_url`](crate::match_url) for values made of
/// URL-safe characters. Values containing `%` are encoded again, so they do
/// not round-trip byte for byte.
///
/// # Errors
///
/// Returns [`RouterError::MissingParameter`] if a placeholder has no value.
///
/// # Example
///
/// ```
/// use waypoint_urls::{Params, RouteTemplate, hydrate};
///
/// let route = RouteTemplate::new("user", "user/:id");
/// let params = Params::new().with("id", 7).with("tab", "posts");
///
/// assert_eq!(hydrate(&route, &params).unwrap(), "user/7?tab=posts");
/// ```
pub fn hydrate(route: &RouteTemplate, params: &Params) -> Result<String, RouterError> {
	let mut segments = Vec::with_capacity(route.path().segments().len());
	for segment in route.path().segments() {
		match segment {
			Segment::Param(name) => {
				let value = params
					.get(name)
					.ok_or_else(|| RouterError::MissingParameter {
						route: route.id().to_string(),
						param: name.clone(),
					})?;
				segments.push(encode_component(value).into_owned());
			}
			other => segments.push(other.to_string()),
		}
	}
	let mut url = segments.join("/");

	let query = encode_query(
		params
			.iter()
			.filter(|(name, _)| !route.path().has_param(name)),
	);
	if !query.is_empty() {
		url.push('?');
		url.push_str(&query);
	}

	tracing::debug!(route_id = route.id(), url = %url, "hydrated path");
	Ok(url)
}
