//! Route parameters.
//!
//! [`Params`] is the flat `name -> value` mapping carried by a resolved route.
//! It keeps insertion order so hydrated query strings are deterministic, and it
//! stringifies values on insert so hosts can pass numbers directly.

use std::fmt::Display;

use indexmap::IndexMap;
use indexmap::map::{IntoIter, Iter};

/// Ordered mapping from parameter name to string value.
///
/// Equality ignores insertion order.
///
/// # Example
///
/// ```
/// use waypoint_urls::Params;
///
/// let mut params = Params::new();
/// params.insert("id", 7);
/// params.insert("tab", "posts");
///
/// assert_eq!(params.get("id"), Some("7"));
/// assert_eq!(params.keys().collect::<Vec<_>>(), vec!["id", "tab"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(IndexMap<String, String>);

impl Params {
	/// Creates an empty mapping.
	pub fn new() -> Self {
		Self(IndexMap::new())
	}

	/// Inserts a value, returning the previous one for that name.
	///
	/// Re-inserting an existing name keeps its original position.
	pub fn insert(&mut self, name: impl Into<String>, value: impl Display) -> Option<String> {
		self.0.insert(name.into(), value.to_string())
	}

	/// Builder-style [`insert`](Self::insert).
	pub fn with(mut self, name: impl Into<String>, value: impl Display) -> Self {
		self.insert(name, value);
		self
	}

	/// Returns the value bound to `name`.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.0.get(name).map(String::as_str)
	}

	/// Returns whether `name` is bound.
	pub fn contains_key(&self, name: &str) -> bool {
		self.0.contains_key(name)
	}

	/// Removes `name`, preserving the order of the remaining entries.
	pub fn remove(&mut self, name: &str) -> Option<String> {
		self.0.shift_remove(name)
	}

	/// Number of bound parameters.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns whether no parameter is bound.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Parameter names in insertion order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}

	/// `(name, value)` pairs in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	/// Copies every entry of `other` into `self`; `other` wins on collisions.
	pub fn merge(&mut self, other: Params) {
		self.0.extend(other.0);
	}

	/// Copies only the entries of `other` whose names are not bound yet.
	pub fn merge_missing(&mut self, other: Params) {
		for (name, value) in other.0 {
			self.0.entry(name).or_insert(value);
		}
	}
}

impl<K, V> FromIterator<(K, V)> for Params
where
	K: Into<String>,
	V: Display,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut params = Params::new();
		for (name, value) in iter {
			params.insert(name, value);
		}
		params
	}
}

impl IntoIterator for Params {
	type Item = (String, String);
	type IntoIter = IntoIter<String, String>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

impl<'a> IntoIterator for &'a Params {
	type Item = (&'a String, &'a String);
	type IntoIter = Iter<'a, String, String>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}
