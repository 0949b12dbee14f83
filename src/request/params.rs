//! Ordered request parameters.

// self
use crate::{_prelude::*, error::ConfigError};

/// Keys whose values are safe to render in `Debug` output.
const PUBLIC_KEYS: [&str; 4] = ["grant_type", "scope", "token_type_hint", "redirect_uri"];

/// Ordered parameter set sent to the authorization server.
///
/// Insertion order is kept on the wire. Inserting a key that already exists replaces its value
/// in place.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RequestParams(Vec<(String, String)>);
impl RequestParams {
	/// Creates an empty parameter set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder-style [`insert`](Self::insert).
	pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.insert(key, value);

		self
	}

	/// Inserts or replaces a parameter, returning the previous value.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
		let key = key.into();
		let value = value.into();

		match self.0.iter_mut().find(|(k, _)| *k == key) {
			Some((_, existing)) => Some(std::mem::replace(existing, value)),
			None => {
				self.0.push((key, value));

				None
			},
		}
	}

	/// Appends `extra` after the current parameters, refusing any key for which `reserved`
	/// returns true or that is already present.
	pub fn extend_unreserved<F>(
		&mut self,
		extra: RequestParams,
		reserved: F,
	) -> Result<(), ConfigError>
	where
		F: Fn(&str) -> bool,
	{
		let conflict = extra.0.iter().find(|(key, _)| reserved(key) || self.contains_key(key));

		if let Some((key, _)) = conflict {
			return Err(ConfigError::ReservedParameter { name: key.clone() });
		}

		self.0.extend(extra.0);

		Ok(())
	}

	/// Returns the value stored under `key`.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
	}

	/// Returns true when `key` is present.
	pub fn contains_key(&self, key: &str) -> bool {
		self.0.iter().any(|(k, _)| k == key)
	}

	/// Iterates over the parameters in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	/// Iterates over the parameter names in insertion order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(|(k, _)| k.as_str())
	}

	/// Number of parameters.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true when no parameters are set.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl<K, V> FromIterator<(K, V)> for RequestParams
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut params = Self::new();

		for (key, value) in iter {
			params.insert(key, value);
		}

		params
	}
}
impl<K, V, const N: usize> From<[(K, V); N]> for RequestParams
where
	K: Into<String>,
	V: Into<String>,
{
	fn from(pairs: [(K, V); N]) -> Self {
		pairs.into_iter().collect()
	}
}
impl IntoIterator for RequestParams {
	type IntoIter = std::vec::IntoIter<(String, String)>;
	type Item = (String, String);

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}
impl Debug for RequestParams {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let mut map = f.debug_map();

		for (key, value) in &self.0 {
			if PUBLIC_KEYS.contains(&key.as_str()) {
				map.entry(key, value);
			} else {
				map.entry(key, &"<redacted>");
			}
		}

		map.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn insert_replaces_in_place() {
		let mut params = RequestParams::from([("a", "1"), ("b", "2")]);

		assert_eq!(params.insert("a", "3"), Some("1".into()));
		assert_eq!(params.iter().collect::<Vec<_>>(), vec![("a", "3"), ("b", "2")]);
	}

	#[test]
	fn extend_unreserved_rejects_protected_and_duplicate_keys() {
		let mut params = RequestParams::from([("grant_type", "refresh_token")]);
		let err = params
			.extend_unreserved(RequestParams::from([("client_id", "x")]), |key| key == "client_id")
			.expect_err("Reserved key should be rejected.");

		assert!(matches!(err, ConfigError::ReservedParameter { name } if name == "client_id"));

		let err = params
			.extend_unreserved(RequestParams::from([("grant_type", "password")]), |_| false)
			.expect_err("Existing key should be rejected.");

		assert!(matches!(err, ConfigError::ReservedParameter { name } if name == "grant_type"));

		params
			.extend_unreserved(RequestParams::from([("scope", "read")]), |_| false)
			.expect("Unreserved key should be appended.");

		assert_eq!(params.keys().collect::<Vec<_>>(), vec!["grant_type", "scope"]);
	}

	#[test]
	fn debug_output_redacts_sensitive_values() {
		let params = RequestParams::from([("grant_type", "password"), ("password", "hunter2")]);
		let rendered = format!("{params:?}");

		assert!(rendered.contains("grant_type"));
		assert!(!rendered.contains("hunter2"));
	}
}
