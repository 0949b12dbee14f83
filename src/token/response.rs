//! Raw token endpoint responses with typed accessors for the well-known fields.

// crates.io
use time::format_description::well_known::Rfc3339;
// self
use crate::{_prelude::*, error::ConstructionError, token::TokenTypeHint};

const REDACTED_FIELDS: [&str; 3] = ["access_token", "refresh_token", "id_token"];

/// JSON object returned by the authorization server.
///
/// The mapping is kept verbatim; only the expiry fields and token strings are interpreted.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenResponse(JsonObject);
impl TokenResponse {
	/// Wraps a decoded JSON object.
	pub fn new(fields: JsonObject) -> Self {
		Self(fields)
	}

	/// Returns a raw field.
	pub fn get(&self, key: &str) -> Option<&JsonValue> {
		self.0.get(key)
	}

	/// Returns a field when it holds a string.
	pub fn get_str(&self, key: &str) -> Option<&str> {
		self.get(key).and_then(JsonValue::as_str)
	}

	/// Access token string. Callers must avoid logging it.
	pub fn access_token(&self) -> Option<&str> {
		self.get_str("access_token")
	}

	/// Refresh token string, if one was issued. Callers must avoid logging it.
	pub fn refresh_token(&self) -> Option<&str> {
		self.get_str("refresh_token")
	}

	/// Token string selected by a revocation hint.
	pub fn token(&self, hint: TokenTypeHint) -> Option<&str> {
		self.get_str(hint.as_str())
	}

	/// Token type reported by the server (usually `Bearer`).
	pub fn token_type(&self) -> Option<&str> {
		self.get_str("token_type")
	}

	/// Space-delimited scope string, if the server echoed one.
	pub fn scope(&self) -> Option<&str> {
		self.get_str("scope")
	}

	/// Relative lifetime from `expires_in`, accepting whole seconds as a number or string.
	pub fn expires_in(&self) -> Result<Option<Duration>, ConstructionError> {
		let Some(raw) = self.get("expires_in").filter(|value| !value.is_null()) else {
			return Ok(None);
		};
		let invalid = || ConstructionError::InvalidExpiresIn { value: raw.to_string() };
		let seconds = match raw {
			JsonValue::Number(n) => n
				.as_i64()
				.or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
			JsonValue::String(s) => s.trim().parse::<i64>().ok(),
			_ => None,
		}
		.filter(|seconds| *seconds >= 0)
		.ok_or_else(invalid)?;

		Ok(Some(Duration::seconds(seconds)))
	}

	/// Absolute expiry from `expires_at`, accepting RFC 3339 strings or Unix seconds.
	pub fn expires_at(&self) -> Result<Option<OffsetDateTime>, ConstructionError> {
		let Some(raw) = self.get("expires_at").filter(|value| !value.is_null()) else {
			return Ok(None);
		};
		let instant = match raw {
			JsonValue::String(s) => OffsetDateTime::parse(s.trim(), &Rfc3339).ok(),
			JsonValue::Number(n) => n
				.as_i64()
				.or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
				.and_then(|secs| OffsetDateTime::from_unix_timestamp(secs).ok()),
			_ => None,
		};

		instant
			.map(Some)
			.ok_or_else(|| ConstructionError::InvalidExpiresAt { value: raw.to_string() })
	}

	/// Borrows the raw mapping.
	pub fn as_object(&self) -> &JsonObject {
		&self.0
	}

	/// Returns the raw mapping.
	pub fn into_inner(self) -> JsonObject {
		self.0
	}

	/// Stores `instant` under `expires_at` as an RFC 3339 string.
	pub(crate) fn with_expires_at(
		mut self,
		instant: OffsetDateTime,
	) -> Result<Self, ConstructionError> {
		let formatted = instant
			.format(&Rfc3339)
			.map_err(|_| ConstructionError::InvalidExpiresAt { value: instant.to_string() })?;

		self.0.insert("expires_at".into(), JsonValue::String(formatted));

		Ok(self)
	}

	/// Inserts `key` only when the response does not already carry it.
	pub(crate) fn with_default(mut self, key: &str, value: &str) -> Self {
		if self.get_str(key).is_none() {
			self.0.insert(key.to_owned(), JsonValue::String(value.to_owned()));
		}

		self
	}
}
impl From<JsonObject> for TokenResponse {
	fn from(fields: JsonObject) -> Self {
		Self(fields)
	}
}
impl Debug for TokenResponse {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let mut map = f.debug_map();

		for (key, value) in &self.0 {
			if REDACTED_FIELDS.contains(&key.as_str()) {
				map.entry(key, &"<redacted>");
			} else {
				map.entry(key, value);
			}
		}

		map.finish()
	}
}
