//! Immutable access token values and the terminal revoked state.

// self
use crate::{
	_prelude::*,
	config::MissingExpiryPolicy,
	error::ConstructionError,
	token::{TokenResponse, TokenTypeHint},
};

/// Lifecycle status of an [`AccessToken`] at a given instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenStatus {
	/// Token is currently valid.
	Active,
	/// Token reached its expiry instant.
	Expired,
}

/// Access token value wrapping a token endpoint response plus its normalized expiry.
///
/// Values are never mutated: refreshing produces a new [`AccessToken`], and
/// [`TokenManager::revoke_all`](crate::manager::TokenManager::revoke_all) consumes the value and
/// hands back a [`RevokedToken`].
#[derive(Clone, PartialEq)]
pub struct AccessToken {
	response: TokenResponse,
	created_at: OffsetDateTime,
	expires_at: Option<OffsetDateTime>,
}
impl AccessToken {
	/// Builds a token stamped with the current clock.
	pub fn from_response(
		response: TokenResponse,
		policy: MissingExpiryPolicy,
	) -> Result<Self, ConstructionError> {
		Self::from_response_at(response, policy, OffsetDateTime::now_utc())
	}

	/// Builds a token as if it had been issued at `created_at`.
	///
	/// An absolute `expires_at` is used as-is. Otherwise `expires_in` is resolved against
	/// `created_at` and written back as `expires_at`, so feeding [`Self::response`] into a later
	/// `create` keeps the same expiry. With neither field `policy` decides whether the token
	/// never expires or is stale from `created_at` on.
	pub fn from_response_at(
		response: TokenResponse,
		policy: MissingExpiryPolicy,
		created_at: OffsetDateTime,
	) -> Result<Self, ConstructionError> {
		if response.access_token().is_none() {
			return Err(ConstructionError::MissingAccessToken);
		}

		let (response, expires_at) = match (response.expires_at()?, response.expires_in()?) {
			(Some(instant), _) => (response, Some(instant)),
			(None, Some(lifetime)) => {
				let instant = created_at.checked_add(lifetime).ok_or_else(|| {
					ConstructionError::InvalidExpiresIn {
						value: lifetime.whole_seconds().to_string(),
					}
				})?;

				(response.with_expires_at(instant)?, Some(instant))
			},
			(None, None) => match policy {
				MissingExpiryPolicy::NeverExpires => (response, None),
				MissingExpiryPolicy::AlwaysExpired => (response, Some(created_at)),
			},
		};

		Ok(Self { response, created_at, expires_at })
	}

	/// Access token string. Callers must avoid logging it.
	pub fn access_token(&self) -> &str {
		self.response.access_token().unwrap_or_default()
	}

	/// Refresh token string, if one was issued.
	pub fn refresh_token(&self) -> Option<&str> {
		self.response.refresh_token()
	}

	/// Token string selected by a revocation hint.
	pub fn token(&self, hint: TokenTypeHint) -> Option<&str> {
		self.response.token(hint)
	}

	/// Raw token endpoint response.
	pub fn response(&self) -> &TokenResponse {
		&self.response
	}

	/// Instant the value was created.
	pub fn created_at(&self) -> OffsetDateTime {
		self.created_at
	}

	/// Normalized expiry instant; `None` means the token never expires.
	pub fn expires_at(&self) -> Option<OffsetDateTime> {
		self.expires_at
	}

	/// Computes the lifecycle status at a given instant. The expiry instant itself counts as
	/// expired.
	pub fn status_at(&self, instant: OffsetDateTime) -> TokenStatus {
		match self.expires_at {
			Some(expires_at) if instant >= expires_at => TokenStatus::Expired,
			_ => TokenStatus::Active,
		}
	}

	/// Returns `true` if the token has expired at the provided instant.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		matches!(self.status_at(instant), TokenStatus::Expired)
	}

	/// Returns `true` if the token is expired relative to the current clock.
	pub fn is_expired(&self) -> bool {
		self.is_expired_at(OffsetDateTime::now_utc())
	}

	pub(crate) fn into_revoked(self, revoked_at: OffsetDateTime) -> RevokedToken {
		RevokedToken { response: self.response, revoked_at }
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessToken")
			.field("response", &self.response)
			.field("created_at", &self.created_at)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}

/// Terminal state of a token whose refresh and access tokens were both revoked.
///
/// The raw response stays available for inspection, but nothing on this type can authorize
/// further requests.
#[derive(Clone, Debug, PartialEq)]
pub struct RevokedToken {
	response: TokenResponse,
	revoked_at: OffsetDateTime,
}
impl RevokedToken {
	/// Raw token endpoint response of the revoked token.
	pub fn response(&self) -> &TokenResponse {
		&self.response
	}

	/// Instant the revocation completed.
	pub fn revoked_at(&self) -> OffsetDateTime {
		self.revoked_at
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	use time::macros;
	// self
	use super::*;

	fn response(value: JsonValue) -> TokenResponse {
		serde_json::from_value(value).expect("Response fixture should be a JSON object.")
	}

	#[test]
	fn expires_in_is_normalized_against_creation_time() {
		let created = macros::datetime!(2025-01-01 00:00 UTC);
		let token = AccessToken::from_response_at(
			response(json!({ "access_token": "at", "expires_in": 3600 })),
			MissingExpiryPolicy::NeverExpires,
			created,
		)
		.expect("Token with expires_in should build.");

		assert_eq!(token.expires_at(), Some(macros::datetime!(2025-01-01 01:00 UTC)));
		assert!(!token.is_expired_at(created));
		assert!(!token.is_expired_at(macros::datetime!(2025-01-01 00:59:59 UTC)));
		assert!(token.is_expired_at(macros::datetime!(2025-01-01 01:00 UTC)));
	}

	#[test]
	fn expires_at_wins_over_expires_in() {
		let recreated_at = macros::datetime!(2025-01-02 00:00 UTC);
		let token = AccessToken::from_response_at(
			response(json!({
				"access_token": "at",
				"expires_in": 3600,
				"expires_at": "2025-01-01T01:00:00Z",
			})),
			MissingExpiryPolicy::NeverExpires,
			recreated_at,
		)
		.expect("Token with both expiry fields should build.");

		assert_eq!(token.expires_at(), Some(macros::datetime!(2025-01-01 01:00 UTC)));
		assert!(token.is_expired_at(recreated_at));
	}

	#[test]
	fn derived_expiry_survives_recreation_from_the_response() {
		let created = macros::datetime!(2025-01-01 00:00 UTC);
		let token = AccessToken::from_response_at(
			response(json!({ "access_token": "at", "expires_in": 3600 })),
			MissingExpiryPolicy::NeverExpires,
			created,
		)
		.expect("Token with expires_in should build.");

		assert_eq!(token.response().get_str("expires_at"), Some("2025-01-01T01:00:00Z"));

		let recreated = AccessToken::from_response_at(
			token.response().clone(),
			MissingExpiryPolicy::NeverExpires,
			macros::datetime!(2025-01-03 00:00 UTC),
		)
		.expect("Recreated token should build.");

		assert_eq!(recreated.expires_at(), token.expires_at());
		assert!(recreated.is_expired_at(macros::datetime!(2025-01-03 00:00 UTC)));
	}

	#[test]
	fn absolute_expiry_is_used_directly() {
		let token = AccessToken::from_response_at(
			response(json!({ "access_token": "at", "expires_at": "2025-06-01T12:00:00Z" })),
			MissingExpiryPolicy::NeverExpires,
			macros::datetime!(2025-01-01 00:00 UTC),
		)
		.expect("Token with expires_at should build.");

		assert_eq!(token.status_at(macros::datetime!(2025-06-01 11:00 UTC)), TokenStatus::Active);
		assert_eq!(token.status_at(macros::datetime!(2025-06-01 12:00 UTC)), TokenStatus::Expired);
	}

	#[test]
	fn missing_expiry_follows_policy() {
		let created = macros::datetime!(2025-01-01 00:00 UTC);
		let never = AccessToken::from_response_at(
			response(json!({ "access_token": "at" })),
			MissingExpiryPolicy::NeverExpires,
			created,
		)
		.expect("Token without expiry should build.");

		assert_eq!(never.expires_at(), None);
		assert!(!never.is_expired_at(macros::datetime!(2999-01-01 00:00 UTC)));

		let stale = AccessToken::from_response_at(
			response(json!({ "access_token": "at" })),
			MissingExpiryPolicy::AlwaysExpired,
			created,
		)
		.expect("Token without expiry should build.");

		assert!(stale.is_expired_at(created));
		assert!(stale.is_expired());
	}

	#[test]
	fn missing_access_token_is_rejected() {
		let err = AccessToken::from_response(
			response(json!({ "refresh_token": "rt", "expires_in": 60 })),
			MissingExpiryPolicy::NeverExpires,
		)
		.expect_err("Token without access_token should be rejected.");

		assert_eq!(err, ConstructionError::MissingAccessToken);
	}

	#[test]
	fn fresh_token_is_not_expired() {
		let token = AccessToken::from_response(
			response(json!({ "access_token": "at", "refresh_token": "rt", "expires_in": 3600 })),
			MissingExpiryPolicy::NeverExpires,
		)
		.expect("Token should build.");

		assert!(!token.is_expired());
		assert_eq!(token.access_token(), "at");
		assert_eq!(token.token(TokenTypeHint::RefreshToken), Some("rt"));
	}

	#[test]
	fn revoked_token_keeps_response() {
		let token = AccessToken::from_response(
			response(json!({ "access_token": "at" })),
			MissingExpiryPolicy::NeverExpires,
		)
		.expect("Token should build.");
		let at = macros::datetime!(2025-01-01 00:00 UTC);
		let revoked = token.clone().into_revoked(at);

		assert_eq!(revoked.revoked_at(), at);
		assert_eq!(revoked.response(), token.response());
	}
}
