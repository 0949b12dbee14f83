//! Token Lifecycle Manager.
//!
//! [`TokenManager`] wraps token endpoint responses in immutable [`AccessToken`] values. Refresh
//! derives a new value and leaves the original untouched; revocation retires values on the
//! server. Every network call goes through [`Requester`] and is observed under an
//! [`OperationKind`] label.

pub mod grant;

pub use grant::*;

// self
use crate::{
	_prelude::*,
	config::Config,
	error::{ConstructionError, RevokeAllError},
	http::TokenHttpClient,
	obs::{self, OperationCounters, OperationKind, OperationOutcome, OperationSpan},
	request::{RequestParams, Requester},
	token::{AccessToken, RevokedToken, TokenResponse, TokenTypeHint},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Token manager specialized for the crate's default reqwest transport.
pub type ReqwestTokenManager = TokenManager<ReqwestHttpClient>;

/// Creates, refreshes and revokes access tokens for one client configuration.
///
/// Clones share the configuration, the transport and the [`OperationCounters`].
pub struct TokenManager<C>
where
	C: ?Sized + TokenHttpClient,
{
	requester: Requester<C>,
	counters: Arc<OperationCounters>,
}
impl<C> TokenManager<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// Creates a manager that reuses the caller-provided transport.
	pub fn with_http_client(
		config: impl Into<Arc<Config>>,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self {
			requester: Requester::new(config, http_client),
			counters: Arc::new(OperationCounters::default()),
		}
	}

	/// Configuration shared with the underlying [`Requester`].
	pub fn config(&self) -> &Config {
		self.requester.config()
	}

	/// Request builder used for every call.
	pub fn requester(&self) -> &Requester<C> {
		&self.requester
	}

	/// Outcome counters for every operation issued through this manager or its clones.
	pub fn counters(&self) -> &OperationCounters {
		&self.counters
	}

	/// Wraps a token endpoint response created now.
	pub fn create(&self, response: impl Into<TokenResponse>) -> Result<AccessToken> {
		self.create_at(response, OffsetDateTime::now_utc())
	}

	/// Wraps a token endpoint response as if it had been created at `created_at`.
	pub fn create_at(
		&self,
		response: impl Into<TokenResponse>,
		created_at: OffsetDateTime,
	) -> Result<AccessToken> {
		let policy = self.config().options().missing_expiry;

		Ok(AccessToken::from_response_at(response.into(), policy, created_at)?)
	}

	/// Requests an initial token using `grant`, appending `extra` after the grant parameters.
	pub async fn exchange(&self, grant: Grant, extra: RequestParams) -> Result<AccessToken> {
		let stage = grant.grant_type().as_str();

		obs::observe(&self.counters, OperationKind::Exchange, stage, async move {
			let mut params = grant.into_params();
			let credentials = self.config().credentials();

			params.extend_unreserved(extra, |key| credentials.is_credential_param(key))?;

			let path = &self.config().options().token_path;
			let response = self
				.requester
				.request(path, params)
				.await?
				.ok_or(ConstructionError::EmptyResponse)?;

			self.create(response)
		})
		.await
	}

	/// Exchanges the stored refresh token for a new [`AccessToken`].
	///
	/// The request carries `grant_type=refresh_token` and the stored refresh token, followed by
	/// `extra` in caller order. `extra` may not override either of those fields or the client
	/// credential parameters. When the server omits `refresh_token` from its reply the previous
	/// one is carried over. `token` itself is never modified.
	pub async fn refresh(&self, token: &AccessToken, extra: RequestParams) -> Result<AccessToken> {
		obs::observe(
			&self.counters,
			OperationKind::Refresh,
			"refresh",
			self.refresh_inner(token, extra),
		)
		.await
	}

	/// Revokes the access or refresh token held by `token`.
	///
	/// Resolves once the server answers with a 2xx status; the response body is ignored.
	pub async fn revoke(&self, token: &AccessToken, hint: TokenTypeHint) -> Result<()> {
		obs::observe(&self.counters, OperationKind::Revoke, hint.as_str(), async move {
			let value = token.token(hint).ok_or(ConstructionError::MissingToken { hint })?;
			let params = RequestParams::new()
				.with("token", value)
				.with("token_type_hint", hint.as_str());
			let path = &self.config().options().revoke_path;

			self.requester.request(path, params).await.map(|_| ())
		})
		.await
	}

	/// Revokes the refresh token (when present) and then the access token.
	///
	/// Both steps are always attempted. On success the token is consumed and returned as a
	/// [`RevokedToken`]; otherwise [`RevokeAllError`] reports every step that failed.
	pub async fn revoke_all(&self, token: AccessToken) -> Result<RevokedToken> {
		let span = OperationSpan::new(OperationKind::Revoke, "revoke_all");
		let (refresh_token, access_token) = span
			.run(async {
				let refresh_token = match token.refresh_token() {
					Some(_) => self.revoke(&token, TokenTypeHint::RefreshToken).await.err(),
					None => None,
				};
				let access_token = self.revoke(&token, TokenTypeHint::AccessToken).await.err();

				(refresh_token, access_token)
			})
			.await;

		if refresh_token.is_none() && access_token.is_none() {
			span.record_outcome(OperationOutcome::Success);

			return Ok(token.into_revoked(OffsetDateTime::now_utc()));
		}

		span.record_outcome(OperationOutcome::Failure);

		#[cfg(feature = "tracing")]
		tracing::warn!(
			refresh_failed = refresh_token.is_some(),
			access_failed = access_token.is_some(),
			"Token revocation incomplete."
		);

		Err(RevokeAllError {
			refresh_token: refresh_token.map(Box::new),
			access_token: access_token.map(Box::new),
		}
		.into())
	}

	async fn refresh_inner(
		&self,
		token: &AccessToken,
		extra: RequestParams,
	) -> Result<AccessToken> {
		let hint = TokenTypeHint::RefreshToken;
		let refresh_token = token.refresh_token().ok_or(ConstructionError::MissingToken { hint })?;
		let credentials = self.config().credentials();
		let mut params = RequestParams::new()
			.with("grant_type", GrantType::RefreshToken.as_str())
			.with("refresh_token", refresh_token);

		params.extend_unreserved(extra, |key| credentials.is_credential_param(key))?;

		let path = &self.config().options().token_path;
		let response = self
			.requester
			.request(path, params)
			.await?
			.ok_or(ConstructionError::EmptyResponse)?;

		self.create(TokenResponse::from(response).with_default("refresh_token", refresh_token))
	}
}
#[cfg(feature = "reqwest")]
impl TokenManager<ReqwestHttpClient> {
	/// Creates a manager backed by a default reqwest client.
	pub fn new(config: impl Into<Arc<Config>>) -> Self {
		Self::with_http_client(config, ReqwestHttpClient::default())
	}
}
impl<C> Clone for TokenManager<C>
where
	C: ?Sized + TokenHttpClient,
{
	fn clone(&self) -> Self {
		Self { requester: self.requester.clone(), counters: self.counters.clone() }
	}
}
impl<C> Debug for TokenManager<C>
where
	C: ?Sized + TokenHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenManager")
			.field("requester", &self.requester)
			.field("counters", &self.counters)
			.finish()
	}
}
