//! Grant front-ends that assemble the parameters for an initial token request.

// self
use crate::{_prelude::*, request::RequestParams, token::Secret};

/// OAuth 2.0 grant types understood by the token endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
	/// Authorization Code grant.
	AuthorizationCode,
	/// Client Credentials grant for app-only tokens.
	ClientCredentials,
	/// Resource Owner Password Credentials grant.
	Password,
	/// Refresh Token grant.
	RefreshToken,
}
impl GrantType {
	/// Returns the RFC 6749 identifier for the grant type.
	pub const fn as_str(self) -> &'static str {
		match self {
			GrantType::AuthorizationCode => "authorization_code",
			GrantType::ClientCredentials => "client_credentials",
			GrantType::Password => "password",
			GrantType::RefreshToken => "refresh_token",
		}
	}
}
impl Display for GrantType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Grant-specific inputs for [`TokenManager::exchange`](crate::manager::TokenManager::exchange).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Grant {
	/// Exchanges an authorization code returned to the redirect URI.
	AuthorizationCode {
		/// Code received on the redirect URI.
		code: String,
		/// Redirect URI used when the code was requested.
		redirect_uri: Option<String>,
		/// Space-delimited scope string.
		scope: Option<String>,
	},
	/// Requests an app-only token.
	ClientCredentials {
		/// Space-delimited scope string.
		scope: Option<String>,
	},
	/// Exchanges resource owner credentials.
	Password {
		/// Resource owner username.
		username: String,
		/// Resource owner password.
		password: Secret,
		/// Space-delimited scope string.
		scope: Option<String>,
	},
}
impl Grant {
	/// Authorization code grant without a scope.
	pub fn authorization_code(code: impl Into<String>, redirect_uri: impl Into<String>) -> Self {
		Self::AuthorizationCode {
			code: code.into(),
			redirect_uri: Some(redirect_uri.into()),
			scope: None,
		}
	}

	/// Client credentials grant for the provided scopes.
	pub fn client_credentials<I, S>(scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		Self::ClientCredentials { scope: join_scopes(scopes) }
	}

	/// Password grant without a scope.
	pub fn password(username: impl Into<String>, password: impl Into<Secret>) -> Self {
		Self::Password { username: username.into(), password: password.into(), scope: None }
	}

	/// Grant type sent as `grant_type`.
	pub fn grant_type(&self) -> GrantType {
		match self {
			Self::AuthorizationCode { .. } => GrantType::AuthorizationCode,
			Self::ClientCredentials { .. } => GrantType::ClientCredentials,
			Self::Password { .. } => GrantType::Password,
		}
	}

	/// Builds the request parameters, `grant_type` first.
	pub fn into_params(self) -> RequestParams {
		let grant_type = self.grant_type();
		let mut params = RequestParams::new().with("grant_type", grant_type.as_str());
		let scope = match self {
			Self::AuthorizationCode { code, redirect_uri, scope } => {
				params.insert("code", code);

				if let Some(redirect_uri) = redirect_uri {
					params.insert("redirect_uri", redirect_uri);
				}

				scope
			},
			Self::ClientCredentials { scope } => scope,
			Self::Password { username, password, scope } => {
				params.insert("username", username);
				params.insert("password", password.expose());

				scope
			},
		};

		if let Some(scope) = scope {
			params.insert("scope", scope);
		}

		params
	}
}

fn join_scopes<I, S>(scopes: I) -> Option<String>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let joined = scopes.into_iter().map(|s| s.as_ref().to_owned()).collect::<Vec<_>>().join(" ");

	if joined.is_empty() { None } else { Some(joined) }
}
