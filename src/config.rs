//! Process-wide client configuration: credentials plus request options.
//!
//! A [`Config`] is validated once, either through [`Config::builder`] or
//! [`Config::from_json`], and then shared read-only by every request.

/// Builder API and validation rules for [`Config`].
pub mod builder;
/// Registered client identity.
pub mod credentials;

pub use builder::*;
pub use credentials::*;

// self
use crate::{_prelude::*, error::ConfigError};

/// Where client credentials travel on token endpoint calls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationMethod {
	#[default]
	/// `Authorization: Basic` header built from the encoded id and secret.
	Header,
	/// Id and secret appended to the request parameters.
	Body,
}
impl AuthorizationMethod {
	/// Returns the configuration label.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Header => "header",
			Self::Body => "body",
		}
	}
}
impl Display for AuthorizationMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for AuthorizationMethod {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"header" => Ok(Self::Header),
			"body" => Ok(Self::Body),
			other => Err(ConfigError::UnknownAuthorizationMethod { value: other.to_owned() }),
		}
	}
}

/// Request body serialization.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyFormat {
	#[default]
	/// `application/x-www-form-urlencoded`.
	Form,
	/// `application/json`.
	Json,
}
impl BodyFormat {
	/// Returns the configuration label.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Form => "form",
			Self::Json => "json",
		}
	}

	/// Returns the `Content-Type` value for the format.
	pub const fn content_type(self) -> &'static str {
		match self {
			Self::Form => "application/x-www-form-urlencoded",
			Self::Json => "application/json",
		}
	}
}
impl Display for BodyFormat {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for BodyFormat {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"form" => Ok(Self::Form),
			"json" => Ok(Self::Json),
			other => Err(ConfigError::UnknownBodyFormat { value: other.to_owned() }),
		}
	}
}

/// How the id and secret are escaped before being joined for the Basic header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialEncoding {
	#[default]
	/// `application/x-www-form-urlencoded` escaping of each component (RFC 6749 section 2.3.1).
	FormUrlEncoded,
	/// Components are joined verbatim.
	Raw,
}

/// Expiry policy for token responses carrying neither `expires_in` nor `expires_at`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingExpiryPolicy {
	#[default]
	/// The token never reports itself as expired.
	NeverExpires,
	/// The token is stale from the instant it is created.
	AlwaysExpired,
}

/// Request options shared by every call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOptions {
	/// Authorization server origin; endpoint paths are appended to it.
	pub token_host: Url,
	/// Path of the token endpoint.
	pub token_path: String,
	/// Path of the revocation endpoint.
	pub revoke_path: String,
	/// Credential placement.
	pub authorization_method: AuthorizationMethod,
	/// Body serialization.
	pub body_format: BodyFormat,
	/// Basic header component escaping.
	pub credential_encoding: CredentialEncoding,
	/// Expiry policy for responses without expiry fields.
	pub missing_expiry: MissingExpiryPolicy,
}
impl RequestOptions {
	/// Default token endpoint path.
	pub const DEFAULT_TOKEN_PATH: &str = "/oauth/token";
	/// Default revocation endpoint path.
	pub const DEFAULT_REVOKE_PATH: &str = "/oauth/revoke";

	/// Joins the token host with a server-relative `path`.
	pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
		let url = format!("{}{path}", self.token_host.as_str().trim_end_matches('/'));

		Url::parse(&url).map_err(|source| ConfigError::InvalidEndpoint { url, source })
	}
}

/// Validated, immutable client configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
	credentials: ClientCredentials,
	options: RequestOptions,
}
impl Config {
	/// Creates a new builder for the provided credentials and token host.
	pub fn builder(credentials: ClientCredentials, token_host: Url) -> ConfigBuilder {
		ConfigBuilder::new(credentials, token_host)
	}

	/// Decodes and validates a JSON configuration document.
	///
	/// ```
	/// use oauth2_token_handler::config::{AuthorizationMethod, Config};
	///
	/// let config = Config::from_json(
	/// 	r#"{
	/// 		"client": { "id": "client-id", "secret": "client-secret" },
	/// 		"auth": { "token_host": "https://example.org" },
	/// 		"options": { "authorization_method": "body" }
	/// 	}"#,
	/// )
	/// .unwrap();
	///
	/// assert_eq!(config.options().authorization_method, AuthorizationMethod::Body);
	/// ```
	pub fn from_json(document: &str) -> Result<Self, ConfigError> {
		let mut de = serde_json::Deserializer::from_str(document);
		let document: ConfigDocument = serde_path_to_error::deserialize(&mut de)
			.map_err(|source| ConfigError::Parse { source })?;

		document.into_builder().build()
	}

	/// Registered client identity.
	pub fn credentials(&self) -> &ClientCredentials {
		&self.credentials
	}

	/// Request options.
	pub fn options(&self) -> &RequestOptions {
		&self.options
	}
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigDocument {
	client: ClientCredentials,
	auth: AuthSection,
	#[serde(default)]
	options: OptionsSection,
}
impl ConfigDocument {
	fn into_builder(self) -> ConfigBuilder {
		let mut builder = Config::builder(self.client, self.auth.token_host)
			.authorization_method(self.options.authorization_method)
			.body_format(self.options.body_format)
			.credential_encoding(self.options.credential_encoding)
			.missing_expiry(self.options.missing_expiry);

		if let Some(path) = self.auth.token_path {
			builder = builder.token_path(path);
		}
		if let Some(path) = self.auth.revoke_path {
			builder = builder.revoke_path(path);
		}

		builder
	}
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct AuthSection {
	token_host: Url,
	token_path: Option<String>,
	revoke_path: Option<String>,
}

#[derive(Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct OptionsSection {
	authorization_method: AuthorizationMethod,
	body_format: BodyFormat,
	credential_encoding: CredentialEncoding,
	missing_expiry: MissingExpiryPolicy,
}
