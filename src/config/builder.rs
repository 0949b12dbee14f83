// self
use crate::{
	_prelude::*,
	config::{
		AuthorizationMethod, BodyFormat, ClientCredentials, Config, CredentialEncoding,
		MissingExpiryPolicy, RequestOptions,
	},
	error::ConfigError,
};

/// Builder for [`Config`] values.
#[derive(Debug)]
pub struct ConfigBuilder {
	/// Registered client identity.
	pub credentials: ClientCredentials,
	/// Authorization server origin.
	pub token_host: Url,
	/// Token endpoint path.
	pub token_path: String,
	/// Revocation endpoint path.
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
impl ConfigBuilder {
	/// Creates a new builder seeded with the credentials and token host.
	pub fn new(credentials: ClientCredentials, token_host: Url) -> Self {
		Self {
			credentials,
			token_host,
			token_path: RequestOptions::DEFAULT_TOKEN_PATH.into(),
			revoke_path: RequestOptions::DEFAULT_REVOKE_PATH.into(),
			authorization_method: AuthorizationMethod::default(),
			body_format: BodyFormat::default(),
			credential_encoding: CredentialEncoding::default(),
			missing_expiry: MissingExpiryPolicy::default(),
		}
	}

	/// Sets the token endpoint path.
	pub fn token_path(mut self, path: impl Into<String>) -> Self {
		self.token_path = path.into();

		self
	}

	/// Sets the revocation endpoint path.
	pub fn revoke_path(mut self, path: impl Into<String>) -> Self {
		self.revoke_path = path.into();

		self
	}

	/// Selects header or body client authentication.
	pub fn authorization_method(mut self, method: AuthorizationMethod) -> Self {
		self.authorization_method = method;

		self
	}

	/// Selects form or JSON request bodies.
	pub fn body_format(mut self, format: BodyFormat) -> Self {
		self.body_format = format;

		self
	}

	/// Selects how Basic header components are escaped.
	pub fn credential_encoding(mut self, encoding: CredentialEncoding) -> Self {
		self.credential_encoding = encoding;

		self
	}

	/// Selects the expiry policy for responses without expiry fields.
	pub fn missing_expiry(mut self, policy: MissingExpiryPolicy) -> Self {
		self.missing_expiry = policy;

		self
	}

	/// Validates the collected settings and produces a [`Config`].
	pub fn build(self) -> Result<Config, ConfigError> {
		self.validate()?;

		let options = RequestOptions {
			token_host: self.token_host,
			token_path: self.token_path,
			revoke_path: self.revoke_path,
			authorization_method: self.authorization_method,
			body_format: self.body_format,
			credential_encoding: self.credential_encoding,
			missing_expiry: self.missing_expiry,
		};

		options.endpoint(&options.token_path)?;
		options.endpoint(&options.revoke_path)?;

		Ok(Config { credentials: self.credentials, options })
	}

	fn validate(&self) -> Result<(), ConfigError> {
		validate_token_host(&self.token_host)?;
		validate_path("token", &self.token_path)?;
		validate_path("revoke", &self.revoke_path)?;

		let credentials = &self.credentials;

		if credentials.id_param_name.is_empty() {
			return Err(ConfigError::InvalidParamName { which: "client id" });
		}
		if credentials.secret_param_name.is_empty() {
			return Err(ConfigError::InvalidParamName { which: "client secret" });
		}
		if credentials.id_param_name == credentials.secret_param_name {
			return Err(ConfigError::DuplicateParamName {
				name: credentials.id_param_name.clone(),
			});
		}

		Ok(())
	}
}

fn validate_token_host(url: &Url) -> Result<(), ConfigError> {
	let valid = matches!(url.scheme(), "http" | "https")
		&& url.has_host()
		&& url.query().is_none()
		&& url.fragment().is_none();

	if valid { Ok(()) } else { Err(ConfigError::InvalidTokenHost { url: url.to_string() }) }
}

fn validate_path(endpoint: &'static str, path: &str) -> Result<(), ConfigError> {
	if path.starts_with('/') {
		Ok(())
	} else {
		Err(ConfigError::InvalidPath { endpoint, path: path.to_owned() })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn builder(host: &str) -> ConfigBuilder {
		Config::builder(
			ClientCredentials::new("client-id", "client-secret"),
			Url::parse(host).expect("Host fixture should parse."),
		)
	}

	#[test]
	fn rejects_non_http_token_hosts() {
		let err = builder("ftp://example.org")
			.build()
			.expect_err("Non-HTTP token hosts should be rejected.");

		assert!(matches!(err, ConfigError::InvalidTokenHost { .. }));

		let err = builder("https://example.org/?tenant=a")
			.build()
			.expect_err("Token hosts with a query should be rejected.");

		assert!(matches!(err, ConfigError::InvalidTokenHost { .. }));
	}

	#[test]
	fn rejects_relative_paths() {
		let err = builder("https://example.org")
			.revoke_path("oauth/revoke")
			.build()
			.expect_err("Relative revoke path should be rejected.");

		assert!(matches!(err, ConfigError::InvalidPath { endpoint: "revoke", .. }));
	}

	#[test]
	fn rejects_colliding_param_names() {
		let err = Config::builder(
			ClientCredentials::new("id", "secret").with_param_names("client", "client"),
			Url::parse("https://example.org").expect("Host fixture should parse."),
		)
		.build()
		.expect_err("Colliding parameter names should be rejected.");

		assert!(matches!(err, ConfigError::DuplicateParamName { name } if name == "client"));
	}

	#[test]
	fn host_with_base_path_keeps_prefix() {
		let config = builder("https://example.org/tenant-a/")
			.build()
			.expect("Host with a base path should validate.");
		let url = config
			.options()
			.endpoint(&config.options().token_path)
			.expect("Token endpoint should join cleanly.");

		assert_eq!(url.as_str(), "https://example.org/tenant-a/oauth/token");
	}
}
