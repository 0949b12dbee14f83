// self
use crate::{_prelude::*, token::Secret};

/// Registered client identity; immutable for the process lifetime.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientCredentials {
	/// Client identifier.
	pub id: String,
	/// Client secret; redacted from formatting output.
	pub secret: Secret,
	/// Parameter name carrying the id under body authentication.
	#[serde(default = "ClientCredentials::default_id_param_name")]
	pub id_param_name: String,
	/// Parameter name carrying the secret under body authentication.
	#[serde(default = "ClientCredentials::default_secret_param_name")]
	pub secret_param_name: String,
}
impl ClientCredentials {
	/// Default parameter name for the client identifier.
	pub const DEFAULT_ID_PARAM_NAME: &str = "client_id";
	/// Default parameter name for the client secret.
	pub const DEFAULT_SECRET_PARAM_NAME: &str = "client_secret";

	/// Creates credentials using the standard `client_id`/`client_secret` parameter names.
	pub fn new(id: impl Into<String>, secret: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			secret: Secret::new(secret),
			id_param_name: Self::default_id_param_name(),
			secret_param_name: Self::default_secret_param_name(),
		}
	}

	/// Overrides the parameter names used under body authentication.
	pub fn with_param_names(
		mut self,
		id_param_name: impl Into<String>,
		secret_param_name: impl Into<String>,
	) -> Self {
		self.id_param_name = id_param_name.into();
		self.secret_param_name = secret_param_name.into();

		self
	}

	/// Returns true when `name` is one of the credential parameter names.
	pub fn is_credential_param(&self, name: &str) -> bool {
		name == self.id_param_name || name == self.secret_param_name
	}

	fn default_id_param_name() -> String {
		Self::DEFAULT_ID_PARAM_NAME.into()
	}

	fn default_secret_param_name() -> String {
		Self::DEFAULT_SECRET_PARAM_NAME.into()
	}
}
impl Debug for ClientCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientCredentials")
			.field("id", &self.id)
			.field("secret", &self.secret)
			.field("id_param_name", &self.id_param_name)
			.field("secret_param_name", &self.secret_param_name)
			.finish()
	}
}
