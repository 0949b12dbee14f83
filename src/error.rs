//! Error types shared by configuration, token construction, and token endpoint requests.

// self
use crate::{_prelude::*, token::TokenTypeHint};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Token response lacks data needed to build or use a token.
	#[error(transparent)]
	Construction(#[from] ConstructionError),
	/// Outbound call to the authorization server failed.
	#[error("Request to the authorization server failed.")]
	Request(
		#[from]
		#[source]
		RequestError,
	),
	/// One or both steps of a full revocation failed.
	#[error(transparent)]
	RevokeAll(#[from] RevokeAllError),
}
impl Error {
	/// Returns the underlying [`RequestError`] when the failure came from an outbound call.
	pub fn as_request_error(&self) -> Option<&RequestError> {
		match self {
			Self::Request(e) => Some(e),
			_ => None,
		}
	}
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Token host is not an absolute HTTP(S) origin.
	#[error("Token host must be an absolute http(s) URL without query or fragment: {url}.")]
	InvalidTokenHost {
		/// Rejected host URL.
		url: String,
	},
	/// Endpoint path is not server-relative.
	#[error("The {endpoint} path must start with `/`: {path}.")]
	InvalidPath {
		/// Which path failed validation.
		endpoint: &'static str,
		/// Rejected path.
		path: String,
	},
	/// Client credential parameter name is empty.
	#[error("The {which} parameter name must not be empty.")]
	InvalidParamName {
		/// Which parameter name failed validation.
		which: &'static str,
	},
	/// Client id and secret parameter names collide.
	#[error("Client id and secret parameter names must differ, both are `{name}`.")]
	DuplicateParamName {
		/// Colliding parameter name.
		name: String,
	},
	/// Authorization method label is not recognized.
	#[error("Unknown authorization method `{value}`, expected `header` or `body`.")]
	UnknownAuthorizationMethod {
		/// Rejected label.
		value: String,
	},
	/// Body format label is not recognized.
	#[error("Unknown body format `{value}`, expected `json` or `form`.")]
	UnknownBodyFormat {
		/// Rejected label.
		value: String,
	},
	/// JSON configuration document could not be decoded.
	#[error("Configuration document is invalid.")]
	Parse {
		/// Structured parsing failure including the offending path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Joining the token host with an endpoint path produced an invalid URL.
	#[error("Endpoint URL `{url}` is invalid.")]
	InvalidEndpoint {
		/// Joined URL that failed to parse.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Caller-supplied parameters attempted to override a protocol-critical field.
	#[error("Parameter `{name}` is reserved and cannot be overridden.")]
	ReservedParameter {
		/// Reserved parameter name.
		name: String,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	RequestBuild(#[from] oauth2::http::Error),
	/// JSON request body could not be serialized.
	#[error("Request body could not be serialized to JSON.")]
	BodySerialize(#[source] serde_json::Error),
}

/// Failures raised while turning a token response into an [`AccessToken`](crate::token::AccessToken).
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum ConstructionError {
	/// Response lacks a string `access_token`.
	#[error("Token response is missing a string access_token.")]
	MissingAccessToken,
	/// Response carries an `expires_in` that is not a whole number of seconds.
	#[error("Token response carries an invalid expires_in value: {value}.")]
	InvalidExpiresIn {
		/// Offending raw value.
		value: String,
	},
	/// Response carries an `expires_at` that is neither RFC 3339 nor a Unix timestamp.
	#[error("Token response carries an invalid expires_at value: {value}.")]
	InvalidExpiresAt {
		/// Offending raw value.
		value: String,
	},
	/// The token lacks the value needed for the requested operation.
	#[error("Token response does not carry a {hint}.")]
	MissingToken {
		/// Token kind that was required.
		hint: TokenTypeHint,
	},
	/// Token endpoint answered a grant request without a body.
	#[error("Token endpoint returned an empty body.")]
	EmptyResponse,
}

/// Outbound call failures. No retries are attempted by the crate.
#[derive(Debug, ThisError)]
pub enum RequestError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the authorization server.")]
	Transport {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the authorization server.")]
	Io(#[from] std::io::Error),
	/// Authorization server answered with a non-success status.
	#[error("Authorization server responded with HTTP {status}{}.", describe_oauth_error(.oauth_error.as_deref(), .error_description.as_deref()))]
	Status {
		/// HTTP status code.
		status: u16,
		/// Preview of the response body.
		body: Option<String>,
		/// OAuth `error` field, when the body is a JSON error object.
		oauth_error: Option<String>,
		/// OAuth `error_description` field, when present.
		error_description: Option<String>,
	},
	/// Response body is not a JSON object.
	#[error("Authorization server returned a body that is not a JSON object.")]
	Decode {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
}
impl RequestError {
	/// Wraps a transport-specific network error.
	pub fn transport(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Transport { source: Box::new(src) }
	}

	/// Returns the HTTP status code, when the server produced a response.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Status { status, .. } | Self::Decode { status, .. } => Some(*status),
			Self::Transport { .. } | Self::Io(_) => None,
		}
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for RequestError {
	fn from(e: ReqwestError) -> Self {
		Self::transport(e)
	}
}

/// Failures collected by [`TokenManager::revoke_all`](crate::manager::TokenManager::revoke_all).
///
/// Both revocation steps are always attempted, so either or both fields may be populated.
#[derive(Debug)]
pub struct RevokeAllError {
	/// Failure while revoking the refresh token.
	pub refresh_token: Option<Box<Error>>,
	/// Failure while revoking the access token.
	pub access_token: Option<Box<Error>>,
}
impl RevokeAllError {
	/// Lists the steps that failed, in the order they were attempted.
	pub fn failed_steps(&self) -> Vec<TokenTypeHint> {
		let mut steps = Vec::with_capacity(2);

		if self.refresh_token.is_some() {
			steps.push(TokenTypeHint::RefreshToken);
		}
		if self.access_token.is_some() {
			steps.push(TokenTypeHint::AccessToken);
		}

		steps
	}
}
impl Display for RevokeAllError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let steps = self.failed_steps().iter().map(|hint| hint.as_str()).collect::<Vec<_>>();

		write!(f, "Token revocation failed for: {}.", steps.join(", "))
	}
}
impl StdError for RevokeAllError {
	fn source(&self) -> Option<&(dyn StdError + 'static)> {
		self.refresh_token
			.as_deref()
			.or(self.access_token.as_deref())
			.map(|e| e as &(dyn StdError + 'static))
	}
}

fn describe_oauth_error(error: Option<&str>, description: Option<&str>) -> String {
	match (error, description) {
		(Some(error), Some(description)) => format!(" ({error}: {description})"),
		(Some(error), None) => format!(" ({error})"),
		(None, Some(description)) => format!(" ({description})"),
		(None, None) => String::new(),
	}
}
