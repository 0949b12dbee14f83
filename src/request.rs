//! Request Builder: turns a server-relative path plus parameters into an authenticated POST
//! against the authorization server and decodes the reply.
//!
//! Client authentication and body encoding come from [`Config`]. Header authentication leaves
//! the parameters untouched and adds `Authorization: Basic`; body authentication appends the
//! id and secret under the configured parameter names. Exactly one POST is issued per call and
//! failures are never retried.

pub mod encoding;
pub mod params;

pub use params::*;

// crates.io
use oauth2::{
	AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse,
	http::{
		Method, Request,
		header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
	},
};
// self
use crate::{
	_prelude::*,
	config::{AuthorizationMethod, Config},
	error::{ConfigError, RequestError},
	http::TokenHttpClient,
};

const BODY_PREVIEW_LIMIT: usize = 256;

/// Builds and dispatches token endpoint requests for one client configuration.
pub struct Requester<C>
where
	C: ?Sized + TokenHttpClient,
{
	config: Arc<Config>,
	http_client: Arc<C>,
}
impl<C> Requester<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// Creates a requester sharing the provided configuration and transport.
	pub fn new(config: impl Into<Arc<Config>>, http_client: impl Into<Arc<C>>) -> Self {
		Self { config: config.into(), http_client: http_client.into() }
	}

	/// Configuration used for every request.
	pub fn config(&self) -> &Config {
		&self.config
	}

	/// Builds the HTTP request for `path` without sending it.
	pub fn build_request(&self, path: &str, mut params: RequestParams) -> Result<HttpRequest> {
		let options = self.config.options();
		let credentials = self.config.credentials();
		let url = options.endpoint(path)?;
		let mut builder = Request::builder()
			.method(Method::POST)
			.uri(url.as_str())
			.header(ACCEPT, "application/json")
			.header(CONTENT_TYPE, options.body_format.content_type());

		match options.authorization_method {
			AuthorizationMethod::Header => {
				#[cfg(feature = "tracing")]
				tracing::debug!("Using header authentication.");

				let token = encoding::basic_auth_token(
					&credentials.id,
					credentials.secret.expose(),
					options.credential_encoding,
				);

				builder = builder.header(AUTHORIZATION, format!("Basic {token}"));
			},
			AuthorizationMethod::Body => {
				#[cfg(feature = "tracing")]
				tracing::debug!(
					id_param = %credentials.id_param_name,
					secret_param = %credentials.secret_param_name,
					"Using body authentication."
				);

				params.insert(&credentials.id_param_name, &credentials.id);
				params.insert(&credentials.secret_param_name, credentials.secret.expose());
			},
		}

		#[cfg(feature = "tracing")]
		tracing::debug!(
			url = %url,
			format = options.body_format.as_str(),
			params = ?params.keys().collect::<Vec<_>>(),
			"Creating request."
		);

		let body = encoding::encode_body(&params, options.body_format)
			.map_err(ConfigError::BodySerialize)?;

		builder.body(body).map_err(|e| ConfigError::from(e).into())
	}

	/// POSTs `params` to `token_host + path` and returns the decoded body.
	///
	/// Empty bodies (as returned by revocation endpoints) decode to `None`.
	pub async fn request(&self, path: &str, params: RequestParams) -> Result<Option<JsonObject>> {
		let request = self.build_request(path, params)?;
		let handle = self.http_client.handle();
		let response = handle.call(request).await.map_err(map_transport_error)?;

		Ok(decode_response(response)?)
	}
}
impl<C> Clone for Requester<C>
where
	C: ?Sized + TokenHttpClient,
{
	fn clone(&self) -> Self {
		Self { config: self.config.clone(), http_client: self.http_client.clone() }
	}
}
impl<C> Debug for Requester<C>
where
	C: ?Sized + TokenHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Requester").field("config", &self.config).finish()
	}
}

/// Classifies a raw response: non-2xx becomes [`RequestError::Status`], empty bodies become
/// `None`, and anything else must be a JSON object.
pub fn decode_response(response: HttpResponse) -> Result<Option<JsonObject>, RequestError> {
	let status = response.status();
	let body = response.body();

	if !status.is_success() {
		return Err(status_error(status.as_u16(), body));
	}
	if body.iter().all(u8::is_ascii_whitespace) {
		return Ok(None);
	}

	let mut de = serde_json::Deserializer::from_slice(body);
	let object = serde_path_to_error::deserialize(&mut de)
		.map_err(|source| RequestError::Decode { source, status: status.as_u16() })?;

	Ok(Some(object))
}

fn status_error(status: u16, body: &[u8]) -> RequestError {
	let parsed = serde_json::from_slice::<JsonObject>(body).ok();
	let field = |key: &str| {
		parsed
			.as_ref()
			.and_then(|object| object.get(key))
			.and_then(JsonValue::as_str)
			.map(str::to_owned)
	};
	let preview = if body.is_empty() {
		None
	} else {
		Some(String::from_utf8_lossy(body).chars().take(BODY_PREVIEW_LIMIT).collect())
	};

	RequestError::Status {
		status,
		body: preview,
		oauth_error: field("error"),
		error_description: field("error_description"),
	}
}

fn map_transport_error<E>(err: HttpClientError<E>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		HttpClientError::Reqwest(inner) => RequestError::transport(*inner).into(),
		HttpClientError::Http(inner) => ConfigError::from(inner).into(),
		HttpClientError::Io(inner) => RequestError::Io(inner).into(),
		HttpClientError::Other(message) => RequestError::Transport {
			source: format!("HTTP client error occurred: {message}.").into(),
		}
		.into(),
		_ => RequestError::Transport { source: "Unknown HTTP client error.".into() }.into(),
	}
}
