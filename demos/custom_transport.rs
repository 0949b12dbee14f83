//! Demonstrates plugging a non-reqwest transport into the token manager.
//!
//! 1. Implement [`TokenHttpClient`] and hand out an [`AsyncHttpClient`] handle per request.
//! 2. Answer with raw [`HttpResponse`] values; status checks and decoding stay in the crate.
//! 3. Pass the transport to [`TokenManager::with_http_client`].

// std
use std::{future::Future, io::Error as IoError, pin::Pin};
// crates.io
use color_eyre::Result;
use url::Url;
// self
use oauth2_token_handler::{
	config::{BodyFormat, ClientCredentials, Config},
	http::TokenHttpClient,
	manager::{Grant, TokenManager},
	oauth2::{
		AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse,
		http::{StatusCode, header::AUTHORIZATION},
	},
	request::RequestParams,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let config = Config::builder(
		ClientCredentials::new("demo-client", "super-secret"),
		Url::parse("https://provider.example.com")?,
	)
	.body_format(BodyFormat::Json)
	.build()?;
	let manager = TokenManager::<CannedHttpClient>::with_http_client(config, CannedHttpClient);
	let token =
		manager.exchange(Grant::client_credentials(["reports.read"]), RequestParams::new()).await?;

	println!("Canned access token: {}.", token.access_token());
	println!("Expires at: {:?}.", token.expires_at());

	Ok(())
}

/// Answers every token request locally, the way a test double or an in-process gateway would.
struct CannedHttpClient;
impl TokenHttpClient for CannedHttpClient {
	type Handle = CannedHandle;
	type TransportError = IoError;

	fn handle(&self) -> Self::Handle {
		CannedHandle
	}
}

struct CannedHandle;
impl<'c> AsyncHttpClient<'c> for CannedHandle {
	type Error = HttpClientError<IoError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let authorized = request.headers().contains_key(AUTHORIZATION);

		Box::pin(async move {
			let body = if authorized {
				"{\"access_token\":\"canned-access\",\"expires_in\":600}"
			} else {
				"{\"error\":\"invalid_client\"}"
			};
			let mut response = HttpResponse::new(body.as_bytes().to_vec());

			if !authorized {
				*response.status_mut() = StatusCode::UNAUTHORIZED;
			}

			Ok(response)
		})
	}
}
