//! Walks one token through its lifecycle against a mock authorization server: exchange, expiry
//! inspection, refresh, and full revocation.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use url::Url;
// self
use oauth2_token_handler::{
	config::{AuthorizationMethod, ClientCredentials, Config},
	manager::{Grant, TokenManager},
	request::RequestParams,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let issue_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token").body_includes("grant_type=password");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"a1\",\"refresh_token\":\"r1\",\"expires_in\":1}");
		})
		.await;
	let refresh_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token").body_includes("grant_type=refresh_token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"demo-access-2\",\"expires_in\":3600}");
		})
		.await;
	let revoke_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/revoke");
			then.status(200);
		})
		.await;
	let config = Config::builder(
		ClientCredentials::new("demo-client", "super-secret"),
		Url::parse(&server.base_url())?,
	)
	.authorization_method(AuthorizationMethod::Body)
	.build()?;
	let manager = TokenManager::new(config);
	let token =
		manager.exchange(Grant::password("alice", "wonderland"), RequestParams::new()).await?;

	println!("Issued {} expiring at {:?}.", token.access_token(), token.expires_at());

	tokio::time::sleep(std::time::Duration::from_millis(1100)).await;

	let token = if token.is_expired() {
		manager.refresh(&token, RequestParams::new()).await?
	} else {
		token
	};

	println!("Using {} (refresh token {:?}).", token.access_token(), token.refresh_token());

	let revoked = manager.revoke_all(token).await?;

	println!("Revoked at {}.", revoked.revoked_at());

	issue_mock.assert_async().await;
	refresh_mock.assert_async().await;
	revoke_mock.assert_calls_async(2).await;

	Ok(())
}
