//! OAuth 2.0 client-side token handler: wire-correct token endpoint requests plus an immutable
//! access token lifecycle (expiry inspection, refresh, revocation).
//!
//! The crate is split the same way requests flow through it:
//!
//! - [`config`] validates client credentials and request options once, up front.
//! - [`request`] turns a path plus parameters into an authenticated POST and decodes the reply.
//! - [`manager`] wraps token endpoint responses in [`token::AccessToken`] values and derives new
//!   values from them via refresh, or retires them via revocation.
//! - [`http`] is the only seam towards an HTTP stack.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod config;
pub mod error;
pub mod ext;
pub mod http;
pub mod manager;
pub mod obs;
pub mod request;
pub mod token;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		config::{AuthorizationMethod, BodyFormat, ClientCredentials, Config},
		http::ReqwestHttpClient,
		manager::TokenManager,
	};

	/// Token manager type alias used by reqwest-backed integration tests.
	pub type ReqwestTestManager = TokenManager<ReqwestHttpClient>;

	/// Client identifier shared by integration test fixtures.
	pub const TEST_CLIENT_ID: &str = "client-id";
	/// Client secret shared by integration test fixtures.
	pub const TEST_CLIENT_SECRET: &str = "client-secret";

	/// Builds a validated [`Config`] pointing at `token_host` with the fixture credentials.
	pub fn test_config(
		token_host: &str,
		method: AuthorizationMethod,
		format: BodyFormat,
	) -> Config {
		let host = Url::parse(token_host).expect("Failed to parse test token host.");

		Config::builder(ClientCredentials::new(TEST_CLIENT_ID, TEST_CLIENT_SECRET), host)
			.authorization_method(method)
			.body_format(format)
			.build()
			.expect("Failed to build test configuration.")
	}

	/// Constructs a [`TokenManager`] backed by the default reqwest transport.
	pub fn build_reqwest_test_manager(
		token_host: &str,
		method: AuthorizationMethod,
		format: BodyFormat,
	) -> ReqwestTestManager {
		TokenManager::new(test_config(token_host, method, format))
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::{Map as JsonMap, Value as JsonValue};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};

	/// Decoded JSON object returned by the authorization server.
	pub type JsonObject = JsonMap<String, JsonValue>;
}

pub use _prelude::JsonObject;
pub use oauth2;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
