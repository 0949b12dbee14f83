//! Wire encodings for client credentials and request bodies.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
use url::form_urlencoded;
// self
use crate::{
	_prelude::*,
	config::{BodyFormat, CredentialEncoding},
	request::RequestParams,
};

/// Builds the token carried after `Basic ` in the `Authorization` header.
///
/// Each component is escaped per `encoding` before the two are joined with `:` and base64
/// encoded, so ids or secrets containing `:` survive the round trip.
pub fn basic_auth_token(id: &str, secret: &str, encoding: CredentialEncoding) -> String {
	let joined = match encoding {
		CredentialEncoding::FormUrlEncoded =>
			format!("{}:{}", form_escape(id), form_escape(secret)),
		CredentialEncoding::Raw => format!("{id}:{secret}"),
	};

	STANDARD.encode(joined)
}

/// Serializes `params` in insertion order as `application/x-www-form-urlencoded`.
pub fn form_body(params: &RequestParams) -> String {
	form_urlencoded::Serializer::new(String::new()).extend_pairs(params.iter()).finish()
}

/// Serializes `params` as a flat JSON object of strings.
pub fn json_body(params: &RequestParams) -> Result<Vec<u8>, serde_json::Error> {
	let object = params
		.iter()
		.map(|(key, value)| (key.to_owned(), JsonValue::String(value.to_owned())))
		.collect::<JsonObject>();

	serde_json::to_vec(&object)
}

/// Serializes `params` according to `format`.
pub fn encode_body(
	params: &RequestParams,
	format: BodyFormat,
) -> Result<Vec<u8>, serde_json::Error> {
	match format {
		BodyFormat::Form => Ok(form_body(params).into_bytes()),
		BodyFormat::Json => json_body(params),
	}
}

fn form_escape(value: &str) -> String {
	form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
