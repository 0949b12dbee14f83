//! Token endpoint responses and the immutable access token values derived from them.

pub mod access;
pub mod response;
pub mod secret;

pub use access::*;
pub use response::*;
pub use secret::*;

// self
use crate::_prelude::*;

/// Token kinds accepted by the revocation endpoint (RFC 7009 section 2.1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenTypeHint {
	/// The access token.
	AccessToken,
	/// The refresh token.
	RefreshToken,
}
impl TokenTypeHint {
	/// Returns the wire label, which doubles as the response field name.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::AccessToken => "access_token",
			Self::RefreshToken => "refresh_token",
		}
	}
}
impl Display for TokenTypeHint {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
