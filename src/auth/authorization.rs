//! The value a strategy decided to place in the `Authorization` header.

// self
use crate::{_prelude::*, auth::Secret};

/// Header name written by both strategies.
pub const AUTHORIZATION: &str = "Authorization";

/// Three-state outcome of the token strategy's header decision.
#[derive(Clone, PartialEq, Eq)]
pub enum Authorization {
	/// `Authorization: Bearer <token>`.
	Bearer(Secret),
	/// `Authorization: API-KEY <apikey>`; the server-side fallback mode.
	RawApiKey(Secret),
	/// Leave the request unauthenticated.
	None,
}
impl Authorization {
	/// Renders the header value, or `None` when no header should be sent.
	pub fn header_value(&self) -> Option<String> {
		match self {
			Self::Bearer(token) => Some(format!("Bearer {}", token.expose())),
			Self::RawApiKey(apikey) => Some(format!("API-KEY {}", apikey.expose())),
			Self::None => None,
		}
	}

	/// Stable label used in verbose events.
	pub const fn as_str(&self) -> &'static str {
		match self {
			Self::Bearer(_) => "bearer",
			Self::RawApiKey(_) => "api_key",
			Self::None => "none",
		}
	}
}
impl Debug for Authorization {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		Display::fmt(self, f)
	}
}
impl Display for Authorization {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Bearer(_) => f.write_str("Bearer <redacted>"),
			Self::RawApiKey(_) => f.write_str("API-KEY <redacted>"),
			Self::None => f.write_str("<none>"),
		}
	}
}
