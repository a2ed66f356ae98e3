//! Identity-service token responses and the cache entries built from them.

// self
use crate::{_prelude::*, auth::Secret};

/// Token response returned by the identity endpoint for an API-key grant.
///
/// Only `access_token` and `expires_in` are required; the remaining fields are kept so
/// callers inspecting a cached entry see what the server sent.
#[derive(Clone, Deserialize)]
pub struct IdentityToken {
	/// Bearer token presented to the translation service.
	pub access_token: Secret,
	/// Server-declared lifetime in seconds.
	pub expires_in: i64,
	/// Refresh token, when the identity service issues one.
	#[serde(default)]
	pub refresh_token: Option<Secret>,
	/// Token type label (normally `Bearer`).
	#[serde(default)]
	pub token_type: Option<String>,
	/// Absolute expiry as a Unix timestamp, when supplied.
	#[serde(default)]
	pub expiration: Option<i64>,
	/// Granted scope string, when supplied.
	#[serde(default)]
	pub scope: Option<String>,
}
impl Debug for IdentityToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("IdentityToken")
			.field("access_token", &"<redacted>")
			.field("expires_in", &self.expires_in)
			.field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
			.field("token_type", &self.token_type)
			.field("expiration", &self.expiration)
			.field("scope", &self.scope)
			.finish()
	}
}

/// Cache entry pairing a minted token with its local expiry watermark.
///
/// Entries are immutable; a refresh builds a new entry and replaces the old one whole.
#[derive(Clone, Debug)]
pub struct CachedToken {
	/// Token response as returned by the identity endpoint.
	pub token: Arc<IdentityToken>,
	/// Instant the mint call started.
	pub minted_at: OffsetDateTime,
	/// Instant after which the entry must be refreshed.
	pub valid_until: OffsetDateTime,
}
impl CachedToken {
	/// Builds an entry for a freshly minted token.
	pub fn new(
		token: IdentityToken,
		minted_at: OffsetDateTime,
		valid_until: OffsetDateTime,
	) -> Self {
		Self { token: Arc::new(token), minted_at, valid_until }
	}

	/// Bearer token value.
	pub fn access_token(&self) -> &Secret {
		&self.token.access_token
	}

	/// Returns `true` once `instant` is strictly past the watermark.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		instant > self.valid_until
	}
}
