//! Token cache contract and the built-in in-memory implementation.
//!
//! One cache entry exists per identity endpoint + API key pair, and every strategy
//! constructed with the same pair shares it. Strategies never hold a private copy of a
//! token; the cache is the only source of truth.

pub mod memory;

pub use memory::MemoryTokenCache;

// self
use crate::{
	_prelude::*,
	auth::{CachedToken, Secret},
};

/// Storage contract for minted bearer tokens.
///
/// Implementations must replace entries as a whole: a reader sees either the previous
/// entry or the new one, never a mix of the two.
pub trait TokenCache
where
	Self: Send + Sync,
{
	/// Returns the entry stored for `key`, if any.
	fn get(&self, key: &CacheKey) -> Option<CachedToken>;

	/// Stores `entry` for `key` and returns the entry the cache now holds.
	///
	/// When racing writers store entries for the same key, the one with the later
	/// `valid_until` is kept.
	fn put(&self, key: CacheKey, entry: CachedToken) -> CachedToken;

	/// Returns the async mutex callers may hold while minting a token for `key`.
	///
	/// The default hands out a fresh mutex per call, which disables single-flight
	/// deduplication without affecting correctness.
	fn refresh_guard(&self, key: &CacheKey) -> Arc<AsyncMutex<()>> {
		let _ = key;

		Arc::new(AsyncMutex::new(()))
	}
}

/// Composite cache key, `identity_endpoint + "#" + apikey`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
	composite: String,
	endpoint_len: usize,
	fingerprint: String,
}
impl CacheKey {
	/// Builds the key for an endpoint and API key.
	pub fn new(identity_endpoint: &str, apikey: &Secret) -> Self {
		Self {
			composite: format!("{identity_endpoint}#{}", apikey.expose()),
			endpoint_len: identity_endpoint.len(),
			fingerprint: apikey.fingerprint(),
		}
	}

	/// Identity endpoint component.
	pub fn endpoint(&self) -> &str {
		&self.composite[..self.endpoint_len]
	}

	/// Fingerprint of the API key component.
	pub fn credential(&self) -> &str {
		&self.fingerprint
	}

	/// Full composite key. Contains the API key; callers must avoid logging it.
	pub fn expose(&self) -> &str {
		&self.composite
	}
}
impl Debug for CacheKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("CacheKey").field(&format_args!("{self}")).finish()
	}
}
impl Display for CacheKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{}#{}", self.endpoint(), self.fingerprint)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	const ENDPOINT: &str = "https://iam.example.com/identity/token";

	#[test]
	fn key_composes_endpoint_and_apikey() {
		let apikey = Secret::new("my-api-key");
		let key = CacheKey::new(ENDPOINT, &apikey);

		assert_eq!(key.expose(), "https://iam.example.com/identity/token#my-api-key");
		assert_eq!(key.endpoint(), ENDPOINT);
		assert_eq!(key.credential(), apikey.fingerprint());
	}

	#[test]
	fn key_formatters_hide_apikey() {
		let key = CacheKey::new(ENDPOINT, &Secret::new("my-api-key"));

		assert!(!format!("{key}").contains("my-api-key"));
		assert!(!format!("{key:?}").contains("my-api-key"));
		assert!(format!("{key:?}").starts_with("CacheKey("));
	}

	#[test]
	fn keys_differ_per_endpoint_and_apikey() {
		let apikey = Secret::new("k");
		let other_endpoint = CacheKey::new("https://iam.other.com/identity/token", &apikey);
		let other_key = CacheKey::new(ENDPOINT, &Secret::new("k2"));

		assert_ne!(CacheKey::new(ENDPOINT, &apikey), other_endpoint);
		assert_ne!(CacheKey::new(ENDPOINT, &apikey), other_key);
		assert_eq!(CacheKey::new(ENDPOINT, &apikey), CacheKey::new(ENDPOINT, &apikey));
	}
}
