//! Thread-safe in-memory [`TokenCache`] implementation.

// std
use std::sync::LazyLock;
// self
use crate::{
	_prelude::*,
	auth::CachedToken,
	cache::{CacheKey, TokenCache},
};

type EntryMap = Arc<RwLock<HashMap<CacheKey, CachedToken>>>;
type GuardMap = Arc<Mutex<HashMap<CacheKey, Arc<AsyncMutex<()>>>>>;

static SHARED: LazyLock<Arc<MemoryTokenCache>> = LazyLock::new(Default::default);

/// In-process token cache with whole-entry replacement and per-key refresh guards.
///
/// Entries live for the lifetime of the cache; the key space is bounded by the number of
/// distinct endpoint + API key pairs a process uses.
#[derive(Clone, Debug, Default)]
pub struct MemoryTokenCache {
	entries: EntryMap,
	guards: GuardMap,
}
impl MemoryTokenCache {
	/// Process-wide instance used by the composition root.
	pub fn shared() -> Arc<Self> {
		SHARED.clone()
	}

	/// Number of cached entries.
	pub fn len(&self) -> usize {
		self.entries.read().len()
	}

	/// Returns `true` when nothing has been cached yet.
	pub fn is_empty(&self) -> bool {
		self.entries.read().is_empty()
	}
}
impl TokenCache for MemoryTokenCache {
	fn get(&self, key: &CacheKey) -> Option<CachedToken> {
		self.entries.read().get(key).cloned()
	}

	fn put(&self, key: CacheKey, entry: CachedToken) -> CachedToken {
		let mut guard = self.entries.write();

		if let Some(existing) =
			guard.get(&key).filter(|existing| existing.valid_until > entry.valid_until)
		{
			return existing.clone();
		}

		guard.insert(key, entry.clone());

		entry
	}

	fn refresh_guard(&self, key: &CacheKey) -> Arc<AsyncMutex<()>> {
		let mut guards = self.guards.lock();

		guards.entry(key.clone()).or_insert_with(|| Arc::new(AsyncMutex::new(()))).clone()
	}
}
