//! Thread-safe in-memory [`SessionStore`] implementation for tests and short-lived processes.

// self
use crate::{
	_prelude::*,
	session::{SessionKey, SessionStore, SessionWrite, StoreError, StoreFuture},
};

type StoreMap = Arc<RwLock<BTreeMap<SessionKey, String>>>;

/// Thread-safe storage backend that keeps session values in-process.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(StoreMap);
impl MemoryStore {
	/// Returns the number of stored keys.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns `true` when nothing is stored.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}

	fn load_now(map: StoreMap, key: SessionKey) -> Option<String> {
		map.read().get(&key).cloned()
	}

	fn commit_now(map: StoreMap, writes: Vec<SessionWrite>) -> Result<(), StoreError> {
		let mut guard = map.write();

		writes.into_iter().for_each(|write| write.apply(&mut guard));

		Ok(())
	}
}
impl SessionStore for MemoryStore {
	fn load(&self, key: SessionKey) -> StoreFuture<'_, Option<String>> {
		let map = self.0.clone();

		Box::pin(async move { Ok(Self::load_now(map, key)) })
	}

	fn commit(&self, writes: Vec<SessionWrite>) -> StoreFuture<'_, ()> {
		let map = self.0.clone();

		Box::pin(async move { Self::commit_now(map, writes) })
	}
}
