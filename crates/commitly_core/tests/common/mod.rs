use commitly_core::{MemoryStorage, Store};
use std::sync::Arc;

/// A store over fresh in-memory storage, seeded on first read.
#[allow(dead_code)]
pub fn test_store() -> Store {
    Store::new(Arc::new(MemoryStorage::new()))
}

/// A store plus a handle on its backing storage, for poking at raw bytes.
#[allow(dead_code)]
pub fn test_store_with_storage() -> (Store, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    (Store::new(storage.clone()), storage)
}
