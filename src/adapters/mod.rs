// Adapters layer: concrete implementations for the filesystem.

pub mod kv;
pub mod storage;

pub use kv::{load_snapshot, save_snapshot, FileKeyValueStore, MemoryKeyValueStore};
pub use storage::LocalStorage;
