pub mod config;
pub mod kv;

mod file_store;
mod memory;
pub use file_store::FileStore;
pub use memory::MemoryStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStorageStore;

pub use config::LmsConfig;
pub use kv::{keys, KeyValueStore};
