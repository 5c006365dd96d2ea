//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keys, touch, pointer)
//! - Storage (LocalStorage on web, a JSON file on native)

pub mod input;
pub mod storage;

pub use input::{InputEvent, ThrustSource, ThrustSources};
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
pub use storage::{MemoryStorage, Storage, StorageError};
