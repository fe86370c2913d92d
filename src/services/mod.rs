// Service exports
pub mod backend;
pub mod chat;
pub mod lists;
pub mod session;
pub mod store;

pub use backend::{BackendError, FileBackend, MemoryBackend, StorageBackend};
pub use chat::{ChatConfig, ChatError, ChatSimulator, Thread};
pub use session::{Session, SessionError};
pub use store::{ProfileStore, StorageKey, StoreError};
