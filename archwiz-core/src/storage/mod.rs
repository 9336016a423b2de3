pub mod file;
pub mod memory;
pub mod registry;
pub mod state_storage;

pub use file::{FileStorage, FileStorageFactory};
pub use memory::{MemoryStorage, MemoryStorageFactory};
pub use registry::{StorageConfig, StorageFactory, StorageRegistry};
pub use state_storage::{StateStorage, StorageError};
