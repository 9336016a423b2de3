mod factory;
mod storage;

pub use factory::SqliteStorageFactory;
pub use storage::{IN_MEMORY, SqliteStorage};
