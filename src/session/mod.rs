pub mod storage;
pub mod store;

pub use storage::{FileStorage, LocalStorage, MemoryStorage, StorageError};
pub use store::{Session, TOKEN_KEY, USER_KEY};
