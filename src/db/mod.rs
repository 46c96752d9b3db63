pub mod init;
pub mod keys;
pub mod store;
pub mod utils;

pub use store::{KeyValueStore, MemoryStore, SqliteStore};
