pub mod adapter;
pub mod backend;

pub use adapter::{load_collection, save_collection};
pub use backend::{FileBackend, KeyValueBackend, MemoryBackend};
