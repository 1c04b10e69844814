//! Persistence backends for the link store.
//!
//! Every backend implements [`LinkBackend`], whose `set_if_absent` is the
//! atomic claim the store relies on for code uniqueness.

pub mod json_file;
pub mod memory;
pub mod redis;

pub use json_file::JsonFileBackend;
pub use memory::InMemoryBackend;
pub use crate::redis::RedisBackend;

pub use leafy_core::{LinkBackend, ReadBackend, StorageError};
