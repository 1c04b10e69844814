//! Core types and traits for the Leafy link shortener.
//!
//! This crate provides the types shared by the persistence backends, the
//! link store service and the HTTP gateway.

pub mod backend;
pub mod code;
pub mod error;
pub mod record;
pub mod store;

pub use backend::{LinkBackend, ReadBackend};
pub use code::LinkCode;
pub use error::{LinkError, StorageError};
pub use record::LinkRecord;
pub use store::{CreateParams, LinkStore};
