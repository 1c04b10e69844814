//! Link store service.
//!
//! [`LinkStoreService`] implements [`LinkStore`] once over any persistence
//! backend and code generator: code selection, the bounded retry on
//! generated-code collisions, and storage timeouts all live here.

pub mod service;
pub mod settings;

pub use leafy_core::{CreateParams, LinkCode, LinkError, LinkStore};
pub use service::LinkStoreService;
pub use settings::StoreSettings;
