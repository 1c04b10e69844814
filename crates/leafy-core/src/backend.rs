use crate::code::LinkCode;
use crate::error::Result;
use crate::record::LinkRecord;
use async_trait::async_trait;

/// A read-only view of a persistence backend.
#[async_trait]
pub trait ReadBackend: Send + Sync + 'static {
    /// Retrieves the destination stored for a given code.
    /// Returns `None` if the code does not exist.
    async fn get(&self, code: &LinkCode) -> Result<Option<String>>;
}

/// A durable medium holding the code → destination mapping.
///
/// Implementations own the atomicity of [`LinkBackend::set_if_absent`]: two
/// concurrent calls for the same code must never both return `true`.
#[async_trait]
pub trait LinkBackend: ReadBackend {
    /// Stores the record unless its code is already mapped.
    ///
    /// Returns `true` once the record is durably stored, `false` if the code
    /// was taken. Existing mappings are never overwritten.
    async fn set_if_absent(&self, record: &LinkRecord) -> Result<bool>;
}
