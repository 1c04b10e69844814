use crate::code::LinkCode;
use crate::error::LinkError;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, LinkError>;

/// Parameters for creating a link.
///
/// Both fields mirror what a caller may or may not send: a missing or empty
/// destination is rejected, a missing or empty code asks the store to
/// generate one.
#[derive(Debug, Clone, Default)]
pub struct CreateParams {
    /// The destination URL to shorten.
    pub destination: Option<String>,
    /// Optional caller-chosen short code.
    pub requested_code: Option<String>,
}

impl CreateParams {
    /// Parameters for a generated code.
    pub fn generated(destination: impl Into<String>) -> Self {
        Self {
            destination: Some(destination.into()),
            requested_code: None,
        }
    }

    /// Parameters for a caller-chosen code.
    pub fn with_code(destination: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            destination: Some(destination.into()),
            requested_code: Some(code.into()),
        }
    }
}

#[async_trait]
pub trait LinkStore: Send + Sync + 'static {
    /// Creates a link and returns its short code.
    async fn create(&self, params: CreateParams) -> Result<LinkCode>;

    /// Resolves a short code to its destination URL.
    /// Returns `None` if the code does not exist.
    async fn resolve(&self, code: &LinkCode) -> Result<Option<String>>;
}
