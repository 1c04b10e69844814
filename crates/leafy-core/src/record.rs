use crate::code::LinkCode;

/// A single code → destination mapping.
///
/// Records are created once and never updated or removed by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    /// The short code identifying the link.
    pub code: LinkCode,
    /// The destination URL, stored verbatim.
    pub destination: String,
}

impl LinkRecord {
    pub fn new(code: LinkCode, destination: impl Into<String>) -> Self {
        Self {
            code,
            destination: destination.into(),
        }
    }
}
