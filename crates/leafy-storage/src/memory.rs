use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use leafy_core::backend::{LinkBackend, ReadBackend};
use leafy_core::error::Result;
use leafy_core::{LinkCode, LinkRecord};

/// In-memory backend using DashMap.
///
/// Nothing survives a restart. The entry API holds the shard lock across the
/// check and the insert, which makes `set_if_absent` atomic per code.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    links: DashMap<String, String>,
}

impl InMemoryBackend {
    /// Creates a new in-memory backend.
    pub fn new() -> Self {
        Self {
            links: DashMap::new(),
        }
    }

    /// Creates a new in-memory backend with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            links: DashMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[async_trait]
impl ReadBackend for InMemoryBackend {
    async fn get(&self, code: &LinkCode) -> Result<Option<String>> {
        Ok(self.links.get(code.as_str()).map(|entry| entry.value().clone()))
    }
}

#[async_trait]
impl LinkBackend for InMemoryBackend {
    async fn set_if_absent(&self, record: &LinkRecord) -> Result<bool> {
        match self.links.entry(record.code.as_str().to_owned()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(record.destination.clone());
                Ok(true)
            }
        }
    }
}
