use std::sync::Arc;

use leafy_core::LinkStore;

#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn LinkStore>,
    public_base_url: Option<String>,
}

impl AppState {
    /// `public_base_url` overrides the scheme and host used for short URLs
    /// on the preview page; without it they come from the request headers.
    pub fn new(store: Arc<dyn LinkStore>, public_base_url: Option<String>) -> Self {
        Self {
            store,
            public_base_url,
        }
    }

    pub fn store(&self) -> &dyn LinkStore {
        self.store.as_ref()
    }

    pub fn public_base_url(&self) -> Option<&str> {
        self.public_base_url.as_deref()
    }
}
