use crate::settings::StoreSettings;
use async_trait::async_trait;
use leafy_core::{
    CreateParams, LinkBackend, LinkCode, LinkError, LinkRecord, LinkStore, StorageError,
};
use leafy_generator::Generator;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

type Result<T> = std::result::Result<T, LinkError>;

/// A concrete implementation of the [`LinkStore`] trait.
///
/// This service wraps a [`LinkBackend`] and a [`Generator`] to handle:
/// - Destination and custom code validation
/// - Code selection (caller-supplied or generated), skipping reserved codes
/// - Bounded retry when a generated code is already taken
/// - Timeouts on every backend call
///
/// Uniqueness is delegated to the backend's atomic `set_if_absent`; the
/// service never checks and writes in two separate steps.
#[derive(Debug)]
pub struct LinkStoreService<B, G> {
    backend: Arc<B>,
    generator: Arc<G>,
    settings: StoreSettings,
    reserved: Arc<[String]>,
}

impl<B, G> Clone for LinkStoreService<B, G> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            generator: Arc::clone(&self.generator),
            settings: self.settings,
            reserved: Arc::clone(&self.reserved),
        }
    }
}

impl<B: LinkBackend, G: Generator> LinkStoreService<B, G> {
    /// Creates a new service with default settings.
    pub fn new(backend: B, generator: G) -> Self {
        Self::with_settings(backend, generator, StoreSettings::default())
    }

    pub fn with_settings(backend: B, generator: G, settings: StoreSettings) -> Self {
        Self {
            backend: Arc::new(backend),
            generator: Arc::new(generator),
            settings,
            reserved: Arc::from(Vec::new()),
        }
    }

    /// Codes that can never be handed out, e.g. paths taken by the gateway.
    ///
    /// Requesting one fails with [`LinkError::ReservedCode`]; a generated one
    /// is discarded like a collision.
    pub fn with_reserved_codes<S: AsRef<str>>(mut self, codes: &[S]) -> Self {
        self.reserved = codes.iter().map(|c| c.as_ref().to_string()).collect();
        self
    }

    fn is_reserved(&self, code: &LinkCode) -> bool {
        self.reserved.iter().any(|r| r == code.as_str())
    }

    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    /// Returns the backend this service persists to.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Runs a backend call under the configured timeout.
    async fn bounded<T>(
        &self,
        operation: &str,
        call: impl Future<Output = leafy_core::error::Result<T>>,
    ) -> Result<T> {
        match tokio::time::timeout(self.settings.operation_timeout, call).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(StorageError::Timeout(format!(
                "{operation} did not complete within {:?}",
                self.settings.operation_timeout
            ))
            .into()),
        }
    }

    async fn claim(&self, record: &LinkRecord) -> Result<bool> {
        self.bounded("set_if_absent", self.backend.set_if_absent(record))
            .await
    }

    async fn create_with_code(&self, code: LinkCode, destination: String) -> Result<LinkCode> {
        let record = LinkRecord::new(code, destination);

        if !self.claim(&record).await? {
            debug!(code = %record.code, "requested code already taken");
            return Err(LinkError::CodeTaken(record.code.to_string()));
        }

        info!(code = %record.code, destination = %record.destination, "created link");
        Ok(record.code)
    }

    async fn create_with_generated_code(&self, destination: String) -> Result<LinkCode> {
        let attempts = self.settings.max_generation_attempts.max(1);

        for attempt in 1..=attempts {
            let code: LinkCode = self.generator.generate().into();
            if self.is_reserved(&code) {
                debug!(code = %code, attempt, "generated code is reserved, retrying");
                continue;
            }
            let record = LinkRecord::new(code, destination.clone());

            if self.claim(&record).await? {
                info!(
                    code = %record.code,
                    destination = %record.destination,
                    attempt,
                    "created link with generated code"
                );
                return Ok(record.code);
            }

            warn!(code = %record.code, attempt, "generated code collided, retrying");
        }

        Err(LinkError::GenerationExhausted { attempts })
    }
}

#[async_trait]
impl<B: LinkBackend, G: Generator> LinkStore for LinkStoreService<B, G> {
    async fn create(&self, params: CreateParams) -> Result<LinkCode> {
        let destination = params
            .destination
            .filter(|url| !url.is_empty())
            .ok_or(LinkError::MissingUrl)?;

        match params.requested_code.filter(|code| !code.is_empty()) {
            Some(code) => {
                let code = LinkCode::new(code)?;
                if self.is_reserved(&code) {
                    return Err(LinkError::ReservedCode(code.to_string()));
                }
                self.create_with_code(code, destination).await
            }
            None => self.create_with_generated_code(destination).await,
        }
    }

    async fn resolve(&self, code: &LinkCode) -> Result<Option<String>> {
        trace!(code = %code, "resolving short code");

        let destination = self.bounded("get", self.backend.get(code)).await?;
        match &destination {
            Some(url) => debug!(code = %code, destination = %url, "resolved short code"),
            None => trace!(code = %code, "short code not found"),
        }
        Ok(destination)
    }
}
