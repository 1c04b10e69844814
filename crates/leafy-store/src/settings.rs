use std::time::Duration;
use typed_builder::TypedBuilder;

pub const DEFAULT_GENERATION_ATTEMPTS: usize = 5;
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Tuning knobs for [`LinkStoreService`](crate::LinkStoreService).
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct StoreSettings {
    /// How many generated codes are tried before giving up with
    /// `GenerationExhausted`. Values below one are treated as one.
    #[builder(default = DEFAULT_GENERATION_ATTEMPTS)]
    pub max_generation_attempts: usize,
    /// Upper bound for every individual backend call.
    #[builder(default = DEFAULT_OPERATION_TIMEOUT)]
    pub operation_timeout: Duration,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}
