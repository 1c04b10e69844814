mod cli;

use crate::cli::{Cli, StorageBackendArg};
use anyhow::Context;
use clap::Parser;
use leafy_core::{LinkBackend, LinkStore};
use leafy_gateway::app::RESERVED_CODES;
use leafy_gateway::{App, AppState};
use leafy_generator::RandomGenerator;
use leafy_storage::{InMemoryBackend, JsonFileBackend, RedisBackend};
use leafy_store::{LinkStoreService, StoreSettings};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Cli::parse();
    leafy_telemetry::init_tracing(config.log_format)?;

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        code_length = config.code_length,
        "starting leafy gateway"
    );

    let settings = StoreSettings::builder()
        .max_generation_attempts(config.generation_attempts)
        .operation_timeout(Duration::from_millis(config.storage_timeout_ms))
        .build();
    let generator = RandomGenerator::builder()
        .length(usize::from(config.code_length))
        .build();

    let store = match config.storage {
        StorageBackendArg::Memory => build_store(InMemoryBackend::new(), generator, settings),
        StorageBackendArg::JsonFile => {
            let backend = JsonFileBackend::open(&config.data_file)
                .await
                .with_context(|| format!("opening {}", config.data_file.display()))?;
            info!(
                path = %backend.path().display(),
                links = backend.len().await,
                "loaded link document"
            );
            build_store(backend, generator, settings)
        }
        StorageBackendArg::Redis => {
            let redis_url = config
                .redis_url
                .as_deref()
                .context("redis url is required when storage backend is redis")?;
            let backend = RedisBackend::connect(redis_url, config.redis_key_prefix.clone()).await?;
            build_store(backend, generator, settings)
        }
    };

    let state = AppState::new(store, config.public_base_url.clone());
    let app = App::router(state, &config.public_dir);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway stopped");
    Ok(())
}

fn build_store<B: LinkBackend>(
    backend: B,
    generator: RandomGenerator,
    settings: StoreSettings,
) -> Arc<dyn LinkStore> {
    Arc::new(
        LinkStoreService::with_settings(backend, generator, settings)
            .with_reserved_codes(RESERVED_CODES),
    )
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
