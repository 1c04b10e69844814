use thiserror::Error;

/// Failures while provisioning a disposable server for a test.
#[derive(Debug, Error)]
pub enum TestInfraError {
    /// The container could not be started or inspected.
    #[error("failed to manage test container: {0}")]
    Container(#[from] testcontainers::TestcontainersError),

    /// The container is up but Redis refused the connection.
    #[error("failed to reach test redis: {0}")]
    Redis(#[from] ::redis::RedisError),
}

pub type Result<T> = std::result::Result<T, TestInfraError>;
