use clap::{Parser, ValueEnum};
use leafy_telemetry::LogFormat;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const LISTEN_ADDR_ENV: &str = "LEAFY_LISTEN_ADDR";
pub const STORAGE_BACKEND_ENV: &str = "LEAFY_STORAGE_BACKEND";
pub const DATA_FILE_ENV: &str = "LEAFY_DATA_FILE";
pub const REDIS_URL_ENV: &str = "LEAFY_REDIS_URL";
pub const REDIS_KEY_PREFIX_ENV: &str = "LEAFY_REDIS_KEY_PREFIX";
pub const CODE_LENGTH_ENV: &str = "LEAFY_CODE_LENGTH";
pub const GENERATION_ATTEMPTS_ENV: &str = "LEAFY_GENERATION_ATTEMPTS";
pub const STORAGE_TIMEOUT_MS_ENV: &str = "LEAFY_STORAGE_TIMEOUT_MS";
pub const PUBLIC_DIR_ENV: &str = "LEAFY_PUBLIC_DIR";
pub const PUBLIC_BASE_URL_ENV: &str = "LEAFY_PUBLIC_BASE_URL";
pub const LOG_FORMAT_ENV: &str = "LEAFY_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_DATA_FILE: &str = "data/links.json";
pub const DEFAULT_PUBLIC_DIR: &str = "public";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "memory")]
    Memory,
    #[value(name = "json-file")]
    JsonFile,
    #[value(name = "redis")]
    Redis,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::Memory => write!(f, "memory"),
            StorageBackendArg::JsonFile => write!(f, "json-file"),
            StorageBackendArg::Redis => write!(f, "redis"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "leafy-gateway", about = "HTTP front end for the Leafy link store")]
pub struct Cli {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::JsonFile
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = DATA_FILE_ENV, default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    #[arg(long, env = REDIS_URL_ENV, required_if_eq("storage", "redis"))]
    pub redis_url: Option<String>,

    #[arg(
        long,
        env = REDIS_KEY_PREFIX_ENV,
        default_value = leafy_storage::redis::DEFAULT_KEY_PREFIX
    )]
    pub redis_key_prefix: String,

    #[arg(
        long,
        env = CODE_LENGTH_ENV,
        default_value_t = 7,
        value_parser = clap::value_parser!(u8).range(4..=32)
    )]
    pub code_length: u8,

    #[arg(long, env = GENERATION_ATTEMPTS_ENV, default_value_t = 5)]
    pub generation_attempts: usize,

    #[arg(
        long,
        env = STORAGE_TIMEOUT_MS_ENV,
        default_value_t = 5000,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub storage_timeout_ms: u64,

    #[arg(long, env = PUBLIC_DIR_ENV, default_value = DEFAULT_PUBLIC_DIR)]
    pub public_dir: PathBuf,

    #[arg(long, env = PUBLIC_BASE_URL_ENV)]
    pub public_base_url: Option<String>,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}
