//! Environment-driven runtime configuration

use std::env;

#[derive(Debug, Clone, PartialEq)]
pub enum BackendType {
    Sqlite,
    Jsonl,
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub blocks_path: String,
    pub db_path: String,
    pub output_dir: String,
    pub batch_size: usize,
    pub rust_log: String,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingVariable(String),
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingVariable(var) => write!(f, "Missing environment variable: {}", var),
            ConfigError::InvalidValue(msg) => write!(f, "Invalid configuration value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl RuntimeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let blocks_path = env::var("BLOCKS_PATH")
            .map_err(|_| ConfigError::MissingVariable("BLOCKS_PATH".to_string()))?;

        let db_path = env::var("DB_PATH").unwrap_or_else(|_| "jupflow.db".to_string());
        let output_dir = env::var("OUTPUT_DIR").unwrap_or_else(|_| "out".to_string());

        let batch_size = env::var("BLOCK_BATCH_SIZE")
            .unwrap_or_else(|_| "64".to_string())
            .parse::<usize>()
            .unwrap_or(64);
        if batch_size == 0 {
            return Err(ConfigError::InvalidValue(
                "BLOCK_BATCH_SIZE must be greater than zero".to_string(),
            ));
        }

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            blocks_path,
            db_path,
            output_dir,
            batch_size,
            rust_log,
        })
    }

    pub fn parse_backend_from_args() -> BackendType {
        let args: Vec<String> = env::args().collect();

        if let Some(idx) = args.iter().position(|x| x == "--backend") {
            match args.get(idx + 1).map(|s| s.as_str()) {
                Some("jsonl") => return BackendType::Jsonl,
                Some("sqlite") => return BackendType::Sqlite,
                _ => {}
            }
        }

        BackendType::Sqlite
    }
}
