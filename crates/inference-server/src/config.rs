//! Startup configuration (`spec.md` §6, ambient additions per `SPEC_FULL.md` §2.1).
//!
//! Precedence, low to high: hardcoded default < adapter `PREFERRED_SETTINGS`
//! < environment variable override.

use std::env;
use std::net::SocketAddr;

use crate::adapter::PreferredSettings;
use crate::error::ServerError;

#[derive(Debug, Clone)]
pub struct Config {
    pub language_model: String,
    pub threads: u32,
    pub batch_size: u32,
    pub cache_size: u32,
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Loads configuration from the environment, falling back to the
    /// adapter's preferred settings and finally to hardcoded defaults.
    pub fn from_env(preferred: &PreferredSettings) -> Result<Self, ServerError> {
        let language_model = env::var("LANGUAGE_MODEL").map_err(|_| ServerError::MissingModel)?;

        let threads = read_int_env("THREADS", preferred.threads.unwrap_or(1))?;
        let batch_size = read_int_env("BATCH_SIZE", preferred.batch_size.unwrap_or(8))?;
        let cache_size = read_int_env("CACHE_SIZE", preferred.cache_size.unwrap_or(0))?;

        let bind_addr = match env::var("BIND_ADDR") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ServerError::MalformedInteger { name: "BIND_ADDR", value: raw })?,
            Err(_) => SocketAddr::from(([0, 0, 0, 0], 5000)),
        };

        Ok(Config {
            language_model,
            threads,
            batch_size,
            cache_size,
            bind_addr,
        })
    }
}

fn read_int_env(name: &'static str, default: u32) -> Result<u32, ServerError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ServerError::MalformedInteger { name, value: raw }),
        Err(_) => Ok(default),
    }
}

/// Initializes the global tracing subscriber from `RUST_LOG` (default `info`).
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).try_init().ok();
}
