use std::{net::SocketAddr, path::PathBuf, str::FromStr};

use anyhow::Context;
use tracing::info;

use crate::utils::pagination::DEFAULT_PAGE_SIZE;

/// Settings read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub bind_addr: SocketAddr,
    /// Where uploaded post images are written
    pub media_root: PathBuf,
    pub posts_per_page: usize,
    pub max_upload_bytes: usize,
}

fn var_or<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .with_context(|| format!("Invalid value `{value}` for {name}")),
        Err(_) => Ok(default),
    }
}

impl Config {
    /// `DATABASE_URL` is required, everything else has a default.
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("DATABASE_URL environment variable is required")?;

        let config = Self {
            database_url,
            database_max_connections: var_or("DATABASE_MAX_CONNECTIONS", 5)?,
            bind_addr: var_or("BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 8000)))?,
            media_root: var_or("MEDIA_ROOT", PathBuf::from("media"))?,
            posts_per_page: var_or("POSTS_PER_PAGE", DEFAULT_PAGE_SIZE)?,
            max_upload_bytes: var_or("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
        };

        if config.posts_per_page == 0 {
            anyhow::bail!("POSTS_PER_PAGE must be at least 1");
        }

        info!(
            "Configuration loaded : bind {}, media root {}, {} posts per page",
            config.bind_addr,
            config.media_root.display(),
            config.posts_per_page
        );

        Ok(config)
    }
}
