use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

const DEFAULT_DATA_PATH: &str = "./dashboard/all_data.csv";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub bind_addr: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let data_path = PathBuf::from(
            lookup("DASHBOARD_DATA_PATH").unwrap_or_else(|| DEFAULT_DATA_PATH.to_string()),
        );
        let bind_addr =
            lookup("DASHBOARD_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        // fail fast, fail loud
        bind_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("DASHBOARD_BIND_ADDR is not a socket address: {bind_addr}"))?;
        if !data_path.is_file() {
            bail!("DASHBOARD_DATA_PATH does not point to a file: {}", data_path.display());
        }

        Ok(Self {
            data_path,
            bind_addr,
        })
    }
}
