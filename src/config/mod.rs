use anyhow::{anyhow, Result};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub http_addr: String,
    pub api_base_url: String,
    pub public_web_url: String,
    pub maps_api_key: String,
    pub session_path: PathBuf,
    pub api_timeout_seconds: u64,
    pub list_cache_ttl_seconds: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let http_addr = env_or("HTTP_ADDR", "0.0.0.0:3000");
        let _parsed_http_addr = SocketAddr::from_str(&http_addr)
            .map_err(|err| anyhow!("invalid HTTP_ADDR: {}", err))?;

        let api_base_url = env_or_err("API_BASE_URL")?;
        Url::parse(&api_base_url).map_err(|err| anyhow!("invalid API_BASE_URL: {}", err))?;

        let public_web_url = env_or_err("PUBLIC_WEB_URL")?;
        Url::parse(&public_web_url).map_err(|err| anyhow!("invalid PUBLIC_WEB_URL: {}", err))?;

        Ok(Self {
            http_addr,
            api_base_url,
            public_web_url: public_web_url.trim_end_matches('/').to_string(),
            maps_api_key: env_or("MAPS_API_KEY", ""),
            session_path: PathBuf::from(env_or("SESSION_PATH", "./data/session.json")),
            api_timeout_seconds: env_or_parse("API_TIMEOUT_SECONDS", "15")?,
            list_cache_ttl_seconds: env_or_parse("LIST_CACHE_TTL_SECONDS", "900")?,
        })
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_seconds)
    }

    pub fn list_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.list_cache_ttl_seconds)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_or_err(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| anyhow!("missing required env var: {}", key))
}

fn env_or_parse<T>(key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    let value = std::env::var(key).unwrap_or_else(|_| default.to_string());
    value
        .parse::<T>()
        .map_err(|err| anyhow!("invalid {}: {}", key, err))
}
