use anyhow::{anyhow, Result};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL every request is issued against, e.g. `http://10.0.0.5:8080/api`.
    pub api_base_url: String,
    /// Default per-request timeout. Absent means the transport default.
    pub request_timeout: Option<Duration>,
    /// Path of the on-device key-value file holding the session.
    pub session_store_path: PathBuf,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        let api_base_url = env_or("API_URL", "http://127.0.0.1:8080/api");
        let parsed =
            Url::parse(&api_base_url).map_err(|err| anyhow!("invalid API_URL: {}", err))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(anyhow!(
                "invalid API_URL: unsupported scheme {}",
                parsed.scheme()
            ));
        }

        let request_timeout = match std::env::var("API_TIMEOUT_SECONDS") {
            Ok(value) => {
                let seconds: u64 = value
                    .parse()
                    .map_err(|err| anyhow!("invalid API_TIMEOUT_SECONDS: {}", err))?;
                Some(Duration::from_secs(seconds))
            }
            Err(_) => None,
        };

        Ok(Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            request_timeout,
            session_store_path: PathBuf::from(env_or("SESSION_STORE", ".ripple-session.json")),
        })
    }

    /// Config pointing at an explicit base URL, everything else defaulted.
    /// Handy for tests and embedding.
    pub fn with_base_url(api_base_url: impl Into<String>) -> Self {
        let api_base_url: String = api_base_url.into();
        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            request_timeout: None,
            session_store_path: PathBuf::from(".ripple-session.json"),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
