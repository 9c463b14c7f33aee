//! Runtime configuration from environment variables

use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_IMAGE_URL: &str = "http://localhost:8000/generate";
const DEFAULT_RESPONSE_DELAY_MS: u64 = 500;

/// Where the conversation snapshot is kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Json,
    Sqlite,
    Memory,
}

impl StoreBackend {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Some(StoreBackend::Json),
            "sqlite" => Some(StoreBackend::Sqlite),
            "memory" => Some(StoreBackend::Memory),
            _ => None,
        }
    }

    fn default_file_name(self) -> &'static str {
        match self {
            StoreBackend::Json | StoreBackend::Memory => "chat-history.json",
            StoreBackend::Sqlite => "chat-history.db",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub store_backend: StoreBackend,
    pub store_path: PathBuf,
    /// Image generation endpoint (POST `{"prompt": ...}`)
    pub image_url: String,
    /// Fixed delay before a local transform responds
    pub response_delay: Duration,
    /// No timeout unless configured; a call that never settles stays pending
    pub image_timeout: Option<Duration>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let store_backend = match lookup("CHATLOG_STORE") {
            Some(value) => StoreBackend::parse(&value).unwrap_or_else(|| {
                tracing::warn!(value = %value, "Unknown CHATLOG_STORE, using json");
                StoreBackend::Json
            }),
            None => StoreBackend::Json,
        };

        let store_path = lookup("CHATLOG_STORE_PATH").map_or_else(
            || {
                let home = lookup("HOME").unwrap_or_else(|| "/tmp".to_string());
                PathBuf::from(home)
                    .join(".chatlog")
                    .join(store_backend.default_file_name())
            },
            PathBuf::from,
        );

        Self {
            port: parse_or("CHATLOG_PORT", lookup("CHATLOG_PORT"), DEFAULT_PORT),
            store_backend,
            store_path,
            image_url: lookup("CHATLOG_IMAGE_URL").unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string()),
            response_delay: Duration::from_millis(parse_or(
                "CHATLOG_RESPONSE_DELAY_MS",
                lookup("CHATLOG_RESPONSE_DELAY_MS"),
                DEFAULT_RESPONSE_DELAY_MS,
            )),
            image_timeout: lookup("CHATLOG_IMAGE_TIMEOUT_SECS").and_then(|raw| {
                match raw.trim().parse::<u64>() {
                    Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                    _ => {
                        tracing::warn!(value = %raw, "Ignoring invalid CHATLOG_IMAGE_TIMEOUT_SECS");
                        None
                    }
                }
            }),
        }
    }
}

fn parse_or<T: std::str::FromStr + Copy>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Invalid value, using default");
            default
        }),
        None => default,
    }
}
