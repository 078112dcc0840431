use crate::storage::resolve_cache_path;
use std::{env, path::PathBuf};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub cache_path: PathBuf,
    pub offline_fallback: bool,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let api_url = env::var("MEDIBOT_API_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let offline_fallback = env::var("MEDIBOT_OFFLINE")
            .map(|value| parse_flag(&value))
            .unwrap_or(true);

        Self {
            api_url,
            cache_path: resolve_cache_path(),
            offline_fallback,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "off" | "no"
    )
}
