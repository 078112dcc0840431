use crate::cache::CacheData;
use crate::errors::ClientError;
use std::{
    env,
    path::{Path, PathBuf},
};
use tokio::fs;
use tracing::warn;

pub fn resolve_cache_path() -> PathBuf {
    env::var("MEDIBOT_CACHE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data/cache.json"))
}

/// JSON file holding the response cache between runs.
#[derive(Debug, Clone)]
pub struct CacheFile {
    path: PathBuf,
}

impl CacheFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing or unreadable file starts an empty cache.
    pub async fn load(&self) -> CacheData {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return CacheData::default(),
            Err(err) => {
                warn!(path = %self.path.display(), "ignoring unreadable cache file: {err}");
                return CacheData::default();
            }
        };

        serde_json::from_slice(&bytes).unwrap_or_else(|err| {
            warn!(path = %self.path.display(), "ignoring corrupt cache file: {err}");
            CacheData::default()
        })
    }

    /// Writes through a sibling temp file so a crash never leaves half a cache.
    pub async fn save(&self, data: &CacheData) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let payload = serde_json::to_vec_pretty(data).map_err(ClientError::io)?;
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, payload).await?;
        fs::rename(&staging, &self.path).await?;
        Ok(())
    }
}
