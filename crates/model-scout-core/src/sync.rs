use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cache;
use crate::dataset::{self, DATASET_FILE};
use crate::error::{Result, ScoutError};

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

pub struct SyncResult {
    pub model_count: usize,
    pub path: PathBuf,
}

/// Download a dataset TOML, validate it, and store it in the cache.
///
/// One attempt only; nothing is written unless the download parses.
pub async fn sync_dataset(url: &str) -> Result<SyncResult> {
    let dir =
        cache::cache_dir().ok_or_else(|| ScoutError::Io("cannot determine cache directory".into()))?;
    sync_dataset_to(url, &dir).await
}

/// Same as [`sync_dataset`], storing into `dir` instead of the cache directory.
pub async fn sync_dataset_to(url: &str, dir: &Path) -> Result<SyncResult> {
    let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
    tracing::info!(%url, "downloading dataset");
    let resp = client.get(url).send().await?;
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        return Err(ScoutError::Api { status, body });
    }
    let text = resp.text().await?;

    install_dataset(&text, dir).await
}

/// Validate dataset text and write it as `models.toml` under `dir`.
pub async fn install_dataset(text: &str, dir: &Path) -> Result<SyncResult> {
    let ds = dataset::parse_dataset(text)?;
    let path = dir.join(DATASET_FILE);
    tokio::fs::write(&path, text)
        .await
        .map_err(|e| ScoutError::Io(format!("failed to write {}: {e}", path.display())))?;
    tracing::info!(path = %path.display(), models = ds.models.len(), "dataset cached");
    Ok(SyncResult {
        model_count: ds.models.len(),
        path,
    })
}
