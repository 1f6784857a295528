use std::path::PathBuf;

/// Overrides the platform cache location when set.
pub const CACHE_DIR_ENV: &str = "MODEL_SCOUT_CACHE_DIR";

/// Directory holding synced data files: `$MODEL_SCOUT_CACHE_DIR`, else
/// `<platform cache>/model-scout`. Created on first use.
pub fn cache_dir() -> Option<PathBuf> {
    let dir = match std::env::var_os(CACHE_DIR_ENV) {
        Some(v) if !v.is_empty() => PathBuf::from(v),
        _ => dirs::cache_dir()?.join("model-scout"),
    };
    if !dir.exists() {
        std::fs::create_dir_all(&dir).ok()?;
    }
    Some(dir)
}

pub fn cache_path(filename: &str) -> Option<PathBuf> {
    Some(cache_dir()?.join(filename))
}
