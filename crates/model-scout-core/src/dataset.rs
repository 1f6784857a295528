use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScoutError};
use crate::model::Entity;
use crate::score::{self, ScoredEntity};
use crate::weights::WeightSet;

/// File name of the dataset inside the cache directory.
pub const DATASET_FILE: &str = "models.toml";

/// A comparison run: weights plus the models to rank, in input order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub weights: WeightSet,
    #[serde(default, rename = "model")]
    pub models: Vec<Entity>,
}

impl Dataset {
    pub fn new(weights: WeightSet, models: Vec<Entity>) -> Self {
        Self { weights, models }
    }

    /// Weights must be valid and model names non-empty and unique.
    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        let mut seen = HashSet::new();
        for (i, m) in self.models.iter().enumerate() {
            let name = m.name.trim();
            if name.is_empty() {
                return Err(ScoutError::EmptyName(i + 1));
            }
            if !seen.insert(name) {
                return Err(ScoutError::DuplicateModel(name.to_string()));
            }
        }
        Ok(())
    }

    /// Rank the models with this dataset's weights.
    pub fn score(&self) -> Vec<ScoredEntity> {
        score::score(&self.models, &self.weights)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| ScoutError::Parse(format!("cannot serialize: {e}")))
    }
}

/// Parse and validate a dataset from a TOML string.
pub fn parse_dataset(toml_str: &str) -> Result<Dataset> {
    let ds: Dataset = toml::from_str(toml_str).map_err(|e| ScoutError::Parse(e.to_string()))?;
    ds.validate()?;
    Ok(ds)
}

/// Load a dataset from a TOML file.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ScoutError::Io(format!("{}: {e}", path.display())))?;
    let ds = parse_dataset(&content)?;
    tracing::debug!(path = %path.display(), models = ds.models.len(), "loaded dataset");
    Ok(ds)
}

/// The example comparison set compiled into the binary.
pub fn load_bundled_dataset() -> Result<Dataset> {
    let toml_str = include_str!("../../../data/models.toml");
    parse_dataset(toml_str)
}

/// Load the cached dataset if one was synced and still parses, otherwise the bundled one.
#[cfg(feature = "network")]
pub fn load_dataset_cached() -> Result<Dataset> {
    match crate::cache::cache_dir() {
        Some(dir) => load_dataset_from_cache(&dir),
        None => load_bundled_dataset(),
    }
}

/// `models.toml` under `dir` if present and valid, otherwise the bundled dataset.
pub fn load_dataset_from_cache(dir: &Path) -> Result<Dataset> {
    let path = dir.join(DATASET_FILE);
    if let Ok(content) = std::fs::read_to_string(&path) {
        match parse_dataset(&content) {
            Ok(ds) => {
                tracing::debug!(path = %path.display(), "using cached dataset");
                return Ok(ds);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable cached dataset");
            }
        }
    }
    load_bundled_dataset()
}
