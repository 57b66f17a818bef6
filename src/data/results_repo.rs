use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::{
    config::{PERSISTENCE, result_filename},
    models::{AnalysisResult, BatchIndex},
};

#[cfg(debug_assertions)]
use crate::config::DF;

// --- TRAIT DEFINITION ---

/// Where analysis results and batch indexes are stored.
#[async_trait::async_trait]
pub trait ResultsRepository: Send + Sync {
    /// Persists one result, replacing any earlier one for the same symbol.
    async fn save_result(&self, result: &AnalysisResult) -> Result<PathBuf>;
    async fn save_index(&self, index: &BatchIndex) -> Result<PathBuf>;
}

// --- JSON FILES ---

/// Pretty JSON files under one directory: `<symbol>.json` plus `index.json`.
pub struct JsonResultsRepository {
    dir: PathBuf,
}

impl Default for JsonResultsRepository {
    fn default() -> Self {
        Self::new(PERSISTENCE.results.directory)
    }
}

impl JsonResultsRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn result_path(&self, symbol: &str) -> PathBuf {
        self.dir.join(result_filename(symbol))
    }

    pub fn index_path(&self) -> PathBuf {
        self.dir.join(PERSISTENCE.results.index_filename)
    }

    pub async fn load_result(&self, symbol: &str) -> Result<AnalysisResult> {
        let path = self.result_path(symbol);
        let text = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
    }

    async fn write_json<T: serde::Serialize + Sync>(&self, path: PathBuf, value: &T) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;

        let json = serde_json::to_string_pretty(value)?;
        tokio::fs::write(&path, json)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;

        #[cfg(debug_assertions)]
        if DF.log_results_repo {
            log::info!("RESULTS: wrote {}", path.display());
        }

        Ok(path)
    }
}

#[async_trait::async_trait]
impl ResultsRepository for JsonResultsRepository {
    async fn save_result(&self, result: &AnalysisResult) -> Result<PathBuf> {
        self.write_json(self.result_path(&result.symbol), result).await
    }

    async fn save_index(&self, index: &BatchIndex) -> Result<PathBuf> {
        self.write_json(self.index_path(), index).await
    }
}
