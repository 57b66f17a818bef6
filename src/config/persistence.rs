//! File persistence configuration

/// Where analysis results end up on disk
pub struct ResultsPersistenceConfig {
    /// Directory holding one JSON file per symbol plus the batch index
    pub directory: &'static str,
    /// Batch index filename (inside `directory`)
    pub index_filename: &'static str,
    /// Extension for per-symbol result files
    pub extension: &'static str,
}

/// The Master Persistence Configuration
pub struct PersistenceConfig {
    pub results: ResultsPersistenceConfig,
}

pub const PERSISTENCE: PersistenceConfig = PersistenceConfig {
    results: ResultsPersistenceConfig {
        directory: "output",
        index_filename: "index.json",
        extension: "json",
    },
};

/// Per-symbol result filename
/// Example: "2330.json"
pub fn result_filename(symbol: &str) -> String {
    format!("{}.{}", symbol, PERSISTENCE.results.extension)
}
