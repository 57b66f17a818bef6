use {
    serde::{Deserialize, Serialize},
    std::fmt,
};

/// Outcome of one symbol in a batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BatchStatus {
    Success { file: String },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEntry {
    pub code: String,
    pub name: String,
    #[serde(flatten)]
    pub status: BatchStatus,
}

impl BatchEntry {
    pub fn is_success(&self) -> bool {
        matches!(self.status, BatchStatus::Success { .. })
    }
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchStatus::Success { file } => write!(f, "ok -> {}", file),
            BatchStatus::Failed { error } => write!(f, "failed: {}", error),
        }
    }
}

/// `index.json`: what a batch run attempted and how each symbol ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchIndex {
    pub source: String,
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub stocks: Vec<BatchEntry>,
}

impl BatchIndex {
    pub fn new(source: impl Into<String>, stocks: Vec<BatchEntry>) -> Self {
        let success = stocks.iter().filter(|e| e.is_success()).count();
        Self {
            source: source.into(),
            total: stocks.len(),
            success,
            failed: stocks.len() - success,
            stocks,
        }
    }

    pub fn failures(&self) -> impl Iterator<Item = &BatchEntry> {
        self.stocks.iter().filter(|e| !e.is_success())
    }
}
