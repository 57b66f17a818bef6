//! Debugging feature flags.

#[allow(dead_code)]
pub struct LogFlags {
    /// Per-detector counts for every pipeline run.
    pub log_pipeline: bool,

    /// Request parameters and row counts for every history fetch.
    pub log_provider: bool,

    /// Per-symbol progress inside the batch runner.
    pub log_batch: bool,

    /// Every file the results repository writes.
    pub log_results_repo: bool,

    /// Activate trace_time macro (for cool scope-level timing)
    pub log_performance: bool,
}

pub const DF: LogFlags = LogFlags {
    log_pipeline: false,
    log_provider: true,
    log_batch: true,
    log_results_repo: false,
    log_performance: false,
};
