use thiserror::Error;

/// Failures of a whole save or load pass. Per-store problems (orphan
/// snapshots, variables missing from a changed schema) are reported through
/// the restore outcome and the log, not here; by contract they never abort
/// the rest of the graph.
#[derive(Debug, Error)]
pub enum SaveError {
    /// Fatal to `load_all`: the remaining saved sequence is abandoned and
    /// the container stays in the documented partial state.
    #[error("unknown template reference `{reference}`")]
    TemplateResolution { reference: String },

    #[error("corrupt save data: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
