use thiserror::Error;

/// Failures surfaced to callers of the analysis entry points.
///
/// Malformed model output is not an error: assemblers fall back to defaults.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("no content in response")]
    NoContent,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}
