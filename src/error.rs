use thiserror::Error;

/// Failure of a single analysis call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Input could not be decoded or its markup was rejected.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// The scoring oracle produced a value outside its contract.
    #[error("Scoring failed: {0}")]
    Scoring(String),
}

impl AnalysisError {
    /// Short stable name for logs and JSON output
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::MalformedInput(_) => "malformed_input",
            AnalysisError::Scoring(_) => "scoring",
        }
    }
}

impl From<std::str::Utf8Error> for AnalysisError {
    fn from(err: std::str::Utf8Error) -> Self {
        AnalysisError::MalformedInput(format!("invalid UTF-8: {err}"))
    }
}
