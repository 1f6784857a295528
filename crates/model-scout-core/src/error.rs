#[derive(Debug, thiserror::Error)]
pub enum ScoutError {
    #[cfg(feature = "network")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bad dataset: {0}")]
    Parse(String),

    #[error("invalid {factor} weight {value}: weights must be finite and non-negative")]
    InvalidWeight { factor: &'static str, value: f64 },

    #[error("weights sum to zero, cannot normalize")]
    ZeroWeights,

    #[error("duplicate model name: {0}")]
    DuplicateModel(String),

    #[error("model #{0} has an empty name")]
    EmptyName(usize),

    #[error("IO error: {0}")]
    Io(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ScoutError>;
