use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdeaError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No API key configured. Set one with `reels-ideas set-key`, --api-key or OPENAI_API_KEY")]
    MissingCredential,

    #[error("A generation is already in progress")]
    Busy,

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Response parse error: {0}")]
    Parse(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, IdeaError>;
