use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Response body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Translation service returned status {status}: {detail}")]
    ServiceStatus { status: u16, detail: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid configuration value for {field} ('{value}'): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, TranslationError>;
