use thiserror::Error;

/// Errors raised while talking to the Gemini API or loading configuration
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Request Error: {0}")]
    Request(String),

    #[error("Response Error: {0}")]
    Response(String),

    #[error("Parsing Error: {0}")]
    Parsing(String),

    #[error("HTTP Error: {status_code} - {message}")]
    Http { status_code: u16, message: String },
}

/// Result type for chat operations
pub type ChatResult<T> = Result<T, ChatError>;
