use thiserror::Error;

#[derive(Error, Debug)]
pub enum FreshetError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to fetch Medium feed for @{username}: {message}")]
    Fetch { username: String, message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FreshetError {
    /// Wrap a transport or parse failure with the username it happened for.
    pub fn fetch(username: &str, message: impl ToString) -> Self {
        Self::Fetch {
            username: username.to_string(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FreshetError>;
