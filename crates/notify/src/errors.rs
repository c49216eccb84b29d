use thiserror::Error;

pub type Result<T> = std::result::Result<T, NotifyError>;

#[derive(Error, Debug)]
pub enum NotifyError {
    /// A required notification field is missing or empty.
    #[error("{0}")]
    Validation(String),

    /// The gateway could not be used (bad URL, unreadable response).
    #[error("Push gateway error: {0}")]
    Gateway(String),

    /// The gateway could not be reached.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
