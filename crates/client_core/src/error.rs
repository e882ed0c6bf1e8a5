use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("failed to reach submission endpoint: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("submission endpoint rejected the order: {0}")]
    Rejected(String),
    #[error("submission endpoint unavailable: {0}")]
    Unavailable(String),
}
