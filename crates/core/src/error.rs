use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown notice type: {0}")]
    UnknownNoticeType(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
