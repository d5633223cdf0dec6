use thiserror::Error;

#[derive(Debug, Error)]
pub enum GuardError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no element with id '{0}'")]
    UnknownElement(String),
    #[error("invalid page fixture: {0}")]
    Fixture(String),
}

pub type Result<T> = std::result::Result<T, GuardError>;
