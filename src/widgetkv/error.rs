use thiserror::Error;

#[derive(Error, Debug)]
pub enum WidgetKvError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Invalid pair kind: {0} (expected 'id' or 'value')")]
    InvalidKind(String),

    #[error("Plugin JSON error: {0}")]
    Plugin(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, WidgetKvError>;
