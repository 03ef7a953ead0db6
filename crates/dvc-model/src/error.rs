use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown layer type: {0} (expected show or hide)")]
    UnknownLayerMode(String),
    #[error("unknown filter type: {0} (expected type, pattern or selection)")]
    UnknownFilterKind(String),
    #[error("unknown value {value:?} for option {option}")]
    UnknownOption { option: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
