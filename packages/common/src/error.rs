use pagecraft_parser::ParseError;
use thiserror::Error;

/// Common error type that can hold any engine error
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

impl From<String> for EngineError {
    fn from(s: String) -> Self {
        EngineError::Generic(s)
    }
}

impl From<&str> for EngineError {
    fn from(s: &str) -> Self {
        EngineError::Generic(s.to_string())
    }
}
