use thiserror::Error;

/// Canonical result for core.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("array '{field}' has length {actual}, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("node {node} has parent {parent}, outside 0..{len}")]
    ParentOutOfRange { node: usize, parent: i128, len: usize },

    // Children must precede parents for the one-pass size propagation.
    #[error("node {node} has parent {parent}; forest is not in topological order")]
    NotTopological { node: usize, parent: usize },

    #[error("forest has {0} nodes, more than the index type can address")]
    TooManyNodes(usize),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}
