use std::fmt;

/// Result type for agentlog-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Agent name did not match any supported log family
    UnknownAgent(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownAgent(name) => write!(f, "unknown agent type: {}", name),
        }
    }
}

impl std::error::Error for Error {}
