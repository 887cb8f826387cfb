use std::fmt;

/// Invalid command-line input, detected before any session file is read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    /// A filter list contained a token that is not valid for the agent
    UnknownToken {
        category: &'static str,
        token: String,
    },
    /// Two options that cannot be used together
    MutuallyExclusive(&'static str, &'static str),
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsageError::UnknownToken { category, token } => {
                write!(f, "unknown {} {:?}", category, token)
            }
            UsageError::MutuallyExclusive(a, b) => {
                write!(f, "{} cannot be combined with {}", a, b)
            }
        }
    }
}

impl std::error::Error for UsageError {}
