use std::fmt;
use std::path::PathBuf;

/// Result type for agentlog-providers operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading session logs
#[derive(Debug)]
pub enum Error {
    /// Opening a session file failed
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// IO operation failed mid-scan
    Io(std::io::Error),

    /// JSON parsing failed
    Json(serde_json::Error),

    /// Line bytes are not UTF-8
    Utf8(std::str::Utf8Error),

    /// Walkdir error
    WalkDir(walkdir::Error),

    /// Timestamp matched none of the accepted layouts
    Timestamp(String),

    /// Record was well-formed JSON but semantically unusable
    Parse(String),

    /// No record in the file carried session metadata
    SessionMetaNotFound,

    /// A single line exceeded the scanner's capacity
    LineTooLong { limit: usize },

    /// Error raised while decoding a specific line
    AtLine { line: usize, source: Box<Error> },

    /// Unknown agent name
    Agent(agentlog_types::Error),

    /// No session matched the identifier
    SessionNotFound { id: String, root: PathBuf },

    /// Identifier is a prefix of more than one session
    AmbiguousSession { id: String, matches: Vec<String> },
}

impl Error {
    /// Attach a 1-based line number
    pub fn at_line(self, line: usize) -> Self {
        match self {
            already @ Error::AtLine { .. } => already,
            other => Error::AtLine {
                line,
                source: Box::new(other),
            },
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Open { path, source } => {
                write!(f, "open session file {}: {}", path.display(), source)
            }
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Json(err) => write!(f, "JSON error: {}", err),
            Error::Utf8(err) => write!(f, "invalid UTF-8: {}", err),
            Error::WalkDir(err) => write!(f, "Directory traversal error: {}", err),
            Error::Timestamp(value) => write!(f, "invalid timestamp {:?}", value),
            Error::Parse(msg) => write!(f, "Parse error: {}", msg),
            Error::SessionMetaNotFound => write!(f, "session metadata not found"),
            Error::LineTooLong { limit } => {
                write!(f, "line exceeds maximum length of {} bytes", limit)
            }
            Error::AtLine { line, source } => write!(f, "line {}: {}", line, source),
            Error::Agent(err) => write!(f, "{}", err),
            Error::SessionNotFound { id, root } => {
                write!(f, "session {:?} not found under {}", id, root.display())
            }
            Error::AmbiguousSession { id, matches } => {
                write!(
                    f,
                    "session id {:?} is ambiguous; matches: {}",
                    id,
                    matches.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Open { source, .. } => Some(source),
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::Utf8(err) => Some(err),
            Error::WalkDir(err) => Some(err),
            Error::AtLine { source, .. } => Some(source.as_ref()),
            Error::Agent(err) => Some(err),
            Error::Timestamp(_)
            | Error::Parse(_)
            | Error::SessionMetaNotFound
            | Error::LineTooLong { .. }
            | Error::SessionNotFound { .. }
            | Error::AmbiguousSession { .. } => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::Utf8(err)
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDir(err)
    }
}

impl From<agentlog_types::Error> for Error {
    fn from(err: agentlog_types::Error) -> Self {
        Error::Agent(err)
    }
}
