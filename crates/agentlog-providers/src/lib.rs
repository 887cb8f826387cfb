// Error types
pub mod error;

// Parser capability and factory
pub mod registry;
pub mod traits;

// Log family decoders
pub mod claude;
pub mod codex;

// Shared decoding primitives
pub mod content;
pub mod scanner;
pub mod timestamp;

// Session discovery
pub mod store;

pub use claude::ClaudeParser;
pub use codex::CodexParser;
pub use content::{decode_content, summary_text};
pub use error::{Error, Result};
pub use registry::{create_parser, create_parser_by_name};
pub use scanner::{LineScanner, MAX_LINE_BYTES};
pub use store::{
    ListOptions, ListResult, ListWarning, find_session_path, list_sessions, resolve_session_path,
};
pub use timestamp::parse_timestamp;
pub use traits::{EventVisitor, SessionParser};
