mod parser;
mod schema;

pub use self::parser::ClaudeParser;
