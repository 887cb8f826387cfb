use serde::{Deserialize, Serialize};

/// Well-known values of [`ContentBlock::block_type`].
pub mod block_type {
    pub const TEXT: &str = "text";
    pub const INPUT_TEXT: &str = "input_text";
    pub const OUTPUT_TEXT: &str = "output_text";
    pub const SUMMARY_TEXT: &str = "summary_text";
    pub const JSON: &str = "json";
    pub const ID: &str = "id";
    pub const FUNCTION_NAME: &str = "function_name";
    pub const FUNCTION_ARGUMENTS: &str = "function_arguments";
    pub const FUNCTION_OUTPUT: &str = "function_output";
    pub const TOOL_USE: &str = "tool_use";
    pub const TOOL_RESULT: &str = "tool_result";
    pub const THINKING: &str = "thinking";
    pub const IMAGE: &str = "image";
}

/// A flattened, renderable fragment of a message.
///
/// Blocks of one event keep the order they had in the source record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: String,
}

impl ContentBlock {
    pub fn new(block_type: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            block_type: block_type.into(),
            text: text.into(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(block_type::TEXT, text)
    }

    /// Raw JSON kept verbatim; pretty-printing happens at render time.
    pub fn json(raw: impl Into<String>) -> Self {
        Self::new(block_type::JSON, raw)
    }

    /// True for blocks whose text is prose (not tool plumbing or JSON)
    pub fn is_textual(&self) -> bool {
        matches!(
            self.block_type.as_str(),
            block_type::TEXT
                | block_type::INPUT_TEXT
                | block_type::OUTPUT_TEXT
                | block_type::SUMMARY_TEXT
        )
    }
}
