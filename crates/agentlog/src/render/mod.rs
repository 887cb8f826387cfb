//! Terminal rendering: width-aware primitives plus the text, chat, list and
//! info layouts built on them.

pub mod blocks;
pub mod chat;
pub mod color;
pub mod info;
pub mod list;
pub mod text;
pub mod width;

pub use chat::render_chat_transcript;
pub use info::{SessionInfo, write_info_text};
pub use list::write_summaries;
pub use text::text_event_lines;
