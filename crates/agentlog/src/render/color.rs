use owo_colors::{OwoColorize, XtermColors};

const USER: u8 = 220;
const ASSISTANT: u8 = 44;
const TOOL: u8 = 207;
pub const TIMESTAMP: u8 = 245;
pub const SEPARATOR: u8 = 240;

/// xterm-256 color for a role or kind label
pub fn role_color(role: &str) -> u8 {
    match role {
        "user" => USER,
        "assistant" => ASSISTANT,
        "tool" | "system" => TOOL,
        _ => SEPARATOR,
    }
}

/// Paint `text` with an xterm-256 color when `enabled`
pub fn paint(text: &str, color: u8, enabled: bool) -> String {
    if enabled {
        format!("{}", text.color(XtermColors::from(color)))
    } else {
        text.to_string()
    }
}

pub fn emphasize(text: &str, enabled: bool) -> String {
    if enabled {
        format!("{}", text.bright_white().bold())
    } else {
        text.to_string()
    }
}
