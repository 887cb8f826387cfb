use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// SGR color sequences as emitted by the renderers
static ANSI_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("valid ANSI pattern"));

pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    ANSI_ESCAPE.replace_all(text, "")
}

/// Terminal columns occupied by `text`, ignoring color escapes
pub fn visible_width(text: &str) -> usize {
    strip_ansi(text).width()
}

fn char_width(ch: char) -> usize {
    ch.width().unwrap_or(0)
}

/// Cut `text` down to `width` visible columns.
///
/// Escape sequences are kept verbatim wherever they occur, including after
/// the cut, so a trailing reset still closes any open color. Text that
/// already fits is returned unchanged.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if visible_width(text) <= width {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut current = 0;
    let mut full = false;
    let mut last = 0;

    let mut keep_visible = |segment: &str, out: &mut String| {
        for ch in segment.chars() {
            if full {
                break;
            }
            let w = char_width(ch);
            if current + w > width {
                full = true;
                break;
            }
            out.push(ch);
            current += w;
        }
    };

    for escape in ANSI_ESCAPE.find_iter(text) {
        keep_visible(&text[last..escape.start()], &mut out);
        out.push_str(escape.as_str());
        last = escape.end();
    }
    keep_visible(&text[last..], &mut out);

    out
}

/// Break `text` into lines no wider than `width` display columns.
///
/// Breaks fall on spaces; the space at a break is dropped. A word wider than
/// the limit is hard-broken between characters. Leading indentation stays on
/// the first line, clamped to `width - 1` and narrowed further when the first
/// word would not fit beside it. Trailing spaces are trimmed. A glyph wider
/// than `width` gets a line of its own. `width == 0` disables wrapping.
/// Input is expected to be free of color escapes.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    let text = text.trim_end_matches(' ');
    if text.is_empty() {
        return vec![String::new()];
    }

    let body = text.trim_start_matches(' ');
    let indent = (text.len() - body.len()).min(width - 1);

    let mut lines = Vec::new();
    let mut line = " ".repeat(indent);
    let mut line_width = indent;
    // Whether `line` holds anything besides the indentation
    let mut has_content = false;
    // Set right after a break: separator spaces are not carried over.
    let mut at_break = false;

    for (idx, word) in body.split(' ').enumerate() {
        let word_width = word.width();
        let sep_width = usize::from(idx > 0 && !at_break);

        if line_width + sep_width + word_width <= width {
            if sep_width == 1 {
                line.push(' ');
            }
            line.push_str(word);
            line_width += sep_width + word_width;
            has_content |= !word.is_empty();
            at_break = false;
            continue;
        }

        if has_content {
            lines.push(line.trim_end_matches(' ').to_string());
            line.clear();
            line_width = 0;
            has_content = false;
            at_break = true;
        }

        if word.is_empty() {
            continue;
        }

        if word_width <= width {
            // Only indentation can be left on the line here
            if line_width + word_width > width {
                line.truncate(width - word_width);
                line_width = line.len();
            }
            line.push_str(word);
            line_width += word_width;
        } else {
            for ch in word.chars() {
                let w = char_width(ch);
                if line_width + w > width {
                    if has_content {
                        lines.push(std::mem::take(&mut line));
                        line_width = 0;
                    } else {
                        line.truncate(width.saturating_sub(w));
                        line_width = line.len();
                    }
                }
                line.push(ch);
                line_width += w;
                has_content = true;
            }
        }
        has_content = true;
        at_break = false;
    }

    if has_content || lines.is_empty() {
        lines.push(line);
    }
    lines
}

/// Wrap every line independently, preserving blank lines
pub fn wrap_lines<S: AsRef<str>>(lines: &[S], width: usize) -> Vec<String> {
    lines
        .iter()
        .flat_map(|line| wrap_text(line.as_ref(), width))
        .collect()
}

/// Widest visible line
pub fn max_visible_width<S: AsRef<str>>(lines: &[S]) -> usize {
    lines
        .iter()
        .map(|line| visible_width(line.as_ref()))
        .max()
        .unwrap_or(0)
}
