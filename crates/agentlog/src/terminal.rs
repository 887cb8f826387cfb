use is_terminal::IsTerminal;
use terminal_size::{Width, terminal_size};

const FALLBACK_WIDTH: usize = 80;

/// Color decision: `--color`, then `--no-color`, then `NO_COLOR`, then TTY detection
pub fn resolve_color(force: bool, disable: bool) -> bool {
    choose_color(
        force,
        disable,
        std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty()),
        stdout_is_terminal(),
    )
}

fn choose_color(force: bool, disable: bool, no_color_env: bool, tty: bool) -> bool {
    if force {
        return true;
    }
    if disable || no_color_env {
        return false;
    }
    tty
}

pub fn stdout_is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

/// Layout width: `--wrap`, then the terminal, then `COLUMNS`, then 80
pub fn determine_width(wrap: Option<usize>) -> usize {
    let terminal = terminal_size().map(|(Width(w), _)| usize::from(w));
    let columns = std::env::var("COLUMNS").ok();
    choose_width(wrap, terminal, columns.as_deref())
}

fn choose_width(wrap: Option<usize>, terminal: Option<usize>, columns: Option<&str>) -> usize {
    wrap.filter(|w| *w > 0)
        .or(terminal.filter(|w| *w > 0))
        .or_else(|| {
            columns
                .and_then(|value| value.trim().parse::<usize>().ok())
                .filter(|w| *w > 0)
        })
        .unwrap_or(FALLBACK_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choose_color() {
        assert!(choose_color(true, false, true, false));
        assert!(!choose_color(false, true, false, true));
        assert!(!choose_color(false, false, true, true));
        assert!(choose_color(false, false, false, true));
        assert!(!choose_color(false, false, false, false));
    }

    #[test]
    fn test_choose_width() {
        assert_eq!(choose_width(Some(100), Some(120), Some("90")), 100);
        assert_eq!(choose_width(Some(0), Some(120), None), 120);
        assert_eq!(choose_width(None, None, Some(" 90 ")), 90);
        assert_eq!(choose_width(None, None, Some("wide")), 80);
        assert_eq!(choose_width(None, None, None), 80);
    }
}
