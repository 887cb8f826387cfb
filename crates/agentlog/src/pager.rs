use anyhow::{Context, Result, bail};
use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::thread;
use tracing::debug;

/// External program the chat transcript is piped through
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pager {
    /// User-supplied command line, run through `sh -c`
    Shell(String),
    /// `less`, with `-R` so color escapes pass through
    Less { raw_control: bool },
}

impl Pager {
    /// `PAGER` wins over the configured pager; `less` is the fallback
    pub fn resolve(env_pager: Option<String>, configured: Option<&str>, color: bool) -> Self {
        env_pager
            .filter(|cmd| !cmd.trim().is_empty())
            .or_else(|| {
                configured
                    .filter(|cmd| !cmd.trim().is_empty())
                    .map(str::to_string)
            })
            .map(Pager::Shell)
            .unwrap_or(Pager::Less { raw_control: color })
    }

    pub fn from_env(configured: Option<&str>, color: bool) -> Self {
        Self::resolve(std::env::var("PAGER").ok(), configured, color)
    }

    fn command(&self) -> Command {
        match self {
            Pager::Shell(cmd) => {
                let mut command = Command::new("sh");
                command.arg("-c").arg(cmd);
                command
            }
            Pager::Less { raw_control } => {
                let mut command = Command::new("less");
                if *raw_control {
                    command.arg("-R");
                }
                command
            }
        }
    }
}

/// Feed `lines` to the pager and block until it exits.
///
/// The text is written from a separate thread while this one waits on the
/// child, so a pager that reads lazily never deadlocks against a full pipe.
pub fn page_lines(lines: &[String], pager: &Pager) -> Result<()> {
    let mut text = lines.join("\n");
    if !text.ends_with('\n') {
        text.push('\n');
    }

    debug!(?pager, "starting pager");
    let mut child = pager
        .command()
        .stdin(Stdio::piped())
        .spawn()
        .with_context(|| format!("run pager {:?}", pager))?;

    let mut stdin = child.stdin.take().context("pager stdin unavailable")?;
    let writer = thread::spawn(move || -> io::Result<()> {
        stdin.write_all(text.as_bytes())?;
        stdin.flush()
    });

    let status = child.wait().context("wait for pager")?;

    match writer.join() {
        Ok(Ok(())) => {}
        // The user quit before reading everything
        Ok(Err(err)) if err.kind() == io::ErrorKind::BrokenPipe => {}
        Ok(Err(err)) => return Err(err).context("write to pager"),
        Err(_) => bail!("pager writer thread panicked"),
    }

    if !status.success() {
        bail!("pager exited with {}", status);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_precedence() {
        assert_eq!(
            Pager::resolve(Some("most".to_string()), Some("less -S"), true),
            Pager::Shell("most".to_string())
        );
        assert_eq!(
            Pager::resolve(None, Some("less -S"), true),
            Pager::Shell("less -S".to_string())
        );
        assert_eq!(
            Pager::resolve(Some("  ".to_string()), None, true),
            Pager::Less { raw_control: true }
        );
        assert_eq!(
            Pager::resolve(None, None, false),
            Pager::Less { raw_control: false }
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_page_lines_writes_everything() {
        let dir = tempfile::TempDir::new().unwrap();
        let target = dir.path().join("paged.txt");
        let pager = Pager::Shell(format!("cat > '{}'", target.display()));

        let lines = vec!["first".to_string(), "second".to_string()];
        page_lines(&lines, &pager).unwrap();

        assert_eq!(std::fs::read_to_string(&target).unwrap(), "first\nsecond\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_pager_is_an_error() {
        let pager = Pager::Shell("exit 3".to_string());
        let err = page_lines(&["x".to_string()], &pager).unwrap_err();
        assert!(err.to_string().contains("pager exited"));
    }
}
