use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::{Error, Result};

/// Upper bound for a single JSONL line. Tool outputs embedded in agent logs
/// routinely run to several megabytes.
pub const MAX_LINE_BYTES: usize = 8 * 1024 * 1024;

/// A non-blank line and its 1-based position in the file.
///
/// The bytes are kept as read; UTF-8 validation is left to the decoder so
/// each log family can apply its own malformed-line rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub number: usize,
    pub bytes: Vec<u8>,
}

impl Line {
    pub fn as_str(&self) -> Result<&str> {
        Ok(std::str::from_utf8(&self.bytes)?)
    }
}

/// Forward-only line reader with a hard per-line capacity.
///
/// Blank lines are skipped; line numbers still count them. Exceeding the
/// capacity yields `Error::LineTooLong` and ends the iteration.
pub struct LineScanner<R> {
    reader: R,
    limit: usize,
    line_no: usize,
    buf: Vec<u8>,
    done: bool,
}

impl LineScanner<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> LineScanner<R> {
    pub fn new(reader: R) -> Self {
        Self::with_limit(reader, MAX_LINE_BYTES)
    }

    pub fn with_limit(reader: R, limit: usize) -> Self {
        Self {
            reader,
            limit,
            line_no: 0,
            buf: Vec::new(),
            done: false,
        }
    }

    fn read_line(&mut self) -> Result<Option<Line>> {
        loop {
            self.buf.clear();
            // Read one byte past the limit so an over-long line is detectable
            // without buffering the remainder.
            let read = (&mut self.reader)
                .take(self.limit as u64 + 1)
                .read_until(b'\n', &mut self.buf)?;
            if read == 0 {
                return Ok(None);
            }
            self.line_no += 1;

            if self.buf.last() == Some(&b'\n') {
                self.buf.pop();
                if self.buf.last() == Some(&b'\r') {
                    self.buf.pop();
                }
            }
            if self.buf.len() > self.limit {
                return Err(Error::LineTooLong { limit: self.limit });
            }
            if self.buf.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            return Ok(Some(Line {
                number: self.line_no,
                bytes: std::mem::take(&mut self.buf),
            }));
        }
    }
}

impl<R: BufRead> Iterator for LineScanner<R> {
    type Item = Result<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_line() {
            Ok(Some(line)) => Some(Ok(line)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}
