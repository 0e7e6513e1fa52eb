//! Forward-only scanner over the configuration text.
//!
//! The scanner never holds more than the single byte of lookahead that the
//! underlying [`BufRead`] buffer already exposes; consumed input is gone.

use std::io::{BufRead, ErrorKind};

use crate::error::{DakotaError, Result};

/// Byte-level scanner with one byte of lookahead.
pub struct Scanner<R> {
    input: R,
    line: usize,
    /// No non-blank byte consumed since the last line break
    line_start: bool,
}

impl<R: BufRead> Scanner<R> {
    /// Create a new scanner for the given input.
    pub fn new(input: R) -> Self {
        Self {
            input,
            line: 1,
            line_start: true,
        }
    }

    /// Line number of the lookahead byte (1-indexed).
    pub fn line(&self) -> usize {
        self.line
    }

    /// Skip whitespace (newlines included) and return the next byte
    /// without consuming it, or `None` at end of stream.
    pub fn peek_non_space(&mut self) -> Result<Option<u8>> {
        while let Some(ch) = self.peek()? {
            if !ch.is_ascii_whitespace() {
                return Ok(Some(ch));
            }
            self.advance()?;
        }
        Ok(None)
    }

    /// Skip `#` comment lines and report whether another top-level entry
    /// follows.
    pub fn at_new_entry(&mut self) -> Result<bool> {
        Ok(self.skip_comments(false)?.is_some())
    }

    /// Report whether another body record follows, i.e. the lookahead is
    /// neither end of stream nor the `.` that starts the next verb.
    ///
    /// Inside a block only a `#` that starts a line is a comment; one that
    /// trails a record is left for the caller to reject.
    pub fn has_record(&mut self) -> Result<bool> {
        Ok(!matches!(self.skip_comments(true)?, None | Some(b'.')))
    }

    /// Read the next whitespace-delimited token, crossing line breaks.
    pub fn token(&mut self) -> Result<Option<String>> {
        if self.peek_non_space()?.is_none() {
            return Ok(None);
        }
        self.read_word().map(Some)
    }

    /// Read the next token on the current line.
    ///
    /// Returns `None` when only blanks remain before the line break.
    pub fn inline_token(&mut self) -> Result<Option<String>> {
        match self.skip_blanks()? {
            None | Some(b'\n') => Ok(None),
            Some(_) => self.read_word().map(Some),
        }
    }

    /// Read the remainder of the current line, without leading blanks or
    /// the line terminator. Returns `None` if nothing is left.
    pub fn rest_of_line(&mut self) -> Result<Option<String>> {
        let line = self.line;
        self.skip_blanks()?;

        let mut text = Vec::new();
        while let Some(ch) = self.peek()? {
            if ch == b'\n' {
                break;
            }
            text.push(ch);
            self.advance()?;
        }
        while text.last().is_some_and(u8::is_ascii_whitespace) {
            text.pop();
        }

        if text.is_empty() {
            return Ok(None);
        }
        String::from_utf8(text)
            .map(Some)
            .map_err(|_| DakotaError::InvalidText { line })
    }

    fn skip_comments(&mut self, line_start_only: bool) -> Result<Option<u8>> {
        loop {
            match self.peek_non_space()? {
                Some(b'#') if self.line_start || !line_start_only => self.skip_line()?,
                la => return Ok(la),
            }
        }
    }

    fn skip_blanks(&mut self) -> Result<Option<u8>> {
        while let Some(ch) = self.peek()? {
            if !matches!(ch, b' ' | b'\t' | b'\r') {
                return Ok(Some(ch));
            }
            self.advance()?;
        }
        Ok(None)
    }

    fn skip_line(&mut self) -> Result<()> {
        while let Some(ch) = self.advance()? {
            if ch == b'\n' {
                break;
            }
        }
        Ok(())
    }

    fn read_word(&mut self) -> Result<String> {
        let line = self.line;
        let mut text = Vec::new();
        while let Some(ch) = self.peek()? {
            if ch.is_ascii_whitespace() {
                break;
            }
            text.push(ch);
            self.advance()?;
        }
        String::from_utf8(text).map_err(|_| DakotaError::InvalidText { line })
    }

    fn peek(&mut self) -> Result<Option<u8>> {
        loop {
            match self.input.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn advance(&mut self) -> Result<Option<u8>> {
        let ch = self.peek()?;
        if let Some(ch) = ch {
            self.input.consume(1);
            if ch == b'\n' {
                self.line += 1;
                self.line_start = true;
            } else if !ch.is_ascii_whitespace() {
                self.line_start = false;
            }
        }
        Ok(ch)
    }
}
