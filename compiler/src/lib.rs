use std::io::{self, BufRead, Write};

use scanner::{Scanner, Token};
use shared::{
    cursor::{Cursor, ErrorCounter},
    report::{ParseEntry, Reporter},
};
use tracing::{debug, trace};

pub mod scanner;

/// Scan-only pass over the terminal catalog.
///
/// Every token of the input is recognized and every lexical fault is reported
/// with the cursor on the offending text. The pass fails with status 1 when
/// anything was reported.
#[derive(Debug, Default)]
pub struct TokenPass {
    errors: ErrorCounter,
    cursor: Cursor,
    tokens: usize,
}

impl TokenPass {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> &ErrorCounter {
        &self.errors
    }

    pub fn tokens(&self) -> usize {
        self.tokens
    }

    fn scan_line<W: Write>(&mut self, line: &[u8], reporter: &mut Reporter<W>) -> io::Result<()> {
        let mut scanner = Scanner::new(line);
        loop {
            match scanner.scan() {
                Ok((Token::EndOfLine, _)) => return Ok(()),
                Ok((token, span)) => {
                    self.cursor.set_text(&line[span]);
                    self.tokens += 1;
                    trace!(line = self.cursor.line(), ?token, "scanned");
                }
                Err(error) => {
                    self.cursor.set_text(&line[error.span]);
                    self.errors.increment();
                    reporter.report(&self.errors, &self.cursor, error.message)?;
                }
            }
        }
    }
}

impl ParseEntry for TokenPass {
    fn parse<W: Write>(
        &mut self,
        input: &mut dyn BufRead,
        reporter: &mut Reporter<W>,
    ) -> io::Result<i32> {
        let mut buffer = Vec::new();
        loop {
            buffer.clear();
            if input.read_until(b'\n', &mut buffer)? == 0 {
                break;
            }
            self.cursor.next_line();
            self.scan_line(&buffer, reporter)?;
        }
        self.cursor.clear_text();

        debug!(
            lines = self.cursor.line(),
            tokens = self.tokens,
            errors = self.errors.get(),
            "token pass finished"
        );
        Ok(if self.errors.get() == 0 { 0 } else { 1 })
    }
}
