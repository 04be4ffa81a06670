use std::ops::Range;

use shared::token::Terminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Terminal(Terminal),
    // Single character tokens the grammar matches literally.
    Char(char),
    EndOfLine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanError {
    pub message: &'static str,
    pub span: Range<usize>,
}

/// Scans one input line, line break included. The line is raw bytes; only
/// ASCII is meaningful to the grammar.
pub struct Scanner<'a> {
    source: &'a [u8],
    start: usize,
    current: usize,
    line_start: bool,
    in_remark: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a [u8]) -> Self {
        Self {
            source,
            start: 0,
            current: 0,
            line_start: true,
            in_remark: false,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.current >= self.source.len()
    }

    pub fn scan(&mut self) -> Result<(Token, Range<usize>), ScanError> {
        macro_rules! positioned {
            ($e:expr) => {
                Ok(($e, self.start..self.current))
            };
        }

        if self.in_remark {
            self.in_remark = false;
            return Ok(self.scan_remark());
        }

        self.skip_whitespace();
        self.start = self.current;
        let line_start = std::mem::replace(&mut self.line_start, false);

        let Some(prefix) = self.advance() else {
            return positioned!(Token::EndOfLine);
        };
        match prefix {
            b'+' | b'-' | b'*' | b'/' | b'^' | b'(' | b')' | b'=' | b',' | b';' => {
                positioned!(Token::Char(prefix as char))
            }

            b'<' if self.try_consume(b'=') => positioned!(Token::Terminal(Terminal::LessEqual)),
            b'<' if self.try_consume(b'>') => positioned!(Token::Terminal(Terminal::NotEqual)),
            b'>' if self.try_consume(b'=') => positioned!(Token::Terminal(Terminal::GreaterEqual)),
            b'<' | b'>' => positioned!(Token::Char(prefix as char)),

            b'"' => self.scan_string(),
            c if c.is_ascii_digit() => Ok(self.scan_number(line_start)),
            b'.' if self.peek().is_some_and(|c| c.is_ascii_digit()) => {
                Ok(self.scan_number(false))
            }
            c if c.is_ascii_alphabetic() => self.scan_word(),

            _ => Err(self.scan_unexpected(prefix)),
        }
    }

    // A multi-byte UTF-8 character is one fault, not one per byte.
    fn scan_unexpected(&mut self, prefix: u8) -> ScanError {
        if prefix >= 0xc0 {
            while self.peek().is_some_and(|c| (0x80..0xc0).contains(&c)) {
                self.advance();
            }
        }
        ScanError {
            message: "unexpected character",
            span: self.start..self.current,
        }
    }

    fn scan_word(&mut self) -> Result<(Token, Range<usize>), ScanError> {
        while self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            self.advance();
        }
        let source = self.source;
        let word = &source[self.start..self.current];

        if let Some(keyword) = std::str::from_utf8(word).ok().and_then(Terminal::keyword) {
            if keyword == Terminal::Rem {
                self.in_remark = true;
            }
            return Ok((Token::Terminal(keyword), self.start..self.current));
        }
        if word.len() == 1 {
            if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
            return Ok((Token::Terminal(Terminal::NumIdentifier), self.start..self.current));
        }
        Err(ScanError {
            message: "unrecognized word",
            span: self.start..self.current,
        })
    }

    // A leading integer is the statement's line number.
    fn scan_number(&mut self, line_start: bool) -> (Token, Range<usize>) {
        let mut integer = self.source[self.start] != b'.';
        self.consume_digits();

        if integer && self.peek() == Some(b'.') {
            integer = false;
            self.advance();
            self.consume_digits();
        }

        if let Some(b'E' | b'e') = self.peek() {
            let digits_at = match self.peek_at(1) {
                Some(b'+' | b'-') => 2,
                _ => 1,
            };
            if self.peek_at(digits_at).is_some_and(|c| c.is_ascii_digit()) {
                integer = false;
                self.current += digits_at;
                self.consume_digits();
            }
        }

        let terminal = if line_start && integer {
            Terminal::LineNumber
        } else {
            Terminal::NumConstant
        };
        (Token::Terminal(terminal), self.start..self.current)
    }

    fn scan_string(&mut self) -> Result<(Token, Range<usize>), ScanError> {
        while let Some(character) = self.advance() {
            match character {
                b'"' => {
                    return Ok((Token::Terminal(Terminal::QuotedString), self.start..self.current))
                }
                b'\n' => break,
                _ => {}
            }
        }
        // The reported text runs to the end of the line.
        self.current = self.source.len();
        Err(ScanError {
            message: "unterminated string",
            span: self.start..self.current,
        })
    }

    fn scan_remark(&mut self) -> (Token, Range<usize>) {
        self.start = self.current;
        while self.peek().is_some_and(|c| c != b'\n') {
            self.advance();
        }
        (Token::Terminal(Terminal::RemarkString), self.start..self.current)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.advance();
        }
    }

    fn consume_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn peek(&self) -> Option<u8> {
        self.peek_at(0)
    }

    fn peek_at(&self, distance: usize) -> Option<u8> {
        self.source.get(self.current + distance).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        if self.is_eof() {
            return None;
        }
        self.current += 1;
        Some(self.source[self.current - 1])
    }

    fn try_consume(&mut self, expect: u8) -> bool {
        if self.peek() == Some(expect) {
            self.advance();
            return true;
        }
        false
    }
}
