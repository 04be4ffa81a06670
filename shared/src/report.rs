use std::io::{self, BufRead, Write};

use codespan_reporting::term::termcolor::StandardStream;

use crate::{
    config::Config,
    cursor::{Cursor, ErrorCounter},
};

/// Writes one position-stamped line per reported error.
///
/// A line reads `[error N] file F, line L near "T": message`, where each of
/// the file, line and near clauses is dropped when it has nothing to say.
pub struct Reporter<W> {
    stream: W,
    source: Option<String>,
}

impl Reporter<StandardStream> {
    /// A reporter on the configured stream. `source` is only kept when the
    /// configuration asks for the file clause.
    pub fn from_config(config: &Config, source: Option<&str>) -> Self {
        Reporter::configured(config.target.stream(), config, source)
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(stream: W) -> Self {
        Self {
            stream,
            source: None,
        }
    }

    fn configured(stream: W, config: &Config, source: Option<&str>) -> Self {
        let reporter = Reporter::new(stream);
        match source {
            Some(name) if config.file_clause => reporter.with_source(name),
            _ => reporter,
        }
    }

    pub fn with_source(mut self, name: impl Into<String>) -> Self {
        self.source = Some(name.into());
        self
    }

    pub fn report(
        &mut self,
        errors: &ErrorCounter,
        cursor: &Cursor,
        message: impl AsRef<str>,
    ) -> io::Result<()> {
        let mut line = format!("[error {}] ", errors.get()).into_bytes();
        self.stamp(cursor, &mut line);
        line.extend_from_slice(message.as_ref().as_bytes());
        line.push(b'\n');

        self.stream.write_all(&line)?;
        self.stream.flush()
    }

    /// Appends the position clauses and their trailing `": "`, if any.
    fn stamp(&self, cursor: &Cursor, out: &mut Vec<u8>) {
        let mut stamped = false;

        if let Some(name) = self.source.as_deref().and_then(display_name) {
            out.extend_from_slice(b"file ");
            out.extend_from_slice(name);
            stamped = true;
        }

        if cursor.line() > 0 {
            if stamped {
                out.extend_from_slice(b", ");
            }
            out.extend_from_slice(format!("line {}", cursor.line()).as_bytes());
            stamped = true;
        }

        let near = cursor.near_token();
        if !near.is_empty() {
            if stamped {
                out.push(b' ');
            }
            out.extend_from_slice(b"near \"");
            out.extend_from_slice(near);
            out.push(b'"');
            stamped = true;
        }

        if stamped {
            out.extend_from_slice(b": ");
        }
    }

    pub fn into_inner(self) -> W {
        self.stream
    }
}

/// Source names as a setup action may have quoted them: a leading `"` drops
/// the first and last byte. Only an empty name or `""` skips the clause.
fn display_name(name: &str) -> Option<&[u8]> {
    let name = name.as_bytes();
    if name.is_empty() || name == b"\"\"" {
        return None;
    }
    match name.split_first() {
        Some((b'"', rest)) => Some(&rest[..rest.len().saturating_sub(1)]),
        _ => Some(name),
    }
}

/// The parser side of the harness. It is driven exactly once over the opened
/// input and reports each fault through `reporter`; the returned status
/// becomes the process exit status.
pub trait ParseEntry {
    fn parse<W: Write>(
        &mut self,
        input: &mut dyn BufRead,
        reporter: &mut Reporter<W>,
    ) -> io::Result<i32>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(errors: usize, cursor: &Cursor, message: &str) -> String {
        render_with(Reporter::new(Vec::new()), errors, cursor, message)
    }

    fn render_with(
        mut reporter: Reporter<Vec<u8>>,
        errors: usize,
        cursor: &Cursor,
        message: &str,
    ) -> String {
        let mut counter = ErrorCounter::new();
        for _ in 0..errors {
            counter.increment();
        }
        reporter.report(&counter, cursor, message).unwrap();
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn line_and_near_clauses() {
        let output = render(3, &Cursor::at(12, "IF X THEN"), "syntax error");
        assert_eq!(output, "[error 3] line 12 near \"IF X THEN\": syntax error\n");
    }

    #[test]
    fn no_clauses_means_no_punctuation() {
        let output = render(1, &Cursor::at(0, ""), "unexpected end of input");
        assert_eq!(output, "[error 1] unexpected end of input\n");
    }

    #[test]
    fn negative_line_is_unknown() {
        let output = render(2, &Cursor::at(-4, "X"), "bad");
        assert_eq!(output, "[error 2] near \"X\": bad\n");
    }

    #[test]
    fn line_clause_alone() {
        let output = render(5, &Cursor::at(7, "\nPRINT"), "missing operand");
        assert_eq!(output, "[error 5] line 7: missing operand\n");
    }

    #[test]
    fn long_token_is_cut_to_twenty() {
        let output = render(1, &Cursor::at(1, "PRINT \"HELLO, WORLD OF BASIC\""), "m");
        assert_eq!(output, "[error 1] line 1 near \"PRINT \"HELLO, WORLD \": m\n");
    }

    #[test]
    fn token_is_cut_at_line_break() {
        let cursor = Cursor::at(9, "\"ABCD\nEFGHIJKLMNOPQRSTUVWXYZ");
        let output = render(1, &cursor, "unterminated string");
        assert_eq!(output, "[error 1] line 9 near \"\"ABCD\": unterminated string\n");
    }

    #[test]
    fn counter_is_read_not_bumped() {
        let mut reporter = Reporter::new(Vec::new());
        let counter = ErrorCounter::new();
        let cursor = Cursor::at(1, "X");
        reporter.report(&counter, &cursor, "first").unwrap();
        reporter.report(&counter, &cursor, "second").unwrap();
        let output = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(
            output,
            "[error 0] line 1 near \"X\": first\n[error 0] line 1 near \"X\": second\n"
        );
        assert_eq!(counter.get(), 0);
    }

    #[test]
    fn repeated_reports_are_identical() {
        let mut reporter = Reporter::new(Vec::new());
        let mut counter = ErrorCounter::new();
        counter.increment();
        let cursor = Cursor::at(40, "GOSUB 100");
        reporter.report(&counter, &cursor, "unrecognized word").unwrap();
        reporter.report(&counter, &cursor, "unrecognized word").unwrap();
        let output = String::from_utf8(reporter.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], lines[1]);
    }

    #[test]
    fn file_clause_leads() {
        let reporter = Reporter::new(Vec::new()).with_source("prog.bas");
        let output = render_with(reporter, 2, &Cursor::at(4, "X"), "m");
        assert_eq!(output, "[error 2] file prog.bas, line 4 near \"X\": m\n");
    }

    #[test]
    fn file_clause_alone() {
        let reporter = Reporter::new(Vec::new()).with_source("prog.bas");
        let output = render_with(reporter, 1, &Cursor::new(), "m");
        assert_eq!(output, "[error 1] file prog.bas: m\n");
    }

    #[test]
    fn file_clause_then_near() {
        let reporter = Reporter::new(Vec::new()).with_source("prog.bas");
        let output = render_with(reporter, 1, &Cursor::at(0, "@"), "m");
        assert_eq!(output, "[error 1] file prog.bas near \"@\": m\n");
    }

    #[test]
    fn quoted_and_empty_source_names() {
        assert_eq!(display_name("\"prog.bas\""), Some(&b"prog.bas"[..]));
        assert_eq!(display_name("prog.bas"), Some(&b"prog.bas"[..]));
        assert_eq!(display_name("\"\""), None);
        assert_eq!(display_name(""), None);

        let reporter = Reporter::new(Vec::new()).with_source("\"\"");
        let output = render_with(reporter, 1, &Cursor::at(3, ""), "m");
        assert_eq!(output, "[error 1] line 3: m\n");
    }

    #[test]
    fn half_quoted_names_keep_an_empty_clause() {
        assert_eq!(display_name("\"a"), Some(&b""[..]));
        assert_eq!(display_name("\""), Some(&b""[..]));

        let reporter = Reporter::new(Vec::new()).with_source("\"a");
        let output = render_with(reporter, 1, &Cursor::at(3, ""), "m");
        assert_eq!(output, "[error 1] file , line 3: m\n");

        let reporter = Reporter::new(Vec::new()).with_source("\"");
        let output = render_with(reporter, 1, &Cursor::new(), "m");
        assert_eq!(output, "[error 1] file : m\n");
    }

    #[test]
    fn raw_bytes_are_not_escaped() {
        let mut reporter = Reporter::new(Vec::new());
        let counter = ErrorCounter::new();
        let cursor = Cursor::at(1, vec![b'A', 0xff, b'B']);
        reporter.report(&counter, &cursor, "m").unwrap();
        assert_eq!(
            reporter.into_inner(),
            b"[error 0] line 1 near \"A\xffB\": m\n".to_vec()
        );
    }

    #[test]
    fn config_controls_source() {
        let on = Config {
            file_clause: true,
            ..Config::default()
        };
        let with = Reporter::configured(Vec::new(), &on, Some("a.bas"));
        let output = render_with(with, 1, &Cursor::at(2, ""), "m");
        assert_eq!(output, "[error 1] file a.bas, line 2: m\n");

        let without = Reporter::configured(Vec::new(), &Config::default(), Some("a.bas"));
        let output = render_with(without, 1, &Cursor::at(2, ""), "m");
        assert_eq!(output, "[error 1] line 2: m\n");
    }
}
