/// Longest token prefix quoted in a diagnostic.
pub const NEAR_LIMIT: usize = 20;

/// Running count of reported errors. It only ever grows during a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCounter(usize);

impl ErrorCounter {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn increment(&mut self) -> usize {
        self.0 += 1;
        self.0
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

/// Where the scanner currently is: the input line and the text of the token
/// under the cursor.
///
/// A line of zero or below means the position is unknown. The token text is
/// raw bytes and may run past the end of the line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Cursor {
    line: i64,
    text: Vec<u8>,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(line: i64, text: impl Into<Vec<u8>>) -> Self {
        Self {
            line,
            text: text.into(),
        }
    }

    pub fn line(&self) -> i64 {
        self.line
    }

    pub fn next_line(&mut self) -> i64 {
        self.line += 1;
        self.line
    }

    pub fn set_text(&mut self, text: impl Into<Vec<u8>>) {
        self.text = text.into();
    }

    pub fn clear_text(&mut self) {
        self.text.clear();
    }

    /// The part of the token text that may be quoted: everything before the
    /// first NUL or line break, capped at [`NEAR_LIMIT`] bytes.
    pub fn near_token(&self) -> &[u8] {
        let end = self
            .text
            .iter()
            .take(NEAR_LIMIT)
            .position(|&byte| byte == 0 || byte == b'\n')
            .unwrap_or_else(|| self.text.len().min(NEAR_LIMIT));
        &self.text[..end]
    }
}
