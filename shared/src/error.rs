use std::io;

use thiserror::Error;

/// Failures that end a run before or outside the parse pass.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("usage: {program} [source]")]
    Usage { program: String },

    #[error("{path}: {}", system_message(.source))]
    Open { path: String, source: io::Error },

    /// The diagnostic stream could not be written.
    #[error("{program}: {}", system_message(.source))]
    Report { program: String, source: io::Error },
}

pub type HarnessResult<T = ()> = Result<T, HarnessError>;

/// The operating system's text for `error`, without the ` (os error N)`
/// suffix the standard library appends.
fn system_message(error: &io::Error) -> String {
    let message = error.to_string();
    match error.raw_os_error() {
        Some(code) => message
            .strip_suffix(&format!(" (os error {code})"))
            .map(str::to_string)
            .unwrap_or(message),
        None => message,
    }
}
