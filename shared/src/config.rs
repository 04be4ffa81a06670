use std::env;

use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use tracing::warn;

pub const DIAGNOSTICS_VAR: &str = "SUBMINBAS_DIAGNOSTICS";
pub const FILE_CLAUSE_VAR: &str = "SUBMINBAS_FILE_CLAUSE";

/// Stream that receives diagnostic lines.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticTarget {
    /// Diagnostics are ordinary program output, so build tooling captures
    /// them together with everything else.
    #[default]
    Stdout,
    Stderr,
}

impl DiagnosticTarget {
    pub fn stream(self) -> StandardStream {
        match self {
            DiagnosticTarget::Stdout => StandardStream::stdout(ColorChoice::Never),
            DiagnosticTarget::Stderr => StandardStream::stderr(ColorChoice::Never),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Config {
    pub target: DiagnosticTarget,
    /// Prefix diagnostics with the source file name.
    pub file_clause: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a configuration from named settings. Values that cannot be
    /// understood leave the default in place.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(value) = lookup(DIAGNOSTICS_VAR) {
            match value.trim().to_ascii_lowercase().as_str() {
                "stdout" => config.target = DiagnosticTarget::Stdout,
                "stderr" => config.target = DiagnosticTarget::Stderr,
                other => warn!(
                    variable = DIAGNOSTICS_VAR,
                    value = other,
                    "ignoring unknown diagnostic stream"
                ),
            }
        }

        if let Some(value) = lookup(FILE_CLAUSE_VAR) {
            match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => config.file_clause = true,
                "0" | "false" | "no" | "off" | "" => config.file_clause = false,
                other => warn!(
                    variable = FILE_CLAUSE_VAR,
                    value = other,
                    "ignoring unknown switch value"
                ),
            }
        }

        config
    }
}
