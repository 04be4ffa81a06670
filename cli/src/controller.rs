use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use shared::{
    config::Config,
    error::{HarnessError, HarnessResult},
    report::{ParseEntry, Reporter},
};
use tracing::debug;

const DEFAULT_PROGRAM: &str = "subminbas";

/// What a recognized flag does to the invocation.
type FlagEffect = fn(&mut Invocation);

/// Flags accepted ahead of the source argument, keyed by the character after
/// the `-`. None are defined yet.
const FLAGS: &[(char, FlagEffect)] = &[];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub source: Option<PathBuf>,
}

/// Splits `program [flags] [source]`. Flags must come first and at most one
/// positional argument may follow them.
pub fn parse_args(args: impl IntoIterator<Item = String>) -> HarnessResult<Invocation> {
    let mut args = args.into_iter().peekable();
    let mut invocation = Invocation {
        program: args.next().unwrap_or_else(|| DEFAULT_PROGRAM.to_string()),
        source: None,
    };
    let usage = |invocation: &Invocation| HarnessError::Usage {
        program: invocation.program.clone(),
    };

    while let Some(flag) = args.next_if(|arg| arg.starts_with('-')) {
        let effect = flag[1..]
            .chars()
            .next()
            .and_then(|name| FLAGS.iter().find(|(known, _)| *known == name))
            .map(|(_, effect)| *effect);
        match effect {
            Some(effect) => effect(&mut invocation),
            None => return Err(usage(&invocation)),
        }
    }

    match (args.next(), args.next()) {
        (None, _) => {}
        (Some(source), None) => invocation.source = Some(PathBuf::from(source)),
        (Some(_), Some(_)) => return Err(usage(&invocation)),
    }
    Ok(invocation)
}

/// The opened input of the single parse pass.
pub struct InputSource {
    name: Option<String>,
    reader: Box<dyn BufRead>,
}

impl InputSource {
    pub fn stdin() -> Self {
        Self {
            name: None,
            reader: Box::new(io::stdin().lock()),
        }
    }

    pub fn open(path: &Path) -> HarnessResult<Self> {
        let name = path.to_string_lossy().into_owned();
        let file = File::open(path).map_err(|source| HarnessError::Open {
            path: name.clone(),
            source,
        })?;
        Ok(Self {
            name: Some(name),
            reader: Box::new(BufReader::new(file)),
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn reader(&mut self) -> &mut dyn BufRead {
        self.reader.as_mut()
    }
}

/// Parses the arguments, opens the input and drives `parser` over it once.
/// Returns the parser's status untouched.
pub fn run<P: ParseEntry>(
    args: impl IntoIterator<Item = String>,
    config: &Config,
    parser: &mut P,
) -> HarnessResult<i32> {
    let invocation = parse_args(args)?;
    let mut input = match &invocation.source {
        Some(path) => InputSource::open(path)?,
        None => InputSource::stdin(),
    };
    debug!(source = input.name().unwrap_or("<stdin>"), "input opened");

    let mut reporter = Reporter::from_config(config, input.name());
    let status = parser
        .parse(input.reader(), &mut reporter)
        .map_err(|source| HarnessError::Report {
            program: invocation.program.clone(),
            source,
        })?;
    debug!(status, "parse pass finished");
    Ok(status)
}
