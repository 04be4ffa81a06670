use std::{env, io, process};

use compiler::TokenPass;
use shared::config::Config;
use tracing_subscriber::EnvFilter;

mod controller;

const LOG_VAR: &str = "SUBMINBAS_LOG";

fn main() {
    // Internal logging stays on stderr and is off unless asked for, so
    // diagnostic output can be captured as is.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env(LOG_VAR))
        .with_writer(io::stderr)
        .without_time()
        .init();

    let config = Config::from_env();
    let mut pass = TokenPass::new();
    let args = env::args_os().map(|arg| arg.to_string_lossy().into_owned());
    match controller::run(args, &config, &mut pass) {
        Ok(status) => process::exit(status),
        Err(error) => {
            eprintln!("{}", error);
            process::exit(1);
        }
    }
}
