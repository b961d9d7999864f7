use std::{
    env,
    ffi::{OsStr, OsString},
    io::{self, Write},
    path::Path,
    process::ExitCode,
};

use args::Parsed;
use error::CliError;

mod args;
mod command;
mod compress;
mod config;
mod decompress;
mod error;
mod logger;
mod registry;
mod usage;
mod validate;


/// Name the usage text is rendered with.
fn program_name(arg0: Option<&OsStr>) -> String {
    arg0.and_then(|arg| Path::new(arg).file_name())
        .and_then(|name| name.to_str())
        .unwrap_or("fic")
        .to_owned()
}

/// Parses, validates and dispatches `args`, excluding the program name.
fn run(program: &str, args: &[OsString]) -> Result<(), CliError> {
    match args::parse(args)? {
        Parsed::Help => print_usage(io::stdout().lock(), program),
        Parsed::Run(store) => {
            let validated = validate::validate(&store)?;
            command::dispatch(&validated).map_err(CliError::Task)
        }
    }
}

/// Writes the usage text for `--help`. A reader that went away is not an error.
fn print_usage<W: Write>(mut out: W, program: &str) -> Result<(), CliError> {
    match out
        .write_all(usage::render(program).as_bytes())
        .and_then(|()| out.flush())
    {
        Err(err) if err.kind() != io::ErrorKind::BrokenPipe => Err(CliError::Task(
            anyhow::Error::new(err).context("Failed to print usage"),
        )),
        _ => Ok(()),
    }
}

fn main() -> ExitCode {
    let mut argv = env::args_os();
    let program = program_name(argv.next().as_deref());
    let args: Vec<OsString> = argv.collect();

    match run(&program, &args) {
        Ok(()) => ExitCode::from(error::EXIT_SUCCESS),
        Err(err) => {
            if err.shows_usage() {
                eprint!("{}", usage::render(&program));
            }
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
