use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{
    config::{Config, ConfigStore},
    error::UsageError,
    logger::{Logger, OutputControl},
    registry::{Command, Opt},
};

/// A configuration that passed validation, together with the log handle derived from it.
#[derive(Debug)]
pub struct Validated {
    pub config: Config,
    pub logger: Logger,
}

/// Checks the parsed settings and turns them into a [`Config`].
///
/// The output control is resolved first, so the checks themselves are already logged with
/// the configured verbosity. The checks stop at the first failure, in this order: a command
/// was given, an input file was given, the quality is an integer.
pub fn validate(store: &ConfigStore) -> Result<Validated, UsageError> {
    let control =
        OutputControl::resolve(store.verbose(), store.debug(), store.log().map(Path::new));
    let logger = Logger::attach(&control);

    let config = logger.in_scope(|| check(store, &control))?;

    Ok(Validated { config, logger })
}

fn check(store: &ConfigStore, control: &OutputControl) -> Result<Config, UsageError> {
    checking(store, Command::ID);
    let command = store
        .command()
        .ok_or_else(|| UsageError::RequiredArgNotFound(Command::ID.into()))?;
    for replaced in store.replaced_commands() {
        warn!("Command {replaced} is overridden by {command}");
    }

    checking(store, Opt::Input.key());
    let input = store
        .input()
        .ok_or_else(|| UsageError::RequiredArgNotFound(Opt::Input.flag().into()))?;

    checking(store, Opt::Quality.key());
    let quality: i32 = store
        .quality()
        .to_str()
        .and_then(|q| q.parse().ok())
        .ok_or_else(|| {
            UsageError::QualityFormat(store.quality().to_string_lossy().into_owned())
        })?;
    if !(0..=100).contains(&quality) {
        warn!("Quality {quality} is outside of 0 to 100 and will be clamped");
    }

    Ok(Config {
        command,
        input: PathBuf::from(input),
        output: PathBuf::from(store.output()),
        quality,
        verbose: control.verbose,
        debug: control.debug,
    })
}

fn checking(store: &ConfigStore, key: &str) {
    debug!(value = store.get_key(key).as_deref(), ":: Validating: {key} ..");
}
