use std::{fs, path::Path};

use anyhow::Result;
use indicatif::{HumanBytes, ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::{debug, info};

use crate::{
    compress::Compressor, config::Config, decompress::Decompressor, registry::Command,
    validate::Validated,
};

// HumanBytes can mess up intendation if not formatted
#[inline]
pub fn human_bytes(n: u64) -> String {
    format!("{}", HumanBytes(n))
}

/// A unit of work selected by a [`Command`].
pub trait Capability {
    /// Runs the task. `config` has been validated and does not change while the task runs.
    fn run(&self, config: &Config) -> Result<()>;
}

/// The task that implements `command`.
pub fn capability(command: Command) -> Box<dyn Capability> {
    match command {
        Command::Compress => Box::new(Compressor),
        Command::Decompress => Box::new(Decompressor),
    }
}

/// Runs the task of the validated command, logging through the validated log handle.
pub fn dispatch(validated: &Validated) -> Result<()> {
    let Validated { config, logger } = validated;

    logger.in_scope(|| {
        info!(":: Initializing {} process..", config.command);
        let task = capability(config.command);
        debug!(":: Initialized task. Starting execution..");
        debug!(
            input = %config.input.display(),
            output = %config.output.display(),
            quality = config.quality,
            verbose = config.verbose,
            debug = config.debug,
            "Task configuration"
        );
        if let Some(log) = logger.sink() {
            debug!("Writing log to {}", log.display());
        }

        task.run(config)
    })
}

pub fn with_bar(in_path: &Path) -> ProgressBar {
    let len = fs::metadata(in_path).map(|m| m.len()).ok();
    ProgressBar::with_draw_target(len, ProgressDrawTarget::stderr_with_hz(5)).with_style(
        ProgressStyle::with_template("{binary_bytes} of {binary_total_bytes}")
            .expect("Static template always works"),
    )
}
