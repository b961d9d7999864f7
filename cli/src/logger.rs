//! The log handle of an invocation.
//!
//! Messages go to stderr and, in debug mode, optionally to a log file. The handle is a plain
//! value that is entered for the code that should log through it, no global subscriber is
//! installed.

use std::{
    fs::{File, OpenOptions},
    io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use tracing::{Dispatch, dispatcher, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt};

/// The resolved verbose, debug and log file settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputControl {
    pub verbose: bool,
    pub debug: bool,
    pub log: Option<PathBuf>,
}

impl OutputControl {
    /// Resolves the output settings. Debug implies verbose, the log file is only used in
    /// debug mode.
    pub fn resolve(verbose: bool, debug: bool, log: Option<&Path>) -> Self {
        if debug {
            Self {
                verbose: true,
                debug,
                log: log.map(Path::to_path_buf),
            }
        } else {
            Self {
                verbose,
                debug,
                log: None,
            }
        }
    }

    fn directive(&self) -> &'static str {
        if self.debug {
            "debug"
        } else if self.verbose {
            "info"
        } else {
            "warn"
        }
    }
}

/// A handle that routes `tracing` events of the code run in [`Logger::in_scope`].
#[derive(Clone)]
pub struct Logger {
    dispatch: Dispatch,
    sink: Option<PathBuf>,
}

impl Logger {
    /// Builds the handle for `control`.
    ///
    /// A log file that cannot be opened is reported as a warning, logging then continues on
    /// stderr only.
    pub fn attach(control: &OutputControl) -> Self {
        // RUST_LOG takes precedence if set
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(control.directive())
        };

        let mut failure = None;
        let file = control.log.as_deref().and_then(|path| match open_sink(path) {
            Ok(file) => Some((path.to_path_buf(), file)),
            Err(err) => {
                failure = Some((path, err));
                None
            }
        });
        let sink = file.as_ref().map(|(path, _)| path.clone());

        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(io::stderr)
                    .with_target(false)
                    .without_time(),
            )
            .with(file.map(|(_, file)| {
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
            }));

        let this = Self {
            dispatch: Dispatch::new(subscriber),
            sink,
        };
        if let Some((path, err)) = failure {
            this.in_scope(|| warn!("Cannot write log file {}: {err}", path.display()));
        }

        this
    }

    /// Runs `f` with this handle as the default subscriber of the current thread.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        dispatcher::with_default(&self.dispatch, f)
    }

    /// The log file messages are written to, if one was attached.
    pub fn sink(&self) -> Option<&Path> {
        self.sink.as_deref()
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger").field("sink", &self.sink).finish()
    }
}

fn open_sink(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
