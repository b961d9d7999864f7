use std::{
    ffi::{OsStr, OsString},
    path::PathBuf,
};

use crate::registry::{Command, Opt};

pub const DEFAULT_OUTPUT: &str = "output.fic";
pub const DEFAULT_QUALITY: &str = "80";

/// The settings of one invocation as they are collected by the parser.
///
/// Values are kept as given on the command line, validation happens later. They are not
/// required to be UTF-8, file names are taken as they are. Every setting except the command
/// and the input file has a default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigStore {
    command: Option<Command>,
    // Commands that were given earlier and replaced by a later command flag
    replaced: Vec<Command>,
    input: Option<OsString>,
    output: OsString,
    quality: OsString,
    verbose: bool,
    debug: bool,
    log: Option<OsString>,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self {
            command: None,
            replaced: Vec::new(),
            input: None,
            output: DEFAULT_OUTPUT.into(),
            quality: DEFAULT_QUALITY.into(),
            verbose: false,
            debug: false,
            log: None,
        }
    }
}

impl ConfigStore {
    pub fn set_command(&mut self, command: Command) {
        if let Some(prev) = self.command.replace(command) {
            self.replaced.push(prev);
        }
    }

    /// Stores `value` for `opt`, replacing the previous value.
    ///
    /// Flags without a value are set with `"true"` or `"false"`.
    pub fn set(&mut self, opt: Opt, value: impl AsRef<OsStr>) {
        let value = value.as_ref();
        match opt {
            Opt::Input => self.input = Some(value.into()),
            Opt::Output => self.output = value.into(),
            Opt::Quality => self.quality = value.into(),
            Opt::Log => self.log = Some(value.into()),
            Opt::Verbose => self.verbose = value.eq_ignore_ascii_case("true"),
            Opt::Debug => self.debug = value.eq_ignore_ascii_case("true"),
            Opt::Help => {}
        }
    }

    /// The value stored for `opt` as text, `None` if it has no value.
    ///
    /// Bytes that are not UTF-8 are replaced.
    pub fn get(&self, opt: Opt) -> Option<String> {
        let text = |value: &OsStr| value.to_string_lossy().into_owned();
        match opt {
            Opt::Input => self.input.as_deref().map(text),
            Opt::Output => Some(text(&self.output)),
            Opt::Quality => Some(text(&self.quality)),
            Opt::Log => self.log.as_deref().map(text),
            Opt::Verbose => Some(self.verbose.to_string()),
            Opt::Debug => Some(self.debug.to_string()),
            Opt::Help => None,
        }
    }

    /// Looks up a value by key, see [`Opt::key`] and [`Command::ID`].
    pub fn get_key(&self, key: &str) -> Option<String> {
        if key == Command::ID {
            return self.command.map(|c| c.flag().to_owned());
        }

        Opt::ALL
            .into_iter()
            .find(|o| o.key() == key)
            .and_then(|o| self.get(o))
    }

    pub fn command(&self) -> Option<Command> {
        self.command
    }

    pub fn replaced_commands(&self) -> &[Command] {
        &self.replaced
    }

    pub fn input(&self) -> Option<&OsStr> {
        self.input.as_deref()
    }

    pub fn output(&self) -> &OsStr {
        &self.output
    }

    pub fn quality(&self) -> &OsStr {
        &self.quality
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn log(&self) -> Option<&OsStr> {
        self.log.as_deref()
    }
}

/// The validated settings handed to a task. Never changes once built.
///
/// The log file is not part of it, it is owned by the [`Logger`](crate::logger::Logger).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub command: Command,
    pub input: PathBuf,
    pub output: PathBuf,
    pub quality: i32,
    pub verbose: bool,
    pub debug: bool,
}
