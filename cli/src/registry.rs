//! The commands and options understood on the command line.

use std::fmt::Display;

/// The operation selected for an invocation. Exactly one is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Compress,
    Decompress,
}

impl Command {
    /// All commands in the order they are listed in the usage text.
    pub const ALL: [Command; 2] = [Command::Compress, Command::Decompress];

    /// The key the selected command is stored under in the configuration store.
    pub const ID: &'static str = "command";

    pub fn flag(self) -> &'static str {
        match self {
            Command::Compress => "compress",
            Command::Decompress => "decompress",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Command::Compress => "compress the input image into a fic container",
            Command::Decompress => "restore the image stored in a fic container",
        }
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.flag())
    }
}

/// A command line option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opt {
    Help,
    Input,
    Output,
    Quality,
    Verbose,
    Debug,
    Log,
}

impl Opt {
    /// All options in the order they are listed in the usage text.
    pub const ALL: [Opt; 7] = [
        Opt::Help,
        Opt::Input,
        Opt::Output,
        Opt::Quality,
        Opt::Verbose,
        Opt::Debug,
        Opt::Log,
    ];

    /// The canonical flag, used when an error cites this option.
    pub fn flag(self) -> &'static str {
        match self {
            Opt::Help => "-h",
            Opt::Input => "-i",
            Opt::Output => "-o",
            Opt::Quality => "-q",
            Opt::Verbose => "-v",
            Opt::Debug => "-d",
            Opt::Log => "-l",
        }
    }

    pub fn long_flag(self) -> &'static str {
        match self {
            Opt::Help => "--help",
            Opt::Input => "--input",
            Opt::Output => "--output",
            Opt::Quality => "--quality",
            Opt::Verbose => "--verbose",
            Opt::Debug => "--debug",
            Opt::Log => "--log",
        }
    }

    /// The key this option is stored under in the configuration store.
    pub fn key(self) -> &'static str {
        &self.long_flag()[2..]
    }

    /// Placeholder for the value in the usage text, `None` for flags without a value.
    pub fn value_name(self) -> Option<&'static str> {
        match self {
            Opt::Input | Opt::Output | Opt::Log => Some("<file>"),
            Opt::Quality => Some("<n>"),
            Opt::Help | Opt::Verbose | Opt::Debug => None,
        }
    }

    pub fn takes_value(self) -> bool {
        self.value_name().is_some()
    }

    pub fn description(self) -> &'static str {
        match self {
            Opt::Help => "print this help and exit",
            Opt::Input => "the file to read (required)",
            Opt::Output => "the file to write (default: output.fic)",
            Opt::Quality => "compression quality from 0 to 100 (default: 80)",
            Opt::Verbose => "report progress",
            Opt::Debug => "print debug messages, implies verbose",
            Opt::Log => "also write debug messages to this file, requires debug",
        }
    }

    fn matches(self, token: &str) -> bool {
        token == self.flag() || token == self.long_flag()
    }
}

impl Display for Opt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.flag())
    }
}

/// A token that names a command or an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Command(Command),
    Opt(Opt),
}

impl Flag {
    /// Resolves a command line token, `None` if it names nothing.
    pub fn resolve(token: &str) -> Option<Self> {
        if let Some(cmd) = Command::ALL.into_iter().find(|c| c.flag() == token) {
            return Some(Flag::Command(cmd));
        }

        Opt::ALL
            .into_iter()
            .find(|o| o.matches(token))
            .map(Flag::Opt)
    }
}
