//! Command line parsing.
//!
//! Arguments are consumed left to right in a single pass. Commands and options may appear
//! in any order. A value option takes the next token as its value unless that token starts
//! with `-`, so values can never look like flags. Values are taken as raw OS strings, a
//! flag has to be UTF-8.

use std::ffi::OsStr;

use crate::{
    config::ConfigStore,
    error::UsageError,
    registry::{Flag, Opt},
};

/// The outcome of a successful parse.
#[derive(Debug, PartialEq, Eq)]
pub enum Parsed {
    /// Help was requested, nothing after the help flag was looked at.
    Help,
    /// The collected settings, not yet validated.
    Run(ConfigStore),
}

/// Parses `args` (without the program name) into a [`ConfigStore`].
pub fn parse<I, S>(args: I) -> Result<Parsed, UsageError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut args = args.into_iter().peekable();
    if args.peek().is_none() {
        return Err(UsageError::ArgCount(0));
    }

    let mut store = ConfigStore::default();
    while let Some(arg) = args.next() {
        let arg = arg.as_ref();
        let flag = arg.to_str().and_then(Flag::resolve);

        match flag {
            Some(Flag::Opt(Opt::Help)) => return Ok(Parsed::Help),
            Some(Flag::Command(command)) => store.set_command(command),
            Some(Flag::Opt(opt)) if opt.takes_value() => {
                let value = args
                    .next_if(|next| !next.as_ref().as_encoded_bytes().starts_with(b"-"))
                    .ok_or_else(|| UsageError::MissingArg(opt.flag().into()))?;
                store.set(opt, value.as_ref());
            }
            Some(Flag::Opt(opt)) => store.set(opt, "true"),
            None => return Err(UsageError::UnknownArg(arg.to_string_lossy().into_owned())),
        }
    }

    Ok(Parsed::Run(store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Command;

    fn parse_store(args: &[&str]) -> ConfigStore {
        match parse(args) {
            Ok(Parsed::Run(store)) => store,
            other => panic!("unexpected parse result for {args:?}: {other:?}"),
        }
    }

    #[test]
    fn empty_args() {
        let args: [&str; 0] = [];
        assert_eq!(parse(args), Err(UsageError::ArgCount(0)));
    }

    #[test]
    fn compress_with_defaults() {
        let store = parse_store(&["compress", "-i", "photo.raw"]);
        assert_eq!(store.command(), Some(Command::Compress));
        assert_eq!(store.input().unwrap(), "photo.raw");
        assert_eq!(store.output(), "output.fic");
        assert_eq!(store.quality(), "80");
        assert!(!store.verbose());
        assert!(!store.debug());
        assert_eq!(store.log(), None);
    }

    #[test]
    fn decompress_with_options() {
        let store = parse_store(&["decompress", "-i", "a.fic", "-o", "a.png", "-q", "95", "-v"]);
        assert_eq!(store.command(), Some(Command::Decompress));
        assert_eq!(store.input().unwrap(), "a.fic");
        assert_eq!(store.output(), "a.png");
        assert_eq!(store.quality(), "95");
        assert!(store.verbose());
        assert!(!store.debug());
    }

    #[test]
    fn command_after_options() {
        let store = parse_store(&["-d", "-i", "x", "-l", "run.log", "compress"]);
        assert_eq!(store.command(), Some(Command::Compress));
        assert!(store.debug());
        assert!(!store.verbose());
        assert_eq!(store.log().unwrap(), "run.log");
    }

    #[test]
    fn long_flags() {
        let store = parse_store(&["--input", "x", "--quality", "7", "--verbose", "compress"]);
        assert_eq!(store.input().unwrap(), "x");
        assert_eq!(store.quality(), "7");
        assert!(store.verbose());
    }

    #[test]
    fn repeated_command_last_wins() {
        let store = parse_store(&["compress", "decompress", "-i", "x"]);
        assert_eq!(store.command(), Some(Command::Decompress));
        assert_eq!(store.replaced_commands(), [Command::Compress]);
    }

    #[test]
    fn repeated_option_last_wins() {
        let store = parse_store(&["compress", "-i", "a", "-i", "b"]);
        assert_eq!(store.input().unwrap(), "b");
    }

    #[test]
    fn no_command_is_not_a_parse_error() {
        let store = parse_store(&["-i", "x"]);
        assert_eq!(store.command(), None);
    }

    #[test]
    fn help_short_circuits() {
        assert_eq!(parse(["-h"]), Ok(Parsed::Help));
        assert_eq!(parse(["--help", "--bogus", "-q"]), Ok(Parsed::Help));
        assert_eq!(parse(["compress", "-i", "x", "-h", "-i"]), Ok(Parsed::Help));
    }

    #[test]
    fn error_before_help_wins() {
        assert_eq!(
            parse(["--bogus", "--help"]),
            Err(UsageError::UnknownArg("--bogus".into()))
        );
    }

    #[test]
    fn unknown_args() {
        for token in ["-x", "--colour", "photo.raw", "", "COMPRESS"] {
            assert_eq!(
                parse(["compress", token]),
                Err(UsageError::UnknownArg(token.into()))
            );
        }
    }

    #[test]
    fn missing_value_at_end() {
        for opt in ["-i", "-o", "-q", "-l", "--input"] {
            let err = parse(["compress", opt]).unwrap_err();
            assert!(matches!(err, UsageError::MissingArg(_)), "{opt}: {err:?}");
        }
    }

    #[test]
    fn missing_value_before_flag() {
        assert_eq!(
            parse(["compress", "-i", "-v"]),
            Err(UsageError::MissingArg("-i".into()))
        );
        assert_eq!(
            parse(["-q", "-5", "compress"]),
            Err(UsageError::MissingArg("-q".into()))
        );
        assert_eq!(
            parse(["--log", "--help"]),
            Err(UsageError::MissingArg("-l".into()))
        );
    }

    #[test]
    fn value_may_look_like_command() {
        let store = parse_store(&["compress", "-i", "decompress"]);
        assert_eq!(store.command(), Some(Command::Compress));
        assert_eq!(store.input().unwrap(), "decompress");
    }

    #[test]
    fn empty_value_is_kept() {
        let store = parse_store(&["compress", "-i", "x", "-q", ""]);
        assert_eq!(store.quality(), "");
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_tokens() {
        use std::{ffi::OsString, os::unix::ffi::OsStringExt};

        let raw = || OsString::from_vec(b"img\xff.raw".to_vec());

        let Ok(Parsed::Run(store)) = parse([OsString::from("compress"), "-i".into(), raw()])
        else {
            panic!("a non UTF-8 value must be accepted");
        };
        assert_eq!(store.input(), Some(raw().as_os_str()));

        assert_eq!(
            parse([OsString::from("compress"), raw()]),
            Err(UsageError::UnknownArg("img\u{fffd}.raw".into()))
        );
    }
}
