use std::{fs, path::Path};

use assert_cmd::{Command, cargo::cargo_bin_cmd};
use tempfile::TempDir;

fn raw_image() -> Vec<u8> {
    (0..64u32 * 64)
        .map(|i| u8::try_from((i % 64) * 3 + (i / 64) % 7).unwrap())
        .collect()
}

fn fic(dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("fic");
    cmd.current_dir(dir);
    cmd
}

fn stderr(cmd: &mut Command) -> String {
    String::from_utf8(cmd.output().unwrap().stderr).unwrap()
}

#[test]
fn no_arguments() {
    let dir = TempDir::new().unwrap();
    let mut cmd = fic(dir.path());
    cmd.assert().code(2);

    let err = stderr(&mut cmd);
    assert!(err.starts_with("usage: fic <command> [options] -i <input-file>"), "{err}");
    assert!(err.contains("error: expected a command and an input file"), "{err}");
}

#[test]
fn help_wins() {
    let dir = TempDir::new().unwrap();

    for args in [&["-h"][..], &["--help", "--bogus"], &["compress", "-i", "x", "-h"]] {
        let out = fic(dir.path()).args(args).output().unwrap();
        assert!(out.status.success(), "{args:?}");
        let text = String::from_utf8(out.stdout).unwrap();
        assert!(text.starts_with("usage: fic"), "{text}");
        assert!(text.contains("-q, --quality <n>"), "{text}");
    }
    assert!(!dir.path().join("output.fic").exists());
}

#[test]
fn unknown_argument() {
    let dir = TempDir::new().unwrap();
    let mut cmd = fic(dir.path());
    cmd.args(["compress", "-i", "x", "--fast"]).assert().code(6);
    assert!(stderr(&mut cmd).contains("error: unknown argument: --fast"));
}

#[test]
fn missing_option_value() {
    let dir = TempDir::new().unwrap();
    fic(dir.path()).args(["compress", "-i"]).assert().code(4);
    fic(dir.path()).args(["compress", "-i", "-v"]).assert().code(4);
    fic(dir.path())
        .args(["compress", "-i", "x", "--output"])
        .assert()
        .code(4);
}

#[test]
fn required_arguments() {
    let dir = TempDir::new().unwrap();

    let mut cmd = fic(dir.path());
    cmd.args(["-i", "x"]).assert().code(3);
    assert!(stderr(&mut cmd).contains("required argument not found: command"));

    let mut cmd = fic(dir.path());
    cmd.args(["decompress", "-v"]).assert().code(3);
    assert!(stderr(&mut cmd).contains("required argument not found: -i"));
}

#[test]
fn quality_not_a_number() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("in.raw"), raw_image()).unwrap();

    let mut cmd = fic(dir.path());
    cmd.args(["compress", "-i", "in.raw", "-q", "notanumber"])
        .assert()
        .code(5);
    assert!(stderr(&mut cmd).contains("\"notanumber\""));
    assert!(!dir.path().join("output.fic").exists());
}

#[test]
fn cycle() {
    let dir = TempDir::new().unwrap();
    let image = raw_image();
    fs::write(dir.path().join("in.raw"), &image).unwrap();

    fic(dir.path())
        .args(["compress", "-i", "in.raw", "-q", "60"])
        .assert()
        .success();
    let compressed = fs::read(dir.path().join("output.fic")).unwrap();
    assert_eq!(&compressed[..5], b"FIC\x01\x3c");

    fic(dir.path())
        .args(["-o", "restored.raw", "-i", "output.fic", "decompress", "-v"])
        .assert()
        .success();
    assert_eq!(fs::read(dir.path().join("restored.raw")).unwrap(), image);
}

#[test]
fn task_failure() {
    let dir = TempDir::new().unwrap();

    let mut cmd = fic(dir.path());
    cmd.args(["compress", "-i", "missing.raw"]).assert().code(7);
    let err = stderr(&mut cmd);
    assert!(err.contains("Failed to open input file missing.raw"), "{err}");
    assert!(!err.contains("usage:"), "{err}");
    assert!(!dir.path().join("output.fic").exists());

    fs::write(dir.path().join("plain.txt"), b"plain text").unwrap();
    fic(dir.path())
        .args(["decompress", "-i", "plain.txt", "-o", "plain.out"])
        .assert()
        .code(7);
    assert!(!dir.path().join("plain.out").exists());
}

#[test]
fn debug_log_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("in.raw"), raw_image()).unwrap();

    let mut cmd = fic(dir.path());
    cmd.env_remove("RUST_LOG")
        .args(["compress", "-i", "in.raw", "-d", "-l", "run.log"])
        .assert()
        .success();
    let err = stderr(&mut cmd);
    assert!(err.contains(":: Initializing compress process.."), "{err}");

    let log = fs::read_to_string(dir.path().join("run.log")).unwrap();
    assert!(log.contains(":: Validating: command .."), "{log}");
    assert!(log.contains(":: Initialized task. Starting execution.."), "{log}");
}

#[test]
fn log_file_needs_debug() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("in.raw"), raw_image()).unwrap();

    fic(dir.path())
        .args(["compress", "-i", "in.raw", "-l", "run.log"])
        .assert()
        .success();
    assert!(!dir.path().join("run.log").exists());
}

#[test]
fn last_command_wins() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("in.raw"), raw_image()).unwrap();

    let mut cmd = fic(dir.path());
    cmd.env_remove("RUST_LOG")
        .args(["decompress", "compress", "-i", "in.raw"])
        .assert()
        .success();
    assert!(stderr(&mut cmd).contains("Command decompress is overridden by compress"));
    assert!(
        fs::read(dir.path().join("output.fic"))
            .unwrap()
            .starts_with(b"FIC")
    );
}

#[cfg(target_os = "linux")]
#[test]
fn non_utf8_arguments() {
    use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

    let dir = TempDir::new().unwrap();
    let image = raw_image();
    let raw = OsStr::from_bytes(b"img\xff.raw");
    let packed = OsStr::from_bytes(b"img\xff.fic");
    fs::write(dir.path().join(raw), &image).unwrap();

    fic(dir.path())
        .arg("compress")
        .arg("-i")
        .arg(raw)
        .arg("-o")
        .arg(packed)
        .assert()
        .success();
    fic(dir.path())
        .args(["decompress", "-o", "restored.raw", "-i"])
        .arg(packed)
        .assert()
        .success();
    assert_eq!(fs::read(dir.path().join("restored.raw")).unwrap(), image);

    let mut cmd = fic(dir.path());
    cmd.arg("compress").arg(raw).assert().code(6);
    assert!(stderr(&mut cmd).contains("unknown argument: img\u{fffd}.raw"));
}
