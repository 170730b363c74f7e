use std::io::Write;
use std::process::{Command, Output, Stdio};

const EXIT_SUCCESS: i32 = 0;
const EXIT_CLI: i32 = 2;
const EXIT_DECODE: i32 = 3;

fn base_command() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_iiccrc"));
    cmd.env_remove("IICCRC_INIT");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn run_cmd(args: &[&str], envs: &[(&str, &str)]) -> Output {
    let mut cmd = base_command();
    cmd.args(args);
    for (key, val) in envs {
        cmd.env(key, val);
    }
    cmd.output().expect("run iiccrc")
}

fn run_with_stdin(args: &[&str], input: &str) -> Output {
    let mut child = base_command()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn iiccrc");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(input.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("wait iiccrc")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn assert_exit(output: &Output, expected: i32) {
    assert_eq!(
        output.status.code(),
        Some(expected),
        "stdout: {}\nstderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn app_note_command() {
    let output = run_cmd(&["34 1E 08 AC 0D"], &[]);
    assert_exit(&output, EXIT_SUCCESS);
    assert_eq!(stdout(&output), "IIC command #0 0x: 34 1E 08 AC 0D  CRC16: BFD2\n");
}

#[test]
fn quiet_prints_results_only() {
    let output = run_cmd(&["-q", "341E08AC0D", "", "00"], &[]);
    assert_exit(&output, EXIT_SUCCESS);
    assert_eq!(stdout(&output), "BFD2\nNULL\n0F87\n");
}

#[test]
fn init_flag_and_env() {
    let output = run_cmd(&["-q", "--init", "0x0000", "341E08AC0D"], &[]);
    assert_exit(&output, EXIT_SUCCESS);
    assert_eq!(stdout(&output), "8F5A\n");

    let output = run_cmd(&["-q", "341E08AC0D"], &[("IICCRC_INIT", "1234")]);
    assert_exit(&output, EXIT_SUCCESS);
    assert_eq!(stdout(&output), "8C4C\n");
}

#[test]
fn bad_init_falls_back_to_ffff() {
    let output = run_cmd(&["-q", "--init", "nothex", "341E08AC0D"], &[]);
    assert_exit(&output, EXIT_SUCCESS);
    assert_eq!(stdout(&output), "BFD2\n");
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid initial value"));
}

#[test]
fn decode_errors_still_print_every_row() {
    let output = run_cmd(&["-q", "ABC", "12G4", "341E08AC0D"], &[]);
    assert_exit(&output, EXIT_DECODE);
    assert_eq!(
        stdout(&output),
        "Error: hex string length must be even (got 3 digits)\n\
         Error: invalid hex character 'G' at position 2\n\
         BFD2\n"
    );
}

#[test]
fn rows_from_stdin() {
    let output = run_with_stdin(&["-q"], "34 1E 08 AC 0D\n\n34\t1E 08AC0D\n");
    assert_exit(&output, EXIT_SUCCESS);
    assert_eq!(stdout(&output), "BFD2\nNULL\nBFD2\n");
}

#[test]
fn empty_stdin_uses_default_command() {
    let output = run_with_stdin(&[], "");
    assert_exit(&output, EXIT_SUCCESS);
    assert_eq!(stdout(&output), "IIC command #0 0x: 34 1E 08 AC 0D  CRC16: BFD2\n");
}

#[test]
fn unknown_flag_is_cli_error() {
    let output = run_cmd(&["--bogus"], &[]);
    assert_exit(&output, EXIT_CLI);
}
