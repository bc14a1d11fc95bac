use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

const HELLO_WORLD: &str = "++++++++++[>+++++++>++++++++++>+++>+<<<<-]>++.>+.+++++++..+++.>++.<<+++++++++++++++.>.+++.------.--------.>+.>.";

fn cargo_bin() -> Command {
    let mut cmd = Command::cargo_bin("bf").unwrap();
    cmd.env("BF_CONFIG", "/nonexistent/bf.toml")
        .env_remove("BF_SMALL_CELLS")
        .env_remove("BF_MAX_CELLS");
    cmd
}

fn write_tempfile(content: &[u8]) -> tempfile::NamedTempFile {
    let mut tf = tempfile::NamedTempFile::new().expect("tempfile");
    tf.write_all(content).unwrap();
    tf
}

#[test]
fn hello_world_prints_exact_bytes() {
    let src = write_tempfile(HELLO_WORLD.as_bytes());
    cargo_bin()
        .arg(src.path())
        .assert()
        .success()
        .stdout("Hello World!\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn comments_are_ignored() {
    let src = write_tempfile(
        b"Print a single 'A' (65):\n\n8 times 8 then one more\n++++++++[>++++++++<-]>+.\n",
    );
    cargo_bin()
        .arg(src.path())
        .assert()
        .success()
        .stdout("A");
}

#[test]
fn input_and_output_files() {
    let src = write_tempfile(b",[.,]");
    let input = write_tempfile(b"line one\r\nline two\r\n");
    let out_dir = tempfile::tempdir().expect("tempdir");
    let out_path = out_dir.path().join("out.txt");

    cargo_bin()
        .arg(src.path())
        .arg(input.path())
        .arg(&out_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = std::fs::read(&out_path).unwrap();
    assert_eq!(written, b"line one\nline two\n");
}

#[test]
fn stdin_is_the_default_input() {
    let src = write_tempfile(b",.,.");
    cargo_bin()
        .arg(src.path())
        .write_stdin("Z")
        .assert()
        .success()
        .stdout(predicate::eq(&b"Z\0"[..]));
}

#[test]
fn loop_split_across_lines_is_an_empty_loop() {
    let src = write_tempfile(b"+[\n]\n");
    cargo_bin()
        .arg(src.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("empty loop"));
}

#[test]
fn max_cells_flag_bounds_the_tape() {
    let src = write_tempfile(b">>>>+");
    cargo_bin()
        .arg("--max-cells")
        .arg("4")
        .arg("--small-cells")
        .arg("2")
        .arg(src.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("overflowed its memory (ptr=4)"));

    cargo_bin()
        .arg("--max-cells")
        .arg("5")
        .arg("--small-cells")
        .arg("2")
        .arg(src.path())
        .assert()
        .success();
}

#[test]
fn env_limits_apply_and_flags_override_them() {
    let src = write_tempfile(b">>>>+");
    cargo_bin()
        .env("BF_SMALL_CELLS", "2")
        .env("BF_MAX_CELLS", "4")
        .arg(src.path())
        .assert()
        .code(1);

    cargo_bin()
        .env("BF_SMALL_CELLS", "2")
        .env("BF_MAX_CELLS", "4")
        .arg("--max-cells")
        .arg("100")
        .arg(src.path())
        .assert()
        .success();
}

#[test]
fn config_file_limits_apply() {
    let src = write_tempfile(b">>>>+");
    let cfg = write_tempfile(b"[tape]\nsmall_cells = 2\nmax_cells = 4\n");
    Command::cargo_bin("bf")
        .unwrap()
        .env("BF_CONFIG", cfg.path())
        .env_remove("BF_SMALL_CELLS")
        .env_remove("BF_MAX_CELLS")
        .arg(src.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ptr=4"));
}

#[test]
fn invalid_limits_are_a_usage_error() {
    let src = write_tempfile(b"+");
    cargo_bin()
        .arg("--small-cells")
        .arg("50")
        .arg("--max-cells")
        .arg("10")
        .arg(src.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid tape limits"));
}
