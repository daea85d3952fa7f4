//! Integration tests for the cam2gerber binary.

use assert_cmd::cargo::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

const CAM: &str = "tests/fixtures/gerb274x.cam";
const BOARD: &str = "tests/fixtures/schema.brd";

fn cam2gerber() -> Command {
    let mut cmd = Command::new(cargo_bin("cam2gerber"));
    cmd.env_remove("EAGLECON");
    cmd
}

#[test]
fn test_dry_run_prints_commands() {
    cam2gerber()
        .args(["-c", CAM, "-b", BOARD, "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-oschema.cmp"))
        .stdout(predicate::str::contains("-dEXCELLON"))
        .stdout(predicate::str::contains(
            "CAM job completed with 0 warnings and 0 errors",
        ));
}

#[test]
fn test_debug_dumps_job_json() {
    cam2gerber()
        .args(["-c", CAM, "--debug"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"tag\": \"Sec_6\""))
        .stdout(predicate::str::contains("\"declared\""));
}

#[test]
fn test_missing_board_is_reported() {
    cam2gerber()
        .args(["-c", CAM, "-b", "tests/fixtures/nope.brd", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_missing_eagle_executable_is_reported() {
    cam2gerber()
        .args(["-c", CAM, "-b", BOARD, "-e", "/nonexistent/dir/eaglecon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please specify the EAGLE executable"));
}

#[test]
fn test_cam_file_is_required() {
    cam2gerber()
        .args(["-b", BOARD])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--cam"));
}

#[cfg(unix)]
#[test]
fn test_successful_generator_run() {
    cam2gerber()
        .args(["-c", CAM, "-b", BOARD, "-e", "true"])
        .assert()
        .success()
        .stdout(predicate::str::contains("return code: 0"));
}

#[cfg(unix)]
#[test]
fn test_generator_from_environment() {
    cam2gerber()
        .env("EAGLECON", "true")
        .args(["-c", CAM, "-b", BOARD])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"true\" -X"))
        .stdout(predicate::str::contains(
            "CAM job completed with 0 warnings and 0 errors",
        ));
}

#[cfg(unix)]
#[test]
fn test_failing_generator_run() {
    cam2gerber()
        .args(["-c", CAM, "-b", BOARD, "-e", "false"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "CAM job completed with 6 warnings and 0 errors",
        ));
}
