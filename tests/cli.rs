mod common;

use common::TestEnv;
use predicates::str::contains;

#[test]
fn help_names_the_tool() {
    let env = TestEnv::new();
    env.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("Sticker Frame Generator CLI"));
}

#[test]
fn synth_reports_created_shapes() {
    let env = TestEnv::new();
    env.cmd()
        .args(["stickers", "synth", "--dir", "lib"])
        .assert()
        .success()
        .stdout(contains("created 6 test stickers"));
}

#[test]
fn validate_text_mode() {
    let env = TestEnv::new();
    let lib = env.fixture_library();
    env.cmd()
        .args(["validate", "--dir", lib.to_str().expect("utf8 path")])
        .assert()
        .success()
        .stdout(contains("library valid"));
}

#[test]
fn missing_library_fails_with_message() {
    let env = TestEnv::new();
    env.cmd()
        .args(["validate", "--dir", "no/such/dir"])
        .assert()
        .failure()
        .stderr(contains("sticker directory not found"));
}
