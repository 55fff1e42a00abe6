use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub work: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        let work = tmp.path().join("work");
        fs::create_dir_all(&home).expect("create isolated home");
        fs::create_dir_all(&work).expect("create work dir");

        Self {
            _tmp: tmp,
            home,
            work,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("framegen");
        cmd.env("HOME", &self.home).current_dir(&self.work);
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn run_json_err(&self, args: &[&str]) -> Value {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .args(args)
            .assert()
            .failure()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("error json output")
    }

    /// Synthesize the standard test shapes through the binary itself.
    pub fn fixture_library(&self) -> PathBuf {
        let dir = self.work.join("stickers");
        self.cmd()
            .args(["stickers", "synth", "--dir", dir.to_str().expect("utf8 path")])
            .assert()
            .success();
        dir
    }

    /// A bundle root with the bundled data dir plus junk in `build`/`dist`.
    pub fn fixture_bundle_root(&self) -> PathBuf {
        let root = self.work.clone();
        fs::create_dir_all(root.join("test_stickers")).expect("create assets dir");
        fs::write(root.join("test_stickers/s.png"), b"not-a-real-png").expect("write asset");
        for dir in ["build", "dist"] {
            let d = root.join(dir).join("nested");
            fs::create_dir_all(&d).expect("create junk dirs");
            fs::write(d.join("stale.bin"), b"stale").expect("write junk");
        }
        root
    }
}
