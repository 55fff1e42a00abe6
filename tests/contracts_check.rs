use assert_cmd::cargo::cargo_bin_cmd;
use jsonschema::JSONSchema;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn run_json(home: &Path, work: &Path, args: &[&str], expect_success: bool) -> Value {
    let mut cmd = cargo_bin_cmd!("framegen");
    cmd.env("HOME", home).current_dir(work).arg("--json").args(args);

    let assert = cmd.assert();
    let assert = if expect_success {
        assert.success()
    } else {
        assert.failure()
    };
    let out = assert.get_output().stdout.clone();
    serde_json::from_slice(&out).expect("valid json output")
}

fn load_schema(name: &str) -> Value {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let raw = fs::read_to_string(root.join("docs/contracts").join(name)).unwrap();
    serde_json::from_str(&raw).unwrap()
}

fn validate(schema_name: &str, data: &Value) {
    let schema = load_schema(schema_name);
    let validator = JSONSchema::compile(&schema).expect("compile schema");
    let msgs: Vec<String> = match validator.validate(data) {
        Ok(()) => return,
        Err(errors) => errors.map(|e| e.to_string()).collect(),
    };
    panic!("schema validation failed: {}", msgs.join(" | "));
}

struct Fixture {
    _tmp: TempDir,
    home: PathBuf,
    work: PathBuf,
}

fn fixture() -> Fixture {
    let tmp = TempDir::new().expect("temp dir");
    let home = tmp.path().join("home");
    let work = tmp.path().join("work");
    fs::create_dir_all(&home).expect("home");
    fs::create_dir_all(&work).expect("work");
    Fixture {
        _tmp: tmp,
        home,
        work,
    }
}

#[test]
fn generate_report_matches_contract() {
    let f = fixture();
    run_json(
        &f.home,
        &f.work,
        &["stickers", "synth", "--dir", "lib"],
        true,
    );
    let report = run_json(
        &f.home,
        &f.work,
        &[
            "generate",
            "--stickers",
            "lib",
            "--out",
            "frame.png",
            "--seed",
            "1",
            "--template",
            "300x200",
            "--output-size",
            "300x200",
        ],
        true,
    );
    validate("generate_report.schema.json", &report);
}

#[test]
fn bundle_report_matches_contract() {
    let f = fixture();
    fs::create_dir_all(f.work.join("test_stickers")).expect("assets");
    fs::write(f.work.join("test_stickers/s.png"), b"x").expect("asset");

    let report = run_json(
        &f.home,
        &f.work,
        &[
            "bundle",
            "build",
            "--packager",
            "sh",
            "--packager-arg",
            "-c",
            "--packager-arg",
            "mkdir -p out && printf bin > out/app",
            "--source-artifact",
            "out/app",
        ],
        true,
    );
    validate("bundle_report.schema.json", &report);
}

#[test]
fn error_envelope_matches_contract() {
    let f = fixture();
    let err = run_json(
        &f.home,
        &f.work,
        &["generate", "--stickers", "missing"],
        false,
    );
    validate("error_envelope.schema.json", &err);

    let err = run_json(
        &f.home,
        &f.work,
        &[
            "bundle",
            "build",
            "--packager",
            "sh",
            "--packager-arg",
            "-c",
            "--packager-arg",
            "exit 1",
        ],
        false,
    );
    validate("error_envelope.schema.json", &err);
}
