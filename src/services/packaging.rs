//! Packaging orchestration: clean previous output, drive the external
//! packaging tool, stage the distributable, verify.
//!
//! The tool's exit status is the primary success signal; the staged
//! artifact's existence is only a secondary sanity check.

use crate::domain::constants::{
    APP_NAME, BUILD_DIR, DEFAULT_ASSETS_DIR, DEFAULT_PACKAGER, DEFAULT_PACKAGER_ARGS,
    DEFAULT_SOURCE_ARTIFACT, DIST_DIR,
};
use crate::domain::models::{coded, BundleDoctorReport, BundleReport, CheckItem, CleanReport};
use std::path::{Path, PathBuf};
use std::process::Command;

pub struct BundlePlan {
    pub root: PathBuf,
    pub packager: String,
    pub packager_args: Vec<String>,
    pub source_artifact: PathBuf,
    pub assets_dir: PathBuf,
    pub app_name: String,
}

impl BundlePlan {
    pub fn new(
        root: &str,
        packager: Option<String>,
        packager_args: Vec<String>,
        source_artifact: Option<String>,
        assets: Option<String>,
        name: Option<String>,
    ) -> Self {
        let packager = packager.unwrap_or_else(|| DEFAULT_PACKAGER.to_string());
        // default args belong to the default tool only
        let packager_args = if packager_args.is_empty() && packager == DEFAULT_PACKAGER {
            DEFAULT_PACKAGER_ARGS.iter().map(|a| a.to_string()).collect()
        } else {
            packager_args
        };
        let source_artifact = source_artifact
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                PathBuf::from(format!(
                    "{}{}",
                    DEFAULT_SOURCE_ARTIFACT,
                    std::env::consts::EXE_SUFFIX
                ))
            });
        Self {
            root: PathBuf::from(root),
            packager,
            packager_args,
            source_artifact,
            assets_dir: PathBuf::from(assets.unwrap_or_else(|| DEFAULT_ASSETS_DIR.to_string())),
            app_name: name.unwrap_or_else(|| APP_NAME.to_string()),
        }
    }

    pub fn artifact_name(&self) -> String {
        format!("{}{}", self.app_name, std::env::consts::EXE_SUFFIX)
    }

    pub fn dist_artifact(&self) -> PathBuf {
        self.root.join(DIST_DIR).join(self.artifact_name())
    }

    fn resolve(&self, p: &Path) -> PathBuf {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.root.join(p)
        }
    }
}

/// Remove prior `build/` and `dist/` output. Absent directories are a
/// no-op, so repeated runs are safe.
pub fn clean_output_dirs(root: &Path) -> anyhow::Result<CleanReport> {
    let mut removed = Vec::new();
    for dir in [BUILD_DIR, DIST_DIR] {
        let p = root.join(dir);
        if p.exists() {
            std::fs::remove_dir_all(&p)?;
            removed.push(dir.to_string());
        }
    }
    Ok(CleanReport { removed })
}

pub fn bundle_doctor(plan: &BundlePlan) -> BundleDoctorReport {
    let packager_ok = Command::new(&plan.packager)
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false);

    let produced = plan.resolve(&plan.source_artifact);
    let checks = vec![
        CheckItem {
            name: "root_dir".to_string(),
            status: if plan.root.is_dir() { "ok" } else { "missing" }.to_string(),
        },
        CheckItem {
            name: "packager".to_string(),
            status: if packager_ok { "ok" } else { "missing" }.to_string(),
        },
        CheckItem {
            name: "assets_dir".to_string(),
            status: if plan.resolve(&plan.assets_dir).is_dir() {
                "ok"
            } else {
                "missing"
            }
            .to_string(),
        },
        CheckItem {
            name: "source_artifact".to_string(),
            status: if produced.is_file() { "ok" } else { "pending" }.to_string(),
        },
    ];

    let overall = if checks
        .iter()
        .all(|c| c.status == "ok" || c.status == "pending")
    {
        "ok"
    } else {
        "needs_attention"
    }
    .to_string();

    BundleDoctorReport { overall, checks }
}

/// The one-shot sequence: cleanup, preflight, invoke, stage, verify.
pub fn bundle_build(plan: &BundlePlan, skip_clean: bool) -> anyhow::Result<BundleReport> {
    if !plan.root.is_dir() {
        return Err(coded(
            "PRECONDITION_FAILED",
            format!("bundle root not found: {}", plan.root.display()),
        ));
    }

    let cleaned = if skip_clean {
        Vec::new()
    } else {
        clean_output_dirs(&plan.root)?.removed
    };

    let assets = plan.resolve(&plan.assets_dir);
    if !assets.is_dir() {
        return Err(coded(
            "PRECONDITION_FAILED",
            format!("bundled data directory not found: {}", assets.display()),
        ));
    }

    // Blocks until the tool exits; its status decides the outcome.
    let status = Command::new(&plan.packager)
        .args(&plan.packager_args)
        .current_dir(&plan.root)
        .status()
        .map_err(|e| {
            coded(
                "PACKAGER_FAILED",
                format!("failed to launch {}: {}", plan.packager, e),
            )
        })?;

    if !status.success() {
        return Err(coded(
            "PACKAGER_FAILED",
            match status.code() {
                Some(code) => format!("{} exited with status {}", plan.packager, code),
                None => format!("{} was terminated by a signal", plan.packager),
            },
        ));
    }

    let produced = plan.resolve(&plan.source_artifact);
    if !produced.is_file() {
        return Err(coded(
            "ARTIFACT_MISSING",
            format!(
                "{} reported success but {} was not produced",
                plan.packager,
                produced.display()
            ),
        ));
    }

    let dist = plan.root.join(DIST_DIR);
    std::fs::create_dir_all(&dist)?;
    let staged = plan.dist_artifact();
    std::fs::copy(&produced, &staged)?;

    let assets_name = assets
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| DEFAULT_ASSETS_DIR.to_string());
    copy_dir_all(&assets, &dist.join(&assets_name))?;

    let artifact_present = staged.is_file();
    if !artifact_present {
        return Err(coded(
            "ARTIFACT_MISSING",
            format!("staged artifact missing: {}", staged.display()),
        ));
    }

    Ok(BundleReport {
        overall: "ok".to_string(),
        cleaned,
        packager: plan.packager.clone(),
        exit_code: status.code(),
        artifact: staged.to_string_lossy().to_string(),
        artifact_present,
        assets: assets_name,
    })
}

fn copy_dir_all(src: &Path, dst: &Path) -> anyhow::Result<()> {
    if dst.exists() {
        std::fs::remove_dir_all(dst)?;
    }
    std::fs::create_dir_all(dst)?;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let ty = entry.file_type()?;
        let to = dst.join(entry.file_name());
        if ty.is_dir() {
            copy_dir_all(&entry.path(), &to)?;
        } else {
            std::fs::copy(entry.path(), to)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::CodedError;

    fn plan_in(root: &Path) -> BundlePlan {
        BundlePlan::new(root.to_str().unwrap(), None, Vec::new(), None, None, None)
    }

    #[test]
    fn default_plan_uses_fixed_names() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let plan = plan_in(tmp.path());
        assert_eq!(plan.packager, "cargo");
        assert_eq!(plan.packager_args, vec!["build", "--release"]);
        assert_eq!(plan.app_name, "StickerFrameGenerator");
        assert!(plan
            .dist_artifact()
            .to_string_lossy()
            .contains("dist/StickerFrameGenerator"));
    }

    #[test]
    fn custom_packager_does_not_inherit_default_args() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let plan = BundlePlan::new(
            tmp.path().to_str().unwrap(),
            Some("sh".to_string()),
            Vec::new(),
            None,
            None,
            None,
        );
        assert!(plan.packager_args.is_empty());
    }

    #[test]
    fn clean_is_a_noop_without_output_dirs() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let report = clean_output_dirs(tmp.path()).expect("clean");
        assert!(report.removed.is_empty());
    }

    #[test]
    fn clean_removes_both_dirs_with_contents() {
        let tmp = tempfile::tempdir().expect("tempdir");
        for dir in ["build", "dist"] {
            let d = tmp.path().join(dir).join("nested");
            std::fs::create_dir_all(&d).expect("mkdirs");
            std::fs::write(d.join("junk.bin"), b"junk").expect("write junk");
        }
        let report = clean_output_dirs(tmp.path()).expect("clean");
        assert_eq!(report.removed, vec!["build", "dist"]);
        assert!(!tmp.path().join("build").exists());
        assert!(!tmp.path().join("dist").exists());
    }

    #[test]
    fn build_fails_before_invocation_without_assets() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let plan = plan_in(tmp.path());
        let err = bundle_build(&plan, false).unwrap_err();
        let coded = err.downcast_ref::<CodedError>().expect("coded");
        assert_eq!(coded.code, "PRECONDITION_FAILED");
    }

    #[test]
    fn missing_packager_is_a_launch_failure() {
        let tmp = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(tmp.path().join("test_stickers")).expect("assets");
        let plan = BundlePlan::new(
            tmp.path().to_str().unwrap(),
            Some("definitely-not-a-real-packager".to_string()),
            Vec::new(),
            None,
            None,
            None,
        );
        let err = bundle_build(&plan, false).unwrap_err();
        let coded = err.downcast_ref::<CodedError>().expect("coded");
        assert_eq!(coded.code, "PACKAGER_FAILED");
    }
}
