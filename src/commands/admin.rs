use crate::*;
use std::path::Path;

pub fn handle_config_commands(cli: &Cli) -> anyhow::Result<bool> {
    let Commands::Config { command } = &cli.command else {
        return Ok(false);
    };

    match command {
        ConfigCommands::Show => {
            let cfg = load_config(cli.config.as_deref())?;
            print_one(cli.json, cfg, |c| {
                format!(
                    "template: {}x{}\noutput: {}x{}\nalgorithm: {}\nsides: {:?}\nsticker_dir: {}\nformat: {}",
                    c.template_size.0,
                    c.template_size.1,
                    c.output_size.0,
                    c.output_size.1,
                    c.algorithm.as_str(),
                    c.border_sides,
                    if c.sticker_dir.is_empty() { "(unset)" } else { &c.sticker_dir },
                    c.output_format.extension()
                )
            })?;
        }
        ConfigCommands::Init => {
            let path = save_config(&FrameConfig::default(), cli.config.as_deref())?;
            audit(
                "config_init",
                serde_json::json!({"path": path.to_string_lossy()}),
            );
            print_one(cli.json, path.to_string_lossy().to_string(), |p| {
                format!("wrote {}", p)
            })?;
        }
    }

    Ok(true)
}

pub fn handle_bundle_commands(cli: &Cli) -> anyhow::Result<bool> {
    let Commands::Bundle { command } = &cli.command else {
        return Ok(false);
    };

    match command {
        BundleCommands::Build {
            root,
            packager,
            packager_args,
            source_artifact,
            assets,
            name,
            skip_clean,
        } => {
            let plan = BundlePlan::new(
                root,
                packager.clone(),
                packager_args.clone(),
                source_artifact.clone(),
                assets.clone(),
                name.clone(),
            );
            let report = bundle_build(&plan, *skip_clean)?;
            audit(
                "bundle_build",
                serde_json::json!({"root": root, "artifact": report.artifact}),
            );
            print_one(cli.json, report, |r| {
                format!("build complete: {}", r.artifact)
            })?;
        }
        BundleCommands::Clean { root } => {
            let report = clean_output_dirs(Path::new(root))?;
            audit(
                "bundle_clean",
                serde_json::json!({"root": root, "removed": report.removed}),
            );
            print_one(cli.json, report, |r| {
                if r.removed.is_empty() {
                    "nothing to clean".to_string()
                } else {
                    format!("removed {}", r.removed.join(", "))
                }
            })?;
        }
        BundleCommands::Doctor {
            root,
            packager,
            assets,
        } => {
            let plan = BundlePlan::new(
                root,
                packager.clone(),
                Vec::new(),
                None,
                assets.clone(),
                None,
            );
            let report = bundle_doctor(&plan);
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: true,
                        data: report
                    })?
                );
            } else {
                println!("overall: {}", report.overall);
                for c in report.checks {
                    println!("{}\t{}", c.name, c.status);
                }
            }
        }
    }

    Ok(true)
}
