use crate::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;

pub fn handle_runtime_commands(cli: &Cli, cfg: &FrameConfig) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Generate {
            stickers,
            out,
            algorithm,
            seed,
            template,
            output_size,
            density,
            sides,
            format,
        } => {
            let mut cfg = cfg.clone();
            if let Some(dir) = stickers {
                cfg.sticker_dir = dir.clone();
            }
            if let Some(a) = algorithm {
                cfg.algorithm = *a;
            }
            if let Some(t) = template {
                cfg.template_size = *t;
            }
            if let Some(o) = output_size {
                cfg.output_size = *o;
            }
            if let Some(d) = density {
                if !(0.0..=1.0).contains(d) {
                    return Err(coded(
                        "BAD_CONFIG",
                        format!("density must be between 0.0 and 1.0, got {}", d),
                    ));
                }
                cfg.sticker_density = *d;
            }
            if let Some(s) = sides {
                cfg.border_sides = *s;
            }
            if let Some(f) = format {
                cfg.output_format = *f;
            }

            if cfg.sticker_dir.is_empty() {
                return Err(coded(
                    "STICKER_DIR_MISSING",
                    "no sticker directory configured; pass --stickers or set sticker_dir",
                ));
            }
            let loaded = load_stickers(Path::new(&cfg.sticker_dir))?;
            if loaded.is_empty() {
                return Err(coded(
                    "EMPTY_LIBRARY",
                    format!("no usable stickers in {}", cfg.sticker_dir),
                ));
            }

            let mut rng = match seed {
                Some(s) => StdRng::seed_from_u64(*s),
                None => StdRng::from_entropy(),
            };
            let outcome = generate(&cfg, &loaded, &mut rng);

            let out_path = out.clone().unwrap_or_else(|| {
                format!(
                    "sticker_frame_{}x{}_{}.{}",
                    cfg.template_size.0,
                    cfg.template_size.1,
                    cfg.algorithm.as_str(),
                    cfg.output_format.extension()
                )
            });
            save_image(
                &outcome.image,
                Path::new(&out_path),
                cfg.output_format,
                cfg.background,
            )?;
            audit(
                "generate",
                serde_json::json!({"output": out_path, "placed": outcome.placed}),
            );

            let report = GenerateReport {
                output: out_path,
                template_size: cfg.template_size,
                output_size: cfg.output_size,
                algorithm: cfg.algorithm.as_str().to_string(),
                format: cfg.output_format.extension().to_string(),
                stickers_loaded: loaded.len(),
                placed: outcome.placed,
                attempts: outcome.attempts,
                seed: *seed,
            };
            print_one(cli.json, report, |r| {
                format!("generated {} ({} stickers placed)", r.output, r.placed)
            })?;
        }
        Commands::Stickers { command } => match command {
            StickersCommands::List { dir } => {
                let dir = resolve_library_dir(dir.as_deref(), cfg)?;
                let entries = scan_library(Path::new(&dir))?;
                print_out(cli.json, &entries, |e| {
                    format!("{}\t{}x{}\t{}", e.name, e.width, e.height, e.format)
                })?;
            }
            StickersCommands::Synth { dir } => {
                let mut rng = StdRng::from_entropy();
                let created = synth_library(Path::new(dir), &mut rng)?;
                audit(
                    "stickers_synth",
                    serde_json::json!({"dir": dir, "count": created.len()}),
                );
                let report = SynthReport {
                    dir: dir.clone(),
                    created,
                };
                print_one(cli.json, report, |r| {
                    format!("created {} test stickers in {}", r.created.len(), r.dir)
                })?;
            }
        },
        Commands::Validate { dir } => {
            let dir = resolve_library_dir(dir.as_deref(), cfg)?;
            let count = validate_library(Path::new(&dir))?;
            print_one(cli.json, "valid", |_| {
                format!("library valid ({} stickers)", count)
            })?;
        }
        Commands::Config { .. } | Commands::Bundle { .. } => {
            unreachable!("handled before config loading")
        }
    }

    Ok(())
}

fn resolve_library_dir(flag: Option<&str>, cfg: &FrameConfig) -> anyhow::Result<String> {
    match flag {
        Some(d) => Ok(d.to_string()),
        None if !cfg.sticker_dir.is_empty() => Ok(cfg.sticker_dir.clone()),
        None => Err(coded(
            "STICKER_DIR_MISSING",
            "no sticker directory configured; pass --dir or set sticker_dir",
        )),
    }
}
