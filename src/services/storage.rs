use crate::domain::constants::CONFIG_DIR;
use crate::domain::models::{coded, FrameConfig};
use std::path::PathBuf;

pub fn audit(action: &str, data: serde_json::Value) {
    let home = match std::env::var("HOME") {
        Ok(h) => h,
        Err(_) => return,
    };
    let path = PathBuf::from(home).join(CONFIG_DIR).join("audit.jsonl");
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let event = serde_json::json!({
        "ts": epoch_seconds(),
        "action": action,
        "data": data
    });
    let line = format!("{}\n", event);
    let _ = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .and_then(|mut f| std::io::Write::write_all(&mut f, line.as_bytes()));
}

fn epoch_seconds() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    ts.to_string()
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")?;
    Ok(PathBuf::from(home).join(CONFIG_DIR).join("config.json"))
}

/// Effective config: the file named by `--config`, else the default path,
/// else built-in defaults when no file exists yet.
pub fn load_config(override_path: Option<&str>) -> anyhow::Result<FrameConfig> {
    let p = match override_path {
        Some(p) => PathBuf::from(p),
        None => default_config_path()?,
    };
    if !p.exists() {
        if override_path.is_some() {
            return Err(coded(
                "BAD_CONFIG",
                format!("config file not found: {}", p.display()),
            ));
        }
        return Ok(FrameConfig::default());
    }
    let raw = std::fs::read_to_string(&p)?;
    serde_json::from_str(&raw)
        .map_err(|e| coded("BAD_CONFIG", format!("{}: {}", p.display(), e)))
}

pub fn save_config(cfg: &FrameConfig, override_path: Option<&str>) -> anyhow::Result<PathBuf> {
    let p = match override_path {
        Some(p) => PathBuf::from(p),
        None => default_config_path()?,
    };
    if let Some(parent) = p.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&p, serde_json::to_string_pretty(cfg)?)?;
    Ok(p)
}
