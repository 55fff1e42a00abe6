use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::domain::constants::DEFAULT_ASSETS_DIR;

#[derive(Parser, Debug)]
#[command(name = "framegen", version, about = "Sticker Frame Generator CLI")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        help = "Config file path (default: $HOME/.config/framegen/config.json)"
    )]
    pub config: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Generate {
        #[arg(long, help = "Sticker library directory")]
        stickers: Option<String>,
        #[arg(long, help = "Output image path")]
        out: Option<String>,
        #[arg(long, value_enum)]
        algorithm: Option<Algorithm>,
        #[arg(long, help = "Seed for reproducible runs")]
        seed: Option<u64>,
        #[arg(long, value_parser = parse_size, help = "Template size as WxH")]
        template: Option<(u32, u32)>,
        #[arg(long, value_parser = parse_size, help = "Output size as WxH")]
        output_size: Option<(u32, u32)>,
        #[arg(long, help = "Sticker density between 0.0 and 1.0")]
        density: Option<f32>,
        #[arg(long, value_enum)]
        sides: Option<BorderSide>,
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
    Stickers {
        #[command(subcommand)]
        command: StickersCommands,
    },
    Validate {
        #[arg(long, help = "Sticker library directory")]
        dir: Option<String>,
    },
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    Bundle {
        #[command(subcommand)]
        command: BundleCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum StickersCommands {
    List {
        #[arg(long, help = "Sticker library directory")]
        dir: Option<String>,
    },
    Synth {
        #[arg(long, default_value = DEFAULT_ASSETS_DIR)]
        dir: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    Show,
    Init,
}

#[derive(Subcommand, Debug)]
pub enum BundleCommands {
    Build {
        #[arg(long, default_value = ".")]
        root: String,
        #[arg(long, help = "Packaging tool executable")]
        packager: Option<String>,
        #[arg(long = "packager-arg", allow_hyphen_values = true, help = "Argument passed to the packaging tool")]
        packager_args: Vec<String>,
        #[arg(long, help = "Executable the packaging tool produces")]
        source_artifact: Option<String>,
        #[arg(long, help = "Data directory bundled into dist")]
        assets: Option<String>,
        #[arg(long, help = "Name of the staged executable")]
        name: Option<String>,
        #[arg(long, default_value_t = false)]
        skip_clean: bool,
    },
    Clean {
        #[arg(long, default_value = ".")]
        root: String,
    },
    Doctor {
        #[arg(long, default_value = ".")]
        root: String,
        #[arg(long)]
        packager: Option<String>,
        #[arg(long)]
        assets: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    Scatter,
    Uniform,
    Gradient,
    Corner,
}

impl Algorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Scatter => "scatter",
            Algorithm::Uniform => "uniform",
            Algorithm::Gradient => "gradient",
            Algorithm::Corner => "corner",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BorderSide {
    All,
    Top,
    Bottom,
    Left,
    Right,
    TopBottom,
    LeftRight,
    Corners,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum GradientType {
    Linear,
    Radial,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Png,
    Jpeg,
    Webp,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Webp => "webp",
        }
    }
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got `{s}`"))?;
    let w: u32 = w.trim().parse().map_err(|_| format!("bad width in `{s}`"))?;
    let h: u32 = h.trim().parse().map_err(|_| format!("bad height in `{s}`"))?;
    if w == 0 || h == 0 {
        return Err(format!("zero dimension in `{s}`"));
    }
    Ok((w, h))
}
