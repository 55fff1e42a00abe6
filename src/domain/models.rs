use crate::cli::{Algorithm, BorderSide, GradientType, OutputFormat};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

/// Error carrying a stable machine-readable code for the `--json` envelope.
#[derive(Debug)]
pub struct CodedError {
    pub code: &'static str,
    pub message: String,
}

impl std::fmt::Display for CodedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CodedError {}

pub fn coded(code: &'static str, message: impl Into<String>) -> anyhow::Error {
    anyhow::Error::new(CodedError {
        code,
        message: message.into(),
    })
}

/// Frame generation settings. Every field is defaulted so older or partial
/// config files keep loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    pub template_size: (u32, u32),
    pub output_size: (u32, u32),
    pub sticker_dir: String,
    pub sticker_density: f32,
    pub min_sticker_size: u32,
    pub max_sticker_size: u32,
    pub border_width: u32,
    /// How far stickers may run past the template edge, in pixels.
    pub border_overlap: u32,
    pub overlap_allowed: bool,
    pub random_rotation: bool,
    pub random_opacity: bool,
    pub min_opacity: f32,
    pub max_opacity: f32,
    pub background: [u8; 4],
    pub output_format: OutputFormat,
    pub border_sides: BorderSide,
    pub gradient_density: bool,
    pub gradient_type: GradientType,
    pub algorithm: Algorithm,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            template_size: (1200, 800),
            output_size: (1920, 1080),
            sticker_dir: String::new(),
            sticker_density: 0.6,
            min_sticker_size: 40,
            max_sticker_size: 150,
            border_width: 100,
            border_overlap: 20,
            overlap_allowed: true,
            random_rotation: true,
            random_opacity: false,
            min_opacity: 0.7,
            max_opacity: 1.0,
            background: [0, 0, 0, 0],
            output_format: OutputFormat::Png,
            border_sides: BorderSide::All,
            gradient_density: false,
            gradient_type: GradientType::Linear,
            algorithm: Algorithm::Scatter,
        }
    }
}

#[derive(Serialize)]
pub struct GenerateReport {
    pub output: String,
    pub template_size: (u32, u32),
    pub output_size: (u32, u32),
    pub algorithm: String,
    pub format: String,
    pub stickers_loaded: usize,
    pub placed: usize,
    pub attempts: usize,
    pub seed: Option<u64>,
}

#[derive(Serialize, Clone, Debug)]
pub struct LibraryEntry {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub format: String,
}

#[derive(Serialize)]
pub struct SynthReport {
    pub dir: String,
    pub created: Vec<String>,
}

#[derive(Serialize)]
pub struct CheckItem {
    pub name: String,
    pub status: String,
}

#[derive(Serialize)]
pub struct BundleDoctorReport {
    pub overall: String,
    pub checks: Vec<CheckItem>,
}

#[derive(Serialize)]
pub struct CleanReport {
    pub removed: Vec<String>,
}

#[derive(Serialize, Debug)]
pub struct BundleReport {
    pub overall: String,
    pub cleaned: Vec<String>,
    pub packager: String,
    pub exit_code: Option<i32>,
    pub artifact: String,
    pub artifact_present: bool,
    pub assets: String,
}
