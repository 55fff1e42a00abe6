//! Stable constants shared across commands and services.

/// Name of the packaged application artifact.
pub const APP_NAME: &str = "StickerFrameGenerator";

/// Output directories removed by the bundle cleanup step.
pub const BUILD_DIR: &str = "build";
pub const DIST_DIR: &str = "dist";

/// Data directory bundled next to the packaged executable.
pub const DEFAULT_ASSETS_DIR: &str = "test_stickers";

/// Default packaging tool and its fixed argument list.
pub const DEFAULT_PACKAGER: &str = "cargo";
pub const DEFAULT_PACKAGER_ARGS: &[&str] = &["build", "--release"];

/// Where the packaging tool leaves the executable before staging.
pub const DEFAULT_SOURCE_ARTIFACT: &str = "target/release/framegen";

/// File extensions accepted when scanning a sticker library.
pub const STICKER_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Scatter loop limits. Attempts cap the whole run; the sample bounds how
/// many candidate positions one sticker may try before being discarded.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 500;
pub const POSITION_SAMPLE: usize = 20;

/// Config directory under `$HOME`.
pub const CONFIG_DIR: &str = ".config/framegen";
