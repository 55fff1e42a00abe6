//! Frame composition: the placement loop plus the pixel-level transforms.

use crate::cli::{Algorithm, OutputFormat};
use crate::domain::constants::{MAX_PLACEMENT_ATTEMPTS, POSITION_SAMPLE};
use crate::domain::models::FrameConfig;
use crate::services::placement::{
    candidate_positions, density_at, inner_zone, is_position_valid, Placed,
};
use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use rand::seq::SliceRandom;
use rand::Rng;
use std::path::Path;

pub struct GenerateOutcome {
    pub image: RgbaImage,
    pub placed: usize,
    pub attempts: usize,
}

/// Compose a frame from the loaded stickers. The caller guarantees a
/// non-empty sticker slice.
pub fn generate(
    cfg: &FrameConfig,
    stickers: &[RgbaImage],
    rng: &mut impl Rng,
) -> GenerateOutcome {
    let (tw, th) = cfg.template_size;
    let positions = candidate_positions(cfg, rng);
    let target = positions.len() / 2;
    let inner = inner_zone(cfg);

    let mut canvas = RgbaImage::from_pixel(tw, th, Rgba(cfg.background));
    let mut placed: Vec<Placed> = Vec::new();
    let mut attempts = 0usize;

    // The scatter strategy predates the density gate and never thins.
    let density_gated = cfg.algorithm != Algorithm::Scatter;

    while attempts < MAX_PLACEMENT_ATTEMPTS && placed.len() < target {
        attempts += 1;

        let Some(sticker) = stickers.choose(rng) else {
            break;
        };

        let size = rng.gen_range(cfg.min_sticker_size..=cfg.max_sticker_size.max(cfg.min_sticker_size));
        let (w, h) = scaled_dims(sticker.dimensions(), size, rng);
        let scaled = imageops::resize(sticker, w, h, FilterType::Lanczos3);

        let rotation = if cfg.random_rotation {
            rng.gen_range(-180.0..180.0f32)
        } else {
            0.0
        };
        let opacity = if cfg.random_opacity {
            rng.gen_range(cfg.min_opacity..=cfg.max_opacity.max(cfg.min_opacity))
        } else {
            1.0
        };

        let sample: Vec<(i64, i64)> = positions
            .choose_multiple(rng, POSITION_SAMPLE.min(positions.len()))
            .copied()
            .collect();

        let mut found = false;
        for pos in sample {
            if density_gated {
                let effective = cfg.sticker_density * density_at(cfg, pos, rng);
                if rng.gen::<f32>() > effective {
                    continue;
                }
            }

            if is_position_valid(cfg, inner, pos, (w, h), &placed) {
                let mut transformed = scaled.clone();
                if rotation != 0.0 {
                    transformed = rotate_rgba(&transformed, rotation);
                }
                if opacity < 1.0 {
                    apply_opacity(&mut transformed, opacity);
                }
                imageops::overlay(&mut canvas, &transformed, pos.0, pos.1);
                placed.push(Placed {
                    pos,
                    size: (w, h),
                });
                found = true;
                break;
            }
        }

        if !found {
            break;
        }
    }

    if cfg.output_size != cfg.template_size {
        canvas = imageops::resize(
            &canvas,
            cfg.output_size.0,
            cfg.output_size.1,
            FilterType::Lanczos3,
        );
    }

    GenerateOutcome {
        image: canvas,
        placed: placed.len(),
        attempts,
    }
}

/// Random-axis scaling that preserves the sticker's aspect ratio.
fn scaled_dims(orig: (u32, u32), size: u32, rng: &mut impl Rng) -> (u32, u32) {
    let aspect = orig.0 as f32 / orig.1.max(1) as f32;
    let (w, h) = if rng.gen_bool(0.5) {
        (size, (size as f32 / aspect) as u32)
    } else {
        ((size as f32 * aspect) as u32, size)
    };
    (w.max(1), h.max(1))
}

/// Rotate onto an expanded canvas, bilinear-sampling the source. Pixels
/// mapping outside the source stay fully transparent.
fn rotate_rgba(img: &RgbaImage, degrees: f32) -> RgbaImage {
    let theta = degrees.to_radians();
    let (cos, sin) = (theta.cos(), theta.sin());
    let (w, h) = (img.width() as f32, img.height() as f32);

    let nw = (w * cos.abs() + h * sin.abs()).ceil().max(1.0) as u32;
    let nh = (w * sin.abs() + h * cos.abs()).ceil().max(1.0) as u32;

    let (cx, cy) = (w / 2.0, h / 2.0);
    let (ncx, ncy) = (nw as f32 / 2.0, nh as f32 / 2.0);

    let mut out = RgbaImage::from_pixel(nw, nh, Rgba([0, 0, 0, 0]));
    for y in 0..nh {
        for x in 0..nw {
            let dx = x as f32 + 0.5 - ncx;
            let dy = y as f32 + 0.5 - ncy;
            // inverse rotation back into source space
            let sx = dx * cos - dy * sin + cx - 0.5;
            let sy = dx * sin + dy * cos + cy - 0.5;
            if let Some(px) = sample_bilinear(img, sx, sy) {
                out.put_pixel(x, y, px);
            }
        }
    }
    out
}

fn sample_bilinear(img: &RgbaImage, x: f32, y: f32) -> Option<Rgba<u8>> {
    let (w, h) = (img.width() as i64, img.height() as i64);
    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    if x0 + 1 < 0 || y0 + 1 < 0 || x0 >= w || y0 >= h {
        return None;
    }

    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let fetch = |px: i64, py: i64| -> [f32; 4] {
        if px < 0 || py < 0 || px >= w || py >= h {
            [0.0; 4]
        } else {
            let p = img.get_pixel(px as u32, py as u32);
            [p[0] as f32, p[1] as f32, p[2] as f32, p[3] as f32]
        }
    };

    let p00 = fetch(x0, y0);
    let p10 = fetch(x0 + 1, y0);
    let p01 = fetch(x0, y0 + 1);
    let p11 = fetch(x0 + 1, y0 + 1);

    let mut px = [0u8; 4];
    for c in 0..4 {
        let top = p00[c] * (1.0 - fx) + p10[c] * fx;
        let bottom = p01[c] * (1.0 - fx) + p11[c] * fx;
        px[c] = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8;
    }
    Some(Rgba(px))
}

fn apply_opacity(img: &mut RgbaImage, factor: f32) {
    for px in img.pixels_mut() {
        px[3] = (px[3] as f32 * factor) as u8;
    }
}

/// Write the frame honoring the configured format. JPEG has no alpha, so
/// the image is flattened onto the configured background first.
pub fn save_image(
    img: &RgbaImage,
    path: &Path,
    format: OutputFormat,
    background: [u8; 4],
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Png => img.save_with_format(path, ImageFormat::Png)?,
        OutputFormat::Webp => img.save_with_format(path, ImageFormat::WebP)?,
        OutputFormat::Jpeg => {
            let bg = [background[0], background[1], background[2]];
            let mut flat = RgbImage::from_pixel(img.width(), img.height(), Rgb(bg));
            for (x, y, px) in img.enumerate_pixels() {
                let a = px[3] as f32 / 255.0;
                let mut out = [0u8; 3];
                for c in 0..3 {
                    out[c] = (px[c] as f32 * a + bg[c] as f32 * (1.0 - a)).round() as u8;
                }
                flat.put_pixel(x, y, Rgb(out));
            }
            flat.save_with_format(path, ImageFormat::Jpeg)?;
        }
    }
    Ok(())
}
