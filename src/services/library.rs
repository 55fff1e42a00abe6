//! Sticker library scanning, loading and test-shape synthesis.

use crate::domain::constants::STICKER_EXTENSIONS;
use crate::domain::models::{coded, LibraryEntry};
use image::{Rgba, RgbaImage};
use rand::Rng;
use std::path::{Path, PathBuf};

fn is_sticker_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_ascii_lowercase();
            STICKER_EXTENSIONS.iter().any(|known| *known == e)
        })
        .unwrap_or(false)
}

fn sticker_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(coded(
            "STICKER_DIR_MISSING",
            format!("sticker directory not found: {}", dir.display()),
        ));
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && is_sticker_file(p))
        .collect();
    files.sort();
    Ok(files)
}

pub fn scan_library(dir: &Path) -> anyhow::Result<Vec<LibraryEntry>> {
    let mut entries = Vec::new();
    for path in sticker_files(dir)? {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let format = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match image::image_dimensions(&path) {
            Ok((width, height)) => entries.push(LibraryEntry {
                name,
                width,
                height,
                format,
            }),
            Err(e) => eprintln!("warning: skipping {}: {}", path.display(), e),
        }
    }
    Ok(entries)
}

/// Load every decodable sticker as RGBA; undecodable files are skipped with
/// a warning, matching the tolerant loading of the interactive tool.
pub fn load_stickers(dir: &Path) -> anyhow::Result<Vec<RgbaImage>> {
    let mut stickers = Vec::new();
    for path in sticker_files(dir)? {
        match image::open(&path) {
            Ok(img) => stickers.push(img.into_rgba8()),
            Err(e) => eprintln!("warning: skipping {}: {}", path.display(), e),
        }
    }
    Ok(stickers)
}

pub fn validate_library(dir: &Path) -> anyhow::Result<usize> {
    let stickers = load_stickers(dir)?;
    if stickers.is_empty() {
        return Err(coded(
            "EMPTY_LIBRARY",
            format!("no usable stickers in {}", dir.display()),
        ));
    }
    Ok(stickers.len())
}

/// Synthesize the six standard test shapes into `dir`.
pub fn synth_library(dir: &Path, rng: &mut impl Rng) -> anyhow::Result<Vec<String>> {
    std::fs::create_dir_all(dir)?;

    let shapes: [(&str, Rgba<u8>); 6] = [
        ("circle", Rgba([255, 0, 0, 200])),
        ("square", Rgba([0, 255, 0, 200])),
        ("triangle", Rgba([0, 0, 255, 200])),
        ("star", Rgba([255, 255, 0, 200])),
        ("heart", Rgba([255, 0, 255, 200])),
        ("hexagon", Rgba([0, 255, 255, 200])),
    ];

    let mut created = Vec::new();
    for (i, (shape, color)) in shapes.iter().enumerate() {
        let size = rng.gen_range(100..=300u32);
        let img = draw_shape(shape, size, *color);
        let name = format!("{}_{}.png", shape, i);
        img.save(dir.join(&name))?;
        created.push(name);
    }
    Ok(created)
}

fn draw_shape(shape: &str, size: u32, color: Rgba<u8>) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(size, size, Rgba([0, 0, 0, 0]));
    let s = size as f32;
    let m = 20.0f32;
    let c = s / 2.0;

    match shape {
        "circle" => fill_ellipse(&mut img, c, c, c - m, c - m, color),
        "square" => fill_polygon(
            &mut img,
            &[(m, m), (s - m, m), (s - m, s - m), (m, s - m)],
            color,
        ),
        "triangle" => fill_polygon(&mut img, &[(c, m), (m, s - m), (s - m, s - m)], color),
        "star" => {
            let outer = (s - 2.0 * m) / 2.0;
            let inner = outer / 2.0;
            let mut points = Vec::with_capacity(10);
            for j in 0..5 {
                let mut angle = std::f32::consts::FRAC_PI_2 + j as f32 * std::f32::consts::TAU / 5.0;
                points.push((c + outer * angle.cos(), c + outer * angle.sin()));
                angle += std::f32::consts::PI / 5.0;
                points.push((c + inner * angle.cos(), c + inner * angle.sin()));
            }
            fill_polygon(&mut img, &points, color);
        }
        "heart" => {
            // two lobes plus the tip
            let r = (c - m) / 2.0;
            fill_ellipse(&mut img, m + r, m + r, r, r, color);
            fill_ellipse(&mut img, c + r, m + r, r, r, color);
            fill_polygon(
                &mut img,
                &[(m, s / 4.0), (s - m, s / 4.0), (c, s - m)],
                color,
            );
        }
        "hexagon" => {
            let r = (s - 2.0 * m) / 2.0;
            let points: Vec<(f32, f32)> = (0..6)
                .map(|j| {
                    let angle = j as f32 * std::f32::consts::TAU / 6.0;
                    (c + r * angle.cos(), c + r * angle.sin())
                })
                .collect();
            fill_polygon(&mut img, &points, color);
        }
        _ => {}
    }

    img
}

fn fill_ellipse(img: &mut RgbaImage, cx: f32, cy: f32, rx: f32, ry: f32, color: Rgba<u8>) {
    if rx <= 0.0 || ry <= 0.0 {
        return;
    }
    for y in 0..img.height() {
        for x in 0..img.width() {
            let dx = (x as f32 + 0.5 - cx) / rx;
            let dy = (y as f32 + 0.5 - cy) / ry;
            if dx * dx + dy * dy <= 1.0 {
                img.put_pixel(x, y, color);
            }
        }
    }
}

/// Even-odd scanline fill, good enough for the handful of test shapes.
fn fill_polygon(img: &mut RgbaImage, points: &[(f32, f32)], color: Rgba<u8>) {
    if points.len() < 3 {
        return;
    }
    for y in 0..img.height() {
        let py = y as f32 + 0.5;
        let mut crossings = Vec::new();
        for i in 0..points.len() {
            let (x0, y0) = points[i];
            let (x1, y1) = points[(i + 1) % points.len()];
            if (y0 <= py && py < y1) || (y1 <= py && py < y0) {
                crossings.push(x0 + (py - y0) / (y1 - y0) * (x1 - x0));
            }
        }
        crossings.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        for pair in crossings.chunks(2) {
            if let [start, end] = pair {
                let x0 = start.max(0.0) as u32;
                let x1 = (end.max(0.0) as u32).min(img.width());
                for x in x0..x1 {
                    img.put_pixel(x, y, color);
                }
            }
        }
    }
}
