//! Candidate position generation for sticker placement.
//!
//! Coordinates are signed: stickers may start above/left of the template
//! origin by up to `border_overlap` pixels and get clipped at composite
//! time.

use crate::cli::{Algorithm, BorderSide, GradientType};
use crate::domain::models::FrameConfig;
use rand::seq::SliceRandom;
use rand::Rng;

pub type Pos = (i64, i64);
pub type Rect = (i64, i64, i64, i64);

/// A sticker already committed to the frame, for overlap checks.
pub struct Placed {
    pub pos: Pos,
    pub size: (u32, u32),
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Side {
    Top,
    Bottom,
    Left,
    Right,
    Corners,
}

fn active_sides(sides: BorderSide) -> Vec<Side> {
    match sides {
        BorderSide::All => vec![Side::Top, Side::Bottom, Side::Left, Side::Right],
        BorderSide::Top => vec![Side::Top],
        BorderSide::Bottom => vec![Side::Bottom],
        BorderSide::Left => vec![Side::Left],
        BorderSide::Right => vec![Side::Right],
        BorderSide::TopBottom => vec![Side::Top, Side::Bottom],
        BorderSide::LeftRight => vec![Side::Left, Side::Right],
        BorderSide::Corners => vec![Side::Corners],
    }
}

/// Inclusive randint that tolerates inverted bounds instead of panicking on
/// degenerate template/border combinations.
fn randint(rng: &mut impl Rng, lo: i64, hi: i64) -> i64 {
    if hi <= lo {
        lo
    } else {
        rng.gen_range(lo..=hi)
    }
}

/// Rectangle kept free of stickers. Falls back to a 10px minimum when the
/// border would swallow the whole template.
pub fn inner_zone(cfg: &FrameConfig) -> Rect {
    let (tw, th) = (cfg.template_size.0 as i64, cfg.template_size.1 as i64);
    let mut border = cfg.border_width as i64;
    let mut inner_w = tw - 2 * border;
    let mut inner_h = th - 2 * border;

    if inner_w <= 0 || inner_h <= 0 {
        inner_w = (tw - 20).max(10);
        inner_h = (th - 20).max(10);
        border = (tw - inner_w).min(th - inner_h) / 2;
    }

    (border, border, border + inner_w, border + inner_h)
}

pub fn rects_overlap(a: Rect, b: Rect) -> bool {
    !(a.2 <= b.0 || a.0 >= b.2 || a.3 <= b.1 || a.1 >= b.3)
}

/// A candidate is valid when it stays within the template extended by the
/// overlap margin, is not fully inside the protected inner zone, and (when
/// overlap is disallowed) intersects no placed sticker.
pub fn is_position_valid(
    cfg: &FrameConfig,
    inner: Rect,
    pos: Pos,
    size: (u32, u32),
    placed: &[Placed],
) -> bool {
    let (tw, th) = (cfg.template_size.0 as i64, cfg.template_size.1 as i64);
    let ov = cfg.border_overlap as i64;
    let (x, y) = pos;
    let (w, h) = (size.0 as i64, size.1 as i64);

    if x + w < -ov || x > tw + ov {
        return false;
    }
    if y + h < -ov || y > th + ov {
        return false;
    }

    let rect = (x, y, x + w, y + h);
    if rects_overlap(rect, inner)
        && x >= inner.0
        && x + w <= inner.2
        && y >= inner.1
        && y + h <= inner.3
    {
        return false;
    }

    if !cfg.overlap_allowed {
        for p in placed {
            let pr = (
                p.pos.0,
                p.pos.1,
                p.pos.0 + p.size.0 as i64,
                p.pos.1 + p.size.1 as i64,
            );
            if rects_overlap(rect, pr) {
                return false;
            }
        }
    }

    true
}

pub fn candidate_positions(cfg: &FrameConfig, rng: &mut impl Rng) -> Vec<Pos> {
    match cfg.algorithm {
        Algorithm::Scatter => scatter_positions(cfg, rng),
        Algorithm::Uniform => uniform_positions(cfg, rng),
        Algorithm::Gradient => gradient_positions(cfg, rng),
        Algorithm::Corner => corner_positions(cfg, rng),
    }
}

/// Density factor in [0, 1] used to thin placements when gradient density
/// is on. The scatter strategy never thins.
pub fn density_at(cfg: &FrameConfig, pos: Pos, rng: &mut impl Rng) -> f32 {
    if !cfg.gradient_density {
        return 1.0;
    }
    let (tw, th) = (cfg.template_size.0 as f32, cfg.template_size.1 as f32);
    let (x, y) = (pos.0 as f32, pos.1 as f32);

    match cfg.algorithm {
        Algorithm::Scatter => 1.0,
        Algorithm::Uniform => match cfg.gradient_type {
            GradientType::Linear => {
                let (cx, cy) = (tw / 2.0, th / 2.0);
                let dist = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
                let max = (cx.powi(2) + cy.powi(2)).sqrt();
                (dist / max).clamp(0.3, 1.0)
            }
            GradientType::Radial => rng.gen_range(0.3..1.0),
        },
        Algorithm::Gradient => {
            let dx = (x - tw / 2.0).abs() / (tw / 2.0);
            let dy = (y - th / 2.0).abs() / (th / 2.0);
            match cfg.gradient_type {
                GradientType::Linear => (dx * dx + dy * dy).sqrt().clamp(0.1, 1.0),
                GradientType::Radial => {
                    let base = (dx + dy) / 2.0;
                    (base + rng.gen_range(-0.2..0.2)).clamp(0.1, 1.0)
                }
            }
        }
        Algorithm::Corner => {
            let corners = [(0.0, 0.0), (tw, 0.0), (0.0, th), (tw, th)];
            let min_dist = corners
                .iter()
                .map(|(cx, cy)| ((x - cx).powi(2) + (y - cy).powi(2)).sqrt())
                .fold(f32::INFINITY, f32::min);
            let max = ((tw / 2.0).powi(2) + (th / 2.0).powi(2)).sqrt();
            match cfg.gradient_type {
                GradientType::Linear => (1.0 - min_dist / max).clamp(0.2, 1.0),
                GradientType::Radial => {
                    (1.0 - min_dist / max + rng.gen_range(-0.3..0.3)).clamp(0.1, 1.0)
                }
            }
        }
    }
}

/// Stepped sweep along each active side with random jitter into the border
/// band.
fn scatter_positions(cfg: &FrameConfig, rng: &mut impl Rng) -> Vec<Pos> {
    let (tw, th) = (cfg.template_size.0 as i64, cfg.template_size.1 as i64);
    let border = cfg.border_width as i64;
    let ov = cfg.border_overlap as i64;
    let step = (border / 10).max(5) as usize;
    let sides = active_sides(cfg.border_sides);

    let mut positions = Vec::new();

    if sides.contains(&Side::Top) {
        for x in ((-ov)..(tw + ov)).step_by(step) {
            positions.push((x, randint(rng, -ov, border / 2)));
        }
    }
    if sides.contains(&Side::Bottom) {
        for x in ((-ov)..(tw + ov)).step_by(step) {
            positions.push((x, th - randint(rng, 1, border / 2 + ov)));
        }
    }
    if sides.contains(&Side::Left) {
        for y in (border..(th - border)).step_by(step) {
            positions.push((randint(rng, -ov, border / 2), y));
        }
    }
    if sides.contains(&Side::Right) {
        for y in (border..(th - border)).step_by(step) {
            positions.push((tw - randint(rng, 1, border / 2 + ov), y));
        }
    }
    if sides.contains(&Side::Corners) {
        let corner = border + ov;
        for x in ((-ov)..corner).step_by(step) {
            for y in ((-ov)..corner).step_by(step) {
                positions.push((x, y));
                positions.push((tw - x - 1, y));
                positions.push((x, th - y - 1));
                positions.push((tw - x - 1, th - y - 1));
            }
        }
    }

    positions
}

/// Fixed number of uniformly random positions per active side.
fn uniform_positions(cfg: &FrameConfig, rng: &mut impl Rng) -> Vec<Pos> {
    const PER_SIDE: usize = 50;

    let (tw, th) = (cfg.template_size.0 as i64, cfg.template_size.1 as i64);
    let border = cfg.border_width as i64;
    let ov = cfg.border_overlap as i64;
    let sides = active_sides(cfg.border_sides);

    let mut positions = Vec::new();

    if sides.contains(&Side::Top) {
        for _ in 0..PER_SIDE {
            positions.push((randint(rng, -ov, tw + ov), randint(rng, -ov, border / 2)));
        }
    }
    if sides.contains(&Side::Bottom) {
        for _ in 0..PER_SIDE {
            positions.push((
                randint(rng, -ov, tw + ov),
                randint(rng, th - border / 2 - ov, th + ov),
            ));
        }
    }
    if sides.contains(&Side::Left) {
        for _ in 0..PER_SIDE {
            positions.push((randint(rng, -ov, border / 2), randint(rng, border, th - border)));
        }
    }
    if sides.contains(&Side::Right) {
        for _ in 0..PER_SIDE {
            positions.push((
                randint(rng, tw - border / 2 - ov, tw + ov),
                randint(rng, border, th - border),
            ));
        }
    }
    if sides.contains(&Side::Corners) {
        let corner = border + ov;
        for _ in 0..(PER_SIDE / 4) {
            positions.push((randint(rng, -ov, corner), randint(rng, -ov, corner)));
            positions.push((
                randint(rng, tw - corner - ov, tw + ov),
                randint(rng, -ov, corner),
            ));
            positions.push((
                randint(rng, -ov, corner),
                randint(rng, th - corner - ov, th + ov),
            ));
            positions.push((
                randint(rng, tw - corner - ov, tw + ov),
                randint(rng, th - corner - ov, th + ov),
            ));
        }
    }

    positions
}

/// Positions biased toward each side's center; the band narrows toward the
/// side ends.
fn gradient_positions(cfg: &FrameConfig, rng: &mut impl Rng) -> Vec<Pos> {
    const TOTAL: usize = 300;

    let (tw, th) = (cfg.template_size.0 as i64, cfg.template_size.1 as i64);
    let border = cfg.border_width as i64;
    let ov = cfg.border_overlap as i64;
    let sides = active_sides(cfg.border_sides);
    if sides.is_empty() {
        return Vec::new();
    }

    let mut positions = Vec::new();

    for _ in 0..TOTAL {
        let side = *sides.choose(rng).unwrap_or(&Side::Top);
        match side {
            Side::Top => {
                let x = randint(rng, -ov, tw + ov);
                let cf = (x - tw / 2).abs() as f64 / (tw as f64 / 2.0);
                let band = ((border / 2) as f64 * (1.0 - cf * 0.5)) as i64;
                positions.push((x, randint(rng, -ov, band.max(1))));
            }
            Side::Bottom => {
                let x = randint(rng, -ov, tw + ov);
                let cf = (x - tw / 2).abs() as f64 / (tw as f64 / 2.0);
                let band = ((border / 2) as f64 * (1.0 - cf * 0.5)) as i64;
                positions.push((x, th - randint(rng, 1, (band + ov).max(1))));
            }
            Side::Left => {
                let y = randint(rng, border, th - border);
                let cf = (y - th / 2).abs() as f64 / (th as f64 / 2.0);
                let band = ((border / 2) as f64 * (1.0 - cf * 0.5)) as i64;
                positions.push((randint(rng, -ov, band.max(1)), y));
            }
            Side::Right => {
                let y = randint(rng, border, th - border);
                let cf = (y - th / 2).abs() as f64 / (th as f64 / 2.0);
                let band = ((border / 2) as f64 * (1.0 - cf * 0.5)) as i64;
                positions.push((tw - randint(rng, 1, (band + ov).max(1)), y));
            }
            Side::Corners => {
                let corner = border + ov;
                let dist: f64 = rng.gen_range(0.0..1.0);
                let xo = (corner as f64 * dist) as i64;
                let yo = (corner as f64 * dist) as i64;
                positions.push(pick_corner(rng, tw, th, xo, yo));
            }
        }
    }

    positions
}

/// 70% of positions clustered quadratically into the four corners, the rest
/// sparse on active sides.
fn corner_positions(cfg: &FrameConfig, rng: &mut impl Rng) -> Vec<Pos> {
    const TOTAL: usize = 200;

    let (tw, th) = (cfg.template_size.0 as i64, cfg.template_size.1 as i64);
    let border = cfg.border_width as i64;
    let ov = cfg.border_overlap as i64;
    let sides = active_sides(cfg.border_sides);

    let corner_n = TOTAL * 7 / 10;
    let side_n = TOTAL - corner_n;
    let corner = border + ov;

    let mut positions = Vec::new();

    for _ in 0..corner_n {
        // squared for heavier clustering at the corner itself
        let dist: f64 = rng.gen_range(0.0..1.0f64).powi(2);
        let xo = (corner as f64 * dist) as i64;
        let yo = (corner as f64 * dist) as i64;
        positions.push(pick_corner(rng, tw, th, xo, yo));
    }

    for _ in 0..side_n {
        if sides.contains(&Side::Top) && rng.gen_bool(0.25) {
            positions.push((randint(rng, -ov, tw + ov), randint(rng, -ov, border / 4)));
        }
        if sides.contains(&Side::Bottom) && rng.gen_bool(0.25) {
            positions.push((
                randint(rng, -ov, tw + ov),
                th - randint(rng, 1, border / 4 + ov),
            ));
        }
        if sides.contains(&Side::Left) && rng.gen_bool(0.25) {
            positions.push((randint(rng, -ov, border / 4), randint(rng, border, th - border)));
        }
        if sides.contains(&Side::Right) && rng.gen_bool(0.25) {
            positions.push((
                tw - randint(rng, 1, border / 4 + ov),
                randint(rng, border, th - border),
            ));
        }
    }

    positions
}

fn pick_corner(rng: &mut impl Rng, tw: i64, th: i64, xo: i64, yo: i64) -> Pos {
    match rng.gen_range(0..4u8) {
        0 => (-xo, -yo),
        1 => (tw + xo, -yo),
        2 => (-xo, th + yo),
        _ => (tw + xo, th + yo),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cfg() -> FrameConfig {
        FrameConfig::default()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn inner_zone_leaves_border_band() {
        let c = cfg();
        assert_eq!(inner_zone(&c), (100, 100, 1100, 700));
    }

    #[test]
    fn inner_zone_degenerate_border_falls_back() {
        let mut c = cfg();
        c.template_size = (120, 90);
        c.border_width = 100;
        let (x0, y0, x1, y1) = inner_zone(&c);
        assert!(x1 > x0 && y1 > y0);
        assert!(x1 - x0 >= 10 && y1 - y0 >= 10);
    }

    #[test]
    fn rects_overlap_basics() {
        assert!(rects_overlap((0, 0, 10, 10), (5, 5, 15, 15)));
        assert!(!rects_overlap((0, 0, 10, 10), (10, 0, 20, 10)));
        assert!(!rects_overlap((0, 0, 10, 10), (0, 10, 10, 20)));
    }

    #[test]
    fn position_fully_inside_inner_zone_is_rejected() {
        let c = cfg();
        let inner = inner_zone(&c);
        assert!(!is_position_valid(&c, inner, (500, 400), (50, 50), &[]));
        // straddling the inner edge is fine
        assert!(is_position_valid(&c, inner, (80, 400), (50, 50), &[]));
    }

    #[test]
    fn position_outside_overlap_margin_is_rejected() {
        let c = cfg();
        let inner = inner_zone(&c);
        assert!(!is_position_valid(&c, inner, (1300, 0), (50, 50), &[]));
        assert!(!is_position_valid(&c, inner, (-100, 0), (50, 50), &[]));
    }

    #[test]
    fn overlap_disallowed_rejects_intersections() {
        let mut c = cfg();
        c.overlap_allowed = false;
        let inner = inner_zone(&c);
        let placed = vec![Placed {
            pos: (0, 0),
            size: (60, 60),
        }];
        assert!(!is_position_valid(&c, inner, (30, 30), (50, 50), &placed));
        assert!(is_position_valid(&c, inner, (700, 0), (50, 50), &placed));
    }

    #[test]
    fn every_algorithm_yields_candidates() {
        for alg in [
            Algorithm::Scatter,
            Algorithm::Uniform,
            Algorithm::Gradient,
            Algorithm::Corner,
        ] {
            let mut c = cfg();
            c.algorithm = alg;
            let got = candidate_positions(&c, &mut rng());
            assert!(!got.is_empty(), "{:?} produced no candidates", alg);
        }
    }

    #[test]
    fn top_only_candidates_stay_in_top_band() {
        let mut c = cfg();
        c.border_sides = BorderSide::Top;
        c.algorithm = Algorithm::Uniform;
        let ov = c.border_overlap as i64;
        for (x, y) in candidate_positions(&c, &mut rng()) {
            assert!(y >= -ov && y <= c.border_width as i64 / 2);
            assert!(x >= -ov && x <= c.template_size.0 as i64 + ov);
        }
    }

    #[test]
    fn density_is_one_without_gradient_flag() {
        let c = cfg();
        assert_eq!(density_at(&c, (0, 0), &mut rng()), 1.0);
    }

    #[test]
    fn corner_density_peaks_at_corners() {
        let mut c = cfg();
        c.algorithm = Algorithm::Corner;
        c.gradient_density = true;
        let near = density_at(&c, (0, 0), &mut rng());
        let far = density_at(&c, (600, 400), &mut rng());
        assert!(near > far);
    }
}
