//! ASCII plotting for terminal output: the tail CCDF on log-log axes.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output
//!
//! Plot elements:
//! - empirical CCDF `P(X >= x)` at each distinct tail value: `o`
//! - fitted power-law CCDF: `-` line
//!
//! On log-log axes a power-law tail renders as a straight line, so the eye
//! can judge the fit (and the cutoff) at a glance.

use crate::domain::{PowerLawFit, TailKind};
use crate::math::hurwitz_zeta;

/// Render the empirical tail CCDF with the fitted model overlaid.
///
/// `tail_sorted` must be ascending and entirely `>= fit.xmin`.
pub fn render_ccdf_plot(tail_sorted: &[f64], fit: &PowerLawFit, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let m = tail_sorted.len();
    if m < 2 {
        return String::from("(not enough tail points to plot)\n");
    }

    let empirical = empirical_ccdf(tail_sorted);

    // Log-space ranges. The CCDF spans [1/m, 1]; pad slightly so points at the
    // extremes stay inside the grid.
    let lx_min = fit.xmin.max(f64::MIN_POSITIVE).log10();
    let lx_max = tail_sorted[m - 1].log10();
    let (lx_min, lx_max) = pad_range(lx_min, lx_max, 0.02);
    let ly_min = (1.0 / m as f64).log10();
    let (ly_min, ly_max) = pad_range(ly_min, 0.0, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Draw the fitted curve first so observed points can overlay it.
    let curve = sample_model_ccdf(fit, lx_min, lx_max, width);
    draw_curve(&mut grid, &curve, lx_min, lx_max, ly_min, ly_max);

    for &(x, p) in &empirical {
        let col = map_x(x.log10(), lx_min, lx_max, width);
        let row = map_y(p.log10(), ly_min, ly_max, height);
        grid[row][col] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: log-log CCDF | x=[{:.4}, {:.4}] | P(X>=x)=[{:.2e}, 1]\n",
        fit.xmin,
        tail_sorted[m - 1],
        1.0 / m as f64
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

/// `(x, P(X >= x))` at each distinct tail value.
fn empirical_ccdf(tail_sorted: &[f64]) -> Vec<(f64, f64)> {
    let m = tail_sorted.len();
    let mut out = Vec::new();
    let mut i = 0;
    while i < m {
        let x = tail_sorted[i];
        out.push((x, (m - i) as f64 / m as f64));
        let mut j = i;
        while j < m && tail_sorted[j] == x {
            j += 1;
        }
        i = j;
    }
    out
}

/// Sample the fitted CCDF at `width` log-spaced x positions.
fn sample_model_ccdf(fit: &PowerLawFit, lx_min: f64, lx_max: f64, width: usize) -> Vec<(f64, f64)> {
    let n = width.max(2);
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let u = i as f64 / (n as f64 - 1.0);
        let x = 10f64.powf(lx_min + u * (lx_max - lx_min));
        if x < fit.xmin {
            continue;
        }
        let ccdf = match fit.kind {
            TailKind::Continuous => (x / fit.xmin).powf(1.0 - fit.alpha),
            TailKind::Discrete => {
                // P(X >= x) for integers: a ratio of zeta tails.
                let Some(num) = hurwitz_zeta(fit.alpha, x.ceil().max(fit.xmin)) else {
                    continue;
                };
                let Some(den) = hurwitz_zeta(fit.alpha, fit.xmin) else {
                    continue;
                };
                num / den
            }
        };
        if ccdf > 0.0 && ccdf.is_finite() {
            out.push((x, ccdf));
        }
    }
    out
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs().max(1e-9);
    let pad = span * frac;
    (min - pad, max + pad)
}

fn map_x(lx: f64, lx_min: f64, lx_max: f64, width: usize) -> usize {
    let u = ((lx - lx_min) / (lx_max - lx_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(ly: f64, ly_min: f64, ly_max: f64, height: usize) -> usize {
    let u = ((ly - ly_min) / (ly_max - ly_min)).clamp(0.0, 1.0);
    // Largest probability on the top row.
    (height as f64 - 1.0 - u * (height as f64 - 1.0)).round() as usize
}

fn draw_curve(
    grid: &mut [Vec<char>],
    curve: &[(f64, f64)],
    lx_min: f64,
    lx_max: f64,
    ly_min: f64,
    ly_max: f64,
) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, p) in curve {
        let col = map_x(x.log10(), lx_min, lx_max, width);
        let row = map_y(p.log10(), ly_min, ly_max, height);
        if let Some((c0, r0)) = prev {
            draw_line(grid, c0, r0, col, row, '-');
        } else {
            grid[row][col] = '-';
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish), writing only into empty cells.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
