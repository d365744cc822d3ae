//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! The x axis is `log10(f)`; one series is drawn with `-`, an optional
//! reference series with `.` underneath it.

/// A named series on a shared frequency axis.
#[derive(Debug, Clone, Copy)]
pub struct Series<'a> {
    pub label: &'a str,
    pub values: &'a [f64],
}

/// Render `series` (and optionally `reference`) against log-frequency.
///
/// Samples with non-finite values or non-positive frequency are skipped.
pub fn render_ascii_plot(
    frequencies: &[f64],
    series: Series<'_>,
    reference: Option<Series<'_>>,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let main = points(frequencies, series.values);
    let refs = reference.map(|r| points(frequencies, r.values)).unwrap_or_default();

    let (x_min, x_max) = x_range(&main, &refs).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = y_range(&main, &refs).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Reference first so the main series overlays it.
    draw_curve(&mut grid, &refs, x_min, x_max, y_min, y_max, '.');
    draw_curve(&mut grid, &main, x_min, x_max, y_min, y_max, '-');

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: f=[{:.3}, {:.3}] Hz | {}=[{y_min:.4e}, {y_max:.4e}]",
        10f64.powf(x_min),
        10f64.powf(x_max),
        series.label,
    ));
    if let Some(r) = reference {
        out.push_str(&format!(" | ref={}", r.label));
    }
    out.push('\n');

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn points(frequencies: &[f64], values: &[f64]) -> Vec<(f64, f64)> {
    frequencies
        .iter()
        .zip(values)
        .filter(|&(&f, &y)| f > 0.0 && f.is_finite() && y.is_finite())
        .map(|(&f, &y)| (f.log10(), y))
        .collect()
}

fn x_range(a: &[(f64, f64)], b: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    for &(x, _) in a.iter().chain(b) {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
    }
    if min_x.is_finite() && max_x.is_finite() && max_x > min_x {
        Some((min_x, max_x))
    } else {
        None
    }
}

fn y_range(a: &[(f64, f64)], b: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for &(_, y) in a.iter().chain(b) {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(
    grid: &mut [Vec<char>],
    curve: &[(f64, f64)],
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    ch: char,
) {
    let Some(first) = grid.first() else {
        return;
    };
    let width = first.len();
    let height = grid.len();

    let mut prev = None;
    for &(x, y) in curve {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        match prev {
            Some((c0, r0)) => draw_line(grid, c0, r0, col, row, ch),
            None => grid[row][col] = ch,
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham). Overwrites blanks and the reference glyph.
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
        if y0 >= 0 && (y0 as usize) < grid.len() && x0 >= 0 && (x0 as usize) < grid[0].len() {
            let cell = &mut grid[y0 as usize][x0 as usize];
            if *cell == ' ' || *cell == '.' {
                *cell = ch;
            }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_golden_snapshot_small() {
        // y = log10(f) on one decade: a straight diagonal on a log axis.
        let f = [10.0, 100.0];
        let y = [0.0, 1.0];
        let txt = render_ascii_plot(&f, Series { label: "psi", values: &y }, None, 10, 5);
        let expected = concat!(
            "Plot: f=[10.000, 100.000] Hz | psi=[-5.0000e-2, 1.0500e0]\n",
            "        --\n",
            "      --  \n",
            "    --    \n",
            "  --      \n",
            "--        \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn reference_is_drawn_under_the_series() {
        let f = [10.0, 100.0, 1000.0];
        let flat = [1.0, 1.0, 1.0];
        let rising = [0.0, 1.0, 2.0];
        let txt = render_ascii_plot(
            &f,
            Series { label: "psi", values: &rising },
            Some(Series { label: "psi_gr", values: &flat }),
            20,
            7,
        );
        assert!(txt.lines().next().unwrap().ends_with("| ref=psi_gr"));
        assert!(txt.contains('.'));
        assert!(txt.contains('-'));
    }

    #[test]
    fn non_finite_samples_are_skipped() {
        let f = [10.0, 20.0, 40.0];
        let y = [1.0, f64::NAN, 2.0];
        let txt = render_ascii_plot(&f, Series { label: "amp", values: &y }, None, 10, 5);
        assert_eq!(txt.lines().count(), 6);
    }
}
