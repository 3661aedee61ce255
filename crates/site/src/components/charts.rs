//! Chart components for the dashboard: a signup sparkline and bar rows.
//!
//! Both render as inline SVG with geometry computed here, so the page needs
//! no inline styles or client-side charting.

use creatorum_core::aggregates::CountRow;

/// Sparkline canvas width in SVG user units.
pub const SPARKLINE_WIDTH: u32 = 280;

/// Sparkline canvas height in SVG user units.
pub const SPARKLINE_HEIGHT: u32 = 80;

/// SVG path data for `points` drawn across the sparkline canvas.
///
/// The y axis runs from zero to `max(1, max(points))`, so an all-zero series
/// is a flat line along the bottom edge. A single point sits at `x = 0`.
#[must_use]
#[allow(clippy::cast_precision_loss)] // Point counts and values are small
pub fn sparkline_path(points: &[usize]) -> String {
    let width = f64::from(SPARKLINE_WIDTH);
    let height = f64::from(SPARKLINE_HEIGHT);
    let max = points.iter().copied().max().unwrap_or(0).max(1) as f64;
    let step = if points.len() <= 1 {
        width
    } else {
        width / (points.len() - 1) as f64
    };

    points
        .iter()
        .enumerate()
        .map(|(i, &p)| {
            let command = if i == 0 { 'M' } else { 'L' };
            let x = i as f64 * step;
            let y = height - (p as f64 / max) * height;
            format!("{command} {x:.2} {y:.2}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Bar fill as a whole percentage of `max`; zero when `max` is zero.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn bar_width(value: usize, max: usize) -> u8 {
    if max == 0 {
        return 0;
    }
    let percent = (value as f64 / max as f64 * 100.0).round();
    percent.clamp(0.0, 100.0) as u8
}

/// The momentum card's sparkline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sparkline {
    pub path: String,
    pub width: u32,
    pub height: u32,
}

impl Sparkline {
    #[must_use]
    pub fn new(points: &[usize]) -> Self {
        Self {
            path: sparkline_path(points),
            width: SPARKLINE_WIDTH,
            height: SPARKLINE_HEIGHT,
        }
    }
}

/// One labelled bar in the role mix or top goals cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarRow {
    pub label: String,
    pub value: usize,
    /// Fill percentage, 0 to 100.
    pub width: u8,
}

impl BarRow {
    /// Bars for `rows`, each scaled against `max`.
    #[must_use]
    pub fn from_counts(rows: &[CountRow], max: usize) -> Vec<Self> {
        rows.iter()
            .map(|row| Self {
                label: row.label.clone(),
                value: row.count,
                width: bar_width(row.count, max),
            })
            .collect()
    }
}
