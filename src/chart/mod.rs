//! Plain-text bar charts of frequency series

use std::fmt::Write;

use crate::algorithm::frequency::FrequencySeries;

/// Default bar width in characters
pub const DEFAULT_BAR_WIDTH: usize = 50;

/// Widest bar drawn; larger widths are clamped to it
pub const MAX_BAR_WIDTH: usize = 1_000;

const BAR_CHAR: char = '#';

/// Render a series as one horizontal bar per year, scaled to the largest value
#[must_use]
pub fn render_text(series: &FrequencySeries, width: usize) -> String {
    let width = width.min(MAX_BAR_WIDTH);
    let mut out = String::new();
    let _ = writeln!(out, "{}", series.title);
    let _ = writeln!(out, "{}", series.y_label);

    if series.points.is_empty() {
        out.push_str("(no years selected)\n");
        return out;
    }

    let max = series.max_frequency();
    for point in &series.points {
        let filled = if max > 0.0 {
            ((point.frequency / max) * width as f64).round() as usize
        } else {
            0
        };
        let value = if series.normalized {
            format!("{:.3}", point.frequency)
        } else {
            format!("{}", point.frequency)
        };
        let _ = writeln!(
            out,
            "{:>6} | {:<width$} {value}",
            point.year,
            BAR_CHAR.to_string().repeat(filled),
        );
    }
    out
}
