// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pass/fail bar chart rendering.
//!
//! Presentation only: chart failures are reported as [`ChartError`] and never
//! feed back into aggregation.

mod glyphs;

use crate::engine::TestOutcome;
use glyphs::{glyph, text_width, GLYPH_HEIGHT, GLYPH_WIDTH};
use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Chart canvas width in pixels
pub const CHART_WIDTH: u32 = 600;
/// Chart canvas height in pixels
pub const CHART_HEIGHT: u32 = 400;

/// Chart title
pub const CHART_TITLE: &str = "Test Case Pass/Fail Distribution";
/// Y axis label, drawn bottom to top
pub const Y_AXIS_LABEL: &str = "Number of Tests";

/// Smallest height of a bar with a non-zero count
const MIN_BAR_HEIGHT: u32 = 2;

const MARGIN_LEFT: u32 = 60;
const MARGIN_RIGHT: u32 = 30;
const MARGIN_TOP: u32 = 60;
const MARGIN_BOTTOM: u32 = 50;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([64, 64, 64]);
const TEXT: Rgb<u8> = Rgb([32, 32, 32]);

/// Errors raised while rendering or writing the chart
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Failed to encode chart: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write chart '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Bar category
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BarKind {
    Passed,
    Failed,
}

impl BarKind {
    pub fn label(&self) -> &'static str {
        match self {
            BarKind::Passed => "Passed",
            BarKind::Failed => "Failed",
        }
    }

    pub fn color(&self) -> Rgb<u8> {
        match self {
            BarKind::Passed => Rgb([46, 160, 67]),
            BarKind::Failed => Rgb([214, 39, 40]),
        }
    }
}

/// One bar: a category and its count
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bar {
    pub kind: BarKind,
    pub count: usize,
}

/// Bars to draw, holding only categories present in the outcome log
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChartData {
    pub bars: Vec<Bar>,
}

impl ChartData {
    /// Count pass/fail outcomes; a category with no outcomes gets no bar
    pub fn from_outcomes(outcomes: &[TestOutcome]) -> Self {
        let passed = outcomes.iter().filter(|o| o.passed).count();
        let failed = outcomes.len() - passed;

        let bars = [(BarKind::Passed, passed), (BarKind::Failed, failed)]
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|(kind, count)| Bar { kind, count })
            .collect();
        Self { bars }
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.bars.iter().map(|b| b.kind.label()).collect()
    }

    pub fn count(&self, kind: BarKind) -> usize {
        self.bars
            .iter()
            .find(|b| b.kind == kind)
            .map_or(0, |b| b.count)
    }

    fn max_count(&self) -> usize {
        self.bars.iter().map(|b| b.count).max().unwrap_or(0)
    }
}

/// Horizontal extent of bar `index` of `n`: (left x, width)
pub fn bar_span(index: usize, n: usize) -> (u32, u32) {
    let plot_width = CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let slot = plot_width / n.max(1) as u32;
    let width = slot * 3 / 5;
    let left = MARGIN_LEFT + slot * index as u32 + (slot - width) / 2;
    (left, width)
}

/// Baseline y coordinate (the x axis)
pub fn baseline() -> u32 {
    CHART_HEIGHT - MARGIN_BOTTOM
}

/// Draw the chart into an RGB image
pub fn render_chart(data: &ChartData) -> RgbImage {
    let mut img = RgbImage::from_pixel(CHART_WIDTH, CHART_HEIGHT, BACKGROUND);
    let base = baseline();

    let title_scale = 2;
    let title_x = CHART_WIDTH.saturating_sub(text_width(CHART_TITLE, title_scale)) / 2;
    draw_text(&mut img, title_x, 20, CHART_TITLE, title_scale, TEXT);

    let label_scale = 2;
    let label_len = text_width(Y_AXIS_LABEL, label_scale);
    let label_bottom = MARGIN_TOP + (base - MARGIN_TOP + label_len) / 2;
    draw_text_vertical(&mut img, 16, label_bottom, Y_AXIS_LABEL, label_scale, TEXT);

    // Axes
    fill_rect(&mut img, MARGIN_LEFT, MARGIN_TOP, 2, base - MARGIN_TOP + 2, AXIS);
    fill_rect(
        &mut img,
        MARGIN_LEFT,
        base,
        CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT,
        2,
        AXIS,
    );

    let max = data.max_count();
    if max == 0 {
        return img;
    }

    // Leave headroom above the tallest bar for its count label
    let plot_height = base - MARGIN_TOP - 30;
    let n = data.bars.len();
    for (index, bar) in data.bars.iter().enumerate() {
        let (left, width) = bar_span(index, n);
        let height = ((bar.count as u64 * plot_height as u64) / max as u64) as u32;
        let height = height.max(MIN_BAR_HEIGHT);
        fill_rect(&mut img, left, base - height, width, height, bar.kind.color());

        let count = bar.count.to_string();
        let count_x = left + width / 2 - text_width(&count, 2).min(width) / 2;
        let count_y = base - height - GLYPH_HEIGHT * 2 - 6;
        draw_text(&mut img, count_x, count_y, &count, 2, TEXT);

        let label = bar.kind.label();
        let label_x = (left + width / 2).saturating_sub(text_width(label, 2) / 2);
        draw_text(&mut img, label_x, base + 12, label, 2, TEXT);
    }

    img
}

/// Encode the chart as PNG bytes
pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>, ChartError> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// Render the outcome log and write it as a PNG, replacing any previous file
pub fn save_chart(outcomes: &[TestOutcome], path: &Path) -> Result<ChartData, ChartError> {
    let data = ChartData::from_outcomes(outcomes);
    let bytes = encode_png(&render_chart(&data))?;
    std::fs::write(path, bytes).map_err(|source| ChartError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(data)
}

fn fill_rect(img: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, color: Rgb<u8>) {
    let x_end = (x + w).min(img.width());
    let y_end = (y + h).min(img.height());
    for py in y..y_end {
        for px in x..x_end {
            img.put_pixel(px, py, color);
        }
    }
}

fn draw_text(img: &mut RgbImage, x: u32, y: u32, text: &str, scale: u32, color: Rgb<u8>) {
    let mut cursor = x;
    for c in text.chars() {
        let rows = glyph(c);
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                    fill_rect(
                        img,
                        cursor + col * scale,
                        y + row as u32 * scale,
                        scale,
                        scale,
                        color,
                    );
                }
            }
        }
        cursor += (GLYPH_WIDTH + 1) * scale;
    }
}

/// Draw text rotated a quarter turn counter-clockwise; `bottom` is the
/// baseline end where the first character starts.
fn draw_text_vertical(
    img: &mut RgbImage,
    x: u32,
    bottom: u32,
    text: &str,
    scale: u32,
    color: Rgb<u8>,
) {
    let mut cursor = bottom;
    for c in text.chars() {
        let rows = glyph(c);
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                    let px = x + row as u32 * scale;
                    let py = cursor.saturating_sub((col + 1) * scale);
                    fill_rect(img, px, py, scale, scale, color);
                }
            }
        }
        cursor = cursor.saturating_sub((GLYPH_WIDTH + 1) * scale);
    }
}

#[cfg(test)]
#[path = "chart_tests.rs"]
mod tests;
