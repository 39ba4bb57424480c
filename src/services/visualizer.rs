use plotters::coord::Shift;
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::models::{Column, Table};
use crate::services::stats::value_counts;

pub const HISTOGRAM_BINS: usize = 30;
pub const ID_COLUMN: &str = "id";
pub const DISTRIBUTIONS_FILE: &str = "distributions.svg";
pub const CATEGORICAL_FILE: &str = "categorical.svg";

const PANEL_SIZE: (u32, u32) = (640, 480);
const CAPTION_FONT: (&str, u32) = ("sans-serif", 22);
const LABEL_FONT: (&str, u32) = ("sans-serif", 14);

/// One histogram bucket; `upper` is exclusive except for the last bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Writes the distribution and categorical figures into `output_dir`,
/// creating it if needed. Returns the files written; a figure with no
/// eligible columns is skipped.
pub fn render(table: &Table, output_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, AppError> {
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;

    let mut written = Vec::new();

    let numeric: Vec<&Column> = table
        .columns()
        .iter()
        .filter(|c| c.semantic_type().is_numeric() && c.name != ID_COLUMN)
        .collect();
    if numeric.is_empty() {
        tracing::debug!("No numeric columns to plot, skipping distributions");
    } else {
        let path = output_dir.join(DISTRIBUTIONS_FILE);
        draw_panels(&path, &numeric, draw_histogram)?;
        written.push(path);
    }

    let categorical: Vec<&Column> = table
        .columns()
        .iter()
        .filter(|c| c.semantic_type().is_categorical())
        .collect();
    if categorical.is_empty() {
        tracing::debug!("No categorical columns to plot, skipping counts");
    } else {
        let path = output_dir.join(CATEGORICAL_FILE);
        draw_panels(&path, &categorical, draw_counts)?;
        written.push(path);
    }

    tracing::info!("Visualizations saved to {}", output_dir.display());
    Ok(written)
}

/// One figure, one panel per column laid out in a single row.
fn draw_panels<F>(path: &Path, columns: &[&Column], draw: F) -> Result<(), AppError>
where
    F: Fn(&DrawingArea<SVGBackend<'_>, Shift>, &Column) -> Result<(), AppError>,
{
    let size = (PANEL_SIZE.0 * columns.len() as u32, PANEL_SIZE.1);
    {
        let root = SVGBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE)?;

        let panels = root.split_evenly((1, columns.len()));
        for (panel, &column) in panels.iter().zip(columns) {
            draw(panel, column)?;
        }

        root.present()?;
    }

    tracing::info!("Saved {} ({} panels)", path.display(), columns.len());
    Ok(())
}

fn draw_histogram(area: &DrawingArea<SVGBackend<'_>, Shift>, column: &Column) -> Result<(), AppError> {
    let bins = histogram(&column.numeric_values(), HISTOGRAM_BINS);
    let (x_min, x_max) = match (bins.first(), bins.last()) {
        (Some(first), Some(last)) => (first.lower, last.upper),
        _ => (0.0, 1.0),
    };
    let y_max = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1) as f64 * 1.05;

    let mut chart = ChartBuilder::on(area)
        .caption(format!("Distribution of {}", column.name), CAPTION_FONT)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_min..x_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(column.name.as_str())
        .y_desc("Frequency")
        .label_style(LABEL_FONT)
        .draw()?;

    chart.draw_series(bins.iter().map(|bin| {
        Rectangle::new(
            [(bin.lower, 0.0), (bin.upper, bin.count as f64)],
            BLUE.mix(0.6).filled(),
        )
    }))?;

    Ok(())
}

fn draw_counts(area: &DrawingArea<SVGBackend<'_>, Shift>, column: &Column) -> Result<(), AppError> {
    let counts = value_counts(column.labels());
    let labels: Vec<String> = counts.iter().map(|vc| vc.value.clone()).collect();
    let n = counts.len().max(1) as u32;
    let y_max = counts.first().map_or(0, |vc| vc.count).max(1) as f64 * 1.05;

    let mut chart = ChartBuilder::on(area)
        .caption(format!("Count of {}", column.name), CAPTION_FONT)
        .margin(10)
        .x_label_area_size(70)
        .y_label_area_size(50)
        .build_cartesian_2d((0u32..n).into_segmented(), 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(column.name.as_str())
        .y_desc("Count")
        .x_labels(labels.len().max(1))
        .x_label_style(
            LABEL_FONT
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .draw()?;

    chart.draw_series(counts.iter().enumerate().map(|(i, vc)| {
        let i = i as u32;
        let mut bar = Rectangle::new(
            [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), vc.count as f64)],
            GREEN.mix(0.6).filled(),
        );
        bar.set_margin(0, 0, 6, 6);
        bar
    }))?;

    Ok(())
}

/// Equal-width bins spanning the finite values; a constant series is widened
/// by 0.5 on each side. No finite values means no bins.
pub fn histogram(values: &[f64], bins: usize) -> Vec<Bin> {
    let values: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for v in &values {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| Bin {
            lower: lo + width * i as f64,
            upper: if i + 1 == bins { hi } else { lo + width * (i + 1) as f64 },
            count,
        })
        .collect()
}
