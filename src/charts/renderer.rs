//! Static Chart Renderer
//! Draws the ranked cross tabulation as a grouped bar chart into an RGB buffer.
//!
//! Layout:
//! 1. Caption centered on top
//! 2. One slot per source value along x, bars colored by confirmation value
//! 3. Legend in the upper right corner

use super::{bar_center, bar_width, series_color};
use crate::stats::RankedTopN;
use plotters::coord::Shift;
use plotters::prelude::*;
use thiserror::Error;

pub const CHART_TITLE: &str = "Admission Source vs Confirmation Status";

/// Largest edge accepted for the static chart texture.
pub const MAX_CHART_DIMENSION: u32 = 4096;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Chart render error: {0}")]
    Render(String),
    #[error("Nothing to draw")]
    Empty,
    #[error("Invalid chart size {0}x{1}")]
    InvalidSize(u32, u32),
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render to a row-major RGB pixel buffer of `width * height * 3` bytes.
    pub fn render_rgb(ranked: &RankedTopN, width: u32, height: u32) -> Result<Vec<u8>, ChartError> {
        if ranked.is_empty() {
            return Err(ChartError::Empty);
        }
        if width < 200 || height < 150 || width > MAX_CHART_DIMENSION || height > MAX_CHART_DIMENSION {
            return Err(ChartError::InvalidSize(width, height));
        }

        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            Self::draw(&root, ranked).map_err(|e| ChartError::Render(e.to_string()))?;
            root.present()
                .map_err(|e| ChartError::Render(e.to_string()))?;
        }
        Ok(buffer)
    }

    fn draw<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        ranked: &RankedTopN,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        root.fill(&WHITE)?;

        let slots = ranked.rows.len();
        let n_series = ranked.confirm_values.len();
        let y_max = (ranked.max_count() as f64 * 1.1).max(1.0);
        let labels: Vec<&str> = ranked.rows.iter().map(|r| r.source.as_str()).collect();

        let mut chart = ChartBuilder::on(root)
            .caption(CHART_TITLE, ("sans-serif", 24))
            .margin(15)
            .x_label_area_size(60)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5f64..(slots as f64 - 0.5), 0f64..y_max)?;

        let x_label = |x: &f64| {
            if (x - x.round()).abs() > 1e-6 || *x < 0.0 {
                return String::new();
            }
            labels.get(x.round() as usize).map(|s| s.to_string()).unwrap_or_default()
        };
        let y_label = |y: &f64| format!("{:.0}", y);

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(slots)
            .x_label_formatter(&x_label)
            .y_label_formatter(&y_label)
            .x_label_style(("sans-serif", 11))
            .x_desc(ranked.source_column.as_str())
            .y_desc("Count")
            .draw()?;

        let half = bar_width(n_series) / 2.0;
        for (series_idx, confirm) in ranked.confirm_values.iter().enumerate() {
            let (r, g, b) = series_color(series_idx);
            let color = RGBColor(r, g, b);

            chart
                .draw_series(ranked.rows.iter().enumerate().map(|(slot, row)| {
                    let center = bar_center(slot, series_idx, n_series);
                    Rectangle::new(
                        [
                            (center - half, 0.0),
                            (center + half, row.counts[series_idx] as f64),
                        ],
                        color.filled(),
                    )
                }))?
                .label(confirm.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        Ok(())
    }
}
