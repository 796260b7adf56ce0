//! Chart Plotter Module
//! Creates the interactive grouped bar chart and tables using egui / egui_plot.

use super::{bar_center, bar_width, series_color};
use crate::data::RawTable;
use crate::stats::RankedTopN;
use egui::{Color32, RichText, ScrollArea};
use egui_plot::{Bar, BarChart, Corner, GridMark, Legend, Plot};

/// Draws the cross tabulation in its interactive forms.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn color(series_idx: usize) -> Color32 {
        let (r, g, b) = series_color(series_idx);
        Color32::from_rgb(r, g, b)
    }

    /// Grouped bar chart: one slot per source, one colored bar per confirmation value.
    pub fn draw_bar_chart(ui: &mut egui::Ui, ranked: &RankedTopN, height: f32) {
        let labels: Vec<String> = ranked.rows.iter().map(|r| r.source.clone()).collect();
        let slot_count = labels.len();
        let n_series = ranked.confirm_values.len();

        Plot::new("crosstab_bar_chart")
            .height(height)
            .legend(Legend::default().position(Corner::RightTop))
            .allow_scroll(false)
            .include_y(0.0)
            .x_axis_label(ranked.source_column.clone())
            .y_axis_label("Number of Students")
            // One tick per source slot
            .x_grid_spacer(move |_input| {
                (0..slot_count)
                    .map(|i| GridMark {
                        value: i as f64,
                        step_size: 1.0,
                    })
                    .collect()
            })
            .x_axis_formatter(move |mark, _range| {
                let v = mark.value;
                if v < -0.5 || (v - v.round()).abs() > 1e-6 {
                    return String::new();
                }
                labels.get(v.round() as usize).cloned().unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                for (series_idx, confirm) in ranked.confirm_values.iter().enumerate() {
                    let bars: Vec<Bar> = ranked
                        .rows
                        .iter()
                        .enumerate()
                        .map(|(slot, row)| {
                            Bar::new(
                                bar_center(slot, series_idx, n_series),
                                row.counts[series_idx] as f64,
                            )
                            .width(bar_width(n_series))
                            .name(format!("{} / {}", row.source, confirm))
                        })
                        .collect();

                    plot_ui.bar_chart(
                        BarChart::new(bars)
                            .name(confirm)
                            .color(Self::color(series_idx)),
                    );
                }
            });
    }

    /// Cross tabulation grid: sources down, confirmation values across.
    pub fn draw_crosstab_table(ui: &mut egui::Ui, ranked: &RankedTopN) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ScrollArea::horizontal().id_salt("crosstab_scroll").show(ui, |ui| {
                    egui::Grid::new("crosstab_table")
                        .striped(true)
                        .min_col_width(60.0)
                        .spacing([12.0, 4.0])
                        .show(ui, |ui| {
                            ui.label(RichText::new(&ranked.source_column).strong());
                            for (i, confirm) in ranked.confirm_values.iter().enumerate() {
                                ui.label(RichText::new(confirm).strong().color(Self::color(i)));
                            }
                            ui.end_row();

                            for row in &ranked.rows {
                                ui.label(&row.source);
                                for count in &row.counts {
                                    ui.label(count.to_string());
                                }
                                ui.end_row();
                            }
                        });
                });
            });
    }

    /// Plain grid of table rows for the data preview.
    pub fn draw_table_preview(ui: &mut egui::Ui, table: &RawTable) {
        ScrollArea::both()
            .id_salt("preview_scroll")
            .max_height(400.0)
            .show(ui, |ui| {
                egui::Grid::new("preview_table")
                    .striped(true)
                    .min_col_width(60.0)
                    .show(ui, |ui| {
                        for column in table.columns() {
                            ui.label(RichText::new(column).strong().size(11.0));
                        }
                        ui.end_row();

                        for row in table.rows() {
                            for cell in row {
                                let text = if cell.is_missing() {
                                    RichText::new("-").color(Color32::GRAY)
                                } else {
                                    RichText::new(cell.to_string())
                                };
                                ui.label(text.size(11.0));
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}
