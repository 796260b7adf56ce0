//! Chart Viewer Widget
//! Central scrollable panel: cross tabulation, both bar charts and the data preview.

use crate::charts::{ChartError, ChartPlotter, CHART_TITLE};
use crate::data::RawTable;
use crate::session::Analysis;
use egui::{ColorImage, RichText, ScrollArea, TextureHandle, TextureOptions};

const SECTION_SPACING: f32 = 15.0;
const INTERACTIVE_CHART_HEIGHT: f32 = 420.0;

/// Pre-rendered static chart pixels waiting to be uploaded as a texture.
pub struct StaticChart {
    pub width: u32,
    pub height: u32,
    pub pixels: Result<Vec<u8>, ChartError>,
}

/// Displays the results of the latest render pass.
#[derive(Default)]
pub struct ChartViewer {
    analysis: Option<Analysis>,
    sample: Option<RawTable>,
    static_chart: Option<StaticChart>,
    texture: Option<TextureHandle>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all results; nothing partial stays on screen after a failure.
    pub fn clear(&mut self) {
        self.analysis = None;
        self.sample = None;
        self.static_chart = None;
        self.texture = None;
    }

    pub fn set_analysis(&mut self, analysis: Analysis, sample: RawTable, static_chart: StaticChart) {
        self.analysis = Some(analysis);
        self.sample = Some(sample);
        self.static_chart = Some(static_chart);
        self.texture = None;
    }

    /// Upload the static chart once per render pass.
    fn ensure_texture(&mut self, ctx: &egui::Context) {
        if self.texture.is_some() {
            return;
        }
        if let Some(StaticChart {
            width,
            height,
            pixels: Ok(pixels),
        }) = &self.static_chart
        {
            let image = ColorImage::from_rgb([*width as usize, *height as usize], pixels);
            self.texture = Some(ctx.load_texture("static_chart", image, TextureOptions::LINEAR));
        }
    }

    pub fn show(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        self.ensure_texture(ctx);

        let Some(analysis) = &self.analysis else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };
        let ranked = &analysis.ranked;

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.label(
                    RichText::new(format!(
                        "📊 {} vs {} (Top {} Sources)",
                        ranked.source_column,
                        ranked.confirm_column,
                        ranked.rows.len()
                    ))
                    .size(18.0)
                    .strong(),
                );
                ui.add_space(8.0);

                if ranked.is_empty() {
                    ui.label(RichText::new("The table has no rows to count.").size(13.0));
                } else {
                    ChartPlotter::draw_crosstab_table(ui, ranked);

                    ui.add_space(SECTION_SPACING);
                    ui.label(RichText::new("📊 Interactive Bar Chart").size(16.0).strong());
                    ChartPlotter::draw_bar_chart(ui, ranked, INTERACTIVE_CHART_HEIGHT);

                    ui.add_space(SECTION_SPACING);
                    ui.label(RichText::new(format!("📈 {}", CHART_TITLE)).size(16.0).strong());
                    match (&self.texture, &self.static_chart) {
                        (Some(texture), _) => {
                            let width = ui.available_width().min(texture.size_vec2().x);
                            ui.add(egui::Image::new(texture).max_width(width));
                        }
                        (None, Some(StaticChart { pixels: Err(e), .. })) => {
                            ui.label(
                                RichText::new(format!("Chart unavailable: {}", e))
                                    .color(egui::Color32::from_rgb(220, 53, 69)),
                            );
                        }
                        _ => {}
                    }
                }

                ui.add_space(SECTION_SPACING);
                if let Some(sample) = &self.sample {
                    egui::CollapsingHeader::new(format!(
                        "🔍 Preview Cleaned Data (Sample of {} of {} rows)",
                        sample.row_count(),
                        analysis.cleaned.row_count()
                    ))
                    .default_open(false)
                    .show(ui, |ui| {
                        ChartPlotter::draw_table_preview(ui, sample);
                    });
                }
            });
    }
}
