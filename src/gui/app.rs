//! Admission Dashboard Main Application
//! Main window with control panel and results viewer.

use crate::charts::StaticChartRenderer;
use crate::config::DashboardConfig;
use crate::data::{FileFormat, NormalizeOptions};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction, StaticChart};
use crate::session::{Selection, Session};
use egui::SidePanel;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Main application window.
///
/// Every interaction re-runs the whole pipeline on the UI thread.
pub struct DashboardApp {
    config: DashboardConfig,
    normalize: NormalizeOptions,
    session: Option<Session>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    rng: StdRng,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let rng = match config.sample_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            normalize: config.normalize_options(),
            control_panel: ControlPanel::new(config.top_n()),
            chart_viewer: ChartViewer::new(),
            session: None,
            config,
            rng,
        }
    }

    /// Handle file selection: a new upload replaces all prior state
    fn handle_browse_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Admission Data", &FileFormat::EXTENSIONS)
            .pick_file()
        else {
            return;
        };

        self.chart_viewer.clear();
        self.session = None;
        self.control_panel.settings.file_path = Some(path.clone());

        match Session::open_path(&path) {
            Ok(session) => {
                let table = session.table();
                let top_n = self.control_panel.settings.selection().top_n;
                let selection = Selection::default_for(table, top_n);
                self.control_panel
                    .update_columns(table.columns().to_vec(), selection);
                self.control_panel.set_status(&format!(
                    "✅ File loaded successfully ({} records)",
                    table.row_count()
                ));
                self.session = Some(session);
                self.run_analysis();
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "Upload rejected: {}", e);
                self.control_panel.update_columns(Vec::new(), None);
                self.control_panel.set_error(&e.to_string(), e.hints());
            }
        }
    }

    /// Full render pass for the current session and selection
    fn run_analysis(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        if !self.control_panel.has_selection() {
            return;
        }

        let selection = self.control_panel.settings.selection();
        match session.analyze(&selection, &self.normalize) {
            Ok(analysis) => {
                let sample = analysis.sample(self.config.sample_size, &mut self.rng);
                let (width, height) = (self.config.chart_width, self.config.chart_height);
                let pixels = StaticChartRenderer::render_rgb(&analysis.ranked, width, height);
                if let Err(e) = &pixels {
                    tracing::warn!("Static chart not rendered: {}", e);
                }

                self.control_panel.set_status(&format!(
                    "✅ {} records, showing {} sources",
                    analysis.cleaned.row_count(),
                    analysis.ranked.rows.len()
                ));
                self.chart_viewer.set_analysis(
                    analysis,
                    sample,
                    StaticChart {
                        width,
                        height,
                        pixels,
                    },
                );
            }
            Err(e) => {
                tracing::warn!("Analysis failed: {}", e);
                self.chart_viewer.clear();
                self.control_panel.set_error(&e.to_string(), &[]);
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::BrowseFile => self.handle_browse_file(),
                        ControlPanelAction::SelectionChanged => self.run_analysis(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Results
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ctx, ui);
        });
    }
}
