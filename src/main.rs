//! Admission Dashboard - Admission Source vs Confirmation Status
//!
//! Upload a CSV / Excel file of admission records and explore the top sources.

use admission_dashboard::config::DashboardConfig;
use admission_dashboard::gui::DashboardApp;
use admission_dashboard::logging;
use eframe::egui;

fn main() -> eframe::Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Logging disabled: {}", e);
    }

    let config = DashboardConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Using default settings: {:#}", e);
        DashboardConfig::default()
    });

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("Admission Source Analysis"),
        ..Default::default()
    };

    eframe::run_native(
        "Admission Source Analysis",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
}
