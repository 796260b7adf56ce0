//! GUI module - User interface components

mod app;
mod chart_viewer;
mod control_panel;

pub use app::DashboardApp;
pub use chart_viewer::{ChartViewer, StaticChart};
pub use control_panel::{ControlPanel, ControlPanelAction, UserSettings};
