//! Control Panel Widget
//! Left side panel with file upload, column selection and display settings.

use crate::session::Selection;
use crate::stats::TopN;
use egui::{Color32, ComboBox, RichText};
use std::path::PathBuf;

/// User settings for the analysis
#[derive(Default, Clone)]
pub struct UserSettings {
    pub file_path: Option<PathBuf>,
    pub source_col: String,
    pub confirm_col: String,
    pub top_n: usize,
}

impl UserSettings {
    pub fn selection(&self) -> Selection {
        Selection {
            source_column: self.source_col.clone(),
            confirm_column: self.confirm_col.clone(),
            top_n: TopN::clamped(self.top_n),
        }
    }
}

/// Left side control panel with file selection and analysis controls.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub columns: Vec<String>,
    pub status: String,
    pub hints: Vec<String>,
    pub is_error: bool,
}

impl ControlPanel {
    pub fn new(default_top_n: TopN) -> Self {
        Self {
            settings: UserSettings {
                top_n: default_top_n.get(),
                ..UserSettings::default()
            },
            columns: Vec::new(),
            status: "Please upload a CSV or Excel file to continue.".to_string(),
            hints: Vec::new(),
            is_error: false,
        }
    }

    /// Replace the column choices after a new upload
    pub fn update_columns(&mut self, columns: Vec<String>, selection: Option<Selection>) {
        self.columns = columns;
        match selection {
            Some(sel) => {
                self.settings.source_col = sel.source_column;
                self.settings.confirm_col = sel.confirm_column;
            }
            None => {
                self.settings.source_col.clear();
                self.settings.confirm_col.clear();
            }
        }
    }

    pub fn has_selection(&self) -> bool {
        !self.settings.source_col.is_empty() && !self.settings.confirm_col.is_empty()
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🎓 Admission Sources")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Upload Section =====
        ui.label(RichText::new("📂 Upload File").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .settings
                        .file_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.settings.file_path.is_some() {
                            ui.visuals().text_color()
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseFile;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Column Settings =====
        ui.label(RichText::new("⚙️ Column Settings").size(14.0).strong());
        ui.add_space(8.0);

        let label_width = 110.0;
        let combo_width = 150.0;

        let columns = &self.columns;
        for (id, label, value) in [
            ("source_col", "Source Column:", &mut self.settings.source_col),
            ("confirm_col", "Confirm Column:", &mut self.settings.confirm_col),
        ] {
            ui.horizontal(|ui| {
                ui.add_sized([label_width, 20.0], egui::Label::new(label));
                ComboBox::from_id_salt(id)
                    .width(combo_width)
                    .selected_text(value.as_str())
                    .show_ui(ui, |ui| {
                        // Duplicate header names resolve to the first match, list each once.
                        for (i, col) in columns.iter().enumerate() {
                            if columns[..i].contains(col) {
                                continue;
                            }
                            if ui.selectable_label(*value == *col, col).clicked() && *value != *col {
                                *value = col.clone();
                                action = ControlPanelAction::SelectionChanged;
                            }
                        }
                    });
            });
            ui.add_space(5.0);
        }

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Display Settings =====
        ui.label(RichText::new("📊 Display Settings").size(14.0).strong());
        ui.add_space(5.0);

        let slider = egui::Slider::new(&mut self.settings.top_n, TopN::MIN..=TopN::MAX)
            .text("Top N Sources");
        if ui.add(slider).changed() {
            action = ControlPanelAction::SelectionChanged;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        let status_color = if self.is_error {
            Color32::from_rgb(220, 53, 69)
        } else if self.has_selection() {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(12.0).color(status_color));

        if !self.hints.is_empty() {
            ui.add_space(5.0);
            ui.label(RichText::new("Possible reasons:").size(11.0));
            for hint in &self.hints {
                ui.label(RichText::new(format!("• {}", hint)).size(11.0));
            }
        }

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
        self.hints.clear();
        self.is_error = false;
    }

    pub fn set_error(&mut self, error: &str, hints: &[&str]) {
        self.status = format!("Error: {}", error);
        self.hints = hints.iter().map(|h| h.to_string()).collect();
        self.is_error = true;
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseFile,
    SelectionChanged,
}
