use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – company selector
// ---------------------------------------------------------------------------

/// Render the left selector panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Trending Tickers neste momento:");
    ui.separator();

    let Some(dashboard) = &state.dashboard else {
        ui.label("No dataset loaded.");
        return;
    };

    if dashboard.companies.is_empty() {
        ui.label("The dataset has no companies.");
        return;
    }

    // Clone what we need so we can mutate state after the combo box closes.
    let companies = dashboard.companies.clone();
    let current = state.selected.clone().unwrap_or_default();
    let mut picked: Option<String> = None;

    ui.strong("Escolha uma empresa");
    egui::ComboBox::from_id_salt("company")
        .selected_text(&current)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for company in &companies {
                if ui.selectable_label(current == *company, company).clicked() {
                    picked = Some(company.clone());
                }
            }
        });

    if let Some(company) = picked {
        state.select_company(company);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.rerun();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(dashboard) = &state.dashboard {
            ui.label(format!(
                "{} rows, {} companies, {} unclassified",
                dashboard.rows,
                dashboard.companies.len(),
                dashboard.unclassified
            ));
        }

        ui.separator();
        ui.label(state.config.input.display().to_string());

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open company data")
        .add_filter("Delimited text", &["csv", "txt"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Switching input to {}", path.display());
        state.set_input(path);
    }
}
