use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::query::SiteFilter;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel: site dropdown and payload range sliders.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state below.
    let sites = dataset.sites.clone();
    let (payload_min, payload_max) = (dataset.payload_min, dataset.payload_max);

    // ---- Site dropdown ----
    ui.strong("Launch Site");
    let selected_text = state.site_filter.to_string();
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(&selected_text)
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(state.site_filter.is_all(), SiteFilter::AllSites.to_string())
                .clicked()
            {
                state.set_site_filter(SiteFilter::AllSites);
            }
            for site in &sites {
                let is_selected = state.site_filter == SiteFilter::Site(site.clone());
                if ui.selectable_label(is_selected, site).clicked() {
                    state.set_site_filter(SiteFilter::Site(site.clone()));
                }
            }
        });

    ui.separator();

    // ---- Payload range sliders ----
    ui.strong("Payload range (kg)");
    let mut low = state.payload_low;
    let mut high = state.payload_high;

    let low_moved = ui
        .add(egui::Slider::new(&mut low, payload_min..=payload_max).text("Min"))
        .changed();
    let high_moved = ui
        .add(egui::Slider::new(&mut high, payload_min..=payload_max).text("Max"))
        .changed();

    if low_moved || high_moved {
        state.set_payload_range(low, high, low_moved);
    }

    ui.add_space(4.0);
    ui.label(format!("{:.0} – {:.0} kg", state.payload_low, state.payload_high));
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
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} launches loaded, {} shown",
                ds.len(),
                state.scatter_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} launches from {} sites",
                    dataset.len(),
                    dataset.sites.len()
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
