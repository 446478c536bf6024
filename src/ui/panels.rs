use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::{PayloadRange, SiteSelection};
use crate::state::{AppState, PAYLOAD_STEP_KG};

// ---------------------------------------------------------------------------
// Left side panel – filter controls
// ---------------------------------------------------------------------------

/// Render the left control panel: site selector and payload range.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    // Clone what we need so we can mutate state below.
    let sites = dataset.sites.clone();
    let record_count = dataset.len();

    // ---- Site selector ----
    ui.strong("Launch Site");
    let current = state.selection.site.clone();
    egui::ComboBox::from_id_salt("site_select")
        .selected_text(current.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(current == SiteSelection::All, "All Sites")
                .clicked()
            {
                state.set_site(SiteSelection::All);
            }
            for site in &sites {
                let candidate = SiteSelection::Site(site.clone());
                if ui.selectable_label(current == candidate, site).clicked() {
                    state.set_site(candidate);
                }
            }
        });

    ui.add_space(8.0);
    ui.separator();

    // ---- Payload range ----
    ui.strong("Payload range (kg)");
    let (lo, hi) = state.payload_slider_bounds();
    let mut min = state.selection.payload.min;
    let mut max = state.selection.payload.max;

    // Render both sliders before applying the change so neither skips a frame.
    let changed = ui
        .add(
            egui::Slider::new(&mut min, lo..=hi)
                .step_by(PAYLOAD_STEP_KG)
                .text("min"),
        )
        .changed()
        | ui.add(
            egui::Slider::new(&mut max, lo..=hi)
                .step_by(PAYLOAD_STEP_KG)
                .text("max"),
        )
        .changed();

    if changed {
        state.set_payload_range(PayloadRange { min, max });
    }

    ui.add_space(8.0);
    ui.separator();

    if let Some(scatter) = &state.scatter_chart {
        ui.label(format!(
            "{} of {record_count} launches in range",
            scatter.points.len()
        ));
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
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} launch records, {} sites",
                ds.len(),
                ds.sites.len()
            ));
        }

        if state.loading {
            ui.separator();
            ui.label("Loading…");
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
        state.loading = true;
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} launch records from {} sites",
                    dataset.len(),
                    dataset.sites.len()
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
                state.loading = false;
            }
        }
    }
}
