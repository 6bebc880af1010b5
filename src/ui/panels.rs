use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::{Category, Region};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel. Every widget change calls the matching
/// state handler, which re-runs the pipeline once.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Customize Your Filters");
    ui.label("Choose filters to explore airport data.");
    ui.separator();

    if state.table.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            region_filter(ui, state);
            ui.separator();

            ui.strong("Maximum Elevation (ft)");
            let mut ceiling = state.controls.elevation_ceiling;
            let slider = egui::Slider::new(&mut ceiling, 0.0..=state.elevation_slider_max)
                .step_by(10.0)
                .suffix(" ft");
            if ui.add(slider).changed() {
                state.set_elevation_ceiling(ceiling);
            }
            ui.separator();

            category_filter(ui, state);
            ui.separator();

            let mut commercial_only = state.controls.commercial_only;
            if ui
                .checkbox(&mut commercial_only, "Only Show Commercial Airports")
                .changed()
            {
                state.set_commercial_only(commercial_only);
            }
            ui.separator();

            if ui.button("Reset filters").clicked() {
                state.reset_filters();
            }
        });
}

fn region_filter(ui: &mut Ui, state: &mut AppState) {
    let header_text = format!(
        "Regions  ({}/{})",
        state.controls.regions.len(),
        Region::ALL.len()
    );
    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt("regions")
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all_regions();
                }
                if ui.small_button("None").clicked() {
                    state.select_no_regions();
                }
            });

            for region in Region::ALL {
                let mut checked = state.controls.regions.contains(&region);
                let text = RichText::new(region.name()).color(state.colors.color_for(region));
                if ui.checkbox(&mut checked, text).changed() {
                    state.set_region(region, checked);
                }
            }
        });
}

fn category_filter(ui: &mut Ui, state: &mut AppState) {
    let header_text = format!(
        "Airport Types  ({}/{})",
        state.controls.categories.len(),
        Category::ALL.len()
    );
    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt("categories")
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all_categories();
                }
                if ui.small_button("None").clicked() {
                    state.select_no_categories();
                }
            });

            for category in Category::ALL {
                let mut checked = state.controls.categories.contains(&category);
                if ui.checkbox(&mut checked, category.label()).changed() {
                    state.set_category(category, checked);
                }
            }
        });
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
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} airports loaded, {} visible",
                table.len(),
                state.view.count
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
        .set_title("Open airport data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load(&path);
    }
}
