use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::Category;
use crate::state::AppState;

/// Total and per-category counters for the current filter.
pub fn key_metrics(ui: &mut Ui, state: &AppState) {
    let counts = &state.view.category_counts;

    ui.heading("Key Metrics");
    egui::Grid::new("key_metrics")
        .num_columns(2)
        .spacing([24.0, 4.0])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Total Airports:");
            ui.monospace(state.view.count.to_string());
            ui.end_row();

            for (label, category) in [
                ("Large Airports:", Category::Large),
                ("Medium Airports:", Category::Medium),
                ("Small Airports:", Category::Small),
            ] {
                ui.strong(label);
                ui.monospace(counts.get(category).to_string());
                ui.end_row();
            }
        });
}

fn elevation_text(elevation_ft: Option<f64>) -> String {
    elevation_ft
        .map(|e| format!("{e:.0}"))
        .unwrap_or_else(|| "n/a".to_string())
}

/// Collapsible list of the airports passing the current filter.
pub fn airport_table(ui: &mut Ui, state: &AppState) {
    let Some(visible) = state.visible_records() else {
        return;
    };

    egui::CollapsingHeader::new(RichText::new(format!("Airports ({})", visible.count)).strong())
        .id_salt("airport_table")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::auto())
                .column(Column::auto().at_least(180.0))
                .column(Column::auto())
                .column(Column::auto())
                .column(Column::auto())
                .column(Column::auto())
                .column(Column::remainder())
                .max_scroll_height(320.0)
                .header(20.0, |mut header| {
                    for title in [
                        "Ident",
                        "Name",
                        "State",
                        "Type",
                        "Elevation (ft)",
                        "Scheduled",
                        "Municipality",
                    ] {
                        header.col(|ui| {
                            ui.strong(title);
                        });
                    }
                })
                .body(|body| {
                    body.rows(18.0, visible.records.len(), |mut row| {
                        let record = visible.records[row.index()];
                        row.col(|ui| {
                            ui.monospace(&record.ident);
                        });
                        row.col(|ui| {
                            ui.label(&record.name);
                        });
                        row.col(|ui| {
                            ui.label(record.region.name())
                                .on_hover_text(record.region.code());
                        });
                        row.col(|ui| {
                            ui.label(record.category.to_string());
                        });
                        row.col(|ui| {
                            ui.label(elevation_text(record.elevation_ft));
                        });
                        row.col(|ui| {
                            ui.label(record.scheduled_service.as_str());
                        });
                        row.col(|ui| {
                            ui.label(record.municipality.as_deref().unwrap_or(""));
                        });
                    });
                });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elevation_text() {
        assert_eq!(elevation_text(Some(1234.4)), "1234");
        assert_eq!(elevation_text(None), "n/a");
    }
}
