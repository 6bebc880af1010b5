use eframe::egui::{self, ScrollArea, Ui};

use crate::config::AppConfig;
use crate::state::AppState;
use crate::ui::{charts, metrics, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct AirportExplorerApp {
    pub state: AppState,
}

impl AirportExplorerApp {
    /// Create the app and load the configured dataset once.
    pub fn new(config: &AppConfig) -> Self {
        let mut state = AppState::new(config);
        state.load(&config.data_path);
        Self { state }
    }
}

impl eframe::App for AirportExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts and metrics ----
        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard(ui, &self.state);
        });
    }
}

fn dashboard(ui: &mut Ui, state: &AppState) {
    if state.table.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No airport data loaded  (File → Open…)");
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("New England Airport Explorer");
            ui.label("Explore the data through the following visualizations:");
            ui.add_space(8.0);

            ui.strong("Airport Map");
            charts::airport_map(ui, state);
            ui.add_space(12.0);

            ui.strong("Average Elevation by State");
            charts::elevation_bar_chart(ui, state);
            ui.add_space(12.0);

            ui.strong("Airport Distribution");
            charts::radar_chart(ui, state);
            ui.add_space(12.0);

            ui.strong("Elevation Spread");
            charts::elevation_box_plot(ui, state);
            ui.add_space(12.0);

            metrics::key_metrics(ui, state);
            ui.add_space(8.0);
            metrics::airport_table(ui, state);
        });
}
