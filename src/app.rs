use eframe::egui::{self, Ui};

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{panels, plot, tables};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct MovieDashApp {
    pub state: AppState,
}

impl MovieDashApp {
    /// Build the app and read the configured CSV straight away.
    pub fn new(config: &DashboardConfig) -> Self {
        let mut state = AppState::new(config);
        state.load();
        Self { state }
    }
}

impl eframe::App for MovieDashApp {
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

        // ---- Central panel: metrics, tables, charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard(ui, &self.state);
        });
    }
}

fn dashboard(ui: &mut Ui, state: &AppState) {
    let (Some(dataset), Some(views)) = (&state.dataset, &state.views) else {
        ui.centered_and_justified(|ui: &mut Ui| {
            match &state.status_message {
                Some(msg) => ui.heading(msg),
                None => ui.heading("Open a movie CSV to begin  (File → Open…)"),
            };
        });
        return;
    };

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(format!("Displaying {} movies", views.filtered.len()));
            tables::metric_tiles(ui, &views.summary);
            ui.separator();

            ui.heading(format!("Filtered Movie Data ({} records)", views.filtered.len()));
            tables::filtered_table(
                ui,
                dataset,
                &views.filtered,
                &views.display_columns,
                state.table_height,
            );
            ui.separator();

            ui.heading(format!("Top {} Genres by Movie Count", state.limits.top_genres));
            plot::genre_bar_chart(ui, &views.genre_ranking);
            ui.separator();

            ui.heading("Rating vs Revenue");
            plot::rating_revenue_scatter(ui, &views.scatter, &state.color_map);
            ui.separator();

            ui.heading("Correlation Heatmap");
            plot::correlation_heatmap(ui, &views.correlation);
            ui.separator();

            ui.heading("Star Categories");
            tables::star_categories(ui, dataset, &views.star_buckets);
            ui.separator();

            ui.heading(format!("Top {} Movies by Revenue", state.limits.top_revenue));
            tables::top_revenue_table(ui, dataset, &views.top_revenue);
        });
}
