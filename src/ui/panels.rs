use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::GenreSelector;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Movies");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds.clone(),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Genre ----
            ui.strong("Genre");
            let current = state.criteria.genre.to_string();
            egui::ComboBox::from_id_salt("genre_filter")
                .selected_text(&current)
                .width(ui.available_width())
                .show_ui(ui, |ui: &mut Ui| {
                    changed |= ui
                        .selectable_value(&mut state.criteria.genre, GenreSelector::All, "All")
                        .changed();
                    for genre in &dataset.genre_options {
                        changed |= ui
                            .selectable_value(
                                &mut state.criteria.genre,
                                GenreSelector::Exact(genre.clone()),
                                genre.as_str(),
                            )
                            .changed();
                    }
                });
            ui.add_space(6.0);

            // ---- Year range ----
            if let (Some((min, max)), Some((lo, hi))) =
                (dataset.year_bounds, state.criteria.year_range.as_mut())
            {
                ui.strong("Release year");
                changed |= ui
                    .add(egui::Slider::new(lo, min..=max).text("from"))
                    .changed();
                changed |= ui
                    .add(egui::Slider::new(hi, min..=max).text("to"))
                    .changed();
                ui.add_space(6.0);
            }

            // ---- Text searches ----
            ui.strong("Title contains");
            changed |= ui
                .add(
                    egui::TextEdit::singleline(&mut state.criteria.title_query)
                        .hint_text("e.g. Godfather"),
                )
                .changed();
            ui.add_space(6.0);

            ui.strong("Actor contains");
            changed |= ui
                .add(
                    egui::TextEdit::singleline(&mut state.criteria.actor_query)
                        .hint_text("e.g. Pacino"),
                )
                .changed();
            ui.add_space(6.0);

            if ui.button("Reset filters").clicked() {
                state.reset_filters();
            }

            if let Some(views) = &state.views {
                for w in &views.warnings {
                    ui.label(RichText::new(w.to_string()).color(Color32::YELLOW));
                }
            }
        });

    // Rerun the pipeline after any input change.
    if changed {
        state.recompute();
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
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(state.data_path().display().to_string());

        if let (Some(ds), Some(views)) = (&state.dataset, &state.views) {
            ui.separator();
            ui.label(format!(
                "{} movies loaded, {} shown",
                ds.len(),
                views.filtered.len()
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
        .set_title("Open movie data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.open(path);
    }
}
