use eframe::egui::{self, Color32, RichText, Ui};
use egui_plot::{uniform_grid_spacer, Bar, BarChart, Legend, Plot, PlotPoints, Points};

use crate::color::{coolwarm, generate_palette, ColorMap};
use crate::data::aggregate::{Correlation, GenreRanking, Metric, ScatterPoint};

const PLOT_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Top genres bar chart
// ---------------------------------------------------------------------------

pub fn genre_bar_chart(ui: &mut Ui, ranking: &Metric<GenreRanking>) {
    let ranking = match ranking {
        Metric::Available(r) if !r.top.is_empty() => r,
        Metric::Available(_) => {
            ui.label("No genres in the current selection.");
            return;
        }
        Metric::Unavailable => {
            ui.label("No genre data available to compute top genres.");
            return;
        }
    };

    let palette = generate_palette(ranking.top.len());
    let bars: Vec<Bar> = ranking
        .top
        .iter()
        .zip(palette)
        .enumerate()
        .map(|(i, ((genre, count), color))| {
            Bar::new(i as f64, *count as f64)
                .name(genre)
                .width(0.7)
                .fill(color)
        })
        .collect();

    let names: Vec<String> = ranking.top.iter().map(|(g, _)| g.clone()).collect();

    Plot::new("genre_bar_chart")
        .height(PLOT_HEIGHT)
        .y_axis_label("Movies")
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .x_axis_formatter(move |mark, _range| bar_tick_label(&names, mark.value))
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Genre count"));
        });
}

/// Genre name for a tick at bar position `value`; blank between bars.
fn bar_tick_label(names: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    names.get(rounded as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Rating vs revenue scatter
// ---------------------------------------------------------------------------

pub fn rating_revenue_scatter(ui: &mut Ui, points: &Metric<Vec<ScatterPoint>>, color_map: &ColorMap) {
    let points = match points {
        Metric::Available(p) => p,
        Metric::Unavailable => {
            ui.label("Scatter plot requires numeric 'IMDB_Rating' and 'Gross' columns.");
            return;
        }
    };

    // One series per genre so the legend doubles as the hue key.
    let mut series: Vec<(Option<&str>, Vec<[f64; 2]>)> = Vec::new();
    for p in points {
        let genre = p.genre.as_deref();
        match series.iter_mut().find(|(g, _)| *g == genre) {
            Some((_, pts)) => pts.push([p.rating, p.gross]),
            None => series.push((genre, vec![[p.rating, p.gross]])),
        }
    }

    Plot::new("rating_revenue_scatter")
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("IMDB Rating")
        .y_axis_label("Gross Revenue")
        .allow_boxed_zoom(true)
        .show(ui, |plot_ui| {
            for (genre, pts) in series {
                plot_ui.points(
                    Points::new(PlotPoints::from(pts))
                        .name(genre.unwrap_or("unknown"))
                        .color(color_map.color_for(genre))
                        .radius(3.5),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

pub fn correlation_heatmap(ui: &mut Ui, correlation: &Correlation) {
    let (columns, values) = match correlation {
        Correlation::Matrix { columns, values } => (columns, values),
        Correlation::Insufficient => {
            ui.label("Not enough numeric data to compute correlations.");
            return;
        }
    };

    egui::ScrollArea::horizontal()
        .id_salt("correlation_scroll")
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("correlation_grid")
                .spacing([2.0, 2.0])
                .show(ui, |ui: &mut Ui| {
                    ui.label("");
                    for name in columns {
                        ui.strong(name);
                    }
                    ui.end_row();

                    for (name, row) in columns.iter().zip(values) {
                        ui.strong(name);
                        for v in row {
                            let (text, fill) = match v {
                                Some(r) => (format!("{r:+.2}"), coolwarm(*r)),
                                None => ("—".to_string(), Color32::from_gray(200)),
                            };
                            ui.label(
                                RichText::new(format!(" {text} "))
                                    .monospace()
                                    .color(Color32::BLACK)
                                    .background_color(fill),
                            );
                        }
                        ui.end_row();
                    }
                });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_ticks_name_the_genre_at_each_position() {
        let names = vec!["Drama".to_string(), "Comedy".to_string()];
        assert_eq!(bar_tick_label(&names, 0.0), "Drama");
        assert_eq!(bar_tick_label(&names, 1.0), "Comedy");
        assert_eq!(bar_tick_label(&names, 0.5), "");
        assert_eq!(bar_tick_label(&names, 2.0), "");
        assert_eq!(bar_tick_label(&names, -1.0), "");
    }
}
