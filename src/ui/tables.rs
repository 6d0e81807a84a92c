use eframe::egui::{self, Align, Layout, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::aggregate::{format_currency, Metric, StarBucket, Summary};
use crate::data::model::{Movie, MovieDataset};

const ROW_HEIGHT: f32 = 18.0;
const HEADER_HEIGHT: f32 = 22.0;

// ---------------------------------------------------------------------------
// Metric tiles
// ---------------------------------------------------------------------------

pub fn metric_tiles(ui: &mut Ui, summary: &Summary) {
    let tiles = [
        ("Total Movies", summary.count.to_string()),
        ("Avg Rating", summary.mean_rating_text()),
        ("Total Gross", summary.total_gross_text()),
        ("Genres", summary.genre_count_text()),
    ];
    ui.columns(tiles.len(), |cols| {
        for (col, (label, value)) in cols.iter_mut().zip(tiles) {
            col.vertical(|ui| {
                ui.label(label);
                ui.label(RichText::new(value).size(24.0).strong());
            });
        }
    });
}

// ---------------------------------------------------------------------------
// Generic movie grid
// ---------------------------------------------------------------------------

/// One cell of the grid.  Gross is shown as currency.
fn cell_text(dataset: &MovieDataset, movie: &Movie, col: usize) -> String {
    if Some(col) == dataset.roles.gross {
        if let Some(g) = dataset.gross(movie) {
            return format_currency(g);
        }
    }
    movie.cell(col).to_string()
}

/// Rows `rows` of `dataset` restricted to `columns`.
pub fn movie_table(
    ui: &mut Ui,
    id: &str,
    dataset: &MovieDataset,
    rows: &[usize],
    columns: &[usize],
    max_height: Option<f32>,
) {
    ui.push_id(id, |ui| {
        let mut table = TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(Layout::left_to_right(Align::Center))
            .columns(Column::auto().at_least(60.0), columns.len());
        table = match max_height {
            Some(h) => table.max_scroll_height(h),
            None => table.vscroll(false),
        };

        table
            .header(HEADER_HEIGHT, |mut header| {
                for &c in columns {
                    header.col(|ui| {
                        ui.strong(&dataset.columns[c]);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let movie = &dataset.movies[rows[row.index()]];
                    for &c in columns {
                        row.col(|ui| {
                            ui.label(cell_text(dataset, movie, c));
                        });
                    }
                });
            });
    });
}

/// Filtered data grid.
pub fn filtered_table(
    ui: &mut Ui,
    dataset: &MovieDataset,
    rows: &[usize],
    columns: &Metric<Vec<usize>>,
    height: f32,
) {
    match columns {
        Metric::Available(cols) => movie_table(ui, "filtered_table", dataset, rows, cols, Some(height)),
        Metric::Unavailable => {
            ui.label("No displayable columns found in the filtered data.");
        }
    }
}

/// Title, gross, rating of the top earners.
pub fn top_revenue_table(ui: &mut Ui, dataset: &MovieDataset, top: &Metric<Vec<usize>>) {
    match top {
        Metric::Available(rows) => {
            let cols: Vec<usize> = [dataset.roles.title, dataset.roles.gross, dataset.roles.rating]
                .into_iter()
                .flatten()
                .collect();
            movie_table(ui, "top_revenue_table", dataset, rows, &cols, None);
        }
        Metric::Unavailable => {
            ui.label("Title or gross column missing; cannot rank movies by revenue.");
        }
    }
}

// ---------------------------------------------------------------------------
// Star categories
// ---------------------------------------------------------------------------

pub fn star_categories(ui: &mut Ui, dataset: &MovieDataset, buckets: &Metric<Vec<StarBucket>>) {
    let buckets = match buckets {
        Metric::Available(b) => b,
        Metric::Unavailable => {
            ui.label("No rating column; star categories are unavailable.");
            return;
        }
    };

    let cols: Vec<usize> = [
        dataset.roles.title,
        dataset.roles.genre,
        dataset.roles.year,
        dataset.roles.rating,
    ]
    .into_iter()
    .flatten()
    .collect();

    for bucket in buckets {
        let header = format!(
            "{}  ({})  –  {} movies",
            bucket.category,
            bucket.category.threshold_text(),
            bucket.count()
        );
        egui::CollapsingHeader::new(RichText::new(header).strong())
            .id_salt(bucket.category.label())
            .default_open(false)
            .show(ui, |ui: &mut Ui| {
                if bucket.members.is_empty() {
                    ui.label("None.");
                } else {
                    movie_table(
                        ui,
                        bucket.category.label(),
                        dataset,
                        &bucket.members,
                        &cols,
                        Some(200.0),
                    );
                }
            });
    }
}
