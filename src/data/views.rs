use super::aggregate::{
    correlation_matrix, genre_ranking, rating_revenue_points, star_buckets, summarize,
    top_by_revenue, Correlation, GenreRanking, Metric, ScatterPoint, StarBucket, Summary,
};
use super::filter::{filtered_indices, Criteria, FilterWarning};
use super::model::{MovieDataset, GENRE_COLUMN, GROSS_COLUMN, RATING_COLUMN, TITLE_COLUMN, YEAR_COLUMN};

/// Columns shown in the filtered-data grid, in this order, when present.
const DISPLAY_COLUMNS: [&str; 5] = [TITLE_COLUMN, GENRE_COLUMN, YEAR_COLUMN, RATING_COLUMN, GROSS_COLUMN];

/// How many entries the ranked views keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewLimits {
    pub top_genres: usize,
    pub top_revenue: usize,
}

impl Default for ViewLimits {
    fn default() -> Self {
        Self {
            top_genres: 10,
            top_revenue: 10,
        }
    }
}

/// Everything the presentation layer draws for one set of criteria.
#[derive(Debug, Clone, PartialEq)]
pub struct Views {
    /// Indices into the dataset, in dataset order.
    pub filtered: Vec<usize>,
    pub summary: Summary,
    /// Positions of the columns shown in the data grid.
    pub display_columns: Metric<Vec<usize>>,
    pub genre_ranking: Metric<GenreRanking>,
    pub star_buckets: Metric<Vec<StarBucket>>,
    pub top_revenue: Metric<Vec<usize>>,
    pub scatter: Metric<Vec<ScatterPoint>>,
    pub correlation: Correlation,
    pub warnings: Vec<FilterWarning>,
}

/// Filter then aggregate.  Pure: same inputs, same views.
pub fn compute_views(dataset: &MovieDataset, criteria: &Criteria, limits: ViewLimits) -> Views {
    let outcome = filtered_indices(dataset, criteria);
    let idx = &outcome.indices;

    let display: Vec<usize> = DISPLAY_COLUMNS
        .iter()
        .filter_map(|name| dataset.columns.iter().position(|c| c == name))
        .collect();
    let display_columns = if display.is_empty() {
        Metric::Unavailable
    } else {
        Metric::Available(display)
    };

    Views {
        summary: summarize(dataset, idx),
        display_columns,
        genre_ranking: genre_ranking(dataset, idx, limits.top_genres),
        star_buckets: star_buckets(dataset, idx),
        top_revenue: top_by_revenue(dataset, idx, limits.top_revenue),
        scatter: rating_revenue_points(dataset, idx),
        correlation: correlation_matrix(dataset, idx),
        warnings: outcome.warnings,
        filtered: outcome.indices,
    }
}
