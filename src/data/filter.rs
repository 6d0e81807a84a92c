use std::fmt;

use super::model::{Movie, MovieDataset};

// ---------------------------------------------------------------------------
// Filter criteria: what the user selected in the side panel
// ---------------------------------------------------------------------------

/// Genre dropdown value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GenreSelector {
    /// No constraint.
    #[default]
    All,
    /// Raw genre field must equal this exactly (no `|` splitting).
    Exact(String),
}

impl fmt::Display for GenreSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenreSelector::All => write!(f, "All"),
            GenreSelector::Exact(g) => write!(f, "{g}"),
        }
    }
}

/// One round of user input.  Rebuilt by the UI, never stored across sessions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    pub genre: GenreSelector,
    /// Inclusive `(lo, hi)`.  `None` disables the year filter.
    pub year_range: Option<(i64, i64)>,
    /// Case-insensitive title substring; empty means no constraint.
    pub title_query: String,
    /// Case-insensitive substring over every actor column.
    pub actor_query: String,
}

impl Criteria {
    /// Defaults for a freshly loaded dataset: all genres, full year range.
    pub fn for_dataset(dataset: &MovieDataset) -> Self {
        Criteria {
            year_range: dataset.year_bounds,
            ..Default::default()
        }
    }
}

/// A criterion that could not be applied to this dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterWarning {
    ActorColumnsUnavailable,
}

impl fmt::Display for FilterWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterWarning::ActorColumnsUnavailable => {
                write!(f, "No actor/star columns found; actor search is unavailable.")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Result of applying [`Criteria`]: row indices in dataset order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOutcome {
    pub indices: Vec<usize>,
    pub warnings: Vec<FilterWarning>,
}

/// Return indices of movies that pass every active criterion.
///
/// A movie passes when:
/// * genre selector is `All`, or its raw genre equals the selection
/// * its year lies in the inclusive range (missing year fails while active)
/// * its title contains the title query, ignoring case
/// * any actor column contains the actor query, ignoring case
///
/// Criteria whose column is absent are skipped.
pub fn filtered_indices(dataset: &MovieDataset, criteria: &Criteria) -> FilterOutcome {
    let mut warnings = Vec::new();

    let genre = match (&criteria.genre, dataset.roles.genre) {
        (GenreSelector::Exact(g), Some(col)) => Some((col, g.as_str())),
        _ => None,
    };

    let year = match (criteria.year_range, dataset.roles.year) {
        (Some((a, b)), Some(col)) => Some((col, a.min(b) as f64, a.max(b) as f64)),
        _ => None,
    };

    let title_query = criteria.title_query.trim().to_lowercase();
    let title = match dataset.roles.title {
        Some(col) if !title_query.is_empty() => Some((col, title_query.as_str())),
        _ => None,
    };

    let actor_query = criteria.actor_query.trim().to_lowercase();
    let actor = if actor_query.is_empty() {
        None
    } else if dataset.actor_columns.is_empty() {
        warnings.push(FilterWarning::ActorColumnsUnavailable);
        None
    } else {
        Some(actor_query.as_str())
    };

    let indices = dataset
        .movies
        .iter()
        .enumerate()
        .filter(|(_, m)| {
            if let Some((col, g)) = genre {
                if m.cell(col).as_str() != Some(g) {
                    return false;
                }
            }
            if let Some((col, lo, hi)) = year {
                match m.cell(col).as_f64() {
                    Some(y) if y >= lo && y <= hi => {}
                    _ => return false,
                }
            }
            if let Some((col, q)) = title {
                if !contains_ignore_case(m.cell(col).as_str(), q) {
                    return false;
                }
            }
            if let Some(q) = actor {
                if !any_actor_matches(dataset, m, q) {
                    return false;
                }
            }
            true
        })
        .map(|(i, _)| i)
        .collect();

    FilterOutcome { indices, warnings }
}

/// `needle` must already be lower-case.  Missing text never matches.
fn contains_ignore_case(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(needle))
}

fn any_actor_matches(dataset: &MovieDataset, movie: &Movie, needle: &str) -> bool {
    dataset
        .actor_columns
        .iter()
        .any(|&col| contains_ignore_case(movie.cell(col).as_str(), needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    /// Title, Genre, Released_Year, Star1, Star2
    fn dataset() -> MovieDataset {
        let columns = ["Series_Title", "Genre", "Released_Year", "Star1", "Star2"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let row = |t: &str, g: &str, y: Option<i64>, s1: &str, s2: &str| Movie {
            cells: vec![
                text(t),
                text(g),
                y.map(CellValue::Integer).unwrap_or(CellValue::Null),
                text(s1),
                text(s2),
            ],
        };
        let movies = vec![
            row("A", "Drama", Some(2000), "Al Pacino", "Diane Keaton"),
            row("B", "Drama|Comedy", Some(2010), "Bill Murray", "Scarlett Johansson"),
            row("C", "Action", Some(1995), "Keanu Reeves", "Laurence Fishburne"),
            row("The Godfather Part II", "Drama", None, "Al Pacino", "Robert De Niro"),
        ];
        MovieDataset::new(columns, movies, vec![false, false, true, false, false], vec![3, 4])
    }

    fn run(ds: &MovieDataset, c: &Criteria) -> Vec<usize> {
        filtered_indices(ds, c).indices
    }

    #[test]
    fn all_genre_is_identity() {
        let ds = dataset();
        let all: Vec<usize> = (0..ds.len()).collect();
        assert_eq!(run(&ds, &Criteria::default()), all);
    }

    #[test]
    fn genre_matches_raw_field_exactly() {
        let ds = dataset();
        let c = Criteria {
            genre: GenreSelector::Exact("Drama".into()),
            ..Default::default()
        };
        // "Drama|Comedy" is not split at filter time.
        assert_eq!(run(&ds, &c), vec![0, 3]);
    }

    #[test]
    fn year_range_is_inclusive_and_excludes_missing() {
        let ds = dataset();
        let c = Criteria {
            year_range: Some((1995, 2000)),
            ..Default::default()
        };
        assert_eq!(run(&ds, &c), vec![0, 2]);

        let c = Criteria {
            year_range: Some((2005, 2015)),
            ..Default::default()
        };
        assert_eq!(run(&ds, &c), vec![1]);
    }

    #[test]
    fn reversed_year_range_is_normalized() {
        let ds = dataset();
        let c = Criteria {
            year_range: Some((2015, 2005)),
            ..Default::default()
        };
        assert_eq!(run(&ds, &c), vec![1]);
    }

    #[test]
    fn default_criteria_use_observed_bounds() {
        let ds = dataset();
        let c = Criteria::for_dataset(&ds);
        assert_eq!(c.year_range, Some((1995, 2010)));
        // Every movie with a year survives the untouched range.
        assert_eq!(run(&ds, &c), vec![0, 1, 2]);
    }

    #[test]
    fn title_search_ignores_case() {
        let ds = dataset();
        let c = Criteria {
            title_query: "godFATHER".into(),
            ..Default::default()
        };
        assert_eq!(run(&ds, &c), vec![3]);
    }

    #[test]
    fn actor_search_spans_all_actor_columns() {
        let ds = dataset();
        let c = Criteria {
            actor_query: "pacino".into(),
            ..Default::default()
        };
        assert_eq!(run(&ds, &c), vec![0, 3]);

        let c = Criteria {
            actor_query: "FISHBURNE".into(),
            ..Default::default()
        };
        assert_eq!(run(&ds, &c), vec![2]);
    }

    #[test]
    fn actor_search_without_actor_columns_warns() {
        let mut ds = dataset();
        ds.actor_columns.clear();
        let c = Criteria {
            actor_query: "pacino".into(),
            ..Default::default()
        };
        let out = filtered_indices(&ds, &c);
        assert_eq!(out.indices.len(), ds.len());
        assert_eq!(out.warnings, vec![FilterWarning::ActorColumnsUnavailable]);
    }

    #[test]
    fn filtered_subset_never_exceeds_dataset() {
        let ds = dataset();
        let c = Criteria {
            genre: GenreSelector::Exact("Drama".into()),
            year_range: Some((1990, 2020)),
            title_query: "a".into(),
            actor_query: "al".into(),
        };
        let idx = run(&ds, &c);
        assert!(idx.iter().all(|&i| i < ds.len()));
        assert!(idx.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(idx, vec![0]);
    }
}
