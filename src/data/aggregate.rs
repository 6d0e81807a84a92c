use std::collections::{BTreeSet, HashMap};
use std::fmt;

use super::model::{MovieDataset, GENRE_DELIMITER};

// ---------------------------------------------------------------------------
// Metric – a value or an explicit "not available"
// ---------------------------------------------------------------------------

/// Aggregate result that degrades instead of failing when its input column
/// is absent.
#[derive(Debug, Clone, PartialEq)]
pub enum Metric<T> {
    Available(T),
    Unavailable,
}

#[cfg(test)]
impl<T> Metric<T> {
    pub fn available(self) -> Option<T> {
        match self {
            Metric::Available(v) => Some(v),
            Metric::Unavailable => None,
        }
    }
}

impl<T> From<Option<T>> for Metric<T> {
    fn from(v: Option<T>) -> Self {
        v.map_or(Metric::Unavailable, Metric::Available)
    }
}

// ---------------------------------------------------------------------------
// Summary tiles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean_rating: Metric<f64>,
    pub total_gross: Metric<f64>,
    pub genre_count: Metric<usize>,
}

impl Summary {
    /// `"8.25"` or `"N/A"`.  A non-positive mean is shown as N/A.
    pub fn mean_rating_text(&self) -> String {
        match self.mean_rating {
            Metric::Available(v) if v > 0.0 => format!("{v:.2}"),
            _ => "N/A".to_string(),
        }
    }

    /// `"$1,234,567"` or `"N/A"`.  Zero total reads as N/A as well.
    pub fn total_gross_text(&self) -> String {
        match self.total_gross {
            Metric::Available(v) if v > 0.0 => format_currency(v),
            _ => "N/A".to_string(),
        }
    }

    pub fn genre_count_text(&self) -> String {
        match self.genre_count {
            Metric::Available(n) => n.to_string(),
            Metric::Unavailable => "N/A".to_string(),
        }
    }
}

pub fn summarize(dataset: &MovieDataset, indices: &[usize]) -> Summary {
    let rows = move || indices.iter().map(move |&i| &dataset.movies[i]);

    // No ratings to average is "not available", never NaN.
    let mean_rating = dataset.roles.rating.and_then(|_| {
        let ratings: Vec<f64> = rows().filter_map(|m| dataset.rating(m)).collect();
        if ratings.is_empty() {
            None
        } else {
            Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
        }
    });

    let total_gross = dataset
        .roles
        .gross
        .map(|_| rows().filter_map(|m| dataset.gross(m)).sum::<f64>());

    let genre_count = dataset.roles.genre.map(|col| {
        rows()
            .map(|m| m.cell(col))
            .filter(|c| !c.is_null())
            .collect::<BTreeSet<_>>()
            .len()
    });

    Summary {
        count: indices.len(),
        mean_rating: mean_rating.into(),
        total_gross: total_gross.into(),
        genre_count: genre_count.into(),
    }
}

/// Whole-dollar currency with thousands separators: `1234567.4` → `$1,234,567`.
pub fn format_currency(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

// ---------------------------------------------------------------------------
// Genre frequency ranking
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct GenreRanking {
    /// `(token, count)` by count descending; ties keep first-seen order.
    pub top: Vec<(String, usize)>,
    /// Tokens over every filtered record, including the unreturned tail.
    pub total_tokens: usize,
}

/// Split each genre field on `|`, count tokens, keep the `limit` most common.
///
/// Tokens are taken verbatim: `"a||b"` yields `a`, an empty token and `b`.
pub fn genre_ranking(dataset: &MovieDataset, indices: &[usize], limit: usize) -> Metric<GenreRanking> {
    if dataset.roles.genre.is_none() {
        return Metric::Unavailable;
    }

    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut total_tokens = 0;

    for m in indices.iter().map(|&i| &dataset.movies[i]) {
        let Some(field) = dataset.genre(m) else {
            continue;
        };
        for token in field.split(GENRE_DELIMITER) {
            total_tokens += 1;
            let n = counts.entry(token.to_string()).or_insert_with(|| {
                order.push(token.to_string());
                0
            });
            *n += 1;
        }
    }

    let mut ranked: Vec<(String, usize)> = order
        .into_iter()
        .map(|g| {
            let n = counts[&g];
            (g, n)
        })
        .collect();
    // Stable: equal counts stay in encounter order.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(limit);

    Metric::Available(GenreRanking {
        top: ranked,
        total_tokens,
    })
}

// ---------------------------------------------------------------------------
// Star categories
// ---------------------------------------------------------------------------

/// Rating bucket, declared from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StarCategory {
    Masterpiece,
    Excellent,
    Great,
    Good,
    Average,
}

impl StarCategory {
    /// Every category, highest rating first.
    pub const ALL: [StarCategory; 5] = [
        StarCategory::Masterpiece,
        StarCategory::Excellent,
        StarCategory::Great,
        StarCategory::Good,
        StarCategory::Average,
    ];

    /// Lower bounds are inclusive and checked highest first.
    pub fn from_rating(rating: f64) -> Self {
        if rating >= 9.0 {
            StarCategory::Masterpiece
        } else if rating >= 8.0 {
            StarCategory::Excellent
        } else if rating >= 7.0 {
            StarCategory::Great
        } else if rating >= 6.0 {
            StarCategory::Good
        } else {
            StarCategory::Average
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StarCategory::Masterpiece => "Masterpiece",
            StarCategory::Excellent => "Excellent",
            StarCategory::Great => "Great",
            StarCategory::Good => "Good",
            StarCategory::Average => "Average",
        }
    }

    pub fn threshold_text(self) -> &'static str {
        match self {
            StarCategory::Masterpiece => "rating ≥ 9.0",
            StarCategory::Excellent => "8.0 ≤ rating < 9.0",
            StarCategory::Great => "7.0 ≤ rating < 8.0",
            StarCategory::Good => "6.0 ≤ rating < 7.0",
            StarCategory::Average => "rating < 6.0",
        }
    }
}

impl fmt::Display for StarCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StarBucket {
    pub category: StarCategory,
    /// Movie indices sorted by rating descending.
    pub members: Vec<usize>,
}

impl StarBucket {
    pub fn count(&self) -> usize {
        self.members.len()
    }
}

/// One bucket per category in [`StarCategory::ALL`] order, empty ones included.
pub fn star_buckets(dataset: &MovieDataset, indices: &[usize]) -> Metric<Vec<StarBucket>> {
    if dataset.roles.rating.is_none() {
        return Metric::Unavailable;
    }

    let mut rated: Vec<(usize, f64)> = indices
        .iter()
        .filter_map(|&i| dataset.rating(&dataset.movies[i]).map(|r| (i, r)))
        .collect();
    rated.sort_by(|a, b| b.1.total_cmp(&a.1));

    let buckets = StarCategory::ALL
        .iter()
        .map(|&category| StarBucket {
            category,
            members: rated
                .iter()
                .filter(|(_, r)| StarCategory::from_rating(*r) == category)
                .map(|(i, _)| *i)
                .collect(),
        })
        .collect();

    Metric::Available(buckets)
}

// ---------------------------------------------------------------------------
// Top movies by revenue
// ---------------------------------------------------------------------------

/// Indices of the `limit` highest-grossing movies.  Missing gross sorts last.
pub fn top_by_revenue(dataset: &MovieDataset, indices: &[usize], limit: usize) -> Metric<Vec<usize>> {
    if dataset.roles.gross.is_none() || dataset.roles.title.is_none() {
        return Metric::Unavailable;
    }

    let mut ranked: Vec<(usize, Option<f64>)> = indices
        .iter()
        .map(|&i| (i, dataset.gross(&dataset.movies[i])))
        .collect();
    ranked.sort_by(|a, b| match (a.1, b.1) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    Metric::Available(ranked.into_iter().take(limit).map(|(i, _)| i).collect())
}

// ---------------------------------------------------------------------------
// Rating vs revenue scatter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub rating: f64,
    pub gross: f64,
    pub genre: Option<String>,
}

pub fn rating_revenue_points(dataset: &MovieDataset, indices: &[usize]) -> Metric<Vec<ScatterPoint>> {
    if dataset.roles.rating.is_none() || dataset.roles.gross.is_none() {
        return Metric::Unavailable;
    }
    let points = indices
        .iter()
        .map(|&i| &dataset.movies[i])
        .filter_map(|m| {
            Some(ScatterPoint {
                rating: dataset.rating(m)?,
                gross: dataset.gross(m)?,
                genre: dataset.genre(m).map(str::to_string),
            })
        })
        .collect();
    Metric::Available(points)
}

// ---------------------------------------------------------------------------
// Correlation matrix
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Correlation {
    /// Fewer than two numeric columns.
    Insufficient,
    Matrix {
        columns: Vec<String>,
        /// Square, symmetric.  `None` where a coefficient is undefined.
        values: Vec<Vec<Option<f64>>>,
    },
}

/// Pairwise Pearson correlation over every numeric column.
pub fn correlation_matrix(dataset: &MovieDataset, indices: &[usize]) -> Correlation {
    let numeric_cols: Vec<usize> = dataset
        .numeric
        .iter()
        .enumerate()
        .filter(|(_, is_num)| **is_num)
        .map(|(i, _)| i)
        .collect();
    if numeric_cols.len() < 2 {
        return Correlation::Insufficient;
    }

    let series: Vec<Vec<Option<f64>>> = numeric_cols
        .iter()
        .map(|&c| {
            indices
                .iter()
                .map(|&i| dataset.movies[i].cell(c).as_f64())
                .collect()
        })
        .collect();

    let n = numeric_cols.len();
    let mut values = vec![vec![None; n]; n];
    for a in 0..n {
        for b in a..n {
            let r = pearson(&series[a], &series[b]);
            values[a][b] = r;
            values[b][a] = r;
        }
    }

    Correlation::Matrix {
        columns: numeric_cols.iter().map(|&c| dataset.columns[c].clone()).collect(),
        values,
    }
}

/// Pearson's r over positions where both sides are present.
fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    Some((sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0))
}
