use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Known source columns
// ---------------------------------------------------------------------------

/// Header names of the columns the dashboard understands.  All of them are
/// optional: an absent column disables the features that depend on it.
pub const TITLE_COLUMN: &str = "Series_Title";
pub const GENRE_COLUMN: &str = "Genre";
pub const YEAR_COLUMN: &str = "Released_Year";
pub const RATING_COLUMN: &str = "IMDB_Rating";
pub const GROSS_COLUMN: &str = "Gross";
pub const VOTES_COLUMN: &str = "No_of_Votes";

/// Columns coerced to numbers at load time.
pub const NUMERIC_COLUMNS: [&str; 4] = [RATING_COLUMN, YEAR_COLUMN, GROSS_COLUMN, VOTES_COLUMN];

/// Columns a row must have a value in to survive cleaning (when present).
pub const REQUIRED_COLUMNS: [&str; 4] = [TITLE_COLUMN, GENRE_COLUMN, RATING_COLUMN, GROSS_COLUMN];

/// Separator of multi-valued genre fields, e.g. `Drama|Crime`.
pub const GENRE_DELIMITER: char = '|';

// ---------------------------------------------------------------------------
// CellValue – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell.  Numeric columns hold `Integer`/`Float`/`Null`,
/// everything else holds `Text`/`Null`.
#[derive(Debug, Clone)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Null,
}

// -- Manual Eq/Ord/Hash so cells can live in ordered and hashed sets --

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Integer(_) => 1,
                Float(_) => 2,
                Text(_) => 3,
            }
        }
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => discriminant(self).cmp(&discriminant(other)),
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Text(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) if v.fract() == 0.0 && v.abs() < 1e15 => write!(f, "{v:.0}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// Movie – one row of the source table
// ---------------------------------------------------------------------------

/// A single film.  `cells` is aligned with [`MovieDataset::columns`].
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub cells: Vec<CellValue>,
}

static NULL_CELL: CellValue = CellValue::Null;

impl Movie {
    /// Cell at `idx`, `Null` when the row is shorter than the header.
    pub fn cell(&self, idx: usize) -> &CellValue {
        self.cells.get(idx).unwrap_or(&NULL_CELL)
    }
}

// ---------------------------------------------------------------------------
// ColumnRoles – where the known columns sit in the header
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnRoles {
    pub title: Option<usize>,
    pub genre: Option<usize>,
    pub year: Option<usize>,
    pub rating: Option<usize>,
    pub gross: Option<usize>,
}

impl ColumnRoles {
    pub fn from_header(columns: &[String]) -> Self {
        let find = |name: &str| columns.iter().position(|c| c == name);
        ColumnRoles {
            title: find(TITLE_COLUMN),
            genre: find(GENRE_COLUMN),
            year: find(YEAR_COLUMN),
            rating: find(RATING_COLUMN),
            gross: find(GROSS_COLUMN),
        }
    }
}

// ---------------------------------------------------------------------------
// MovieDataset – the complete cleaned table
// ---------------------------------------------------------------------------

/// The cleaned dataset plus indices derived once at load time.
#[derive(Debug, Clone, Default)]
pub struct MovieDataset {
    /// Header in source order, names exactly as in the file.
    pub columns: Vec<String>,
    /// Retained rows.
    pub movies: Vec<Movie>,
    pub roles: ColumnRoles,
    /// Positions of the columns searched by the actor filter.
    pub actor_columns: Vec<usize>,
    /// `true` for every column holding numbers.
    pub numeric: Vec<bool>,
    /// Distinct raw genre values in first-seen order.
    pub genre_options: Vec<String>,
    /// Observed `(min, max)` release year.
    pub year_bounds: Option<(i64, i64)>,
}

impl MovieDataset {
    /// Build derived indices from already-cleaned rows.
    pub fn new(
        columns: Vec<String>,
        movies: Vec<Movie>,
        numeric: Vec<bool>,
        actor_columns: Vec<usize>,
    ) -> Self {
        let roles = ColumnRoles::from_header(&columns);

        let mut genre_options: Vec<String> = Vec::new();
        if let Some(g) = roles.genre {
            let mut seen: HashSet<&str> = HashSet::new();
            for m in &movies {
                if let Some(s) = m.cell(g).as_str() {
                    if seen.insert(s) {
                        genre_options.push(s.to_string());
                    }
                }
            }
        }

        let year_bounds = roles.year.and_then(|y| {
            movies
                .iter()
                .filter_map(|m| m.cell(y).as_f64())
                .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                    None => Some((v, v)),
                    Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
                })
                .map(|(lo, hi)| (lo as i64, hi as i64))
        });

        MovieDataset {
            columns,
            movies,
            roles,
            actor_columns,
            numeric,
            genre_options,
            year_bounds,
        }
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    // -- Typed accessors for the known columns --

    pub fn title<'a>(&self, movie: &'a Movie) -> Option<&'a str> {
        self.roles.title.and_then(|i| movie.cell(i).as_str())
    }

    pub fn genre<'a>(&self, movie: &'a Movie) -> Option<&'a str> {
        self.roles.genre.and_then(|i| movie.cell(i).as_str())
    }

    pub fn rating(&self, movie: &Movie) -> Option<f64> {
        self.roles.rating.and_then(|i| movie.cell(i).as_f64())
    }

    pub fn gross(&self, movie: &Movie) -> Option<f64> {
        self.roles.gross.and_then(|i| movie.cell(i).as_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn roles_follow_header_positions() {
        let header: Vec<String> = ["Gross", "Series_Title", "Star1"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let roles = ColumnRoles::from_header(&header);
        assert_eq!(roles.gross, Some(0));
        assert_eq!(roles.title, Some(1));
        assert_eq!(roles.rating, None);
    }

    #[test]
    fn derived_indices() {
        let columns = vec![GENRE_COLUMN.to_string(), YEAR_COLUMN.to_string()];
        let movies = vec![
            Movie { cells: vec![text("Drama"), CellValue::Integer(2000)] },
            Movie { cells: vec![text("Action"), CellValue::Null] },
            Movie { cells: vec![text("Drama"), CellValue::Float(1995.0)] },
        ];
        let ds = MovieDataset::new(columns, movies, vec![false, true], Vec::new());
        assert_eq!(ds.genre_options, vec!["Drama", "Action"]);
        assert_eq!(ds.year_bounds, Some((1995, 2000)));
    }

    #[test]
    fn short_rows_read_as_null() {
        let m = Movie { cells: vec![text("x")] };
        assert!(m.cell(5).is_null());
    }

    #[test]
    fn cells_order_by_kind_then_value() {
        let mut cells = vec![
            text("b"),
            CellValue::Float(2.5),
            CellValue::Null,
            CellValue::Integer(7),
            text("a"),
            CellValue::Integer(-1),
        ];
        cells.sort();
        assert_eq!(
            cells,
            vec![
                CellValue::Null,
                CellValue::Integer(-1),
                CellValue::Integer(7),
                CellValue::Float(2.5),
                text("a"),
                text("b"),
            ]
        );
    }

    #[test]
    fn equal_cells_hash_alike() {
        let set: HashSet<CellValue> = [
            text("Drama"),
            text("Drama"),
            CellValue::Float(8.5),
            CellValue::Float(8.5),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&CellValue::Float(8.5)));
    }

    #[test]
    fn display_of_cells() {
        assert_eq!(CellValue::Float(1234567.0).to_string(), "1234567");
        assert_eq!(CellValue::Float(8.5).to_string(), "8.5");
        assert_eq!(CellValue::Null.to_string(), "");
    }
}
