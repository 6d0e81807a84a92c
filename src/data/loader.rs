use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{
    CellValue, Movie, MovieDataset, GROSS_COLUMN, NUMERIC_COLUMNS, REQUIRED_COLUMNS,
};

/// Raw cell contents read as missing, mirroring the usual dataframe NA set.
const NULL_TOKENS: [&str; 9] = ["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None", "<NA>"];

/// Substrings (lower-case) that mark a column as an actor column when no
/// explicit list is configured.
const ACTOR_MARKERS: [&str; 2] = ["actor", "star"];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a source file produced no dataset.  The `Display` text is shown to
/// the user as-is.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{} not found. Please make sure the movie CSV exists.", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} has no header row", .0.display())]
    NoHeader(PathBuf),
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Knobs affecting how a file is turned into a [`MovieDataset`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadOptions {
    /// Explicit actor columns.  `None` falls back to name detection.
    pub actor_columns: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and clean a movie CSV.
///
/// * declared numeric columns are coerced, a bad cell becomes `Null`
/// * `Gross` has its thousands separators stripped first
/// * other columns whose every non-empty cell is a number become numeric too
/// * rows missing any present required column are dropped
pub fn load_movies(path: &Path, options: &LoadOptions) -> Result<MovieDataset, LoadError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    read_movies(file, options).map_err(|e| match e {
        ReadError::Csv(source) => LoadError::Parse {
            path: path.to_path_buf(),
            source,
        },
        ReadError::NoHeader => LoadError::NoHeader(path.to_path_buf()),
    })
}

enum ReadError {
    Csv(csv::Error),
    NoHeader,
}

impl From<csv::Error> for ReadError {
    fn from(e: csv::Error) -> Self {
        ReadError::Csv(e)
    }
}

fn read_movies<R: io::Read>(source: R, options: &LoadOptions) -> Result<MovieDataset, ReadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(source);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(ReadError::NoHeader);
    }

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut row: Vec<String> = record.iter().map(|v| v.to_string()).collect();
        row.resize(headers.len(), String::new());
        raw_rows.push(row);
    }

    let kinds: Vec<ColumnKind> = headers
        .iter()
        .enumerate()
        .map(|(col, name)| column_kind(name, raw_rows.iter().map(|r| r[col].as_str())))
        .collect();

    let mut bad_cells = 0usize;
    let parsed: Vec<Movie> = raw_rows
        .into_iter()
        .map(|row| {
            let cells = row
                .into_iter()
                .zip(&kinds)
                .map(|(raw, kind)| {
                    let cell = convert_cell(&raw, *kind);
                    if cell.is_null() && !is_null_token(&raw) {
                        bad_cells += 1;
                    }
                    cell
                })
                .collect();
            Movie { cells }
        })
        .collect();
    if bad_cells > 0 {
        log::debug!("{bad_cells} cells failed numeric coercion and were set to missing");
    }

    let required: Vec<usize> = REQUIRED_COLUMNS
        .iter()
        .filter_map(|name| headers.iter().position(|h| h == name))
        .collect();
    let n_parsed = parsed.len();
    let movies: Vec<Movie> = parsed
        .into_iter()
        .filter(|m| required.iter().all(|&i| !m.cell(i).is_null()))
        .collect();
    log::info!(
        "Kept {} of {n_parsed} rows after dropping incomplete records",
        movies.len()
    );

    let actor_columns = resolve_actor_columns(&headers, options.actor_columns.as_deref());
    let numeric = kinds.iter().map(|k| *k != ColumnKind::Text).collect();

    Ok(MovieDataset::new(headers, movies, numeric, actor_columns))
}

// ---------------------------------------------------------------------------
// Column typing and cell coercion
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Text,
    /// Declared numeric, lenient per cell.
    Numeric,
    /// Declared numeric with `,` thousands separators.
    Currency,
    /// Undeclared but every value parsed.
    Inferred,
}

fn column_kind<'a>(name: &str, values: impl Iterator<Item = &'a str>) -> ColumnKind {
    if name == GROSS_COLUMN {
        return ColumnKind::Currency;
    }
    if NUMERIC_COLUMNS.contains(&name) {
        return ColumnKind::Numeric;
    }
    let mut seen_any = false;
    for v in values.filter(|v| !is_null_token(v)) {
        if parse_number(v).is_none() {
            return ColumnKind::Text;
        }
        seen_any = true;
    }
    if seen_any {
        ColumnKind::Inferred
    } else {
        ColumnKind::Text
    }
}

fn convert_cell(raw: &str, kind: ColumnKind) -> CellValue {
    if is_null_token(raw) {
        return CellValue::Null;
    }
    match kind {
        ColumnKind::Text => CellValue::Text(raw.to_string()),
        ColumnKind::Numeric | ColumnKind::Inferred => {
            parse_number(raw).unwrap_or(CellValue::Null)
        }
        ColumnKind::Currency => parse_number(&strip_thousands(raw)).unwrap_or(CellValue::Null),
    }
}

fn is_null_token(s: &str) -> bool {
    NULL_TOKENS.contains(&s.trim())
}

/// Remove `,` thousands separators: `"1,234,567"` → `"1234567"`.
pub fn strip_thousands(s: &str) -> String {
    s.chars().filter(|&c| c != ',').collect()
}

/// Parse a number, preferring integers.  `None` for anything non-numeric.
pub fn parse_number(s: &str) -> Option<CellValue> {
    let s = s.trim();
    if let Ok(i) = s.parse::<i64>() {
        return Some(CellValue::Integer(i));
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() => Some(CellValue::Float(f)),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Actor columns
// ---------------------------------------------------------------------------

/// Positions of the columns the actor filter searches.
///
/// With a configured list only those names count (absent ones are logged);
/// otherwise any header containing "actor" or "star" in any case qualifies.
pub fn resolve_actor_columns(headers: &[String], configured: Option<&[String]>) -> Vec<usize> {
    match configured {
        Some(names) => names
            .iter()
            .filter_map(|name| {
                let pos = headers.iter().position(|h| h == name);
                if pos.is_none() {
                    log::warn!("Configured actor column '{name}' is not in the dataset");
                }
                pos
            })
            .collect(),
        None => headers
            .iter()
            .enumerate()
            .filter(|(_, h)| {
                let lower = h.to_lowercase();
                ACTOR_MARKERS.iter().any(|m| lower.contains(m))
            })
            .map(|(i, _)| i)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SAMPLE: &str = "\
Series_Title,Released_Year,Certificate,Genre,IMDB_Rating,Meta_score,Star1,Star2,No_of_Votes,Gross
The Godfather,1972,A,Crime|Drama,9.2,100,Marlon Brando,Al Pacino,1620367,\"134,966,411\"
Apollo 13,PG,U,Adventure|Drama,7.6,77,Tom Hanks,Bill Paxton,269197,\"173,837,933\"
No Gross,1999,A,Drama,8.0,,Someone,Else,100,
No Rating,2001,A,Drama,,50,Someone,Else,100,\"1,000\"
Broken Votes,2005,UA,Comedy,6.5,61,A,B,lots,\"2,500\"
";

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn gross_with_thousands_separators_parses() {
        assert_eq!(
            parse_number(&strip_thousands("1,234,567")),
            Some(CellValue::Integer(1_234_567))
        );
        assert_eq!(parse_number("8.5"), Some(CellValue::Float(8.5)));
        assert_eq!(parse_number("PG"), None);
    }

    #[test]
    fn cleaning_drops_incomplete_rows_and_coerces_leniently() {
        let f = write_csv(SAMPLE);
        let ds = load_movies(f.path(), &LoadOptions::default()).unwrap();

        let titles: Vec<&str> = ds.movies.iter().filter_map(|m| ds.title(m)).collect();
        assert_eq!(titles, vec!["The Godfather", "Apollo 13", "Broken Votes"]);

        let godfather = &ds.movies[0];
        assert_eq!(ds.gross(godfather), Some(134_966_411.0));

        // "PG" in the year column becomes missing but the row survives.
        let year = ds.roles.year.unwrap();
        assert!(ds.movies[1].cell(year).is_null());

        // A bad vote count does not invalidate the row.
        let votes = ds.columns.iter().position(|c| c == "No_of_Votes").unwrap();
        assert!(ds.movies[2].cell(votes).is_null());
    }

    #[test]
    fn column_names_are_preserved_and_types_inferred() {
        let f = write_csv(SAMPLE);
        let ds = load_movies(f.path(), &LoadOptions::default()).unwrap();
        assert_eq!(ds.columns[0], "Series_Title");
        assert_eq!(ds.columns[9], "Gross");

        let is_numeric = |name: &str| {
            let i = ds.columns.iter().position(|c| c == name).unwrap();
            ds.numeric[i]
        };
        assert!(is_numeric("Meta_score"));
        assert!(is_numeric("Released_Year"));
        assert!(!is_numeric("Certificate"));
        assert!(!is_numeric("Star1"));
    }

    #[test]
    fn absent_required_columns_are_not_enforced() {
        let f = write_csv("Series_Title,Notes\nA,\nB,something\n");
        let ds = load_movies(f.path(), &LoadOptions::default()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.roles.rating, None);
        assert!(ds.genre_options.is_empty());
    }

    #[test]
    fn actor_columns_detected_by_name() {
        let headers: Vec<String> = ["Series_Title", "Star1", "Lead_Actor", "Director"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(resolve_actor_columns(&headers, None), vec![1, 2]);
    }

    #[test]
    fn configured_actor_columns_override_detection() {
        let headers: Vec<String> = ["Series_Title", "Star1", "Cast"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let configured = vec!["Cast".to_string(), "Missing".to_string()];
        assert_eq!(resolve_actor_columns(&headers, Some(&configured)), vec![2]);
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movies.csv");
        let err = load_movies(&path, &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn empty_file_has_no_header() {
        let f = write_csv("");
        let err = load_movies(f.path(), &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::NoHeader(_)));
    }

    #[test]
    fn invalid_utf8_is_a_parse_error() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"Series_Title,Genre\n\xff\xfe,Drama\n").unwrap();
        let err = load_movies(f.path(), &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }
}
