use std::io::BufRead;
use std::path::Path;

use log::debug;

use chromcompare_concordance::consts::{CUTOFF_TABLE_LENGTH_COLUMN, CUTOFF_TABLE_SCORE_COLUMN};
use chromcompare_concordance::{CutoffRow, CutoffTable};
use chromcompare_core::models::track::{BASE, CHR, END, SCORE, START};
use chromcompare_core::models::{ColumnGroup, IntervalTrack, NamedColumns, PositionTrack, RawColumn, Track};
use chromcompare_core::utils::get_dynamic_reader;

use crate::consts::{BEDBASE_COLUMNS, BEDGRAPH_COLUMNS, FIELD_DELIMITER, HEADER_PREFIXES, MIN_PEAK_COLUMNS};
use crate::error::{Result, TrackIoError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Text,
    Integer,
    Float,
}

impl FieldKind {
    fn empty_column(self) -> RawColumn {
        match self {
            FieldKind::Text => RawColumn::Text(Vec::new()),
            FieldKind::Integer => RawColumn::Integer(Vec::new()),
            FieldKind::Float => RawColumn::Float(Vec::new()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Width {
    Exactly(usize),
    AtLeast(usize),
}

impl Width {
    fn accepts(self, found: usize) -> bool {
        match self {
            Width::Exactly(n) => found == n,
            Width::AtLeast(n) => found >= n,
        }
    }

    fn describe(self) -> String {
        match self {
            Width::Exactly(n) => n.to_string(),
            Width::AtLeast(n) => format!("at least {}", n),
        }
    }
}

const BEDGRAPH_LAYOUT: [(&str, FieldKind); BEDGRAPH_COLUMNS] = [
    (CHR, FieldKind::Text),
    (START, FieldKind::Integer),
    (END, FieldKind::Integer),
    (SCORE, FieldKind::Float),
];

const BEDBASE_LAYOUT: [(&str, FieldKind); BEDBASE_COLUMNS] = [
    (CHR, FieldKind::Text),
    (BASE, FieldKind::Integer),
    (SCORE, FieldKind::Float),
];

const PEAK_LAYOUT: [(&str, FieldKind); MIN_PEAK_COLUMNS] = [
    (CHR, FieldKind::Text),
    (START, FieldKind::Integer),
    (END, FieldKind::Integer),
];

fn is_header_line(line: &str) -> bool {
    HEADER_PREFIXES.iter().any(|prefix| line.starts_with(prefix))
}

// column headers like `chr start end etc` without #: no numeric field parses
fn is_column_header(parts: &[&str], layout: &[(&str, FieldKind)]) -> bool {
    let mut numeric = layout
        .iter()
        .zip(parts)
        .filter(|((_, kind), _)| *kind != FieldKind::Text)
        .map(|(_, field)| field.trim())
        .peekable();
    numeric.peek().is_some() && numeric.all(|field| field.parse::<f64>().is_err())
}

fn push_field(column: &mut RawColumn, field: &str) -> std::result::Result<(), String> {
    let field = field.trim();
    match column {
        RawColumn::Text(values) => values.push(field.to_string()),
        RawColumn::Integer(values) => values.push(
            field
                .parse()
                .map_err(|_| format!("'{}' is not an integer", field))?,
        ),
        RawColumn::Float(values) => values.push(
            field
                .parse()
                .map_err(|_| format!("'{}' is not a number", field))?,
        ),
    }
    Ok(())
}

///
/// Read the leading fields of every data line of a tab separated file into
/// named raw columns. Returns the columns and the number of data rows.
///
fn read_columns(path: &Path, layout: &[(&str, FieldKind)], width: Width) -> Result<(NamedColumns, usize)> {
    let reader = get_dynamic_reader(path)?;

    let mut columns: Vec<RawColumn> = layout.iter().map(|(_, kind)| kind.empty_column()).collect();
    let mut first_line = true;
    let mut rows = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;

        if line.trim().is_empty() || is_header_line(&line) {
            continue;
        }

        let parts: Vec<&str> = line.split(FIELD_DELIMITER).collect();

        if first_line {
            first_line = false;
            if is_column_header(&parts, layout) {
                debug!("Skipping column header of {}: {}", path.display(), line);
                continue;
            }
        }

        if !width.accepts(parts.len()) {
            return Err(TrackIoError::ColumnCount {
                path: path.to_path_buf(),
                line: line_number,
                expected: width.describe(),
                found: parts.len(),
            });
        }

        for (column, ((name, _), field)) in columns.iter_mut().zip(layout.iter().zip(&parts)) {
            push_field(column, field).map_err(|message| TrackIoError::Parse {
                path: path.to_path_buf(),
                line: line_number,
                message: format!("column {}: {}", name, message),
            })?;
        }
        rows += 1;
    }

    if rows == 0 {
        return Err(TrackIoError::Empty {
            path: path.to_path_buf(),
        });
    }

    debug!("Read {} rows from {}", rows, path.display());

    let named = layout.iter().map(|(name, _)| *name).zip(columns).collect();
    Ok((named, rows))
}

fn into_track<K: ColumnGroup, V: ColumnGroup>(path: &Path, columns: NamedColumns) -> Result<Track<K, V>> {
    Track::from_columns(columns).map_err(|source| TrackIoError::Track {
        path: path.to_path_buf(),
        source,
    })
}

///
/// Read a bedGraph file (`chr start end score`, exactly four columns) into an
/// interval track.
///
/// # Arguments
/// - path: path to a `.bedgraph` or `.bedgraph.gz` file
///
pub fn read_bedgraph<P: AsRef<Path>>(path: P) -> Result<IntervalTrack> {
    let path = path.as_ref();
    let (columns, _) = read_columns(path, &BEDGRAPH_LAYOUT, Width::Exactly(BEDGRAPH_COLUMNS))?;
    into_track(path, columns)
}

///
/// Read a per-base track (`chr base score`, exactly three columns).
///
pub fn read_bedbase<P: AsRef<Path>>(path: P) -> Result<PositionTrack> {
    let path = path.as_ref();
    let (columns, _) = read_columns(path, &BEDBASE_LAYOUT, Width::Exactly(BEDBASE_COLUMNS))?;
    into_track(path, columns)
}

///
/// Read peak calls from a narrowPeak (or any BED3+) file. Only the first
/// three columns are kept; every peak gets a score of 0, since peak
/// tracks are labelled by position alone.
///
/// # Arguments
/// - path: path to a `.narrowPeak`, `.bed` or gzipped variant
///
pub fn read_narrow_peaks<P: AsRef<Path>>(path: P) -> Result<IntervalTrack> {
    let path = path.as_ref();
    let (columns, rows) = read_columns(path, &PEAK_LAYOUT, Width::AtLeast(MIN_PEAK_COLUMNS))?;
    into_track(path, columns.with(SCORE, RawColumn::Float(vec![0.0; rows])))
}

///
/// Read a peak-calling cutoff table: tab separated, with a header line that
/// names at least the `avelpeak` and `score` columns.
///
pub fn read_cutoff_table<P: AsRef<Path>>(path: P) -> Result<CutoffTable> {
    let path = path.as_ref();
    let reader = get_dynamic_reader(path)?;

    let mut indices: Option<(usize, usize)> = None;
    let mut rows = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;

        if line.trim().is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split(FIELD_DELIMITER).map(str::trim).collect();

        let (length_index, score_index) = match indices {
            Some(found) => found,
            None => {
                let find = |column: &str| {
                    parts
                        .iter()
                        .position(|&name| name == column)
                        .ok_or_else(|| TrackIoError::MissingColumn {
                            path: path.to_path_buf(),
                            column: column.to_string(),
                        })
                };
                indices = Some((find(CUTOFF_TABLE_LENGTH_COLUMN)?, find(CUTOFF_TABLE_SCORE_COLUMN)?));
                continue;
            }
        };

        let needed = length_index.max(score_index) + 1;
        if parts.len() < needed {
            return Err(TrackIoError::ColumnCount {
                path: path.to_path_buf(),
                line: line_number,
                expected: Width::AtLeast(needed).describe(),
                found: parts.len(),
            });
        }

        let parse = |column: &str, field: &str| {
            field.parse::<f64>().map_err(|_| TrackIoError::Parse {
                path: path.to_path_buf(),
                line: line_number,
                message: format!("column {}: '{}' is not a number", column, field),
            })
        };

        rows.push(CutoffRow {
            average_peak_length: parse(CUTOFF_TABLE_LENGTH_COLUMN, parts[length_index])?,
            score: parse(CUTOFF_TABLE_SCORE_COLUMN, parts[score_index])?,
        });
    }

    if rows.is_empty() {
        return Err(TrackIoError::Empty {
            path: path.to_path_buf(),
        });
    }

    debug!("Read {} cutoffs from {}", rows.len(), path.display());
    Ok(CutoffTable::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;
    use std::path::PathBuf;

    use chromcompare_core::ChromCompareError;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn get_test_path(file_name: &str) -> PathBuf {
        std::env::current_dir()
            .unwrap()
            .join("../tests/data/tracks")
            .join(file_name)
    }

    fn write_temp(name: &str, content: &str) -> (tempfile::TempDir, PathBuf) {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        (tempdir, path)
    }

    #[rstest]
    fn test_read_bedgraph() {
        let track = read_bedgraph(get_test_path("reference_bias.bedgraph")).unwrap();
        assert_eq!(track.len(), 2);
        assert_eq!(track.chr(), &["chr1".to_string(), "chr1".to_string()]);
        assert_eq!(track.start(), &[0, 5]);
        assert_eq!(track.end(), &[5, 10]);
        assert_eq!(track.score(), &[2.0, 2.0]);
    }

    #[rstest]
    fn test_read_bedgraph_gz() {
        let plain = read_bedgraph(get_test_path("comparison_coverage.bedgraph")).unwrap();
        let gzipped = read_bedgraph(get_test_path("comparison_coverage.bedgraph.gz")).unwrap();
        assert_eq!(plain.rows().collect::<Vec<_>>(), gzipped.rows().collect::<Vec<_>>());
    }

    #[rstest]
    fn test_bedgraph_skips_headers() {
        let (_dir, path) = write_temp(
            "headers.bedgraph",
            "track type=bedGraph\n# comment\nchrom\tstart\tend\tvalue\nchr2\t10\t20\t1.5\n",
        );
        let track = read_bedgraph(&path).unwrap();
        assert_eq!(track.len(), 1);
        assert_eq!(track.score(), &[1.5]);
    }

    #[rstest]
    fn test_malformed_first_row_is_not_a_header() {
        let (_dir, path) = write_temp("malformed.bedgraph", "chr1\tabc\t10\t1.0\nchr1\t10\t20\t2.0\n");
        assert!(matches!(
            read_bedgraph(&path),
            Err(TrackIoError::Parse { line: 1, .. })
        ));
    }

    #[rstest]
    #[case("chr1\t0\t10\n")]
    #[case("chr1\t0\t10\t1.0\textra\n")]
    fn test_bedgraph_requires_four_columns(#[case] content: &str) {
        let (_dir, path) = write_temp("bad.bedgraph", content);
        assert!(matches!(
            read_bedgraph(&path),
            Err(TrackIoError::ColumnCount { line: 1, .. })
        ));
    }

    #[rstest]
    fn test_bad_score_reports_line() {
        let (_dir, path) = write_temp("bad.bedgraph", "chr1\t0\t10\t1.0\nchr1\t10\t20\thigh\n");
        assert!(matches!(
            read_bedgraph(&path),
            Err(TrackIoError::Parse { line: 2, .. })
        ));
    }

    #[rstest]
    fn test_negative_position_is_schema_error() {
        let (_dir, path) = write_temp("bad.bedgraph", "chr1\t-5\t10\t1.0\n");
        assert!(matches!(
            read_bedgraph(&path),
            Err(TrackIoError::Track {
                source: ChromCompareError::Schema(_),
                ..
            })
        ));
    }

    #[rstest]
    fn test_empty_file() {
        let (_dir, path) = write_temp("empty.bedgraph", "track type=bedGraph\n");
        assert!(matches!(read_bedgraph(&path), Err(TrackIoError::Empty { .. })));
    }

    #[rstest]
    fn test_read_narrow_peaks() {
        let track = read_narrow_peaks(get_test_path("reference_unmerged.narrowPeak")).unwrap();
        assert_eq!(track.start(), &[2, 6]);
        assert_eq!(track.end(), &[4, 8]);
        assert_eq!(track.score(), &[0.0, 0.0]);
    }

    #[rstest]
    fn test_narrow_peaks_need_three_columns() {
        let (_dir, path) = write_temp("bad.narrowPeak", "chr1\t2\n");
        assert!(matches!(
            read_narrow_peaks(&path),
            Err(TrackIoError::ColumnCount { .. })
        ));
    }

    #[rstest]
    fn test_read_bedbase() {
        let (_dir, path) = write_temp("track.bedbase", "chr1\t0\t0.5\nchr1\t1\t0.25\n");
        let track = read_bedbase(&path).unwrap();
        assert_eq!(track.base(), &[0, 1]);
        assert_eq!(track.score(), &[0.5, 0.25]);
    }

    #[rstest]
    fn test_read_cutoff_table() {
        let table = read_cutoff_table(get_test_path("cutoffs.tsv")).unwrap();
        assert_eq!(table.rows.len(), 4);
        assert_eq!(table.select_cutoff(250).unwrap(), 1.5);
    }

    #[rstest]
    fn test_cutoff_table_without_score() {
        let (_dir, path) = write_temp("cutoffs.tsv", "pscore\tavelpeak\n2.0\t150.5\n");
        assert!(matches!(
            read_cutoff_table(&path),
            Err(TrackIoError::MissingColumn { column, .. }) if column == "score"
        ));
    }
}
