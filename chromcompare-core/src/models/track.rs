//! Columnar genomic tracks.
//!
//! A [`Track`] is a chromosome column plus a *key* (the position columns) and
//! a set of *values*. The three shapes the pipeline works with are aliases:
//!
//! | Alias                    | Columns                              |
//! |--------------------------|--------------------------------------|
//! | [`IntervalTrack`]        | `CHR START END SCORE`                |
//! | [`PositionTrack`]        | `CHR BASE SCORE`                     |
//! | [`BoundedPositionTrack`] | `CHR BASE LOWER_SCORE UPPER_SCORE`   |
//!
//! Rows are assumed sorted by position within a chromosome. That is not
//! checked; every transformation preserves row order and returns a new track.

use std::fmt::{self, Display};

use crate::errors::{ChromCompareError, Result};
use crate::models::column::{Column, NamedColumns};

pub const CHR: &str = "CHR";
pub const START: &str = "START";
pub const END: &str = "END";
pub const BASE: &str = "BASE";
pub const SCORE: &str = "SCORE";
pub const LOWER_SCORE: &str = "LOWER_SCORE";
pub const UPPER_SCORE: &str = "UPPER_SCORE";

///
/// A fixed group of columns that is part of a track schema.
///
pub trait ColumnGroup: Sized {
    /// Column names, in output order.
    const NAMES: &'static [&'static str];

    fn len(&self) -> usize;

    fn column(&self, name: &str) -> Option<Column<'_>>;

    /// Claim this group's columns, coercing them to their types.
    fn from_columns(columns: &mut NamedColumns) -> Result<Self>;

    /// Append the textual form of row `i` to `fields`.
    fn push_fields(&self, i: usize, fields: &mut Vec<String>);
}

/// `START`/`END` of half-open intervals.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Spans {
    pub start: Vec<u32>,
    pub end: Vec<u32>,
}

/// One `BASE` per row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bases {
    pub base: Vec<u32>,
}

/// A single `SCORE` per row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Score {
    pub score: Vec<f64>,
}

/// A `LOWER_SCORE`/`UPPER_SCORE` pair per row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bounds {
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl ColumnGroup for Spans {
    const NAMES: &'static [&'static str] = &[START, END];

    fn len(&self) -> usize {
        self.start.len()
    }

    fn column(&self, name: &str) -> Option<Column<'_>> {
        match name {
            START => Some(Column::Integer(&self.start)),
            END => Some(Column::Integer(&self.end)),
            _ => None,
        }
    }

    fn from_columns(columns: &mut NamedColumns) -> Result<Self> {
        let start = columns.take(START)?.into_positions(START)?;
        let end = columns.take(END)?.into_positions(END)?;
        check_lengths(&[(START, start.len()), (END, end.len())])?;
        Ok(Spans { start, end })
    }

    fn push_fields(&self, i: usize, fields: &mut Vec<String>) {
        fields.push(self.start[i].to_string());
        fields.push(self.end[i].to_string());
    }
}

impl ColumnGroup for Bases {
    const NAMES: &'static [&'static str] = &[BASE];

    fn len(&self) -> usize {
        self.base.len()
    }

    fn column(&self, name: &str) -> Option<Column<'_>> {
        match name {
            BASE => Some(Column::Integer(&self.base)),
            _ => None,
        }
    }

    fn from_columns(columns: &mut NamedColumns) -> Result<Self> {
        let base = columns.take(BASE)?.into_positions(BASE)?;
        Ok(Bases { base })
    }

    fn push_fields(&self, i: usize, fields: &mut Vec<String>) {
        fields.push(self.base[i].to_string());
    }
}

impl ColumnGroup for Score {
    const NAMES: &'static [&'static str] = &[SCORE];

    fn len(&self) -> usize {
        self.score.len()
    }

    fn column(&self, name: &str) -> Option<Column<'_>> {
        match name {
            SCORE => Some(Column::Float(&self.score)),
            _ => None,
        }
    }

    fn from_columns(columns: &mut NamedColumns) -> Result<Self> {
        let score = columns.take(SCORE)?.into_scores(SCORE)?;
        Ok(Score { score })
    }

    fn push_fields(&self, i: usize, fields: &mut Vec<String>) {
        fields.push(self.score[i].to_string());
    }
}

impl ColumnGroup for Bounds {
    const NAMES: &'static [&'static str] = &[LOWER_SCORE, UPPER_SCORE];

    fn len(&self) -> usize {
        self.lower.len()
    }

    fn column(&self, name: &str) -> Option<Column<'_>> {
        match name {
            LOWER_SCORE => Some(Column::Float(&self.lower)),
            UPPER_SCORE => Some(Column::Float(&self.upper)),
            _ => None,
        }
    }

    fn from_columns(columns: &mut NamedColumns) -> Result<Self> {
        let lower = columns.take(LOWER_SCORE)?.into_scores(LOWER_SCORE)?;
        let upper = columns.take(UPPER_SCORE)?.into_scores(UPPER_SCORE)?;
        check_lengths(&[(LOWER_SCORE, lower.len()), (UPPER_SCORE, upper.len())])?;
        Ok(Bounds { lower, upper })
    }

    fn push_fields(&self, i: usize, fields: &mut Vec<String>) {
        fields.push(self.lower[i].to_string());
        fields.push(self.upper[i].to_string());
    }
}

fn check_lengths(lengths: &[(&str, usize)]) -> Result<()> {
    if let Some((first_name, first_len)) = lengths.first() {
        for (name, len) in &lengths[1..] {
            if len != first_len {
                return Err(ChromCompareError::Schema(format!(
                    "Column {} has {} rows but column {} has {}",
                    name, len, first_name, first_len
                )));
            }
        }
    }
    Ok(())
}

///
/// Genomic data keyed by chromosome and position columns `K`, carrying the
/// value columns `V`.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Track<K, V> {
    chr: Vec<String>,
    key: K,
    values: V,
}

pub type IntervalTrack = Track<Spans, Score>;
pub type PositionTrack = Track<Bases, Score>;
pub type BoundedPositionTrack = Track<Bases, Bounds>;

impl<K: ColumnGroup, V: ColumnGroup> Track<K, V> {
    ///
    /// Assemble a track from already typed parts, checking that every
    /// column has the same number of rows.
    ///
    pub fn from_parts(chr: Vec<String>, key: K, values: V) -> Result<Self> {
        check_lengths(&[
            (CHR, chr.len()),
            (K::NAMES[0], key.len()),
            (V::NAMES[0], values.len()),
        ])?;
        Ok(Track { chr, key, values })
    }

    ///
    /// Build a track from named, untyped columns. Column types are coerced
    /// (chromosome to text, positions to integers, scores to floats) and any
    /// value that cannot be coerced is an error.
    ///
    pub fn from_columns(mut columns: NamedColumns) -> Result<Self> {
        let chr = columns.take(CHR)?.into_text(CHR)?;
        let key = K::from_columns(&mut columns)?;
        let values = V::from_columns(&mut columns)?;
        columns.finish()?;
        Track::from_parts(chr, key, values)
    }

    /// Column names of this track shape, in output order.
    pub fn schema() -> Vec<&'static str> {
        std::iter::once(CHR)
            .chain(K::NAMES.iter().copied())
            .chain(V::NAMES.iter().copied())
            .collect()
    }

    pub fn column(&self, name: &str) -> Option<Column<'_>> {
        if name == CHR {
            return Some(Column::Text(&self.chr));
        }
        self.key.column(name).or_else(|| self.values.column(name))
    }

    pub fn len(&self) -> usize {
        self.chr.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chr.is_empty()
    }

    pub fn chr(&self) -> &[String] {
        &self.chr
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn values(&self) -> &V {
        &self.values
    }

    ///
    /// Tab separated text of row `i`, in schema order.
    ///
    pub fn row_string(&self, i: usize) -> String {
        let mut fields = vec![self.chr[i].clone()];
        self.key.push_fields(i, &mut fields);
        self.values.push_fields(i, &mut fields);
        fields.join("\t")
    }

    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.len()).map(|i| self.row_string(i))
    }

    /// Same positions, new values.
    pub fn with_values<W: ColumnGroup>(&self, values: W) -> Result<Track<K, W>>
    where
        K: Clone,
    {
        Track::from_parts(self.chr.clone(), self.key.clone(), values)
    }
}

impl<K: PartialEq, V> Track<K, V> {
    ///
    /// True when `other` has the same chromosome and position columns,
    /// element for element and in the same order.
    ///
    pub fn same_positions<W>(&self, other: &Track<K, W>) -> bool {
        self.chr == other.chr && self.key == other.key
    }
}

impl<K: ColumnGroup, V: ColumnGroup> Display for Track<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Track [{}] with {} rows.", Self::schema().join(", "), self.len())
    }
}

impl IntervalTrack {
    pub fn new(chr: Vec<String>, start: Vec<u32>, end: Vec<u32>, score: Vec<f64>) -> Result<Self> {
        check_lengths(&[(START, start.len()), (END, end.len())])?;
        Track::from_parts(chr, Spans { start, end }, Score { score })
    }
}

impl PositionTrack {
    pub fn new(chr: Vec<String>, base: Vec<u32>, score: Vec<f64>) -> Result<Self> {
        Track::from_parts(chr, Bases { base }, Score { score })
    }
}

impl BoundedPositionTrack {
    pub fn new(chr: Vec<String>, base: Vec<u32>, lower: Vec<f64>, upper: Vec<f64>) -> Result<Self> {
        check_lengths(&[(LOWER_SCORE, lower.len()), (UPPER_SCORE, upper.len())])?;
        Track::from_parts(chr, Bases { base }, Bounds { lower, upper })
    }
}

impl<V> Track<Spans, V> {
    pub fn start(&self) -> &[u32] {
        &self.key.start
    }

    pub fn end(&self) -> &[u32] {
        &self.key.end
    }
}

impl<V> Track<Bases, V> {
    pub fn base(&self) -> &[u32] {
        &self.key.base
    }
}

impl<K> Track<K, Score> {
    pub fn score(&self) -> &[f64] {
        &self.values.score
    }
}

impl<K> Track<K, Bounds> {
    pub fn lower(&self) -> &[f64] {
        &self.values.lower
    }

    pub fn upper(&self) -> &[f64] {
        &self.values.upper
    }
}

///
/// True iff `a` and `b` have identical `CHR` and position column(s),
/// compared element-wise in their original order.
///
pub fn positions_equal<K: PartialEq, V, W>(a: &Track<K, V>, b: &Track<K, W>) -> bool {
    a.same_positions(b)
}

///
/// Gate for every cross-track computation: fails with
/// [`ChromCompareError::Alignment`] unless both tracks share positions.
///
pub fn ensure_aligned<K: PartialEq, V, W>(a: &Track<K, V>, b: &Track<K, W>, what: &str) -> Result<()> {
    if positions_equal(a, b) {
        Ok(())
    } else {
        Err(ChromCompareError::Alignment(format!(
            "{} ({} rows vs {} rows)",
            what,
            a.chr.len(),
            b.chr.len()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::column::RawColumn;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn chrs(n: usize) -> Vec<String> {
        vec!["chr1".to_string(); n]
    }

    #[fixture]
    fn positions() -> PositionTrack {
        PositionTrack::new(chrs(3), vec![10, 11, 12], vec![0.0, 1.0, 2.0]).unwrap()
    }

    #[rstest]
    fn test_schema_names() {
        assert_eq!(IntervalTrack::schema(), vec!["CHR", "START", "END", "SCORE"]);
        assert_eq!(PositionTrack::schema(), vec!["CHR", "BASE", "SCORE"]);
        assert_eq!(
            BoundedPositionTrack::schema(),
            vec!["CHR", "BASE", "LOWER_SCORE", "UPPER_SCORE"]
        );
    }

    #[rstest]
    fn test_column_access_by_name(positions: PositionTrack) {
        assert_eq!(positions.column("BASE"), Some(Column::Integer(&[10, 11, 12][..])));
        assert_eq!(positions.column("SCORE"), Some(Column::Float(&[0.0, 1.0, 2.0][..])));
        assert_eq!(positions.column("CHR").map(|c| c.len()), Some(3));
        assert_eq!(positions.column("START"), None);
    }

    #[rstest]
    fn test_mismatched_lengths_are_a_schema_error() {
        let result = IntervalTrack::new(chrs(2), vec![0, 10], vec![10], vec![1.0, 2.0]);
        assert!(matches!(result, Err(ChromCompareError::Schema(_))));

        let result = PositionTrack::new(chrs(2), vec![0, 1], vec![1.0]);
        assert!(matches!(result, Err(ChromCompareError::Schema(_))));
    }

    #[rstest]
    fn test_from_columns_coerces_types() {
        let columns = NamedColumns::new()
            .with("CHR", RawColumn::Integer(vec![1, 1]))
            .with("START", RawColumn::Text(vec!["0".into(), "5".into()]))
            .with("END", RawColumn::Float(vec![5.0, 10.0]))
            .with("SCORE", RawColumn::Integer(vec![3, 4]));

        let track = IntervalTrack::from_columns(columns).unwrap();
        assert_eq!(track.chr(), &["1".to_string(), "1".to_string()]);
        assert_eq!(track.start(), &[0, 5]);
        assert_eq!(track.end(), &[5, 10]);
        assert_eq!(track.score(), &[3.0, 4.0]);
    }

    #[rstest]
    fn test_from_columns_rejects_ragged_columns() {
        let columns = NamedColumns::new()
            .with("CHR", RawColumn::Text(vec!["chr1".into()]))
            .with("BASE", RawColumn::Integer(vec![1, 2]))
            .with("SCORE", RawColumn::Float(vec![0.5, 0.5]));
        assert!(matches!(
            PositionTrack::from_columns(columns),
            Err(ChromCompareError::Schema(_))
        ));
    }

    #[rstest]
    fn test_from_columns_rejects_malformed_numbers() {
        let columns = NamedColumns::new()
            .with("CHR", RawColumn::Text(vec!["chr1".into()]))
            .with("BASE", RawColumn::Integer(vec![1]))
            .with("SCORE", RawColumn::Text(vec!["high".into()]));
        assert!(PositionTrack::from_columns(columns).is_err());
    }

    #[rstest]
    fn test_positions_equal_is_reflexive_and_symmetric(positions: PositionTrack) {
        let bounded = BoundedPositionTrack::new(chrs(3), vec![10, 11, 12], vec![0.0; 3], vec![1.0; 3]).unwrap();

        assert!(positions_equal(&positions, &positions));
        assert!(positions_equal(&positions, &bounded));
        assert!(positions_equal(&bounded, &positions));
    }

    #[rstest]
    #[case(vec![12, 11, 10])]
    #[case(vec![10, 11])]
    #[case(vec![10, 11, 13])]
    fn test_positions_differ(positions: PositionTrack, #[case] bases: Vec<u32>) {
        let n = bases.len();
        let other = PositionTrack::new(chrs(n), bases, vec![0.0; n]).unwrap();
        assert!(!positions_equal(&positions, &other));
        assert!(!positions_equal(&other, &positions));
        assert!(matches!(
            ensure_aligned(&positions, &other, "test"),
            Err(ChromCompareError::Alignment(_))
        ));
    }

    #[rstest]
    fn test_positions_differ_by_chromosome(positions: PositionTrack) {
        let other = PositionTrack::new(
            vec!["chr1".into(), "chr2".into(), "chr1".into()],
            vec![10, 11, 12],
            vec![0.0; 3],
        )
        .unwrap();
        assert!(!positions_equal(&positions, &other));
    }

    #[rstest]
    fn test_row_strings(positions: PositionTrack) {
        let rows: Vec<String> = positions.rows().collect();
        assert_eq!(rows, vec!["chr1\t10\t0", "chr1\t11\t1", "chr1\t12\t2"]);
    }

    #[rstest]
    fn test_with_values_keeps_positions(positions: PositionTrack) {
        let bounded = positions
            .with_values(Bounds {
                lower: vec![0.0; 3],
                upper: vec![1.0; 3],
            })
            .unwrap();
        assert!(positions_equal(&positions, &bounded));
        assert_eq!(bounded.upper(), &[1.0, 1.0, 1.0]);
    }

    #[rstest]
    fn test_interval_positions_compare_end() {
        let a = IntervalTrack::new(chrs(2), vec![0, 10], vec![10, 20], vec![1.0, 2.0]).unwrap();
        let b = IntervalTrack::new(chrs(2), vec![0, 10], vec![10, 25], vec![1.0, 2.0]).unwrap();
        assert!(positions_equal(&a, &a));
        assert!(!positions_equal(&a, &b));
        assert!(matches!(
            ensure_aligned(&a, &b, "intervals"),
            Err(ChromCompareError::Alignment(_))
        ));
    }

    #[rstest]
    fn test_alignment_error_names_row_counts(positions: PositionTrack) {
        let shorter = PositionTrack::new(chrs(2), vec![10, 11], vec![0.0; 2]).unwrap();
        let err = ensure_aligned(&positions, &shorter, "coverage vs bias").unwrap_err();
        match err {
            ChromCompareError::Alignment(message) => {
                assert_eq!(message, "coverage vs bias (3 rows vs 2 rows)")
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
