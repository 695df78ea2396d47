use crate::errors::{ChromCompareError, Result};

/// Borrowed view of one column of a track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Column<'a> {
    Text(&'a [String]),
    Integer(&'a [u32]),
    Float(&'a [f64]),
}

impl Column<'_> {
    pub fn len(&self) -> usize {
        match self {
            Column::Text(values) => values.len(),
            Column::Integer(values) => values.len(),
            Column::Float(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

///
/// An untyped column as handed over by a reader, before it is coerced
/// into the type its name demands.
///
#[derive(Debug, Clone, PartialEq)]
pub enum RawColumn {
    Text(Vec<String>),
    Integer(Vec<i64>),
    Float(Vec<f64>),
}

impl RawColumn {
    pub fn len(&self) -> usize {
        match self {
            RawColumn::Text(values) => values.len(),
            RawColumn::Integer(values) => values.len(),
            RawColumn::Float(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Chromosome labels. Integers are accepted (`1`, `2`, ... style contigs).
    pub fn into_text(self, name: &str) -> Result<Vec<String>> {
        match self {
            RawColumn::Text(values) => Ok(values),
            RawColumn::Integer(values) => Ok(values.iter().map(|v| v.to_string()).collect()),
            RawColumn::Float(_) => Err(ChromCompareError::Schema(format!(
                "Column {} must hold text, found floating point values",
                name
            ))),
        }
    }

    /// Genomic positions. Floats are accepted only when they are whole numbers.
    pub fn into_positions(self, name: &str) -> Result<Vec<u32>> {
        let invalid = |row: usize, value: String| {
            ChromCompareError::Schema(format!(
                "Column {} row {}: '{}' is not a valid genomic position",
                name, row, value
            ))
        };

        match self {
            RawColumn::Integer(values) => values
                .into_iter()
                .enumerate()
                .map(|(row, v)| u32::try_from(v).map_err(|_| invalid(row, v.to_string())))
                .collect(),
            RawColumn::Float(values) => values
                .into_iter()
                .enumerate()
                .map(|(row, v)| {
                    if v.is_finite() && v.fract() == 0.0 && v >= 0.0 && v <= u32::MAX as f64 {
                        Ok(v as u32)
                    } else {
                        Err(invalid(row, v.to_string()))
                    }
                })
                .collect(),
            RawColumn::Text(values) => values
                .into_iter()
                .enumerate()
                .map(|(row, v)| v.trim().parse::<u32>().map_err(|_| invalid(row, v)))
                .collect(),
        }
    }

    /// Signal values.
    pub fn into_scores(self, name: &str) -> Result<Vec<f64>> {
        match self {
            RawColumn::Float(values) => Ok(values),
            RawColumn::Integer(values) => Ok(values.into_iter().map(|v| v as f64).collect()),
            RawColumn::Text(values) => values
                .into_iter()
                .enumerate()
                .map(|(row, v)| {
                    v.trim().parse::<f64>().map_err(|_| {
                        ChromCompareError::Schema(format!(
                            "Column {} row {}: '{}' is not a number",
                            name, row, v
                        ))
                    })
                })
                .collect(),
        }
    }
}

///
/// Named raw columns waiting to be claimed by a schema.
///
#[derive(Debug, Default)]
pub struct NamedColumns {
    columns: Vec<(String, RawColumn)>,
}

impl NamedColumns {
    pub fn new() -> Self {
        NamedColumns::default()
    }

    pub fn with(mut self, name: impl Into<String>, column: RawColumn) -> Self {
        self.columns.push((name.into(), column));
        self
    }

    ///
    /// Remove and return the column called `name`.
    ///
    pub fn take(&mut self, name: &str) -> Result<RawColumn> {
        let index = self
            .columns
            .iter()
            .position(|(n, _)| n == name)
            .ok_or_else(|| ChromCompareError::Schema(format!("Missing column {}", name)))?;
        Ok(self.columns.remove(index).1)
    }

    ///
    /// Fails when columns remain that no schema field claimed.
    ///
    pub fn finish(self) -> Result<()> {
        if self.columns.is_empty() {
            return Ok(());
        }
        let names: Vec<&str> = self.columns.iter().map(|(n, _)| n.as_str()).collect();
        Err(ChromCompareError::Schema(format!(
            "Unexpected columns: {}",
            names.join(", ")
        )))
    }
}

impl<S: Into<String>> FromIterator<(S, RawColumn)> for NamedColumns {
    fn from_iter<T: IntoIterator<Item = (S, RawColumn)>>(iter: T) -> Self {
        NamedColumns {
            columns: iter.into_iter().map(|(n, c)| (n.into(), c)).collect(),
        }
    }
}
